//! Type descriptors for entity fields.

use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Type descriptor for entity fields and values.
///
/// Declared on every [`FieldDescriptor`](crate::FieldDescriptor) and reported
/// by [`Value::value_type`](crate::Value::value_type).
#[derive(Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Type {
    /// The nil type (only value: nil).
    Nil,
    /// Boolean type.
    Bool,
    /// 64-bit signed integer.
    Int,
    /// 64-bit floating point.
    Float,
    /// String type.
    String,
    /// Homogeneous list type.
    List(Box<Type>),
    /// String-keyed associative array.
    Record,
    /// Generic named-field object.
    Object,
    /// Nested entity of the named entity type.
    Entity(Arc<str>),
    /// Optional type (value or nil).
    Option(Box<Type>),
    /// Any type (runtime lists and untyped fields).
    Any,
}

impl Type {
    /// Creates a list type with the given element type.
    #[must_use]
    pub fn list(element: Type) -> Self {
        Self::List(Box::new(element))
    }

    /// Creates a nested entity type.
    #[must_use]
    pub fn entity(name: &str) -> Self {
        Self::Entity(name.into())
    }

    /// Creates an optional type.
    #[must_use]
    pub fn option(inner: Type) -> Self {
        Self::Option(Box::new(inner))
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => write!(f, "nil"),
            Self::Bool => write!(f, "bool"),
            Self::Int => write!(f, "int"),
            Self::Float => write!(f, "float"),
            Self::String => write!(f, "string"),
            Self::List(t) => write!(f, "list<{t:?}>"),
            Self::Record => write!(f, "record"),
            Self::Object => write!(f, "object"),
            Self::Entity(name) => write!(f, "entity<{name}>"),
            Self::Option(t) => write!(f, "option<{t:?}>"),
            Self::Any => write!(f, "any"),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
