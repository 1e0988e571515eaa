//! Error types for entity and mapping operations.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

use crate::types::Type;

/// Result alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for entmap operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    ///
    /// Context already present is kept and only missing parts are filled in,
    /// so the innermost location wins.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(match self.context.take() {
            Some(existing) => existing.merge(context),
            None => context,
        });
        self
    }

    /// Creates an entity type mismatch error.
    #[must_use]
    pub fn entity_type_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::new(ErrorKind::EntityTypeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        })
    }

    /// Creates a property not found error.
    #[must_use]
    pub fn property_not_found(property: impl Into<String>) -> Self {
        Self::new(ErrorKind::PropertyNotFound(property.into()))
    }

    /// Creates a duplicate mapping error.
    #[must_use]
    pub fn duplicate_mapping(property: impl Into<String>) -> Self {
        Self::new(ErrorKind::DuplicateMapping(property.into()))
    }

    /// Creates a duplicate entity error.
    #[must_use]
    pub fn duplicate_entity() -> Self {
        Self::new(ErrorKind::DuplicateEntity)
    }

    /// Creates a not implemented error for the named method.
    #[must_use]
    pub fn not_implemented(method: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotImplemented {
            method: method.into(),
        })
    }

    /// Creates a value type mismatch error.
    #[must_use]
    pub fn type_mismatch(expected: Type, actual: Type) -> Self {
        Self::new(ErrorKind::TypeMismatch { expected, actual })
    }

    /// Creates a conversion error.
    #[must_use]
    pub fn conversion(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conversion(message.into()))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// The entity passed to a mapper is not of the mapper's entity type.
    #[error("entity of type `{actual}` does not match the entity type `{expected}`")]
    EntityTypeMismatch {
        /// The mapper's entity type.
        expected: String,
        /// The runtime type of the entity.
        actual: String,
    },

    /// A mapped property is not a public instance field of the entity type.
    #[error("public property `{0}` does not exist in the entity type")]
    PropertyNotFound(String),

    /// A property mapping with the same property name already exists.
    #[error("a property mapping with the property name `{0}` already exists")]
    DuplicateMapping(String),

    /// The entity is already part of the collection.
    #[error("the entity already exists in the collection")]
    DuplicateEntity,

    /// The operation is deliberately unsupported.
    #[error("method `{method}` is not implemented")]
    NotImplemented {
        /// Qualified name of the unsupported method.
        method: String,
    },

    /// A value does not have the type the field or converter expects.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        /// The expected type.
        expected: Type,
        /// The actual type encountered.
        actual: Type,
    },

    /// A converter rejected a value.
    #[error("conversion failed: {0}")]
    Conversion(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// Entity type being processed.
    pub entity: Option<String>,
    /// Property being processed.
    pub property: Option<String>,
    /// Operation in progress (e.g. `map_from_array`).
    pub operation: Option<&'static str>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the entity type.
    #[must_use]
    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    /// Sets the property.
    #[must_use]
    pub fn with_property(mut self, property: impl Into<String>) -> Self {
        self.property = Some(property.into());
        self
    }

    /// Sets the operation.
    #[must_use]
    pub fn with_operation(mut self, operation: &'static str) -> Self {
        self.operation = Some(operation);
        self
    }

    fn merge(self, outer: Self) -> Self {
        Self {
            entity: self.entity.or(outer.entity),
            property: self.property.or(outer.property),
            operation: self.operation.or(outer.operation),
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(operation) = self.operation {
            write!(f, "in {operation}")?;
        }
        match (&self.entity, &self.property) {
            (Some(entity), Some(property)) => write!(f, " at {entity}.{property}"),
            (Some(entity), None) => write!(f, " at {entity}"),
            (None, Some(property)) => write!(f, " at .{property}"),
            (None, None) => Ok(()),
        }
    }
}
