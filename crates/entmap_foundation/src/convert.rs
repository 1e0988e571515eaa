//! Typed extraction from [`Value`].
//!
//! `Into<Value>` covers the outbound direction; [`FromValue`] is the checked
//! inbound direction used by field writers and typed converters.

use std::sync::Arc;

use crate::entity::{DynEntity, Entity};
use crate::error::{Error, Result};
use crate::record::{Object, Record};
use crate::types::Type;
use crate::value::{EntityValue, Value};

/// Checked conversion out of a [`Value`].
pub trait FromValue: Sized {
    /// The value type this conversion accepts.
    fn value_type() -> Type;

    /// Extracts `Self`, failing with a type mismatch for any other variant.
    fn from_value(value: Value) -> Result<Self>;
}

fn mismatch<T: FromValue>(value: &Value) -> Error {
    Error::type_mismatch(T::value_type(), value.value_type())
}

impl FromValue for Value {
    fn value_type() -> Type {
        Type::Any
    }

    fn from_value(value: Value) -> Result<Self> {
        Ok(value)
    }
}

impl FromValue for bool {
    fn value_type() -> Type {
        Type::Bool
    }

    fn from_value(value: Value) -> Result<Self> {
        value.as_bool().ok_or_else(|| mismatch::<Self>(&value))
    }
}

impl FromValue for i64 {
    fn value_type() -> Type {
        Type::Int
    }

    fn from_value(value: Value) -> Result<Self> {
        value.as_int().ok_or_else(|| mismatch::<Self>(&value))
    }
}

impl FromValue for i32 {
    fn value_type() -> Type {
        Type::Int
    }

    fn from_value(value: Value) -> Result<Self> {
        let n = i64::from_value(value)?;
        i32::try_from(n).map_err(|_| Error::conversion(format!("{n} is out of range for i32")))
    }
}

impl FromValue for f64 {
    fn value_type() -> Type {
        Type::Float
    }

    #[allow(clippy::cast_precision_loss)]
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Float(n) => Ok(n),
            Value::Int(n) => Ok(n as f64),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

impl FromValue for Arc<str> {
    fn value_type() -> Type {
        Type::String
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

impl FromValue for String {
    fn value_type() -> Type {
        Type::String
    }

    fn from_value(value: Value) -> Result<Self> {
        Arc::<str>::from_value(value).map(|s| s.to_string())
    }
}

impl FromValue for Record {
    fn value_type() -> Type {
        Type::Record
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Record(r) => Ok(r),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

impl FromValue for Object {
    fn value_type() -> Type {
        Type::Object
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(o) => Ok(o),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn value_type() -> Type {
        Type::list(T::value_type())
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::List(items) => items.into_iter().map(T::from_value).collect(),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn value_type() -> Type {
        Type::option(T::value_type())
    }

    fn from_value(value: Value) -> Result<Self> {
        if value.is_nil() {
            Ok(None)
        } else {
            T::from_value(value).map(Some)
        }
    }
}

impl<E: Entity> FromValue for Arc<E> {
    fn value_type() -> Type {
        Type::entity(E::descriptor().name())
    }

    fn from_value(value: Value) -> Result<Self> {
        let entity = match value {
            Value::Entity(EntityValue(entity)) => entity,
            other => return Err(mismatch::<Self>(&other)),
        };
        let actual = entity.entity_type().name();
        entity
            .into_any()
            .downcast::<E>()
            .map_err(|_| Error::type_mismatch(Self::value_type(), Type::entity(actual)))
    }
}
