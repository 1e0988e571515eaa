//! Two-way value converters applied at the mapper boundary.
//!
//! A [`Converter<I, X>`] turns an internal (entity-side) value `I` into an
//! external value `X` and back. Mappings store converters over [`Value`];
//! [`TypedConverter`] adapts a typed converter to that shape.

use std::fmt;
use std::marker::PhantomData;

use entmap_foundation::{Error, FromValue, Result, Value};

/// Converts between an internal and an external representation.
pub trait Converter<I, X>: Send + Sync {
    /// Converts an entity value into its external form.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be represented externally.
    fn convert_to(&self, value: I) -> Result<X>;

    /// Converts an external value back into its entity form.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not a valid external form.
    fn convert_from(&self, value: X) -> Result<I>;
}

/// Adapts a `Converter<I, X>` to `Converter<Value, Value>`.
///
/// Inputs are extracted with [`FromValue`]; a value of the wrong type fails
/// with a type mismatch before the inner converter runs.
pub struct TypedConverter<C, I, X> {
    inner: C,
    _types: PhantomData<fn(I) -> X>,
}

impl<C, I, X> TypedConverter<C, I, X>
where
    C: Converter<I, X>,
{
    /// Wraps a typed converter.
    #[must_use]
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            _types: PhantomData,
        }
    }

    /// Returns the wrapped converter.
    #[must_use]
    pub fn inner(&self) -> &C {
        &self.inner
    }
}

impl<C, I, X> Converter<Value, Value> for TypedConverter<C, I, X>
where
    C: Converter<I, X>,
    I: FromValue + Into<Value>,
    X: FromValue + Into<Value>,
{
    fn convert_to(&self, value: Value) -> Result<Value> {
        self.inner.convert_to(I::from_value(value)?).map(Into::into)
    }

    fn convert_from(&self, value: Value) -> Result<Value> {
        self.inner.convert_from(X::from_value(value)?).map(Into::into)
    }
}

impl<C: fmt::Debug, I, X> fmt::Debug for TypedConverter<C, I, X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypedConverter").field(&self.inner).finish()
    }
}

/// Integer field, decimal string externally.
#[derive(Clone, Copy, Debug, Default)]
pub struct IntToStringConverter;

impl Converter<i64, String> for IntToStringConverter {
    fn convert_to(&self, value: i64) -> Result<String> {
        Ok(value.to_string())
    }

    fn convert_from(&self, value: String) -> Result<i64> {
        value
            .trim()
            .parse()
            .map_err(|e| Error::conversion(format!("`{value}` is not an integer: {e}")))
    }
}

/// Boolean field, `0`/`1` externally.
#[derive(Clone, Copy, Debug, Default)]
pub struct BoolToIntConverter;

impl Converter<bool, i64> for BoolToIntConverter {
    fn convert_to(&self, value: bool) -> Result<i64> {
        Ok(i64::from(value))
    }

    fn convert_from(&self, value: i64) -> Result<bool> {
        match value {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(Error::conversion(format!("{other} is not a boolean flag"))),
        }
    }
}

/// Float field, string externally.
///
/// Uses the shortest representation that parses back to the same float.
#[derive(Clone, Copy, Debug, Default)]
pub struct FloatToStringConverter;

impl Converter<f64, String> for FloatToStringConverter {
    fn convert_to(&self, value: f64) -> Result<String> {
        Ok(value.to_string())
    }

    fn convert_from(&self, value: String) -> Result<f64> {
        value
            .trim()
            .parse()
            .map_err(|e| Error::conversion(format!("`{value}` is not a number: {e}")))
    }
}

/// Converter built from a pair of closures.
pub struct FnConverter<I, X, T, F> {
    to: T,
    from: F,
    _types: PhantomData<fn(I) -> X>,
}

impl<I, X, T, F> FnConverter<I, X, T, F>
where
    T: Fn(I) -> Result<X> + Send + Sync,
    F: Fn(X) -> Result<I> + Send + Sync,
{
    /// Creates a converter from `convert_to` and `convert_from` closures.
    #[must_use]
    pub fn new(to: T, from: F) -> Self {
        Self {
            to,
            from,
            _types: PhantomData,
        }
    }
}

impl<I, X, T, F> Converter<I, X> for FnConverter<I, X, T, F>
where
    T: Fn(I) -> Result<X> + Send + Sync,
    F: Fn(X) -> Result<I> + Send + Sync,
{
    fn convert_to(&self, value: I) -> Result<X> {
        (self.to)(value)
    }

    fn convert_from(&self, value: X) -> Result<I> {
        (self.from)(value)
    }
}

impl<I, X, T, F> fmt::Debug for FnConverter<I, X, T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnConverter")
    }
}

/// Lets `None` through unchanged in both directions.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullableConverter<C>(pub C);

impl<C> NullableConverter<C> {
    /// Wraps a converter.
    #[must_use]
    pub fn new(inner: C) -> Self {
        Self(inner)
    }
}

impl<C, I, X> Converter<Option<I>, Option<X>> for NullableConverter<C>
where
    C: Converter<I, X>,
{
    fn convert_to(&self, value: Option<I>) -> Result<Option<X>> {
        value.map(|v| self.0.convert_to(v)).transpose()
    }

    fn convert_from(&self, value: Option<X>) -> Result<Option<I>> {
        value.map(|v| self.0.convert_from(v)).transpose()
    }
}
