//! Property mappings and mapping sets.

use std::fmt;
use std::sync::Arc;

use entmap_foundation::{Error, FromValue, Result, Value};
use tracing::debug;

use crate::converter::{Converter, TypedConverter};

/// Associates an entity property with an optional converter.
///
/// Immutable once built. Clones share the converter.
#[derive(Clone)]
pub struct PropertyMapping {
    property_name: Arc<str>,
    converter: Option<Arc<dyn Converter<Value, Value>>>,
}

impl PropertyMapping {
    /// Maps a property as is.
    #[must_use]
    pub fn new(property_name: impl Into<Arc<str>>) -> Self {
        Self {
            property_name: property_name.into(),
            converter: None,
        }
    }

    /// Maps a property through a value converter.
    #[must_use]
    pub fn with_converter(
        property_name: impl Into<Arc<str>>,
        converter: impl Converter<Value, Value> + 'static,
    ) -> Self {
        Self {
            property_name: property_name.into(),
            converter: Some(Arc::new(converter)),
        }
    }

    /// Maps a property through a typed converter.
    ///
    /// ```ignore
    /// PropertyMapping::converted("age", IntToStringConverter)
    /// ```
    #[must_use]
    pub fn converted<C, I, X>(property_name: impl Into<Arc<str>>, converter: C) -> Self
    where
        C: Converter<I, X> + 'static,
        I: FromValue + Into<Value> + 'static,
        X: FromValue + Into<Value> + 'static,
    {
        Self::with_converter(property_name, TypedConverter::new(converter))
    }

    /// Returns the mapped property name.
    #[must_use]
    pub fn property_name(&self) -> &str {
        &self.property_name
    }

    /// Returns the converter, if any.
    #[must_use]
    pub fn converter(&self) -> Option<&dyn Converter<Value, Value>> {
        self.converter.as_deref()
    }

    /// Applies `convert_to`, or passes the value through without a converter.
    ///
    /// # Errors
    ///
    /// Propagates converter failures.
    pub fn convert_to(&self, value: Value) -> Result<Value> {
        match &self.converter {
            Some(converter) => converter.convert_to(value),
            None => Ok(value),
        }
    }

    /// Applies `convert_from`, or passes the value through without a converter.
    ///
    /// # Errors
    ///
    /// Propagates converter failures.
    pub fn convert_from(&self, value: Value) -> Result<Value> {
        match &self.converter {
            Some(converter) => converter.convert_from(value),
            None => Ok(value),
        }
    }
}

impl fmt::Debug for PropertyMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyMapping")
            .field("property_name", &self.property_name)
            .field("converted", &self.converter.is_some())
            .finish()
    }
}

/// Ordered set of property mappings, unique by property name.
#[derive(Clone, Debug, Default)]
pub struct PropertyMappings {
    mappings: Vec<PropertyMapping>,
}

impl PropertyMappings {
    /// Creates a set from initial mappings.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateMapping` if two mappings share a property name.
    pub fn new(mappings: impl IntoIterator<Item = PropertyMapping>) -> Result<Self> {
        let mut set = Self::default();
        set.add(mappings)?;
        Ok(set)
    }

    /// Appends mappings one at a time.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateMapping` for the first mapping whose name is already
    /// in the set. Mappings appended before it stay in the set.
    pub fn add(&mut self, mappings: impl IntoIterator<Item = PropertyMapping>) -> Result<()> {
        for mapping in mappings {
            if self.find_by_property_name(mapping.property_name()).is_some() {
                debug!(property = mapping.property_name(), "rejected duplicate property mapping");
                return Err(Error::duplicate_mapping(mapping.property_name()));
            }
            self.mappings.push(mapping);
        }
        Ok(())
    }

    /// Finds the mapping of a property.
    #[must_use]
    pub fn find_by_property_name(&self, property_name: &str) -> Option<&PropertyMapping> {
        self.mappings
            .iter()
            .find(|m| m.property_name() == property_name)
    }

    /// Returns the number of mappings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    /// Returns true if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    /// Gets the mapping at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&PropertyMapping> {
        self.mappings.get(index)
    }

    /// Iterates over the mappings in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, PropertyMapping> {
        self.mappings.iter()
    }
}

impl<'a> IntoIterator for &'a PropertyMappings {
    type Item = &'a PropertyMapping;
    type IntoIter = std::slice::Iter<'a, PropertyMapping>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
