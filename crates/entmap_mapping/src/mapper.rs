//! Mapping entities to and from records and generic objects.
//!
//! An [`EntityPropertyMapper`] is bound to one entity type and one mapping
//! set. Every operation validates each mapped property against the entity
//! type before touching any data, and either succeeds completely or fails
//! without a partial result.
//!
//! The two inbound directions skip missing data differently: from a record a
//! mapping is skipped when its key is absent, from an object when the source
//! has no public instance property of that name.

use std::fmt;
use std::marker::PhantomData;

use entmap_foundation::{
    DynEntity, Entity, EntityType, Error, ErrorContext, Object, ObjectSource, Record, Result,
};
use tracing::{debug, trace};

use crate::mapping::PropertyMappings;

const MAP_TO_ARRAY: &str = "map_to_array";
const MAP_FROM_ARRAY: &str = "map_from_array";
const MAP_TO_OBJECT: &str = "map_to_object";
const MAP_FROM_OBJECT: &str = "map_from_object";

/// Maps entities of type `E` through a set of property mappings.
pub struct EntityPropertyMapper<E: Entity> {
    entity_type: EntityType,
    mappings: PropertyMappings,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> EntityPropertyMapper<E> {
    /// Creates a mapper for `E`.
    #[must_use]
    pub fn new(mappings: PropertyMappings) -> Self {
        Self {
            entity_type: EntityType::of::<E>(),
            mappings,
            _entity: PhantomData,
        }
    }

    /// Returns the entity type this mapper is bound to.
    #[must_use]
    pub fn entity_type(&self) -> EntityType {
        self.entity_type
    }

    /// Returns the mapping set.
    #[must_use]
    pub fn mappings(&self) -> &PropertyMappings {
        &self.mappings
    }

    /// Maps an entity into an associative array keyed by property name.
    ///
    /// Keys follow the order of the mapping set.
    ///
    /// # Errors
    ///
    /// - `EntityTypeMismatch` if `entity` is neither an `E` nor extends one
    /// - `PropertyNotFound` if a mapping names no public instance field of
    ///   `E` or of one of its bases
    /// - any converter failure
    pub fn map_to_array(&self, entity: &dyn DynEntity) -> Result<Record> {
        self.map_out(entity, MAP_TO_ARRAY)
    }

    /// Maps an entity into a generic object with one field per mapping.
    ///
    /// # Errors
    ///
    /// Same as [`map_to_array`](Self::map_to_array).
    pub fn map_to_object(&self, entity: &dyn DynEntity) -> Result<Object> {
        self.map_out(entity, MAP_TO_OBJECT).map(Object::from)
    }

    /// Creates an entity from an associative array.
    ///
    /// Mappings whose key is absent from `data` are skipped and the field
    /// keeps its default. Keys without a mapping are ignored.
    ///
    /// # Errors
    ///
    /// - `PropertyNotFound` if a mapping names no public instance field of
    ///   `E` or of one of its bases, whether or not `data` has the key
    /// - any converter failure, or a type mismatch assigning a field
    pub fn map_from_array(&self, data: &Record) -> Result<E> {
        self.check_properties(&E::default(), MAP_FROM_ARRAY)?;

        let mut staged = Record::new();
        for mapping in &self.mappings {
            let name = mapping.property_name();
            let Some(value) = data.get(name) else {
                debug!(
                    entity = self.entity_type.name(),
                    property = name,
                    "key absent, skipped"
                );
                continue;
            };

            let value = mapping.convert_from(value.clone()).map_err(|e| {
                e.with_context(self.context(MAP_FROM_ARRAY).with_property(name))
            })?;
            trace!(entity = self.entity_type.name(), property = name, "mapped property");
            staged.insert(name, value);
        }

        E::from_array(&staged).map_err(|e| e.with_context(self.context(MAP_FROM_ARRAY)))
    }

    /// Creates an entity from the public instance properties of an object.
    ///
    /// Mappings without a same-named public instance property on `data` are
    /// skipped and the field keeps its default.
    ///
    /// # Errors
    ///
    /// Same as [`map_from_array`](Self::map_from_array).
    pub fn map_from_object<S>(&self, data: &S) -> Result<E>
    where
        S: ObjectSource + ?Sized,
    {
        self.check_properties(&E::default(), MAP_FROM_OBJECT)?;

        let mut staged = Object::new();
        for mapping in &self.mappings {
            let name = mapping.property_name();
            let Some(value) = data.property(name) else {
                debug!(
                    entity = self.entity_type.name(),
                    property = name,
                    "source property absent, skipped"
                );
                continue;
            };

            let value = mapping.convert_from(value).map_err(|e| {
                e.with_context(self.context(MAP_FROM_OBJECT).with_property(name))
            })?;
            trace!(entity = self.entity_type.name(), property = name, "mapped property");
            staged.set_field(name, value);
        }

        E::from_object(&staged).map_err(|e| e.with_context(self.context(MAP_FROM_OBJECT)))
    }

    fn map_out(&self, entity: &dyn DynEntity, operation: &'static str) -> Result<Record> {
        let typed = self.check_entity(entity, operation)?;
        self.check_properties(typed, operation)?;

        let mut mapped = Record::new();
        for mapping in &self.mappings {
            let name = mapping.property_name();
            let value = typed
                .read_field(name)
                .ok_or_else(|| self.property_not_found(name, operation))?;
            let value = mapping
                .convert_to(value)
                .map_err(|e| e.with_context(self.context(operation).with_property(name)))?;
            trace!(entity = self.entity_type.name(), property = name, "mapped property");
            mapped.insert(name, value);
        }
        Ok(mapped)
    }

    fn check_entity<'a>(
        &self,
        entity: &'a dyn DynEntity,
        operation: &'static str,
    ) -> Result<&'a E> {
        entity.downcast_ref::<E>().ok_or_else(|| {
            Error::entity_type_mismatch(self.entity_type.name(), entity.entity_type().name())
                .with_context(self.context(operation))
        })
    }

    // `entity` is an `E`; `has_field` follows its base chain.
    fn check_properties(&self, entity: &dyn DynEntity, operation: &'static str) -> Result<()> {
        for mapping in &self.mappings {
            let name = mapping.property_name();
            if !entity.has_field(name) {
                return Err(self.property_not_found(name, operation));
            }
        }
        Ok(())
    }

    fn property_not_found(&self, name: &str, operation: &'static str) -> Error {
        Error::property_not_found(name).with_context(self.context(operation).with_property(name))
    }

    fn context(&self, operation: &'static str) -> ErrorContext {
        ErrorContext::new()
            .with_entity(self.entity_type.name())
            .with_operation(operation)
    }
}

impl<E: Entity> Clone for EntityPropertyMapper<E> {
    fn clone(&self) -> Self {
        Self {
            entity_type: self.entity_type,
            mappings: self.mappings.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E: Entity> fmt::Debug for EntityPropertyMapper<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityPropertyMapper")
            .field("entity_type", &self.entity_type)
            .field("mappings", &self.mappings)
            .finish()
    }
}
