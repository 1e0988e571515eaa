//! Entities: plain data types with a statically registered field set.
//!
//! [`Entity`] is the typed side, implemented by user types. [`DynEntity`] is
//! its object-safe counterpart, blanket-implemented for every entity, used
//! wherever the concrete type is only known at runtime.

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::descriptor::EntityDescriptor;
use crate::error::{Error, ErrorContext, Result};
use crate::record::{Object, Record};
use crate::value::{EntityValue, Value};

/// Runtime identity of an entity type.
#[derive(Clone, Copy)]
pub struct EntityType {
    id: TypeId,
    name: &'static str,
}

impl EntityType {
    /// Returns the identity of `E`.
    #[must_use]
    pub fn of<E: Entity>() -> Self {
        Self {
            id: TypeId::of::<E>(),
            name: E::descriptor().name(),
        }
    }

    /// Returns the underlying type id.
    #[must_use]
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Returns the registered entity type name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns true if this is the identity of `E`.
    #[must_use]
    pub fn is<E: Entity>(&self) -> bool {
        self.id == TypeId::of::<E>()
    }
}

impl PartialEq for EntityType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for EntityType {}

impl Hash for EntityType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityType({})", self.name)
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// A plain data type whose fields are registered in an [`EntityDescriptor`].
///
/// ```ignore
/// #[derive(Debug, Default)]
/// struct Person {
///     name: String,
///     age: i64,
/// }
///
/// impl Entity for Person {
///     fn descriptor() -> &'static EntityDescriptor<Self> {
///         static DESCRIPTOR: OnceLock<EntityDescriptor<Person>> = OnceLock::new();
///         DESCRIPTOR.get_or_init(|| {
///             EntityDescriptor::new("Person")
///                 .with_field(public_field!(Person, name))
///                 .with_field(public_field!(Person, age))
///         })
///     }
/// }
/// ```
pub trait Entity: Default + fmt::Debug + Send + Sync + 'static {
    /// Returns the field registry of this type.
    fn descriptor() -> &'static EntityDescriptor<Self>;

    /// Returns the embedded base entity if this type extends another one.
    ///
    /// A type that embeds its base this way counts as a subtype of the base
    /// for mapper type checks, and inherits the public instance fields of
    /// the base.
    fn base(&self) -> Option<&dyn DynEntity> {
        None
    }

    /// Mutable counterpart of [`base`](Self::base).
    ///
    /// Must return the same embedded entity; inherited fields are written
    /// through it.
    fn base_mut(&mut self) -> Option<&mut dyn DynEntity> {
        None
    }

    /// Creates an entity from an associative array.
    ///
    /// Keys that do not name a public instance field, own or inherited, are
    /// ignored; fields missing from `data` keep their default.
    ///
    /// # Errors
    ///
    /// Returns a type mismatch if a value does not fit its field.
    fn from_array(data: &Record) -> Result<Self> {
        let mut entity = Self::default();
        for (name, value) in data.iter() {
            if entity.has_field(name) {
                entity.write_field(name, value.clone())?;
            }
        }
        Ok(entity)
    }

    /// Creates an entity from the public properties of a generic object.
    ///
    /// # Errors
    ///
    /// Returns a type mismatch if a value does not fit its field.
    fn from_object(data: &dyn ObjectSource) -> Result<Self> {
        let mut entity = Self::default();
        for (name, value) in data.properties() {
            if entity.has_field(&name) {
                entity.write_field(&name, value)?;
            }
        }
        Ok(entity)
    }

    /// Wraps the entity into a shareable [`Value`].
    fn into_value(self) -> Value {
        Value::Entity(EntityValue::new(Arc::new(self)))
    }
}

/// Object-safe view of an entity.
pub trait DynEntity: fmt::Debug + Send + Sync + 'static {
    /// Returns the runtime entity type.
    fn entity_type(&self) -> EntityType;

    /// Upcasts to `Any` for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Upcasts a shared entity to `Any` for downcasting.
    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;

    /// Returns the embedded base entity, see [`Entity::base`].
    fn supertype(&self) -> Option<&dyn DynEntity>;

    /// Returns true if `name` is a public instance field of this type or of
    /// one of its bases.
    fn has_field(&self, name: &str) -> bool;

    /// Reads a public instance field, falling back along the base chain.
    fn read_field(&self, name: &str) -> Option<Value>;

    /// Writes a public instance field, falling back along the base chain.
    ///
    /// # Errors
    ///
    /// Returns `PropertyNotFound` if no type in the chain declares `name` as
    /// a public instance field, or a type mismatch if the value does not fit.
    fn write_field(&mut self, name: &str, value: Value) -> Result<()>;

    /// Projects all public instance fields into an associative array.
    ///
    /// Own fields come first in declaration order, followed by inherited
    /// fields that are not redeclared.
    fn to_array(&self) -> Record;

    /// Projects all public instance fields into a generic object.
    fn to_object(&self) -> Object;

    /// Like [`to_array`](Self::to_array), with nested entities replaced by
    /// their own serializable arrays.
    fn to_serializable_array(&self) -> Record;
}

impl<E: Entity> DynEntity for E {
    fn entity_type(&self) -> EntityType {
        EntityType::of::<E>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }

    fn supertype(&self) -> Option<&dyn DynEntity> {
        self.base()
    }

    fn has_field(&self, name: &str) -> bool {
        E::descriptor().public_field(name).is_some()
            || self.base().is_some_and(|base| base.has_field(name))
    }

    fn read_field(&self, name: &str) -> Option<Value> {
        match E::descriptor().public_field(name) {
            Some(field) => field.read(self).ok(),
            None => self.base()?.read_field(name),
        }
    }

    fn write_field(&mut self, name: &str, value: Value) -> Result<()> {
        let descriptor = E::descriptor();
        if let Some(field) = descriptor.public_field(name) {
            return field
                .write(self, value)
                .map_err(|e| e.with_context(ErrorContext::new().with_entity(descriptor.name())));
        }
        match self.base_mut() {
            Some(base) => base.write_field(name, value),
            None => Err(Error::property_not_found(name).with_context(
                ErrorContext::new()
                    .with_entity(descriptor.name())
                    .with_property(name),
            )),
        }
    }

    fn to_array(&self) -> Record {
        let mut array: Record = E::descriptor()
            .public_fields()
            .filter_map(|field| Some((field.name(), field.read(self).ok()?)))
            .collect();
        if let Some(base) = self.base() {
            for (name, value) in base.to_array() {
                if !array.contains_key(&name) {
                    array.insert(name, value);
                }
            }
        }
        array
    }

    fn to_object(&self) -> Object {
        self.to_array().into()
    }

    fn to_serializable_array(&self) -> Record {
        self.to_array()
            .into_iter()
            .map(|(name, value)| match value {
                Value::Entity(nested) => {
                    (name, Value::Record(nested.entity().to_serializable_array()))
                }
                other => (name, other),
            })
            .collect()
    }
}

impl dyn DynEntity {
    /// Returns true if the entity is an `E` or embeds one as a base.
    #[must_use]
    pub fn is_a<E: Entity>(&self) -> bool {
        self.downcast_ref::<E>().is_some()
    }

    /// Views the entity as an `E`, following the chain of base entities.
    #[must_use]
    pub fn downcast_ref<E: Entity>(&self) -> Option<&E> {
        let mut current = Some(self);
        while let Some(candidate) = current {
            if let Some(found) = candidate.as_any().downcast_ref::<E>() {
                return Some(found);
            }
            current = candidate.supertype();
        }
        None
    }
}

impl<E: Entity> From<Arc<E>> for Value {
    fn from(entity: Arc<E>) -> Self {
        Value::Entity(EntityValue::new(entity))
    }
}

/// A generic object whose public instance properties can be read by name.
pub trait ObjectSource {
    /// Returns the value of a public instance property, if there is one.
    fn property(&self, name: &str) -> Option<Value>;

    /// Returns all public instance properties in declaration order.
    fn properties(&self) -> Vec<(Arc<str>, Value)>;
}

impl ObjectSource for Object {
    fn property(&self, name: &str) -> Option<Value> {
        self.field(name).cloned()
    }

    fn properties(&self) -> Vec<(Arc<str>, Value)> {
        self.fields().map(|(k, v)| (Arc::from(k), v.clone())).collect()
    }
}

impl<E: Entity> ObjectSource for E {
    fn property(&self, name: &str) -> Option<Value> {
        self.read_field(name)
    }

    fn properties(&self) -> Vec<(Arc<str>, Value)> {
        self.to_array().into_iter().collect()
    }
}

impl ObjectSource for dyn DynEntity {
    fn property(&self, name: &str) -> Option<Value> {
        self.read_field(name)
    }

    fn properties(&self) -> Vec<(Arc<str>, Value)> {
        self.to_array().into_iter().collect()
    }
}
