//! Static field descriptors for entity types.
//!
//! An [`EntityDescriptor`] is registered once per entity type and lists its
//! fields in declaration order. Only public instance fields carry an
//! accessor; non-public and type-level fields are declared but never resolve.

use std::fmt;

use indexmap::IndexMap;

use crate::convert::FromValue;
use crate::error::{Error, ErrorContext, Result};
use crate::types::Type;
use crate::value::Value;

/// Field visibility.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// Readable and writable by mappers.
    Public,
    /// Visible to subtypes only.
    Protected,
    /// Visible to the declaring type only.
    Private,
}

/// Whether a field belongs to each instance or to the type itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldScope {
    /// One value per entity instance.
    Instance,
    /// One value shared by the type (a static).
    Type,
}

// Resolved on demand: the type of an `Option<Arc<Self>>` field needs the
// entity's own descriptor, which is still initialising.
enum FieldType {
    Declared(Type),
    Deferred(fn() -> Type),
}

type Reader<E> = Box<dyn Fn(&E) -> Value + Send + Sync>;
type Writer<E> = Box<dyn Fn(&mut E, Value) -> Result<()> + Send + Sync>;

/// Typed getter/setter pair for a public instance field.
pub struct FieldAccessor<E> {
    read: Reader<E>,
    write: Writer<E>,
}

/// Declaration of a single entity field.
pub struct FieldDescriptor<E> {
    name: &'static str,
    ty: FieldType,
    visibility: Visibility,
    scope: FieldScope,
    accessor: Option<FieldAccessor<E>>,
}

impl<E: 'static> FieldDescriptor<E> {
    /// Declares a public instance field through a pair of projections.
    ///
    /// ```ignore
    /// FieldDescriptor::public("name", |p: &Person| &p.name, |p: &mut Person| &mut p.name)
    /// ```
    #[must_use]
    pub fn public<T>(
        name: &'static str,
        get: fn(&E) -> &T,
        get_mut: fn(&mut E) -> &mut T,
    ) -> Self
    where
        T: Clone + Into<Value> + FromValue + 'static,
    {
        Self {
            name,
            ty: FieldType::Deferred(T::value_type),
            visibility: Visibility::Public,
            scope: FieldScope::Instance,
            accessor: Some(FieldAccessor {
                read: Box::new(move |entity: &E| -> Value { get(entity).clone().into() }),
                write: Box::new(move |entity: &mut E, value: Value| -> Result<()> {
                    *get_mut(entity) = T::from_value(value)?;
                    Ok(())
                }),
            }),
        }
    }

    /// Declares a protected or private instance field.
    #[must_use]
    pub fn hidden(name: &'static str, ty: Type, visibility: Visibility) -> Self {
        Self {
            name,
            ty: FieldType::Declared(ty),
            visibility,
            scope: FieldScope::Instance,
            accessor: None,
        }
    }

    /// Declares a type-level (static) field.
    #[must_use]
    pub fn type_level(name: &'static str, ty: Type, visibility: Visibility) -> Self {
        Self {
            name,
            ty: FieldType::Declared(ty),
            visibility,
            scope: FieldScope::Type,
            accessor: None,
        }
    }
}

impl<E> FieldDescriptor<E> {
    /// Returns the field name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the declared field type.
    #[must_use]
    pub fn ty(&self) -> Type {
        match &self.ty {
            FieldType::Declared(ty) => ty.clone(),
            FieldType::Deferred(ty) => ty(),
        }
    }

    /// Returns the field visibility.
    #[must_use]
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Returns the field scope.
    #[must_use]
    pub fn scope(&self) -> FieldScope {
        self.scope
    }

    /// Returns true for public instance fields, the only ones mappers touch.
    #[must_use]
    pub fn is_accessible(&self) -> bool {
        self.accessor.is_some()
    }

    /// Reads the field from an entity.
    ///
    /// # Errors
    ///
    /// Returns `PropertyNotFound` if the field is not a public instance field.
    pub fn read(&self, entity: &E) -> Result<Value> {
        let accessor = self.accessor()?;
        Ok((accessor.read)(entity))
    }

    /// Writes a value into the field of an entity.
    ///
    /// # Errors
    ///
    /// Returns `PropertyNotFound` if the field is not a public instance field,
    /// or a type mismatch if the value does not fit the field type.
    pub fn write(&self, entity: &mut E, value: Value) -> Result<()> {
        let accessor = self.accessor()?;
        (accessor.write)(entity, value)
            .map_err(|e| e.with_context(ErrorContext::new().with_property(self.name)))
    }

    fn accessor(&self) -> Result<&FieldAccessor<E>> {
        self.accessor
            .as_ref()
            .ok_or_else(|| Error::property_not_found(self.name))
    }
}

impl<E> fmt::Debug for FieldDescriptor<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("ty", &self.ty())
            .field("visibility", &self.visibility)
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

/// Field registry of an entity type.
///
/// Built once, usually inside a `OnceLock` in [`Entity::descriptor`](crate::Entity::descriptor).
pub struct EntityDescriptor<E> {
    name: &'static str,
    fields: IndexMap<&'static str, FieldDescriptor<E>>,
}

impl<E> EntityDescriptor<E> {
    /// Creates a descriptor with no fields.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            fields: IndexMap::new(),
        }
    }

    /// Adds a field.
    ///
    /// Redeclaring a name replaces the earlier declaration in place.
    #[must_use]
    pub fn with_field(mut self, field: FieldDescriptor<E>) -> Self {
        self.fields.insert(field.name, field);
        self
    }

    /// Returns the entity type name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the number of declared fields, accessible or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if no fields are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Looks up any declared field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor<E>> {
        self.fields.get(name)
    }

    /// Looks up a public instance field by name.
    #[must_use]
    pub fn public_field(&self, name: &str) -> Option<&FieldDescriptor<E>> {
        self.field(name).filter(|f| f.is_accessible())
    }

    /// Iterates over all declared fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldDescriptor<E>> {
        self.fields.values()
    }

    /// Iterates over public instance fields in declaration order.
    pub fn public_fields(&self) -> impl Iterator<Item = &FieldDescriptor<E>> {
        self.fields.values().filter(|f| f.is_accessible())
    }
}

impl<E> fmt::Debug for EntityDescriptor<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityDescriptor")
            .field("name", &self.name)
            .field("fields", &self.fields.values().collect::<Vec<_>>())
            .finish()
    }
}

/// Declares a public instance field named after the struct field.
///
/// ```ignore
/// EntityDescriptor::new("Person")
///     .with_field(public_field!(Person, name))
///     .with_field(public_field!(Person, age))
/// ```
#[macro_export]
macro_rules! public_field {
    ($entity:ty, $field:ident) => {
        $crate::FieldDescriptor::<$entity>::public(
            stringify!($field),
            |e: &$entity| &e.$field,
            |e: &mut $entity| &mut e.$field,
        )
    };
}
