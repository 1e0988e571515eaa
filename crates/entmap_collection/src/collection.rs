//! Append-only entity collection.

use std::fmt;
use std::ops::Index;
use std::sync::Arc;

use entmap_foundation::{DynEntity, Error, Result, Value};
use tracing::debug;

/// Ordered list of shared entities in which each entity appears at most once.
///
/// Uniqueness is by identity: two `Arc`s pointing at the same allocation are
/// the same entity, equal field values are not. Entities can only be
/// appended; replacing or removing one fails with `NotImplemented`.
pub struct EntityCollection<E: DynEntity + ?Sized = dyn DynEntity> {
    entities: Vec<Arc<E>>,
}

impl<E: DynEntity + ?Sized> EntityCollection<E> {
    /// Creates a collection from initial entities, in order.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateEntity` if the same entity is passed twice.
    pub fn new(entities: impl IntoIterator<Item = Arc<E>>) -> Result<Self> {
        let mut collection = Self::default();
        for entity in entities {
            collection.push(entity)?;
        }
        Ok(collection)
    }

    /// Appends an entity.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateEntity` if the entity is already in the collection;
    /// the collection is left unchanged.
    pub fn push(&mut self, entity: Arc<E>) -> Result<()> {
        if let Some(index) = self.position(&entity) {
            debug!(
                entity_type = %entity.entity_type(),
                index,
                "rejected duplicate entity"
            );
            return Err(Error::duplicate_entity());
        }
        self.entities.push(entity);
        Ok(())
    }

    /// Always fails: entities cannot be replaced.
    ///
    /// # Errors
    ///
    /// Always returns `NotImplemented`.
    #[allow(clippy::unused_self, clippy::needless_pass_by_value)]
    pub fn set(&mut self, _index: usize, _entity: Arc<E>) -> Result<()> {
        Err(Error::not_implemented("EntityCollection::set"))
    }

    /// Always fails: entities cannot be removed.
    ///
    /// # Errors
    ///
    /// Always returns `NotImplemented`.
    #[allow(clippy::unused_self)]
    pub fn remove(&mut self, _index: usize) -> Result<Arc<E>> {
        Err(Error::not_implemented("EntityCollection::remove"))
    }

    /// Returns the number of entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns true if the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Gets the entity at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Arc<E>> {
        self.entities.get(index)
    }

    /// Returns true if `index` holds an entity.
    #[must_use]
    pub fn contains_index(&self, index: usize) -> bool {
        index < self.entities.len()
    }

    /// Returns true if this very entity is in the collection.
    #[must_use]
    pub fn contains(&self, entity: &Arc<E>) -> bool {
        self.position(entity).is_some()
    }

    /// Iterates over the entities in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Arc<E>> {
        self.entities.iter()
    }

    /// Returns the entities as a slice.
    #[must_use]
    pub fn to_array(&self) -> &[Arc<E>] {
        &self.entities
    }

    /// Returns a list holding each entity's serializable array.
    #[must_use]
    pub fn to_serializable_array(&self) -> Value {
        Value::from(
            self.entities
                .iter()
                .map(|entity| entity.to_serializable_array())
                .collect::<Vec<_>>(),
        )
    }

    fn position(&self, entity: &Arc<E>) -> Option<usize> {
        self.entities.iter().position(|e| Arc::ptr_eq(e, entity))
    }
}

impl<E: DynEntity + ?Sized> Default for EntityCollection<E> {
    fn default() -> Self {
        Self {
            entities: Vec::new(),
        }
    }
}

impl<E: DynEntity + ?Sized> Clone for EntityCollection<E> {
    fn clone(&self) -> Self {
        Self {
            entities: self.entities.clone(),
        }
    }
}

impl<E: DynEntity + ?Sized> fmt::Debug for EntityCollection<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.entities).finish()
    }
}

impl<E: DynEntity + ?Sized> Index<usize> for EntityCollection<E> {
    type Output = Arc<E>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.entities[index]
    }
}

impl<'a, E: DynEntity + ?Sized> IntoIterator for &'a EntityCollection<E> {
    type Item = &'a Arc<E>;
    type IntoIter = std::slice::Iter<'a, Arc<E>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
