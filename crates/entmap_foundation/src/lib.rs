//! Core types, values, and entity descriptors for entmap.
//!
//! This crate provides:
//! - [`Value`] - The loosely-typed value exchanged between entities and mappers
//! - [`Record`] and [`Object`] - Associative arrays and generic objects
//! - [`Type`] - Type descriptors for field and converter checks
//! - [`Entity`] and [`DynEntity`] - Entity types and their object-safe view
//! - [`EntityDescriptor`] - Static registry of an entity's fields
//! - [`Error`] - Rich error types with context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod convert;
mod descriptor;
mod entity;
mod error;
mod record;
mod types;
mod value;

pub use convert::FromValue;
pub use descriptor::{EntityDescriptor, FieldAccessor, FieldDescriptor, FieldScope, Visibility};
pub use entity::{DynEntity, Entity, EntityType, ObjectSource};
pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use record::{Object, Record};
pub use types::Type;
pub use value::{EntityValue, Value};
