//! Property mappings and the entity property mapper for entmap.
//!
//! This crate provides:
//! - [`Converter`] - Two-way value conversion, with [`TypedConverter`] and built-ins
//! - [`PropertyMapping`] and [`PropertyMappings`] - Which properties get mapped, and how
//! - [`EntityPropertyMapper`] - Maps entities to and from records and generic objects

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod converter;
mod mapper;
mod mapping;

pub use converter::{
    BoolToIntConverter, Converter, FloatToStringConverter, FnConverter, IntToStringConverter,
    NullableConverter, TypedConverter,
};
pub use mapper::EntityPropertyMapper;
pub use mapping::{PropertyMapping, PropertyMappings};
