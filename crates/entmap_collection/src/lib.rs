//! Entity collections for entmap.
//!
//! This crate provides:
//! - [`EntityCollection`] - Append-only list of shared entities, unique by identity

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod collection;

pub use collection::EntityCollection;
