//! entmap - Plain data entities mapped to and from loosely-typed data
//!
//! This crate re-exports all layers of entmap for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 1: entmap_mapping     - Converters, property mappings, entity property mapper
//!          entmap_collection  - Append-only, identity-unique entity collections
//! Layer 0: entmap_foundation  - Core types (Value, Record, Object, Entity, Error)
//! ```

pub use entmap_collection as collection;
pub use entmap_foundation as foundation;
pub use entmap_mapping as mapping;
