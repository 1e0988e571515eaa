//! Integration tests for Layer 0: Foundation
//!
//! Tests for core types: Value, Record, Object, Error, and entities.

mod entities;
mod errors;
