//! Integration tests for Layer 1: Mapping
//!
//! Tests for converters, property mapping sets, and the entity property mapper.

mod mappings;
