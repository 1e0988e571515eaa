//! Integration tests for PropertyMappings
//!
//! Tests ordering, duplicate detection, and lookup.

use entmap_foundation::ErrorKind;
use entmap_mapping::{IntToStringConverter, PropertyMapping, PropertyMappings};

#[test]
fn duplicate_in_constructor_fails() {
    let err = PropertyMappings::new([
        PropertyMapping::new("name"),
        PropertyMapping::converted("name", IntToStringConverter),
    ])
    .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::DuplicateMapping(ref n) if n == "name"));
}

#[test]
fn failed_add_retains_earlier_additions() {
    let mut mappings = PropertyMappings::default();
    mappings.add([PropertyMapping::new("name")]).unwrap();
    let result = mappings.add([PropertyMapping::new("age"), PropertyMapping::new("name")]);
    assert!(result.is_err());
    assert_eq!(mappings.len(), 2);
    assert_eq!(mappings.get(1).map(PropertyMapping::property_name), Some("age"));
}

#[test]
fn lookup_by_name() {
    let mappings = PropertyMappings::new([
        PropertyMapping::new("name"),
        PropertyMapping::converted("age", IntToStringConverter),
    ])
    .unwrap();
    let age = mappings.find_by_property_name("age").unwrap();
    assert!(age.converter().is_some());
    assert!(mappings.find_by_property_name("email").is_none());
}

#[test]
fn cloned_mappings_share_converters() {
    let mapping = PropertyMapping::converted("age", IntToStringConverter);
    let clone = mapping.clone();
    let a = mapping.converter().unwrap() as *const _ as *const ();
    let b = clone.converter().unwrap() as *const _ as *const ();
    assert_eq!(a, b);
}
