//! Integration tests for Error types
//!
//! Tests error construction, display, context, and error kinds.

use entmap_foundation::{Error, ErrorContext, ErrorKind, Type};

// =============================================================================
// Error Display
// =============================================================================

#[test]
fn display_names_the_offending_property() {
    let err = Error::property_not_found("email");
    assert_eq!(
        format!("{err}"),
        "public property `email` does not exist in the entity type"
    );
}

#[test]
fn display_duplicate_mapping() {
    let err = Error::duplicate_mapping("name");
    assert!(format!("{err}").contains("`name`"));
}

#[test]
fn display_entity_type_mismatch() {
    let err = Error::entity_type_mismatch("Person", "Robot");
    let msg = format!("{err}");
    assert!(msg.contains("Person"));
    assert!(msg.contains("Robot"));
}

#[test]
fn display_not_implemented() {
    let err = Error::not_implemented("EntityCollection::set");
    assert!(format!("{err}").contains("EntityCollection::set"));
}

#[test]
fn display_type_mismatch() {
    let err = Error::type_mismatch(Type::list(Type::String), Type::Int);
    let msg = format!("{err}");
    assert!(msg.contains("list<string>"));
    assert!(msg.contains("int"));
}

// =============================================================================
// Error Kind Matching
// =============================================================================

#[test]
fn kinds_carry_their_payload() {
    let err = Error::entity_type_mismatch("A", "B");
    if let ErrorKind::EntityTypeMismatch { expected, actual } = err.kind {
        assert_eq!(expected, "A");
        assert_eq!(actual, "B");
    } else {
        panic!("Expected EntityTypeMismatch");
    }

    assert!(matches!(Error::duplicate_entity().kind, ErrorKind::DuplicateEntity));
    assert!(matches!(Error::conversion("nope").kind, ErrorKind::Conversion(ref m) if m == "nope"));
}

// =============================================================================
// Error with Context
// =============================================================================

#[test]
fn context_display() {
    let ctx = ErrorContext::new()
        .with_operation("map_from_array")
        .with_entity("Person")
        .with_property("age");
    assert_eq!(format!("{ctx}"), "in map_from_array at Person.age");
}

#[test]
fn innermost_context_wins() {
    let err = Error::type_mismatch(Type::Int, Type::String)
        .with_context(ErrorContext::new().with_property("age"))
        .with_context(
            ErrorContext::new()
                .with_property("outer")
                .with_entity("Person")
                .with_operation("map_from_object"),
        );
    let ctx = err.context.expect("context");
    assert_eq!(ctx.property.as_deref(), Some("age"));
    assert_eq!(ctx.entity.as_deref(), Some("Person"));
    assert_eq!(ctx.operation, Some("map_from_object"));
}
