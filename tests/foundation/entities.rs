//! Integration tests for entities
//!
//! Tests descriptors, array/object projection, construction from data,
//! nested entities, and subtype chains.

use entmap_foundation::{
    DynEntity, Entity, EntityDescriptor, EntityType, EntityValue, ErrorKind, FieldDescriptor,
    FieldScope, Object, ObjectSource, Record, Type, Value, Visibility, public_field,
};
use std::sync::{Arc, OnceLock};

#[derive(Debug, Default)]
struct Engine {
    cylinders: i64,
}

impl Entity for Engine {
    fn descriptor() -> &'static EntityDescriptor<Self> {
        static DESCRIPTOR: OnceLock<EntityDescriptor<Engine>> = OnceLock::new();
        DESCRIPTOR.get_or_init(|| {
            EntityDescriptor::new("Engine").with_field(public_field!(Engine, cylinders))
        })
    }
}

#[derive(Debug, Default)]
struct Car {
    model: String,
    doors: i32,
    mileage: f64,
    tags: Vec<String>,
    engine: Option<Arc<Engine>>,
    vin: String,
}

impl Entity for Car {
    fn descriptor() -> &'static EntityDescriptor<Self> {
        static DESCRIPTOR: OnceLock<EntityDescriptor<Car>> = OnceLock::new();
        DESCRIPTOR.get_or_init(|| {
            EntityDescriptor::new("Car")
                .with_field(public_field!(Car, model))
                .with_field(public_field!(Car, doors))
                .with_field(public_field!(Car, mileage))
                .with_field(public_field!(Car, tags))
                .with_field(public_field!(Car, engine))
                .with_field(FieldDescriptor::hidden("vin", Type::String, Visibility::Private))
                .with_field(FieldDescriptor::type_level("WHEELS", Type::Int, Visibility::Public))
        })
    }
}

#[derive(Debug, Default)]
struct Taxi {
    car: Car,
    license: String,
}

impl Entity for Taxi {
    fn descriptor() -> &'static EntityDescriptor<Self> {
        static DESCRIPTOR: OnceLock<EntityDescriptor<Taxi>> = OnceLock::new();
        DESCRIPTOR.get_or_init(|| {
            EntityDescriptor::new("Taxi").with_field(public_field!(Taxi, license))
        })
    }

    fn base(&self) -> Option<&dyn DynEntity> {
        Some(&self.car)
    }

    fn base_mut(&mut self) -> Option<&mut dyn DynEntity> {
        Some(&mut self.car)
    }
}

fn car() -> Car {
    Car {
        model: "Beetle".to_string(),
        doors: 2,
        mileage: 120_000.5,
        tags: vec!["classic".to_string()],
        engine: Some(Arc::new(Engine { cylinders: 4 })),
        vin: "WVW".to_string(),
    }
}

// =============================================================================
// Descriptors
// =============================================================================

#[test]
fn descriptor_types_follow_field_types() {
    let descriptor = Car::descriptor();
    assert_eq!(descriptor.name(), "Car");
    assert_eq!(descriptor.len(), 7);

    let ty = |name: &str| descriptor.field(name).map(FieldDescriptor::ty);
    assert_eq!(ty("doors"), Some(Type::Int));
    assert_eq!(ty("mileage"), Some(Type::Float));
    assert_eq!(ty("tags"), Some(Type::list(Type::String)));
    assert_eq!(ty("engine"), Some(Type::option(Type::entity("Engine"))));
    assert_eq!(descriptor.field("WHEELS").map(FieldDescriptor::scope), Some(FieldScope::Type));
}

#[test]
fn entity_type_identity() {
    assert_eq!(EntityType::of::<Car>(), car().entity_type());
    assert_ne!(EntityType::of::<Car>(), EntityType::of::<Taxi>());
    assert_eq!(format!("{}", EntityType::of::<Engine>()), "Engine");
    assert!(EntityType::of::<Car>().is::<Car>());
}

// =============================================================================
// Projection
// =============================================================================

#[test]
fn to_array_lists_public_instance_fields() {
    let array = car().to_array();
    assert_eq!(
        array.keys().collect::<Vec<_>>(),
        vec!["model", "doors", "mileage", "tags", "engine"]
    );
    assert_eq!(array.get("doors"), Some(&Value::Int(2)));
    assert!(!array.contains_key("vin"));
    assert!(!array.contains_key("WHEELS"));
}

#[test]
fn serializable_array_replaces_nested_entities() {
    let array = car().to_serializable_array();
    assert_eq!(
        array.get("engine"),
        Some(&Value::from(Record::new().with("cylinders", 4)))
    );
}

#[test]
fn to_object_preserves_order() {
    let object = car().to_object();
    let names: Vec<_> = object.fields().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["model", "doors", "mileage", "tags", "engine"]);
}

// =============================================================================
// Construction
// =============================================================================

#[test]
fn from_array_fills_known_fields() {
    let data = Record::new()
        .with("model", "Golf")
        .with("mileage", 10)
        .with("tags", vec!["new"])
        .with("vin", "ignored")
        .with("color", "red");
    let car = Car::from_array(&data).unwrap();
    assert_eq!(car.model, "Golf");
    assert!((car.mileage - 10.0).abs() < f64::EPSILON);
    assert_eq!(car.tags, vec!["new".to_string()]);
    assert_eq!(car.doors, 0);
    assert_eq!(car.vin, "");
}

#[test]
fn from_array_checks_nested_entity_type() {
    let wrong: Arc<dyn DynEntity> = Arc::new(car());
    let data = Record::new().with("engine", EntityValue::new(wrong));
    let err = Car::from_array(&data).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::TypeMismatch { .. }));
}

#[test]
fn from_array_range_checks_narrow_ints() {
    let err = Car::from_array(&Record::new().with("doors", i64::MAX)).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Conversion(_)));
}

#[test]
fn from_object_copies_between_entities() {
    let original = car();
    let copy = Car::from_object(&original).unwrap();
    assert_eq!(copy.model, "Beetle");
    assert!(Arc::ptr_eq(
        copy.engine.as_ref().unwrap(),
        original.engine.as_ref().unwrap()
    ));
    assert_eq!(copy.vin, "");
}

#[test]
fn from_object_reads_generic_objects() {
    let object = Object::new().with_field("doors", 5).with_field("engine", Value::Nil);
    let car = Car::from_object(&object).unwrap();
    assert_eq!(car.doors, 5);
    assert!(car.engine.is_none());
    assert_eq!(object.property("doors"), Some(Value::Int(5)));
}

// =============================================================================
// Subtypes
// =============================================================================

#[test]
fn base_chain_downcasts() {
    let taxi = Taxi {
        car: car(),
        license: "T-1".to_string(),
    };
    let entity: &dyn DynEntity = &taxi;
    assert_eq!(entity.downcast_ref::<Car>().map(|c| c.model.as_str()), Some("Beetle"));
    assert!(entity.is_a::<Taxi>());
    assert!(!entity.is_a::<Engine>());
    assert_eq!(entity.supertype().map(|s| s.entity_type().name()), Some("Car"));
}

#[test]
fn subtypes_carry_base_fields() {
    let taxi = Taxi {
        car: car(),
        license: "T-1".to_string(),
    };
    let array = taxi.to_array();
    assert_eq!(
        array.keys().collect::<Vec<_>>(),
        vec!["license", "model", "doors", "mileage", "tags", "engine"]
    );
    assert!(!array.contains_key("vin"));

    let rebuilt = Taxi::from_object(&taxi).unwrap();
    assert_eq!(rebuilt.license, "T-1");
    assert_eq!(rebuilt.car.model, "Beetle");
    assert_eq!(rebuilt.car.vin, "");

    let shared: &dyn DynEntity = &taxi;
    assert_eq!(shared.property("doors"), Some(Value::Int(2)));
}

#[test]
fn into_value_wraps_entities() {
    let value = Engine { cylinders: 6 }.into_value();
    assert_eq!(value.value_type(), Type::entity("Engine"));
    let engine = value.as_entity().and_then(|e| e.downcast_ref::<Engine>()).unwrap();
    assert_eq!(engine.cylinders, 6);
}
