//! End-to-end behaviour through the public API only.
use serde_json::json;
use typed_collection::{ClassRegistry, Collection, Error, Instance, TypeFactory, Value};

fn vals(xs: &[i64]) -> Vec<Value> {
    xs.iter().copied().map(Value::from).collect()
}

/// interface Entity; abstract EntityBase implements Entity; TestEntity extends EntityBase
fn entities() -> TypeFactory {
    let src = r#"{"types": [
        {"name": "Entity", "kind": "interface"},
        {"name": "EntityBase", "kind": "abstract", "extends": ["Entity"]},
        {"name": "TestEntity", "extends": ["EntityBase"]},
        {"name": "Other"}
    ]}"#;
    TypeFactory::with_registry(ClassRegistry::from_manifest_str(src).unwrap())
}

#[test]
fn type_guard_holds_from_construction_on() {
    let err = Collection::new("integer", vec![json!(1), json!(2), json!("x")]).unwrap_err();
    assert!(matches!(err, Error::ElementType { .. }));

    let mut c = Collection::new("integer", [1, 2, 3]).unwrap();
    assert_eq!(c.to_array(), vals(&[1, 2, 3]));
    assert!(c.push_element(1.5).is_err());
    assert!(c.unshift_element(Value::Null).is_err());
    assert!(c.iter().all(|x| c.descriptor().is_valid(x)));
}

#[test]
fn unshift_elements_preserves_batch_order() {
    let mut c = Collection::empty("string").unwrap();
    c.unshift_elements(["a", "b"]).unwrap();
    assert_eq!(c.to_array(), vec![Value::from("a"), Value::from("b")]);
}

#[test]
fn slice_examples() {
    let c = Collection::new("integer", [1, 2, 3, 4, 5]).unwrap();
    assert_eq!(c.slice(-2, None).unwrap().to_array(), vals(&[4, 5]));
    assert_eq!(c.slice(1, Some(-1)).unwrap().to_array(), vals(&[2, 3, 4]));
    assert_eq!(c.slice(1, Some(2)).unwrap().to_array(), vals(&[2, 3]));
}

#[test]
fn unordered_and_ordered_equality() {
    let a = Collection::new("string", ["a", "b", "c"]).unwrap();
    let b = Collection::new("string", ["a", "c", "b"]).unwrap();
    let pred = |x: &Value, y: &Value| x == y;
    assert!(a.is_equal_collection_by(&b, pred, false));
    assert!(b.is_equal_collection_by(&a, pred, false));
    assert!(!a.is_equal_collection_by(&b, pred, true));
}

#[test]
fn merge_interface_with_implementor() {
    let types = entities();
    let e1 = Instance::new("TestEntity").with_field("id", 1).into_value();
    let e2 = Instance::new("TestEntity").with_field("id", 2).into_value();
    let e3 = Instance::new("TestEntity").with_field("id", 3).into_value();

    let mut base = Collection::with_types(&types, "Entity", [e1.clone()]).unwrap();
    let concrete = Collection::with_types(&types, "TestEntity", [e2.clone(), e3.clone()]).unwrap();
    base.merge([&concrete]).unwrap();
    assert_eq!(base.to_array(), vec![e1, e2, e3]);
    assert_eq!(base.type_name(), "Entity");

    let others = Collection::with_types(&types, "Other", [Instance::new("Other")]).unwrap();
    assert!(matches!(base.merge([&others]), Err(Error::CollectionTypeMismatch { .. })));
    // the reverse direction is not assignable either
    let mut narrow = Collection::with_types(&types, "TestEntity", Vec::<Value>::new()).unwrap();
    assert!(matches!(narrow.merge([&base]), Err(Error::CollectionTypeMismatch { .. })));
}

#[test]
fn create_from_collections_arity_and_sum() {
    let types = entities();
    let a = Collection::with_types(&types, "TestEntity", [Instance::new("TestEntity")]).unwrap();
    let b = Collection::with_types(
        &types,
        "EntityBase",
        [Instance::new("TestEntity"), Instance::new("TestEntity")],
    )
    .unwrap();

    assert!(matches!(Collection::create_from_collections("Entity", Vec::<&Collection>::new()), Err(Error::Argument(_))));
    assert!(matches!(Collection::create_from_collections("Entity", [&a]), Err(Error::Argument(_))));

    let merged = Collection::create_from_collections("Entity", [&a, &b]).unwrap();
    assert_eq!(merged.count(), a.count() + b.count());
    assert!(matches!(
        Collection::create_from_collections("TestEntity", [&a, &b]),
        Err(Error::CollectionTypeMismatch { .. })
    ));
}

#[test]
fn fold_right_visits_indices_backwards() {
    let c = Collection::new("string", ["x", "y", "z"]).unwrap();
    let indices = c.fold_right(Vec::new(), |mut acc, _, i| {
        acc.push(i);
        acc
    });
    assert_eq!(indices, vec![2, 1, 0]);
}

#[test]
fn nominal_collection_rejects_strangers_with_instance_phrasing() {
    let types = entities();
    let mut c = Collection::with_types(&types, "\\EntityBase", Vec::<Value>::new()).unwrap();
    c.push_element(Instance::new("TestEntity")).unwrap();
    let err = c.push_element(Instance::new("Other")).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Data is not an instance of: `EntityBase`, but an instance of: `Other`"
    );
    let err = c.push_element("TestEntity").unwrap_err();
    assert_eq!(err.to_string(), "Data is not an instance of: `EntityBase`, but of type: `string`");
}

#[test]
fn primitive_object_accepts_maps_and_instances() {
    let c = Collection::new("object", vec![
        Value::from(json!({"a": 1})),
        Instance::new("Anything").into_value(),
    ])
    .unwrap();
    assert_eq!(c.count(), 2);
}

#[test]
fn transformations_leave_the_receiver_alone() {
    let c = Collection::new("integer", [3, 1, 2]).unwrap();
    let _ = c.sort_by(|a, b| a.as_i64().cmp(&b.as_i64())).unwrap();
    let _ = c.reverse().unwrap();
    let _ = c.filter(|_, _| false).unwrap();
    let _ = c.map("string", |x, _| x.to_string()).unwrap();
    assert_eq!(c.to_array(), vals(&[3, 1, 2]));
}
