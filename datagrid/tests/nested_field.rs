//! Tests for dotted field path resolution.

use datagrid::record::{Record, Value, resolve_field_value};

fn sample() -> Record {
    Record::new()
        .set("name", "Alice")
        .set("age", 32i64)
        .set("score", Value::Null)
        .set(
            "address",
            Record::new()
                .set("city", "Paris")
                .set("geo", Record::new().set("lat", 48.85)),
        )
}

#[test]
fn test_resolve_bare_key() {
    let record = sample();
    assert_eq!(record.resolve("name"), Some(&Value::from("Alice")));
    assert_eq!(record.resolve("age"), Some(&Value::Int(32)));
}

#[test]
fn test_resolve_nested_path() {
    let record = sample();
    assert_eq!(
        record.resolve("address.city").and_then(Value::as_str),
        Some("Paris")
    );
    assert_eq!(
        record.resolve("address.geo.lat").and_then(Value::as_f64),
        Some(48.85)
    );
}

#[test]
fn test_resolve_missing_segment() {
    let record = sample();
    assert_eq!(record.resolve("address.zip"), None);
    assert_eq!(record.resolve("employer.name"), None);
}

#[test]
fn test_resolve_null_intermediate() {
    // A null leaf resolves to None, and a null intermediate short-circuits.
    let record = sample();
    assert_eq!(record.resolve("score"), None);

    let record = Record::new().set("address", Value::Null);
    assert_eq!(record.resolve("address.city"), None);
}

#[test]
fn test_resolve_scalar_intermediate() {
    // Traversing through a non-record value is a miss, not an error.
    let record = sample();
    assert_eq!(record.resolve("name.length"), None);
    assert_eq!(record.resolve("age.value.deep"), None);
}

#[test]
fn test_resolve_free_function() {
    let record = sample();
    assert_eq!(
        resolve_field_value(&record, "address.city"),
        record.resolve("address.city")
    );
}

#[test]
fn test_record_from_json() {
    let record: Record =
        serde_json::from_str(r#"{"name":"Alice","age":32,"address":{"city":"Paris"}}"#)
            .expect("valid record json");
    assert_eq!(record.resolve("age"), Some(&Value::Int(32)));
    assert_eq!(
        record.resolve("address.city").and_then(Value::as_str),
        Some("Paris")
    );
}

#[test]
fn test_null_renders_empty() {
    assert_eq!(Value::Null.to_string(), "");
    assert_eq!(Value::from("x").to_string(), "x");
}
