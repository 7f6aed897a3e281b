//! Tests for type registration and typed lookups.

use super::*;
use pretty_assertions::assert_eq;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
struct Db {
    url: String,
}

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
struct NestedStore {
    path: String,
}

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Server {
    host_name: String,
    #[serde(rename = "listen")]
    port: u16,
}

/// Byte-string keys have no JSON object representation.
#[derive(Debug, Serialize, Deserialize)]
struct ByteKeyed(BTreeMap<Vec<u8>, u8>);

impl Default for ByteKeyed {
    fn default() -> Self {
        Self(BTreeMap::from([(vec![1], 1)]))
    }
}

fn registry() -> TypeRegistry {
    let mut registry = TypeRegistry::new();
    registry.register::<Db>("db");
    registry.register::<NestedStore>("nested.store");
    registry
}

/// Registering the same type at a second path names the first path.
#[test]
fn type_registered_twice_is_rejected() {
    let mut registry = registry();
    let err = registry.try_register::<Db>("other").unwrap_err();
    assert!(matches!(err, RegistrationError::TypeInUse { ref path, .. } if path == "db"));
    assert!(err.to_string().contains("Db"));
}

/// A second type at an existing path names the owning type.
#[test]
fn path_registered_twice_is_rejected() {
    let mut registry = registry();
    let err = registry.try_register::<Server>("db").unwrap_err();
    assert!(
        matches!(err, RegistrationError::PathInUse { type_name, .. } if type_name.ends_with("Db"))
    );
    assert!(!registry.contains::<Server>());
}

#[test]
fn nested_paths_are_rejected_both_ways() {
    let mut registry = TypeRegistry::new();
    registry.register::<NestedStore>("nested.store");
    let err = registry.try_register::<Db>("nested").unwrap_err();
    assert!(matches!(err, RegistrationError::PathOverlap { ref existing, .. } if existing == "nested.store"));
    let err = registry.try_register::<Db>("nested.store.deep").unwrap_err();
    assert!(matches!(err, RegistrationError::PathOverlap { .. }));
    registry.register::<Db>("nested.db");
    assert_eq!(registry.len(), 2);
}

#[test]
fn malformed_paths_are_rejected() {
    let mut registry = TypeRegistry::new();
    for path in ["a..b", ".a", "a."] {
        let err = registry.try_register::<Db>(path).unwrap_err();
        assert!(matches!(err, RegistrationError::InvalidPath { .. }), "{path}");
    }
    assert!(registry.is_empty());
}

#[test]
#[should_panic(expected = "is already in use with path db")]
fn register_panics_on_conflict() {
    let mut registry = registry();
    registry.register::<Db>("db2");
}

#[test]
fn unserializable_default_is_rejected() {
    let mut registry = TypeRegistry::new();
    let err = registry.try_register::<ByteKeyed>("weird").unwrap_err();
    assert!(matches!(err, RegistrationError::ZeroValue { .. }));
}

#[test]
fn get_reads_registered_paths() {
    let registry = registry();
    let document = Document::new(json!({
        "db": { "url": "https://www.google.com/" },
        "nested": { "store": { "path": "/" } }
    }));
    let db: Db = registry.get(&document).expect("db");
    assert_eq!(db.url, "https://www.google.com/");
    let store: NestedStore = registry.get(&document).expect("store");
    assert_eq!(store.path, "/");
}

#[test]
fn get_follows_serde_field_names() {
    let mut registry = TypeRegistry::new();
    registry.register::<Server>("server");
    let document = Document::new(json!({ "server": { "hostName": "localhost", "listen": 8080 } }));
    let server: Server = registry.get(&document).expect("server");
    assert_eq!(
        server,
        Server {
            host_name: "localhost".to_string(),
            port: 8080,
        }
    );
}

#[test]
fn unregistered_and_missing_are_distinct() {
    let registry = registry();
    let document = Document::new(json!({ "db": { "url": "x" } }));

    let err = registry.get::<Server>(&document).unwrap_err();
    assert!(matches!(err, ConfigError::Unregistered { .. }));

    let err = registry.get::<NestedStore>(&document).unwrap_err();
    assert!(matches!(err, ConfigError::MissingPath { ref path, .. } if path == "nested.store"));

    let document = Document::new(json!({ "db": null, "nested": { "store": { "path": "/" } } }));
    let err = registry.get::<Db>(&document).unwrap_err();
    assert!(matches!(err, ConfigError::MissingPath { .. }));
}

#[test]
fn shape_mismatch_is_a_conversion_error() {
    let registry = registry();
    let document = Document::new(json!({ "db": "postgres://", "nested": { "store": { "path": 7 } } }));
    let err = registry.get::<Db>(&document).unwrap_err();
    assert!(matches!(err, ConfigError::ConvertFailed { .. }));
    let err = registry.get::<NestedStore>(&document).unwrap_err();
    assert!(matches!(err, ConfigError::ConvertFailed { .. }));
}

#[test]
fn root_path_reads_whole_document() {
    let mut registry = TypeRegistry::new();
    registry.register::<Db>("");
    let err = registry.try_register::<NestedStore>("nested").unwrap_err();
    assert!(matches!(err, RegistrationError::PathOverlap { .. }));

    let db: Db = registry.get(&Document::new(json!({ "url": "u" }))).expect("db");
    assert_eq!(db.url, "u");
    assert_eq!(registry.default_document(), json!({ "url": "" }));
}

#[test]
fn default_document_places_zero_values() {
    let registry = registry();
    let rendered = serde_json::to_string(&registry.default_document()).expect("json");
    assert_eq!(
        rendered,
        r#"{"db":{"url":""},"nested":{"store":{"path":""}}}"#
    );
}

#[test]
fn introspection_reports_registrations() {
    let registry = registry();
    assert_eq!(registry.path_of::<NestedStore>(), Some("nested.store"));
    assert_eq!(registry.path_of::<Server>(), None);
    assert!(registry.type_at("db").is_some_and(|name| name.ends_with("Db")));
    let entry = registry.registration::<NestedStore>().expect("entry");
    assert_eq!(entry.branches(), ["nested", "store"]);
    assert_eq!(entry.zero_value(), &json!({ "path": "" }));
    let paths: Vec<&str> = registry.entries().map(Registration::path).collect();
    assert_eq!(paths, vec!["db", "nested.store"]);
}
