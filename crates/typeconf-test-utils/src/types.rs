use serde::{Deserialize, Serialize};
use typeconf::TypeRegistry;

/// Registered at `db`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Db {
    pub url: String,
}

/// Registered at `nested.store`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NestedStore {
    pub path: String,
}

/// Registry with `Db` and `NestedStore` bound to their usual paths.
pub fn sample_registry() -> TypeRegistry {
    let mut registry = TypeRegistry::new();
    registry.register::<Db>("db");
    registry.register::<NestedStore>("nested.store");
    registry
}
