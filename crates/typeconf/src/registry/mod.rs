//! Type registry binding value types to dotted paths.
//!
//! A `TypeRegistry` is filled once during program initialization and only
//! read afterward. Each registered type owns exactly one path and each path
//! belongs to exactly one type; paths may not nest inside one another.

mod path;

pub(crate) use path::navigate;

#[cfg(test)]
mod tests;

use crate::{ConfigError, Document, RegistrationError};
use log::debug;
use serde::Serialize;
use serde::de::{Deserialize, DeserializeOwned};
use serde_json::Value;
use std::any::{TypeId, type_name};
use std::collections::{BTreeMap, HashMap};

/// Binding between a registered type and its location in a document.
#[derive(Debug, Clone)]
pub struct Registration {
    path: String,
    branches: Vec<String>,
    type_name: &'static str,
    zero_value: Value,
}

impl Registration {
    /// Dotted path the type is read from.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Path segments, root first. Empty for the root path.
    pub fn branches(&self) -> &[String] {
        &self.branches
    }

    /// Name of the registered type.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Serialized `Default` value of the registered type.
    pub fn zero_value(&self) -> &Value {
        &self.zero_value
    }
}

/// Table of type-to-path registrations.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    /// Registrations keyed by path; the owning view.
    by_path: BTreeMap<String, Registration>,
    /// Path of each registered type.
    by_type: HashMap<TypeId, String>,
}

impl TypeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `T` to `path`, panicking on any conflict.
    ///
    /// Meant to be called unconditionally while the program starts up; a
    /// conflict is a coding defect.
    pub fn register<T>(&mut self, path: &str)
    where
        T: Serialize + DeserializeOwned + Default + 'static,
    {
        if let Err(err) = self.try_register::<T>(path) {
            panic!("{err}");
        }
    }

    /// Bind `T` to `path`, returning the conflict instead of panicking.
    pub fn try_register<T>(&mut self, path: &str) -> Result<(), RegistrationError>
    where
        T: Serialize + DeserializeOwned + Default + 'static,
    {
        let type_name = type_name::<T>();
        if let Some(existing) = self.by_type.get(&TypeId::of::<T>()) {
            return Err(RegistrationError::TypeInUse {
                type_name,
                path: existing.clone(),
            });
        }
        if let Some(existing) = self.by_path.get(path) {
            return Err(RegistrationError::PathInUse {
                path: path.to_string(),
                type_name: existing.type_name,
            });
        }
        let branches = path::split(path).ok_or_else(|| RegistrationError::InvalidPath {
            path: path.to_string(),
        })?;
        if let Some(existing) = self
            .by_path
            .values()
            .find(|entry| path::overlaps(&entry.branches, &branches))
        {
            return Err(RegistrationError::PathOverlap {
                path: path.to_string(),
                existing: existing.path.clone(),
            });
        }
        let zero_value = serde_json::to_value(T::default())
            .map_err(|source| RegistrationError::ZeroValue { type_name, source })?;

        debug!("registering config type (type={type_name}, path={path})");
        self.by_type.insert(TypeId::of::<T>(), path.to_string());
        self.by_path.insert(
            path.to_string(),
            Registration {
                path: path.to_string(),
                branches,
                type_name,
                zero_value,
            },
        );
        Ok(())
    }

    /// Read the value registered for `T` out of a document.
    pub fn get<T>(&self, document: &Document) -> Result<T, ConfigError>
    where
        T: DeserializeOwned + 'static,
    {
        let type_name = type_name::<T>();
        let entry = self
            .registration::<T>()
            .ok_or(ConfigError::Unregistered { type_name })?;
        debug!("reading config type (type={type_name}, path={})", entry.path);
        let Some(node) = path::navigate(document.value(), entry.branches.as_slice()) else {
            return Err(ConfigError::MissingPath {
                path: entry.path.clone(),
                type_name,
            });
        };
        T::deserialize(node).map_err(|source| ConfigError::ConvertFailed {
            path: entry.path.clone(),
            type_name,
            source,
        })
    }

    /// Build a document holding every registered type's default value at
    /// its path.
    pub fn default_document(&self) -> Value {
        debug!("building default document (entries={})", self.by_path.len());
        let mut root = Value::Object(serde_json::Map::new());
        for entry in self.by_path.values() {
            path::assign(&mut root, &entry.branches, entry.zero_value.clone());
        }
        root
    }

    /// Registration for `T`, if any.
    pub fn registration<T: 'static>(&self) -> Option<&Registration> {
        let path = self.by_type.get(&TypeId::of::<T>())?;
        self.by_path.get(path)
    }

    /// Path registered for `T`, if any.
    pub fn path_of<T: 'static>(&self) -> Option<&str> {
        self.by_type.get(&TypeId::of::<T>()).map(String::as_str)
    }

    /// Whether `T` has been registered.
    pub fn contains<T: 'static>(&self) -> bool {
        self.by_type.contains_key(&TypeId::of::<T>())
    }

    /// Name of the type registered at `path`, if any.
    pub fn type_at(&self, path: &str) -> Option<&'static str> {
        self.by_path.get(path).map(|entry| entry.type_name)
    }

    /// All registrations, ordered by path.
    pub fn entries(&self) -> impl Iterator<Item = &Registration> {
        self.by_path.values()
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.by_path.len()
    }

    /// Whether nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.by_path.is_empty()
    }
}
