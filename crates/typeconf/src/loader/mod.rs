//! Loading configuration documents from disk or memory.
//!
//! A `Document` wraps one decoded tree. It is never mutated after
//! construction; typed reads go through `TypeRegistry::get`.

mod merge;


use crate::{ConfigError, Format};
use log::{debug, info};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// A decoded configuration document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Value,
}

impl Document {
    /// Wrap an already decoded tree.
    pub fn new(root: Value) -> Self {
        Self { root }
    }

    /// Load a document, picking the decoder from the file extension.
    ///
    /// Unknown extensions fail before the file is read.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format = Format::from_path(path)?;
        info!("loading {format} config from path: {}", path.display());
        let contents = fs::read(path).map_err(|source| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        format.decode_bytes(&contents).map(Self::new)
    }

    /// Decode a document from text in a known format.
    pub fn from_str(contents: &str, format: Format) -> Result<Self, ConfigError> {
        format.decode(contents).map(Self::new)
    }

    /// Load several files and deep-merge them, later files winning.
    pub fn load_layered<I, P>(paths: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut merged = Value::Object(serde_json::Map::new());
        let mut layers = 0usize;
        for path in paths {
            let layer = Self::load(&path)?;
            debug!("merging config layer (path={})", path.as_ref().display());
            merge::merge_values(&mut merged, layer.root);
            layers += 1;
        }
        info!("layered config loaded (layers={layers})");
        Ok(Self::new(merged))
    }

    /// Raw node at the given branches; `null` counts as absent.
    pub fn lookup<S: AsRef<str>>(&self, branches: &[S]) -> Option<&Value> {
        crate::registry::navigate(&self.root, branches)
    }

    /// The whole tree.
    pub fn value(&self) -> &Value {
        &self.root
    }

    /// Take the tree out of the document.
    pub fn into_value(self) -> Value {
        self.root
    }
}

impl From<Value> for Document {
    fn from(root: Value) -> Self {
        Self::new(root)
    }
}
