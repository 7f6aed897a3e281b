//! Document formats and their decoders.
//!
//! Every decoder produces a `serde_json::Value`, the single tree shape the
//! registry navigates. TOML and YAML trees are normalized on the way in so
//! that the same logical document yields the same tree in every format.

use crate::ConfigError;
use log::debug;
use serde_json::{Map, Number, Value};
use std::fmt;
use std::path::Path;

/// A textual configuration format, selected by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// `.json`
    Json,
    /// `.yaml` or `.yml`
    Yaml,
    /// `.toml`
    Toml,
}

impl Format {
    /// Pick a format from an extension (without the dot), ignoring case.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "json" => Some(Format::Json),
            "yaml" | "yml" => Some(Format::Yaml),
            "toml" => Some(Format::Toml),
            _ => None,
        }
    }

    /// Pick a format from a file path's extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::from_extension(&extension).ok_or_else(|| ConfigError::UnsupportedFormat {
            path: path.to_path_buf(),
            extension,
        })
    }

    /// Decode raw text into a tree.
    pub fn decode(self, contents: &str) -> Result<Value, ConfigError> {
        self.decode_bytes(contents.as_bytes())
    }

    /// Decode raw file bytes into a tree. Invalid UTF-8 is a parse error.
    pub fn decode_bytes(self, contents: &[u8]) -> Result<Value, ConfigError> {
        debug!("decoding {self} document (len={})", contents.len());
        match self {
            Format::Json => serde_json::from_slice(contents).map_err(ConfigError::ParseJson),
            Format::Yaml => {
                let mut value: serde_yaml::Value = serde_yaml::from_slice(contents)?;
                value.apply_merge()?;
                Ok(yaml_to_tree(value))
            }
            Format::Toml => {
                let text = std::str::from_utf8(contents)?;
                let table: toml::Table = toml::from_str(text)?;
                Ok(toml_to_tree(toml::Value::Table(table)))
            }
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Format::Json => "json",
            Format::Yaml => "yaml",
            Format::Toml => "toml",
        };
        f.write_str(name)
    }
}

fn float(value: f64) -> Value {
    Number::from_f64(value).map_or(Value::Null, Value::Number)
}

/// Convert a YAML tree, stringifying keys and dropping tags.
fn yaml_to_tree(value: serde_yaml::Value) -> Value {
    match value {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(flag) => Value::Bool(flag),
        serde_yaml::Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                Value::from(int)
            } else if let Some(uint) = number.as_u64() {
                Value::from(uint)
            } else {
                number.as_f64().map_or(Value::Null, float)
            }
        }
        serde_yaml::Value::String(text) => Value::String(text),
        serde_yaml::Value::Sequence(items) => {
            Value::Array(items.into_iter().map(yaml_to_tree).collect())
        }
        serde_yaml::Value::Mapping(mapping) => {
            let mut map = Map::new();
            for (key, value) in mapping {
                map.insert(yaml_key(key), yaml_to_tree(value));
            }
            Value::Object(map)
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_tree(tagged.value),
    }
}

fn yaml_key(key: serde_yaml::Value) -> String {
    match yaml_to_tree(key) {
        Value::String(text) => text,
        other => other.to_string(),
    }
}

/// Convert a TOML tree, rendering datetimes as RFC 3339 strings.
fn toml_to_tree(value: toml::Value) -> Value {
    match value {
        toml::Value::String(text) => Value::String(text),
        toml::Value::Integer(int) => Value::from(int),
        toml::Value::Float(value) => float(value),
        toml::Value::Boolean(flag) => Value::Bool(flag),
        toml::Value::Datetime(datetime) => Value::String(datetime.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_to_tree).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(key, value)| (key, toml_to_tree(value)))
                .collect(),
        ),
    }
}
