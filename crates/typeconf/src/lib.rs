//! Typed configuration registry.
//!
//! Types are bound to dotted paths in a `TypeRegistry` while the program
//! starts. Documents are then loaded from JSON, YAML or TOML files (picked by
//! extension) and typed values are read back out by type, the path coming
//! from the registration.
//!
//! ```no_run
//! use serde::{Deserialize, Serialize};
//! use typeconf::{Document, TypeRegistry};
//!
//! #[derive(Debug, Default, Serialize, Deserialize)]
//! struct Server {
//!     host: String,
//!     port: u16,
//! }
//!
//! let mut registry = TypeRegistry::new();
//! registry.register::<Server>("server");
//!
//! let document = Document::load("config.json")?;
//! let server: Server = registry.get(&document)?;
//! println!("{}:{}", server.host, server.port);
//! # Ok::<(), typeconf::ConfigError>(())
//! ```

mod error;
mod format;
mod loader;
mod registry;

/// Error types for registration and loading.
pub use error::{ConfigError, RegistrationError};
/// Supported document formats.
pub use format::Format;
/// Decoded configuration documents.
pub use loader::Document;
/// Type-to-path registry.
pub use registry::{Registration, TypeRegistry};
