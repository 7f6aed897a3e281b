//! Test helpers shared across typeconf crates.

pub mod fixtures;
pub mod types;

pub use fixtures::{ConfigDir, SAMPLE_URL};
pub use types::{Db, NestedStore, sample_registry};
