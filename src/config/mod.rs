// src/config/mod.rs

//! Job graph files.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a job graph file from disk (`loader.rs`).
//! - Validate basic invariants like non-empty names (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path, load_from_str};
pub use model::{JobConfig, JobGraphFile, OneOrMany, RawJobGraphFile};
