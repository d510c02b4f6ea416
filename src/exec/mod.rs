// src/exec/mod.rs

//! Job bodies for graphs declared in files.
//!
//! - [`announce`] builds the built-in "announce and continue" task and turns
//!   a [`JobGraphFile`](crate::config::JobGraphFile) into [`Job`](crate::Job)s.

pub mod announce;

pub use announce::{announce_task, job_from_config, jobs_from_config};
