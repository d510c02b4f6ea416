// src/job/mod.rs

//! Job declarations and the store that holds them.
//!
//! - [`declaration`] defines [`Job`], the caller-facing description of a unit
//!   of work and its relations to other jobs.
//! - [`store`] holds the current declarations keyed by name and implements
//!   the `set` / `add` / `remove` mutation surface.

pub mod declaration;
pub mod store;

pub use declaration::{Job, TaskFn};
pub use store::{IntoJobKeys, IntoJobs, JobStore};
