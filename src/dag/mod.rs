// src/dag/mod.rs

//! Graph compilation.
//!
//! - [`compiler`] turns the job store into a [`Plan`]: prune unrunnable jobs,
//!   cross-reference `optional` and `before`, derive `must_follow`.
//! - [`order`] holds the comparator used for the initial scan order.
//! - [`compiled`] defines [`CompiledJob`] and [`Plan`].
//! - [`graph`] exposes the plan as a petgraph graph for diagnostics.

pub mod compiled;
pub mod compiler;
pub mod graph;
pub mod order;

pub use compiled::{CompiledJob, Plan};
pub use compiler::compile;
pub use graph::{EdgeKind, PrecedenceGraph};
