// src/dag/compiled.rs

//! Output of the graph compiler: [`CompiledJob`] and [`Plan`].

use std::fmt;
use std::sync::Arc;

use crate::engine::{Done, Next};
use crate::job::TaskFn;
use crate::types::{CompileOptions, JobName, NameSet};

/// A surviving job with its relations resolved against the rest of the plan.
pub struct CompiledJob<C = ()> {
    pub name: JobName,
    /// Own name plus declared extra outcomes.
    pub provides: NameSet,
    /// Declared requirements plus optionals that some other job can satisfy.
    pub requires: NameSet,
    pub optional: NameSet,
    pub notif: NameSet,
    pub before: NameSet,
    /// Jobs that must have been dispatched before this one is eligible.
    pub must_follow: NameSet,
    pub priority: Option<i64>,
    task: TaskFn<C>,
}

impl<C> CompiledJob<C> {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        name: JobName,
        provides: NameSet,
        requires: NameSet,
        optional: NameSet,
        notif: NameSet,
        before: NameSet,
        must_follow: NameSet,
        priority: Option<i64>,
        task: TaskFn<C>,
    ) -> Self {
        Self {
            name,
            provides,
            requires,
            optional,
            notif,
            before,
            must_follow,
            priority,
            task,
        }
    }

    pub(crate) fn invoke(&self, ctx: &Arc<C>, done: Done, next: Next) {
        (self.task)(ctx, done, next)
    }
}

impl<C> fmt::Debug for CompiledJob<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledJob")
            .field("name", &self.name)
            .field("provides", &self.provides)
            .field("requires", &self.requires)
            .field("optional", &self.optional)
            .field("notif", &self.notif)
            .field("before", &self.before)
            .field("must_follow", &self.must_follow)
            .field("priority", &self.priority)
            .finish_non_exhaustive()
    }
}

/// Pruned, precedence-annotated job list, shared by every run started while
/// it is current.
///
/// The order is a scheduling hint; the run-time eligibility check is what
/// actually enforces `must_follow` and `requires`.
pub struct Plan<C = ()> {
    jobs: Vec<Arc<CompiledJob<C>>>,
    discarded: Vec<JobName>,
    options: CompileOptions,
}

impl<C> Plan<C> {
    pub(crate) fn new(
        jobs: Vec<Arc<CompiledJob<C>>>,
        discarded: Vec<JobName>,
        options: CompileOptions,
    ) -> Self {
        Self {
            jobs,
            discarded,
            options,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new(), CompileOptions::default())
    }

    /// Compiled jobs in initial scan order.
    pub fn jobs(&self) -> &[Arc<CompiledJob<C>>] {
        &self.jobs
    }

    /// Names in initial scan order.
    pub fn order(&self) -> Vec<&str> {
        self.jobs.iter().map(|job| job.name.as_str()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&CompiledJob<C>> {
        self.jobs
            .iter()
            .find(|job| job.name == name)
            .map(|job| job.as_ref())
    }

    /// Jobs pruned at compile time because something they require is
    /// provided by no job.
    pub fn discarded(&self) -> &[JobName] {
        &self.discarded
    }

    pub fn options(&self) -> CompileOptions {
        self.options
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

impl<C> fmt::Debug for Plan<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Plan")
            .field("jobs", &self.jobs)
            .field("discarded", &self.discarded)
            .field("options", &self.options)
            .finish()
    }
}
