// src/engine/continuation.rs

//! Capabilities handed to a job callback: [`Done`] and [`Next`].

use std::fmt;
use std::sync::Arc;

use crate::types::{IntoNames, JobName, NameSet};

/// The part of a run that continuations talk to.
pub(crate) trait RunCore: Send + Sync {
    fn announce(&self, job: &str, outcomes: NameSet);
    fn resume(self: Arc<Self>);
}

/// Announces outcomes as satisfied for the current run.
///
/// Cheap to clone; may be called any number of times, before or after
/// [`Next::call`].
#[derive(Clone)]
pub struct Done {
    core: Arc<dyn RunCore>,
    job: JobName,
}

impl Done {
    pub(crate) fn new(core: Arc<dyn RunCore>, job: JobName) -> Self {
        Self { core, job }
    }

    /// Mark one or more outcomes as satisfied.
    pub fn announce(&self, outcomes: impl IntoNames) {
        self.core.announce(&self.job, outcomes.into_names());
    }

    /// Mark the job's own name as satisfied.
    pub fn announce_own(&self) {
        self.announce(self.job.as_str());
    }

    /// Name of the job this handle was given to.
    pub fn job(&self) -> &str {
        &self.job
    }
}

impl fmt::Debug for Done {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Done").field("job", &self.job).finish_non_exhaustive()
    }
}

/// One-shot continuation: lets the scheduler consider further jobs.
///
/// Calling it from inside the callback continues the run once the callback
/// returns. Calling it later, from any thread, continues the run right
/// there. Dropping it without calling stalls the run.
#[must_use = "the run does not advance until `Next::call` is invoked"]
pub struct Next {
    core: Arc<dyn RunCore>,
}

impl Next {
    pub(crate) fn new(core: Arc<dyn RunCore>) -> Self {
        Self { core }
    }

    pub fn call(self) {
        self.core.resume();
    }
}

impl fmt::Debug for Next {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Next").finish_non_exhaustive()
    }
}
