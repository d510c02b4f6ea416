// src/job/declaration.rs

use std::fmt;
use std::sync::Arc;

use crate::engine::{Done, Next};
use crate::types::{IntoNames, JobName, NameSet};

/// Callback invoked when a job is dispatched.
///
/// Receives the run context, a [`Done`] handle for announcing outcomes and a
/// one-shot [`Next`] continuation. The callback decides when to call
/// [`Next::call`]; until it does, no other job of the same run is dispatched.
pub type TaskFn<C> = Arc<dyn Fn(&Arc<C>, Done, Next) + Send + Sync>;

/// A named unit of work plus its relations to other jobs.
///
/// Relation fields accept either a single name or a collection of names
/// (anything implementing [`IntoNames`]); repeated calls accumulate.
///
/// ```
/// use jobdag::Job;
///
/// let job: Job = Job::new("render", |_ctx, done, next| {
///     done.announce_own();
///     next.call();
/// })
/// .requires(["session", "template"])
/// .optional("cache")
/// .priority(3);
///
/// assert_eq!(job.name(), "render");
/// ```
pub struct Job<C = ()> {
    name: JobName,
    task: TaskFn<C>,
    requires: NameSet,
    optional: NameSet,
    before: NameSet,
    notif: NameSet,
    provides: NameSet,
    priority: Option<i64>,
}

impl<C> Job<C> {
    pub fn new<F>(name: impl Into<String>, task: F) -> Self
    where
        F: Fn(&Arc<C>, Done, Next) + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            task: Arc::new(task),
            requires: NameSet::new(),
            optional: NameSet::new(),
            before: NameSet::new(),
            notif: NameSet::new(),
            provides: NameSet::new(),
            priority: None,
        }
    }

    /// Outcomes that must be announced before this job may run.
    pub fn requires(mut self, names: impl IntoNames) -> Self {
        self.requires.extend(names.into_names());
        self
    }

    /// Outcomes this job should wait for, but only when some other job in the
    /// plan can produce them.
    pub fn optional(mut self, names: impl IntoNames) -> Self {
        self.optional.extend(names.into_names());
        self
    }

    /// Outcomes whose producers must not run before this job has run.
    pub fn before(mut self, names: impl IntoNames) -> Self {
        self.before.extend(names.into_names());
        self
    }

    /// Outcomes that make this job redundant: if any is already satisfied when
    /// the job comes up, it is skipped.
    pub fn notif(mut self, names: impl IntoNames) -> Self {
        self.notif.extend(names.into_names());
        self
    }

    /// Extra outcomes this job announces besides its own name.
    pub fn provides(mut self, names: impl IntoNames) -> Self {
        self.provides.extend(names.into_names());
        self
    }

    /// Tie-breaker among otherwise unordered jobs; higher runs earlier.
    pub fn priority(mut self, priority: i64) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn task(&self) -> &TaskFn<C> {
        &self.task
    }

    pub fn required(&self) -> &NameSet {
        &self.requires
    }

    pub fn optionals(&self) -> &NameSet {
        &self.optional
    }

    pub fn precedes(&self) -> &NameSet {
        &self.before
    }

    pub fn skip_if(&self) -> &NameSet {
        &self.notif
    }

    /// Declared extra outcomes (without the job's own name).
    pub fn declared_provides(&self) -> &NameSet {
        &self.provides
    }

    pub fn priority_value(&self) -> Option<i64> {
        self.priority
    }
}

impl<C> Clone for Job<C> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            task: Arc::clone(&self.task),
            requires: self.requires.clone(),
            optional: self.optional.clone(),
            before: self.before.clone(),
            notif: self.notif.clone(),
            provides: self.provides.clone(),
            priority: self.priority,
        }
    }
}

impl<C> fmt::Debug for Job<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Job")
            .field("name", &self.name)
            .field("requires", &self.requires)
            .field("optional", &self.optional)
            .field("before", &self.before)
            .field("notif", &self.notif)
            .field("provides", &self.provides)
            .field("priority", &self.priority)
            .finish_non_exhaustive()
    }
}
