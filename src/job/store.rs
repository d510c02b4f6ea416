// src/job/store.rs

//! Current set of job declarations, keyed by unique name.

use indexmap::IndexMap;
use tracing::debug;

use crate::errors::{JobdagError, Result};
use crate::job::Job;
use crate::types::JobName;

/// One job or a collection of jobs, as accepted by [`JobStore::add`].
pub trait IntoJobs<C> {
    fn into_jobs(self) -> Vec<Job<C>>;
}

impl<C> IntoJobs<C> for Job<C> {
    fn into_jobs(self) -> Vec<Job<C>> {
        vec![self]
    }
}

impl<C> IntoJobs<C> for Vec<Job<C>> {
    fn into_jobs(self) -> Vec<Job<C>> {
        self
    }
}

impl<C, const N: usize> IntoJobs<C> for [Job<C>; N] {
    fn into_jobs(self) -> Vec<Job<C>> {
        self.into_iter().collect()
    }
}

/// Anything that identifies jobs to remove: bare names, job references, and
/// (nested) collections or pairs of those.
pub trait IntoJobKeys {
    fn collect_keys(self, out: &mut Vec<JobName>);
}

impl IntoJobKeys for &str {
    fn collect_keys(self, out: &mut Vec<JobName>) {
        out.push(self.to_string());
    }
}

impl IntoJobKeys for String {
    fn collect_keys(self, out: &mut Vec<JobName>) {
        out.push(self);
    }
}

impl IntoJobKeys for &String {
    fn collect_keys(self, out: &mut Vec<JobName>) {
        out.push(self.clone());
    }
}

impl<C> IntoJobKeys for &Job<C> {
    fn collect_keys(self, out: &mut Vec<JobName>) {
        out.push(self.name().to_string());
    }
}

impl<T: IntoJobKeys> IntoJobKeys for Vec<T> {
    fn collect_keys(self, out: &mut Vec<JobName>) {
        for item in self {
            item.collect_keys(out);
        }
    }
}

impl<T: IntoJobKeys, const N: usize> IntoJobKeys for [T; N] {
    fn collect_keys(self, out: &mut Vec<JobName>) {
        for item in self {
            item.collect_keys(out);
        }
    }
}

impl<A: IntoJobKeys, B: IntoJobKeys> IntoJobKeys for (A, B) {
    fn collect_keys(self, out: &mut Vec<JobName>) {
        self.0.collect_keys(out);
        self.1.collect_keys(out);
    }
}

/// Job declarations in declaration order.
///
/// Re-adding a name replaces the job but keeps its original position, so the
/// compiled order of unrelated jobs stays stable across redundant `add`s.
#[derive(Debug)]
pub struct JobStore<C = ()> {
    jobs: IndexMap<JobName, Job<C>>,
}

impl<C> JobStore<C> {
    pub fn new() -> Self {
        Self {
            jobs: IndexMap::new(),
        }
    }

    /// Replace every declaration with `jobs`.
    ///
    /// Fails without touching the store if any job has an empty name.
    pub fn set(&mut self, jobs: impl IntoIterator<Item = Job<C>>) -> Result<()> {
        let jobs: Vec<Job<C>> = jobs.into_iter().collect();
        ensure_named(&jobs)?;

        self.jobs.clear();
        for job in jobs {
            self.jobs.insert(job.name().to_string(), job);
        }
        debug!(jobs = self.jobs.len(), "job store replaced");
        Ok(())
    }

    /// Merge one or more jobs, overwriting same-named entries.
    pub fn add(&mut self, jobs: impl IntoJobs<C>) -> Result<()> {
        let jobs = jobs.into_jobs();
        ensure_named(&jobs)?;

        for job in jobs {
            if let Some(previous) = self.jobs.insert(job.name().to_string(), job) {
                debug!(job = %previous.name(), "replacing existing job declaration");
            }
        }
        Ok(())
    }

    /// Remove jobs by name. Unknown names are ignored.
    ///
    /// Returns how many declarations were actually removed.
    pub fn remove(&mut self, keys: impl IntoJobKeys) -> usize {
        let mut names = Vec::new();
        keys.collect_keys(&mut names);

        let mut removed = 0;
        for name in names {
            if self.jobs.shift_remove(&name).is_some() {
                removed += 1;
            } else {
                debug!(job = %name, "remove: no such job; ignoring");
            }
        }
        removed
    }

    pub fn get(&self, name: &str) -> Option<&Job<C>> {
        self.jobs.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.jobs.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Declarations in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Job<C>> {
        self.jobs.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.jobs.keys().map(|s| s.as_str())
    }
}

impl<C> Default for JobStore<C> {
    fn default() -> Self {
        Self::new()
    }
}

fn ensure_named<C>(jobs: &[Job<C>]) -> Result<()> {
    if jobs.iter().any(|job| job.name().trim().is_empty()) {
        return Err(JobdagError::InvalidJob(
            "job name must not be empty".to_string(),
        ));
    }
    Ok(())
}
