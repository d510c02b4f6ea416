// crates/test-utils/src/recording.rs

use std::collections::{BTreeSet, HashSet};
use std::sync::Mutex;

use jobdag::engine::{Dispatch, RunObserver};
use jobdag::RunReport;

/// Event captured by [`RecordingObserver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Observed {
    Discarded { job: String, missing: Vec<String> },
    Started { run_id: u64, jobs: usize },
    Dispatched { run_id: u64, job: String, decision: Dispatch, has: BTreeSet<String> },
    Finished { run_id: u64, residual: Vec<String> },
}

/// Observer that keeps every event for later assertions.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<Observed>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Observed> {
        self.events.lock().unwrap().clone()
    }

    pub fn discarded(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Observed::Discarded { job, .. } => Some(job),
                _ => None,
            })
            .collect()
    }

    pub fn decisions(&self) -> Vec<(String, Dispatch)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Observed::Dispatched { job, decision, .. } => Some((job, decision)),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: Observed) {
        self.events.lock().unwrap().push(event);
    }
}

impl RunObserver for RecordingObserver {
    fn job_discarded(&self, job: &str, missing: &[String]) {
        self.push(Observed::Discarded {
            job: job.to_string(),
            missing: missing.to_vec(),
        });
    }

    fn run_started(&self, run_id: u64, jobs: usize) {
        self.push(Observed::Started { run_id, jobs });
    }

    fn dispatched(&self, run_id: u64, job: &str, decision: Dispatch, has: &HashSet<String>) {
        self.push(Observed::Dispatched {
            run_id,
            job: job.to_string(),
            decision,
            has: has.iter().cloned().collect(),
        });
    }

    fn run_finished(&self, run_id: u64, report: &RunReport) {
        self.push(Observed::Finished {
            run_id,
            residual: report.residual.clone(),
        });
    }
}
