// src/engine/report.rs

use std::collections::BTreeSet;

use crate::types::{JobName, OutcomeName};

/// What happened during one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub run_id: u64,
    /// Outcomes announced through `Done` during the run.
    pub has: BTreeSet<OutcomeName>,
    /// Every dispatched job in dispatch order, skipped ones included.
    pub ran: Vec<JobName>,
    /// Jobs whose callback was actually invoked, in order.
    pub invoked: Vec<JobName>,
    /// Jobs dispatched but not invoked (`notif` or redundancy skip).
    pub skipped: Vec<JobName>,
    /// Jobs still waiting when nothing else was eligible, in plan order.
    pub residual: Vec<JobName>,
}

impl RunReport {
    /// `true` when every job in the plan was dispatched.
    pub fn is_complete(&self) -> bool {
        self.residual.is_empty()
    }

    pub fn has(&self, outcome: &str) -> bool {
        self.has.contains(outcome)
    }

    /// Position of `job` in dispatch order.
    pub fn position(&self, job: &str) -> Option<usize> {
        self.ran.iter().position(|name| name == job)
    }

    pub fn was_invoked(&self, job: &str) -> bool {
        self.invoked.iter().any(|name| name == job)
    }
}
