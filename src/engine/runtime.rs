// src/engine/runtime.rs

//! The cooperative run loop.
//!
//! A run is driven by whoever holds the baton: [`execute`] first, then any
//! [`Next`] called after its callback returned. While a callback is running
//! under the driver, a `Next` only records that the loop should keep going,
//! so synchronous chains of jobs run iteratively instead of recursively.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tracing::trace;

use crate::dag::Plan;
use crate::engine::continuation::RunCore;
use crate::engine::{Dispatch, Done, Next, RunObserver, RunReport, RunState};
use crate::errors::{JobdagError, Result};
use crate::types::NameSet;

/// Mutable part of a run, behind the lock.
struct Driver<C> {
    state: RunState<C>,
    /// A driver loop is active somewhere up the stack.
    driving: bool,
    /// `Next` was called while the driver was inside a callback.
    resume: bool,
    finished: bool,
}

struct Shared<C> {
    run_id: u64,
    ctx: Arc<C>,
    observer: Arc<dyn RunObserver>,
    driver: Mutex<Driver<C>>,
    report_tx: watch::Sender<Option<Arc<RunReport>>>,
}

impl<C> Shared<C>
where
    C: Send + Sync + 'static,
{
    fn lock(&self) -> MutexGuard<'_, Driver<C>> {
        self.driver.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Take the baton, or hand it to the active driver.
    fn drive(self: Arc<Self>) {
        {
            let mut driver = self.lock();
            if driver.finished {
                trace!(run_id = self.run_id, "next called after run finished; ignoring");
                return;
            }
            if driver.driving {
                driver.resume = true;
                return;
            }
            driver.driving = true;
        }

        loop {
            let picked = {
                let mut driver = self.lock();
                match driver.state.take_next() {
                    Some((job, decision)) => {
                        self.observer
                            .dispatched(self.run_id, &job.name, decision, driver.state.has());
                        driver.resume = false;
                        Some((job, decision))
                    }
                    None => {
                        driver.driving = false;
                        driver.finished = true;
                        None
                    }
                }
            };

            let Some((job, decision)) = picked else {
                self.finish();
                return;
            };

            if decision != Dispatch::Run {
                continue;
            }

            let core: Arc<dyn RunCore> = self.clone();
            let done = Done::new(Arc::clone(&core), job.name.clone());
            let next = Next::new(core);
            job.invoke(&self.ctx, done, next);

            let mut driver = self.lock();
            if driver.resume {
                driver.resume = false;
                continue;
            }
            // The callback kept its continuation; whoever calls it resumes.
            driver.driving = false;
            return;
        }
    }

    fn finish(&self) {
        let report = self.lock().state.report(self.run_id);
        self.observer.run_finished(self.run_id, &report);
        self.report_tx.send_replace(Some(Arc::new(report)));
    }
}

impl<C> RunCore for Shared<C>
where
    C: Send + Sync + 'static,
{
    fn announce(&self, job: &str, outcomes: NameSet) {
        let mut driver = self.lock();
        if driver.finished {
            trace!(run_id = self.run_id, job = %job, ?outcomes, "outcomes announced after run finished; ignoring");
            return;
        }
        driver.state.announce(outcomes);
    }

    fn resume(self: Arc<Self>) {
        self.drive();
    }
}

/// Start one run of `plan` against `ctx`.
///
/// Returns once the run has either finished or is waiting on a deferred
/// [`Next`]. The handle reports which.
pub fn execute<C>(
    plan: &Plan<C>,
    ctx: Arc<C>,
    observer: Arc<dyn RunObserver>,
    run_id: u64,
) -> RunHandle
where
    C: Send + Sync + 'static,
{
    let (report_tx, report_rx) = watch::channel(None);
    observer.run_started(run_id, plan.len());

    let shared = Arc::new(Shared {
        run_id,
        ctx,
        observer,
        driver: Mutex::new(Driver {
            state: RunState::new(plan),
            driving: false,
            resume: false,
            finished: false,
        }),
        report_tx,
    });
    shared.drive();

    RunHandle {
        run_id,
        report_rx,
    }
}

/// Caller's view of a run.
pub struct RunHandle {
    run_id: u64,
    report_rx: watch::Receiver<Option<Arc<RunReport>>>,
}

impl RunHandle {
    pub fn run_id(&self) -> u64 {
        self.run_id
    }

    /// `true` once no remaining job is eligible.
    pub fn is_finished(&self) -> bool {
        self.report_rx.borrow().is_some()
    }

    /// The final report, if the run has finished.
    pub fn report(&self) -> Option<Arc<RunReport>> {
        self.report_rx.borrow().clone()
    }

    /// Wait for the run to finish.
    ///
    /// There is no timeout: a run whose job keeps its [`Next`] without calling
    /// it never finishes. If every continuation is dropped instead, this
    /// returns [`JobdagError::RunAbandoned`].
    pub async fn wait(mut self) -> Result<Arc<RunReport>> {
        let report = self
            .report_rx
            .wait_for(Option::is_some)
            .await
            .map_err(|_| JobdagError::RunAbandoned)?;
        report.clone().ok_or(JobdagError::RunAbandoned)
    }
}

impl fmt::Debug for RunHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunHandle")
            .field("run_id", &self.run_id)
            .field("finished", &self.is_finished())
            .finish()
    }
}
