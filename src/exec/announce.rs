// src/exec/announce.rs

//! Built-in task used for jobs declared in a job graph file.
//!
//! A file-declared job has no Rust callback of its own; it announces a fixed
//! set of outcomes (its own name unless `announce` says otherwise) and then
//! hands control back, either at once or after `defer_ms` on the tokio
//! runtime.

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tracing::warn;

use crate::config::{JobConfig, JobGraphFile};
use crate::engine::{Done, Next};
use crate::job::Job;
use crate::types::NameSet;

/// Build the job list for every `[job.<name>]` in `cfg`, in file order.
pub fn jobs_from_config<C>(cfg: &JobGraphFile) -> Vec<Job<C>>
where
    C: Send + Sync + 'static,
{
    cfg.job
        .iter()
        .map(|(name, job_cfg)| job_from_config(name, job_cfg))
        .collect()
}

/// Build one job from its `[job.<name>]` section.
pub fn job_from_config<C>(name: &str, cfg: &JobConfig) -> Job<C>
where
    C: Send + Sync + 'static,
{
    let outcomes = cfg.effective_announce(name);
    let defer = cfg.defer_ms.map(Duration::from_millis);

    let mut job = Job::new(name, announce_task::<C>(outcomes, defer))
        .requires(&cfg.requires)
        .optional(&cfg.optional)
        .before(&cfg.before)
        .notif(&cfg.notif)
        .provides(&cfg.provides);

    if let Some(priority) = cfg.priority {
        job = job.priority(priority);
    }
    job
}

/// Callback that announces `outcomes` and continues, optionally after
/// `defer`.
///
/// Deferral needs a tokio runtime; outside of one the task continues
/// immediately.
pub fn announce_task<C>(
    outcomes: NameSet,
    defer: Option<Duration>,
) -> impl Fn(&Arc<C>, Done, Next) + Send + Sync + 'static
where
    C: Send + Sync + 'static,
{
    move |_ctx: &Arc<C>, done: Done, next: Next| match defer {
        None => {
            done.announce(outcomes.clone());
            next.call();
        }
        Some(delay) => match Handle::try_current() {
            Ok(handle) => {
                let outcomes = outcomes.clone();
                handle.spawn(async move {
                    tokio::time::sleep(delay).await;
                    done.announce(outcomes);
                    next.call();
                });
            }
            Err(_) => {
                warn!(
                    job = %done.job(),
                    "defer_ms set but no tokio runtime is running; continuing immediately"
                );
                done.announce(outcomes.clone());
                next.call();
            }
        },
    }
}
