// src/dag/compiler.rs

//! Graph compiler: turns the job store into a [`Plan`].
//!
//! The four relation kinds (`requires`, `optional`, `before`, `notif`) are
//! folded into two run-time gates: an outcome gate (`requires`) and a
//! job-identity gate (`must_follow`).

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::{debug, info};

use crate::dag::order::{compare, insertion_sort_by};
use crate::dag::{CompiledJob, Plan};
use crate::engine::RunObserver;
use crate::job::{JobStore, TaskFn};
use crate::types::{CompileOptions, JobName, NameSet, OutcomeName};

/// Per-job working state while compiling.
struct Draft<C> {
    name: JobName,
    provides: NameSet,
    requires: NameSet,
    optional: NameSet,
    notif: NameSet,
    before: NameSet,
    priority: Option<i64>,
    task: TaskFn<C>,
}

/// Compile the store's current declarations.
///
/// Runs in O(jobs²) in the cross-reference steps; meant to run on
/// configuration change only.
pub fn compile<C>(
    store: &JobStore<C>,
    options: CompileOptions,
    observer: &dyn RunObserver,
) -> Plan<C> {
    let drafts = normalise(store, options);
    let (mut drafts, discarded) = prune(drafts, options, observer);

    let producers = index_producers(&drafts);
    promote_optionals(&mut drafts, &producers);

    let mut gates = before_gates(&drafts, &producers);
    let must_follow: Vec<NameSet> = (0..drafts.len())
        .map(|idx| {
            let mut set = derive_must_follow(&drafts, idx, &producers);
            set.extend(gates.remove(&idx).unwrap_or_default());
            set
        })
        .collect();

    let mut jobs: Vec<CompiledJob<C>> = drafts
        .into_iter()
        .zip(must_follow)
        .map(|(draft, must_follow)| {
            CompiledJob::new(
                draft.name,
                draft.provides,
                draft.requires,
                draft.optional,
                draft.notif,
                draft.before,
                must_follow,
                draft.priority,
                draft.task,
            )
        })
        .collect();

    insertion_sort_by(&mut jobs, |a, b| compare(a, b, options));

    let jobs: Vec<Arc<CompiledJob<C>>> = jobs.into_iter().map(Arc::new).collect();
    let order: Vec<&str> = jobs.iter().map(|job| job.name.as_str()).collect();
    info!(
        jobs = jobs.len(),
        discarded = discarded.len(),
        "compiled job plan"
    );
    debug!(?order, "initial scan order");

    Plan::new(jobs, discarded, options)
}

/// Step 1: own name into `provides`; relation fields copied as sets.
///
/// `notif` outcomes are folded into `optional` unless `notif_orders_only` is
/// set.
fn normalise<C>(store: &JobStore<C>, options: CompileOptions) -> Vec<Draft<C>> {
    store
        .iter()
        .map(|job| {
            let name = job.name().to_string();

            let mut provides = job.declared_provides().clone();
            provides.insert(name.clone());

            let mut optional = job.optionals().clone();
            if !options.notif_orders_only {
                optional.extend(job.skip_if().iter().cloned());
            }

            Draft {
                name,
                provides,
                requires: job.required().clone(),
                optional,
                notif: job.skip_if().clone(),
                before: job.precedes().clone(),
                priority: job.priority_value(),
                task: Arc::clone(job.task()),
            }
        })
        .collect()
}

/// Steps 2 and 3: drop jobs that require an outcome nobody provides.
///
/// A single pass unless `transitive_prune` is set, in which case pruning
/// repeats until nothing else falls out.
fn prune<C>(
    mut drafts: Vec<Draft<C>>,
    options: CompileOptions,
    observer: &dyn RunObserver,
) -> (Vec<Draft<C>>, Vec<JobName>) {
    let mut discarded = Vec::new();

    loop {
        let all_provides: HashSet<OutcomeName> = drafts
            .iter()
            .flat_map(|draft| draft.provides.iter().cloned())
            .collect();

        let (kept, dropped): (Vec<_>, Vec<_>) = drafts
            .into_iter()
            .partition(|draft| draft.requires.iter().all(|o| all_provides.contains(o)));
        drafts = kept;

        if dropped.is_empty() {
            break;
        }

        for draft in dropped {
            let missing: Vec<OutcomeName> = draft
                .requires
                .iter()
                .filter(|o| !all_provides.contains(*o))
                .cloned()
                .collect();
            observer.job_discarded(&draft.name, &missing);
            discarded.push(draft.name);
        }

        if !options.transitive_prune {
            break;
        }
    }

    (drafts, discarded)
}

/// Outcome name -> indices of the surviving jobs that provide it.
fn index_producers<C>(drafts: &[Draft<C>]) -> HashMap<OutcomeName, Vec<usize>> {
    let mut producers: HashMap<OutcomeName, Vec<usize>> = HashMap::new();
    for (idx, draft) in drafts.iter().enumerate() {
        for outcome in &draft.provides {
            producers.entry(outcome.clone()).or_default().push(idx);
        }
    }
    producers
}

/// Other producers of `outcome`; a job never gates on itself.
fn other_producers<'a>(
    producers: &'a HashMap<OutcomeName, Vec<usize>>,
    outcome: &str,
    me: usize,
) -> impl Iterator<Item = usize> + 'a {
    producers
        .get(outcome)
        .into_iter()
        .flatten()
        .copied()
        .filter(move |&idx| idx != me)
}

/// Step 4: an optional outcome becomes a requirement once some other job can
/// produce it.
///
/// By default this includes `notif` outcomes folded in at step 1, so a job
/// waits for the outcome it checks: skipped once it is announced, stalled if
/// its producer never announces it.
fn promote_optionals<C>(drafts: &mut [Draft<C>], producers: &HashMap<OutcomeName, Vec<usize>>) {
    for idx in 0..drafts.len() {
        let promoted: Vec<OutcomeName> = drafts[idx]
            .optional
            .iter()
            .filter(|o| other_producers(producers, o, idx).next().is_some())
            .cloned()
            .collect();

        if !promoted.is_empty() {
            debug!(job = %drafts[idx].name, ?promoted, "optional outcomes promoted to requires");
        }
        drafts[idx].requires.extend(promoted);
    }
}

/// Step 5: `J.before = [O]` makes every other producer of `O` wait for `J`.
///
/// Keyed by the gated job's index; the values are job names, not outcomes,
/// since the gated job need not consume anything `J` produces.
fn before_gates<C>(
    drafts: &[Draft<C>],
    producers: &HashMap<OutcomeName, Vec<usize>>,
) -> HashMap<usize, NameSet> {
    let mut gates: HashMap<usize, NameSet> = HashMap::new();
    for (idx, draft) in drafts.iter().enumerate() {
        for outcome in &draft.before {
            for target in other_producers(producers, outcome, idx) {
                gates
                    .entry(target)
                    .or_default()
                    .insert(draft.name.clone());
            }
        }
    }
    gates
}

/// Step 6: producers of everything the job requires, optionally awaits, or
/// checks through `notif`.
fn derive_must_follow<C>(
    drafts: &[Draft<C>],
    idx: usize,
    producers: &HashMap<OutcomeName, Vec<usize>>,
) -> NameSet {
    let draft = &drafts[idx];
    draft
        .requires
        .iter()
        .chain(&draft.optional)
        .chain(&draft.notif)
        .flat_map(|outcome| other_producers(producers, outcome, idx))
        .map(|producer| drafts[producer].name.clone())
        .collect()
}
