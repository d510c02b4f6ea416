// src/resolver.rs

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::dag::{Plan, compile};
use crate::engine::{RunHandle, RunObserver, TracingObserver, execute};
use crate::errors::Result;
use crate::job::{IntoJobKeys, IntoJobs, Job, JobStore};
use crate::types::CompileOptions;

/// Job store plus its compiled plan.
///
/// Every mutation recompiles synchronously, so a `run` started after a
/// mutation returns always sees the new plan. Runs already in flight keep the
/// plan they started with.
///
/// ```
/// use jobdag::{Job, Resolver};
///
/// let mut resolver: Resolver = Resolver::new();
/// resolver.add(vec![
///     Job::new("load", |_ctx, done, next| {
///         done.announce_own();
///         next.call();
///     }),
///     Job::new("render", |_ctx, done, next| {
///         done.announce_own();
///         next.call();
///     })
///     .requires("load"),
/// ])?;
///
/// let report = resolver.run().report().expect("synchronous jobs finish immediately");
/// assert_eq!(report.ran, vec!["load", "render"]);
/// # Ok::<(), jobdag::errors::JobdagError>(())
/// ```
pub struct Resolver<C = ()> {
    store: JobStore<C>,
    plan: Arc<Plan<C>>,
    options: CompileOptions,
    observer: Arc<dyn RunObserver>,
    run_counter: AtomicU64,
}

impl<C> Resolver<C>
where
    C: Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            store: JobStore::new(),
            plan: Arc::new(Plan::empty()),
            options: CompileOptions::default(),
            observer: Arc::new(TracingObserver),
            run_counter: AtomicU64::new(0),
        }
    }

    /// Convenience: a resolver whose store is initialised with `jobs`.
    pub fn from_jobs(jobs: impl IntoIterator<Item = Job<C>>) -> Result<Self> {
        let mut resolver = Self::new();
        resolver.set(jobs)?;
        Ok(resolver)
    }

    pub fn with_options(mut self, options: CompileOptions) -> Self {
        self.options = options;
        self.rebuild();
        self
    }

    /// Replace the diagnostic sink. The plan is recompiled so that compile-time
    /// events reach the new observer.
    pub fn with_observer(mut self, observer: Arc<dyn RunObserver>) -> Self {
        self.observer = observer;
        self.rebuild();
        self
    }

    /// Replace every job, then recompile.
    pub fn set(&mut self, jobs: impl IntoIterator<Item = Job<C>>) -> Result<()> {
        self.store.set(jobs)?;
        self.rebuild();
        Ok(())
    }

    /// Add or replace one or more jobs, then recompile.
    pub fn add(&mut self, jobs: impl IntoJobs<C>) -> Result<()> {
        self.store.add(jobs)?;
        self.rebuild();
        Ok(())
    }

    /// Remove jobs by name, job reference, or collections of those, then
    /// recompile. Returns how many jobs were removed.
    pub fn remove(&mut self, keys: impl IntoJobKeys) -> usize {
        let removed = self.store.remove(keys);
        self.rebuild();
        removed
    }

    pub fn store(&self) -> &JobStore<C> {
        &self.store
    }

    /// The current compiled plan.
    pub fn plan(&self) -> Arc<Plan<C>> {
        Arc::clone(&self.plan)
    }

    pub fn options(&self) -> CompileOptions {
        self.options
    }

    /// Start a run with `ctx` as the context passed to every callback.
    pub fn run_with(&self, ctx: C) -> RunHandle {
        self.run_shared(Arc::new(ctx))
    }

    /// Start a run with a context that is already shared.
    pub fn run_shared(&self, ctx: Arc<C>) -> RunHandle {
        let run_id = self.run_counter.fetch_add(1, Ordering::Relaxed) + 1;
        execute(&self.plan, ctx, Arc::clone(&self.observer), run_id)
    }

    fn rebuild(&mut self) {
        let plan = compile(&self.store, self.options, self.observer.as_ref());
        self.plan = Arc::new(plan);
    }
}

impl<C> Resolver<C>
where
    C: Default + Send + Sync + 'static,
{
    /// Start a run with the default context (the unit context for
    /// `Resolver<()>`).
    pub fn run(&self) -> RunHandle {
        self.run_with(C::default())
    }
}

impl<C> Default for Resolver<C>
where
    C: Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for Resolver<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("jobs", &self.store.len())
            .field("plan", &self.plan.order())
            .field("options", &self.options)
            .field("runs", &self.run_counter.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}
