// src/lib.rs

//! Dependency-aware job scheduler: declare jobs, compile a precedence plan
//! once per change, run it many times.

pub mod cli;
pub mod config;
pub mod dag;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod job;
pub mod logging;
pub mod resolver;
pub mod types;

pub use dag::{CompiledJob, Plan};
pub use engine::{Done, Next, RunHandle, RunObserver, RunReport};
pub use job::Job;
pub use resolver::Resolver;
pub use types::CompileOptions;

use std::time::Instant;

use anyhow::Result;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::loader::load_and_validate;
use crate::exec::jobs_from_config;

/// Benchmark harness behind the `jobdag` binary.
///
/// Loads the job graph, compiles it once (timed), then either prints it
/// (`--dot`, `--dry-run`) or executes it `--runs` times and reports the
/// throughput together with the outcome of the last run.
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = load_and_validate(&args.config)?;

    let compile_started = Instant::now();
    let mut resolver: Resolver = Resolver::new().with_options(cfg.config);
    resolver.set(jobs_from_config(&cfg))?;
    let compile_time = compile_started.elapsed();

    let plan = resolver.plan();
    info!(
        jobs = plan.len(),
        discarded = plan.discarded().len(),
        ?compile_time,
        "job graph compiled"
    );

    if args.dot {
        println!("{}", plan.to_dot());
        return Ok(());
    }

    if args.dry_run {
        print_dry_run(&plan);
        return Ok(());
    }

    let runs = args.runs;
    let run_started = Instant::now();
    let mut last = None;
    for _ in 0..runs {
        last = Some(resolver.run().wait().await?);
    }
    let run_time = run_started.elapsed();

    let per_second = runs as f64 / run_time.as_secs_f64().max(f64::EPSILON);
    println!(
        "Initialization time: {:.3} ms, execution performance: {:.0} runs/second",
        compile_time.as_secs_f64() * 1000.0,
        per_second
    );

    if let Some(report) = last {
        println!("satisfied outcomes: {:?}", report.has);
        println!("dispatch order: {:?}", report.ran);
        if !report.skipped.is_empty() {
            println!("skipped: {:?}", report.skipped);
        }
        if !report.is_complete() {
            println!("never eligible: {:?}", report.residual);
        }
    }

    Ok(())
}

/// Dry-run output: print the compiled plan without running anything.
fn print_dry_run(plan: &Plan) {
    println!("jobdag dry-run");
    println!(
        "  config.transitive_prune = {}",
        plan.options().transitive_prune
    );
    println!(
        "  config.distinguish_zero_priority = {}",
        plan.options().distinguish_zero_priority
    );
    println!(
        "  config.notif_orders_only = {}",
        plan.options().notif_orders_only
    );
    println!();

    println!("plan ({} jobs, in initial scan order):", plan.len());
    for job in plan.jobs() {
        println!("  - {}", job.name);
        if job.provides.len() > 1 {
            println!("      provides: {:?}", job.provides);
        }
        if !job.requires.is_empty() {
            println!("      requires: {:?}", job.requires);
        }
        if !job.must_follow.is_empty() {
            println!("      must_follow: {:?}", job.must_follow);
        }
        if !job.notif.is_empty() {
            println!("      notif: {:?}", job.notif);
        }
        if let Some(priority) = job.priority {
            println!("      priority: {priority}");
        }
    }

    if !plan.discarded().is_empty() {
        println!();
        println!("discarded (unsatisfiable requires): {:?}", plan.discarded());
    }

    debug!("dry-run complete (no execution)");
}
