// tests/store_mutation.rs

use std::error::Error;
use std::sync::{Arc, Mutex};

use jobdag::errors::JobdagError;
use jobdag::{Job, Next, Resolver};
use jobdag_test_utils::builders::{announcing, call_log, calls, harness_graph, recorded};
use jobdag_test_utils::init_tracing;

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn add_recompiles_before_returning() -> TestResult {
    init_tracing();

    let mut resolver: Resolver = Resolver::new();
    assert!(resolver.plan().is_empty());

    resolver.add(announcing("first"))?;
    assert_eq!(resolver.plan().order(), vec!["first"]);

    resolver.add(vec![announcing("third").requires("second"), announcing("second")])?;
    assert_eq!(resolver.store().len(), 3);

    let report = resolver.run().report().expect("synchronous run finishes");
    assert_eq!(report.ran, vec!["first", "second", "third"]);
    Ok(())
}

#[test]
fn readding_a_name_replaces_the_job_in_place() -> TestResult {
    init_tracing();

    let log = call_log();
    let mut resolver = Resolver::from_jobs(vec![
        recorded("a", &log),
        recorded("b", &log),
        recorded("c", &log),
    ])?;

    resolver.add(recorded("a", &log).priority(-5))?;
    assert_eq!(resolver.store().names().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    assert_eq!(
        resolver.store().get("a").and_then(|job| job.priority_value()),
        Some(-5)
    );
    assert_eq!(resolver.plan().order(), vec!["b", "c", "a"]);

    let first = resolver.run().report().expect("synchronous run finishes");

    // adding the same declarations again changes nothing observable
    resolver.add([recorded("b", &log), recorded("c", &log)])?;
    assert_eq!(resolver.plan().order(), vec!["b", "c", "a"]);

    let second = resolver.run().report().expect("synchronous run finishes");
    assert_eq!(first.ran, vec!["b", "c", "a"]);
    assert_eq!(second.ran, first.ran);
    assert_eq!(second.has, first.has);
    Ok(())
}

#[test]
fn redundant_add_leaves_run_outcomes_unchanged() -> TestResult {
    init_tracing();

    let log = call_log();
    let mut resolver = Resolver::from_jobs(harness_graph(&log))?;
    let before = resolver.run().report().expect("synchronous run finishes");

    resolver.add(harness_graph(&log))?;
    let after = resolver.run().report().expect("synchronous run finishes");

    assert_eq!(after.has, before.has);
    assert_eq!(after.ran, before.ran);
    assert_eq!(after.skipped, before.skipped);
    assert_eq!(after.residual, before.residual);
    Ok(())
}

#[test]
fn set_replaces_every_declaration() -> TestResult {
    init_tracing();

    let mut resolver = Resolver::from_jobs(vec![announcing("old1"), announcing("old2")])?;
    resolver.set(vec![announcing("new")])?;

    assert!(!resolver.store().contains("old1"));
    assert_eq!(resolver.plan().order(), vec!["new"]);
    Ok(())
}

#[test]
fn remove_accepts_names_jobs_and_nested_collections() -> TestResult {
    init_tracing();

    let keep = announcing("keep");
    let by_ref = announcing("by_ref");
    let mut resolver = Resolver::from_jobs(vec![
        keep.clone(),
        by_ref.clone(),
        announcing("by_name"),
        announcing("nested1"),
        announcing("nested2"),
        announcing("paired"),
    ])?;

    assert_eq!(resolver.remove("by_name"), 1);
    assert_eq!(resolver.remove(&by_ref), 1);
    assert_eq!(
        resolver.remove(vec![vec!["nested1"], vec!["nested2", "missing"]]),
        2
    );
    assert_eq!(resolver.remove(("paired", String::from("also_missing"))), 1);

    assert_eq!(resolver.store().names().collect::<Vec<_>>(), vec!["keep"]);
    assert_eq!(resolver.plan().order(), vec![keep.name()]);
    Ok(())
}

#[test]
fn removing_an_unknown_name_is_a_noop() -> TestResult {
    init_tracing();

    let mut resolver = Resolver::from_jobs(vec![announcing("only")])?;
    let before = resolver.plan().order().join(",");

    assert_eq!(resolver.remove("ghost"), 0);
    assert_eq!(resolver.plan().order().join(","), before);
    Ok(())
}

#[test]
fn removing_a_producer_prunes_its_dependents() -> TestResult {
    init_tracing();

    let mut resolver = Resolver::from_jobs(vec![
        announcing("base"),
        announcing("top").requires("base"),
    ])?;

    resolver.remove("base");
    let plan = resolver.plan();
    assert!(plan.is_empty());
    assert_eq!(plan.discarded(), ["top".to_string()]);
    Ok(())
}

#[test]
fn empty_job_name_is_rejected_without_mutation() -> TestResult {
    init_tracing();

    let mut resolver = Resolver::from_jobs(vec![announcing("existing")])?;

    let err = resolver
        .add(vec![announcing("fine"), announcing("  ")])
        .expect_err("blank name must be rejected");
    assert!(matches!(err, JobdagError::InvalidJob(_)));

    let err = resolver
        .set(vec![announcing("")])
        .expect_err("empty name must be rejected");
    assert!(matches!(err, JobdagError::InvalidJob(_)));

    assert_eq!(resolver.store().names().collect::<Vec<_>>(), vec!["existing"]);
    Ok(())
}

#[test]
fn in_flight_run_keeps_the_plan_it_started_with() -> TestResult {
    init_tracing();

    let log = call_log();
    let parked: Arc<Mutex<Option<Next>>> = Arc::new(Mutex::new(None));

    let gate = {
        let log = Arc::clone(&log);
        let parked = Arc::clone(&parked);
        Job::new("gate", move |_ctx, done, next| {
            log.lock().unwrap().push(done.job().to_string());
            done.announce_own();
            *parked.lock().unwrap() = Some(next);
        })
    };

    let mut resolver = Resolver::from_jobs(vec![gate, recorded("after", &log).requires("gate")])?;

    let handle = resolver.run();
    assert!(!handle.is_finished());

    resolver.add(recorded("late", &log))?;
    resolver.remove("after");

    let next = parked.lock().unwrap().take().expect("gate parked its continuation");
    next.call();

    let report = handle.report().expect("run finished after next was called");
    assert_eq!(report.ran, vec!["gate", "after"]);
    assert_eq!(calls(&log), vec!["gate", "after"]);

    let second = resolver.run();
    let next = parked.lock().unwrap().take().expect("gate parked again");
    next.call();
    let report = second.report().expect("second run finished");
    assert_eq!(report.ran, vec!["gate", "late"]);
    Ok(())
}
