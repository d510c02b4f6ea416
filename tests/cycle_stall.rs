// tests/cycle_stall.rs

use std::error::Error;
use std::sync::Arc;

use jobdag::Resolver;
use jobdag_test_utils::builders::{announcing, call_log, calls, recorded};
use jobdag_test_utils::init_tracing;
use jobdag_test_utils::recording::{Observed, RecordingObserver};

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn mutual_requirement_leaves_both_jobs_residual() -> TestResult {
    init_tracing();

    let log = call_log();
    let resolver = Resolver::from_jobs(vec![
        recorded("a", &log).requires("b"),
        recorded("b", &log).requires("a"),
    ])?;

    let handle = resolver.run();
    assert!(handle.is_finished(), "a stalled cycle still ends the run");

    let report = handle.report().expect("run finished");
    assert!(report.ran.is_empty());
    assert_eq!(report.residual, vec!["b", "a"]);
    assert!(!report.is_complete());
    assert!(calls(&log).is_empty());
    Ok(())
}

#[test]
fn unrelated_jobs_still_run_around_a_cycle() -> TestResult {
    init_tracing();

    let observer = Arc::new(RecordingObserver::new());
    let mut resolver: Resolver = Resolver::new().with_observer(observer.clone());
    resolver.set(vec![
        announcing("a").requires("b"),
        announcing("free"),
        announcing("b").requires("a"),
        announcing("downstream").requires("free"),
    ])?;

    let report = resolver.run().report().expect("run finished");

    assert_eq!(report.ran, vec!["free", "downstream"]);
    assert_eq!(report.residual.len(), 2);
    assert!(report.residual.contains(&"a".to_string()));
    assert!(report.residual.contains(&"b".to_string()));

    let finished = observer
        .events()
        .into_iter()
        .find_map(|event| match event {
            Observed::Finished { residual, .. } => Some(residual),
            _ => None,
        })
        .expect("run_finished was observed");
    assert_eq!(finished, report.residual);
    Ok(())
}

#[test]
fn before_cycle_stalls_like_a_requirement_cycle() -> TestResult {
    init_tracing();

    let resolver = Resolver::from_jobs(vec![
        announcing("x").before("y"),
        announcing("y").before("x"),
    ])?;

    let report = resolver.run().report().expect("run finished");
    assert!(report.ran.is_empty());
    assert_eq!(report.residual.len(), 2);
    Ok(())
}
