// tests/scheduler_ordering.rs

use std::error::Error;

use jobdag::Resolver;
use jobdag_test_utils::builders::{announcing, call_log, calls, harness_graph, recorded};
use jobdag_test_utils::init_tracing;

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn chain_dispatches_in_dependency_order() -> TestResult {
    init_tracing();

    let log = call_log();
    let resolver = Resolver::from_jobs(vec![
        recorded("task1", &log),
        recorded("task6", &log).requires("task1"),
        recorded("task2", &log).requires("task6"),
        recorded("task3", &log).requires(["task1", "task2"]),
    ])?;

    let report = resolver.run().report().expect("synchronous run finishes");

    assert_eq!(report.ran, vec!["task1", "task6", "task2", "task3"]);
    assert_eq!(calls(&log), vec!["task1", "task6", "task2", "task3"]);
    for outcome in ["task1", "task6", "task2", "task3"] {
        assert!(report.has(outcome), "missing outcome {outcome}");
    }
    assert!(report.is_complete());
    Ok(())
}

#[test]
fn harness_graph_respects_every_relation() -> TestResult {
    init_tracing();

    let log = call_log();
    let resolver = Resolver::from_jobs(harness_graph(&log))?;
    let report = resolver.run().report().expect("synchronous run finishes");

    assert_eq!(
        report.ran,
        vec![
            "task1", "task8", "task6", "task2", "task3", "task4", "task5", "task7", "task9"
        ]
    );
    // task9 is skipped because task8 already announced its outcome.
    assert_eq!(report.skipped, vec!["task9"]);
    assert!(!report.was_invoked("task9"));
    assert!(!report.has("task9"));
    assert!(report.is_complete());
    assert_eq!(calls(&log).len(), 8);
    Ok(())
}

#[test]
fn required_producers_always_dispatch_first() -> TestResult {
    init_tracing();

    let log = call_log();
    let resolver = Resolver::from_jobs(harness_graph(&log))?;
    let plan = resolver.plan();
    let report = resolver.run().report().expect("synchronous run finishes");

    for job in plan.jobs() {
        let Some(at) = report.position(&job.name) else {
            continue;
        };
        for earlier in &job.must_follow {
            let before = report
                .position(earlier)
                .unwrap_or_else(|| panic!("{earlier} never dispatched"));
            assert!(
                before < at,
                "{} dispatched at {at}, but must follow {earlier} at {before}",
                job.name
            );
        }
    }
    Ok(())
}

#[test]
fn before_gates_the_target_job_without_sharing_outcomes() -> TestResult {
    init_tracing();

    let log = call_log();
    let resolver = Resolver::from_jobs(vec![
        recorded("commit", &log),
        recorded("audit", &log).before("commit"),
    ])?;

    let plan = resolver.plan();
    let commit = plan.get("commit").expect("commit is compiled");
    assert!(commit.must_follow.contains("audit"));
    assert!(commit.requires.is_empty(), "before must not add an outcome gate");
    assert_eq!(plan.order(), vec!["audit", "commit"]);

    let report = resolver.run().report().expect("synchronous run finishes");
    assert_eq!(report.ran, vec!["audit", "commit"]);
    Ok(())
}

#[test]
fn priority_breaks_ties_between_unrelated_jobs() -> TestResult {
    init_tracing();

    let resolver = Resolver::from_jobs(vec![
        announcing("low"),
        announcing("high").priority(10),
        announcing("mid").priority(3),
        announcing("sunk").priority(-1),
    ])?;

    let report = resolver.run().report().expect("synchronous run finishes");
    assert_eq!(report.ran, vec!["high", "mid", "low", "sunk"]);
    Ok(())
}

#[test]
fn fewer_requirements_sort_first_but_gating_decides() -> TestResult {
    init_tracing();

    let resolver = Resolver::from_jobs(vec![
        announcing("heavy").requires(["a", "b"]),
        announcing("b").requires("a"),
        announcing("a"),
    ])?;

    assert_eq!(resolver.plan().order(), vec!["a", "b", "heavy"]);
    let report = resolver.run().report().expect("synchronous run finishes");
    assert_eq!(report.ran, vec!["a", "b", "heavy"]);
    Ok(())
}

#[test]
fn runs_are_independent() -> TestResult {
    init_tracing();

    let log = call_log();
    let resolver = Resolver::from_jobs(harness_graph(&log))?;

    let first = resolver.run().report().expect("first run finishes");
    let second = resolver.run().report().expect("second run finishes");

    assert_ne!(first.run_id, second.run_id);
    assert_eq!(first.ran, second.ran);
    assert_eq!(first.has, second.has);
    assert_eq!(calls(&log).len(), 16);
    Ok(())
}

#[test]
fn long_synchronous_chain_does_not_recurse() -> TestResult {
    init_tracing();

    let count = 10_000;
    let jobs = (0..count).map(|i| {
        let job = announcing(&format!("job{i}"));
        if i == 0 {
            job
        } else {
            job.requires(format!("job{}", i - 1))
        }
    });
    let resolver = Resolver::from_jobs(jobs)?;

    let report = resolver.run().report().expect("synchronous run finishes");
    assert_eq!(report.ran.len(), count);
    assert!(report.has(&format!("job{}", count - 1)));
    Ok(())
}
