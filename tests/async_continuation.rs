// tests/async_continuation.rs

use std::error::Error;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use jobdag::errors::JobdagError;
use jobdag::{Job, Next, Resolver};
use jobdag_test_utils::builders::{call_log, calls, recorded};
use jobdag_test_utils::{init_tracing, with_timeout};

type TestResult = Result<(), Box<dyn Error>>;

fn deferred(name: &str, delay: Duration) -> Job {
    Job::new(name, move |_ctx, done, next| {
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            done.announce_own();
            next.call();
        });
    })
}

#[tokio::test]
async fn deferred_next_resumes_the_run() -> TestResult {
    init_tracing();

    let log = call_log();
    let resolver = Resolver::from_jobs(vec![
        recorded("first", &log),
        deferred("slow", Duration::from_millis(20)).requires("first"),
        recorded("last", &log).requires("slow"),
    ])?;

    let handle = resolver.run();
    assert!(!handle.is_finished(), "run waits for the spawned continuation");

    let report = with_timeout(handle.wait()).await?;
    assert_eq!(report.ran, vec!["first", "slow", "last"]);
    assert!(report.has("slow"));
    assert_eq!(calls(&log), vec!["first", "last"]);
    Ok(())
}

#[tokio::test]
async fn concurrent_runs_do_not_share_state() -> TestResult {
    init_tracing();

    let resolver = Resolver::from_jobs(vec![
        deferred("a", Duration::from_millis(10)),
        deferred("b", Duration::from_millis(5)).requires("a"),
    ])?;

    let first = resolver.run();
    let second = resolver.run();
    assert_ne!(first.run_id(), second.run_id());

    let (first, second) = tokio::join!(with_timeout(first.wait()), with_timeout(second.wait()));
    assert_eq!(first?.ran, vec!["a", "b"]);
    assert_eq!(second?.ran, vec!["a", "b"]);
    Ok(())
}

#[tokio::test]
async fn dropping_every_continuation_abandons_the_run() -> TestResult {
    init_tracing();

    let resolver = Resolver::from_jobs(vec![
        Job::new("quitter", |_ctx, done, next| {
            drop(done);
            drop(next);
        }),
        recorded("never", &call_log()).requires("quitter"),
    ])?;

    let result = with_timeout(resolver.run().wait()).await;
    assert!(matches!(result, Err(JobdagError::RunAbandoned)));
    Ok(())
}

#[tokio::test]
async fn held_next_that_is_never_called_stalls_the_run() -> TestResult {
    init_tracing();

    let parked: Arc<Mutex<Option<Next>>> = Arc::new(Mutex::new(None));
    let resolver: Resolver = {
        let parked = Arc::clone(&parked);
        Resolver::from_jobs(vec![Job::new("holder", move |_ctx, _done, next| {
            *parked.lock().unwrap() = Some(next);
        })])?
    };

    let handle = resolver.run();
    assert!(!handle.is_finished());

    let waited = tokio::time::timeout(Duration::from_millis(50), handle.wait()).await;
    assert!(waited.is_err(), "wait must pend while the continuation is held");
    assert!(parked.lock().unwrap().is_some());
    Ok(())
}

#[derive(Default)]
struct Session {
    user: String,
    trail: Mutex<Vec<String>>,
}

#[tokio::test]
async fn callbacks_share_the_run_context() -> TestResult {
    init_tracing();

    let step = |name: &str| {
        Job::new(name, |ctx: &Arc<Session>, done, next| {
            ctx.trail
                .lock()
                .unwrap()
                .push(format!("{}:{}", ctx.user, done.job()));
            done.announce_own();
            next.call();
        })
    };

    let resolver: Resolver<Session> =
        Resolver::from_jobs(vec![step("login"), step("fetch").requires("login")])?;

    let session = Arc::new(Session {
        user: "ada".to_string(),
        ..Session::default()
    });
    let report = with_timeout(resolver.run_shared(Arc::clone(&session)).wait()).await?;

    assert!(report.is_complete());
    assert_eq!(
        *session.trail.lock().unwrap(),
        vec!["ada:login".to_string(), "ada:fetch".to_string()]
    );

    // run_with builds a fresh context per run
    let report = with_timeout(resolver.run().wait()).await?;
    assert_eq!(report.ran, vec!["login", "fetch"]);
    Ok(())
}
