// crates/test-utils/src/builders.rs

use std::sync::{Arc, Mutex};

use jobdag::Job;

/// Shared log of invoked job names, in invocation order.
pub type CallLog = Arc<Mutex<Vec<String>>>;

pub fn call_log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn calls(log: &CallLog) -> Vec<String> {
    log.lock().unwrap().clone()
}

/// Job that announces its own name and continues immediately.
pub fn announcing(name: &str) -> Job {
    Job::new(name, |_ctx, done, next| {
        done.announce_own();
        next.call();
    })
}

/// Like [`announcing`], but also records its invocation in `log`.
pub fn recorded(name: &str, log: &CallLog) -> Job {
    let log = Arc::clone(log);
    Job::new(name, move |_ctx, done, next| {
        log.lock().unwrap().push(done.job().to_string());
        done.announce_own();
        next.call();
    })
}

/// Job that records its invocation, announces nothing, and continues.
pub fn silent(name: &str, log: &CallLog) -> Job {
    let log = Arc::clone(log);
    Job::new(name, move |_ctx, done, next| {
        log.lock().unwrap().push(done.job().to_string());
        next.call();
    })
}

/// The nine-job benchmark graph.
///
/// `task1` has no dependencies, `task6` needs `task1`, `task2` needs `task6`,
/// `task3` needs `task1` and `task2`, and so on; `task8` must run before
/// `task2`, and `task9` is skipped once `task8` is done.
pub fn harness_graph(log: &CallLog) -> Vec<Job> {
    vec![
        recorded("task1", log),
        recorded("task2", log).requires("task6"),
        recorded("task3", log).requires(["task1", "task2"]),
        recorded("task4", log).requires("task3"),
        recorded("task5", log).requires("task4"),
        recorded("task6", log).requires("task1"),
        recorded("task7", log).requires("task6").optional("task1"),
        recorded("task8", log).before("task2"),
        recorded("task9", log).requires("task1").notif("task8"),
    ]
}
