// src/dag/order.rs

//! Initial ordering of a compiled plan.

use std::cmp::Ordering;

use crate::dag::CompiledJob;
use crate::types::CompileOptions;

/// Compare two jobs for the initial scan order.
///
/// 1. a job sorts after any job it must follow (checked in both directions);
/// 2. otherwise fewer `requires` first;
/// 3. otherwise higher priority first.
///
/// This is not a total order: `must_follow` is neither transitive nor
/// guaranteed acyclic.
pub fn compare<C>(a: &CompiledJob<C>, b: &CompiledJob<C>, options: CompileOptions) -> Ordering {
    if a.must_follow.contains(&b.name) {
        return Ordering::Greater;
    }
    if b.must_follow.contains(&a.name) {
        return Ordering::Less;
    }

    a.requires
        .len()
        .cmp(&b.requires.len())
        .then_with(|| priority_key(b, options).cmp(&priority_key(a, options)))
}

/// Sort key for priority.
///
/// Without `distinguish_zero_priority`, an unset priority and an explicit zero
/// are the same key.
fn priority_key<C>(job: &CompiledJob<C>, options: CompileOptions) -> (bool, i64) {
    let value = job.priority.unwrap_or(0);
    if options.distinguish_zero_priority {
        (job.priority.is_some(), value)
    } else {
        (false, value)
    }
}

/// Stable insertion sort driven by `cmp`.
///
/// `slice::sort_by` may panic when handed a comparator that is not a total
/// order; this never does and keeps declaration order among equal items.
pub fn insertion_sort_by<T, F>(items: &mut [T], mut cmp: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    for i in 1..items.len() {
        let mut j = i;
        while j > 0 && cmp(&items[j - 1], &items[j]) == Ordering::Greater {
            items.swap(j - 1, j);
            j -= 1;
        }
    }
}
