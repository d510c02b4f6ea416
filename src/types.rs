// src/types.rs

//! Small shared types: name aliases, the scalar-or-collection normalisation
//! used at the registration boundary, and compile options.

use std::collections::BTreeSet;

use serde::Deserialize;

/// Canonical job name type.
pub type JobName = String;

/// Name of an outcome announced through `Done`.
pub type OutcomeName = String;

/// Normalised set of names.
pub type NameSet = BTreeSet<String>;

/// Anything that can be turned into a set of names: a single name or a
/// collection of names.
///
/// ```
/// use jobdag::types::IntoNames;
///
/// assert_eq!("a".into_names().len(), 1);
/// assert_eq!(vec!["a", "b", "a"].into_names().len(), 2);
/// ```
pub trait IntoNames {
    fn into_names(self) -> NameSet;
}

impl IntoNames for &str {
    fn into_names(self) -> NameSet {
        std::iter::once(self.to_string()).collect()
    }
}

impl IntoNames for String {
    fn into_names(self) -> NameSet {
        std::iter::once(self).collect()
    }
}

impl IntoNames for &String {
    fn into_names(self) -> NameSet {
        std::iter::once(self.clone()).collect()
    }
}

impl<S: Into<String>> IntoNames for Vec<S> {
    fn into_names(self) -> NameSet {
        self.into_iter().map(Into::into).collect()
    }
}

impl<S: Into<String>, const N: usize> IntoNames for [S; N] {
    fn into_names(self) -> NameSet {
        self.into_iter().map(Into::into).collect()
    }
}

impl<S: Into<String> + Clone> IntoNames for &[S] {
    fn into_names(self) -> NameSet {
        self.iter().cloned().map(Into::into).collect()
    }
}

impl IntoNames for NameSet {
    fn into_names(self) -> NameSet {
        self
    }
}

impl<T: IntoNames> IntoNames for Option<T> {
    fn into_names(self) -> NameSet {
        self.map(IntoNames::into_names).unwrap_or_default()
    }
}

/// Knobs for the graph compiler.
///
/// Loaded from the `[config]` section of a job graph file, or set directly
/// through `Resolver::with_options`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct CompileOptions {
    /// Repeat the prune step until no more jobs are discarded, so that a job
    /// whose only producer was pruned is pruned as well.
    ///
    /// Off by default: a single pass is performed.
    #[serde(default)]
    pub transitive_prune: bool,

    /// Treat an explicit `priority = 0` differently from no priority.
    ///
    /// Off by default, in which case zero and unset compare equal. When on,
    /// any explicit priority (zero or negative included) sorts ahead of an
    /// unset one.
    #[serde(default)]
    pub distinguish_zero_priority: bool,

    /// Keep `notif` outcomes out of `optional`.
    ///
    /// Off by default, in which case a `notif` outcome that some other job
    /// provides becomes a requirement. When on, `notif` only orders the job
    /// after those producers and the job runs even if they announce nothing.
    #[serde(default)]
    pub notif_orders_only: bool,
}
