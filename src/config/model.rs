// src/config/model.rs

use indexmap::IndexMap;
use serde::Deserialize;

use crate::types::{CompileOptions, IntoNames, NameSet};

/// Job graph file as read from TOML, before validation.
///
/// ```toml
/// [config]
/// transitive_prune = false
///
/// [job.task1]
///
/// [job.task3]
/// requires = ["task1", "task2"]
/// optional = "task7"
/// priority = 2
/// ```
///
/// Jobs keep their declaration order.
#[derive(Debug, Clone, Deserialize)]
pub struct RawJobGraphFile {
    /// Compiler knobs from `[config]`.
    #[serde(default)]
    pub config: CompileOptions,

    /// All jobs from `[job.<name>]`.
    #[serde(default)]
    pub job: IndexMap<String, JobConfig>,
}

/// Validated job graph file.
///
/// Only constructed through `TryFrom<RawJobGraphFile>` (see
/// `config::validate`), or `new_unchecked` by code that has validated the
/// content itself.
#[derive(Debug, Clone)]
pub struct JobGraphFile {
    pub config: CompileOptions,
    pub job: IndexMap<String, JobConfig>,
}

impl JobGraphFile {
    pub fn new_unchecked(config: CompileOptions, job: IndexMap<String, JobConfig>) -> Self {
        Self { config, job }
    }
}

/// A single name or a list of names.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl Default for OneOrMany {
    fn default() -> Self {
        OneOrMany::Many(Vec::new())
    }
}

impl OneOrMany {
    pub fn iter(&self) -> impl Iterator<Item = &String> {
        match self {
            OneOrMany::One(name) => std::slice::from_ref(name).iter(),
            OneOrMany::Many(names) => names.iter(),
        }
    }
}

impl IntoNames for &OneOrMany {
    fn into_names(self) -> NameSet {
        self.iter().cloned().collect()
    }
}

/// `[job.<name>]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobConfig {
    #[serde(default)]
    pub requires: OneOrMany,

    #[serde(default)]
    pub optional: OneOrMany,

    #[serde(default)]
    pub before: OneOrMany,

    #[serde(default)]
    pub notif: OneOrMany,

    /// Extra outcomes besides the job's own name.
    #[serde(default)]
    pub provides: OneOrMany,

    #[serde(default)]
    pub priority: Option<i64>,

    /// Outcomes the built-in task announces when it runs.
    ///
    /// If `None`, the job announces its own name.
    #[serde(default)]
    pub announce: Option<OneOrMany>,

    /// Delay before the built-in task calls `Next`, in milliseconds.
    ///
    /// If `None`, `Next` is called synchronously.
    #[serde(default)]
    pub defer_ms: Option<u64>,
}

impl JobConfig {
    /// Outcomes the built-in task should announce for the job `name`.
    pub fn effective_announce(&self, name: &str) -> NameSet {
        match self.announce {
            Some(ref names) => names.into_names(),
            None => name.into_names(),
        }
    }

    /// Every name mentioned in a relation field, for validation.
    pub fn referenced_names(&self) -> impl Iterator<Item = &String> {
        self.requires
            .iter()
            .chain(self.optional.iter())
            .chain(self.before.iter())
            .chain(self.notif.iter())
            .chain(self.provides.iter())
            .chain(self.announce.iter().flat_map(|names| names.iter()))
    }
}
