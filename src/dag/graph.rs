// src/dag/graph.rs

//! Precedence graph view of a [`Plan`], for diagnostics and DOT export.

use std::fmt;

use petgraph::dot::Dot;
use petgraph::graphmap::DiGraphMap;

use crate::dag::Plan;

/// Why one job precedes another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    /// The later job requires an outcome the earlier one provides.
    Requires,
    /// Ordering only: `optional`, `notif` or a `before` gate.
    Follows,
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeKind::Requires => f.write_str("requires"),
            EdgeKind::Follows => f.write_str("follows"),
        }
    }
}

/// Edges point from the job that must run first to the job that waits.
pub type PrecedenceGraph<'a> = DiGraphMap<&'a str, EdgeKind>;

impl<C> Plan<C> {
    /// Build the precedence graph from every job's `must_follow` set.
    ///
    /// No acyclicity check is performed; cycles show up as cycles.
    pub fn to_graph(&self) -> PrecedenceGraph<'_> {
        let mut graph = PrecedenceGraph::new();

        for job in self.jobs() {
            graph.add_node(job.name.as_str());
        }

        for job in self.jobs() {
            for earlier in &job.must_follow {
                let Some(producer) = self.get(earlier) else {
                    continue;
                };
                let kind = if producer.provides.iter().any(|o| job.requires.contains(o)) {
                    EdgeKind::Requires
                } else {
                    EdgeKind::Follows
                };
                graph.add_edge(producer.name.as_str(), job.name.as_str(), kind);
            }
        }

        graph
    }

    /// Graphviz rendering of [`Plan::to_graph`].
    pub fn to_dot(&self) -> String {
        let graph = self.to_graph();
        format!("{}", Dot::new(&graph))
    }
}
