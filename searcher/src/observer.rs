//! Progress reporting while an algorithm runs.
//!
//! A run reports zero or more [StateFlag::InProgress] states, followed by
//! exactly one [StateFlag::Found] or [StateFlag::NotFound]. Observers only
//! see borrowed views of the run, so nothing they do can feed back into it.

use std::fmt;

use crate::node::{Node, NodeArena};

/// Where an algorithm is in its run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateFlag {
    NotFound,
    InProgress,
    Found,
}

impl StateFlag {
    /// Is this the last report of a run?
    pub fn is_terminal(self) -> bool {
        !matches!(self, StateFlag::InProgress)
    }
}

impl fmt::Display for StateFlag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StateFlag::NotFound => write!(f, "not found"),
            StateFlag::InProgress => write!(f, "in progress"),
            StateFlag::Found => write!(f, "found"),
        }
    }
}

/// A single report from a running algorithm.
///
/// Built fresh for every report and only valid for the duration of the
/// [Observer::observe] call which receives it.
#[derive(Debug)]
pub struct AlgorithmState<'a, F, S> {
    flag: StateFlag,
    node: Option<&'a Node<F, S>>,
    candidates: Vec<&'a Node<F, S>>,
    nodes: &'a NodeArena<F, S>,
}

impl<'a, F, S> AlgorithmState<'a, F, S> {
    pub(crate) fn new(
        flag: StateFlag,
        node: Option<&'a Node<F, S>>,
        candidates: Vec<&'a Node<F, S>>,
        nodes: &'a NodeArena<F, S>,
    ) -> Self {
        Self {
            flag,
            node,
            candidates,
            nodes,
        }
    }

    pub fn flag(&self) -> StateFlag {
        self.flag
    }

    /// The node this report is about.
    ///
    /// Only absent when a run finds nothing to start from.
    pub fn node(&self) -> Option<&'a Node<F, S>> {
        self.node
    }

    /// The remaining frontier, or sibling set, when the report was made.
    /// Always empty for terminal reports.
    pub fn candidates(&self) -> &[&'a Node<F, S>] {
        &self.candidates
    }

    /// Walk from the reported node back to the start of the search.
    pub fn ancestors(&self) -> impl Iterator<Item = &'a Node<F, S>> + 'a
    where
        F: 'a,
        S: 'a,
    {
        let nodes = self.nodes;
        let node = self.node;
        node.into_iter().chain(
            node.and_then(|n| n.previous())
                .into_iter()
                .flat_map(move |parent| nodes.ancestors(parent)),
        )
    }
}

/// Receives reports from a single run.
pub trait Observer<F, S> {
    fn observe(&mut self, state: &AlgorithmState<'_, F, S>);
}

impl<F, S, G> Observer<F, S> for G
where
    G: FnMut(&AlgorithmState<'_, F, S>),
{
    fn observe(&mut self, state: &AlgorithmState<'_, F, S>) {
        self(state)
    }
}

/// Builds the observer for a run. Called exactly once per run.
pub type ObserverFactory<F, S> = Box<dyn Fn() -> Box<dyn Observer<F, S>>>;
