//! Provides the building blocks for search algorithms
//!
//! Every algorithm runs against a [Run], which owns the node arena and
//! observer for one call, and wraps the caller's expansion, conversion
//! and ordering functions.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use tracing::{debug, info, trace};

use crate::comparer::{NodeComparer, StepEquality};
use crate::errors::SearchError;
use crate::node::{Node, NodeArena, NodeId};
use crate::observer::{AlgorithmState, Observer, StateFlag};
use crate::registry;
use crate::search::{HeuristicSearch, SearchOutcome};

pub(crate) mod astar;
pub(crate) mod best_first;
pub(crate) mod frontier;
pub(crate) mod idastar;
pub(crate) mod rbfs;

/// The search algorithms available to a [HeuristicSearch].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgorithmKind {
    AStar,
    BestFirst,
    IterativeDeepeningAStar,
    RecursiveBestFirst,
}

impl AlgorithmKind {
    pub const ALL: [AlgorithmKind; 4] = [
        AlgorithmKind::AStar,
        AlgorithmKind::BestFirst,
        AlgorithmKind::IterativeDeepeningAStar,
        AlgorithmKind::RecursiveBestFirst,
    ];

    /// Canonical registry name.
    pub fn name(self) -> &'static str {
        match self {
            AlgorithmKind::AStar => "astar",
            AlgorithmKind::BestFirst => "best-first",
            AlgorithmKind::IterativeDeepeningAStar => "idastar",
            AlgorithmKind::RecursiveBestFirst => "rbfs",
        }
    }

    /// Run this algorithm to completion.
    pub fn run<S, F>(self, search: &HeuristicSearch<S, F>) -> SearchOutcome<S, F>
    where
        S: Clone,
        F: Clone,
    {
        let mut run = Run::new(search);
        debug!(algorithm = self.name(), "starting search");

        let conclusion = match self {
            AlgorithmKind::AStar => astar::search(&mut run),
            AlgorithmKind::BestFirst => best_first::search(&mut run),
            AlgorithmKind::IterativeDeepeningAStar => idastar::search(&mut run),
            AlgorithmKind::RecursiveBestFirst => rbfs::search(&mut run),
        };

        run.finish(self, conclusion)
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for AlgorithmKind {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        registry::lookup(s)
    }
}

/// How an algorithm ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Conclusion {
    Found(NodeId),

    /// Carries the last node examined, if any.
    NotFound(Option<NodeId>),
}

/// State for a single run of an algorithm.
pub(crate) struct Run<'s, S, F> {
    search: &'s HeuristicSearch<S, F>,
    pub(crate) nodes: NodeArena<F, S>,
    observer: Option<Box<dyn Observer<F, S>>>,
    expansions: usize,
}

impl<'s, S, F> Run<'s, S, F>
where
    S: Clone,
{
    pub(crate) fn new(search: &'s HeuristicSearch<S, F>) -> Self {
        Run {
            search,
            nodes: NodeArena::new(),
            observer: search.observer.as_ref().map(|factory| factory()),
            expansions: 0,
        }
    }

    pub(crate) fn search(&self) -> &'s HeuristicSearch<S, F> {
        self.search
    }

    pub(crate) fn comparer(&self) -> &'s dyn NodeComparer<F, S> {
        &*self.search.comparer
    }

    pub(crate) fn equality(&self) -> &'s dyn StepEquality<S> {
        &*self.search.equality
    }

    pub(crate) fn compare(&self, x: NodeId, y: NodeId) -> Ordering {
        self.comparer().compare(&self.nodes[x], &self.nodes[y])
    }

    pub(crate) fn is_goal(&self, step: &S) -> bool {
        self.equality().equals(step, &self.search.to)
    }

    fn factors(&self, step: &S, level: usize) -> Vec<F> {
        let mut factors = (self.search.converter)(step, level);
        factors.retain(|factor| self.search.filters.iter().all(|keep| keep(factor)));
        factors
    }

    /// Nodes built from the start step, unsorted.
    pub(crate) fn roots(&self) -> Vec<Node<F, S>> {
        let from = &self.search.from;
        self.factors(from, 0)
            .into_iter()
            .map(|factor| Node::new(from.clone(), factor, 0))
            .collect()
    }

    /// Expand a node into its children, which are not yet in the arena.
    pub(crate) fn expand(&mut self, parent: NodeId) -> Vec<Node<F, S>> {
        self.expansions += 1;

        let (step, level) = {
            let node = &self.nodes[parent];
            (node.step().clone(), node.level())
        };
        trace!(level, expansions = self.expansions, "expanding node");
        if let Some(every) = self.search.options.progress_interval {
            if every > 0 && self.expansions % every == 0 {
                info!(
                    expansions = self.expansions,
                    nodes = self.nodes.len(),
                    level,
                    "search progress"
                );
            }
        }

        let mut children = Vec::new();
        for next in (self.search.expander)(&step, level) {
            for factor in self.factors(&next, level + 1) {
                children.push(Node::child_of(next.clone(), factor, parent, level));
            }
        }
        children
    }

    /// Tell the observer, if there is one, where the run is.
    pub(crate) fn report(&mut self, flag: StateFlag, node: Option<NodeId>, candidates: &[NodeId]) {
        if let Some(observer) = self.observer.as_mut() {
            let nodes = &self.nodes;
            let state = AlgorithmState::new(
                flag,
                node.map(|id| &nodes[id]),
                candidates.iter().map(|&id| &nodes[id]).collect(),
                nodes,
            );
            observer.observe(&state);
        }
    }

    fn finish(mut self, algorithm: AlgorithmKind, conclusion: Conclusion) -> SearchOutcome<S, F> {
        let goal = match conclusion {
            Conclusion::Found(goal) => {
                self.report(StateFlag::Found, Some(goal), &[]);
                Some(goal)
            }
            Conclusion::NotFound(last) => {
                self.report(StateFlag::NotFound, last, &[]);
                None
            }
        };
        debug!(
            algorithm = algorithm.name(),
            found = goal.is_some(),
            expansions = self.expansions,
            nodes = self.nodes.len(),
            "search finished"
        );
        SearchOutcome::new(self.nodes, goal, algorithm, self.expansions)
    }
}
