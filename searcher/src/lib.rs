//! Generalized heuristic search over caller-defined state spaces.
//!
//! Describe a search with a [SearchBuilder]: where it starts, where it
//! should end, how to expand a step into its neighbours, and how to order
//! the resulting nodes. The resulting [HeuristicSearch] can then be run
//! with any of the four algorithms in [AlgorithmKind]:
//!
//! - A*, over an open list with a closed set.
//! - Greedy best-first search, which expands each step at most once.
//! - Iterative-deepening A*, a bounded depth-first search.
//! - Recursive best-first search.
//!
//! Each run returns a [SearchOutcome], from which the path to the goal
//! can be read back.

pub mod algorithm;
pub mod comparer;
mod errors;
pub mod node;
pub mod observer;
pub mod registry;
mod search;

#[cfg(test)]
pub(crate) mod testing;

pub use algorithm::AlgorithmKind;
pub use comparer::{
    ComparerExt, DefaultEquality, KeyComparer, KeyEquality, NaturalOrder, NodeComparer,
    StepEquality,
};
pub use errors::Result as SearchResult;
pub use errors::SearchError;
pub use node::{Node, NodeArena, NodeId};
pub use observer::{AlgorithmState, Observer, StateFlag};
pub use search::{HeuristicSearch, SearchBuilder, SearchOptions, SearchOutcome};
