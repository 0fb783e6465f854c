//! Process-wide mapping from algorithm names to algorithms.
//!
//! Names are matched case-insensitively. The registry starts out with
//! the canonical name and a few aliases for each [AlgorithmKind], and
//! callers may add their own aliases at any time.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use lazy_static::lazy_static;

use crate::algorithm::AlgorithmKind;
use crate::errors::{Result, SearchError};

lazy_static! {
    static ref ALGORITHMS: RwLock<HashMap<String, AlgorithmKind>> = {
        let mut algorithms = HashMap::new();
        let names: Vec<(&str, AlgorithmKind)> = vec![
            ("astar", AlgorithmKind::AStar),
            ("a*", AlgorithmKind::AStar),
            ("best-first", AlgorithmKind::BestFirst),
            ("bestfirst", AlgorithmKind::BestFirst),
            ("idastar", AlgorithmKind::IterativeDeepeningAStar),
            ("ida*", AlgorithmKind::IterativeDeepeningAStar),
            ("rbfs", AlgorithmKind::RecursiveBestFirst),
        ];

        for (name, kind) in names.into_iter() {
            algorithms.insert(name.to_string(), kind);
        }

        RwLock::new(algorithms)
    };
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Register `name` as another name for `kind`.
///
/// Returns the algorithm previously registered under that name, if any.
pub fn register(name: &str, kind: AlgorithmKind) -> Option<AlgorithmKind> {
    ALGORITHMS
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(normalize(name), kind)
}

/// Find the algorithm registered under `name`.
pub fn lookup(name: &str) -> Result<AlgorithmKind> {
    ALGORITHMS
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&normalize(name))
        .copied()
        .ok_or_else(|| SearchError::UnknownAlgorithm(name.to_string()))
}

/// Every registered name, sorted.
pub fn names() -> Vec<String> {
    let mut names: Vec<String> = ALGORITHMS
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .keys()
        .cloned()
        .collect();
    names.sort();
    names
}

#[cfg(test)]
mod test {
    use std::thread;

    use super::*;

    #[test]
    fn defaults() {
        assert_eq!(lookup("astar"), Ok(AlgorithmKind::AStar));
        assert_eq!(lookup("A*"), Ok(AlgorithmKind::AStar));
        assert_eq!(lookup(" RBFS "), Ok(AlgorithmKind::RecursiveBestFirst));
        assert_eq!(
            lookup("ida*"),
            Ok(AlgorithmKind::IterativeDeepeningAStar)
        );
        for kind in AlgorithmKind::ALL.iter() {
            assert_eq!(lookup(kind.name()), Ok(*kind));
            assert_eq!(kind.name().parse::<AlgorithmKind>(), Ok(*kind));
        }
    }

    #[test]
    fn unknown() {
        assert_eq!(
            lookup("dijkstra"),
            Err(SearchError::UnknownAlgorithm("dijkstra".to_string()))
        );
    }

    #[test]
    fn concurrent_registration() {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                thread::spawn(move || {
                    let name = format!("greedy-{}", i);
                    register(&name, AlgorithmKind::BestFirst);
                    lookup(&name)
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), Ok(AlgorithmKind::BestFirst));
        }
        assert!(names().contains(&"greedy-3".to_string()));
        assert!(names().contains(&"astar".to_string()));
    }
}
