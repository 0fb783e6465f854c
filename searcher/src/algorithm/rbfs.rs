//! Recursive best-first search.
//!
//! Descends into the best child with a local bound set by the best of
//! its siblings (or the parent's bound, if that is tighter), ordering by
//! factor alone. A child which turns out to be a dead end is dropped
//! rather than re-ranked with a backed-up value. A child whose subtree is
//! cut off by its bound is replaced among its siblings by the nodes left
//! waiting below it, so the next descent resumes from the best of those.

use std::cmp::Ordering;

use super::frontier::StepSet;
use super::{Conclusion, Run};
use crate::comparer::{FactorOnly, NodeComparer};
use crate::node::NodeId;
use crate::observer::StateFlag;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Descent {
    Found(NodeId),

    /// The subtree is cut off. These unexplored nodes, best first, all
    /// sort after the bound.
    Cutoff(Vec<NodeId>),

    DeadEnd,
}

pub(crate) fn search<S, F>(run: &mut Run<'_, S, F>) -> Conclusion
where
    S: Clone,
{
    let comparer = FactorOnly::new(run.comparer());
    let mut roots = run.roots();
    roots.sort_by(|x, y| comparer.compare(x, y));

    let root = match roots.into_iter().next() {
        Some(best) => run.nodes.push(best),
        None => return Conclusion::NotFound(None),
    };

    let mut visited = StepSet::new(run.equality());
    match descend(run, &comparer, root, None, &mut visited) {
        Descent::Found(goal) => Conclusion::Found(goal),
        _ => Conclusion::NotFound(Some(root)),
    }
}

fn order<S, F, C>(run: &Run<'_, S, F>, comparer: &C, x: NodeId, y: NodeId) -> Ordering
where
    C: NodeComparer<F, S>,
{
    comparer.compare(&run.nodes[x], &run.nodes[y])
}

fn descend<S, F, C>(
    run: &mut Run<'_, S, F>,
    comparer: &C,
    current: NodeId,
    bound: Option<NodeId>,
    visited: &mut StepSet<'_, S>,
) -> Descent
where
    S: Clone,
    C: NodeComparer<F, S>,
{
    visited.insert(run.nodes[current].step().clone());
    if run.is_goal(run.nodes[current].step()) {
        return Descent::Found(current);
    }

    let mut children = run.expand(current);
    children.retain(|child| !visited.contains(child.step()));
    if children.is_empty() {
        return Descent::DeadEnd;
    }
    children.sort_by(|x, y| comparer.compare(x, y));
    let mut siblings: Vec<NodeId> = children.into_iter().map(|c| run.nodes.push(c)).collect();
    run.report(StateFlag::InProgress, Some(current), &siblings);

    while let Some(&best) = siblings.first() {
        // Reached through another branch since this list was built.
        if visited.contains(run.nodes[best].step()) {
            siblings.remove(0);
            continue;
        }

        if let Some(bound) = bound {
            if order(run, comparer, best, bound) == Ordering::Greater {
                return Descent::Cutoff(siblings);
            }
        }

        let local = match (siblings.get(1).copied(), bound) {
            (Some(second), Some(bound))
                if order(run, comparer, bound, second) == Ordering::Less =>
            {
                Some(bound)
            }
            (Some(second), _) => Some(second),
            (None, bound) => bound,
        };

        match descend(run, comparer, best, local, visited) {
            Descent::Found(goal) => return Descent::Found(goal),
            Descent::DeadEnd => {
                siblings.remove(0);
            }
            Descent::Cutoff(frontier) => {
                siblings.remove(0);
                for waiting in frontier {
                    let at = siblings
                        .iter()
                        .position(|&s| order(run, comparer, waiting, s) == Ordering::Less)
                        .unwrap_or_else(|| siblings.len());
                    siblings.insert(at, waiting);
                }
            }
        }
    }

    Descent::DeadEnd
}
