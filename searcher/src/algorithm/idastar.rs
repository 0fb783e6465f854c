//! Iterative-deepening A*.
//!
//! Each iteration is a depth-first sweep which refuses to go past a
//! bound node. Nodes which sort after the bound are collected, and the
//! least of them becomes the bound for the next iteration. "Past the
//! bound" is decided by the node comparer, so the bound is a node
//! rather than a number.
//!
//! One visited set is shared by a whole sweep. This prunes cycles, but
//! also means a step reached first by a longer route within a sweep is
//! not revisited by a shorter one until a later iteration, if at all.

use std::cmp::Ordering;

use tracing::{debug, warn};

use super::frontier::StepSet;
use super::{Conclusion, Run};
use crate::comparer::NodeComparer;
use crate::node::{Node, NodeId};
use crate::observer::StateFlag;

/// Result of sweeping below one node.
#[derive(Debug)]
enum Sweep<F, S> {
    Found(NodeId),

    /// The least node found past the bound.
    Cutoff(Node<F, S>),

    Exhausted,
}

pub(crate) fn search<S, F>(run: &mut Run<'_, S, F>) -> Conclusion
where
    S: Clone,
    F: Clone,
{
    let comparer = run.comparer();
    let mut roots = run.roots();
    roots.sort_by(|x, y| comparer.compare(x, y));

    let mut bound = match roots.first() {
        Some(best) => best.detached(),
        None => return Conclusion::NotFound(None),
    };

    let max_iterations = run.search().options().max_iterations;
    for iteration in 0..max_iterations {
        run.nodes.clear();
        let mut visited = StepSet::new(run.equality());
        let mut cutoff: Option<Node<F, S>> = None;

        for root in &roots {
            let id = run.nodes.push(root.clone());
            let mark = run.nodes.len();
            match sweep(run, id, &bound, &mut visited) {
                Sweep::Found(goal) => return Conclusion::Found(goal),
                Sweep::Cutoff(node) => cutoff = Some(least(comparer, cutoff, node)),
                Sweep::Exhausted => {}
            }
            run.nodes.truncate(mark);
        }

        match cutoff {
            Some(next) => {
                debug!(iteration, level = next.level(), visited = visited.len(), "raising bound");
                bound = next;
            }
            None => {
                debug!(iteration, visited = visited.len(), "search space exhausted");
                return Conclusion::NotFound(first_root(run));
            }
        }
    }

    warn!(max_iterations, "iteration limit reached without finding the goal");
    Conclusion::NotFound(first_root(run))
}

fn first_root<S, F>(run: &Run<'_, S, F>) -> Option<NodeId> {
    run.nodes.ids().next()
}

fn least<F, S>(comparer: &dyn NodeComparer<F, S>, best: Option<Node<F, S>>, node: Node<F, S>) -> Node<F, S> {
    match best {
        Some(best) if comparer.compare(&node, &best) != Ordering::Less => best,
        _ => node,
    }
}

fn sweep<S, F>(
    run: &mut Run<'_, S, F>,
    current: NodeId,
    bound: &Node<F, S>,
    visited: &mut StepSet<'_, S>,
) -> Sweep<F, S>
where
    S: Clone,
    F: Clone,
{
    let comparer = run.comparer();
    {
        let node = &run.nodes[current];
        if visited.contains(node.step()) {
            return Sweep::Exhausted;
        }
        if comparer.compare(node, bound) == Ordering::Greater {
            return Sweep::Cutoff(node.detached());
        }
        if run.is_goal(node.step()) {
            return Sweep::Found(current);
        }
        visited.insert(node.step().clone());
    }

    let mut children = run.expand(current);
    children.sort_by(|x, y| comparer.compare(x, y));
    let ids: Vec<NodeId> = children.into_iter().map(|c| run.nodes.push(c)).collect();
    let mark = run.nodes.len();
    run.report(StateFlag::InProgress, Some(current), &ids);

    let mut cutoff = None;
    for id in ids {
        match sweep(run, id, bound, visited) {
            Sweep::Found(goal) => return Sweep::Found(goal),
            Sweep::Cutoff(node) => cutoff = Some(least(comparer, cutoff, node)),
            Sweep::Exhausted => {}
        }
        // Everything below this child is finished with.
        run.nodes.truncate(mark);
    }

    match cutoff {
        Some(node) => Sweep::Cutoff(node),
        None => Sweep::Exhausted,
    }
}

#[cfg(test)]
mod test {
    use crate::comparer::KeyComparer;
    use crate::search::{SearchBuilder, SearchOptions};
    use crate::testing::*;
    use crate::StateFlag;

    #[test]
    fn open_grid() {
        let grid = Grid::open(3, 3);
        let search = grid_search(&grid, (0, 0), (2, 2)).build().unwrap();
        let outcome = search.idastar();

        assert_eq!(outcome.len(), 5);
        assert_path(&grid, &outcome.steps(), (0, 0), (2, 2));
    }

    /// Ordering by level makes the bound a depth limit, so each
    /// iteration looks one step further.
    #[test]
    fn bound_escalates_by_level() {
        let grid = Grid::open(4, 1);
        let recorder = Recorder::default();
        let search = recorder
            .attach(grid_search(&grid, (0, 0), (3, 0)).order_by(KeyComparer::new(|_: &Square| 0)))
            .build()
            .unwrap();
        let outcome = search.idastar();

        assert_eq!(outcome.steps(), vec![(0, 0), (1, 0), (2, 0), (3, 0)]);
        // Iterations expand 1, 2 and 3 nodes before the goal is in bounds,
        // and the last reaches it after expanding 3 more.
        assert_eq!(recorder.count(StateFlag::InProgress), 1 + 2 + 3 + 3);
        assert_eq!(recorder.count(StateFlag::Found), 1);
    }

    #[test]
    fn iteration_limit_reports_not_found() {
        let grid = Grid::open(4, 1);
        let recorder = Recorder::default();
        let options = SearchOptions {
            max_iterations: 2,
            ..SearchOptions::default()
        };
        let search = recorder
            .attach(
                grid_search(&grid, (0, 0), (3, 0))
                    .order_by(KeyComparer::new(|_: &Square| 0))
                    .options(options),
            )
            .build()
            .unwrap();
        let outcome = search.idastar();

        assert!(!outcome.is_found());
        assert_eq!(recorder.count(StateFlag::NotFound), 1);
        assert_eq!(recorder.count(StateFlag::Found), 0);
        assert_eq!(recorder.terminal_node_present(), Some(true));
    }

    /// The visited set is shared across a sweep, so a step first reached
    /// by a long route is not revisited by a short one. Here 1 is reached
    /// through 2 before the direct edge from 0 is tried, so the goal only
    /// comes into bounds along the longer route.
    #[test]
    fn shared_visited_set_lengthens_paths() {
        let edges = |s: &u8, _level: usize| match s {
            0 => vec![2, 1],
            2 => vec![1],
            1 => vec![3],
            _ => vec![],
        };
        let search = SearchBuilder::new(0u8, 3u8)
            .expand(edges)
            .order_by(KeyComparer::new(|_: &u8| 0))
            .build()
            .unwrap();

        assert_eq!(search.astar().steps(), vec![0, 1, 3]);
        assert_eq!(search.idastar().steps(), vec![0, 2, 1, 3]);
    }
}
