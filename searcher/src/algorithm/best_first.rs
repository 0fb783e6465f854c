//! Greedy best-first search.
//!
//! Shares the open list of A*, but orders by factor alone and expands
//! each step at most once: a step is claimed in the visited set the first
//! time it is generated, so later (possibly cheaper) routes to it are
//! ignored.

use crate::comparer::{FactorOnly, NodeComparer};

use super::frontier::{OpenList, StepSet};
use super::{Conclusion, Run};
use crate::observer::StateFlag;

pub(crate) fn search<S, F>(run: &mut Run<'_, S, F>) -> Conclusion
where
    S: Clone,
{
    let comparer = FactorOnly::new(run.comparer());
    let mut visited = StepSet::new(run.equality());
    let mut open = OpenList::new();

    for root in run.roots() {
        visited.insert(root.step().clone());
        let id = run.nodes.push(root);
        open.push(id, |x, y| comparer.compare(&run.nodes[x], &run.nodes[y]));
    }
    if open.is_exhausted() {
        return Conclusion::NotFound(None);
    }
    open.sort(|x, y| comparer.compare(&run.nodes[x], &run.nodes[y]));

    let mut last = None;
    while let Some(current) = open.peek() {
        last = Some(current);
        if run.is_goal(run.nodes[current].step()) {
            return Conclusion::Found(current);
        }

        open.advance();
        run.report(StateFlag::InProgress, Some(current), open.remaining());

        for child in run.expand(current) {
            if !visited.insert(child.step().clone()) {
                continue;
            }

            let goal = run.is_goal(child.step());
            let id = run.nodes.push(child);
            if goal {
                return Conclusion::Found(id);
            }
            open.push(id, |x, y| comparer.compare(&run.nodes[x], &run.nodes[y]));
        }
        open.settle(|x, y| comparer.compare(&run.nodes[x], &run.nodes[y]));
    }

    Conclusion::NotFound(last)
}

#[cfg(test)]
mod test {
    use crate::testing::*;
    use crate::StateFlag;

    #[test]
    fn open_grid() {
        let grid = Grid::open(3, 3);
        let search = grid_search(&grid, (0, 0), (2, 2)).build().unwrap();
        let outcome = search.best_first();

        assert_eq!(outcome.len(), 5);
        assert_path(&grid, &outcome.steps(), (0, 0), (2, 2));
    }

    #[test]
    fn each_step_expanded_once() {
        let grid = Grid::parse(
            "
            ....
            .##.
            .#..
            .#.#
            ",
        );
        let counter = Counter::default();
        let search = counted_search(&grid, (0, 0), (2, 3), &counter).build().unwrap();
        let outcome = search.best_first();

        assert_path(&grid, &outcome.steps(), (0, 0), (2, 3));
        let open = (0..4)
            .flat_map(|x| (0..4).map(move |y| (x, y)))
            .filter(|&p| grid.is_open(p))
            .count();
        assert!(counter.get() <= open);
    }

    #[test]
    fn goal_discovery_short_circuits() {
        // The goal is returned as soon as it is generated, without
        // waiting for it to reach the front of the open list.
        let grid = Grid::open(3, 1);
        let recorder = Recorder::default();
        let search = recorder
            .attach(grid_search(&grid, (1, 0), (2, 0)))
            .build()
            .unwrap();
        let outcome = search.best_first();

        assert_eq!(outcome.steps(), vec![(1, 0), (2, 0)]);
        assert_eq!(recorder.count(StateFlag::Found), 1);
        assert_eq!(recorder.count(StateFlag::InProgress), 1);
    }
}
