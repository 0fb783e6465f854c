//! A* over an explicit open list, pruned by a closed set.

use super::frontier::{OpenList, StepSet};
use super::{Conclusion, Run};
use crate::observer::StateFlag;

pub(crate) fn search<S, F>(run: &mut Run<'_, S, F>) -> Conclusion
where
    S: Clone,
{
    let mut open = OpenList::new();
    for root in run.roots() {
        let id = run.nodes.push(root);
        open.push(id, |x, y| run.compare(x, y));
    }
    if open.is_exhausted() {
        return Conclusion::NotFound(None);
    }
    open.sort(|x, y| run.compare(x, y));

    let equality = run.equality();
    let mut closed = StepSet::new(equality);
    let mut last = None;

    while let Some(current) = open.peek() {
        last = Some(current);
        if run.is_goal(run.nodes[current].step()) {
            return Conclusion::Found(current);
        }

        open.advance();
        closed.insert(run.nodes[current].step().clone());
        run.report(StateFlag::InProgress, Some(current), open.remaining());

        for child in run.expand(current) {
            if closed.contains(child.step()) {
                continue;
            }
            let nodes = &run.nodes;
            if open.any(|&id| equality.equals(nodes[id].step(), child.step())) {
                continue;
            }

            let goal = run.is_goal(child.step());
            let id = run.nodes.push(child);
            if goal {
                return Conclusion::Found(id);
            }
            open.push(id, |x, y| run.compare(x, y));
        }
        open.settle(|x, y| run.compare(x, y));
    }

    Conclusion::NotFound(last)
}

#[cfg(test)]
mod test {
    use crate::comparer::{ComparerExt, FnComparer, NaturalOrder, NodeComparer};
    use crate::node::Node;
    use crate::testing::*;
    use crate::AlgorithmKind;

    #[test]
    fn open_grid() {
        let grid = Grid::open(3, 3);
        let search = grid_search(&grid, (0, 0), (2, 2)).build().unwrap();
        let outcome = search.astar();

        assert_eq!(outcome.algorithm(), AlgorithmKind::AStar);
        assert_eq!(outcome.len(), 5);
        assert_path(&grid, &outcome.steps(), (0, 0), (2, 2));
    }

    #[test]
    fn goal_found_as_neighbour_is_not_expanded() {
        let grid = Grid::open(2, 1);
        let counter = Counter::default();
        let search = counted_search(&grid, (0, 0), (1, 0), &counter).build().unwrap();

        let outcome = search.astar();
        assert_eq!(outcome.steps(), vec![(0, 0), (1, 0)]);
        assert_eq!(counter.get(), 1);
    }

    /// Ordering by path cost plus distance finds the shortest way around a wall.
    #[test]
    fn detour_is_shortest() {
        let grid = Grid::parse(
            "
            .....
            .###.
            ...#.
            .###.
            .....
            ",
        );

        struct Cost((i32, i32));

        impl NodeComparer<(i32, i32), (i32, i32)> for Cost {
            fn compare_factor(&self, x: &(i32, i32), y: &(i32, i32)) -> std::cmp::Ordering {
                manhattan(*x, self.0).cmp(&manhattan(*y, self.0))
            }

            fn rank(
                &self,
                x: &Node<(i32, i32), (i32, i32)>,
                y: &Node<(i32, i32), (i32, i32)>,
            ) -> std::cmp::Ordering {
                let f = |n: &Node<(i32, i32), (i32, i32)>| {
                    n.level() as i32 + manhattan(*n.factor(), self.0)
                };
                f(x).cmp(&f(y)).then_with(|| self.compare_factor(x.factor(), y.factor()))
            }
        }

        let search = grid_search(&grid, (2, 2), (4, 2))
            .order_by(Cost((4, 2)))
            .build()
            .unwrap();
        let outcome = search.astar();
        assert_path(&grid, &outcome.steps(), (2, 2), (4, 2));
        // Out of the pocket to the left, around the top, and down the right side.
        assert_eq!(outcome.len(), 11);

        // A tie-breaker keeps the cost ordering in charge.
        let tied = grid_search(&grid, (2, 2), (4, 2))
            .order_by(Cost((4, 2)))
            .then_by(NaturalOrder)
            .build()
            .unwrap();
        let tied = tied.astar();
        assert_path(&grid, &tied.steps(), (2, 2), (4, 2));
        assert_eq!(tied.len(), 11);
    }

    #[test]
    fn empty_conversion_is_not_found() {
        let grid = Grid::open(3, 3);
        let recorder = Recorder::default();
        let search = recorder
            .attach(grid_search(&grid, (0, 0), (2, 2)).filter(|p: &(i32, i32)| *p != (0, 0)))
            .build()
            .unwrap();

        let outcome = search.astar();
        assert!(!outcome.is_found());
        assert_eq!(outcome.expansions(), 0);
        assert_eq!(recorder.flags(), vec![crate::StateFlag::NotFound]);
        assert_eq!(recorder.terminal_node_present(), Some(false));
    }

    #[test]
    fn factor_only_closure_ordering() {
        // Orders purely by the sum of coordinates, so ties are left in
        // insertion order instead of by level.
        let grid = Grid::open(3, 3);
        let search = grid_search(&grid, (0, 0), (2, 2))
            .order_by(FnComparer::new(|x: &(i32, i32), y: &(i32, i32)| {
                (-(x.0 + x.1)).cmp(&-(y.0 + y.1))
            })
            .factor_only())
            .build()
            .unwrap();
        let outcome = search.astar();
        assert_path(&grid, &outcome.steps(), (0, 0), (2, 2));
    }
}
