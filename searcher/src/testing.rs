//! Small grid worlds for exercising the algorithms.

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::Rc;

use crate::comparer::KeyComparer;
use crate::observer::{AlgorithmState, StateFlag};
use crate::search::SearchBuilder;

pub(crate) type Square = (i32, i32);

pub(crate) fn manhattan(a: Square, b: Square) -> i32 {
    (a.0 - b.0).abs() + (a.1 - b.1).abs()
}

/// A rectangular grid with walls. Moves are up, left, right, down.
#[derive(Debug, Clone, Default)]
pub(crate) struct Grid {
    width: i32,
    height: i32,
    walls: HashSet<Square>,
}

impl Grid {
    pub(crate) fn open(width: i32, height: i32) -> Self {
        Grid {
            width,
            height,
            walls: HashSet::new(),
        }
    }

    /// Parse `.` and `#` rows. Blank lines and indentation are ignored.
    pub(crate) fn parse(text: &str) -> Self {
        let mut grid = Grid::default();
        for (y, line) in text.lines().map(str::trim).filter(|l| !l.is_empty()).enumerate() {
            for (x, c) in line.chars().enumerate() {
                if c == '#' {
                    grid.walls.insert((x as i32, y as i32));
                }
                grid.width = grid.width.max(x as i32 + 1);
            }
            grid.height = y as i32 + 1;
        }
        grid
    }

    pub(crate) fn with_walls(mut self, walls: impl IntoIterator<Item = Square>) -> Self {
        self.walls.extend(walls);
        self
    }

    pub(crate) fn is_open(&self, p: Square) -> bool {
        p.0 >= 0 && p.1 >= 0 && p.0 < self.width && p.1 < self.height && !self.walls.contains(&p)
    }

    pub(crate) fn neighbours(&self, p: Square) -> Vec<Square> {
        [(0, -1), (-1, 0), (1, 0), (0, 1)]
            .iter()
            .map(|(dx, dy)| (p.0 + dx, p.1 + dy))
            .filter(|&n| self.is_open(n))
            .collect()
    }
}

/// A search across `grid`, ordered by Manhattan distance to `to`.
pub(crate) fn grid_search(grid: &Grid, from: Square, to: Square) -> SearchBuilder<Square, Square> {
    let grid = grid.clone();
    SearchBuilder::new(from, to)
        .expand(move |p: &Square, _level: usize| grid.neighbours(*p))
        .order_by(KeyComparer::new(move |p: &Square| manhattan(*p, to)))
}

/// Counts calls to the expansion function.
#[derive(Debug, Clone, Default)]
pub(crate) struct Counter(Rc<Cell<usize>>);

impl Counter {
    pub(crate) fn get(&self) -> usize {
        self.0.get()
    }
}

pub(crate) fn counted_search(
    grid: &Grid,
    from: Square,
    to: Square,
    counter: &Counter,
) -> SearchBuilder<Square, Square> {
    let grid = grid.clone();
    let calls = counter.0.clone();
    grid_search(&grid, from, to).expand(move |p: &Square, _level: usize| {
        calls.set(calls.get() + 1);
        grid.neighbours(*p)
    })
}

/// Check that a path starts and ends where it should, and only
/// steps between adjacent open squares.
pub(crate) fn assert_path(grid: &Grid, steps: &[Square], from: Square, to: Square) {
    assert_eq!(steps.first(), Some(&from), "path {:?} does not start at {:?}", steps, from);
    assert_eq!(steps.last(), Some(&to), "path {:?} does not end at {:?}", steps, to);
    for pair in steps.windows(2) {
        assert!(
            grid.neighbours(pair[0]).contains(&pair[1]),
            "{:?} does not lead to {:?}",
            pair[0],
            pair[1]
        );
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Event {
    pub(crate) flag: StateFlag,
    pub(crate) has_node: bool,
    pub(crate) candidates: usize,
}

/// Records every report made to the observers it builds.
#[derive(Debug, Clone, Default)]
pub(crate) struct Recorder {
    events: Rc<RefCell<Vec<Event>>>,
    factories: Rc<Cell<usize>>,
}

impl Recorder {
    pub(crate) fn attach(&self, builder: SearchBuilder<Square, Square>) -> SearchBuilder<Square, Square> {
        let events = self.events.clone();
        let factories = self.factories.clone();
        builder.observe(move || {
            factories.set(factories.get() + 1);
            let events = events.clone();
            move |state: &AlgorithmState<'_, Square, Square>| {
                events.borrow_mut().push(Event {
                    flag: state.flag(),
                    has_node: state.node().is_some(),
                    candidates: state.candidates().len(),
                })
            }
        })
    }

    pub(crate) fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    pub(crate) fn flags(&self) -> Vec<StateFlag> {
        self.events().into_iter().map(|e| e.flag).collect()
    }

    pub(crate) fn count(&self, flag: StateFlag) -> usize {
        self.events().iter().filter(|e| e.flag == flag).count()
    }

    pub(crate) fn factory_calls(&self) -> usize {
        self.factories.get()
    }

    /// Whether the final report carried a node.
    pub(crate) fn terminal_node_present(&self) -> Option<bool> {
        self.events().last().map(|e| e.has_node)
    }

    pub(crate) fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}
