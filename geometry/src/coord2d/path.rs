//! Path data structures
//!
//! A path is a sequence of points in a 2D geometry, each one move
//! away from the last.

use std::ops::Deref;

use thiserror::Error;

use super::{Direction, Moves, Point};

/// Error returned for invalid paths
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    /// A new step added to this path was not adjacent to the
    /// previous step.
    #[error("{0} is not adjacent to the end of the path {1}")]
    NotAdjacentSequence(Point, Point),

    #[error("a path needs at least one point")]
    Empty,
}

type PathResult<T> = Result<T, PathError>;

/// A sequence of adjacent points in a 2D geometry.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Path {
    steps: Vec<Point>,
    moves: Moves,
}

impl Path {
    /// Construct a new path which starts from this point.
    pub fn new(origin: Point) -> Self {
        Self::with_moves(origin, Moves::Orthogonal)
    }

    /// Construct a path starting at `origin` which may only grow by `moves`.
    pub fn with_moves(origin: Point, moves: Moves) -> Self {
        Path {
            steps: vec![origin],
            moves,
        }
    }

    /// Build a path from a sequence of points, checking each one
    /// follows from the last.
    pub fn from_points<I>(points: I, moves: Moves) -> PathResult<Self>
    where
        I: IntoIterator<Item = Point>,
    {
        let mut points = points.into_iter();
        let origin = points.next().ok_or(PathError::Empty)?;
        points.try_fold(Path::with_moves(origin, moves), |path, point| {
            path.step_to(point)
        })
    }

    /// Return a copy of this path, but reversed.
    pub fn reversed(&self) -> Self {
        let mut steps = self.steps.clone();
        steps.reverse();
        Path {
            steps,
            moves: self.moves,
        }
    }

    /// Return a new path after taking a step in a particular direction.
    pub fn step(mut self, direction: Direction) -> Self {
        let next = self.destination().step(direction);
        self.steps.push(next);
        self
    }

    /// Return a new path after stepping to a particular point.
    pub fn step_to(mut self, point: Point) -> PathResult<Self> {
        let end = *self.destination();
        if !self.moves.connects(end, point) {
            return Err(PathError::NotAdjacentSequence(point, end));
        }

        self.steps.push(point);
        Ok(self)
    }

    pub fn moves(&self) -> Moves {
        self.moves
    }

    /// Where this path started
    pub fn origin(&self) -> &Point {
        &self.steps[0]
    }

    /// Where this path ends
    pub fn destination(&self) -> &Point {
        &self.steps[self.steps.len() - 1]
    }

    /// How many moves this path takes.
    pub fn distance(&self) -> usize {
        self.steps.len() - 1
    }

    /// What is the last direction in this path? Diagonal moves have none.
    pub fn last_direction(&self) -> Option<Direction> {
        match self.steps.as_slice() {
            [.., penultimate, last] => penultimate.direction(*last),
            _ => None,
        }
    }
}

impl Deref for Path {
    type Target = [Point];

    fn deref(&self) -> &Self::Target {
        &self.steps
    }
}
