//! Pathfinding in two dimensions with any of the `searcher` algorithms.
use std::cmp::Ordering;
use std::rc::Rc;

use searcher::{
    AlgorithmKind, Node, NodeComparer, SearchBuilder, SearchError, SearchOptions, SearchOutcome,
};
use thiserror::Error;
use tracing::debug;

pub use super::map::Map;
pub use super::path::{Path, PathError};
use super::{Moves, Point};
use crate::Position;

/// Failures while looking for a path. An unreachable destination is
/// not a failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathfinderError {
    #[error(transparent)]
    Search(#[from] SearchError),

    #[error("search produced an invalid path: {0}")]
    InvalidPath(#[from] PathError),
}

/// Orders squares by moves taken plus the fewest moves remaining, then
/// by the moves remaining alone.
#[derive(Debug, Clone, Copy)]
struct TravelCost {
    destination: Point,
    moves: Moves,
}

impl TravelCost {
    fn remaining(&self, point: &Point) -> Position {
        self.moves.distance(*point, self.destination)
    }

    fn estimate(&self, node: &Node<Point, Point>) -> Position {
        node.level() as Position + self.remaining(node.factor())
    }
}

impl NodeComparer<Point, Point> for TravelCost {
    fn compare_factor(&self, x: &Point, y: &Point) -> Ordering {
        self.remaining(x).cmp(&self.remaining(y))
    }

    fn rank(&self, x: &Node<Point, Point>, y: &Node<Point, Point>) -> Ordering {
        self.estimate(x)
            .cmp(&self.estimate(y))
            .then_with(|| self.compare_factor(x.factor(), y.factor()))
    }
}

/// Implements pathfinding for a map.
#[derive(Debug, Clone)]
pub struct Pathfinder<M> {
    map: Rc<M>,
    algorithm: AlgorithmKind,
    moves: Moves,
    options: SearchOptions,
}

impl<M> Pathfinder<M>
where
    M: Map + 'static,
{
    /// Construct a new pathfinder using A* and orthogonal moves.
    pub fn new(map: M) -> Self {
        Self {
            map: Rc::new(map),
            algorithm: AlgorithmKind::AStar,
            moves: Moves::Orthogonal,
            options: SearchOptions::default(),
        }
    }

    pub fn algorithm(mut self, algorithm: AlgorithmKind) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Allow diagonal moves.
    pub fn diagonal(mut self, diagonal: bool) -> Self {
        self.moves = if diagonal {
            Moves::Diagonal
        } else {
            Moves::Orthogonal
        };
        self
    }

    pub fn options(mut self, options: SearchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    /// Run the configured algorithm between two points.
    pub fn search(
        &self,
        origin: Point,
        destination: Point,
    ) -> Result<SearchOutcome<Point, Point>, PathfinderError> {
        let map = Rc::clone(&self.map);
        let moves = self.moves;
        let search = SearchBuilder::new(origin, destination)
            .expand(move |point: &Point, _level: usize| {
                moves
                    .neighbours(*point)
                    .into_iter()
                    .filter(|next| map.is_traversable(*next))
                    .collect()
            })
            .order_by(TravelCost { destination, moves })
            .options(self.options.clone())
            .build()?;

        Ok(search.run(self.algorithm))
    }

    /// Find a path between the origin and destination given.
    ///
    /// When no path exists and the search is exhausted, return None.
    pub fn find_path(
        &self,
        origin: Point,
        destination: Point,
    ) -> Result<Option<Path>, PathfinderError> {
        if !self.map.is_traversable(origin) || !self.map.is_traversable(destination) {
            debug!(%origin, %destination, "endpoint is not traversable");
            return Ok(None);
        }

        let outcome = self.search(origin, destination)?;
        if !outcome.is_found() {
            return Ok(None);
        }
        debug!(
            algorithm = %self.algorithm,
            expansions = outcome.expansions(),
            distance = outcome.len() - 1,
            "found path"
        );
        Ok(Some(Path::from_points(outcome.steps(), self.moves)?))
    }
}
