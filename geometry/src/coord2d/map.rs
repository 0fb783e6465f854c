//! Trait to define a map suitable for pathfinding
//! on a 2D coordinate grid.
use std::fmt;

use super::path::Path;
use super::pathfinder::Pathfinder;
use super::Point;

/// Defines a map of locations on a coordinate grid.
///
/// The storage of the map is left to the implementing
/// structure, this trait simply requires a map to
/// return whether a given location is traversable.
pub trait Map: fmt::Debug {
    /// Can the walker step on this location on the path?
    fn is_traversable(&self, location: Point) -> bool;

    /// Build a re-usable pathfinder for this map
    fn pathfinder(&self) -> Pathfinder<Self>
    where
        Self: Clone + Sized + 'static,
    {
        Pathfinder::new(self.clone())
    }

    /// Find a path with A* and orthogonal moves.
    fn path(&self, origin: Point, destination: Point) -> Option<Path>
    where
        Self: Clone + Sized + 'static,
    {
        self.pathfinder()
            .find_path(origin, destination)
            .ok()
            .flatten()
    }
}
