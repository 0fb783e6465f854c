//! Coordinate work in two dimensions.

use std::cmp;
use std::fmt;
use std::ops::{self, RangeInclusive};
use std::str::FromStr;

use itertools::iproduct;
use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

use crate::Position;

pub mod map;
pub mod path;
pub mod pathfinder;

/// A movement direction in two dimensions.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

const DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Left,
    Direction::Right,
    Direction::Down,
];

impl Direction {
    /// Enumerates all directions of movement in "reading order",
    /// i.e. such that the resulting points are in reading order
    /// from the current position.
    pub fn all() -> impl Iterator<Item = Self> {
        DIRECTIONS.iter().cloned()
    }
}

/// How a walker may move between squares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Moves {
    /// Up, down, left and right.
    Orthogonal,

    /// Orthogonal moves plus the four diagonals.
    Diagonal,
}

impl Default for Moves {
    fn default() -> Self {
        Moves::Orthogonal
    }
}

impl Moves {
    /// Points reachable in one move, in reading order.
    pub fn neighbours(self, point: Point) -> Vec<Point> {
        match self {
            Moves::Orthogonal => point.adjacent().collect(),
            Moves::Diagonal => {
                let mut points: Vec<Point> = point.adjacent_diagonal().collect();
                points.sort();
                points
            }
        }
    }

    /// Whether a single move joins `a` and `b`.
    pub fn connects(self, a: Point, b: Point) -> bool {
        match self {
            Moves::Orthogonal => a.is_adjacent(&b),
            Moves::Diagonal => a.chebyshev_distance(b) == 1,
        }
    }

    /// The fewest moves between two points on an open plane.
    pub fn distance(self, a: Point, b: Point) -> Position {
        match self {
            Moves::Orthogonal => a.manhattan_distance(b),
            Moves::Diagonal => a.chebyshev_distance(b),
        }
    }
}

/// A location in 2D space.
///
/// Essentially a 2-tuple of x and y position,
/// but with a lot of provided methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: Position,
    pub y: Position,
}

impl Point {
    /// Build a new point from coordinates.
    pub fn new(x: Position, y: Position) -> Self {
        Self { x, y }
    }

    /// Returns a point at (0, 0)
    pub fn origin() -> Self {
        Self { x: 0, y: 0 }
    }

    /// Compare this point to another in "reading order"
    /// which is y then x.
    pub fn reading_order(self, other: Point) -> cmp::Ordering {
        self.y.cmp(&other.y).then(self.x.cmp(&other.x)).reverse()
    }

    /// Step in a given direction.
    pub fn step(self, direction: Direction) -> Self {
        match direction {
            Direction::Left => Point::new(self.x - 1, self.y),
            Direction::Right => Point::new(self.x + 1, self.y),
            Direction::Up => Point::new(self.x, self.y - 1),
            Direction::Down => Point::new(self.x, self.y + 1),
        }
    }

    /// Iterate over all adjacent points.
    pub fn adjacent(self) -> impl Iterator<Item = Self> {
        Direction::all().map(move |d| self.step(d))
    }

    /// Check if a point is adjacent.
    pub fn is_adjacent(&self, point: &Point) -> bool {
        self.manhattan_distance(*point) == 1
    }

    /// Iterate over all diagonally adjacent points
    pub fn adjacent_diagonal(self) -> impl Iterator<Item = Self> {
        iproduct!(-1..2, -1..2)
            .filter(|(x, y)| !(*x == 0 && *y == 0))
            .map(move |(x, y)| Point::new(self.x + x, self.y + y))
    }

    /// Manhattan distance between two points is the distance along
    /// each coordinate
    pub fn manhattan_distance(self, other: Point) -> Position {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// The larger of the distances along each coordinate.
    pub fn chebyshev_distance(self, other: Point) -> Position {
        cmp::max((self.x - other.x).abs(), (self.y - other.y).abs())
    }

    /// What direction connects these two points?
    ///
    /// If they are not adjacent, return `None`.
    pub fn direction(self, other: Point) -> Option<Direction> {
        Direction::all().find(|&d| self.step(d) == other)
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::origin()
    }
}

impl ops::Add for Point {
    type Output = Point;

    fn add(self, other: Point) -> Self::Output {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl cmp::Ord for Point {
    fn cmp(&self, other: &Self) -> cmp::Ordering {
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}

impl cmp::PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

impl From<(Position, Position)> for Point {
    fn from(coordinates: (Position, Position)) -> Self {
        Self {
            x: coordinates.0,
            y: coordinates.1,
        }
    }
}

impl From<(usize, usize)> for Point {
    fn from(coordinates: (usize, usize)) -> Self {
        Self {
            x: coordinates.0 as Position,
            y: coordinates.1 as Position,
        }
    }
}

/// Error when parsing a point from string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParsePointError {
    #[error("Invalid Point: {}", _0)]
    InvalidLiteral(String),

    #[error("Invalid Number Literal")]
    InvalidNumber,
}

impl From<::std::num::ParseIntError> for ParsePointError {
    fn from(_: ::std::num::ParseIntError) -> Self {
        ParsePointError::InvalidNumber
    }
}

impl FromStr for Point {
    type Err = ParsePointError;

    /// Parse `x,y`, allowing whitespace after the comma.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lazy_static! {
            static ref RE: Regex = Regex::new(r"^\s*(?P<x>-?\d+),\s*(?P<y>-?\d+)\s*$").unwrap();
        };

        let cap = match RE.captures(s) {
            None => return Err(ParsePointError::InvalidLiteral(s.to_string())),
            Some(c) => c,
        };

        Ok(Self::new(cap["x"].parse()?, cap["y"].parse()?))
    }
}

/// A rectangle which encloses points and is aligned
/// with the coordinate axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    left: Position,
    right: Position,
    top: Position,
    bottom: Position,
}

impl BoundingBox {
    /// Create a bounding box which covers no points.
    pub fn empty() -> Self {
        Self {
            left: Position::max_value(),
            right: Position::min_value(),
            top: Position::max_value(),
            bottom: Position::min_value(),
        }
    }

    /// Create a bounding box from the top left and bottom right corners.
    pub fn from_corners(topleft: Point, bottomright: Point) -> Self {
        Self {
            left: cmp::min(topleft.x, bottomright.x),
            right: cmp::max(topleft.x, bottomright.x),
            top: cmp::min(topleft.y, bottomright.y),
            bottom: cmp::max(topleft.y, bottomright.y),
        }
    }

    /// Grow this bounding box to include a given point.
    pub fn include(&mut self, point: Point) -> bool {
        let before = *self;
        self.left = cmp::min(self.left, point.x);
        self.right = cmp::max(self.right, point.x);
        self.top = cmp::min(self.top, point.y);
        self.bottom = cmp::max(self.bottom, point.y);
        before != *self
    }

    /// Construct a bounding box from an iterator of points.
    pub fn from_points<'a>(points: impl Iterator<Item = &'a Point>) -> Self {
        let mut bbox = Self::empty();
        for point in points {
            bbox.include(*point);
        }
        bbox
    }

    pub fn is_empty(&self) -> bool {
        self.left > self.right || self.top > self.bottom
    }

    /// Range of vertical positions
    pub fn vertical(&self) -> RangeInclusive<Position> {
        self.top..=self.bottom
    }

    /// Range of horizontal positions
    pub fn horizontal(&self) -> RangeInclusive<Position> {
        self.left..=self.right
    }

    /// Check if a point is contained within this bounding
    /// box, including the edges.
    pub fn contains(&self, point: Point) -> bool {
        self.horizontal().contains(&point.x) && self.vertical().contains(&point.y)
    }

    /// Width for this box.
    pub fn width(&self) -> Position {
        if self.is_empty() {
            0
        } else {
            self.right - self.left + 1
        }
    }

    /// Height for this box.
    pub fn height(&self) -> Position {
        if self.is_empty() {
            0
        } else {
            self.bottom - self.top + 1
        }
    }

    pub fn left(&self) -> Position {
        self.left
    }

    pub fn right(&self) -> Position {
        self.right
    }

    pub fn top(&self) -> Position {
        self.top
    }

    pub fn bottom(&self) -> Position {
        self.bottom
    }

    /// Iterate through all the points contained in this
    /// bounding box, in reading order.
    pub fn points(&self) -> impl Iterator<Item = Point> {
        iproduct!(self.vertical(), self.horizontal()).map(|(y, x)| Point::new(x, y))
    }

    /// Call a function which should write a single character at every position
    /// in this bounding box.
    ///
    /// This function will handle newlines. The callback should print
    /// a single character for each point.
    pub fn printer<F>(&self, f: &mut fmt::Formatter, cb: F) -> fmt::Result
    where
        F: Fn(&mut fmt::Formatter, &Point) -> fmt::Result,
    {
        for y in self.vertical() {
            for x in self.horizontal() {
                cb(f, &Point::new(x, y))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point() {
        let point = Point::new(1, 1);

        assert_eq!(point.step(Direction::Up), Point::new(1, 0));
        assert_eq!(point.step(Direction::Down), Point::new(1, 2));
        assert_eq!(point.step(Direction::Left), Point::new(0, 1));
        assert_eq!(point.step(Direction::Right), Point::new(2, 1));
        assert_eq!(point.direction(Point::new(1, 0)), Some(Direction::Up));
        assert_eq!(point.direction(Point::new(0, 0)), None);

        assert_eq!(&point.to_string(), "1,1");
    }

    #[test]
    fn parse_point() {
        assert_eq!("3,4".parse::<Point>(), Ok(Point::new(3, 4)));
        assert_eq!(" -2, 7 ".parse::<Point>(), Ok(Point::new(-2, 7)));
        assert_eq!(
            "3;4".parse::<Point>(),
            Err(ParsePointError::InvalidLiteral("3;4".to_string()))
        );
        assert_eq!(
            "99999999999,1".parse::<Point>(),
            Err(ParsePointError::InvalidNumber)
        );
    }

    #[test]
    fn moves() {
        let point = Point::new(1, 1);

        assert_eq!(
            Moves::Orthogonal.neighbours(point),
            vec![
                Point::new(1, 0),
                Point::new(0, 1),
                Point::new(2, 1),
                Point::new(1, 2)
            ]
        );

        assert_eq!(
            Moves::Diagonal.neighbours(point),
            vec![
                Point::new(0, 0),
                Point::new(1, 0),
                Point::new(2, 0),
                Point::new(0, 1),
                Point::new(2, 1),
                Point::new(0, 2),
                Point::new(1, 2),
                Point::new(2, 2)
            ]
        );

        assert!(Moves::Diagonal.connects(point, Point::new(2, 2)));
        assert!(!Moves::Orthogonal.connects(point, Point::new(2, 2)));
        assert!(!Moves::Diagonal.connects(point, point));
        assert_eq!(Moves::Orthogonal.distance(point, Point::new(3, 4)), 5);
        assert_eq!(Moves::Diagonal.distance(point, Point::new(3, 4)), 3);
    }

    #[test]
    fn bbox() {
        let mut bbox = BoundingBox::empty();
        assert!(bbox.is_empty());
        assert_eq!(bbox.width(), 0);

        let point = Point::new(1, 2);

        assert!(bbox.include(point));
        assert!(!bbox.include(point));
        assert_eq!(bbox.width(), 1);
        assert_eq!(bbox.height(), 1);
        assert_eq!(bbox.horizontal(), 1..=1);
        assert_eq!(bbox.vertical(), 2..=2);

        bbox.include(Point::new(2, 3));
        assert_eq!(bbox, BoundingBox::from_corners(Point::new(2, 3), point));
        assert!(bbox.contains(Point::new(2, 2)));
        assert!(!bbox.contains(Point::new(0, 2)));

        assert_eq!(
            bbox.points().collect::<Vec<_>>(),
            vec![
                Point::new(1, 2),
                Point::new(2, 2),
                Point::new(1, 3),
                Point::new(2, 3)
            ]
        );
    }
}
