//! Rectangular maps read from text.
//!
//! `.` is open floor, `#` a wall, `S` the start and `G` the goal. Start
//! and goal squares are open floor too.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::coord2d::map::Map;
use crate::coord2d::path::Path;
use crate::coord2d::{BoundingBox, Point};
use crate::Position;

/// Error when reading a grid from text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseGridError {
    #[error("Unexpected map character {0:?} at {1}")]
    UnexpectedCharacter(char, Point),

    #[error("Row {row} has {found} squares, expected {expected}")]
    RaggedRow {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("Second start at {1}, first at {0}")]
    DuplicateStart(Point, Point),

    #[error("Second goal at {1}, first at {0}")]
    DuplicateGoal(Point, Point),

    #[error("Map is empty")]
    Empty,
}

/// A walled grid, optionally marked with a start and a goal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    walls: HashSet<Point>,
    bbox: BoundingBox,
    start: Option<Point>,
    goal: Option<Point>,
}

impl Grid {
    pub fn start(&self) -> Option<Point> {
        self.start
    }

    pub fn goal(&self) -> Option<Point> {
        self.goal
    }

    pub fn bbox(&self) -> BoundingBox {
        self.bbox
    }

    pub fn is_wall(&self, point: Point) -> bool {
        self.walls.contains(&point)
    }

    fn tile(&self, point: Point) -> char {
        if Some(point) == self.start {
            'S'
        } else if Some(point) == self.goal {
            'G'
        } else if self.is_wall(point) {
            '#'
        } else {
            '.'
        }
    }

    /// Draw the grid with the squares of `path` marked `o`. The start and
    /// goal keep their own marks.
    pub fn render_path(&self, path: &Path) -> String {
        let on_path: HashSet<Point> = path.iter().copied().collect();
        let mut rendered = String::new();
        for y in self.bbox.vertical() {
            for x in self.bbox.horizontal() {
                let point = Point::new(x, y);
                rendered.push(match self.tile(point) {
                    '.' if on_path.contains(&point) => 'o',
                    c => c,
                });
            }
            rendered.push('\n');
        }
        rendered
    }
}

impl FromStr for Grid {
    type Err = ParseGridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut walls = HashSet::new();
        let mut start = None;
        let mut goal = None;
        let mut width = None;
        let mut height = 0;

        let rows = s.lines().map(str::trim).filter(|line| !line.is_empty());
        for (y, line) in rows.enumerate() {
            let found = line.chars().count();
            match width {
                None => width = Some(found),
                Some(expected) if expected != found => {
                    return Err(ParseGridError::RaggedRow {
                        row: y,
                        found,
                        expected,
                    })
                }
                Some(_) => {}
            }

            for (x, c) in line.chars().enumerate() {
                let point: Point = (x, y).into();
                match c {
                    '.' => {}
                    '#' => {
                        walls.insert(point);
                    }
                    'S' => {
                        if let Some(first) = start.replace(point) {
                            return Err(ParseGridError::DuplicateStart(first, point));
                        }
                    }
                    'G' => {
                        if let Some(first) = goal.replace(point) {
                            return Err(ParseGridError::DuplicateGoal(first, point));
                        }
                    }
                    _ => return Err(ParseGridError::UnexpectedCharacter(c, point)),
                }
            }
            height = y + 1;
        }

        let width = width.ok_or(ParseGridError::Empty)?;
        if width == 0 {
            return Err(ParseGridError::Empty);
        }

        Ok(Grid {
            walls,
            bbox: BoundingBox::from_corners(
                Point::origin(),
                Point::new(width as Position - 1, height as Position - 1),
            ),
            start,
            goal,
        })
    }
}

impl Map for Grid {
    fn is_traversable(&self, location: Point) -> bool {
        self.bbox.contains(location) && !self.is_wall(location)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.bbox.printer(f, |f, p| write!(f, "{}", self.tile(*p)))
    }
}
