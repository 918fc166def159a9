//! Integer pixel geometry: points, rectangles, sides, and the circle test
//! used by the carver.
//!
//! Coordinates are `i32` so that bounds expansion can reason about offsets
//! without underflow; conversion to the `image` crate's `u32` space happens
//! at the extraction boundary only.

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A pixel coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle, `min` inclusive, `max` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            min: Point::new(x0, y0),
            max: Point::new(x1, y1),
        }
    }

    pub fn width(&self) -> i32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> i32 {
        self.max.y - self.min.y
    }

    /// Corner points in top-left, top-right, bottom-left, bottom-right order.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.min.x, self.min.y),
            Point::new(self.max.x, self.min.y),
            Point::new(self.min.x, self.max.y),
            Point::new(self.max.x, self.max.y),
        ]
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x < self.max.x && p.y >= self.min.y && p.y < self.max.y
    }

    /// True when `other` fits entirely inside `self`.
    pub fn encloses(&self, other: Rect) -> bool {
        other.min.x >= self.min.x
            && other.min.y >= self.min.y
            && other.max.x <= self.max.x
            && other.max.y <= self.max.y
    }
}

/// One side of a piece rectangle.
///
/// The numeric order doubles as the fixed carving order: Top, Right,
/// Bottom, Left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Top = 0,
    Right = 1,
    Bottom = 2,
    Left = 3,
}

impl Side {
    /// All sides in the fixed processing order.
    pub const ALL: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

    /// The side a neighbor presents across a shared boundary.
    pub fn opposite(self) -> Side {
        match self {
            Side::Top => Side::Bottom,
            Side::Right => Side::Left,
            Side::Bottom => Side::Top,
            Side::Left => Side::Right,
        }
    }
}

impl TryFrom<u8> for Side {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Error> {
        match value {
            0 => Ok(Side::Top),
            1 => Ok(Side::Right),
            2 => Ok(Side::Bottom),
            3 => Ok(Side::Left),
            other => Err(Error::InvalidJointSide(other)),
        }
    }
}

/// Pixel-center circle membership test.
///
/// The pixel at `(x, y)` covers the half-open unit square starting there;
/// its center is offset by 0.5 on each axis. Strict `<` keeps the boundary
/// ring outside the circle.
#[inline]
pub fn in_circle(x: i32, y: i32, center: Point, radius: i32) -> bool {
    let dx = f64::from(x - center.x) + 0.5;
    let dy = f64::from(y - center.y) + 0.5;
    let r = f64::from(radius);
    dx * dx + dy * dy < r * r
}
