//! Integer points and half-open rectangles.

use std::fmt;

/// A pixel coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0, y: 0 };

    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn add(self, p: Point) -> Point {
        Point::new(self.x + p.x, self.y + p.y)
    }

    #[inline]
    pub const fn sub(self, p: Point) -> Point {
        Point::new(self.x - p.x, self.y - p.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// An axis-aligned rectangle containing the points with
/// `min.x <= x < max.x` and `min.y <= y < max.y`.
///
/// A rectangle is well-formed when `min <= max` on both axes;
/// [`Rectangle::new`] guarantees that. Operations that can produce an empty
/// result return [`Rectangle::ZERO`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rectangle {
    pub min: Point,
    pub max: Point,
}

impl Rectangle {
    pub const ZERO: Rectangle = Rectangle {
        min: Point::ZERO,
        max: Point::ZERO,
    };

    /// Rectangle spanning `(x0, y0)` to `(x1, y1)`; swapped corners are
    /// reordered.
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        let (x0, x1) = if x0 > x1 { (x1, x0) } else { (x0, x1) };
        let (y0, y1) = if y0 > y1 { (y1, y0) } else { (y0, y1) };
        Self {
            min: Point::new(x0, y0),
            max: Point::new(x1, y1),
        }
    }

    /// Rectangle anchored at the origin with the given size.
    #[inline]
    pub fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width as i32, height as i32)
    }

    #[inline]
    pub fn dx(&self) -> i32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn dy(&self) -> i32 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y
    }

    /// Number of pixels covered; zero when empty.
    #[inline]
    pub fn area(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            self.dx() as usize * self.dy() as usize
        }
    }

    #[inline]
    pub fn add(self, p: Point) -> Rectangle {
        Rectangle {
            min: self.min.add(p),
            max: self.max.add(p),
        }
    }

    #[inline]
    pub fn sub(self, p: Point) -> Rectangle {
        Rectangle {
            min: self.min.sub(p),
            max: self.max.sub(p),
        }
    }

    /// The largest rectangle contained by both; [`Rectangle::ZERO`] if they
    /// do not overlap.
    pub fn intersect(self, s: Rectangle) -> Rectangle {
        let r = Rectangle {
            min: Point::new(self.min.x.max(s.min.x), self.min.y.max(s.min.y)),
            max: Point::new(self.max.x.min(s.max.x), self.max.y.min(s.max.y)),
        };
        if r.is_empty() {
            Rectangle::ZERO
        } else {
            r
        }
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.min.x <= p.x && p.x < self.max.x && self.min.y <= p.y && p.y < self.max.y
    }

    /// Whether both rectangles cover the same points. All empty rectangles
    /// cover the same (empty) set.
    pub fn same_area(&self, s: &Rectangle) -> bool {
        self == s || (self.is_empty() && s.is_empty())
    }
}

impl fmt::Display for Rectangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}
