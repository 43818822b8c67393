//! Shared geometry primitives: integer points and rectangles for pixel
//! work, float points for fitted lines, plus the orientation machinery
//! that lets one algorithm serve both horizontal and vertical views.

use serde::{Deserialize, Serialize};

/// An integer pixel location (absolute coordinates).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A point with floating-point coordinates (line endpoints, centroids).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointF {
    pub x: f64,
    pub y: f64,
}

impl PointF {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Round to the nearest integer pixel.
    pub fn rounded(&self) -> Point {
        Point::new(self.x.round() as i32, self.y.round() as i32)
    }
}

impl From<Point> for PointF {
    fn from(p: Point) -> Self {
        PointF::new(p.x as f64, p.y as f64)
    }
}

/// An axis-aligned integer rectangle (absolute coordinates).
/// `width`/`height` count pixels, so a 1×1 rectangle covers one pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Abscissa just past the right edge.
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Ordinate just past the bottom edge.
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    /// Smallest rectangle covering both operands.
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect::new(x, y, right - x, bottom - y)
    }

    /// Overlap of both operands; empty (width or height ≤ 0) when disjoint.
    pub fn intersection(&self, other: &Rect) -> Rect {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Rect::new(x, y, right - x, bottom - y)
    }

    /// Expand by `dx` on the left and right, `dy` on the top and bottom.
    pub fn grown(&self, dx: i32, dy: i32) -> Rect {
        Rect::new(
            self.x - dx,
            self.y - dy,
            self.width + (2 * dx),
            self.height + (2 * dy),
        )
    }

    /// Geometric center of the box, rounded down like the original.
    pub fn center(&self) -> Point {
        Point::new(self.x + (self.width / 2), self.y + (self.height / 2))
    }
}

/// The two axis orientations a run table or lag can have.
///
/// In oriented coordinates, `coord` runs along the orientation axis and
/// `pos` across it: for a horizontal view `(coord, pos) = (x, y)`, for a
/// vertical view the roles are swapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Translate an oriented (coord, pos) pair to an absolute point.
    pub fn absolute(&self, coord: i32, pos: i32) -> Point {
        match self {
            Orientation::Horizontal => Point::new(coord, pos),
            Orientation::Vertical => Point::new(pos, coord),
        }
    }

    /// Translate an absolute point to its oriented (coord, pos) pair.
    pub fn oriented(&self, p: Point) -> (i32, i32) {
        match self {
            Orientation::Horizontal => (p.x, p.y),
            Orientation::Vertical => (p.y, p.x),
        }
    }

    /// Translate an absolute rectangle to oriented axes.
    pub fn oriented_rect(&self, r: &Rect) -> Rect {
        match self {
            Orientation::Horizontal => *r,
            Orientation::Vertical => Rect::new(r.y, r.x, r.height, r.width),
        }
    }

    /// Translate an oriented rectangle back to absolute axes.
    pub fn absolute_rect(&self, r: &Rect) -> Rect {
        // Same swap in both directions
        self.oriented_rect(r)
    }

    pub fn opposite(&self) -> Orientation {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }
}

/// Left or right side of a glyph (stem attachment).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HorizontalSide {
    Left,
    Right,
}

impl HorizontalSide {
    pub const SIDES: [HorizontalSide; 2] = [HorizontalSide::Left, HorizontalSide::Right];

    pub(crate) fn index(&self) -> usize {
        match self {
            HorizontalSide::Left => 0,
            HorizontalSide::Right => 1,
        }
    }
}

/// An approximating circle fitted to a glyph (slur candidates).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: PointF,
    pub radius: f64,
    /// Mean fitting distance, for acceptance thresholds downstream.
    pub distance: f64,
}
