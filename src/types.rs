//! Core value types shared by every layer.

use std::fmt;

use glam::DVec2;

/// A point (or vector) in the drawing plane. +x is right, +y is up.
pub type Point = DVec2;

/// Shorthand constructor for a [`Point`].
#[inline]
pub const fn pt(x: f64, y: f64) -> Point {
    DVec2::new(x, y)
}

/// Displays a point as `(x,y)` using the shortest round-trip float formatting.
#[derive(Clone, Copy)]
pub struct DisplayPoint(pub Point);

impl fmt::Display for DisplayPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.0.x, self.0.y)
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Point,
    pub max: Point,
}

impl BoundingBox {
    /// An empty box: expanding it by any point yields that point.
    pub fn new() -> Self {
        Self {
            min: pt(f64::INFINITY, f64::INFINITY),
            max: pt(f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point>) -> Self {
        let mut bounds = Self::new();
        for p in points {
            bounds.expand(*p);
        }
        bounds
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    pub fn expand(&mut self, p: Point) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    pub fn center(&self) -> Point {
        (self.min + self.max) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Corners in bottom-left, bottom-right, top-right, top-left order.
    pub fn corners(&self) -> [Point; 4] {
        [
            self.min,
            pt(self.max.x, self.min.y),
            self.max,
            pt(self.min.x, self.max.y),
        ]
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::new()
    }
}
