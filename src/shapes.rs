//! Shape types
//!
//! Each shape is its own type that knows how to:
//! - Validate the points it is built from
//! - Calculate its center (the anchor for connectors)
//! - Describe its outline as a renderable [`Primitive`]
//!
//! Shapes are immutable: geometry is fixed at construction.

use enum_dispatch::enum_dispatch;

use crate::config::Tolerances;
use crate::errors::ValidationError;
use crate::geometry;
use crate::render::{Primitive, Style, defaults};
use crate::types::{BoundingBox, Point};

/// Common behavior for all shapes
#[enum_dispatch]
pub trait Shape {
    /// The registry key this shape was created under
    fn name(&self) -> &str;

    /// Human-readable kind ("Line", "Triangle", ...)
    fn kind(&self) -> &'static str;

    /// Stored outline points, in drawing order
    fn points(&self) -> &[Point];

    /// The point connectors attach to
    fn center(&self) -> Point;

    fn style(&self) -> Style;

    /// Closed outline through [`Shape::points`], labelled with the shape name
    fn primitive(&self) -> Primitive {
        Primitive::polygon(self.points().to_vec(), self.style()).with_label(self.name())
    }
}

/// The closed set of shape kinds the command language can build
#[enum_dispatch(Shape)]
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeKind {
    Line(LineShape),
    Triangle(TriangleShape),
    Rectangle(RectangleShape),
    Square(SquareShape),
}

// ============================================================================
// Shape Types
// ============================================================================

/// A straight segment between two endpoints
#[derive(Debug, Clone, PartialEq)]
pub struct LineShape {
    name: String,
    points: [Point; 2],
}

impl LineShape {
    /// Any two points make a line, including two equal ones.
    pub fn new(name: impl Into<String>, p1: Point, p2: Point) -> Self {
        Self {
            name: name.into(),
            points: [p1, p2],
        }
    }

    pub fn start(&self) -> Point {
        self.points[0]
    }

    pub fn end(&self) -> Point {
        self.points[1]
    }
}

impl Shape for LineShape {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> &'static str {
        "Line"
    }

    fn points(&self) -> &[Point] {
        &self.points
    }

    fn center(&self) -> Point {
        (self.points[0] + self.points[1]) / 2.0
    }

    fn style(&self) -> Style {
        defaults::line_style()
    }

    fn primitive(&self) -> Primitive {
        Primitive::segment(self.start(), self.end(), self.style()).with_label(&self.name)
    }
}

/// A triangle with non-collinear vertices
#[derive(Debug, Clone, PartialEq)]
pub struct TriangleShape {
    name: String,
    points: [Point; 3],
}

impl TriangleShape {
    pub fn new(
        name: impl Into<String>,
        p1: Point,
        p2: Point,
        p3: Point,
        tol: &Tolerances,
    ) -> Result<Self, ValidationError> {
        if geometry::are_collinear(p1, p2, p3, tol.collinear) {
            return Err(ValidationError::CollinearVertices);
        }
        Ok(Self {
            name: name.into(),
            points: [p1, p2, p3],
        })
    }
}

impl Shape for TriangleShape {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> &'static str {
        "Triangle"
    }

    fn points(&self) -> &[Point] {
        &self.points
    }

    fn center(&self) -> Point {
        let [a, b, c] = self.points;
        (a + b + c) / 3.0
    }

    fn style(&self) -> Style {
        defaults::triangle_style()
    }
}

/// An axis-aligned rectangle, corners stored bottom-left, bottom-right,
/// top-right, top-left
#[derive(Debug, Clone, PartialEq)]
pub struct RectangleShape {
    name: String,
    corners: [Point; 4],
}

impl RectangleShape {
    /// Rectangle spanned by two opposite corners.
    ///
    /// The corners must differ in both x and y, otherwise the rectangle would
    /// collapse to a line.
    pub fn from_diagonal(name: impl Into<String>, p1: Point, p2: Point) -> Result<Self, ValidationError> {
        if geometry::shares_axis(p1, p2) {
            return Err(ValidationError::DegenerateRectangleDiagonal);
        }
        Ok(Self {
            name: name.into(),
            corners: geometry::bounding_corners(&[p1, p2]),
        })
    }

    /// Rectangle from four corners in any order. The stored corners are the
    /// bounding box of the input, not the input order.
    pub fn from_corners(
        name: impl Into<String>,
        corners: [Point; 4],
        tol: &Tolerances,
    ) -> Result<Self, ValidationError> {
        let [p1, p2, p3, p4] = corners;
        if !geometry::is_rectangle(p1, p2, p3, p4, tol.rectangle) {
            return Err(ValidationError::NotARectangle);
        }
        Ok(Self {
            name: name.into(),
            corners: geometry::bounding_corners(&corners),
        })
    }
}

impl Shape for RectangleShape {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> &'static str {
        "Rectangle"
    }

    fn points(&self) -> &[Point] {
        &self.corners
    }

    fn center(&self) -> Point {
        BoundingBox::from_points(&self.corners).center()
    }

    fn style(&self) -> Style {
        defaults::rectangle_style()
    }
}

/// A square, possibly rotated
#[derive(Debug, Clone, PartialEq)]
pub struct SquareShape {
    name: String,
    corners: [Point; 4],
}

impl SquareShape {
    /// Square derived from a diagonal (see [`geometry::square_from_diagonal`]).
    pub fn from_diagonal(
        name: impl Into<String>,
        d1: Point,
        d2: Point,
        tol: &Tolerances,
    ) -> Result<Self, ValidationError> {
        if !geometry::is_valid_square_diagonal(d1, d2, tol.square_diagonal) {
            return Err(ValidationError::DegenerateSquareDiagonal);
        }
        Ok(Self {
            name: name.into(),
            corners: geometry::square_from_diagonal(d1, d2),
        })
    }

    /// Square from four vertices, kept in the order given.
    pub fn from_vertices(
        name: impl Into<String>,
        vertices: [Point; 4],
        tol: &Tolerances,
    ) -> Result<Self, ValidationError> {
        let [p1, p2, p3, p4] = vertices;
        if !geometry::is_square(p1, p2, p3, p4, tol.rectangle) {
            return Err(ValidationError::NotASquare);
        }
        Ok(Self {
            name: name.into(),
            corners: vertices,
        })
    }
}

impl Shape for SquareShape {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> &'static str {
        "Square"
    }

    fn points(&self) -> &[Point] {
        &self.corners
    }

    fn center(&self) -> Point {
        BoundingBox::from_points(&self.corners).center()
    }

    fn style(&self) -> Style {
        defaults::square_style()
    }
}

// ============================================================================
// Tests
// ============================================================================
