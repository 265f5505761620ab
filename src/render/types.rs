//! Renderable primitives handed to a [`super::RenderSink`].

use std::fmt;

use crate::types::{BoundingBox, Point};

use super::defaults;

/// An RGBA color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opacity in the 0..=1 range.
    pub fn opacity(self) -> f64 {
        f64::from(self.a) / 255.0
    }

    pub fn is_opaque(self) -> bool {
        self.a == 255
    }
}

/// Formats as `rgb(r,g,b)`; the alpha channel is emitted separately as an opacity.
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.r, self.g, self.b)
    }
}

/// Stroke and fill of a primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub stroke: Color,
    /// `None` leaves the outline unfilled.
    pub fill: Option<Color>,
    pub stroke_width: f64,
    /// Dash length for dashed strokes; `None` draws a solid stroke.
    pub dashed: Option<f64>,
}

impl Style {
    pub fn stroke(color: Color, width: f64) -> Self {
        Self {
            stroke: color,
            fill: None,
            stroke_width: width,
            dashed: None,
        }
    }

    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = Some(fill);
        self
    }

    pub fn with_dash(mut self, dash: f64) -> Self {
        self.dashed = Some(dash);
        self
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::stroke(defaults::DEFAULT_STROKE, defaults::STROKE_WIDTH)
    }
}

/// The outline to draw.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// An open straight segment.
    Segment { from: Point, to: Point },
    /// A closed polygon through the points in order.
    Polygon { points: Vec<Point> },
}

/// Geometry plus style: everything a renderer needs to draw one item.
#[derive(Debug, Clone, PartialEq)]
pub struct Primitive {
    /// Name of the shape this primitive outlines; connectors have none.
    pub label: Option<String>,
    pub geometry: Geometry,
    pub style: Style,
}

impl Primitive {
    pub fn segment(from: Point, to: Point, style: Style) -> Self {
        Self {
            label: None,
            geometry: Geometry::Segment { from, to },
            style,
        }
    }

    pub fn polygon(points: Vec<Point>, style: Style) -> Self {
        Self {
            label: None,
            geometry: Geometry::Polygon { points },
            style,
        }
    }

    /// A dashed segment joining two shape centers.
    pub fn connector(from: Point, to: Point) -> Self {
        Self::segment(from, to, defaults::connector_style())
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn bounds(&self) -> BoundingBox {
        match &self.geometry {
            Geometry::Segment { from, to } => BoundingBox::from_points([from, to]),
            Geometry::Polygon { points } => BoundingBox::from_points(points),
        }
    }
}
