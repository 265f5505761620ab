//! Rendering collaborators
//!
//! The interpreter never draws anything itself. It hands finished outlines to a
//! [`RenderSink`]:
//! - `types`: primitives (geometry + style) and colors
//! - `defaults`: per-shape styles and canvas settings
//! - `svg`: [`SvgCanvas`], a sink that serializes to an SVG document

pub mod defaults;
pub mod svg;
pub mod types;

pub use svg::{SvgCanvas, SvgOptions};
pub use types::*;

use crate::types::Point;

/// The display surface the dispatcher draws onto.
pub trait RenderSink {
    /// Add the outline of a newly created shape.
    fn add_primitive(&mut self, primitive: Primitive);

    /// Draw a connector between two points (shape centers).
    fn draw_connector(&mut self, from: Point, to: Point);
}

impl<T: RenderSink + ?Sized> RenderSink for &mut T {
    fn add_primitive(&mut self, primitive: Primitive) {
        (**self).add_primitive(primitive);
    }

    fn draw_connector(&mut self, from: Point, to: Point) {
        (**self).draw_connector(from, to);
    }
}

/// A sink that just remembers what it was given.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RecordingSink {
    pub primitives: Vec<Primitive>,
    pub connectors: Vec<(Point, Point)>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty() && self.connectors.is_empty()
    }
}

impl RenderSink for RecordingSink {
    fn add_primitive(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    fn draw_connector(&mut self, from: Point, to: Point) {
        self.connectors.push((from, to));
    }
}
