//! Default styles and canvas settings (in drawing units, one unit per pixel at scale 1)

use super::types::{Color, Style};

pub const STROKE_WIDTH: f64 = 2.0;
pub const CONNECTOR_WIDTH: f64 = 1.5;
pub const CONNECTOR_DASH: f64 = 6.0;
pub const SVG_MARGIN: f64 = 20.0;
pub const SVG_SCALE: f64 = 1.0;

pub const DEFAULT_STROKE: Color = Color::rgb(0, 0, 0);

pub const LINE_STROKE: Color = Color::rgb(0, 0, 255);
pub const TRIANGLE_STROKE: Color = Color::rgb(0, 128, 0);
pub const TRIANGLE_FILL: Color = Color::rgba(0, 180, 0, 60);
pub const RECTANGLE_STROKE: Color = Color::rgb(255, 0, 0);
pub const RECTANGLE_FILL: Color = Color::rgba(255, 0, 0, 60);
pub const SQUARE_STROKE: Color = Color::rgb(255, 0, 255);
pub const SQUARE_FILL: Color = Color::rgba(255, 0, 255, 60);
pub const CONNECTOR_STROKE: Color = Color::rgb(128, 128, 128);

pub fn line_style() -> Style {
    Style::stroke(LINE_STROKE, STROKE_WIDTH)
}

pub fn triangle_style() -> Style {
    Style::stroke(TRIANGLE_STROKE, STROKE_WIDTH).with_fill(TRIANGLE_FILL)
}

pub fn rectangle_style() -> Style {
    Style::stroke(RECTANGLE_STROKE, STROKE_WIDTH).with_fill(RECTANGLE_FILL)
}

pub fn square_style() -> Style {
    Style::stroke(SQUARE_STROKE, STROKE_WIDTH).with_fill(SQUARE_FILL)
}

pub fn connector_style() -> Style {
    Style::stroke(CONNECTOR_STROKE, CONNECTOR_WIDTH).with_dash(CONNECTOR_DASH)
}
