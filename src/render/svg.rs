//! SVG generation

use std::fmt::Write as _;

use crate::types::{BoundingBox, Point, pt};

use super::RenderSink;
use super::defaults;
use super::types::{Geometry, Primitive, Style};

/// Output settings for [`SvgCanvas::to_svg`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SvgOptions {
    /// Pixels per drawing unit.
    pub scale: f64,
    /// Blank border around the drawing, in drawing units.
    pub margin: f64,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            scale: defaults::SVG_SCALE,
            margin: defaults::SVG_MARGIN,
        }
    }
}

/// Builder for the `d` attribute of a `<path>`.
#[derive(Debug, Default, Clone)]
pub struct PathData {
    d: String,
}

impl PathData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn m(self, x: f64, y: f64) -> Self {
        self.cmd('M', x, y)
    }

    pub fn l(self, x: f64, y: f64) -> Self {
        self.cmd('L', x, y)
    }

    pub fn z(mut self) -> Self {
        if !self.d.is_empty() {
            self.d.push(' ');
        }
        self.d.push('Z');
        self
    }

    fn cmd(mut self, c: char, x: f64, y: f64) -> Self {
        if !self.d.is_empty() {
            self.d.push(' ');
        }
        let _ = write!(self.d, "{c}{},{}", fmt_num(x), fmt_num(y));
        self
    }

    pub fn as_str(&self) -> &str {
        &self.d
    }
}

/// Two decimals, trailing zeros dropped, no negative zero.
pub fn fmt_num(v: f64) -> String {
    let s = format!("{v:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    match s {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// A rendering sink that collects primitives and serializes them as SVG.
///
/// Drawing coordinates have +y pointing up; the SVG is flipped so the picture
/// appears the right way round.
#[derive(Debug, Default, Clone)]
pub struct SvgCanvas {
    primitives: Vec<Primitive>,
    options: SvgOptions,
}

impl SvgCanvas {
    pub fn new(options: SvgOptions) -> Self {
        Self {
            primitives: Vec::new(),
            options,
        }
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn bounds(&self) -> BoundingBox {
        let mut bounds = BoundingBox::new();
        for prim in &self.primitives {
            let b = prim.bounds();
            if !b.is_empty() {
                bounds.expand(b.min);
                bounds.expand(b.max);
            }
        }
        bounds
    }

    /// Serialize everything drawn so far into a standalone SVG document.
    pub fn to_svg(&self) -> String {
        let SvgOptions { scale, margin } = self.options;
        let mut bounds = self.bounds();
        if bounds.is_empty() {
            bounds = BoundingBox::from_points(&[Point::ZERO]);
        }

        let width = (bounds.width() + 2.0 * margin) * scale;
        let height = (bounds.height() + 2.0 * margin) * scale;
        // Map drawing space (y up) to SVG space (y down).
        let to_px = |p: Point| -> Point {
            pt(
                (p.x - bounds.min.x + margin) * scale,
                (bounds.max.y - p.y + margin) * scale,
            )
        };

        let mut svg = String::new();
        let (w, h) = (fmt_num(width), fmt_num(height));
        let _ = write!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n"
        );

        for prim in &self.primitives {
            let d = match &prim.geometry {
                Geometry::Segment { from, to } => {
                    let (a, b) = (to_px(*from), to_px(*to));
                    PathData::new().m(a.x, a.y).l(b.x, b.y)
                }
                Geometry::Polygon { points } => {
                    let mut path = PathData::new();
                    for (i, p) in points.iter().enumerate() {
                        let q = to_px(*p);
                        path = if i == 0 { path.m(q.x, q.y) } else { path.l(q.x, q.y) };
                    }
                    path.z()
                }
            };

            svg.push_str("  <path");
            if let Some(label) = &prim.label {
                let _ = write!(svg, " data-name=\"{}\"", escape_xml(label));
            }
            let _ = write!(svg, " d=\"{}\" ", d.as_str());
            svg.push_str(&style_attrs(&prim.style, scale));
            svg.push_str("/>\n");
        }

        svg.push_str("</svg>\n");
        svg
    }
}

fn style_attrs(style: &Style, scale: f64) -> String {
    let mut attrs = String::new();
    match style.fill {
        Some(fill) => {
            let _ = write!(attrs, "fill=\"{fill}\" ");
            if !fill.is_opaque() {
                let _ = write!(attrs, "fill-opacity=\"{}\" ", fmt_num(fill.opacity()));
            }
        }
        None => attrs.push_str("fill=\"none\" "),
    }
    let _ = write!(
        attrs,
        "stroke=\"{}\" stroke-width=\"{}\" ",
        style.stroke,
        fmt_num(style.stroke_width * scale)
    );
    if let Some(dash) = style.dashed {
        let dash = fmt_num(dash * scale);
        let _ = write!(attrs, "stroke-dasharray=\"{dash},{dash}\" ");
    }
    attrs
}

impl RenderSink for SvgCanvas {
    fn add_primitive(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    fn draw_connector(&mut self, from: Point, to: Point) {
        self.primitives.push(Primitive::connector(from, to));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::defaults;

    #[test]
    fn number_formatting() {
        assert_eq!(fmt_num(1.0), "1");
        assert_eq!(fmt_num(2.5), "2.5");
        assert_eq!(fmt_num(0.126), "0.13");
        assert_eq!(fmt_num(-0.001), "0");
        assert_eq!(fmt_num(120.0), "120");
    }

    #[test]
    fn path_data_builder() {
        let d = PathData::new().m(0.0, 10.0).l(5.5, 0.0).z();
        assert_eq!(d.as_str(), "M0,10 L5.5,0 Z");
    }

    #[test]
    fn empty_canvas_is_margin_only() {
        let svg = SvgCanvas::default().to_svg();
        assert!(svg.starts_with(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"40\" height=\"40\" viewBox=\"0 0 40 40\">"
        ));
        assert!(!svg.contains("<path"));
    }

    #[test]
    fn segment_is_flipped_and_offset() {
        let mut canvas = SvgCanvas::new(SvgOptions {
            scale: 1.0,
            margin: 0.0,
        });
        canvas.add_primitive(Primitive::segment(
            pt(0.0, 0.0),
            pt(10.0, 5.0),
            defaults::line_style(),
        ));
        let svg = canvas.to_svg();
        assert!(svg.contains("d=\"M0,5 L10,0\""), "{svg}");
        assert!(svg.contains("stroke=\"rgb(0,0,255)\""), "{svg}");
        assert!(svg.contains("fill=\"none\""), "{svg}");
    }

    #[test]
    fn connector_is_dashed() {
        let mut canvas = SvgCanvas::default();
        canvas.draw_connector(pt(0.0, 0.0), pt(3.0, 4.0));
        let svg = canvas.to_svg();
        assert!(svg.contains("stroke-dasharray=\"6,6\""), "{svg}");
    }

    #[test]
    fn labels_are_escaped() {
        let mut canvas = SvgCanvas::default();
        canvas.add_primitive(
            Primitive::polygon(
                vec![pt(0.0, 0.0), pt(1.0, 0.0), pt(0.0, 1.0)],
                defaults::triangle_style(),
            )
            .with_label("a<b"),
        );
        let svg = canvas.to_svg();
        assert!(svg.contains("data-name=\"a&lt;b\""), "{svg}");
        assert!(svg.contains("fill-opacity=\"0.24\""), "{svg}");
        assert!(svg.contains(" Z\""), "{svg}");
    }
}
