//! objdraw: a small line-oriented command language for building 2D shapes.
//!
//! A host feeds raw lines such as
//!
//! ```text
//! create_rectangle -name R -coord_1 {0,0} -coord_2 {4,2}
//! create_triangle -name T -coord_1 {0,0} -coord_2 {4,0} -coord_3 {2,3}
//! connect -object_name_1 R -object_name_2 T
//! ```
//!
//! through [`parse::parse`] and [`Dispatcher::execute`]. Shapes end up in the
//! dispatcher's [`Registry`], and their outlines are handed to a [`RenderSink`]
//! such as [`SvgCanvas`].

use pest_derive::Parser;

pub mod config;
pub mod dispatch;
pub mod errors;
pub mod geometry;
pub mod log;
pub mod parse;
pub mod registry;
pub mod render;
pub mod script;
pub mod shapes;
pub mod types;

pub use config::{DispatcherConfig, Tolerances};
pub use dispatch::{Dispatcher, Outcome, ScriptReport};
pub use errors::{CommandError, LookupError, ParseError, ValidationError};
pub use parse::{Command, parse};
pub use registry::Registry;
pub use render::{Primitive, RecordingSink, RenderSink, SvgCanvas, SvgOptions};
pub use script::{FsSource, MemorySource, ScriptSource};
pub use shapes::{Shape, ShapeKind};
pub use types::{Point, pt};

#[derive(Parser)]
#[grammar = "command.pest"]
pub struct CommandParser;

/// Parse and execute a whole session of commands against an SVG canvas.
///
/// Every line is dispatched even when earlier ones fail; the outcomes are
/// returned in order together with the rendered SVG document.
pub fn render_session(source: &str) -> (Vec<Outcome>, String) {
    let mut dispatcher = Dispatcher::new(SvgCanvas::default());
    let outcomes = source
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| dispatcher.run_line(line))
        .collect();
    let svg = dispatcher.sink().to_svg();
    (outcomes, svg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pest::Parser;

    #[test]
    fn grammar_splits_tokens() {
        let input = "create_line   -name\tL -coord_1 {0,0}";
        let line = CommandParser::parse(Rule::line, input)
            .unwrap()
            .next()
            .unwrap();
        let tokens: Vec<_> = line
            .into_inner()
            .filter(|p| p.as_rule() == Rule::token)
            .map(|p| p.as_str())
            .collect();
        assert_eq!(tokens, ["create_line", "-name", "L", "-coord_1", "{0,0}"]);
    }

    #[test]
    fn grammar_accepts_blank_line() {
        let result = CommandParser::parse(Rule::line, "   \t ");
        assert!(result.is_ok(), "Failed to parse: {:?}", result.err());
    }

    #[test]
    fn grammar_accepts_coordinates() {
        for input in ["{1,2}", "{-1.5,2.25}", "{ 3 , -4 }", "{0.0,-0}"] {
            let result = CommandParser::parse(Rule::coordinate, input);
            assert!(result.is_ok(), "Failed to parse {input}: {:?}", result.err());
        }
    }

    #[test]
    fn grammar_rejects_malformed_coordinates() {
        for input in ["{1,a}", "{1}", "1,2", "{1,2", "{.5,1}", "{1.,2}", "{1,2}x", "{+1,2}"] {
            let result = CommandParser::parse(Rule::coordinate, input);
            assert!(result.is_err(), "Unexpectedly parsed {input}");
        }
    }

    #[test]
    fn render_session_keeps_going_after_failures() {
        let (outcomes, svg) = render_session(
            "create_line -name L -coord_1 {0,0} -coord_2 {10,0}\n\
             \n\
             create_line -name L -coord_1 {0,0} -coord_2 {10,0}\n\
             create_square -name S -coord_1 {0,0} -coord_2 {4,4}\n",
        );
        let flags: Vec<bool> = outcomes.iter().map(|o| o.success).collect();
        assert_eq!(flags, [true, false, true]);
        assert_eq!(svg.matches("<path").count(), 2);
    }
}
