//! Turn a raw command line into a [`Command`]

use std::collections::BTreeMap;

use pest::Parser;

use crate::errors::{ParseError, SourceContext};
use crate::log;
use crate::types::{Point, pt};
use crate::{CommandParser, Rule};

/// Marker that starts a flag token
pub const FLAG_MARKER: char = '-';

/// Flag keys with this prefix take a `{x,y}` value
pub const COORD_PREFIX: &str = "coord_";

/// A parsed instruction.
///
/// Keys in `args` and `coords` are stored without the leading `-`. When a key
/// is repeated the last occurrence wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Command {
    pub name: String,
    pub args: BTreeMap<String, String>,
    pub coords: BTreeMap<String, Point>,
}

impl Command {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.args.insert(key.into(), value.into());
        self
    }

    pub fn with_coord(mut self, key: impl Into<String>, point: Point) -> Self {
        self.coords.insert(key.into(), point);
        self
    }

    pub fn arg(&self, key: &str) -> Option<&str> {
        self.args.get(key).map(String::as_str)
    }

    pub fn coord(&self, key: &str) -> Option<Point> {
        self.coords.get(key).copied()
    }
}

/// Parse a command typed at the prompt.
pub fn parse(raw: &str) -> Result<Command, ParseError> {
    parse_named("<input>", raw)
}

/// Parse a command, naming its origin (e.g. `script.txt:4`) in diagnostics.
pub fn parse_named(source_name: &str, raw: &str) -> Result<Command, ParseError> {
    let ctx = SourceContext::new(source_name, raw);
    let tokens = tokenize(&ctx)?;

    let mut iter = tokens.into_iter();
    let Some(name) = iter.next() else {
        return Err(ParseError::EmptyCommand);
    };

    let mut cmd = Command::new(name.text);
    while let Some(tok) = iter.next() {
        let Some(key) = tok.text.strip_prefix(FLAG_MARKER) else {
            return Err(ParseError::UnexpectedToken {
                token: tok.text.to_string(),
                src: ctx.named_source(),
                span: tok.span(),
            });
        };

        if key.starts_with(COORD_PREFIX) {
            let Some(value) = iter.next() else {
                return Err(ParseError::MissingCoordinateValue {
                    flag: tok.text.to_string(),
                    src: ctx.named_source(),
                    span: tok.span(),
                });
            };
            let point = parse_coordinate(value.text).ok_or_else(|| ParseError::BadCoordinate {
                token: value.text.to_string(),
                src: ctx.named_source(),
                span: value.span(),
            })?;
            cmd.coords.insert(key.to_string(), point);
        } else {
            let Some(value) = iter.next() else {
                return Err(ParseError::MissingFlagValue {
                    flag: tok.text.to_string(),
                    src: ctx.named_source(),
                    span: tok.span(),
                });
            };
            cmd.args.insert(key.to_string(), value.text.to_string());
        }
    }

    log::debug!(name = %cmd.name, args = cmd.args.len(), coords = cmd.coords.len(), "parsed command");
    Ok(cmd)
}

/// A whitespace-delimited token and its byte offset in the line
#[derive(Debug, Clone, Copy)]
struct Token<'a> {
    text: &'a str,
    start: usize,
}

impl Token<'_> {
    fn span(&self) -> miette::SourceSpan {
        (self.start, self.text.len()).into()
    }
}

fn tokenize(ctx: &SourceContext) -> Result<Vec<Token<'_>>, ParseError> {
    let line = CommandParser::parse(Rule::line, &ctx.source)
        .map_err(|e| {
            let start = match e.location {
                pest::error::InputLocation::Pos(p) => p,
                pest::error::InputLocation::Span((s, _)) => s,
            };
            ParseError::UnexpectedToken {
                token: ctx.source[start..].chars().take(1).collect(),
                src: ctx.named_source(),
                span: (start, 0).into(),
            }
        })?
        .next()
        .ok_or(ParseError::EmptyCommand)?;

    Ok(line
        .into_inner()
        .filter(|p| p.as_rule() == Rule::token)
        .map(|p| Token {
            text: p.as_str(),
            start: p.as_span().start(),
        })
        .collect())
}

/// Parse a `{x,y}` literal.
pub fn parse_coordinate(token: &str) -> Option<Point> {
    let coord = CommandParser::parse(Rule::coordinate, token).ok()?.next()?;
    let mut numbers = coord
        .into_inner()
        .filter(|p| p.as_rule() == Rule::number)
        .map(|p| p.as_str().parse::<f64>());
    let x = numbers.next()?.ok()?;
    let y = numbers.next()?.ok()?;
    Some(pt(x, y))
}
