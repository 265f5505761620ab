//! Error types with rich diagnostics using miette
//!
//! Parse errors carry the command line and the span of the offending token so
//! hosts can print a labelled snippet. Command errors are plain messages; the
//! dispatcher turns every one of them into a failed [`crate::Outcome`].

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::dispatch::ScriptReport;

/// Source context for error reporting
#[derive(Debug, Clone)]
pub struct SourceContext {
    /// Name of the source ("<input>" or "script.txt:3")
    pub name: String,
    /// The raw command line
    pub source: String,
}

impl SourceContext {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Create a NamedSource for miette
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.name, self.source.clone())
    }
}

// ============================================================================
// Parse Errors
// ============================================================================

/// Errors that occur while tokenizing a command line
#[derive(Error, Diagnostic, Debug)]
pub enum ParseError {
    #[error("No tokens found in the command.")]
    #[diagnostic(
        code(objdraw::parse::empty_command),
        help("commands look like `create_line -name L -coord_1 {{0,0}} -coord_2 {{1,1}}`")
    )]
    EmptyCommand,

    #[error("Expected value after flag '{flag}'.")]
    #[diagnostic(code(objdraw::parse::missing_flag_value))]
    MissingFlagValue {
        flag: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("this flag needs a value")]
        span: SourceSpan,
    },

    #[error("Expected coordinate after '{flag}'.")]
    #[diagnostic(
        code(objdraw::parse::missing_coordinate_value),
        help("coordinates are written as {{x,y}} with no spaces")
    )]
    MissingCoordinateValue {
        flag: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("this coordinate flag needs a value")]
        span: SourceSpan,
    },

    #[error("Invalid coordinate format '{token}'. Expected {{x,y}}.")]
    #[diagnostic(
        code(objdraw::parse::bad_coordinate),
        help("both components must be decimal numbers, e.g. {{-1.5,2}}")
    )]
    BadCoordinate {
        token: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("not a coordinate")]
        span: SourceSpan,
    },

    #[error("Unexpected token '{token}'. Flags should start with '-'.")]
    #[diagnostic(code(objdraw::parse::unexpected_token))]
    UnexpectedToken {
        token: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("found this")]
        span: SourceSpan,
    },
}

// ============================================================================
// Command Errors
// ============================================================================

/// Semantic problems with an otherwise well-formed command
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Missing -name flag.")]
    #[diagnostic(code(objdraw::command::missing_name))]
    MissingName,

    #[error("Name cannot be empty.")]
    #[diagnostic(code(objdraw::command::empty_name))]
    EmptyName,

    #[error("An object named '{0}' already exists. Choose a unique name.")]
    #[diagnostic(code(objdraw::command::duplicate_name))]
    DuplicateName(String),

    #[error("Missing -{0} coordinate.")]
    #[diagnostic(code(objdraw::command::missing_coordinate))]
    MissingCoordinate(String),

    #[error("Triangle vertices are collinear. Provide non-collinear points.")]
    #[diagnostic(code(objdraw::command::collinear_vertices))]
    CollinearVertices,

    #[error("Provided corners do not form a rectangle.")]
    #[diagnostic(code(objdraw::command::not_a_rectangle))]
    NotARectangle,

    #[error("Diagonal points must differ in both x and y for a valid rectangle.")]
    #[diagnostic(code(objdraw::command::degenerate_rectangle_diagonal))]
    DegenerateRectangleDiagonal,

    #[error("Provided vertices do not form a square.")]
    #[diagnostic(code(objdraw::command::not_a_square))]
    NotASquare,

    #[error("Diagonal points do not define a valid square.")]
    #[diagnostic(code(objdraw::command::degenerate_square_diagonal))]
    DegenerateSquareDiagonal,

    #[error("Missing -object_name_1 or -object_name_2.")]
    #[diagnostic(code(objdraw::command::missing_connect_names))]
    MissingConnectNames,

    #[error("Missing -file_path.")]
    #[diagnostic(code(objdraw::command::missing_file_path))]
    MissingFilePath,
}

/// A command referenced a shape that is not in the registry
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum LookupError {
    #[error("Object '{0}' not found.")]
    #[diagnostic(code(objdraw::command::not_found))]
    NotFound(String),
}

/// Everything that can make [`crate::Dispatcher::execute`] fail
#[derive(Error, Diagnostic, Debug)]
pub enum CommandError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Lookup(#[from] LookupError),

    #[error("Unknown command '{0}'.")]
    #[diagnostic(code(objdraw::command::unknown))]
    UnknownCommand(String),

    #[error("Failed to open script file: {path}")]
    #[diagnostic(code(objdraw::script::unreadable_source))]
    UnreadableSource {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Recursive script inclusion: {0}")]
    #[diagnostic(
        code(objdraw::script::recursive),
        help("a script may not execute itself, directly or through another script")
    )]
    RecursiveScript(String),

    #[error("Script nesting exceeds {0} levels.")]
    #[diagnostic(code(objdraw::script::too_deep))]
    ScriptTooDeep(usize),

    /// At least one line of a script failed; the report lists every failure.
    #[error("{0}")]
    #[diagnostic(code(objdraw::script::failed))]
    ScriptFailed(ScriptReport),
}
