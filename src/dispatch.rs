//! Command dispatch: validation, shape construction, connections and scripts
//!
//! [`Dispatcher::execute`] is the single entry point a host calls per
//! submitted command. Every failure is recovered here and reported as an
//! [`Outcome`]; nothing is registered or drawn unless the whole command
//! validates.

use std::fmt;

use crate::config::DispatcherConfig;
use crate::errors::{CommandError, LookupError, ValidationError};
use crate::log;
use crate::parse::{self, Command};
use crate::registry::Registry;
use crate::render::RenderSink;
use crate::script::{FsSource, ScriptSource};
use crate::shapes::{LineShape, RectangleShape, Shape, ShapeKind, SquareShape, TriangleShape};
use crate::types::{DisplayPoint, Point};

/// Result of executing one command: a success flag and a user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub success: bool,
    pub message: String,
}

impl Outcome {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

impl From<Result<String, CommandError>> for Outcome {
    fn from(result: Result<String, CommandError>) -> Self {
        match result {
            Ok(message) => Outcome::ok(message),
            Err(err) => Outcome::failed(err.to_string()),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = if self.success { "INFO" } else { "ERROR" };
        write!(f, "[{level}] {}", self.message)
    }
}

/// Tally of one `execute_file` run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptReport {
    pub successes: usize,
    /// One `Line N: <reason>` entry per failed line, in file order
    pub failures: Vec<String>,
}

impl ScriptReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    fn record_failure(&mut self, line_no: usize, reason: impl fmt::Display) {
        self.failures.push(format!("Line {line_no}: {reason}"));
    }
}

impl fmt::Display for ScriptReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Script executed: {} successes, {} failures.",
            self.successes,
            self.failures.len()
        )?;
        for failure in &self.failures {
            write!(f, "\n{failure}")?;
        }
        Ok(())
    }
}

const COORD_KEYS: [&str; 4] = ["coord_1", "coord_2", "coord_3", "coord_4"];

/// Executes parsed commands against a registry and a rendering sink.
pub struct Dispatcher<K: RenderSink> {
    sink: K,
    registry: Registry,
    source: Box<dyn ScriptSource>,
    config: DispatcherConfig,
    /// Identities of the scripts currently executing, outermost first
    script_stack: Vec<String>,
}

impl<K: RenderSink> Dispatcher<K> {
    /// A dispatcher with an empty registry that reads scripts from the filesystem.
    pub fn new(sink: K) -> Self {
        Self {
            sink,
            registry: Registry::new(),
            source: Box::new(FsSource),
            config: DispatcherConfig::default(),
            script_stack: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: DispatcherConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_source(mut self, source: impl ScriptSource + 'static) -> Self {
        self.source = Box::new(source);
        self
    }

    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut K {
        &mut self.sink
    }

    pub fn into_sink(self) -> K {
        self.sink
    }

    /// Parse and execute one line as typed by a user.
    pub fn run_line(&mut self, raw: &str) -> Outcome {
        match parse::parse(raw) {
            Ok(cmd) => self.execute(&cmd),
            Err(err) => Outcome::failed(format!("Parse error: {err}")),
        }
    }

    /// Execute a parsed command.
    pub fn execute(&mut self, cmd: &Command) -> Outcome {
        let result = match cmd.name.as_str() {
            "create_line" => self.create_line(cmd),
            "create_triangle" => self.create_triangle(cmd),
            "create_rectangle" => self.create_rectangle(cmd),
            "create_square" => self.create_square(cmd),
            "connect" => self.connect(cmd),
            "execute_file" => self.execute_file(cmd),
            other => Err(CommandError::UnknownCommand(other.to_string())),
        };

        match &result {
            Ok(message) => {
                log::info!(command = %cmd.name, "{message}");
            }
            Err(err) => {
                log::debug!(command = %cmd.name, error = %err, "command failed");
            }
        }
        result.into()
    }

    // ------------------------------------------------------------------
    // Shared validation
    // ------------------------------------------------------------------

    /// The trimmed `-name` value.
    fn require_name(cmd: &Command) -> Result<&str, ValidationError> {
        let name = cmd.arg("name").ok_or(ValidationError::MissingName)?.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        Ok(name)
    }

    fn validate_unique_name(&self, name: &str) -> Result<(), ValidationError> {
        if self.registry.contains(name) {
            return Err(ValidationError::DuplicateName(name.to_string()));
        }
        Ok(())
    }

    fn require_coord(cmd: &Command, key: &str) -> Result<Point, ValidationError> {
        cmd.coord(key)
            .ok_or_else(|| ValidationError::MissingCoordinate(key.to_string()))
    }

    /// A fresh, unique name for a shape about to be created.
    fn new_shape_name<'c>(&self, cmd: &'c Command) -> Result<&'c str, ValidationError> {
        let name = Self::require_name(cmd)?;
        self.validate_unique_name(name)?;
        Ok(name)
    }

    /// All four corner coordinates, if every one of them was given.
    fn four_coords(cmd: &Command) -> Option<[Point; 4]> {
        let [k1, k2, k3, k4] = COORD_KEYS;
        Some([cmd.coord(k1)?, cmd.coord(k2)?, cmd.coord(k3)?, cmd.coord(k4)?])
    }

    fn two_coords(cmd: &Command) -> Result<(Point, Point), ValidationError> {
        Ok((
            Self::require_coord(cmd, COORD_KEYS[0])?,
            Self::require_coord(cmd, COORD_KEYS[1])?,
        ))
    }

    /// Hand the shape's outline to the sink and take ownership of it.
    fn register(&mut self, shape: impl Into<ShapeKind>) {
        let shape = shape.into();
        self.sink.add_primitive(shape.primitive());
        log::debug!(name = shape.name(), kind = shape.kind(), "registered shape");
        self.registry.add(shape.name().to_string(), shape);
    }

    // ------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------

    /// `create_line -name N -coord_1 {x,y} -coord_2 {x,y}`
    fn create_line(&mut self, cmd: &Command) -> Result<String, CommandError> {
        let name = self.new_shape_name(cmd)?;
        let (p1, p2) = Self::two_coords(cmd)?;

        self.register(LineShape::new(name, p1, p2));
        Ok(format!(
            "Line '{name}' created from {} to {}.",
            DisplayPoint(p1),
            DisplayPoint(p2)
        ))
    }

    /// `create_triangle -name N -coord_1 .. -coord_3`
    fn create_triangle(&mut self, cmd: &Command) -> Result<String, CommandError> {
        let name = self.new_shape_name(cmd)?;
        let p1 = Self::require_coord(cmd, COORD_KEYS[0])?;
        let p2 = Self::require_coord(cmd, COORD_KEYS[1])?;
        let p3 = Self::require_coord(cmd, COORD_KEYS[2])?;

        let triangle = TriangleShape::new(name, p1, p2, p3, &self.config.tolerances)?;
        self.register(triangle);
        Ok(format!("Triangle '{name}' created."))
    }

    /// `create_rectangle -name N` with either all of `-coord_1..4` (corners)
    /// or `-coord_1 -coord_2` (diagonal).
    fn create_rectangle(&mut self, cmd: &Command) -> Result<String, CommandError> {
        let name = self.new_shape_name(cmd)?;

        if let Some(corners) = Self::four_coords(cmd) {
            let rect = RectangleShape::from_corners(name, corners, &self.config.tolerances)?;
            self.register(rect);
            return Ok(format!("Rectangle '{name}' created from four corners."));
        }

        let (p1, p2) = Self::two_coords(cmd)?;
        self.register(RectangleShape::from_diagonal(name, p1, p2)?);
        Ok(format!("Rectangle '{name}' created from diagonal points."))
    }

    /// `create_square -name N` with either all of `-coord_1..4` (vertices)
    /// or `-coord_1 -coord_2` (diagonal).
    fn create_square(&mut self, cmd: &Command) -> Result<String, CommandError> {
        let name = self.new_shape_name(cmd)?;
        let tol = self.config.tolerances;

        if let Some(vertices) = Self::four_coords(cmd) {
            self.register(SquareShape::from_vertices(name, vertices, &tol)?);
            return Ok(format!("Square '{name}' created from four vertices."));
        }

        let (d1, d2) = Self::two_coords(cmd)?;
        self.register(SquareShape::from_diagonal(name, d1, d2, &tol)?);
        Ok(format!("Square '{name}' created from diagonal points."))
    }

    /// `connect -object_name_1 A -object_name_2 B`: dashed link between centers.
    fn connect(&mut self, cmd: &Command) -> Result<String, CommandError> {
        let (Some(n1), Some(n2)) = (cmd.arg("object_name_1"), cmd.arg("object_name_2")) else {
            return Err(ValidationError::MissingConnectNames.into());
        };

        let lookup = |name: &str| {
            self.registry
                .get(name)
                .map(|shape| shape.center())
                .ok_or_else(|| LookupError::NotFound(name.to_string()))
        };
        let c1 = lookup(n1)?;
        let c2 = lookup(n2)?;

        self.sink.draw_connector(c1, c2);
        Ok(format!("Connected '{n1}' and '{n2}' by their centers."))
    }

    /// `execute_file -file_path PATH`: run every non-blank line of a script.
    fn execute_file(&mut self, cmd: &Command) -> Result<String, CommandError> {
        let path = cmd.arg("file_path").ok_or(ValidationError::MissingFilePath)?;

        let identity = self.source.identity(path);
        if self.script_stack.contains(&identity) {
            return Err(CommandError::RecursiveScript(path.to_string()));
        }
        if self.script_stack.len() >= self.config.max_script_depth {
            return Err(CommandError::ScriptTooDeep(self.config.max_script_depth));
        }

        let lines = self
            .source
            .read_lines(path)
            .map_err(|source| CommandError::UnreadableSource {
                path: path.to_string(),
                source,
            })?;

        self.script_stack.push(identity);
        let report = self.run_script(path, &lines);
        self.script_stack.pop();

        if report.is_success() {
            Ok(report.to_string())
        } else {
            log::warn!(path, failures = report.failures.len(), "script had failures");
            Err(CommandError::ScriptFailed(report))
        }
    }

    fn run_script(&mut self, path: &str, lines: &[String]) -> ScriptReport {
        let mut report = ScriptReport::default();

        for (idx, raw) in lines.iter().enumerate() {
            let line_no = idx + 1;
            let raw = raw.trim();
            if raw.is_empty() {
                continue;
            }

            let cmd = match parse::parse_named(&format!("{path}:{line_no}"), raw) {
                Ok(cmd) => cmd,
                Err(err) => {
                    report.record_failure(line_no, format_args!("parse error: {err}"));
                    continue;
                }
            };

            let outcome = self.execute(&cmd);
            if outcome.success {
                report.successes += 1;
            } else {
                report.record_failure(line_no, outcome.message);
            }
        }

        report
    }
}
