//! Where `execute_file` reads its scripts from.

use std::collections::HashMap;
use std::io;
use std::path::Path;

/// A source of script text, addressed by the path given to `execute_file`.
pub trait ScriptSource {
    /// Read the whole script as lines (without line terminators).
    fn read_lines(&self, path: &str) -> io::Result<Vec<String>>;

    /// A stable key for `path`, used to detect a script that includes itself.
    /// Two spellings of the same script should map to the same key.
    fn identity(&self, path: &str) -> String {
        path.to_string()
    }
}

/// Reads scripts from the filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsSource;

impl ScriptSource for FsSource {
    /// Invalid UTF-8 is replaced rather than rejected, so one bad byte only
    /// spoils the line it sits on.
    fn read_lines(&self, path: &str) -> io::Result<Vec<String>> {
        let bytes = std::fs::read(path)?;
        Ok(String::from_utf8_lossy(&bytes)
            .lines()
            .map(str::to_string)
            .collect())
    }

    fn identity(&self, path: &str) -> String {
        Path::new(path)
            .canonicalize()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_else(|_| path.to_string())
    }
}

/// Scripts held in memory, for embedding and tests.
#[derive(Debug, Default, Clone)]
pub struct MemorySource {
    files: HashMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(path, text);
        self
    }

    pub fn insert(&mut self, path: impl Into<String>, text: impl Into<String>) {
        self.files.insert(path.into(), text.into());
    }
}

impl ScriptSource for MemorySource {
    fn read_lines(&self, path: &str) -> io::Result<Vec<String>> {
        self.files
            .get(path)
            .map(|text| text.lines().map(str::to_string).collect())
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("no script at {path}")))
    }
}
