//! Compiler diagnostics
//!
//! This is the compiler's view of a problem found while preparing a script.
//! Positions here are ZERO-BASED. Resolvers report one-based lines; the
//! translation lives in the engine, not here.

use serde::{Deserialize, Serialize};

/// Diagnostic severity level
///
/// Declaration order is significant for `Ord`: Info < Warning < Error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message
    Info,

    /// Warning - should be reviewed, compilation continues
    Warning,

    /// Error - something the script author must fix
    Error,
}

impl Severity {
    /// All severities, lowest first
    pub const ALL: [Severity; 3] = [Severity::Info, Severity::Warning, Severity::Error];
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Position in a script (0-indexed line, column as reported)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Line number (0-indexed)
    pub line: usize,

    /// Column number
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A diagnostic attached to a script
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Human-readable message
    pub message: String,

    /// Severity level
    pub severity: Severity,

    /// Name of the originating script, if the host gave it one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,

    /// Position in the script; unpositioned diagnostics apply to the whole script
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl Diagnostic {
    /// Create an unpositioned diagnostic
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity,
            script: None,
            position: None,
        }
    }

    /// Set the originating script name
    pub fn with_script(mut self, script: impl Into<String>) -> Self {
        self.script = Some(script.into());
        self
    }

    /// Set the position
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.script, &self.position) {
            (Some(script), Some(position)) => write!(f, "{}:{}: ", script, position)?,
            (Some(script), None) => write!(f, "{}: ", script)?,
            (None, Some(position)) => write!(f, "{}: ", position)?,
            (None, None) => {}
        }
        write!(f, "{}: {}", self.severity, self.message)
    }
}
