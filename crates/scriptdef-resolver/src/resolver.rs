//! Resolver trait and the values that cross the resolver boundary

use crate::environment::ResolverEnvironment;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// What a resolver gets to see of a script
pub trait ScriptContents: Send + Sync {
    /// Backing file of the script, if it has one
    fn file(&self) -> Option<&Path>;

    /// Script text
    fn text(&self) -> &str;
}

/// Severity of a resolver report
///
/// Declared in the same order as the compiler's `Severity`, but nothing may
/// rely on that: translation goes through an explicit table in the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportSeverity {
    Info,
    Warning,
    Error,
}

impl ReportSeverity {
    pub const ALL: [ReportSeverity; 3] = [
        ReportSeverity::Info,
        ReportSeverity::Warning,
        ReportSeverity::Error,
    ];
}

/// Position as reported by a resolver (1-indexed line)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EditorPosition {
    /// Line number (1-indexed)
    pub line: usize,

    /// Column number
    pub column: usize,
}

impl EditorPosition {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// A problem reported by a resolver while resolving one script
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorReport {
    pub severity: ReportSeverity,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<EditorPosition>,
}

impl EditorReport {
    pub fn new(severity: ReportSeverity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            position: None,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(ReportSeverity::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(ReportSeverity::Error, message)
    }

    /// Attach a 1-indexed position
    pub fn at(mut self, line: usize, column: usize) -> Self {
        self.position = Some(EditorPosition::new(line, column));
        self
    }
}

/// External dependencies of one script
///
/// Every facet is optional: an empty list or `None` means the resolver has
/// nothing to say about it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptDependencies {
    /// Compile classpath, in order
    #[serde(default)]
    pub classpath: Vec<PathBuf>,

    /// Default imports to add
    #[serde(default)]
    pub imports: Vec<String>,

    /// Source jars for the editor
    #[serde(default)]
    pub sources: Vec<PathBuf>,

    /// JDK home to compile with
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub java_home: Option<PathBuf>,
}

impl ScriptDependencies {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_classpath<I, P>(mut self, classpath: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.classpath = classpath.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_imports<I, S>(mut self, imports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.imports = imports.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_sources<I, P>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.sources = sources.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_java_home(mut self, java_home: impl Into<PathBuf>) -> Self {
        self.java_home = Some(java_home.into());
        self
    }

    /// True when no facet carries anything
    pub fn is_empty(&self) -> bool {
        self.classpath.is_empty()
            && self.imports.is_empty()
            && self.sources.is_empty()
            && self.java_home.is_none()
    }
}

/// Outcome of one resolver call
///
/// `dependencies` is `None` when the script needs nothing beyond its profile.
/// `reports` keeps the order in which problems were found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub dependencies: Option<ScriptDependencies>,
    #[serde(default)]
    pub reports: Vec<EditorReport>,
}

impl Resolution {
    /// No additional dependencies, no reports
    pub fn none() -> Self {
        Self::default()
    }

    pub fn resolved(dependencies: ScriptDependencies) -> Self {
        Self {
            dependencies: Some(dependencies),
            reports: Vec::new(),
        }
    }

    pub fn with_report(mut self, report: EditorReport) -> Self {
        self.reports.push(report);
        self
    }

    pub fn with_reports(mut self, reports: impl IntoIterator<Item = EditorReport>) -> Self {
        self.reports.extend(reports);
        self
    }
}

/// Errors a resolver raises instead of reporting
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("Artifact not found: {0}")]
    ArtifactNotFound(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Invalid environment: {0}")]
    InvalidEnvironment(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Resolver failure: {0}")]
    Internal(String),
}

/// Trait for components that work out a script's external dependencies
///
/// Called exactly once per refinement. Implementations may perform network
/// or file I/O; the caller waits for the returned future and imposes no
/// timeout of its own.
#[async_trait::async_trait]
pub trait DependencyResolver: Send + Sync {
    /// Resolver name, for logs
    fn name(&self) -> &'static str;

    /// Resolve the dependencies of `script`
    ///
    /// `previous` is the outcome of an earlier resolution of the same script,
    /// for resolvers able to reuse it.
    async fn resolve(
        &self,
        script: &dyn ScriptContents,
        environment: &ResolverEnvironment,
        previous: Option<&ScriptDependencies>,
    ) -> Result<Resolution, ResolveError>;
}

impl fmt::Debug for dyn DependencyResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependencyResolver")
            .field("name", &self.name())
            .finish()
    }
}
