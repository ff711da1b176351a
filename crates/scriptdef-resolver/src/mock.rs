//! Mock resolver for testing
//!
//! Returns a predefined resolution without touching the network or disk.
//! It's useful for:
//! - Unit testing the refinement pipeline
//! - Simulating resolver reports and failures
//! - Demos without a real build environment
//!
//! ## Usage
//!
//! ```rust,ignore
//! use scriptdef_resolver::{MockResolverBuilder, EditorReport};
//!
//! let resolver = MockResolverBuilder::new()
//!     .with_classpath(["/repo/x-y-1.jar"])
//!     .with_report(EditorReport::warning("Offline").at(1, 3))
//!     .build();
//! ```

use crate::environment::ResolverEnvironment;
use crate::resolver::{
    DependencyResolver, EditorReport, Resolution, ResolveError, ScriptContents, ScriptDependencies,
};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

/// A resolver call as seen by the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub file: Option<PathBuf>,
    pub text: String,
    pub environment: ResolverEnvironment,
    pub had_previous: bool,
}

/// Mock dependency resolver
///
/// Clones share state, so a test can keep a handle while the pipeline owns
/// another one.
pub struct MockResolver {
    /// Resolution returned on success
    resolution: Arc<RwLock<Resolution>>,

    /// Error returned instead of the resolution
    error: Arc<RwLock<Option<ResolveError>>>,

    /// Requests seen so far
    requests: Arc<RwLock<Vec<RecordedRequest>>>,

    /// Number of resolve calls
    calls: Arc<AtomicUsize>,

    /// Simulate resolution latency (milliseconds)
    latency_ms: u64,

    /// Name to return from name() method
    resolver_name: &'static str,
}

impl MockResolver {
    /// Create a mock resolver that reports no additional dependencies
    pub fn new() -> Self {
        Self::from_resolution(Resolution::none())
    }

    /// Create a mock resolver returning `resolution`
    pub fn from_resolution(resolution: Resolution) -> Self {
        Self {
            resolution: Arc::new(RwLock::new(resolution)),
            error: Arc::new(RwLock::new(None)),
            requests: Arc::new(RwLock::new(Vec::new())),
            calls: Arc::new(AtomicUsize::new(0)),
            latency_ms: 0,
            resolver_name: "Mock",
        }
    }

    /// Replace the resolution returned by subsequent calls
    pub async fn set_resolution(&self, resolution: Resolution) {
        *self.resolution.write().await = resolution;
    }

    /// Make subsequent calls fail with `error`
    pub async fn fail_with(&self, error: ResolveError) {
        *self.error.write().await = Some(error);
    }

    /// Clear a configured failure
    pub async fn clear_error(&self) {
        *self.error.write().await = None;
    }

    /// Configure simulated latency for all calls
    pub fn with_latency(mut self, latency_ms: u64) -> Self {
        self.latency_ms = latency_ms;
        self
    }

    /// Set a custom resolver name
    pub fn with_name(mut self, name: &'static str) -> Self {
        self.resolver_name = name;
        self
    }

    /// Number of resolve calls so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Requests seen so far, oldest first
    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.read().await.clone()
    }

    async fn simulate_latency(&self) {
        if self.latency_ms > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(self.latency_ms)).await;
        }
    }
}

impl Default for MockResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for MockResolver {
    fn clone(&self) -> Self {
        Self {
            resolution: Arc::clone(&self.resolution),
            error: Arc::clone(&self.error),
            requests: Arc::clone(&self.requests),
            calls: Arc::clone(&self.calls),
            latency_ms: self.latency_ms,
            resolver_name: self.resolver_name,
        }
    }
}

#[async_trait::async_trait]
impl DependencyResolver for MockResolver {
    fn name(&self) -> &'static str {
        self.resolver_name
    }

    async fn resolve(
        &self,
        script: &dyn ScriptContents,
        environment: &ResolverEnvironment,
        previous: Option<&ScriptDependencies>,
    ) -> Result<Resolution, ResolveError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.write().await.push(RecordedRequest {
            file: script.file().map(|p| p.to_path_buf()),
            text: script.text().to_string(),
            environment: environment.clone(),
            had_previous: previous.is_some(),
        });

        self.simulate_latency().await;

        if let Some(error) = self.error.read().await.as_ref() {
            return Err(error.clone());
        }

        Ok(self.resolution.read().await.clone())
    }
}

/// Builder for creating a MockResolver
pub struct MockResolverBuilder {
    dependencies: Option<ScriptDependencies>,
    reports: Vec<EditorReport>,
    error: Option<ResolveError>,
    latency_ms: u64,
    resolver_name: &'static str,
}

impl MockResolverBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            dependencies: None,
            reports: Vec::new(),
            error: None,
            latency_ms: 0,
            resolver_name: "Mock",
        }
    }

    fn dependencies_mut(&mut self) -> &mut ScriptDependencies {
        self.dependencies.get_or_insert_with(ScriptDependencies::default)
    }

    /// Return these dependencies
    pub fn with_dependencies(mut self, dependencies: ScriptDependencies) -> Self {
        self.dependencies = Some(dependencies);
        self
    }

    /// Return a result carrying this classpath
    pub fn with_classpath<I, P>(mut self, classpath: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.dependencies_mut().classpath = classpath.into_iter().map(Into::into).collect();
        self
    }

    /// Return a result carrying these imports
    pub fn with_imports<I, S>(mut self, imports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies_mut().imports = imports.into_iter().map(Into::into).collect();
        self
    }

    /// Return a result carrying these source jars
    pub fn with_sources<I, P>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.dependencies_mut().sources = sources.into_iter().map(Into::into).collect();
        self
    }

    /// Return a result carrying this JDK home
    pub fn with_java_home(mut self, java_home: impl Into<PathBuf>) -> Self {
        self.dependencies_mut().java_home = Some(java_home.into());
        self
    }

    /// Add a report
    pub fn with_report(mut self, report: EditorReport) -> Self {
        self.reports.push(report);
        self
    }

    /// Fail every call
    pub fn with_error(mut self, error: ResolveError) -> Self {
        self.error = Some(error);
        self
    }

    /// Configure latency
    pub fn with_latency(mut self, latency_ms: u64) -> Self {
        self.latency_ms = latency_ms;
        self
    }

    /// Set resolver name
    pub fn with_name(mut self, name: &'static str) -> Self {
        self.resolver_name = name;
        self
    }

    /// Build the MockResolver
    pub fn build(self) -> MockResolver {
        let resolution = Resolution {
            dependencies: self.dependencies,
            reports: self.reports,
        };

        MockResolver {
            resolution: Arc::new(RwLock::new(resolution)),
            error: Arc::new(RwLock::new(self.error)),
            requests: Arc::new(RwLock::new(Vec::new())),
            calls: Arc::new(AtomicUsize::new(0)),
            latency_ms: self.latency_ms,
            resolver_name: self.resolver_name,
        }
    }
}

impl Default for MockResolverBuilder {
    fn default() -> Self {
        Self::new()
    }
}
