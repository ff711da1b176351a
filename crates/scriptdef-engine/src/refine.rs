//! Refinement pipeline
//!
//! Runs once per script right before compilation: asks the resolver for the
//! script's dependencies and merges them into a copy of the profile's
//! configuration. Resolver reports become diagnostics; they never fail the
//! refinement on their own.

use crate::contents::ScriptContentsAdapter;
use crate::diagnostics::translate_report;
use crate::error::{RefineError, Result};
use crate::source::SourceCode;
use scriptdef_core::{CompilationConfiguration, Diagnostic};
use scriptdef_resolver::{DependencyResolver, ResolverEnvironment, ScriptDependencies};
use std::sync::Arc;

/// Everything a refinement hook gets to see
#[derive(Clone, Copy)]
pub struct RefinementContext<'a> {
    /// Script being compiled
    pub script: &'a dyn SourceCode,

    /// Static configuration of the script's profile
    pub compilation_configuration: &'a CompilationConfiguration,

    /// Environment for the resolver, supplied by the host
    pub environment: Option<&'a ResolverEnvironment>,
}

impl<'a> RefinementContext<'a> {
    pub fn new(script: &'a dyn SourceCode, compilation_configuration: &'a CompilationConfiguration) -> Self {
        Self {
            script,
            compilation_configuration,
            environment: None,
        }
    }

    pub fn with_environment(mut self, environment: &'a ResolverEnvironment) -> Self {
        self.environment = Some(environment);
        self
    }

    /// Script name for messages
    pub fn script_name(&self) -> &'a str {
        self.script.name().unwrap_or("<script>")
    }

    /// Resolver environment; its absence breaks the host contract
    pub fn resolver_environment(&self) -> Result<&'a ResolverEnvironment> {
        self.environment.ok_or_else(|| RefineError::MissingEnvironment {
            script: self.script_name().to_string(),
        })
    }
}

/// Refined configuration plus the diagnostics collected on the way
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Refined {
    pub configuration: CompilationConfiguration,
    pub diagnostics: Vec<Diagnostic>,
}

impl Refined {
    /// `configuration` unchanged, no diagnostics
    pub fn unchanged(configuration: &CompilationConfiguration) -> Self {
        Self {
            configuration: configuration.clone(),
            diagnostics: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

/// A `beforeCompiling` hook
#[async_trait::async_trait]
pub trait RefineConfiguration: Send + Sync {
    async fn before_compiling(&self, context: RefinementContext<'_>) -> Result<Refined>;
}

/// Refinement through a dependency resolver
#[derive(Debug, Clone)]
pub struct ResolverRefinement {
    resolver: Arc<dyn DependencyResolver>,
}

impl ResolverRefinement {
    pub fn new(resolver: Arc<dyn DependencyResolver>) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &Arc<dyn DependencyResolver> {
        &self.resolver
    }
}

#[async_trait::async_trait]
impl RefineConfiguration for ResolverRefinement {
    async fn before_compiling(&self, context: RefinementContext<'_>) -> Result<Refined> {
        let script_name = context.script.name();
        let contents = ScriptContentsAdapter::new(context.script);
        let environment = context.resolver_environment()?;

        tracing::debug!(
            script = context.script_name(),
            resolver = self.resolver.name(),
            "refining script compilation configuration"
        );

        // Every refinement resolves from scratch; no previous result is reused.
        let resolution = self
            .resolver
            .resolve(&contents, environment, None)
            .await
            .map_err(|source| RefineError::Resolver {
                script: context.script_name().to_string(),
                source,
            })?;

        let diagnostics: Vec<Diagnostic> = resolution
            .reports
            .into_iter()
            .map(|report| translate_report(script_name, report))
            .collect();

        for diagnostic in diagnostics.iter().filter(|d| d.is_error()) {
            tracing::warn!(script = context.script_name(), "{}", diagnostic.message);
        }

        let mut configuration = context.compilation_configuration.clone();
        if let Some(dependencies) = resolution.dependencies {
            apply_dependencies(&mut configuration, dependencies);
        }

        tracing::info!(
            script = context.script_name(),
            classpath = configuration.classpath.len(),
            diagnostics = diagnostics.len(),
            "refined script compilation configuration"
        );

        Ok(Refined {
            configuration,
            diagnostics,
        })
    }
}

/// Merge resolved dependencies into `configuration`
///
/// Each facet is applied on its own and only when it carries something:
/// the classpath is replaced, imports and sources are added, the JDK home is
/// replaced.
pub fn apply_dependencies(configuration: &mut CompilationConfiguration, dependencies: ScriptDependencies) {
    let ScriptDependencies {
        classpath,
        imports,
        sources,
        java_home,
    } = dependencies;

    if !classpath.is_empty() {
        configuration.update_classpath(classpath);
    }

    if !imports.is_empty() {
        configuration.add_default_imports(imports);
    }

    if !sources.is_empty() {
        configuration.add_dependencies_sources(sources);
    }

    if let Some(java_home) = java_home.filter(|home| !home.as_os_str().is_empty()) {
        configuration.set_jdk_home(java_home);
    }
}
