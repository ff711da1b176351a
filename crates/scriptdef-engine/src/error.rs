//! Refinement errors

use scriptdef_resolver::ResolveError;

/// Fatal refinement failures
///
/// Resolver reports are not errors; they travel in `Refined::diagnostics`.
#[derive(Debug, thiserror::Error)]
pub enum RefineError {
    /// The host did not supply a resolver environment
    #[error("No resolver environment supplied for script '{script}'")]
    MissingEnvironment { script: String },

    /// The resolver raised instead of reporting
    #[error("Dependency resolution failed for script '{script}': {source}")]
    Resolver {
        script: String,
        #[source]
        source: ResolveError,
    },

    /// The blocking entry point was called from inside an async runtime
    #[error("Blocking refinement called from inside an async runtime; use `refine` instead")]
    NestedRuntime,

    /// The blocking entry point could not start its runtime
    #[error("Failed to start refinement runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

/// Result type for refinement operations
pub type Result<T> = std::result::Result<T, RefineError>;
