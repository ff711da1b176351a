//! scriptdef engine - script compilation profiles and refinement
//!
//! This crate implements the two phases of preparing a build script for
//! compilation:
//! - static per-flavor profiles (build, settings and init scripts)
//! - the per-script refinement pass that asks a resolver for dependencies
//!   and merges the answer into a copy of the profile's configuration

pub mod source;
pub mod contents;
pub mod diagnostics;
pub mod class_context;
pub mod profile;
pub mod registry;
pub mod refine;
pub mod error;

pub use source::{FileScript, SourceCode, StringScript};
pub use contents::ScriptContentsAdapter;
pub use diagnostics::{script_diagnostic_of, severity_of};
pub use class_context::ClassContext;
pub use profile::{build_profile, CompilationProfile, ProfileBuilder, ScriptFlavor};
pub use registry::ProfileRegistry;
pub use refine::{apply_dependencies, RefineConfiguration, Refined, RefinementContext, ResolverRefinement};
pub use error::RefineError;
