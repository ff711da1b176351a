//! scriptdef Core
//!
//! Compiler-side domain model shared by the resolver boundary, the
//! refinement engine and the CLI: diagnostics, compilation configurations,
//! the `scriptdef.toml` schema and the report.json v1 format.

pub mod diagnostic;
pub mod compilation;
pub mod report;
pub mod config;

pub use diagnostic::{Diagnostic, Severity, Position};
pub use compilation::{AcceptedLocation, BootstrapClasspath, CompilationConfiguration, TypeName};
pub use report::{Report, ReportSummary, ReportVersion};
pub use config::{ClassContextConfig, Config, ConfigError, ResolverConfig};
