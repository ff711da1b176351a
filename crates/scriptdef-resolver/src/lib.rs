//! Script dependency resolvers
//!
//! This crate defines the boundary between the refinement engine and
//! whatever determines a script's extra libraries, imports and JDK. The
//! engine only ever sees the [`DependencyResolver`] trait.
//!
//! ## Provided resolvers
//!
//! - [`MockResolver`] - canned results for tests and demos
//! - [`StaticResolver`] - dependencies declared in `scriptdef.toml`
//!
//! ## Example
//!
//! ```rust,ignore
//! use scriptdef_resolver::{DependencyResolver, MockResolverBuilder, ResolverEnvironment};
//!
//! let resolver = MockResolverBuilder::new()
//!     .with_classpath(["/repo/x-y-1.jar"])
//!     .build();
//! let resolution = resolver.resolve(&contents, &ResolverEnvironment::new(), None).await?;
//! ```

pub mod resolver;
pub mod environment;
pub mod mock;
pub mod static_resolver;

pub use resolver::{
    DependencyResolver, EditorPosition, EditorReport, ReportSeverity, Resolution, ResolveError,
    ScriptContents, ScriptDependencies,
};
pub use environment::ResolverEnvironment;
pub use mock::{MockResolver, MockResolverBuilder, RecordedRequest};
pub use static_resolver::StaticResolver;
