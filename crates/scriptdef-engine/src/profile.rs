//! Static compilation profiles
//!
//! All script flavors share one template; the only thing that differs is
//! the implicit receiver bound into the script body.

use crate::class_context::ClassContext;
use crate::error::{RefineError, Result};
use crate::refine::{RefineConfiguration, Refined, RefinementContext};
use crate::source::SourceCode;
use scriptdef_core::{AcceptedLocation, BootstrapClasspath, CompilationConfiguration, TypeName};
use scriptdef_resolver::ResolverEnvironment;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Compiler arguments shared by every flavor
pub const COMPILER_OPTIONS: [&str; 5] = [
    "-jvm-target",
    "1.8",
    "-Xjsr305=strict",
    "-XXLanguage:+NewInference",
    "-XXLanguage:+SamConversionForKotlinFunctions",
];

/// Imports every script starts with
pub const DEFAULT_IMPORTS: [&str; 2] = ["org.gradle.kotlin.dsl.*", "org.gradle.api.*"];

/// Libraries needed to compile any script, taken from the host classpath
pub const BOOTSTRAP_LIBRARIES: [&str; 4] = [
    "gradle-kotlin-dsl",
    "gradle-api",
    "kotlin-stdlib",
    "kotlin-reflect",
];

/// Marks functional interfaces whose lambdas see the implicit receiver
pub const HAS_IMPLICIT_RECEIVER: TypeName = TypeName::from_static("org.gradle.api.HasImplicitReceiver");

/// Kind of configuration script
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptFlavor {
    /// Project build script
    Build,

    /// Settings script
    Settings,

    /// Initialization script
    Init,
}

impl ScriptFlavor {
    pub const ALL: [ScriptFlavor; 3] = [ScriptFlavor::Build, ScriptFlavor::Settings, ScriptFlavor::Init];

    /// Type implicitly in scope inside scripts of this flavor
    pub fn implicit_receiver(self) -> TypeName {
        match self {
            Self::Build => TypeName::from_static("org.gradle.api.Project"),
            Self::Settings => TypeName::from_static("org.gradle.api.initialization.Settings"),
            Self::Init => TypeName::from_static("org.gradle.api.invocation.Gradle"),
        }
    }

    /// Registry name of the flavor's profile
    pub fn profile_name(self) -> &'static str {
        match self {
            Self::Build => "build-script",
            Self::Settings => "settings-script",
            Self::Init => "init-script",
        }
    }

    /// Classify a script by its file name
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        if file_name == "settings.gradle.kts" {
            Some(Self::Settings)
        } else if file_name == "init.gradle.kts" || file_name.ends_with(".init.gradle.kts") {
            Some(Self::Init)
        } else if file_name.ends_with(".gradle.kts") {
            Some(Self::Build)
        } else {
            None
        }
    }
}

impl fmt::Display for ScriptFlavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Build => write!(f, "build"),
            Self::Settings => write!(f, "settings"),
            Self::Init => write!(f, "init"),
        }
    }
}

impl FromStr for ScriptFlavor {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "build" | "build-script" => Ok(Self::Build),
            "settings" | "settings-script" => Ok(Self::Settings),
            "init" | "init-script" => Ok(Self::Init),
            other => Err(format!("Unknown script flavor '{}'. Supported: build, settings, init", other)),
        }
    }
}

/// Static compilation profile of one script flavor
///
/// Immutable once built; refinement works on a copy of `configuration`.
#[derive(Clone)]
pub struct CompilationProfile {
    flavor: ScriptFlavor,
    configuration: CompilationConfiguration,
    before_compiling: Option<Arc<dyn RefineConfiguration>>,
}

impl CompilationProfile {
    pub fn flavor(&self) -> ScriptFlavor {
        self.flavor
    }

    pub fn name(&self) -> &'static str {
        self.flavor.profile_name()
    }

    /// Static configuration shared by every script of this flavor
    pub fn configuration(&self) -> &CompilationConfiguration {
        &self.configuration
    }

    pub fn before_compiling(&self) -> Option<&Arc<dyn RefineConfiguration>> {
        self.before_compiling.as_ref()
    }

    /// Refine the configuration for `script`
    ///
    /// Without a registered hook the static configuration is returned as is.
    pub async fn refine(
        &self,
        script: &dyn SourceCode,
        environment: Option<&ResolverEnvironment>,
    ) -> Result<Refined> {
        let context = RefinementContext {
            script,
            compilation_configuration: &self.configuration,
            environment,
        };

        match &self.before_compiling {
            Some(hook) => hook.before_compiling(context).await,
            None => Ok(Refined::unchanged(&self.configuration)),
        }
    }

    /// Blocking variant of [`refine`](Self::refine) for synchronous hosts
    ///
    /// Runs on a private current-thread runtime. Called from inside an async
    /// runtime it fails with [`RefineError::NestedRuntime`].
    pub fn refine_blocking(
        &self,
        script: &dyn SourceCode,
        environment: Option<&ResolverEnvironment>,
    ) -> Result<Refined> {
        if tokio::runtime::Handle::try_current().is_ok() {
            return Err(RefineError::NestedRuntime);
        }

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        runtime.block_on(self.refine(script, environment))
    }
}

impl fmt::Debug for CompilationProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompilationProfile")
            .field("flavor", &self.flavor)
            .field("configuration", &self.configuration)
            .field("before_compiling", &self.before_compiling.is_some())
            .finish()
    }
}

/// Builder for [`CompilationProfile`]
pub struct ProfileBuilder {
    flavor: ScriptFlavor,
    configuration: CompilationConfiguration,
    before_compiling: Option<Arc<dyn RefineConfiguration>>,
}

impl ProfileBuilder {
    pub fn new(flavor: ScriptFlavor) -> Self {
        Self {
            flavor,
            configuration: CompilationConfiguration::new(),
            before_compiling: None,
        }
    }

    /// Set the implicit receiver (replaces any previous one)
    pub fn implicit_receiver(mut self, receiver: TypeName) -> Self {
        self.configuration.implicit_receivers = vec![receiver];
        self
    }

    pub fn compiler_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.configuration.compiler_options.extend(options.into_iter().map(Into::into));
        self
    }

    pub fn default_imports<I, S>(mut self, imports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.configuration.add_default_imports(imports);
        self
    }

    /// Bootstrap libraries, looked up in `class_context`
    pub fn dependencies_from_class_context<I, S>(mut self, class_context: &ClassContext, libraries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let bootstrap = BootstrapClasspath::new(libraries);
        self.configuration.classpath = class_context.resolve(&bootstrap);
        self.configuration.bootstrap = bootstrap;
        self
    }

    pub fn annotations_for_sam_with_receivers<I>(mut self, annotations: I) -> Self
    where
        I: IntoIterator<Item = TypeName>,
    {
        self.configuration.sam_with_receiver_annotations.extend(annotations);
        self
    }

    pub fn accepted_locations<I>(mut self, locations: I) -> Self
    where
        I: IntoIterator<Item = AcceptedLocation>,
    {
        self.configuration.accepted_locations.extend(locations);
        self
    }

    /// Register the refinement hook
    pub fn before_compiling(mut self, hook: Arc<dyn RefineConfiguration>) -> Self {
        self.before_compiling = Some(hook);
        self
    }

    pub fn build(self) -> CompilationProfile {
        CompilationProfile {
            flavor: self.flavor,
            configuration: self.configuration,
            before_compiling: self.before_compiling,
        }
    }
}

/// Settings shared by every script flavor
fn dsl_script_template(builder: ProfileBuilder, implicit_receiver: TypeName, class_context: &ClassContext) -> ProfileBuilder {
    builder
        .implicit_receiver(implicit_receiver)
        .compiler_options(COMPILER_OPTIONS)
        .default_imports(DEFAULT_IMPORTS)
        .dependencies_from_class_context(class_context, BOOTSTRAP_LIBRARIES)
        .annotations_for_sam_with_receivers([HAS_IMPLICIT_RECEIVER])
        .accepted_locations([AcceptedLocation::Everywhere])
}

/// Build the profile of `flavor` with `implicit_receiver` in scope
pub fn build_profile(
    flavor: ScriptFlavor,
    implicit_receiver: TypeName,
    class_context: &ClassContext,
    hook: Arc<dyn RefineConfiguration>,
) -> CompilationProfile {
    dsl_script_template(ProfileBuilder::new(flavor), implicit_receiver, class_context)
        .before_compiling(hook)
        .build()
}
