//! Compilation configuration model
//!
//! A `CompilationConfiguration` is what the script compiler consumes. The
//! static part is assembled once per script flavor; refinement works on a
//! clone and never writes back into the shared profile.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::path::PathBuf;

/// Fully qualified name of a type on the script compiler's side
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeName(Cow<'static, str>);

impl TypeName {
    /// Create a type name from a string constant
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// Create a type name from an owned string
    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Unqualified name (segment after the last '.')
    pub fn simple_name(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(&self.0)
    }
}

impl std::fmt::Display for TypeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where an editor may treat a file as a script of this kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AcceptedLocation {
    /// Main source roots
    Sources,

    /// Test source roots
    Tests,

    /// Library roots
    Libraries,

    /// Anywhere inside the project
    Project,

    /// No location restriction
    Everywhere,
}

/// Library names that must be found on the host's own classpath
///
/// These are the artifacts needed to compile any script of a flavor before
/// the external resolver has contributed anything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BootstrapClasspath {
    /// Library base names, without version or extension (e.g. `kotlin-stdlib`)
    pub libraries: Vec<String>,
}

impl BootstrapClasspath {
    pub fn new<I, S>(libraries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            libraries: libraries.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.libraries.is_empty()
    }
}

/// Compilation configuration for one script
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilationConfiguration {
    /// Types whose members are in scope unqualified inside the script body
    pub implicit_receivers: Vec<TypeName>,

    /// Raw compiler arguments
    pub compiler_options: Vec<String>,

    /// Imports added to every script (insertion order, no duplicates)
    pub default_imports: Vec<String>,

    /// Bootstrap library markers
    pub bootstrap: BootstrapClasspath,

    /// Compile classpath
    pub classpath: Vec<PathBuf>,

    /// Annotations enabling SAM conversion with the implicit receiver
    pub sam_with_receiver_annotations: Vec<TypeName>,

    /// Editor acceptance policy
    pub accepted_locations: Vec<AcceptedLocation>,

    /// Source jars for editor navigation (not on the compile classpath)
    pub dependencies_sources: Vec<PathBuf>,

    /// JDK used to compile the script; `None` inherits the host's
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jdk_home: Option<PathBuf>,
}

impl CompilationConfiguration {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the compile classpath with `classpath`
    pub fn update_classpath(&mut self, classpath: Vec<PathBuf>) {
        self.classpath = classpath;
    }

    /// Add imports, skipping ones already present
    pub fn add_default_imports<I, S>(&mut self, imports: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for import in imports {
            let import = import.into();
            if !self.default_imports.contains(&import) {
                self.default_imports.push(import);
            }
        }
    }

    /// Record source jars for the editor
    pub fn add_dependencies_sources<I>(&mut self, sources: I)
    where
        I: IntoIterator<Item = PathBuf>,
    {
        for source in sources {
            if !self.dependencies_sources.contains(&source) {
                self.dependencies_sources.push(source);
            }
        }
    }

    /// Override the JDK home
    pub fn set_jdk_home(&mut self, jdk_home: impl Into<PathBuf>) {
        self.jdk_home = Some(jdk_home.into());
    }

    /// Whether an editor should accept a script at any location
    pub fn accepted_everywhere(&self) -> bool {
        self.accepted_locations.contains(&AcceptedLocation::Everywhere)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn type_name_simple_name() {
        let name = TypeName::from_static("org.gradle.api.initialization.Settings");
        assert_eq!(name.simple_name(), "Settings");
        assert_eq!(TypeName::new("Unqualified").simple_name(), "Unqualified");
    }

    #[test]
    fn update_classpath_replaces() {
        let mut config = CompilationConfiguration::new();
        config.classpath = vec![PathBuf::from("A"), PathBuf::from("B")];

        config.update_classpath(vec![PathBuf::from("C")]);

        assert_eq!(config.classpath, vec![PathBuf::from("C")]);
    }

    #[test]
    fn default_imports_are_additive_without_duplicates() {
        let mut config = CompilationConfiguration::new();
        config.add_default_imports(["x.*"]);
        config.add_default_imports(["y.*", "x.*"]);

        assert_eq!(config.default_imports, vec!["x.*".to_string(), "y.*".to_string()]);
    }

    #[test]
    fn jdk_home_override() {
        let mut config = CompilationConfiguration::new();
        assert!(config.jdk_home.is_none());

        config.set_jdk_home("/usr/lib/jvm/java-11");
        assert_eq!(config.jdk_home, Some(PathBuf::from("/usr/lib/jvm/java-11")));
    }

    #[test]
    fn configuration_json_roundtrip() {
        let mut config = CompilationConfiguration::new();
        config.implicit_receivers.push(TypeName::from_static("org.gradle.api.Project"));
        config.accepted_locations.push(AcceptedLocation::Everywhere);

        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"org.gradle.api.Project\""));
        assert!(json.contains("\"everywhere\""));

        let parsed: CompilationConfiguration = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
        assert!(parsed.accepted_everywhere());
    }
}
