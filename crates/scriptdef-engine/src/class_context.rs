//! Host classpath used to bootstrap script compilation
//!
//! Bootstrap libraries come from the compiling process's own classpath, never
//! from the resolver, so any script can be compiled before resolution runs.

use scriptdef_core::{BootstrapClasspath, Config};
use std::path::{Path, PathBuf};

/// Environment variable holding the host classpath (platform path-list syntax)
pub const CLASSPATH_ENV: &str = "SCRIPTDEF_CLASSPATH";

/// Classpath entries available to the compiling process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassContext {
    entries: Vec<PathBuf>,
}

impl ClassContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries<I, P>(entries: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            entries: entries.into_iter().map(Into::into).collect(),
        }
    }

    /// Entries from `SCRIPTDEF_CLASSPATH`, empty when unset
    pub fn from_env() -> Self {
        match std::env::var_os(CLASSPATH_ENV) {
            Some(value) => Self::from_entries(std::env::split_paths(&value)),
            None => Self::new(),
        }
    }

    /// Entries from `[class_context]`, followed by `SCRIPTDEF_CLASSPATH`
    pub fn from_config(config: &Config) -> Self {
        let mut context = Self::from_entries(config.class_context_entries());
        context.entries.extend(Self::from_env().entries);
        context
    }

    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    /// First entry providing `library`
    pub fn find_library(&self, library: &str) -> Option<&Path> {
        self.entries
            .iter()
            .find(|entry| provides_library(entry, library))
            .map(PathBuf::as_path)
    }

    /// Entries for every bootstrap library found, in marker order
    ///
    /// Missing libraries are logged and skipped.
    pub fn resolve(&self, bootstrap: &BootstrapClasspath) -> Vec<PathBuf> {
        let mut classpath = Vec::with_capacity(bootstrap.libraries.len());
        for library in &bootstrap.libraries {
            match self.find_library(library) {
                Some(entry) => {
                    let entry = entry.to_path_buf();
                    if !classpath.contains(&entry) {
                        classpath.push(entry);
                    }
                }
                None => tracing::warn!(library = %library, "bootstrap library not found on host classpath"),
            }
        }
        classpath
    }
}

/// `kotlin-stdlib` matches `kotlin-stdlib.jar` and `kotlin-stdlib-1.3.50.jar`,
/// but not `kotlin-stdlib-jdk8-1.3.50.jar`.
fn provides_library(entry: &Path, library: &str) -> bool {
    let Some(stem) = entry.file_stem().and_then(|s| s.to_str()) else {
        return false;
    };

    match stem.strip_prefix(library) {
        Some("") => true,
        Some(rest) => rest
            .strip_prefix('-')
            .and_then(|version| version.chars().next())
            .is_some_and(|c| c.is_ascii_digit()),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn library_matching() {
        assert!(provides_library(Path::new("/lib/kotlin-stdlib.jar"), "kotlin-stdlib"));
        assert!(provides_library(Path::new("/lib/kotlin-stdlib-1.3.50.jar"), "kotlin-stdlib"));
        assert!(!provides_library(Path::new("/lib/kotlin-stdlib-jdk8-1.3.50.jar"), "kotlin-stdlib"));
        assert!(!provides_library(Path::new("/lib/kotlin-reflect-1.3.50.jar"), "kotlin-stdlib"));
        assert!(provides_library(Path::new("/lib/gradle-api-6.0.jar"), "gradle-api"));
    }

    #[test]
    fn resolve_keeps_marker_order_and_skips_missing() {
        let context = ClassContext::from_entries([
            "/lib/kotlin-reflect-1.3.50.jar",
            "/lib/gradle-api-6.0.jar",
            "/lib/kotlin-stdlib-1.3.50.jar",
        ]);
        let bootstrap = BootstrapClasspath::new(["gradle-kotlin-dsl", "gradle-api", "kotlin-stdlib", "kotlin-reflect"]);

        assert_eq!(
            context.resolve(&bootstrap),
            vec![
                PathBuf::from("/lib/gradle-api-6.0.jar"),
                PathBuf::from("/lib/kotlin-stdlib-1.3.50.jar"),
                PathBuf::from("/lib/kotlin-reflect-1.3.50.jar"),
            ]
        );
    }

    // Only test touching CLASSPATH_ENV
    #[test]
    fn host_classpath_from_env_and_config() {
        let joined = std::env::join_paths(["/lib/gradle-api-6.0.jar", "/lib/kotlin-stdlib-1.3.50.jar"]).unwrap();
        std::env::set_var(CLASSPATH_ENV, &joined);

        let from_env = ClassContext::from_env();
        let config = Config::from_toml("[class_context]\nentries = [\"/opt/first.jar\"]\n").unwrap();
        let from_config = ClassContext::from_config(&config);

        std::env::remove_var(CLASSPATH_ENV);

        assert_eq!(
            from_env.entries(),
            [PathBuf::from("/lib/gradle-api-6.0.jar"), PathBuf::from("/lib/kotlin-stdlib-1.3.50.jar")]
        );
        assert_eq!(
            from_config.entries(),
            [
                PathBuf::from("/opt/first.jar"),
                PathBuf::from("/lib/gradle-api-6.0.jar"),
                PathBuf::from("/lib/kotlin-stdlib-1.3.50.jar"),
            ]
        );
        assert!(ClassContext::from_env().entries().is_empty());
    }

    #[test]
    fn empty_context_resolves_nothing() {
        let bootstrap = BootstrapClasspath::new(["gradle-api"]);
        assert!(ClassContext::new().resolve(&bootstrap).is_empty());
    }
}
