//! Configuration schema (scriptdef.toml)

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Host classpath searched for bootstrap libraries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassContextConfig {
    /// Jar files or directories available to the compiling process
    #[serde(default)]
    pub entries: Vec<PathBuf>,
}

/// Dependencies declared up front for the static resolver
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Compile classpath contributed to every script
    #[serde(default)]
    pub classpath: Vec<PathBuf>,

    /// Extra default imports
    #[serde(default)]
    pub imports: Vec<String>,

    /// Source jars for editor navigation
    #[serde(default)]
    pub sources: Vec<PathBuf>,

    /// JDK used to compile scripts
    #[serde(default)]
    pub java_home: Option<PathBuf>,
}

impl ResolverConfig {
    /// Resolve relative paths against `root`
    pub fn rooted_at(&self, root: &Path) -> Self {
        Self {
            classpath: self.classpath.iter().map(|p| root.join(p)).collect(),
            imports: self.imports.clone(),
            sources: self.sources.iter().map(|p| root.join(p)).collect(),
            java_home: self.java_home.as_ref().map(|p| root.join(p)),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Resolver environment, passed through to the resolver verbatim
    #[serde(default)]
    pub environment: BTreeMap<String, String>,

    /// Host classpath
    #[serde(default)]
    pub class_context: ClassContextConfig,

    /// Static resolver declarations
    #[serde(default)]
    pub resolver: Option<ResolverConfig>,

    /// Project root path (for resolving relative paths)
    #[serde(skip)]
    pub project_root: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: BTreeMap::new(),
            class_context: ClassContextConfig::default(),
            resolver: None,
            project_root: std::env::current_dir().unwrap_or_default(),
        }
    }
}

impl Config {
    /// Load config from TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        let mut config = Self::from_toml(&contents)?;

        config.project_root = project_root_of(path);

        Ok(config)
    }

    /// Load config from TOML string
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        let mut config: Config = toml::from_str(toml)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.project_root = std::env::current_dir().unwrap_or_default();
        Ok(config)
    }

    /// Save config to TOML file
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let toml = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        std::fs::write(path, toml)
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// Class context entries resolved against the project root
    pub fn class_context_entries(&self) -> Vec<PathBuf> {
        self.class_context
            .entries
            .iter()
            .map(|entry| self.project_root.join(entry))
            .collect()
    }

    /// Resolver declarations resolved against the project root
    pub fn resolver_declarations(&self) -> Option<ResolverConfig> {
        self.resolver
            .as_ref()
            .map(|resolver| resolver.rooted_at(&self.project_root))
    }
}

/// Directory holding the config file
///
/// A bare file name has an empty parent; that means the working directory.
fn project_root_of(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => std::env::current_dir().unwrap_or_default(),
    }
}

/// Config error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),
}
