//! Resolver environment
//!
//! Opaque key/value settings handed from the host to the resolver, e.g.
//! project properties or the JDK the build runs with.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Key/value environment passed to a resolver
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResolverEnvironment {
    entries: BTreeMap<String, String>,
}

impl ResolverEnvironment {
    /// Root directory of the project owning the script
    pub const PROJECT_ROOT: &'static str = "projectRoot";

    /// Installation directory of the build tool
    pub const GRADLE_HOME: &'static str = "gradleHome";

    /// JDK the build tool runs with
    pub const GRADLE_JAVA_HOME: &'static str = "gradleJavaHome";

    /// Extra build tool command line options
    pub const GRADLE_OPTIONS: &'static str = "gradleOptions";

    /// Extra JVM options for the build tool
    pub const JVM_OPTIONS: &'static str = "jvmOptions";

    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl From<BTreeMap<String, String>> for ResolverEnvironment {
    fn from(entries: BTreeMap<String, String>) -> Self {
        Self { entries }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ResolverEnvironment {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}
