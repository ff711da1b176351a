//! Resolver backed by declarations in `scriptdef.toml`
//!
//! Every script gets the same dependencies. Declared paths are checked on
//! each call; missing ones are reported, not dropped, so the compiler still
//! sees exactly what the configuration says.

use crate::environment::ResolverEnvironment;
use crate::resolver::{
    DependencyResolver, EditorReport, Resolution, ResolveError, ScriptContents, ScriptDependencies,
};
use scriptdef_core::ResolverConfig;
use std::path::Path;

/// Resolver returning configured dependencies
#[derive(Debug, Clone, Default)]
pub struct StaticResolver {
    dependencies: ScriptDependencies,
}

impl StaticResolver {
    pub fn new(dependencies: ScriptDependencies) -> Self {
        Self { dependencies }
    }

    /// Build from the `[resolver]` section of the configuration
    pub fn from_config(config: &ResolverConfig) -> Self {
        Self::new(ScriptDependencies {
            classpath: config.classpath.clone(),
            imports: config.imports.clone(),
            sources: config.sources.clone(),
            java_home: config.java_home.clone(),
        })
    }

    pub fn dependencies(&self) -> &ScriptDependencies {
        &self.dependencies
    }
}

async fn exists(path: &Path) -> bool {
    tokio::fs::metadata(path).await.is_ok()
}

#[async_trait::async_trait]
impl DependencyResolver for StaticResolver {
    fn name(&self) -> &'static str {
        "Static"
    }

    async fn resolve(
        &self,
        script: &dyn ScriptContents,
        _environment: &ResolverEnvironment,
        _previous: Option<&ScriptDependencies>,
    ) -> Result<Resolution, ResolveError> {
        tracing::debug!(
            file = ?script.file(),
            classpath = self.dependencies.classpath.len(),
            "resolving declared dependencies"
        );

        if self.dependencies.is_empty() {
            return Ok(Resolution::none());
        }

        let mut reports = Vec::new();

        for entry in &self.dependencies.classpath {
            if !exists(entry).await {
                reports.push(EditorReport::warning(format!(
                    "Classpath entry not found: {}",
                    entry.display()
                )));
            }
        }

        for entry in &self.dependencies.sources {
            if !exists(entry).await {
                reports.push(EditorReport::warning(format!(
                    "Sources entry not found: {}",
                    entry.display()
                )));
            }
        }

        if let Some(java_home) = &self.dependencies.java_home {
            if !exists(java_home).await {
                reports.push(EditorReport::error(format!(
                    "Java home not found: {}",
                    java_home.display()
                )));
            }
        }

        Ok(Resolution::resolved(self.dependencies.clone()).with_reports(reports))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::ReportSeverity;
    use std::path::PathBuf;

    struct Text;

    impl ScriptContents for Text {
        fn file(&self) -> Option<&Path> {
            None
        }

        fn text(&self) -> &str {
            ""
        }
    }

    #[tokio::test]
    async fn test_empty_declarations_resolve_to_nothing() {
        let resolver = StaticResolver::default();
        let resolution = resolver.resolve(&Text, &ResolverEnvironment::new(), None).await.unwrap();
        assert_eq!(resolution, Resolution::none());
    }

    #[tokio::test]
    async fn test_existing_entries_produce_no_reports() {
        let dir = tempfile::tempdir().unwrap();
        let jar = dir.path().join("x-y-1.jar");
        std::fs::write(&jar, b"").unwrap();

        let resolver = StaticResolver::from_config(&ResolverConfig {
            classpath: vec![jar.clone()],
            imports: vec!["com.example.*".to_string()],
            sources: Vec::new(),
            java_home: Some(dir.path().to_path_buf()),
        });

        let resolution = resolver.resolve(&Text, &ResolverEnvironment::new(), None).await.unwrap();
        assert!(resolution.reports.is_empty());

        let deps = resolution.dependencies.unwrap();
        assert_eq!(deps.classpath, vec![jar]);
        assert_eq!(deps.java_home, Some(dir.path().to_path_buf()));
    }

    #[tokio::test]
    async fn test_missing_entries_are_reported_and_kept() {
        let resolver = StaticResolver::new(
            ScriptDependencies::new()
                .with_classpath(["/definitely/missing/x-y-1.jar"])
                .with_sources(["/definitely/missing/x-y-1-sources.jar"])
                .with_java_home("/definitely/missing/jdk"),
        );

        let resolution = resolver.resolve(&Text, &ResolverEnvironment::new(), None).await.unwrap();

        let severities: Vec<_> = resolution.reports.iter().map(|r| r.severity).collect();
        assert_eq!(
            severities,
            vec![ReportSeverity::Warning, ReportSeverity::Warning, ReportSeverity::Error]
        );
        assert!(resolution.reports.iter().all(|r| r.position.is_none()));
        assert_eq!(
            resolution.dependencies.unwrap().classpath,
            vec![PathBuf::from("/definitely/missing/x-y-1.jar")]
        );
    }
}
