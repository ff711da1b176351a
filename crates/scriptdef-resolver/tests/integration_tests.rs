//! Integration tests for the provided resolvers
//!
//! ```bash
//! cargo test -p scriptdef-resolver --test integration_tests
//! ```

use pretty_assertions::assert_eq;
use scriptdef_core::Config;
use scriptdef_resolver::{
    DependencyResolver, MockResolver, ReportSeverity, Resolution, ResolveError, ResolverEnvironment,
    ScriptContents, ScriptDependencies, StaticResolver,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

struct InMemoryScript {
    file: Option<PathBuf>,
    text: String,
}

impl ScriptContents for InMemoryScript {
    fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    fn text(&self) -> &str {
        &self.text
    }
}

fn script(text: &str) -> InMemoryScript {
    InMemoryScript {
        file: Some(PathBuf::from("/work/app/build.gradle.kts")),
        text: text.to_string(),
    }
}

#[tokio::test]
async fn test_static_resolver_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("libs")).unwrap();
    std::fs::write(dir.path().join("libs/x-y-1.jar"), b"").unwrap();

    let config_path = dir.path().join("scriptdef.toml");
    std::fs::write(
        &config_path,
        r#"
[environment]
projectRoot = "."

[resolver]
classpath = ["libs/x-y-1.jar", "libs/missing-2.jar"]
imports = ["com.example.*"]
"#,
    )
    .unwrap();

    let config = Config::from_file(&config_path).unwrap();
    let resolver = StaticResolver::from_config(&config.resolver_declarations().unwrap());
    let environment: ResolverEnvironment = config.environment.clone().into();

    let resolution = resolver.resolve(&script(""), &environment, None).await.unwrap();

    let deps = resolution.dependencies.unwrap();
    assert_eq!(
        deps.classpath,
        vec![dir.path().join("libs/x-y-1.jar"), dir.path().join("libs/missing-2.jar")]
    );
    assert_eq!(resolution.reports.len(), 1);
    assert_eq!(resolution.reports[0].severity, ReportSeverity::Warning);
    assert!(resolution.reports[0].message.contains("missing-2.jar"));
}

#[tokio::test]
async fn test_resolvers_behind_trait_object() {
    let resolvers: Vec<Arc<dyn DependencyResolver>> = vec![
        Arc::new(MockResolver::from_resolution(Resolution::resolved(
            ScriptDependencies::new().with_imports(["a.*"]),
        ))),
        Arc::new(StaticResolver::default()),
    ];

    let names: Vec<_> = resolvers.iter().map(|r| r.name()).collect();
    assert_eq!(names, vec!["Mock", "Static"]);

    for resolver in &resolvers {
        let result = resolver.resolve(&script("x"), &ResolverEnvironment::new(), None).await;
        assert!(result.is_ok());
    }
}

#[tokio::test]
async fn test_mock_resolver_latency() {
    let resolver = MockResolver::new().with_latency(20);
    let started = std::time::Instant::now();

    resolver.resolve(&script(""), &ResolverEnvironment::new(), None).await.unwrap();

    assert!(started.elapsed() >= std::time::Duration::from_millis(20));
}

#[tokio::test]
async fn test_mock_resolver_failure_surfaces_error() {
    let resolver = MockResolver::new();
    resolver
        .fail_with(ResolveError::ArtifactNotFound("x:y:1".to_string()))
        .await;

    let err = resolver
        .resolve(&script(""), &ResolverEnvironment::new(), None)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Artifact not found: x:y:1");
}
