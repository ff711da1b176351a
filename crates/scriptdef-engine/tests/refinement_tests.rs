//! Integration tests for profiles and the refinement pipeline

use pretty_assertions::assert_eq;
use scriptdef_core::{AcceptedLocation, Position, Severity, TypeName};
use scriptdef_engine::{ClassContext, ProfileRegistry, RefineError, ScriptFlavor, StringScript};
use scriptdef_resolver::{
    EditorReport, MockResolver, MockResolverBuilder, ReportSeverity, ResolveError, ResolverEnvironment,
    ScriptDependencies,
};
use std::path::PathBuf;
use std::sync::Arc;

// =============================================================================
// Helper Functions
// =============================================================================

fn host_classpath() -> ClassContext {
    ClassContext::from_entries([
        "/gradle/lib/gradle-kotlin-dsl-6.0.jar",
        "/gradle/lib/gradle-api-6.0.jar",
        "/gradle/lib/kotlin-stdlib-1.3.50.jar",
        "/gradle/lib/kotlin-reflect-1.3.50.jar",
        "/gradle/lib/groovy-all-2.5.8.jar",
    ])
}

fn registry(resolver: MockResolver) -> ProfileRegistry {
    ProfileRegistry::with_resolver(&host_classpath(), Arc::new(resolver))
}

fn environment() -> ResolverEnvironment {
    ResolverEnvironment::new().with(ResolverEnvironment::PROJECT_ROOT, "/work/app")
}

fn build_script(text: &str) -> StringScript {
    StringScript::new(text).with_name("build.gradle.kts")
}

// =============================================================================
// Profiles
// =============================================================================

#[test]
fn test_profiles_differ_only_in_implicit_receiver() {
    let registry = registry(MockResolver::new());

    let mut configs: Vec<_> = registry.profiles().map(|p| p.configuration().clone()).collect();
    let receivers: Vec<_> = configs.iter_mut().map(|c| std::mem::take(&mut c.implicit_receivers)).collect();

    assert_eq!(
        receivers,
        vec![
            vec![TypeName::from_static("org.gradle.api.Project")],
            vec![TypeName::from_static("org.gradle.api.initialization.Settings")],
            vec![TypeName::from_static("org.gradle.api.invocation.Gradle")],
        ]
    );
    assert_eq!(configs[0], configs[1]);
    assert_eq!(configs[1], configs[2]);
}

#[test]
fn test_profile_static_settings() {
    let registry = registry(MockResolver::new());
    let config = registry.settings_script().configuration();

    assert_eq!(
        config.compiler_options,
        vec![
            "-jvm-target",
            "1.8",
            "-Xjsr305=strict",
            "-XXLanguage:+NewInference",
            "-XXLanguage:+SamConversionForKotlinFunctions",
        ]
    );
    assert_eq!(config.default_imports, vec!["org.gradle.kotlin.dsl.*", "org.gradle.api.*"]);
    assert_eq!(
        config.classpath,
        vec![
            PathBuf::from("/gradle/lib/gradle-kotlin-dsl-6.0.jar"),
            PathBuf::from("/gradle/lib/gradle-api-6.0.jar"),
            PathBuf::from("/gradle/lib/kotlin-stdlib-1.3.50.jar"),
            PathBuf::from("/gradle/lib/kotlin-reflect-1.3.50.jar"),
        ]
    );
    assert_eq!(
        config.sam_with_receiver_annotations,
        vec![TypeName::from_static("org.gradle.api.HasImplicitReceiver")]
    );
    assert_eq!(config.accepted_locations, vec![AcceptedLocation::Everywhere]);
    assert_eq!(config.jdk_home, None);
}

// =============================================================================
// Refinement
// =============================================================================

#[tokio::test]
async fn test_end_to_end_build_script() {
    let resolver = MockResolverBuilder::new()
        .with_classpath(["/repo/x-y-1.jar"])
        .with_report(EditorReport::new(ReportSeverity::Warning, "Offline, using cached x:y:1").at(1, 3))
        .build();
    let registry = registry(resolver);
    let script = build_script("dependencies { api(\"x:y:1\") }");

    let refined = registry
        .get(ScriptFlavor::Build)
        .refine(&script, Some(&environment()))
        .await
        .unwrap();

    assert_eq!(refined.configuration.classpath, vec![PathBuf::from("/repo/x-y-1.jar")]);
    assert_eq!(refined.diagnostics.len(), 1);
    assert_eq!(refined.diagnostics[0].severity, Severity::Warning);
    assert_eq!(refined.diagnostics[0].position, Some(Position::new(0, 3)));
    assert_eq!(refined.diagnostics[0].script.as_deref(), Some("build.gradle.kts"));
}

#[tokio::test]
async fn test_no_result_keeps_static_configuration() {
    let registry = registry(MockResolver::new());
    let profile = registry.build_script();

    let refined = profile.refine(&build_script(""), Some(&environment())).await.unwrap();

    assert_eq!(&refined.configuration, profile.configuration());
    assert!(refined.diagnostics.is_empty());
}

#[tokio::test]
async fn test_classpath_only_result_changes_only_classpath() {
    let registry = registry(MockResolverBuilder::new().with_classpath(["/repo/c.jar"]).build());
    let profile = registry.build_script();

    let refined = profile.refine(&build_script(""), Some(&environment())).await.unwrap();

    let mut expected = profile.configuration().clone();
    expected.classpath = vec![PathBuf::from("/repo/c.jar")];
    assert_eq!(refined.configuration, expected);
}

#[tokio::test]
async fn test_imports_are_added_to_defaults() {
    let registry = registry(MockResolverBuilder::new().with_imports(["com.example.*"]).build());

    let refined = registry
        .init_script()
        .refine(&StringScript::new(""), Some(&environment()))
        .await
        .unwrap();

    assert_eq!(
        refined.configuration.default_imports,
        vec!["org.gradle.kotlin.dsl.*", "org.gradle.api.*", "com.example.*"]
    );
}

#[tokio::test]
async fn test_all_facets_applied() {
    let resolver = MockResolverBuilder::new()
        .with_dependencies(
            ScriptDependencies::new()
                .with_classpath(["/repo/a.jar", "/repo/b.jar"])
                .with_imports(["a.*"])
                .with_sources(["/repo/a-sources.jar"])
                .with_java_home("/usr/lib/jvm/java-11"),
        )
        .build();
    let registry = registry(resolver);

    let refined = registry
        .settings_script()
        .refine(&StringScript::new(""), Some(&environment()))
        .await
        .unwrap();

    let config = refined.configuration;
    assert_eq!(config.classpath, vec![PathBuf::from("/repo/a.jar"), PathBuf::from("/repo/b.jar")]);
    assert!(config.default_imports.contains(&"a.*".to_string()));
    assert_eq!(config.dependencies_sources, vec![PathBuf::from("/repo/a-sources.jar")]);
    assert_eq!(config.jdk_home, Some(PathBuf::from("/usr/lib/jvm/java-11")));
}

#[tokio::test]
async fn test_diagnostics_keep_resolver_order() {
    let resolver = MockResolverBuilder::new()
        .with_report(EditorReport::error("first").at(5, 1))
        .with_report(EditorReport::new(ReportSeverity::Info, "second"))
        .with_report(EditorReport::warning("third").at(0, 0))
        .build();
    let registry = registry(resolver);

    let refined = registry
        .build_script()
        .refine(&build_script(""), Some(&environment()))
        .await
        .unwrap();

    let summary: Vec<_> = refined
        .diagnostics
        .iter()
        .map(|d| (d.message.as_str(), d.severity, d.position))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("first", Severity::Error, Some(Position::new(4, 1))),
            ("second", Severity::Info, None),
            ("third", Severity::Warning, Some(Position::new(0, 0))),
        ]
    );
    assert!(refined.has_errors());
}

#[tokio::test]
async fn test_resolver_receives_script_and_environment() {
    let resolver = MockResolver::new();
    let registry = registry(resolver.clone());
    let script = build_script("plugins { java }").with_location("https://example.com/build.gradle.kts");

    registry.build_script().refine(&script, Some(&environment())).await.unwrap();

    let requests = resolver.requests().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].text, "plugins { java }");
    assert_eq!(requests[0].file, None);
    assert_eq!(requests[0].environment, environment());
    assert!(!requests[0].had_previous);
}

#[tokio::test]
async fn test_missing_environment_is_fatal() {
    let resolver = MockResolver::new();
    let registry = registry(resolver.clone());

    let result = registry.build_script().refine(&build_script(""), None).await;

    assert!(matches!(result, Err(RefineError::MissingEnvironment { .. })));
    assert_eq!(resolver.call_count(), 0);
}

#[tokio::test]
async fn test_resolver_failure_is_fatal() {
    let resolver = MockResolverBuilder::new()
        .with_classpath(["/repo/x.jar"])
        .with_error(ResolveError::NetworkError("repository unreachable".to_string()))
        .build();
    let registry = registry(resolver);

    let result = registry.build_script().refine(&build_script(""), Some(&environment())).await;

    match result {
        Err(RefineError::Resolver { script, source }) => {
            assert_eq!(script, "build.gradle.kts");
            assert_eq!(source, ResolveError::NetworkError("repository unreachable".to_string()));
        }
        other => panic!("expected resolver failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_refinement_never_alters_profile() {
    let registry = registry(
        MockResolverBuilder::new()
            .with_classpath(["/repo/x.jar"])
            .with_imports(["x.*"])
            .with_java_home("/jdk")
            .build(),
    );
    let before = registry.build_script().configuration().clone();

    registry.build_script().refine(&build_script(""), Some(&environment())).await.unwrap();
    registry.build_script().refine(&build_script(""), Some(&environment())).await.unwrap();

    assert_eq!(registry.build_script().configuration(), &before);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_refinements_are_independent() {
    let resolver = MockResolverBuilder::new().with_classpath(["/repo/x.jar"]).with_latency(10).build();
    let registry = Arc::new(registry(resolver.clone()));

    let mut handles = Vec::new();
    for i in 0..8 {
        let registry = Arc::clone(&registry);
        handles.push(tokio::spawn(async move {
            let script = StringScript::new(format!("// script {}", i)).with_name(format!("s{}.gradle.kts", i));
            let flavor = ScriptFlavor::ALL[i % 3];
            registry.get(flavor).refine(&script, Some(&environment())).await
        }));
    }

    for handle in handles {
        let refined = handle.await.unwrap().unwrap();
        assert_eq!(refined.configuration.classpath, vec![PathBuf::from("/repo/x.jar")]);
    }
    assert_eq!(resolver.call_count(), 8);
}

#[test]
fn test_blocking_refinement() {
    let registry = registry(MockResolverBuilder::new().with_java_home("/jdk/17").build());

    let refined = registry
        .init_script()
        .refine_blocking(&StringScript::new(""), Some(&environment()))
        .unwrap();

    assert_eq!(refined.configuration.jdk_home, Some(PathBuf::from("/jdk/17")));
}
