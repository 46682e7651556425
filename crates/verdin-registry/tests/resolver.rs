mod support;

use pretty_assertions::assert_eq;
use support::{EnvGuard, LogBuffer};
use verdin_config::{HarnessConfig, SUITE_ENV_VAR};
use verdin_core::schema::CaseFailure;
use verdin_core::{Suite, TestCase};
use verdin_registry::{ResolveError, SuiteInitError, SuiteRegistry};

#[derive(Default)]
struct SmokeSuite;

impl Suite for SmokeSuite {
    fn tests(&self) -> Vec<TestCase> {
        vec![
            TestCase::new("adds", || Ok(())),
            TestCase::new("divides", || Err(CaseFailure::message("division by zero"))),
        ]
    }
}

#[derive(Default)]
struct NightlySuite;

impl Suite for NightlySuite {
    fn tests(&self) -> Vec<TestCase> {
        vec![TestCase::new("soak", || Ok(()))]
    }
}

fn registry() -> SuiteRegistry {
    let mut registry = SuiteRegistry::new();
    registry.register::<SmokeSuite>("smoke").unwrap();
    registry.register::<NightlySuite>("nightly").unwrap();
    registry
        .register_with("flaky", || Err(SuiteInitError::new("backend offline")))
        .unwrap();
    registry
}

fn capture<R>(buffer: &LogBuffer, f: impl FnOnce() -> R) -> R {
    let subscriber = tracing_subscriber::fmt()
        .with_writer(buffer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::TRACE)
        .finish();
    tracing::subscriber::with_default(subscriber, f)
}

#[test]
fn configured_suite_resolves_to_the_registered_type() {
    let _env = EnvGuard::set(SUITE_ENV_VAR, "smoke");

    let handle = registry()
        .resolve_configured(&HarnessConfig::default())
        .unwrap();
    assert_eq!(handle.name(), "smoke");
    assert_eq!(handle.case_ids(), vec!["adds", "divides"]);

    let report = handle.run();
    assert!(!report.success);
    assert_eq!(report.summary.total, 2);
    assert_eq!(report.summary.passed, 1);
    assert_eq!(report.summary.failed, 1);
}

#[test]
fn config_file_value_is_used_when_env_is_unset() {
    let _env = EnvGuard::unset(SUITE_ENV_VAR);

    let config = HarnessConfig {
        suite: Some("nightly".to_string()),
        ..HarnessConfig::default()
    };
    let handle = registry().resolve_configured(&config).unwrap();
    assert_eq!(handle.name(), "nightly");
    assert_eq!(handle.case_ids(), vec!["soak"]);
}

#[test]
fn env_override_shadows_the_config_file_value() {
    let _env = EnvGuard::set(SUITE_ENV_VAR, "nightly");

    let config = HarnessConfig {
        suite: Some("smoke".to_string()),
        ..HarnessConfig::default()
    };
    let handle = registry().resolve_configured(&config).unwrap();
    assert_eq!(handle.name(), "nightly");
}

#[test]
fn unknown_identifier_is_distinct_from_unconfigured() {
    let _env = EnvGuard::set(SUITE_ENV_VAR, "does.not.exist");
    let err = registry()
        .resolve_configured(&HarnessConfig::default())
        .unwrap_err();
    match err {
        ResolveError::UnknownSuite { name } => assert_eq!(name, "does.not.exist"),
        other => panic!("expected UnknownSuite, got {other:?}"),
    }
}

#[test]
fn unconfigured_resolution_reports_not_configured() {
    let _env = EnvGuard::unset(SUITE_ENV_VAR);
    let err = registry()
        .resolve_configured(&HarnessConfig::default())
        .unwrap_err();
    assert!(matches!(err, ResolveError::NotConfigured));
}

#[test]
fn identifier_is_re_read_on_every_call() {
    let _env = EnvGuard::set(SUITE_ENV_VAR, "smoke");
    let registry = registry();
    let config = HarnessConfig::default();

    assert_eq!(registry.resolve_configured(&config).unwrap().name(), "smoke");

    std::env::set_var(SUITE_ENV_VAR, "nightly");
    assert_eq!(
        registry.resolve_configured(&config).unwrap().name(),
        "nightly"
    );
}

#[test]
fn construction_failure_surfaces_through_configured_resolution() {
    let _env = EnvGuard::set(SUITE_ENV_VAR, "flaky");
    let err = registry()
        .resolve_configured(&HarnessConfig::default())
        .unwrap_err();
    match err {
        ResolveError::Construction { name, source } => {
            assert_eq!(name, "flaky");
            assert_eq!(source.to_string(), "backend offline");
        }
        other => panic!("expected Construction, got {other:?}"),
    }
}

#[test]
fn tolerant_resolution_logs_once_and_returns_none() {
    let _env = EnvGuard::set(SUITE_ENV_VAR, "does.not.exist");

    let buffer = LogBuffer::new();
    let resolved = capture(&buffer, || {
        registry().resolve_configured_or_empty(&HarnessConfig::default())
    });
    assert!(resolved.is_none());

    let text = buffer.contents();
    assert_eq!(
        text.matches("failed to resolve configured suite").count(),
        1,
        "{text}"
    );
    assert!(text.contains("does.not.exist"), "{text}");
    assert!(text.contains("verdin.registry"), "{text}");
}

#[test]
fn tolerant_resolution_is_silent_on_success() {
    let _env = EnvGuard::set(SUITE_ENV_VAR, "smoke");

    let buffer = LogBuffer::new();
    let resolved = capture(&buffer, || {
        registry().resolve_configured_or_empty(&HarnessConfig::default())
    });

    let handle = resolved.expect("configured suite should resolve");
    assert_eq!(handle.name(), "smoke");
    let text = buffer.contents();
    assert!(!text.contains("failed to resolve configured suite"), "{text}");
}
