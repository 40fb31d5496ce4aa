//! Integration tests for the public registry API
//!
//! These tests drive the crate the way an external harness would:
//! - Register fixtures and predicates through the re-exported types
//! - Validate single fixtures and whole registries
//! - Check typed error propagation for every failure kind
//! - Build reports from the bundled catalog

use std::path::Path;

use highlight_fixtures::catalog::{catalog_root, FixtureCatalog, DEFAULT_CATALOG_PATH};
use highlight_fixtures::report::{RequiredPredicates, ValidationReport};
use highlight_fixtures::{
    Check, Construct, ErrorCode, FixtureRegistry, RegisterOutcome, RegistryError,
};

const SAMPLE: &str = r#"class Downloader {
  async fetchAll(urls) {
    for (const url of urls) {
      console.log(`fetching ${url}`);
    }
  }
}
"#;

fn sample_registry() -> FixtureRegistry {
    let mut registry = FixtureRegistry::new();
    assert_eq!(
        registry.register("sample", SAMPLE).unwrap(),
        RegisterOutcome::Inserted
    );
    registry.add_predicate("hasClass", Construct::Class).unwrap();
    registry.add_predicate("hasAsync", Construct::Async).unwrap();
    registry.add_predicate("hasLoop", Construct::Loop).unwrap();
    registry
        .add_predicate("hasTemplateLiteral", Construct::TemplateLiteral)
        .unwrap();
    registry
}

/// Sample fixture with a class, async method, loop and template literal
#[test]
fn test_sample_scenario_passes_every_predicate() {
    let registry = sample_registry();
    let results = registry.validate("sample").unwrap();
    assert_eq!(results.len(), 4);
    for result in &results {
        assert!(result.passed, "{} should pass", result.predicate);
    }
}

/// Whitespace-only content is rejected with a typed error
#[test]
fn test_empty_ish_scenario_is_invalid() {
    let mut registry = FixtureRegistry::new();
    let err = registry.register("empty-ish", " \n\t \n").unwrap_err();
    assert!(matches!(err, RegistryError::InvalidFixture { .. }));
    assert_eq!(err.code(), 3001);
}

#[test]
fn test_errors_are_local_to_the_call() {
    let mut registry = sample_registry();

    assert!(matches!(
        registry.add_predicate("hasLoop", Check::Contains("for".into())),
        Err(RegistryError::DuplicatePredicate { .. })
    ));
    assert!(matches!(
        registry.validate("nope"),
        Err(RegistryError::UnknownFixture { .. })
    ));

    // The registry is untouched and keeps validating.
    assert_eq!(registry.predicate_count(), 4);
    assert!(registry.validate("sample").is_ok());
}

#[test]
fn test_repeated_validation_is_identical() {
    let registry = sample_registry();
    let first: Vec<_> = registry.validate_all().collect();
    let second: Vec<_> = registry.validate_all().collect();
    assert_eq!(first, second);
    assert_eq!(registry.validate("sample").unwrap(), first[0].results);
}

#[test]
fn test_report_triples_cover_every_pair() {
    let mut registry = sample_registry();
    registry.register("plain", "const x = 1;").unwrap();

    let report = ValidationReport::build(
        registry.validate_all(),
        &RequiredPredicates::with_default(vec!["hasClass".to_string()]),
    );
    let triples: Vec<_> = report.records().collect();
    assert_eq!(triples.len(), 2 * 4);
    assert!(triples
        .iter()
        .filter(|t| t.fixture == "plain")
        .all(|t| !t.passed));
    assert_eq!(report.anomalies.len(), 1);
    assert_eq!(report.anomalies[0].fixture, "plain");
}

#[test]
fn test_bundled_catalog_round_trip() {
    let catalog = FixtureCatalog::load_from_default().unwrap();
    let registry = catalog
        .into_registry(&catalog_root(Path::new(DEFAULT_CATALOG_PATH)))
        .unwrap();

    let names: Vec<&str> = registry.fixtures().map(|f| f.name()).collect();
    assert_eq!(names, vec!["javascript-sample", "python-sample"]);

    let js = registry.validate("javascript-sample").unwrap();
    assert_eq!(js.len(), registry.predicate_count());
}
