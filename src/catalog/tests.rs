use super::*;
use crate::error::ErrorCode;
use crate::report::ValidationReport;

fn sample_catalog_json() -> String {
    serde_json::json!({
        "version": 1,
        "predicates": [
            {"name": "logsToConsole", "kind": "contains", "needle": "console.log"}
        ],
        "fixtures": [
            {
                "name": "inline",
                "content": "class A {\n  async run() {\n    console.log(`x ${1}`);\n  }\n}\n",
                "required": ["hasClass", "hasAsync", "logsToConsole"]
            }
        ]
    })
    .to_string()
}

fn invalid_reason(json: serde_json::Value) -> String {
    match FixtureCatalog::from_json(&json.to_string()).unwrap_err() {
        CatalogError::Invalid { reason } => reason,
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn parses_valid_catalog() {
    let catalog = FixtureCatalog::from_json(&sample_catalog_json()).unwrap();
    assert_eq!(catalog.fixtures.len(), 1);
    let entry = catalog.find("inline").unwrap();
    assert_eq!(entry.source_label(), "<inline>");
    assert_eq!(entry.required.len(), 3);
    assert_eq!(catalog.predicate_names().len(), Construct::ALL.len() + 1);
}

#[test]
fn rejects_malformed_json() {
    let err = FixtureCatalog::from_json("{\"version\": 1,").unwrap_err();
    assert_eq!(err.code(), crate::error::CatalogErrorCodes::PARSE);
}

#[test]
fn rejects_zero_version_and_empty_catalog() {
    let reason = invalid_reason(serde_json::json!({"version": 0, "fixtures": []}));
    assert!(reason.contains("version"));

    let reason = invalid_reason(serde_json::json!({"version": 1, "fixtures": []}));
    assert!(reason.contains("at least one fixture"));
}

#[test]
fn rejects_duplicate_fixture_names() {
    let reason = invalid_reason(serde_json::json!({
        "version": 1,
        "fixtures": [
            {"name": "dup", "content": "let a = 1;"},
            {"name": "dup", "content": "let b = 2;"}
        ]
    }));
    assert!(reason.contains("duplicate fixture"));
}

#[test]
fn rejects_predicate_shadowing_builtin() {
    let reason = invalid_reason(serde_json::json!({
        "version": 1,
        "predicates": [{"name": "hasClass", "kind": "contains", "needle": "class"}],
        "fixtures": [{"name": "a", "content": "class A {}"}]
    }));
    assert!(reason.contains("duplicate predicate"));
}

#[test]
fn rejects_unknown_required_predicate() {
    let reason = invalid_reason(serde_json::json!({
        "version": 1,
        "fixtures": [{"name": "a", "content": "class A {}", "required": ["hasGoto"]}]
    }));
    assert!(reason.contains("unknown predicate hasGoto"));
}

#[test]
fn rejects_path_and_content_together() {
    let reason = invalid_reason(serde_json::json!({
        "version": 1,
        "fixtures": [{"name": "a", "path": "a.js", "content": "class A {}"}]
    }));
    assert!(reason.contains("both path and content"));

    let reason = invalid_reason(serde_json::json!({
        "version": 1,
        "fixtures": [{"name": "a"}]
    }));
    assert!(reason.contains("path or inline content"));
}

#[test]
fn rejects_uncompilable_pattern() {
    let reason = invalid_reason(serde_json::json!({
        "version": 1,
        "predicates": [{"name": "broken", "kind": "pattern", "pattern": "(unclosed"}],
        "fixtures": [{"name": "a", "content": "class A {}"}]
    }));
    assert!(reason.contains("does not compile"));
}

#[test]
fn rejects_unknown_construct_alias() {
    let reason = invalid_reason(serde_json::json!({
        "version": 1,
        "predicates": [{"name": "alias", "kind": "construct", "construct": "hasGoto"}],
        "fixtures": [{"name": "a", "content": "class A {}"}]
    }));
    assert!(reason.contains("unknown construct"));
}

#[test]
fn blank_required_entries_are_dropped() {
    let catalog = FixtureCatalog::from_json(
        &serde_json::json!({
            "version": 1,
            "fixtures": [{"name": "a", "content": "class A {}", "required": [" hasClass ", ""]}]
        })
        .to_string(),
    )
    .unwrap();
    assert_eq!(catalog.fixtures[0].required, vec!["hasClass".to_string()]);
}

#[test]
fn builds_registry_from_inline_catalog() {
    let catalog = FixtureCatalog::from_json(&sample_catalog_json()).unwrap();
    let registry = catalog.into_registry(Path::new(".")).unwrap();
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.predicate_count(), Construct::ALL.len() + 1);

    let report = ValidationReport::build(registry.validate_all(), &catalog.required(Vec::new()));
    assert!(!report.has_anomalies(), "{:?}", report.anomalies);
}

#[test]
fn resolves_fixture_paths_against_root() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("sample.py"), "def f():\n    return 1\n").unwrap();
    let catalog = FixtureCatalog::from_json(
        &serde_json::json!({
            "version": 1,
            "fixtures": [{"name": "py", "path": "sample.py"}]
        })
        .to_string(),
    )
    .unwrap();

    let registry = catalog.into_registry(dir.path()).unwrap();
    let fixture = registry.fixture("py").unwrap();
    assert_eq!(fixture.language(), Language::Python);
}

#[test]
fn missing_fixture_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = FixtureCatalog::from_json(
        &serde_json::json!({
            "version": 1,
            "fixtures": [{"name": "gone", "path": "gone.js"}]
        })
        .to_string(),
    )
    .unwrap();
    let err = catalog.into_registry(dir.path()).unwrap_err();
    assert!(matches!(err, CatalogError::Io { .. }));
}

#[test]
fn whitespace_inline_fixture_surfaces_registry_error() {
    let catalog = FixtureCatalog::from_json(
        &serde_json::json!({
            "version": 1,
            "fixtures": [{"name": "empty-ish", "content": "   "}]
        })
        .to_string(),
    )
    .unwrap();
    let err = catalog.into_registry(Path::new(".")).unwrap_err();
    assert!(matches!(
        err,
        CatalogError::Registry(crate::error::RegistryError::InvalidFixture { .. })
    ));
}

#[test]
fn filtered_registry_loads_subset() {
    let catalog = FixtureCatalog::from_json(
        &serde_json::json!({
            "version": 1,
            "fixtures": [
                {"name": "a", "content": "class A {}"},
                {"name": "b", "content": "class B {}"}
            ]
        })
        .to_string(),
    )
    .unwrap();
    let registry = catalog
        .registry_for(Path::new("."), |entry| entry.name == "b")
        .unwrap();
    assert_eq!(registry.len(), 1);
    assert!(registry.fixture("b").is_some());
}

#[test]
fn bundled_catalog_fixtures_keep_their_required_constructs() {
    let catalog = FixtureCatalog::load_from_default().unwrap();
    let root = catalog_root(Path::new(DEFAULT_CATALOG_PATH));
    let registry = catalog.into_registry(&root).unwrap();
    assert_eq!(registry.len(), 2);

    let report = ValidationReport::build(registry.validate_all(), &catalog.required(Vec::new()));
    assert!(!report.has_anomalies(), "{}", report.render_table());
}
