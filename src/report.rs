//! Pass/fail reporting over registry results.
//!
//! A [`ValidationReport`] collects the per-fixture results from
//! [`FixtureRegistry::validate_all`](crate::registry::FixtureRegistry::validate_all),
//! flattens them into `{fixture, predicate, passed}` records and raises
//! anomalies for fixtures that miss their required construct set.

use std::collections::HashMap;
use std::fmt::Write as _;

use serde::Serialize;

use crate::registry::FixtureReport;

/// Minimum predicate sets a fixture must satisfy to count as valid input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequiredPredicates {
    per_fixture: HashMap<String, Vec<String>>,
    default: Vec<String>,
}

impl RequiredPredicates {
    /// Requirements applied to fixtures without an explicit entry.
    pub fn with_default(default: Vec<String>) -> Self {
        Self {
            per_fixture: HashMap::new(),
            default,
        }
    }

    pub fn insert(&mut self, fixture: impl Into<String>, required: Vec<String>) {
        self.per_fixture.insert(fixture.into(), required);
    }

    pub fn for_fixture(&self, fixture: &str) -> &[String] {
        match self.per_fixture.get(fixture) {
            Some(required) if !required.is_empty() => required,
            _ => &self.default,
        }
    }
}

/// One flattened result triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationRecord {
    pub fixture: String,
    pub predicate: String,
    pub passed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyKind {
    MissingRequiredConstruct,
    UnevaluatedRequirement,
    NoPredicates,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FixtureAnomaly {
    pub kind: AnomalyKind,
    pub fixture: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predicate: Option<String>,
    pub message: String,
}

impl FixtureAnomaly {
    fn missing(fixture: &str, predicate: &str) -> Self {
        Self {
            kind: AnomalyKind::MissingRequiredConstruct,
            fixture: fixture.to_string(),
            predicate: Some(predicate.to_string()),
            message: format!("Fixture {fixture} no longer satisfies required predicate {predicate}"),
        }
    }

    fn unevaluated(fixture: &str, predicate: &str) -> Self {
        Self {
            kind: AnomalyKind::UnevaluatedRequirement,
            fixture: fixture.to_string(),
            predicate: Some(predicate.to_string()),
            message: format!(
                "Fixture {fixture} requires predicate {predicate} which is not registered"
            ),
        }
    }

    fn no_predicates(fixture: &str) -> Self {
        Self {
            kind: AnomalyKind::NoPredicates,
            fixture: fixture.to_string(),
            predicate: None,
            message: format!("Fixture {fixture} was validated against zero predicates"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationSummary {
    pub fixtures: usize,
    pub checks: usize,
    pub passed: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub summary: ValidationSummary,
    pub fixtures: Vec<FixtureReport>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub anomalies: Vec<FixtureAnomaly>,
}

impl ValidationReport {
    pub fn build<I>(reports: I, required: &RequiredPredicates) -> Self
    where
        I: IntoIterator<Item = FixtureReport>,
    {
        let mut summary = ValidationSummary::default();
        let mut anomalies = Vec::new();
        let mut fixtures = Vec::new();

        for report in reports {
            summary.fixtures += 1;
            summary.checks += report.results.len();
            let passed = report.results.iter().filter(|r| r.passed).count();
            summary.passed += passed;
            summary.failed += report.results.len() - passed;

            if report.results.is_empty() {
                anomalies.push(FixtureAnomaly::no_predicates(&report.fixture));
            }
            for predicate in required.for_fixture(&report.fixture) {
                match report.passed(predicate) {
                    Some(true) => {}
                    Some(false) => {
                        anomalies.push(FixtureAnomaly::missing(&report.fixture, predicate))
                    }
                    None => {
                        anomalies.push(FixtureAnomaly::unevaluated(&report.fixture, predicate))
                    }
                }
            }
            fixtures.push(report);
        }

        Self {
            summary,
            fixtures,
            anomalies,
        }
    }

    pub fn has_anomalies(&self) -> bool {
        !self.anomalies.is_empty()
    }

    /// Flattened `{fixture, predicate, passed}` triples in report order.
    pub fn records(&self) -> impl Iterator<Item = ValidationRecord> + '_ {
        self.fixtures.iter().flat_map(|report| {
            report.results.iter().map(move |result| ValidationRecord {
                fixture: report.fixture.clone(),
                predicate: result.predicate.clone(),
                passed: result.passed,
            })
        })
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn render_table(&self) -> String {
        let mut out = String::new();
        let width = self
            .fixtures
            .iter()
            .flat_map(|report| report.results.iter())
            .map(|result| result.predicate.len())
            .max()
            .unwrap_or(0)
            .max("predicate".len());

        for report in &self.fixtures {
            let _ = writeln!(out, "Fixture {}", report.fixture);
            for result in &report.results {
                let verdict = if result.passed { "pass" } else { "FAIL" };
                let _ = writeln!(out, "  {:<width$}  {verdict}", result.predicate);
            }
        }

        let _ = writeln!(
            out,
            "Summary: {} fixtures, {} checks, {} passed, {} failed",
            self.summary.fixtures, self.summary.checks, self.summary.passed, self.summary.failed
        );
        if !self.anomalies.is_empty() {
            let _ = writeln!(out, "Anomalies:");
            for anomaly in &self.anomalies {
                let _ = writeln!(out, "  - {}", anomaly.message);
            }
        }
        out
    }
}
