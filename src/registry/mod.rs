//! Fixture registry + validator.
//!
//! [`FixtureRegistry`] owns a set of named fixtures and an ordered list of
//! predicates. It is an ordinary value scoped to one validation run: callers
//! build it, validate, and drop it. Nothing here is global or shared.

use std::collections::HashMap;
use std::slice;

use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::error::RegistryError;
use crate::predicate::{Check, Evaluate, Predicate};

mod fixture;

pub use fixture::{Fixture, Language};

/// What `register` did with the fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterOutcome {
    Inserted,
    /// Name was already present; content replaced in place.
    Replaced,
}

/// Outcome of one predicate against one fixture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PredicateResult {
    pub predicate: String,
    pub passed: bool,
}

/// Every predicate result for a single fixture, in predicate order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FixtureReport {
    pub fixture: String,
    pub results: Vec<PredicateResult>,
}

impl FixtureReport {
    pub fn all_passed(&self) -> bool {
        self.results.iter().all(|result| result.passed)
    }

    pub fn passed(&self, predicate: &str) -> Option<bool> {
        self.results
            .iter()
            .find(|result| result.predicate == predicate)
            .map(|result| result.passed)
    }
}

#[derive(Debug, Default)]
pub struct FixtureRegistry {
    fixtures: Vec<Fixture>,
    index: HashMap<String, usize>,
    predicates: Vec<Predicate>,
}

impl FixtureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `content` under `name`.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<RegisterOutcome, RegistryError> {
        self.register_fixture(Fixture::new(name, content))
    }

    /// Register a prebuilt fixture. Re-registering a name keeps its position.
    pub fn register_fixture(
        &mut self,
        fixture: Fixture,
    ) -> Result<RegisterOutcome, RegistryError> {
        if fixture.name().trim().is_empty() {
            return Err(RegistryError::InvalidFixture {
                name: fixture.name().to_string(),
                reason: "fixture name cannot be empty".to_string(),
            });
        }
        if fixture.content().trim().is_empty() {
            return Err(RegistryError::InvalidFixture {
                name: fixture.name().to_string(),
                reason: "content is empty or whitespace-only".to_string(),
            });
        }

        match self.index.get(fixture.name()) {
            Some(&slot) => {
                warn!(
                    fixture = fixture.name(),
                    "[Registry] Fixture re-registered; replacing previous content"
                );
                self.fixtures[slot] = fixture;
                Ok(RegisterOutcome::Replaced)
            }
            None => {
                debug!(
                    fixture = fixture.name(),
                    language = %fixture.language(),
                    lines = fixture.line_count(),
                    "[Registry] Fixture registered"
                );
                self.index
                    .insert(fixture.name().to_string(), self.fixtures.len());
                self.fixtures.push(fixture);
                Ok(RegisterOutcome::Inserted)
            }
        }
    }

    /// Append a predicate. Names must be unique.
    pub fn add_predicate(
        &mut self,
        name: impl Into<String>,
        check: impl Into<Check>,
    ) -> Result<(), RegistryError> {
        self.push_predicate(Predicate::new(name, check))
    }

    pub fn push_predicate(&mut self, predicate: Predicate) -> Result<(), RegistryError> {
        if predicate.name().trim().is_empty() {
            return Err(RegistryError::InvalidPredicate {
                name: predicate.name().to_string(),
                reason: "predicate name cannot be empty".to_string(),
            });
        }
        if self.has_predicate(predicate.name()) {
            return Err(RegistryError::DuplicatePredicate {
                name: predicate.name().to_string(),
            });
        }
        debug!(
            predicate = predicate.name(),
            kind = predicate.check().kind(),
            "[Registry] Predicate added"
        );
        self.predicates.push(predicate);
        Ok(())
    }

    /// Run every predicate against the named fixture, in registration order.
    pub fn validate(&self, fixture_name: &str) -> Result<Vec<PredicateResult>, RegistryError> {
        let fixture = self
            .fixture(fixture_name)
            .ok_or_else(|| RegistryError::UnknownFixture {
                name: fixture_name.to_string(),
            })?;
        Ok(self.evaluate(fixture))
    }

    /// Lazily validate every fixture in registration order.
    ///
    /// Each call starts a fresh pass from the first fixture.
    pub fn validate_all(&self) -> ValidateAll<'_> {
        ValidateAll {
            registry: self,
            fixtures: self.fixtures.iter(),
        }
    }

    pub fn fixture(&self, name: &str) -> Option<&Fixture> {
        self.index.get(name).map(|&slot| &self.fixtures[slot])
    }

    pub fn fixtures(&self) -> impl ExactSizeIterator<Item = &Fixture> + '_ {
        self.fixtures.iter()
    }

    pub fn predicate_names(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.predicates.iter().map(Predicate::name)
    }

    pub fn has_predicate(&self, name: &str) -> bool {
        self.predicates
            .iter()
            .any(|predicate| predicate.name() == name)
    }

    pub fn len(&self) -> usize {
        self.fixtures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fixtures.is_empty()
    }

    pub fn predicate_count(&self) -> usize {
        self.predicates.len()
    }

    fn evaluate(&self, fixture: &Fixture) -> Vec<PredicateResult> {
        self.predicates
            .iter()
            .map(|predicate| {
                let passed = predicate.evaluate(fixture.content());
                trace!(
                    fixture = fixture.name(),
                    predicate = predicate.name(),
                    passed,
                    "[Registry] Predicate evaluated"
                );
                PredicateResult {
                    predicate: predicate.name().to_string(),
                    passed,
                }
            })
            .collect()
    }
}

/// Lazy pass over every registered fixture. See [`FixtureRegistry::validate_all`].
pub struct ValidateAll<'a> {
    registry: &'a FixtureRegistry,
    fixtures: slice::Iter<'a, Fixture>,
}

impl Iterator for ValidateAll<'_> {
    type Item = FixtureReport;

    fn next(&mut self) -> Option<Self::Item> {
        let fixture = self.fixtures.next()?;
        Some(FixtureReport {
            fixture: fixture.name().to_string(),
            results: self.registry.evaluate(fixture),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.fixtures.size_hint()
    }
}

impl ExactSizeIterator for ValidateAll<'_> {}
