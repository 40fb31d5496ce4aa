//! Registry + schema for the fixture catalog consumed by the CLI.
//!
//! The catalog declares which sample files are highlighter fixtures, which
//! extra predicates apply on top of the built-in constructs, and the minimum
//! construct set each fixture must keep. Consumers load the catalog and turn
//! it into a populated [`FixtureRegistry`].

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::CatalogError;
use crate::predicate::{default_predicates, Check, Construct};
use crate::registry::{Fixture, FixtureRegistry, Language};
use crate::report::RequiredPredicates;

/// Default catalog path bundled with the crate sources.
pub const DEFAULT_CATALOG_PATH: &str =
    concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures/catalog.json");

/// Machine-readable catalog containing all known fixtures.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FixtureCatalog {
    pub version: u32,
    #[serde(default)]
    pub predicates: Vec<CatalogPredicate>,
    pub fixtures: Vec<CatalogFixture>,
}

impl FixtureCatalog {
    /// Load catalog from disk when available, falling back to the embedded copy.
    pub fn load_from_default() -> Result<Self, CatalogError> {
        match fs::read_to_string(DEFAULT_CATALOG_PATH) {
            Ok(contents) => Self::from_json(&contents),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Self::from_json(include_str!("../fixtures/catalog.json"))
            }
            Err(err) => Err(CatalogError::Io {
                path: DEFAULT_CATALOG_PATH.to_string(),
                details: err.to_string(),
            }),
        }
    }

    /// Load and validate the catalog at `path`.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path).map_err(|err| CatalogError::Io {
            path: path.display().to_string(),
            details: err.to_string(),
        })?;
        Self::from_json(&contents)
    }

    /// Parse catalog contents from JSON and validate invariants.
    pub fn from_json(data: &str) -> Result<Self, CatalogError> {
        let mut catalog: FixtureCatalog =
            serde_json::from_str(data).map_err(|err| CatalogError::Parse {
                details: err.to_string(),
            })?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Return a single fixture entry by name, if present.
    pub fn find(&self, name: &str) -> Option<&CatalogFixture> {
        self.fixtures.iter().find(|fixture| fixture.name == name)
    }

    /// Every predicate name a registry built from this catalog will carry.
    pub fn predicate_names(&self) -> Vec<&str> {
        Construct::ALL
            .iter()
            .map(|construct| construct.name())
            .chain(self.predicates.iter().map(|p| p.name.as_str()))
            .collect()
    }

    /// Per-fixture requirements, falling back to `default` for bare entries.
    pub fn required(&self, default: Vec<String>) -> RequiredPredicates {
        let mut required = RequiredPredicates::with_default(default);
        for fixture in &self.fixtures {
            if !fixture.required.is_empty() {
                required.insert(fixture.name.clone(), fixture.required.clone());
            }
        }
        required
    }

    /// Build a registry: built-in constructs, catalog predicates, then fixtures.
    ///
    /// Fixture `path` entries are resolved relative to `root`.
    pub fn into_registry(&self, root: &Path) -> Result<FixtureRegistry, CatalogError> {
        self.registry_for(root, |_| true)
    }

    /// Like [`into_registry`](Self::into_registry) but only loads fixtures accepted by `filter`.
    pub fn registry_for<F>(
        &self,
        root: &Path,
        filter: F,
    ) -> Result<FixtureRegistry, CatalogError>
    where
        F: Fn(&CatalogFixture) -> bool,
    {
        let mut registry = FixtureRegistry::new();
        for predicate in default_predicates() {
            registry.push_predicate(predicate)?;
        }
        for predicate in &self.predicates {
            registry.add_predicate(predicate.name.clone(), predicate.check.to_check()?)?;
        }
        for entry in self.fixtures.iter().filter(|entry| filter(entry)) {
            registry.register_fixture(entry.load(root)?)?;
        }
        info!(
            fixtures = registry.len(),
            predicates = registry.predicate_count(),
            "[Catalog] Registry populated"
        );
        Ok(registry)
    }

    fn validate(&mut self) -> Result<(), CatalogError> {
        if self.version == 0 {
            return Err(invalid("catalog version must be > 0"));
        }
        if self.fixtures.is_empty() {
            return Err(invalid("catalog must contain at least one fixture"));
        }

        let mut predicate_names: HashSet<String> = Construct::ALL
            .iter()
            .map(|construct| construct.name().to_string())
            .collect();
        for predicate in &self.predicates {
            predicate.validate()?;
            if !predicate_names.insert(predicate.name.clone()) {
                return Err(invalid(format!(
                    "duplicate predicate name detected: {}",
                    predicate.name
                )));
            }
        }

        let mut seen = HashSet::new();
        for entry in &mut self.fixtures {
            if !seen.insert(entry.name.clone()) {
                return Err(invalid(format!(
                    "duplicate fixture name detected: {}",
                    entry.name
                )));
            }
            entry.normalize();
            entry.validate(&predicate_names)?;
        }
        Ok(())
    }
}

/// One fixture declared by the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogFixture {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// File holding the fixture text, relative to the catalog root.
    #[serde(default)]
    pub path: Option<String>,
    /// Inline fixture text.
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub language: Option<Language>,
    /// Predicates this fixture must keep passing.
    #[serde(default)]
    pub required: Vec<String>,
}

impl CatalogFixture {
    /// Read the fixture text and build an unregistered [`Fixture`].
    pub fn load(&self, root: &Path) -> Result<Fixture, CatalogError> {
        let (content, language) = match (&self.path, &self.content) {
            (Some(path), _) => {
                let full = root.join(path);
                let content = fs::read_to_string(&full).map_err(|err| CatalogError::Io {
                    path: full.display().to_string(),
                    details: err.to_string(),
                })?;
                (content, Language::from_path(&full))
            }
            (None, Some(content)) => (content.clone(), Language::Unknown),
            (None, None) => {
                return Err(invalid(format!(
                    "fixture {} must declare a path or inline content",
                    self.name
                )))
            }
        };
        let language = self.language.unwrap_or(language);
        Ok(Fixture::new(self.name.clone(), content).with_language(language))
    }

    pub fn source_label(&self) -> String {
        match (&self.path, &self.content) {
            (Some(path), _) => path.clone(),
            _ => "<inline>".to_string(),
        }
    }

    fn normalize(&mut self) {
        self.required = self
            .required
            .iter()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect();
    }

    fn validate(&self, predicates: &HashSet<String>) -> Result<(), CatalogError> {
        if self.name.trim().is_empty() {
            return Err(invalid("fixture name cannot be empty"));
        }
        match (&self.path, &self.content) {
            (Some(_), Some(_)) => {
                return Err(invalid(format!(
                    "fixture {} declares both path and content",
                    self.name
                )))
            }
            (None, None) => {
                return Err(invalid(format!(
                    "fixture {} must declare a path or inline content",
                    self.name
                )))
            }
            (Some(path), None) if path.trim().is_empty() => {
                return Err(invalid(format!("fixture {} path cannot be empty", self.name)))
            }
            _ => {}
        }
        for name in &self.required {
            if !predicates.contains(name) {
                return Err(invalid(format!(
                    "fixture {} requires unknown predicate {}",
                    self.name, name
                )));
            }
        }
        Ok(())
    }
}

/// Extra predicate declared by the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogPredicate {
    pub name: String,
    #[serde(flatten)]
    pub check: CheckDescriptor,
}

impl CatalogPredicate {
    fn validate(&self) -> Result<(), CatalogError> {
        if self.name.trim().is_empty() {
            return Err(invalid("predicate name cannot be empty"));
        }
        self.check.to_check().map(|_| ())
    }
}

/// Serializable mirror of [`Check`] (closures cannot be declared in JSON).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CheckDescriptor {
    Construct { construct: String },
    Contains { needle: String },
    Pattern { pattern: String },
}

impl CheckDescriptor {
    pub fn to_check(&self) -> Result<Check, CatalogError> {
        match self {
            CheckDescriptor::Construct { construct } => Construct::from_name(construct)
                .map(Check::Construct)
                .ok_or_else(|| invalid(format!("unknown construct {construct}"))),
            CheckDescriptor::Contains { needle } => {
                if needle.is_empty() {
                    return Err(invalid("contains needle cannot be empty"));
                }
                Ok(Check::Contains(needle.clone()))
            }
            CheckDescriptor::Pattern { pattern } => Check::pattern(pattern)
                .map_err(|err| invalid(format!("pattern {pattern:?} does not compile: {err}"))),
        }
    }
}

/// Directory fixture paths are resolved against for a catalog file.
pub fn catalog_root(catalog_path: &Path) -> PathBuf {
    catalog_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn invalid(reason: impl Into<String>) -> CatalogError {
    CatalogError::Invalid {
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests;
