//! Configuration management for fixture validation runs
//!
//! This module provides runtime configuration loading from JSON files so the
//! catalog location, the default required construct set and report behaviour
//! can be changed without recompiling.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::DEFAULT_CATALOG_PATH;
use crate::report::RequiredPredicates;

/// Default config location, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "assets/fixture_config.json";

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub registry: RegistryConfig,
    pub report: ReportConfig,
}

/// Where fixtures come from and what they must contain
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Catalog JSON describing fixtures and extra predicates
    pub catalog_path: PathBuf,
    /// Directory fixture `path` entries are resolved against (defaults to the catalog's directory)
    pub fixtures_dir: Option<PathBuf>,
    /// Minimum construct set for fixtures whose catalog entry declares none
    pub required_predicates: Vec<String>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from(DEFAULT_CATALOG_PATH),
            fixtures_dir: None,
            required_predicates: vec![
                "hasFunction".to_string(),
                "hasClass".to_string(),
                "hasLoop".to_string(),
                "hasConditional".to_string(),
            ],
        }
    }
}

impl RegistryConfig {
    pub fn required(&self) -> RequiredPredicates {
        RequiredPredicates::with_default(self.required_predicates.clone())
    }

    /// Anchor relative paths at `base`, the directory holding the config file.
    fn resolve_relative_to(&mut self, base: &Path) {
        if self.catalog_path.is_relative() {
            self.catalog_path = base.join(&self.catalog_path);
        }
        if let Some(dir) = self.fixtures_dir.as_mut().filter(|dir| dir.is_relative()) {
            *dir = base.join(&*dir);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    #[default]
    Table,
    Json,
}

/// Report rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub format: ReportFormat,
    /// Exit non-zero when any fixture misses a required construct
    pub fail_on_anomaly: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: ReportFormat::Table,
            fail_on_anomaly: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from JSON file
    ///
    /// # Arguments
    /// * `path` - Path to JSON config file
    ///
    /// # Returns
    /// The parsed configuration, or the defaults if the file is missing or
    /// its JSON is invalid. Relative paths inside the file are resolved
    /// against the file's own directory.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<AppConfig>(&contents) {
                Ok(mut config) => {
                    let base = path.as_ref().parent().unwrap_or_else(|| Path::new(""));
                    config.registry.resolve_relative_to(base);
                    log::info!("[Config] Loaded configuration from {:?}", path.as_ref());
                    config
                }
                Err(err) => {
                    log::warn!(
                        "[Config] Failed to parse JSON from {:?}: {}. Using defaults.",
                        path.as_ref(),
                        err
                    );
                    Self::default()
                }
            },
            Err(err) => {
                log::debug!(
                    "[Config] No config file at {:?} ({}). Using defaults.",
                    path.as_ref(),
                    err
                );
                Self::default()
            }
        }
    }

    /// Load configuration from the default location
    pub fn load() -> Self {
        Self::load_from_file(DEFAULT_CONFIG_PATH)
    }
}
