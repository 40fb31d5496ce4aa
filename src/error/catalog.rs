// Catalog error types and constants

use crate::error::{ErrorCode, RegistryError};
use log::error;
use std::fmt;

/// Catalog error code constants
///
/// Error code range: 4001-4004
pub struct CatalogErrorCodes {}

impl CatalogErrorCodes {
    /// Catalog or fixture file could not be read
    pub const IO: i32 = 4001;

    /// Catalog JSON could not be parsed
    pub const PARSE: i32 = 4002;

    /// Catalog parsed but violates an invariant
    pub const INVALID: i32 = 4003;

    /// Registry rejected a catalog entry
    pub const REGISTRY: i32 = 4004;
}

/// Log a catalog error with structured context
pub fn log_catalog_error(err: &CatalogError, context: &str) {
    error!(
        "Catalog error in {}: code={}, component=FixtureCatalog, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Errors raised while loading a fixture catalog
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// Reading the catalog or a fixture file failed
    Io { path: String, details: String },

    /// Catalog JSON was malformed
    Parse { details: String },

    /// Catalog violates an invariant (duplicate names, unknown predicates...)
    Invalid { reason: String },

    /// A catalog entry was rejected by the registry
    Registry(RegistryError),
}

impl ErrorCode for CatalogError {
    fn code(&self) -> i32 {
        match self {
            CatalogError::Io { .. } => CatalogErrorCodes::IO,
            CatalogError::Parse { .. } => CatalogErrorCodes::PARSE,
            CatalogError::Invalid { .. } => CatalogErrorCodes::INVALID,
            CatalogError::Registry(_) => CatalogErrorCodes::REGISTRY,
        }
    }

    fn message(&self) -> String {
        match self {
            CatalogError::Io { path, details } => {
                format!("Failed to read {}: {}", path, details)
            }
            CatalogError::Parse { details } => {
                format!("Failed to parse fixture catalog JSON: {}", details)
            }
            CatalogError::Invalid { reason } => format!("Invalid catalog: {}", reason),
            CatalogError::Registry(err) => err.message(),
        }
    }
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CatalogError (code {}): {}", self.code(), self.message())
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Registry(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RegistryError> for CatalogError {
    fn from(err: RegistryError) -> Self {
        CatalogError::Registry(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_error_codes() {
        assert_eq!(
            CatalogError::Io {
                path: "x".into(),
                details: "nope".into()
            }
            .code(),
            4001
        );
        assert_eq!(
            CatalogError::Parse {
                details: "eof".into()
            }
            .code(),
            4002
        );
        assert_eq!(
            CatalogError::Invalid {
                reason: "dup".into()
            }
            .code(),
            4003
        );
    }

    #[test]
    fn test_registry_error_conversion() {
        let err: CatalogError = RegistryError::UnknownFixture {
            name: "ghost".into(),
        }
        .into();
        assert_eq!(err.code(), CatalogErrorCodes::REGISTRY);
        assert!(err.message().contains("ghost"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
