// Registry error types and constants

use crate::error::ErrorCode;
use log::error;
use std::fmt;

/// Registry error code constants
///
/// Error code range: 3001-3004
pub struct RegistryErrorCodes {}

impl RegistryErrorCodes {
    /// Fixture name or content was empty / whitespace-only
    pub const INVALID_FIXTURE: i32 = 3001;

    /// Predicate name already registered
    pub const DUPLICATE_PREDICATE: i32 = 3002;

    /// Validation requested for a fixture that was never registered
    pub const UNKNOWN_FIXTURE: i32 = 3003;

    /// Predicate definition unusable (empty name, bad pattern)
    pub const INVALID_PREDICATE: i32 = 3004;
}

/// Log a registry error with structured context
///
/// Emits the numeric code, the component and the human-readable message so
/// harness logs can be grepped by code.
pub fn log_registry_error(err: &RegistryError, context: &str) {
    error!(
        "Registry error in {}: code={}, component=FixtureRegistry, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Errors raised by [`crate::registry::FixtureRegistry`] operations
///
/// All variants are local to the offending call; none poison the registry.
#[derive(Debug, Clone, PartialEq)]
pub enum RegistryError {
    /// Fixture rejected at registration time
    InvalidFixture { name: String, reason: String },

    /// Predicate name collision
    DuplicatePredicate { name: String },

    /// Fixture name was never registered
    UnknownFixture { name: String },

    /// Predicate rejected at registration time
    InvalidPredicate { name: String, reason: String },
}

impl ErrorCode for RegistryError {
    fn code(&self) -> i32 {
        match self {
            RegistryError::InvalidFixture { .. } => RegistryErrorCodes::INVALID_FIXTURE,
            RegistryError::DuplicatePredicate { .. } => RegistryErrorCodes::DUPLICATE_PREDICATE,
            RegistryError::UnknownFixture { .. } => RegistryErrorCodes::UNKNOWN_FIXTURE,
            RegistryError::InvalidPredicate { .. } => RegistryErrorCodes::INVALID_PREDICATE,
        }
    }

    fn message(&self) -> String {
        match self {
            RegistryError::InvalidFixture { name, reason } => {
                format!("Invalid fixture '{}': {}", name, reason)
            }
            RegistryError::DuplicatePredicate { name } => {
                format!("Predicate '{}' is already registered", name)
            }
            RegistryError::UnknownFixture { name } => {
                format!("Unknown fixture '{}'", name)
            }
            RegistryError::InvalidPredicate { name, reason } => {
                format!("Invalid predicate '{}': {}", name, reason)
            }
        }
    }
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RegistryError (code {}): {}", self.code(), self.message())
    }
}

impl std::error::Error for RegistryError {}
