// Error types for the fixture registry
//
// This module defines custom error types for registry and catalog operations,
// providing structured error handling with stable numeric error codes.

mod catalog;
mod registry;

pub use catalog::{log_catalog_error, CatalogError, CatalogErrorCodes};
pub use registry::{log_registry_error, RegistryError, RegistryErrorCodes};

/// Error codes for structured error reporting
///
/// This trait provides a standard way to get error codes and messages
/// from custom error types, so CLI output and logs stay consistent.
pub trait ErrorCode {
    /// Get the numeric error code
    fn code(&self) -> i32;

    /// Get the human-readable error message
    fn message(&self) -> String;
}
