// Highlight Fixtures - registry and validator for syntax-highlighter test input
// Checks that sample sources keep exercising the constructs a highlighter must handle

// Module declarations
pub mod catalog;
pub mod config;
pub mod error;
pub mod predicate;
pub mod registry;
pub mod report;

// Re-exports for convenience
pub use error::{CatalogError, ErrorCode, RegistryError};
pub use predicate::{Check, Construct, Evaluate, Predicate};
pub use registry::{Fixture, FixtureRegistry, FixtureReport, PredicateResult, RegisterOutcome};

use tracing_subscriber::EnvFilter;

/// Install the stderr `tracing` subscriber.
///
/// `RUST_LOG` overrides the `warn` default. `log` records from dependencies are
/// forwarded too. Calling this more than once is harmless.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_init_is_idempotent() {
        init_logging();
        init_logging();
    }

    #[test]
    fn test_reexports_cover_registry_workflow() {
        let mut registry = FixtureRegistry::new();
        registry.register("a", "for (;;) {}").unwrap();
        registry.add_predicate("hasLoop", Construct::Loop).unwrap();
        let results: Vec<PredicateResult> = registry.validate("a").unwrap();
        assert!(results[0].passed);
    }
}
