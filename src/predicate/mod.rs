//! Structural predicates evaluated against fixture text.
//!
//! A [`Predicate`] pairs a unique name with a [`Check`]. Checks are a closed
//! set of variants sharing the single [`Evaluate`] capability, so catalog
//! predicates, built-in constructs and ad-hoc closures can be mixed freely in
//! one registry.

use std::fmt;

use regex::Regex;

pub mod construct;
mod scan;

pub use construct::Construct;

/// Single capability every check exposes.
pub trait Evaluate {
    fn evaluate(&self, text: &str) -> bool;
}

/// Boolean check over raw fixture text.
pub enum Check {
    /// Built-in structural heuristic.
    Construct(Construct),
    /// Literal substring must be present.
    Contains(String),
    /// Regular expression must match somewhere in the text.
    Pattern(Regex),
    /// Caller-supplied pure function.
    Custom(Box<dyn Fn(&str) -> bool>),
}

impl Check {
    pub fn custom<F>(check: F) -> Self
    where
        F: Fn(&str) -> bool + 'static,
    {
        Check::Custom(Box::new(check))
    }

    /// Compile `pattern` into a [`Check::Pattern`].
    pub fn pattern(pattern: &str) -> Result<Self, regex::Error> {
        Regex::new(pattern).map(Check::Pattern)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Check::Construct(_) => "construct",
            Check::Contains(_) => "contains",
            Check::Pattern(_) => "pattern",
            Check::Custom(_) => "custom",
        }
    }
}

impl Evaluate for Check {
    fn evaluate(&self, text: &str) -> bool {
        match self {
            Check::Construct(construct) => construct.evaluate(text),
            Check::Contains(needle) => text.contains(needle.as_str()),
            Check::Pattern(regex) => regex.is_match(text),
            Check::Custom(check) => check(text),
        }
    }
}

impl fmt::Debug for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Check::Construct(construct) => f.debug_tuple("Construct").field(construct).finish(),
            Check::Contains(needle) => f.debug_tuple("Contains").field(needle).finish(),
            Check::Pattern(regex) => f.debug_tuple("Pattern").field(&regex.as_str()).finish(),
            Check::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl From<Construct> for Check {
    fn from(construct: Construct) -> Self {
        Check::Construct(construct)
    }
}

/// Named structural requirement.
#[derive(Debug)]
pub struct Predicate {
    name: String,
    check: Check,
}

impl Predicate {
    pub fn new(name: impl Into<String>, check: impl Into<Check>) -> Self {
        Self {
            name: name.into(),
            check: check.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn check(&self) -> &Check {
        &self.check
    }
}

impl Evaluate for Predicate {
    fn evaluate(&self, text: &str) -> bool {
        self.check.evaluate(text)
    }
}

/// Every built-in construct as a predicate, in table order.
pub fn default_predicates() -> Vec<Predicate> {
    Construct::ALL
        .iter()
        .map(|construct| Predicate::new(construct.name(), *construct))
        .collect()
}
