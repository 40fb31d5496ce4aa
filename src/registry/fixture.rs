use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Source language hint attached to a fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    Javascript,
    Python,
    #[default]
    Unknown,
}

impl Language {
    /// Guess the language from a file extension.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("js" | "mjs" | "cjs" | "jsx" | "ts" | "tsx") => Language::Javascript,
            Some("py" | "pyi") => Language::Python,
            _ => Language::Unknown,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Language::Javascript => "javascript",
            Language::Python => "python",
            Language::Unknown => "unknown",
        };
        f.write_str(label)
    }
}

/// Named sample of source text. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fixture {
    name: String,
    content: String,
    language: Language,
}

impl Fixture {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            language: Language::Unknown,
        }
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn line_count(&self) -> usize {
        self.content.lines().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn detects_language_from_extension() {
        assert_eq!(
            Language::from_path(&PathBuf::from("fixtures/test.js")),
            Language::Javascript
        );
        assert_eq!(
            Language::from_path(&PathBuf::from("fixtures/test.py")),
            Language::Python
        );
        assert_eq!(
            Language::from_path(&PathBuf::from("README")),
            Language::Unknown
        );
    }

    #[test]
    fn language_serializes_snake_case() {
        let json = serde_json::to_string(&Language::Javascript).unwrap();
        assert_eq!(json, "\"javascript\"");
        assert_eq!(Language::Python.to_string(), "python");
    }
}
