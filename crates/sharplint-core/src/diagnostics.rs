//! Diagnostic types produced by lint rules

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Severity of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Hint,
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Hint => write!(f, "hint"),
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// Whether a suggested fix can be applied without human review
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Applicability {
    /// Safe to apply automatically
    Always,
    /// Semantic change, requires explicit opt-in
    MaybeIncorrect,
}

/// A source location, 1-based line and column plus byte offset/length
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub file: PathBuf,
    pub line: usize,
    pub column: usize,
    pub end_line: Option<usize>,
    pub end_column: Option<usize>,
    /// Byte offset of the start of the location
    pub offset: usize,
    /// Byte length of the location (0 for pure insertions)
    pub length: usize,
}

impl Location {
    pub fn new(file: PathBuf, line: usize, column: usize, offset: usize, length: usize) -> Self {
        Self {
            file,
            line,
            column,
            end_line: None,
            end_column: None,
            offset,
            length,
        }
    }

    /// Byte range covered by this location
    pub fn span(&self) -> std::ops::Range<usize> {
        self.offset..self.offset + self.length
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file.display(), self.line, self.column)
    }
}

/// A concrete replacement a rule proposes for a diagnostic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeSuggestion {
    /// Human-readable description of the fix
    pub message: String,
    /// Replacement text for the suggestion's location
    pub replacement: String,
    /// Where the replacement applies
    pub location: Location,
    pub applicability: Applicability,
}

impl CodeSuggestion {
    /// A fix that is safe to apply automatically
    pub fn safe(
        message: impl Into<String>,
        replacement: impl Into<String>,
        location: Location,
    ) -> Self {
        Self {
            message: message.into(),
            replacement: replacement.into(),
            location,
            applicability: Applicability::Always,
        }
    }

    /// A fix that changes semantics and needs explicit opt-in
    pub fn unsafe_fix(
        message: impl Into<String>,
        replacement: impl Into<String>,
        location: Location,
    ) -> Self {
        Self {
            message: message.into(),
            replacement: replacement.into(),
            location,
            applicability: Applicability::MaybeIncorrect,
        }
    }
}

/// A single finding reported by a rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Stable rule identifier, e.g. `missing-on-error`
    pub rule_id: String,
    pub severity: Severity,
    pub message: String,
    pub location: Location,
    /// Proposed fixes, best first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<CodeSuggestion>,
}

impl Diagnostic {
    pub fn new(
        rule_id: impl Into<String>,
        severity: Severity,
        message: impl Into<String>,
        location: Location,
    ) -> Self {
        Self {
            rule_id: rule_id.into(),
            severity,
            message: message.into(),
            location,
            suggestions: Vec::new(),
        }
    }

    pub fn with_suggestion(mut self, suggestion: CodeSuggestion) -> Self {
        self.suggestions.push(suggestion);
        self
    }

    pub fn has_safe_fix(&self) -> bool {
        self.suggestions
            .iter()
            .any(|s| s.applicability == Applicability::Always)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} [{}] at {}",
            self.severity, self.message, self.rule_id, self.location
        )
    }
}
