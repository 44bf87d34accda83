//! Error types and handling for C# linting operations

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for C# linting operations
#[derive(Debug, Error)]
pub enum SharplintError {
    /// Parse errors from the lexer or parser
    #[error("Parse error: {message} at {location}")]
    ParseError {
        message: String,
        location: Box<crate::diagnostics::Location>,
    },

    /// Configuration loading or validation errors
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Rule compilation or execution errors
    #[error("Rule error in '{rule_id}': {message}")]
    RuleError { rule_id: String, message: String },

    /// File system I/O errors
    #[error("IO error for path '{path}': {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Semantic analysis errors
    #[error("Semantic error: {message}")]
    SemanticError { message: String },

    /// Syntax tree editing errors (invalid splice, malformed list)
    #[error("Edit error: {message}")]
    EditError { message: String },

    /// Caller contract violations (detached node, foreign anchor)
    #[error("Precondition violated: {message}")]
    Precondition { message: String },

    /// Autofix engine errors
    #[error("Autofix error: {message}")]
    AutofixError { message: String },

    /// Generic internal errors
    #[error("Internal error: {message}")]
    InternalError { message: String },
}

/// Error kind enumeration for categorizing errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    Parse,
    Config,
    Rule,
    Io,
    Semantic,
    Edit,
    Precondition,
    Autofix,
    Internal,
}

impl SharplintError {
    /// Get the error kind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            SharplintError::ParseError { .. } => ErrorKind::Parse,
            SharplintError::ConfigError { .. } => ErrorKind::Config,
            SharplintError::RuleError { .. } => ErrorKind::Rule,
            SharplintError::IoError { .. } => ErrorKind::Io,
            SharplintError::SemanticError { .. } => ErrorKind::Semantic,
            SharplintError::EditError { .. } => ErrorKind::Edit,
            SharplintError::Precondition { .. } => ErrorKind::Precondition,
            SharplintError::AutofixError { .. } => ErrorKind::Autofix,
            SharplintError::InternalError { .. } => ErrorKind::Internal,
        }
    }

    /// Check if this error is recoverable (can continue processing other files)
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::Parse | ErrorKind::Rule | ErrorKind::Semantic | ErrorKind::Edit
        )
    }

    /// Create a parse error
    pub fn parse_error(message: impl Into<String>, location: crate::diagnostics::Location) -> Self {
        Self::ParseError {
            message: message.into(),
            location: Box::new(location),
        }
    }

    /// Create a parse error with a simple message
    pub fn parser_error(message: impl Into<String>) -> Self {
        Self::ParseError {
            message: message.into(),
            location: Box::new(crate::diagnostics::Location::default()),
        }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create a rule error
    pub fn rule_error(rule_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RuleError {
            rule_id: rule_id.into(),
            message: message.into(),
        }
    }

    /// Create an IO error with path context
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::IoError {
            path: path.into(),
            source,
        }
    }

    /// Create a semantic error
    pub fn semantic_error(message: impl Into<String>) -> Self {
        Self::SemanticError {
            message: message.into(),
        }
    }

    /// Create an edit error
    pub fn edit_error(message: impl Into<String>) -> Self {
        Self::EditError {
            message: message.into(),
        }
    }

    /// Create an autofix error
    pub fn autofix_error(message: impl Into<String>) -> Self {
        Self::AutofixError {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edit_errors_are_recoverable() {
        assert!(SharplintError::edit_error("bad splice").is_recoverable());
        assert!(!SharplintError::config_error("bad config").is_recoverable());
    }

    #[test]
    fn kinds_match_variants() {
        assert_eq!(
            SharplintError::rule_error("sealed-class", "boom").kind(),
            ErrorKind::Rule
        );
        assert_eq!(
            SharplintError::Precondition {
                message: "detached".into()
            }
            .kind(),
            ErrorKind::Precondition
        );
    }
}
