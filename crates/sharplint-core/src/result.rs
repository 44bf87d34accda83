//! Result type alias for C# linting operations

use crate::error::SharplintError;

/// Standard Result type for C# linting operations
pub type Result<T> = std::result::Result<T, SharplintError>;

/// Extension trait for Result to provide additional convenience methods
pub trait ResultExt<T> {
    /// Convert an error to a recoverable error if possible
    fn recoverable(self) -> Result<Option<T>>;

    /// Log the error and continue with None if recoverable
    fn log_and_continue(self) -> Option<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn recoverable(self) -> Result<Option<T>> {
        match self {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.is_recoverable() => {
                tracing::warn!("Recoverable error: {}", err);
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    fn log_and_continue(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(err) => {
                if err.is_recoverable() {
                    tracing::warn!("Continuing after error: {}", err);
                } else {
                    tracing::error!("Fatal error: {}", err);
                }
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recoverable_errors_become_none() {
        let result: Result<i32> = Err(SharplintError::edit_error("splice failed"));
        assert_eq!(result.recoverable().unwrap(), None);
    }

    #[test]
    fn fatal_errors_propagate() {
        let result: Result<i32> = Err(SharplintError::config_error("bad"));
        assert!(result.recoverable().is_err());
    }
}
