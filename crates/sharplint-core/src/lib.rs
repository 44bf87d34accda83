//! sharplint core
//!
//! Core linting engine for a C# source subset. This crate provides the
//! fundamental components for parsing, analyzing, and mechanically editing
//! C# files: a lossless Rowan-based CST, a trivia-preserving argument list
//! editor, diagnostics, and an autofix engine.

pub mod autofix;
pub mod config;
pub mod cst; // Concrete Syntax Tree (lossless, Rowan-based)
pub mod diagnostics;
pub mod error;
pub mod result;
pub mod semantic;

// Re-export commonly used types
pub use autofix::{Fix, FixConfig, FixEngine, FixResult};
pub use config::{ConfigLoader, RuleLevel, SharplintConfig};
pub use diagnostics::{Applicability, CodeSuggestion, Diagnostic, Location, Severity};
pub use error::{ErrorKind, SharplintError};
pub use result::{Result, ResultExt};
pub use semantic::{FileModel, FileSymbolIndex, SymbolIndex};

/// Initialize the tracing subscriber for logging
pub fn init_tracing() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sharplint=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
