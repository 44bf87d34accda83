//! Concrete Syntax Tree (CST) for the analyzed C# subset
//!
//! A lossless syntax tree built on the Rowan library. The CST preserves all
//! source information including whitespace, comments, and formatting,
//! enabling:
//! - Precise autofixes that preserve surrounding formatting
//! - Accurate source-to-source transformations (argument insertion)
//! - Better error recovery and diagnostics
//!
//! ## Architecture
//!
//! The CST uses Rowan's green/red tree pattern:
//!
//! - **Green Tree**: Immutable, position-independent storage
//!   - Stores actual source text with trivia (whitespace, comments)
//!   - Deduplicates identical subtrees for memory efficiency
//!   - Cheap to clone (uses Arc internally)
//!
//! - **Red Tree**: Dynamically constructed view with parent pointers
//!   - Created on-demand for traversal
//!   - Provides a typed AST-like API via [`ast`]
//!   - Enables efficient parent/sibling navigation
//!
//! ## Trivia Handling
//!
//! Trivia are ordinary tokens in the tree, interleaved with significant
//! ones. Between the elements of an argument list they attach directly to
//! the `ArgumentList` node, which is what lets the [`edit`] module reshape
//! separator whitespace without touching argument interiors.
//!
//! This enables the lossless property: `parse_cs(source).0.text() == source`.

mod builder;
mod language;
mod lexer;
mod line_index;
mod nodes;
mod parser;
mod syntax_kind;

pub mod ast;
pub mod edit;
pub mod trivia;

pub use builder::{CstBuilder, argument_from_text};
pub use edit::{InsertPosition, insert_argument};
pub use language::CsLanguage;
pub use lexer::{CstToken, LexerError, lex_with_trivia};
pub use line_index::LineIndex;
pub use nodes::*;
pub use parser::{ParseError, parse_cs};
pub use syntax_kind::CsSyntaxKind;
