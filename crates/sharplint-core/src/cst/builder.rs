//! Green-tree construction helpers
//!
//! `CstBuilder` is a thin wrapper over Rowan's `GreenNodeBuilder` that takes
//! `CsSyntaxKind` directly. `argument_from_text` synthesizes a standalone
//! `Argument` green node (e.g. the onError lambda a code fix inserts),
//! preserving any trivia internal to the snippet.

use rowan::{GreenNode, GreenNodeBuilder};

use super::lexer::lex_with_trivia;
use super::{CsLanguage, CsSyntaxKind, CsSyntaxNode};
use crate::error::SharplintError;
use crate::result::Result;
use rowan::Language;

/// Builder for the C# subset CST
pub struct CstBuilder {
    inner: GreenNodeBuilder<'static>,
}

impl CstBuilder {
    pub fn new() -> Self {
        Self {
            inner: GreenNodeBuilder::new(),
        }
    }

    pub fn start_node(&mut self, kind: CsSyntaxKind) {
        self.inner.start_node(CsLanguage::kind_to_raw(kind));
    }

    pub fn finish_node(&mut self) {
        self.inner.finish_node();
    }

    pub fn token(&mut self, kind: CsSyntaxKind, text: &str) {
        self.inner.token(CsLanguage::kind_to_raw(kind), text);
    }

    /// Mark a position so an enclosing node can be started retroactively
    pub fn checkpoint(&self) -> rowan::Checkpoint {
        self.inner.checkpoint()
    }

    /// Wrap everything added since `checkpoint` in a new node of `kind`
    pub fn start_node_at(&mut self, checkpoint: rowan::Checkpoint, kind: CsSyntaxKind) {
        self.inner.start_node_at(checkpoint, CsLanguage::kind_to_raw(kind));
    }

    /// Finish building and return the red root node
    pub fn finish(self) -> CsSyntaxNode {
        CsSyntaxNode::new_root(self.inner.finish())
    }

    /// Finish building and return the raw green node
    pub fn finish_green(self) -> GreenNode {
        self.inner.finish()
    }
}

impl Default for CstBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Synthesize an `Argument` green node from source text
///
/// The snippet is lexed with trivia so internal comments survive (the
/// canonical use is `ex => { /*TODO: handle this!*/ }`). Leading and
/// trailing trivia of the snippet itself are dropped: the argument-list
/// editor owns the surrounding formatting. A `name:` prefix is recognized
/// and wrapped in a `NameColon` node.
///
/// Fails when the snippet contains no significant tokens.
pub fn argument_from_text(text: &str) -> Result<GreenNode> {
    let (tokens, errors) = lex_with_trivia(text);
    if let Some(err) = errors.first() {
        return Err(SharplintError::EditError {
            message: format!("invalid argument text: {}", err.message),
        });
    }

    // Trim outer trivia; the editor supplies surrounding whitespace.
    let first = tokens.iter().position(|t| !t.kind.is_trivia());
    let last = tokens.iter().rposition(|t| !t.kind.is_trivia());
    let (first, last) = match (first, last) {
        (Some(f), Some(l)) => (f, l),
        _ => {
            return Err(SharplintError::EditError {
                message: "argument text contains no significant tokens".to_string(),
            });
        }
    };
    let tokens = &tokens[first..=last];

    // `name: expr` form: ident + colon before any other significant token.
    let significant: Vec<usize> = tokens
        .iter()
        .enumerate()
        .filter(|(_, t)| !t.kind.is_trivia())
        .map(|(i, _)| i)
        .collect();
    let named = significant.len() > 2
        && tokens[significant[0]].kind == CsSyntaxKind::Ident
        && tokens[significant[1]].kind == CsSyntaxKind::Colon;

    let mut builder = CstBuilder::new();
    builder.start_node(CsSyntaxKind::Argument);
    if named {
        builder.start_node(CsSyntaxKind::NameColon);
        for token in &tokens[..=significant[1]] {
            builder.token(token.kind, &token.text);
        }
        builder.finish_node();
        for token in &tokens[significant[1] + 1..] {
            builder.token(token.kind, &token.text);
        }
    } else {
        for token in tokens {
            builder.token(token.kind, &token.text);
        }
    }
    builder.finish_node();

    Ok(builder.finish_green())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(green: &GreenNode) -> String {
        CsSyntaxNode::new_root(green.clone()).text().to_string()
    }

    #[test]
    fn build_positional_argument() {
        let green = argument_from_text("ex => { /*TODO: handle this!*/ }").unwrap();
        assert_eq!(text_of(&green), "ex => { /*TODO: handle this!*/ }");
    }

    #[test]
    fn build_named_argument() {
        let green = argument_from_text("onError: ex => { }").unwrap();
        let node = CsSyntaxNode::new_root(green);
        assert_eq!(node.kind(), CsSyntaxKind::Argument);
        let name_colon = node
            .children()
            .find(|n| n.kind() == CsSyntaxKind::NameColon)
            .expect("named argument should carry a NameColon node");
        assert_eq!(name_colon.text().to_string(), "onError:");
    }

    #[test]
    fn outer_trivia_is_trimmed() {
        let green = argument_from_text("  value ").unwrap();
        assert_eq!(text_of(&green), "value");
    }

    #[test]
    fn empty_argument_text_is_rejected() {
        assert!(argument_from_text("   ").is_err());
        assert!(argument_from_text("").is_err());
    }
}
