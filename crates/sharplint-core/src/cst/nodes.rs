//! Red tree type aliases for the C# syntax language

use super::language::CsLanguage;

pub type CsSyntaxNode = rowan::SyntaxNode<CsLanguage>;
pub type CsSyntaxToken = rowan::SyntaxToken<CsLanguage>;
pub type CsSyntaxElement = rowan::SyntaxElement<CsLanguage>;
pub type CsSyntaxNodeChildren = rowan::SyntaxNodeChildren<CsLanguage>;
