//! CST-aware lexer that preserves all trivia (whitespace, comments)
//!
//! Designed for lossless CST construction: whitespace, comments, and line
//! breaks are emitted as real tokens so the tree reproduces the source
//! byte-for-byte.

use crate::cst::CsSyntaxKind;
use std::ops::Range;

/// Simple span representing a range in the source
pub type CstSpan = Range<usize>;

/// A lexer error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexerError {
    pub message: String,
    pub span: CstSpan,
}

impl LexerError {
    pub fn new(message: impl Into<String>, span: CstSpan) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }
}

/// A token with its syntax kind and span
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CstToken {
    pub kind: CsSyntaxKind,
    pub text: String,
    pub span: CstSpan,
}

impl CstToken {
    pub fn new(kind: CsSyntaxKind, text: impl Into<String>, span: CstSpan) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }
}

/// Result returned by the CST lexer
pub type CstLexResult = (Vec<CstToken>, Vec<LexerError>);

/// Lex input preserving ALL trivia for CST construction
///
/// - Whitespace runs become `Whitespace` tokens (never spanning a newline)
/// - `\n` and `\r\n` become `Newline` tokens
/// - `//...` and `/*...*/` become comment tokens
///
/// This enables lossless round-tripping: `parse(source).text() == source`.
pub fn lex_with_trivia(input: &str) -> CstLexResult {
    let mut tokens = Vec::new();
    let mut errors = Vec::new();

    let bytes = input.as_bytes();
    let len = bytes.len();
    let mut i = 0usize;

    while i < len {
        let start = i;
        let current = match input[i..].chars().next() {
            Some(c) => c,
            None => break,
        };
        let size = current.len_utf8();

        match current {
            '\n' => {
                tokens.push(CstToken::new(CsSyntaxKind::Newline, "\n", start..i + size));
                i += size;
            }
            '\r' => {
                // \r\n is one newline token
                let mut end = i + size;
                if bytes.get(end) == Some(&b'\n') {
                    end += 1;
                }
                tokens.push(CstToken::new(
                    CsSyntaxKind::Newline,
                    &input[start..end],
                    start..end,
                ));
                i = end;
            }
            c if c.is_whitespace() => {
                let mut end = i + size;
                while end < len {
                    let next = match input[end..].chars().next() {
                        Some(n) => n,
                        None => break,
                    };
                    if next == '\n' || next == '\r' || !next.is_whitespace() {
                        break;
                    }
                    end += next.len_utf8();
                }
                tokens.push(CstToken::new(
                    CsSyntaxKind::Whitespace,
                    &input[start..end],
                    start..end,
                ));
                i = end;
            }
            '/' if bytes.get(i + 1) == Some(&b'/') => {
                let mut end = i + 2;
                while end < len && bytes[end] != b'\n' && bytes[end] != b'\r' {
                    end += 1;
                }
                tokens.push(CstToken::new(
                    CsSyntaxKind::CommentLine,
                    &input[start..end],
                    start..end,
                ));
                i = end;
            }
            '/' if bytes.get(i + 1) == Some(&b'*') => {
                let mut end = i + 2;
                let mut closed = false;
                while end + 1 < len {
                    if bytes[end] == b'*' && bytes[end + 1] == b'/' {
                        end += 2;
                        closed = true;
                        break;
                    }
                    end += 1;
                }
                if !closed {
                    end = len;
                    errors.push(LexerError::new("unterminated block comment", start..end));
                }
                tokens.push(CstToken::new(
                    CsSyntaxKind::CommentBlock,
                    &input[start..end],
                    start..end,
                ));
                i = end;
            }
            '"' => {
                let (end, err) = lex_string(input, start);
                if let Some(err) = err {
                    errors.push(err);
                }
                tokens.push(CstToken::new(
                    CsSyntaxKind::String,
                    &input[start..end],
                    start..end,
                ));
                i = end;
            }
            c if c.is_ascii_digit() => {
                let mut end = i + size;
                while end < len && (bytes[end].is_ascii_alphanumeric() || bytes[end] == b'.') {
                    // a trailing dot belongs to member access, not the number
                    if bytes[end] == b'.'
                        && !bytes.get(end + 1).is_some_and(u8::is_ascii_digit)
                    {
                        break;
                    }
                    end += 1;
                }
                tokens.push(CstToken::new(
                    CsSyntaxKind::Number,
                    &input[start..end],
                    start..end,
                ));
                i = end;
            }
            c if c.is_alphabetic() || c == '_' || c == '@' => {
                let mut end = i + size;
                while end < len {
                    let next = match input[end..].chars().next() {
                        Some(n) => n,
                        None => break,
                    };
                    if !next.is_alphanumeric() && next != '_' {
                        break;
                    }
                    end += next.len_utf8();
                }
                let text = &input[start..end];
                let kind = CsSyntaxKind::from_keyword(text).unwrap_or(CsSyntaxKind::Ident);
                tokens.push(CstToken::new(kind, text, start..end));
                i = end;
            }
            '=' if bytes.get(i + 1) == Some(&b'>') => {
                tokens.push(CstToken::new(CsSyntaxKind::Arrow, "=>", start..i + 2));
                i += 2;
            }
            _ => {
                let kind = match current {
                    '(' => CsSyntaxKind::LParen,
                    ')' => CsSyntaxKind::RParen,
                    '{' => CsSyntaxKind::LBrace,
                    '}' => CsSyntaxKind::RBrace,
                    '[' => CsSyntaxKind::LBracket,
                    ']' => CsSyntaxKind::RBracket,
                    ',' => CsSyntaxKind::Comma,
                    '.' => CsSyntaxKind::Dot,
                    ';' => CsSyntaxKind::Semicolon,
                    ':' => CsSyntaxKind::Colon,
                    '=' => CsSyntaxKind::Equals,
                    '<' => CsSyntaxKind::Lt,
                    '>' => CsSyntaxKind::Gt,
                    '?' => CsSyntaxKind::Question,
                    '-' => CsSyntaxKind::Minus,
                    '+' => CsSyntaxKind::Plus,
                    '/' => CsSyntaxKind::Unknown, // lone slash; comments handled above
                    _ => {
                        errors.push(LexerError::new(
                            format!("unexpected character '{current}'"),
                            start..i + size,
                        ));
                        CsSyntaxKind::Error
                    }
                };
                tokens.push(CstToken::new(kind, &input[start..i + size], start..i + size));
                i += size;
            }
        }
    }

    (tokens, errors)
}

/// Lex a string literal starting at `start` (which must be a quote)
fn lex_string(input: &str, start: usize) -> (usize, Option<LexerError>) {
    let bytes = input.as_bytes();
    let len = bytes.len();
    let mut i = start + 1;

    while i < len {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => return (i + 1, None),
            b'\n' => break,
            _ => i += 1,
        }
    }

    (
        i.min(len),
        Some(LexerError::new("unterminated string literal", start..i.min(len))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<CsSyntaxKind> {
        lex_with_trivia(src).0.into_iter().map(|t| t.kind).collect()
    }

    fn rejoin(src: &str) -> String {
        lex_with_trivia(src).0.into_iter().map(|t| t.text).collect()
    }

    #[test]
    fn lex_invocation_with_lambda() {
        let src = "observable.Subscribe(nextValue => { });";
        assert_eq!(
            kinds(src),
            vec![
                CsSyntaxKind::Ident,
                CsSyntaxKind::Dot,
                CsSyntaxKind::Ident,
                CsSyntaxKind::LParen,
                CsSyntaxKind::Ident,
                CsSyntaxKind::Whitespace,
                CsSyntaxKind::Arrow,
                CsSyntaxKind::Whitespace,
                CsSyntaxKind::LBrace,
                CsSyntaxKind::Whitespace,
                CsSyntaxKind::RBrace,
                CsSyntaxKind::RParen,
                CsSyntaxKind::Semicolon,
            ]
        );
    }

    #[test]
    fn lex_preserves_all_text() {
        let src = "f(\n    a, // first\n    b /* second */)\r\n";
        assert_eq!(rejoin(src), src);
    }

    #[test]
    fn lex_comments_and_keywords() {
        let src = "public sealed class C { /* body */ }";
        let tokens = lex_with_trivia(src).0;
        assert!(tokens.iter().any(|t| t.kind == CsSyntaxKind::PublicKw));
        assert!(tokens.iter().any(|t| t.kind == CsSyntaxKind::SealedKw));
        assert!(tokens.iter().any(|t| t.kind == CsSyntaxKind::ClassKw));
        assert!(tokens.iter().any(|t| t.kind == CsSyntaxKind::CommentBlock));
    }

    #[test]
    fn lex_unterminated_string_reports_error() {
        let (_, errors) = lex_with_trivia("f(\"oops);\n");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("unterminated string"));
    }

    #[test]
    fn lex_crlf_is_single_newline() {
        let tokens = lex_with_trivia("a\r\nb").0;
        assert_eq!(tokens[1].kind, CsSyntaxKind::Newline);
        assert_eq!(tokens[1].text, "\r\n");
    }
}
