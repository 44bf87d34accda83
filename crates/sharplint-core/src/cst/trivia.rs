//! Trivia navigation and measurement utilities
//!
//! Pure positional/formatting queries over the CST. In this tree, trivia
//! (whitespace, line breaks, comments) are ordinary tokens interleaved with
//! significant ones, so the "leading trivia" of an argument is the
//! contiguous run of trivia siblings directly before it inside its parent
//! argument list, and its "trailing trivia" the run after it, up to the
//! next significant sibling.
//!
//! All helpers return new values; the tree is never mutated in place.

use rowan::{GreenToken, Language, NodeOrToken};

use super::ast::{Argument, ArgumentList, AstNode};
use super::{CsLanguage, CsSyntaxKind, CsSyntaxNode, CsSyntaxToken};
use crate::error::SharplintError;
use crate::result::Result;

/// Which separator of an argument to fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeparatorSide {
    Previous,
    Next,
}

/// Contiguous trivia tokens directly before `node`, in source order
pub fn leading_run(node: &CsSyntaxNode) -> Vec<CsSyntaxToken> {
    let mut run = Vec::new();
    let mut element = node.prev_sibling_or_token();
    while let Some(NodeOrToken::Token(token)) = element {
        if !token.kind().is_trivia() {
            break;
        }
        element = token.prev_sibling_or_token();
        run.push(token);
    }
    run.reverse();
    run
}

/// Contiguous trivia tokens directly after `node`, in source order
pub fn trailing_run(node: &CsSyntaxNode) -> Vec<CsSyntaxToken> {
    let mut run = Vec::new();
    let mut element = node.next_sibling_or_token();
    while let Some(NodeOrToken::Token(token)) = element {
        if !token.kind().is_trivia() {
            break;
        }
        element = token.next_sibling_or_token();
        run.push(token);
    }
    run
}

/// Total text length of a trivia run
pub fn run_len(run: &[CsSyntaxToken]) -> usize {
    run.iter().map(|t| t.text().len()).sum()
}

/// Whether a run contains a line break
pub fn has_line_break(run: &[CsSyntaxToken]) -> bool {
    run.iter().any(|t| t.kind() == CsSyntaxKind::Newline)
}

/// Whether a run contains anything besides plain whitespace
pub fn has_non_whitespace(run: &[CsSyntaxToken]) -> bool {
    run.iter()
        .any(|t| !matches!(t.kind(), CsSyntaxKind::Whitespace | CsSyntaxKind::Newline))
}

/// The suffix of a run after its last line break: the trivia a reader sees
/// on the node's own line
pub fn on_current_line(run: &[CsSyntaxToken]) -> &[CsSyntaxToken] {
    let start = run
        .iter()
        .rposition(|t| t.kind() == CsSyntaxKind::Newline)
        .map_or(0, |i| i + 1);
    &run[start..]
}

/// Visual indentation of an argument: the width of the trivia on its own
/// line, measured from its leading run (which, for arguments that follow a
/// separator, is the separator's trailing trivia)
pub fn indentation_of(node: &CsSyntaxNode) -> usize {
    run_len(on_current_line(&leading_run(node)))
}

/// The comma before/after an argument, or None when the argument is
/// first/last. Fails fast when the node is not inside an argument list:
/// that is a caller bug, not a data condition.
pub fn associated_separator(
    argument: &Argument,
    side: SeparatorSide,
) -> Result<Option<CsSyntaxToken>> {
    let parent = argument.syntax().parent();
    if parent
        .as_ref()
        .and_then(|p| ArgumentList::cast(p.clone()))
        .is_none()
    {
        return Err(SharplintError::Precondition {
            message: "argument is not part of an argument list".to_string(),
        });
    }

    let mut element = match side {
        SeparatorSide::Previous => argument.syntax().prev_sibling_or_token(),
        SeparatorSide::Next => argument.syntax().next_sibling_or_token(),
    };
    while let Some(current) = element {
        match &current {
            NodeOrToken::Token(token) if token.kind().is_trivia() => {
                element = match side {
                    SeparatorSide::Previous => current.prev_sibling_or_token(),
                    SeparatorSide::Next => current.next_sibling_or_token(),
                };
            }
            NodeOrToken::Token(token) if token.kind() == CsSyntaxKind::Comma => {
                return Ok(Some(token.clone()));
            }
            _ => return Ok(None),
        }
    }
    Ok(None)
}

// ----------------------------------------------------------------------
// Green trivia algebra (construction side)
// ----------------------------------------------------------------------

fn green(kind: CsSyntaxKind, text: &str) -> GreenToken {
    GreenToken::new(CsLanguage::kind_to_raw(kind), text)
}

/// Synthetic whitespace of the given width
pub fn ws(width: usize) -> GreenToken {
    green(CsSyntaxKind::Whitespace, &" ".repeat(width))
}

/// A single space
pub fn space() -> GreenToken {
    ws(1)
}

/// A line break
pub fn newline() -> GreenToken {
    green(CsSyntaxKind::Newline, "\n")
}

/// A comma separator
pub fn comma() -> GreenToken {
    green(CsSyntaxKind::Comma, ",")
}

fn green_kind(token: &GreenToken) -> CsSyntaxKind {
    CsLanguage::kind_from_raw(token.kind())
}

/// Convert a red trivia run to owned green tokens
pub fn to_green_run(run: &[CsSyntaxToken]) -> Vec<GreenToken> {
    run.iter().map(|t| t.green().to_owned()).collect()
}

/// Drop whitespace from the front of a run (not line breaks or comments)
pub fn strip_leading_ws(mut run: Vec<GreenToken>) -> Vec<GreenToken> {
    while run
        .first()
        .is_some_and(|t| green_kind(t) == CsSyntaxKind::Whitespace)
    {
        run.remove(0);
    }
    run
}

/// Drop trailing whitespace and the final line break from a run, keeping any
/// comment that precedes the break. `a /*c*/ \n` becomes `a /*c*/`.
pub fn strip_trailing_break(mut run: Vec<GreenToken>) -> Vec<GreenToken> {
    while run
        .last()
        .is_some_and(|t| green_kind(t) == CsSyntaxKind::Whitespace)
    {
        run.pop();
    }
    if run
        .last()
        .is_some_and(|t| green_kind(t) == CsSyntaxKind::Newline)
    {
        run.pop();
    }
    while run
        .last()
        .is_some_and(|t| green_kind(t) == CsSyntaxKind::Whitespace)
    {
        run.pop();
    }
    run
}

/// Normalize a same-line run to a single space followed by any comments.
/// Used after a separator in single-line layouts.
pub fn normalize_to_space(run: Vec<GreenToken>) -> Vec<GreenToken> {
    let mut result = vec![space()];
    result.extend(
        run.into_iter()
            .filter(|t| !matches!(green_kind(t), CsSyntaxKind::Whitespace | CsSyntaxKind::Newline)),
    );
    result
}

/// Total text length of a green run
pub fn green_run_len(run: &[GreenToken]) -> usize {
    run.iter().map(|t| t.text().len()).sum()
}

/// Split a leading run into its layout prefix and the annotation tail on
/// the run's last line. The tail starts at the first comment after the
/// last line break, so `\n    /*why*/ ` splits into `\n    ` and
/// `/*why*/ `. A run whose last line carries no comment keeps everything
/// in the prefix.
pub fn split_comment_tail(mut run: Vec<GreenToken>) -> (Vec<GreenToken>, Vec<GreenToken>) {
    let line_start = run
        .iter()
        .rposition(|t| green_kind(t) == CsSyntaxKind::Newline)
        .map_or(0, |i| i + 1);
    let cut = run[line_start..]
        .iter()
        .position(|t| green_kind(t).is_comment());
    match cut {
        Some(offset) => {
            let tail = run.split_off(line_start + offset);
            (run, tail)
        }
        None => (run, Vec::new()),
    }
}

/// Width of a green run's text after its last line break
pub fn green_line_width(run: &[GreenToken]) -> usize {
    let start = run
        .iter()
        .rposition(|t| green_kind(t) == CsSyntaxKind::Newline)
        .map_or(0, |i| i + 1);
    green_run_len(&run[start..])
}

/// Align a leading run so its visual width matches `reference_indent`.
///
/// Precedence per the deterministic alignment rule: existing non-whitespace
/// leading trivia at least as wide as the reference is left untouched, a run
/// already wide enough is left untouched, and otherwise exactly enough
/// synthetic whitespace is appended to reach the reference width. Applying
/// this to an already-aligned run is a no-op (fixed point).
pub fn align_run(run: Vec<GreenToken>, reference_indent: usize) -> Vec<GreenToken> {
    let on_line_start = run
        .iter()
        .rposition(|t| green_kind(t) == CsSyntaxKind::Newline)
        .map_or(0, |i| i + 1);
    let on_line = &run[on_line_start..];
    let width = green_run_len(on_line);
    let has_content = on_line
        .iter()
        .any(|t| green_kind(t) != CsSyntaxKind::Whitespace);

    if width >= reference_indent {
        return run;
    }
    if has_content {
        // comment-bearing runs are never reshaped
        return run;
    }

    let mut result = run;
    result.push(ws(reference_indent - width));
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cst::parse_cs;

    fn second_arg(src: &str) -> Argument {
        let (cst, _) = parse_cs(src);
        cst.descendants()
            .filter_map(Argument::cast)
            .nth(1)
            .expect("need two arguments")
    }

    #[test]
    fn leading_run_of_multiline_argument() {
        let arg = second_arg("f(\n    a,\n        b)");
        let run = leading_run(arg.syntax());
        assert_eq!(run.len(), 2); // newline + indent
        assert!(has_line_break(&run));
        assert_eq!(indentation_of(arg.syntax()), 8);
    }

    #[test]
    fn indentation_of_same_line_argument() {
        let arg = second_arg("f(a,   b)");
        assert_eq!(indentation_of(arg.syntax()), 3);
    }

    #[test]
    fn separator_lookup() {
        let arg = second_arg("f(a, b)");
        let prev = associated_separator(&arg, SeparatorSide::Previous).unwrap();
        assert!(prev.is_some());
        let next = associated_separator(&arg, SeparatorSide::Next).unwrap();
        assert!(next.is_none(), "last argument has no next separator");
    }

    #[test]
    fn separator_lookup_outside_list_fails() {
        // Build a detached Argument node: precondition violation.
        let (cst, _) = parse_cs("f(a, b)");
        let arg = cst.descendants().filter_map(Argument::cast).next().unwrap();
        let detached = CsSyntaxNode::new_root(arg.syntax().green().into_owned());
        let detached = Argument::cast(detached).unwrap();
        assert!(associated_separator(&detached, SeparatorSide::Next).is_err());
    }

    #[test]
    fn trailing_comment_survives_break_strip() {
        let arg = Argument::cast(
            parse_cs("f(\n    a /*c*/,\n    b)")
                .0
                .descendants()
                .filter_map(Argument::cast)
                .next()
                .unwrap()
                .syntax()
                .clone(),
        )
        .unwrap();
        let run = to_green_run(&trailing_run(arg.syntax()));
        let stripped = strip_trailing_break(run);
        let text: String = stripped.iter().map(|t| t.text().to_string()).collect();
        assert_eq!(text, " /*c*/");
    }

    #[test]
    fn align_pads_short_runs() {
        let run = vec![newline()];
        let aligned = align_run(run, 4);
        let text: String = aligned.iter().map(|t| t.text().to_string()).collect();
        assert_eq!(text, "\n    ");
    }

    #[test]
    fn align_is_idempotent() {
        let aligned = align_run(vec![newline()], 4);
        let again = align_run(aligned.clone(), 4);
        assert_eq!(
            aligned.iter().map(|t| t.text().to_string()).collect::<String>(),
            again.iter().map(|t| t.text().to_string()).collect::<String>()
        );
    }

    #[test]
    fn comment_tail_splits_off_the_annotated_line() {
        let run = vec![
            newline(),
            ws(4),
            green(CsSyntaxKind::CommentBlock, "/*why*/"),
            space(),
        ];
        let (layout, tail) = split_comment_tail(run);
        let text = |r: &[GreenToken]| r.iter().map(|t| t.text().to_string()).collect::<String>();
        assert_eq!(text(&layout), "\n    ");
        assert_eq!(text(&tail), "/*why*/ ");
        assert_eq!(green_line_width(&layout), 4);
    }

    #[test]
    fn comment_tail_is_empty_for_plain_runs() {
        let (layout, tail) = split_comment_tail(vec![newline(), ws(4)]);
        assert_eq!(layout.len(), 2);
        assert!(tail.is_empty());
    }

    #[test]
    fn align_never_shrinks_comment_trivia() {
        // A comment wider than the reference indent stays untouched.
        let run = vec![newline(), green(CsSyntaxKind::CommentBlock, "/* keep me */")];
        let aligned = align_run(run.clone(), 4);
        assert_eq!(
            run.iter().map(|t| t.text().to_string()).collect::<String>(),
            aligned.iter().map(|t| t.text().to_string()).collect::<String>()
        );
    }
}
