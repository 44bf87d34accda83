//! Argument list editing
//!
//! Inserting an argument into an existing call is mostly a formatting
//! problem: the separator comma, the surrounding whitespace, and the
//! original layout (single-line vs multi-line) all have to come out right,
//! and comments sitting between arguments must survive untouched.
//!
//! The editor works on the green tree. It decomposes the argument list
//! into per-argument entries (leading trivia run, argument, trailing run,
//! separator), splices the new entry in with layout-appropriate synthetic
//! trivia, and reassembles a fresh green node. The original tree is never
//! mutated; callers graft the result back with [`rowan::SyntaxNode::replace_with`].

use rowan::{GreenNode, GreenToken, Language, NodeOrToken};

use super::ast::{Argument, ArgumentList, AstNode};
use super::line_index::LineIndex;
use super::trivia;
use super::{CsLanguage, CsSyntaxKind, CsSyntaxNode};
use crate::error::SharplintError;
use crate::result::Result;

type GreenElement = NodeOrToken<GreenNode, GreenToken>;

/// Where to splice the new argument
#[derive(Debug, Clone)]
pub enum InsertPosition {
    First,
    Last,
    After(Argument),
    Before(Argument),
}

/// One argument plus the trivia and separator that travel with it
struct Entry {
    /// Trivia between the previous separator (or the open paren) and the argument
    leading: Vec<GreenToken>,
    arg: GreenNode,
    /// Trivia between the argument and its following comma
    trailing: Vec<GreenToken>,
    comma: Option<GreenToken>,
}

impl Entry {
    fn new(arg: GreenNode) -> Self {
        Entry {
            leading: Vec::new(),
            arg,
            trailing: Vec::new(),
            comma: None,
        }
    }
}

/// Decomposed argument list
struct Shape {
    open: GreenToken,
    entries: Vec<Entry>,
    /// Trivia between the last entry (or the open paren) and the close paren
    close_leading: Vec<GreenToken>,
    close: GreenToken,
}

/// Insert `new_argument` (a green `Argument` node, e.g. from
/// [`super::builder::argument_from_text`]) into `list` at `position`.
///
/// Returns a new green node for the whole argument list. Layout is chosen
/// from the list's current shape: in a single-line list the new argument is
/// separated by a comma and a single space; in a multi-line list it lands on
/// its own line, aligned with its neighbor, and in the append case the close
/// paren moves up to hug it. Comments adjacent to the splice point are
/// preserved.
///
/// Fails when the insertion would put a positional argument after a named
/// one (or a named one before a positional one), when the new argument is
/// empty, or when `position` references an argument from a different list.
pub fn insert_argument(
    list: &ArgumentList,
    new_argument: GreenNode,
    position: InsertPosition,
) -> Result<GreenNode> {
    let new_argument = strip_outer_trivia(new_argument)?;
    let mut shape = decompose(list)?;
    let count = shape.entries.len();

    let index = match &position {
        InsertPosition::First => 0,
        InsertPosition::Last => count,
        InsertPosition::After(anchor) => index_in(list, anchor)? + 1,
        InsertPosition::Before(anchor) => index_in(list, anchor)?,
    };
    validate_name_order(list, &new_argument, index)?;

    let red_args: Vec<CsSyntaxNode> = list.arguments().map(|a| a.syntax().clone()).collect();
    let root = list
        .syntax()
        .ancestors()
        .last()
        .unwrap_or_else(|| list.syntax().clone());
    let lines = LineIndex::new(&root.text().to_string());
    let line_of = |offset: rowan::TextSize| lines.line_of(offset);

    let mut entry = Entry::new(new_argument);

    if count == 0 {
        // Sole argument: reuse whatever sat between the parens (usually
        // nothing, occasionally a comment) as its leading trivia.
        entry.leading = std::mem::take(&mut shape.close_leading);
        shape.entries.push(entry);
    } else if index == 0 {
        // Prepend. The new argument takes over the old first argument's
        // position and the layout part of its leading trivia; a comment on
        // the old first argument's own line stays with that argument as it
        // moves down a line or gains a fresh single space.
        let old_first_start = red_args[0].text_range().start();
        let open_line = list
            .open_paren()
            .map(|t| line_of(t.text_range().start()))
            .unwrap_or_default();
        let multi_line = line_of(old_first_start) != open_line;

        let (layout, annotation) =
            trivia::split_comment_tail(std::mem::take(&mut shape.entries[0].leading));
        let indent = trivia::green_line_width(&layout);
        entry.leading = layout;
        entry.comma = Some(trivia::comma());
        let mut displaced = if multi_line {
            trivia::align_run(vec![trivia::newline()], indent)
        } else {
            vec![trivia::space()]
        };
        displaced.extend(annotation);
        shape.entries[0].leading = displaced;
        shape.entries.insert(0, entry);
    } else if index == count {
        // Append. The previous last argument gains a comma; its trailing
        // run (currently parked before the close paren) is trimmed back to
        // any comment it carries, and the close paren moves up to hug the
        // new argument.
        let prev = &red_args[count - 1];
        let open_line = list
            .open_paren()
            .map(|t| line_of(t.text_range().start()))
            .unwrap_or_default();
        let multi_line = line_of(prev.text_range().start()) != open_line;

        let run = std::mem::take(&mut shape.close_leading);
        let last = &mut shape.entries[count - 1];
        last.trailing = trivia::strip_trailing_break(run);
        last.comma = Some(trivia::comma());

        entry.leading = if multi_line {
            trivia::align_run(vec![trivia::newline()], trivia::indentation_of(prev))
        } else {
            vec![trivia::space()]
        };
        shape.entries.push(entry);
    } else {
        // Between two existing arguments. The comma after the predecessor
        // stays put; the new argument brings its own separator and aligns
        // with its successor, whose leading trivia is untouched in
        // multi-line layouts.
        let prev = &red_args[index - 1];
        let next = &red_args[index];
        let multi_line = line_of(prev.text_range().start()) != line_of(next.text_range().start());

        if shape.entries[index - 1].comma.is_none() {
            return Err(SharplintError::EditError {
                message: "argument list is missing a separator".to_string(),
            });
        }
        let before = &mut shape.entries[index - 1];
        before.trailing = trivia::strip_trailing_break(std::mem::take(&mut before.trailing));

        entry.comma = Some(trivia::comma());
        if multi_line {
            entry.leading = trivia::align_run(vec![trivia::newline()], trivia::indentation_of(next));
        } else {
            entry.leading = vec![trivia::space()];
            let after = &mut shape.entries[index];
            after.leading = trivia::normalize_to_space(std::mem::take(&mut after.leading));
        }
        shape.entries.insert(index, entry);
    }

    Ok(reassemble(shape))
}

/// Decompose a well-formed argument list into [`Shape`]
fn decompose(list: &ArgumentList) -> Result<Shape> {
    let malformed = |what: &str| SharplintError::EditError {
        message: format!("argument list is malformed: {what}"),
    };

    let mut open = None;
    let mut close = None;
    let mut close_leading = Vec::new();
    let mut entries: Vec<Entry> = Vec::new();
    let mut pending: Vec<GreenToken> = Vec::new();

    for element in list.syntax().children_with_tokens() {
        match element {
            NodeOrToken::Token(token) => match token.kind() {
                CsSyntaxKind::LParen => open = Some(token.green().to_owned()),
                CsSyntaxKind::RParen => {
                    close_leading = std::mem::take(&mut pending);
                    close = Some(token.green().to_owned());
                }
                CsSyntaxKind::Comma => {
                    let Some(last) = entries.last_mut() else {
                        return Err(malformed("separator before any argument"));
                    };
                    if last.comma.is_some() {
                        return Err(malformed("consecutive separators"));
                    }
                    last.trailing = std::mem::take(&mut pending);
                    last.comma = Some(token.green().to_owned());
                }
                kind if kind.is_trivia() => pending.push(token.green().to_owned()),
                _ => return Err(malformed("unexpected token")),
            },
            NodeOrToken::Node(node) => {
                if node.kind() != CsSyntaxKind::Argument {
                    return Err(malformed("unexpected node"));
                }
                entries.push(Entry {
                    leading: std::mem::take(&mut pending),
                    arg: node.green().into_owned(),
                    trailing: Vec::new(),
                    comma: None,
                });
            }
        }
    }

    let open = open.ok_or_else(|| malformed("no open parenthesis"))?;
    let close = close.ok_or_else(|| malformed("no close parenthesis"))?;
    Ok(Shape {
        open,
        entries,
        close_leading,
        close,
    })
}

fn reassemble(shape: Shape) -> GreenNode {
    let mut children: Vec<GreenElement> = Vec::new();
    children.push(NodeOrToken::Token(shape.open));
    for entry in shape.entries {
        children.extend(entry.leading.into_iter().map(NodeOrToken::Token));
        children.push(NodeOrToken::Node(entry.arg));
        children.extend(entry.trailing.into_iter().map(NodeOrToken::Token));
        if let Some(comma) = entry.comma {
            children.push(NodeOrToken::Token(comma));
        }
    }
    children.extend(shape.close_leading.into_iter().map(NodeOrToken::Token));
    children.push(NodeOrToken::Token(shape.close));
    GreenNode::new(
        CsLanguage::kind_to_raw(CsSyntaxKind::ArgumentList),
        children,
    )
}

/// Index of `anchor` within `list`, failing fast when it belongs elsewhere
fn index_in(list: &ArgumentList, anchor: &Argument) -> Result<usize> {
    let belongs = anchor
        .syntax()
        .parent()
        .as_ref()
        .is_some_and(|parent| parent == list.syntax());
    if !belongs {
        return Err(SharplintError::Precondition {
            message: "anchor argument does not belong to the target argument list".to_string(),
        });
    }
    anchor.index().ok_or_else(|| SharplintError::Precondition {
        message: "anchor argument has no position in its list".to_string(),
    })
}

/// C# name-order rule: positional arguments may not follow named ones
fn validate_name_order(list: &ArgumentList, new_argument: &GreenNode, index: usize) -> Result<()> {
    let new_named = green_is_named(new_argument);
    let args: Vec<Argument> = list.arguments().collect();

    if !new_named
        && index > 0
        && args.get(index - 1).is_some_and(|prev| prev.is_named())
    {
        return Err(SharplintError::EditError {
            message: "cannot insert a positional argument after a named argument".to_string(),
        });
    }
    if new_named && args.get(index).is_some_and(|next| !next.is_named()) {
        return Err(SharplintError::EditError {
            message: "cannot insert a named argument before a positional argument".to_string(),
        });
    }
    Ok(())
}

fn green_is_named(argument: &GreenNode) -> bool {
    CsSyntaxNode::new_root(argument.clone())
        .children()
        .any(|child| child.kind() == CsSyntaxKind::NameColon)
}

/// Trim trivia off both ends of a green argument, rejecting empty ones
fn strip_outer_trivia(argument: GreenNode) -> Result<GreenNode> {
    if CsLanguage::kind_from_raw(argument.kind()) != CsSyntaxKind::Argument {
        return Err(SharplintError::EditError {
            message: "inserted node must be an argument".to_string(),
        });
    }
    let probe = CsSyntaxNode::new_root(argument);
    let elements: Vec<_> = probe.children_with_tokens().collect();
    let is_trivia = |element: &rowan::SyntaxElement<CsLanguage>| {
        matches!(element, NodeOrToken::Token(t) if t.kind().is_trivia())
    };
    let Some(start) = elements.iter().position(|e| !is_trivia(e)) else {
        return Err(SharplintError::EditError {
            message: "cannot insert an empty argument".to_string(),
        });
    };
    let end = elements.iter().rposition(|e| !is_trivia(e)).unwrap_or(start);

    let children: Vec<GreenElement> = elements[start..=end]
        .iter()
        .map(|element| match element {
            NodeOrToken::Node(n) => NodeOrToken::Node(n.green().into_owned()),
            NodeOrToken::Token(t) => NodeOrToken::Token(t.green().to_owned()),
        })
        .collect();
    Ok(GreenNode::new(
        CsLanguage::kind_to_raw(CsSyntaxKind::Argument),
        children,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cst::builder::argument_from_text;
    use crate::cst::parse_cs;

    fn first_list(root: &CsSyntaxNode) -> ArgumentList {
        root.descendants()
            .filter_map(ArgumentList::cast)
            .next()
            .expect("source has an argument list")
    }

    fn apply(src: &str, new_arg: &str, position: InsertPosition) -> String {
        let (root, errors) = parse_cs(src);
        assert!(errors.is_empty(), "parse errors in {src:?}: {errors:?}");
        let list = first_list(&root);
        let arg = argument_from_text(new_arg).unwrap();
        let green = insert_argument(&list, arg, position).unwrap();
        let new_root = list.syntax().replace_with(green);
        CsSyntaxNode::new_root(new_root).text().to_string()
    }

    fn nth_arg(root: &CsSyntaxNode, n: usize) -> Argument {
        first_list(root).arguments().nth(n).expect("argument present")
    }

    #[test]
    fn append_to_single_line_call() {
        let result = apply(
            "observable.Subscribe(nextValue => { });",
            "ex => { /*TODO: handle this!*/ }",
            InsertPosition::Last,
        );
        assert_eq!(
            result,
            "observable.Subscribe(nextValue => { }, ex => { /*TODO: handle this!*/ });"
        );
    }

    #[test]
    fn append_to_multi_line_call() {
        let result = apply(
            "observable.Subscribe(\n                nextValue => { });",
            "ex => { /*TODO: handle this!*/ }",
            InsertPosition::Last,
        );
        assert_eq!(
            result,
            "observable.Subscribe(\n                nextValue => { },\n                ex => { /*TODO: handle this!*/ });"
        );
    }

    #[test]
    fn append_preserves_trailing_comment() {
        let result = apply("f(a /*keep*/)", "b", InsertPosition::Last);
        assert_eq!(result, "f(a /*keep*/, b)");
    }

    #[test]
    fn append_strips_dangling_close_paren_line() {
        let result = apply("f(\n    a\n)", "b", InsertPosition::Last);
        assert_eq!(result, "f(\n    a,\n    b)");
    }

    #[test]
    fn prepend_single_line() {
        let result = apply("f(b, c)", "a", InsertPosition::First);
        assert_eq!(result, "f(a, b, c)");
    }

    #[test]
    fn prepend_multi_line_aligns_with_old_first() {
        let result = apply("f(\n    b,\n    c)", "a", InsertPosition::First);
        assert_eq!(result, "f(\n    a,\n    b,\n    c)");
    }

    #[test]
    fn prepend_keeps_comment_with_annotated_argument() {
        let result = apply("f(\n    /*why*/ b,\n    c)", "a", InsertPosition::First);
        assert_eq!(result, "f(\n    a,\n    /*why*/ b,\n    c)");
    }

    #[test]
    fn prepend_single_line_keeps_comment_with_annotated_argument() {
        let result = apply("f( /*why*/ b, c)", "a", InsertPosition::First);
        assert_eq!(result, "f( a, /*why*/ b, c)");
    }

    #[test]
    fn insert_between_single_line() {
        let (root, _) = parse_cs("f(a, c)");
        let anchor = nth_arg(&root, 0);
        let arg = argument_from_text("b").unwrap();
        let green = insert_argument(&first_list(&root), arg, InsertPosition::After(anchor)).unwrap();
        let text = CsSyntaxNode::new_root(first_list(&root).syntax().replace_with(green))
            .text()
            .to_string();
        assert_eq!(text, "f(a, b, c)");
    }

    #[test]
    fn insert_before_is_symmetric() {
        let (root, _) = parse_cs("f(a, c)");
        let anchor = nth_arg(&root, 1);
        let arg = argument_from_text("b").unwrap();
        let green =
            insert_argument(&first_list(&root), arg, InsertPosition::Before(anchor)).unwrap();
        let text = CsSyntaxNode::new_root(first_list(&root).syntax().replace_with(green))
            .text()
            .to_string();
        assert_eq!(text, "f(a, b, c)");
    }

    #[test]
    fn insert_between_multi_line_keeps_comment() {
        let (root, _) = parse_cs("f(\n    a /*c*/,\n    b)");
        let anchor = nth_arg(&root, 0);
        let arg = argument_from_text("x").unwrap();
        let green = insert_argument(&first_list(&root), arg, InsertPosition::After(anchor)).unwrap();
        let text = CsSyntaxNode::new_root(first_list(&root).syntax().replace_with(green))
            .text()
            .to_string();
        assert_eq!(text, "f(\n    a /*c*/,\n    x,\n    b)");
    }

    #[test]
    fn insert_into_empty_list() {
        let result = apply("f()", "a", InsertPosition::Last);
        assert_eq!(result, "f(a)");
    }

    #[test]
    fn wrapped_last_argument_still_counts_as_single_line() {
        // Only the lambda body spans lines; the call itself starts single-line.
        let result = apply("f(a, x => {\n    y();\n})", "b", InsertPosition::Last);
        assert_eq!(result, "f(a, x => {\n    y();\n}, b)");
    }

    #[test]
    fn positional_after_named_is_rejected() {
        let (root, _) = parse_cs("f(x: 1)");
        let arg = argument_from_text("2").unwrap();
        let err = insert_argument(&first_list(&root), arg, InsertPosition::Last).unwrap_err();
        assert!(err.to_string().contains("positional argument after"));
    }

    #[test]
    fn named_before_positional_is_rejected() {
        let (root, _) = parse_cs("f(1)");
        let arg = argument_from_text("x: 2").unwrap();
        let err = insert_argument(&first_list(&root), arg, InsertPosition::First).unwrap_err();
        assert!(err.to_string().contains("named argument before"));
    }

    #[test]
    fn named_after_named_is_allowed() {
        let result = apply("f(x: 1)", "y: 2", InsertPosition::Last);
        assert_eq!(result, "f(x: 1, y: 2)");
    }

    #[test]
    fn anchor_from_another_list_is_rejected() {
        let (root, _) = parse_cs("f(a); g(b)");
        let lists: Vec<ArgumentList> = root.descendants().filter_map(ArgumentList::cast).collect();
        let foreign = lists[1].arguments().next().unwrap();
        let arg = argument_from_text("x").unwrap();
        let err = insert_argument(&lists[0], arg, InsertPosition::After(foreign)).unwrap_err();
        assert!(matches!(err, SharplintError::Precondition { .. }));
    }

    #[test]
    fn whitespace_only_argument_is_rejected() {
        assert!(argument_from_text("   ").is_err());
    }

    #[test]
    fn surrounding_code_is_untouched() {
        let src = "class C\n{\n    void M()\n    {\n        observable.Subscribe(nextValue => { });\n    }\n}\n";
        let (root, _) = parse_cs(src);
        let list = first_list(&root);
        let arg = argument_from_text("ex => Log(ex)").unwrap();
        let green = insert_argument(&list, arg, InsertPosition::Last).unwrap();
        let text = CsSyntaxNode::new_root(list.syntax().replace_with(green))
            .text()
            .to_string();
        assert_eq!(
            text,
            "class C\n{\n    void M()\n    {\n        observable.Subscribe(nextValue => { }, ex => Log(ex));\n    }\n}\n"
        );
    }
}
