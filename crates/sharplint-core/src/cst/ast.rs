//! Typed AST layer over the CST
//!
//! Ergonomic, type-safe wrappers over raw CST nodes. Each wrapper implements
//! `cast()` to safely convert from an untyped node.
//!
//! # Example
//!
//! ```ignore
//! use sharplint_core::cst::{parse_cs, ast::{AstNode, Invocation}};
//!
//! let (cst, _) = parse_cs("observable.Subscribe(x => { });");
//! let call = cst.descendants().find_map(Invocation::cast).unwrap();
//! assert_eq!(call.method_name().as_deref(), Some("Subscribe"));
//! ```

use super::{CsSyntaxKind, CsSyntaxNode, CsSyntaxToken};

/// Helper trait for casting CST nodes to typed wrappers
pub trait AstNode: Sized {
    fn can_cast(kind: CsSyntaxKind) -> bool;
    fn cast(node: CsSyntaxNode) -> Option<Self>;
    fn syntax(&self) -> &CsSyntaxNode;
}

macro_rules! ast_node {
    ($(#[$doc:meta])* $name:ident, $kind:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name {
            syntax: CsSyntaxNode,
        }

        impl AstNode for $name {
            fn can_cast(kind: CsSyntaxKind) -> bool {
                kind == $kind
            }

            fn cast(node: CsSyntaxNode) -> Option<Self> {
                if Self::can_cast(node.kind()) {
                    Some(Self { syntax: node })
                } else {
                    None
                }
            }

            fn syntax(&self) -> &CsSyntaxNode {
                &self.syntax
            }
        }
    };
}

fn token_of_kind(parent: &CsSyntaxNode, kind: CsSyntaxKind) -> Option<CsSyntaxToken> {
    parent
        .children_with_tokens()
        .filter_map(|e| e.into_token())
        .find(|t| t.kind() == kind)
}

/// First identifier token that directly follows `kind` among the children
fn ident_after(parent: &CsSyntaxNode, kind: CsSyntaxKind) -> Option<CsSyntaxToken> {
    let mut seen = false;
    for element in parent.children_with_tokens() {
        if let Some(token) = element.into_token() {
            if token.kind() == kind {
                seen = true;
            } else if seen && token.kind() == CsSyntaxKind::Ident {
                return Some(token);
            }
        }
    }
    None
}

ast_node!(
    /// Root of a parsed source file
    Root,
    CsSyntaxKind::Root
);

impl Root {
    pub fn classes(&self) -> impl Iterator<Item = ClassDecl> {
        self.syntax.descendants().filter_map(ClassDecl::cast)
    }

    pub fn structs(&self) -> impl Iterator<Item = StructDecl> {
        self.syntax.descendants().filter_map(StructDecl::cast)
    }

    pub fn invocations(&self) -> impl Iterator<Item = Invocation> {
        self.syntax.descendants().filter_map(Invocation::cast)
    }
}

ast_node!(
    /// `class Name : Base { ... }`
    ClassDecl,
    CsSyntaxKind::ClassDecl
);

impl ClassDecl {
    pub fn name(&self) -> Option<String> {
        ident_after(&self.syntax, CsSyntaxKind::ClassKw).map(|t| t.text().to_string())
    }

    pub fn modifiers(&self) -> Vec<CsSyntaxKind> {
        self.syntax
            .children()
            .find(|n| n.kind() == CsSyntaxKind::ModifierList)
            .map(|list| {
                list.children_with_tokens()
                    .filter_map(|e| e.into_token())
                    .map(|t| t.kind())
                    .filter(|k| k.is_modifier())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn has_modifier(&self, kind: CsSyntaxKind) -> bool {
        self.modifiers().contains(&kind)
    }

    /// The `class` keyword token (fix insertion point for `sealed`)
    pub fn class_keyword(&self) -> Option<CsSyntaxToken> {
        token_of_kind(&self.syntax, CsSyntaxKind::ClassKw)
    }

    pub fn base_types(&self) -> Vec<String> {
        self.syntax
            .children()
            .find(|n| n.kind() == CsSyntaxKind::BaseList)
            .map(|list| {
                list.children()
                    .filter(|n| n.kind() == CsSyntaxKind::TypeName)
                    .map(|n| n.text().to_string().trim().to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn attributes(&self) -> impl Iterator<Item = Attribute> {
        self.syntax
            .children()
            .filter(|n| n.kind() == CsSyntaxKind::AttributeList)
            .flat_map(|list| list.children().filter_map(Attribute::cast).collect::<Vec<_>>())
    }

    pub fn methods(&self) -> impl Iterator<Item = MethodDecl> {
        self.syntax.children().filter_map(MethodDecl::cast)
    }

    pub fn constructors(&self) -> impl Iterator<Item = CtorDecl> {
        self.syntax.children().filter_map(CtorDecl::cast)
    }
}

ast_node!(
    /// `struct Name { ... }`
    StructDecl,
    CsSyntaxKind::StructDecl
);

impl StructDecl {
    pub fn name(&self) -> Option<String> {
        ident_after(&self.syntax, CsSyntaxKind::StructKw).map(|t| t.text().to_string())
    }

    pub fn attributes(&self) -> impl Iterator<Item = Attribute> {
        self.syntax
            .children()
            .filter(|n| n.kind() == CsSyntaxKind::AttributeList)
            .flat_map(|list| list.children().filter_map(Attribute::cast).collect::<Vec<_>>())
    }
}

ast_node!(
    /// A single attribute, e.g. `TechnicalDebt(2015, 5, 1, "reason")`
    Attribute,
    CsSyntaxKind::Attribute
);

impl Attribute {
    /// Attribute name; for qualified names the last segment
    pub fn name(&self) -> Option<String> {
        self.syntax
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .filter(|t| t.kind() == CsSyntaxKind::Ident)
            .last()
            .map(|t| t.text().to_string())
    }

    pub fn argument_list(&self) -> Option<ArgumentList> {
        self.syntax.children().find_map(ArgumentList::cast)
    }
}

ast_node!(
    /// Method (or property) declaration inside a type
    MethodDecl,
    CsSyntaxKind::MethodDecl
);

impl MethodDecl {
    /// Member name: the identifier right before the parameter list, or the
    /// last identifier outside the body for properties
    pub fn name(&self) -> Option<String> {
        let mut last_ident: Option<String> = None;
        for element in self.syntax.children_with_tokens() {
            match element {
                rowan::NodeOrToken::Node(node) => match node.kind() {
                    CsSyntaxKind::ParamList | CsSyntaxKind::Block => break,
                    CsSyntaxKind::TypeName => {}
                    _ => {}
                },
                rowan::NodeOrToken::Token(token) => {
                    if token.kind() == CsSyntaxKind::Ident {
                        last_ident = Some(token.text().to_string());
                    } else if token.kind() == CsSyntaxKind::Arrow {
                        break;
                    }
                }
            }
        }
        last_ident
    }

    pub fn modifiers(&self) -> Vec<CsSyntaxKind> {
        self.syntax
            .children()
            .find(|n| n.kind() == CsSyntaxKind::ModifierList)
            .map(|list| {
                list.children_with_tokens()
                    .filter_map(|e| e.into_token())
                    .map(|t| t.kind())
                    .filter(|k| k.is_modifier())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn is_virtual(&self) -> bool {
        self.modifiers().contains(&CsSyntaxKind::VirtualKw)
    }

    pub fn param_list(&self) -> Option<CsSyntaxNode> {
        self.syntax
            .children()
            .find(|n| n.kind() == CsSyntaxKind::ParamList)
    }

    pub fn param_count(&self) -> usize {
        self.param_list()
            .map(|list| {
                list.children()
                    .filter(|n| n.kind() == CsSyntaxKind::Param)
                    .count()
            })
            .unwrap_or(0)
    }

    pub fn attributes(&self) -> impl Iterator<Item = Attribute> {
        self.syntax
            .children()
            .filter(|n| n.kind() == CsSyntaxKind::AttributeList)
            .flat_map(|list| list.children().filter_map(Attribute::cast).collect::<Vec<_>>())
    }

    pub fn body(&self) -> Option<CsSyntaxNode> {
        self.syntax
            .children()
            .find(|n| n.kind() == CsSyntaxKind::Block)
    }
}

ast_node!(
    /// Constructor declaration
    CtorDecl,
    CsSyntaxKind::CtorDecl
);

impl CtorDecl {
    pub fn body(&self) -> Option<CsSyntaxNode> {
        self.syntax
            .children()
            .find(|n| n.kind() == CsSyntaxKind::Block)
    }

    pub fn invocations(&self) -> impl Iterator<Item = Invocation> {
        self.syntax.descendants().filter_map(Invocation::cast)
    }
}

ast_node!(
    /// A postfix chain containing at least one call, e.g. `a.B.Subscribe(x)`
    Invocation,
    CsSyntaxKind::Invocation
);

impl Invocation {
    /// Name of the invoked method: the identifier immediately preceding the
    /// last argument list, skipping trivia
    pub fn method_name(&self) -> Option<String> {
        self.argument_list()
            .and_then(|list| list.callee_name())
    }

    /// The last (outermost) argument list of the chain
    pub fn argument_list(&self) -> Option<ArgumentList> {
        self.syntax
            .children()
            .filter(|n| n.kind() == CsSyntaxKind::ArgumentList)
            .last()
            .and_then(ArgumentList::cast)
    }
}

ast_node!(
    /// `new Type(args)`
    ObjectCreation,
    CsSyntaxKind::ObjectCreation
);

impl ObjectCreation {
    pub fn type_name(&self) -> Option<String> {
        self.syntax
            .children()
            .find(|n| n.kind() == CsSyntaxKind::TypeName)
            .map(|n| n.text().to_string().trim().to_string())
    }

    pub fn argument_list(&self) -> Option<ArgumentList> {
        self.syntax.children().find_map(ArgumentList::cast)
    }
}

ast_node!(
    /// `x => expr` or `(a, b) => { ... }`
    Lambda,
    CsSyntaxKind::Lambda
);

ast_node!(
    /// Parenthesized, comma-separated call arguments
    ArgumentList,
    CsSyntaxKind::ArgumentList
);

impl ArgumentList {
    pub fn arguments(&self) -> impl Iterator<Item = Argument> {
        self.syntax.children().filter_map(Argument::cast)
    }

    pub fn len(&self) -> usize {
        self.arguments().count()
    }

    pub fn is_empty(&self) -> bool {
        self.arguments().next().is_none()
    }

    pub fn open_paren(&self) -> Option<CsSyntaxToken> {
        token_of_kind(&self.syntax, CsSyntaxKind::LParen)
    }

    pub fn close_paren(&self) -> Option<CsSyntaxToken> {
        self.syntax
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .filter(|t| t.kind() == CsSyntaxKind::RParen)
            .last()
    }

    /// Comma tokens between arguments, in order
    pub fn separators(&self) -> Vec<CsSyntaxToken> {
        self.syntax
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .filter(|t| t.kind() == CsSyntaxKind::Comma)
            .collect()
    }

    /// Identifier directly preceding this list in the parent chain: the
    /// callee (or attribute) name
    pub fn callee_name(&self) -> Option<String> {
        let mut element = self.syntax.prev_sibling_or_token();
        while let Some(current) = element.take() {
            match &current {
                rowan::NodeOrToken::Token(token) if token.kind().is_trivia() => {
                    element = current.prev_sibling_or_token();
                }
                rowan::NodeOrToken::Token(token) if token.kind() == CsSyntaxKind::Gt => {
                    // Skip generic arguments: scan back to the matching `<`.
                    // An unmatched `>` leaves `element` empty, ending the walk.
                    let mut depth = 0usize;
                    let mut cursor = Some(current.clone());
                    while let Some(el) = cursor {
                        if let rowan::NodeOrToken::Token(t) = &el {
                            match t.kind() {
                                CsSyntaxKind::Gt => depth += 1,
                                CsSyntaxKind::Lt => {
                                    depth -= 1;
                                    if depth == 0 {
                                        element = el.prev_sibling_or_token();
                                        break;
                                    }
                                }
                                _ => {}
                            }
                        }
                        cursor = el.prev_sibling_or_token();
                    }
                }
                rowan::NodeOrToken::Token(token) if token.kind() == CsSyntaxKind::Ident => {
                    return Some(token.text().to_string());
                }
                _ => return None,
            }
        }
        None
    }
}

ast_node!(
    /// A single call argument, optionally labeled `name:`
    Argument,
    CsSyntaxKind::Argument
);

impl Argument {
    /// Label of a named argument (`onError` for `onError: ...`)
    pub fn name(&self) -> Option<String> {
        self.syntax
            .children()
            .find(|n| n.kind() == CsSyntaxKind::NameColon)
            .and_then(|nc| token_of_kind(&nc, CsSyntaxKind::Ident))
            .map(|t| t.text().to_string())
    }

    pub fn is_named(&self) -> bool {
        self.name().is_some()
    }

    /// The parent argument list; arguments always live in one
    pub fn parent_list(&self) -> Option<ArgumentList> {
        self.syntax.parent().and_then(ArgumentList::cast)
    }

    /// Index of this argument within its list
    pub fn index(&self) -> Option<usize> {
        let list = self.parent_list()?;
        list.arguments()
            .position(|a| a.syntax() == &self.syntax)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cst::parse_cs;

    fn first<T: AstNode>(src: &str) -> T {
        let (cst, _) = parse_cs(src);
        cst.descendants()
            .find_map(T::cast)
            .expect("expected node not parsed")
    }

    #[test]
    fn invocation_method_name() {
        let call: Invocation = first("observable.Subscribe(nextValue => { });");
        assert_eq!(call.method_name().as_deref(), Some("Subscribe"));
        assert_eq!(call.argument_list().unwrap().len(), 1);
    }

    #[test]
    fn generic_call_method_name() {
        let call: Invocation = first("Create<Money>(factory);");
        assert_eq!(call.method_name().as_deref(), Some("Create"));
    }

    #[test]
    fn callee_name_stops_at_unmatched_angle_bracket() {
        use crate::cst::{CsLanguage, CsSyntaxNode};
        use rowan::{GreenNode, GreenToken, Language, NodeOrToken};

        let kind = CsLanguage::kind_to_raw;
        let list = GreenNode::new(
            kind(CsSyntaxKind::ArgumentList),
            [
                NodeOrToken::Token(GreenToken::new(kind(CsSyntaxKind::LParen), "(")),
                NodeOrToken::Token(GreenToken::new(kind(CsSyntaxKind::RParen), ")")),
            ],
        );
        let invocation = GreenNode::new(
            kind(CsSyntaxKind::Invocation),
            [
                NodeOrToken::Token(GreenToken::new(kind(CsSyntaxKind::Gt), ">")),
                NodeOrToken::Node(list),
            ],
        );
        let root = CsSyntaxNode::new_root(GreenNode::new(
            kind(CsSyntaxKind::Root),
            [NodeOrToken::Node(invocation)],
        ));
        let list = root.descendants().find_map(ArgumentList::cast).unwrap();
        assert_eq!(list.callee_name(), None);
    }

    #[test]
    fn class_modifiers_and_bases() {
        let class: ClassDecl = first("public sealed class Widget : Base, IWidget { }");
        assert_eq!(class.name().as_deref(), Some("Widget"));
        assert!(class.has_modifier(CsSyntaxKind::SealedKw));
        assert_eq!(class.base_types(), vec!["Base", "IWidget"]);
    }

    #[test]
    fn attribute_name_and_args() {
        let class: ClassDecl = first("[TechnicalDebt(2015, 5, 1, \"why\")]\nclass C { }");
        let attr = class.attributes().next().unwrap();
        assert_eq!(attr.name().as_deref(), Some("TechnicalDebt"));
        assert_eq!(attr.argument_list().unwrap().len(), 4);
    }

    #[test]
    fn method_virtual_and_params() {
        let class: ClassDecl =
            first("class C { public virtual void Render(int width, string title) { } }");
        let method = class.methods().next().unwrap();
        assert_eq!(method.name().as_deref(), Some("Render"));
        assert!(method.is_virtual());
        assert_eq!(method.param_count(), 2);
    }

    #[test]
    fn argument_separator_interleaving() {
        let list: ArgumentList = first("f(a, b, c)");
        assert_eq!(list.len(), 3);
        assert_eq!(list.separators().len(), 2);
    }

    #[test]
    fn object_creation() {
        let creation: ObjectCreation = first("var m = new Money();");
        assert_eq!(creation.type_name().as_deref(), Some("Money"));
        assert!(creation.argument_list().unwrap().is_empty());
    }
}
