//! Tolerant parser for the C# source subset
//!
//! Builds a lossless, hierarchical CST from the trivia-preserving token
//! stream. The parser is deliberately forgiving: anything it does not
//! recognize is consumed verbatim so the tree always reproduces the source
//! byte-for-byte (`parse_cs(src).0.text() == src`).
//!
//! Trivia placement is the load-bearing invariant for the argument-list
//! editor: whitespace, line breaks, and comments between `(`, arguments,
//! commas, and `)` are direct children of the `ArgumentList` node. Trivia
//! interior to an argument's expression lives inside the `Argument` node.

use super::lexer::{CstToken, lex_with_trivia};
use super::{CsSyntaxKind, CsSyntaxNode, CstBuilder};

/// A parse error with its source span
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub span: std::ops::Range<usize>,
}

impl ParseError {
    fn new(message: impl Into<String>, span: std::ops::Range<usize>) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }
}

/// Parse C# subset source into a lossless CST
pub fn parse_cs(source: &str) -> (CsSyntaxNode, Vec<ParseError>) {
    let (tokens, lexer_errors) = lex_with_trivia(source);
    let mut errors: Vec<ParseError> = lexer_errors
        .into_iter()
        .map(|e| ParseError::new(e.message, e.span))
        .collect();

    let mut parser = Parser::new(&tokens);
    parser.parse_root();
    errors.extend(parser.errors.clone());
    (parser.finish(), errors)
}

/// Token stream parser
struct Parser<'a> {
    tokens: &'a [CstToken],
    pos: usize,
    builder: CstBuilder,
    errors: Vec<ParseError>,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [CstToken]) -> Self {
        Self {
            tokens,
            pos: 0,
            builder: CstBuilder::new(),
            errors: Vec::new(),
        }
    }

    fn finish(self) -> CsSyntaxNode {
        self.builder.finish()
    }

    // ------------------------------------------------------------------
    // Cursor primitives
    // ------------------------------------------------------------------

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn current_kind(&self) -> CsSyntaxKind {
        self.tokens
            .get(self.pos)
            .map_or(CsSyntaxKind::Eof, |t| t.kind)
    }

    fn at_trivia(&self) -> bool {
        self.current_kind().is_trivia()
    }

    /// Add the current token to the tree and advance
    fn bump(&mut self) {
        if let Some(token) = self.tokens.get(self.pos) {
            self.builder.token(token.kind, &token.text);
            self.pos += 1;
        }
    }

    /// Attach all pending trivia tokens to the current node
    fn consume_trivia(&mut self) {
        while self.at_trivia() {
            self.bump();
        }
    }

    /// Consume pending trivia into the current node, then the next token
    fn bump_sig(&mut self) {
        self.consume_trivia();
        self.bump();
    }

    /// Index of the nth significant (non-trivia) token at or after `from`
    fn sig_index(&self, from: usize, nth: usize) -> Option<usize> {
        let mut remaining = nth;
        for (i, token) in self.tokens.iter().enumerate().skip(from) {
            if token.kind.is_trivia() {
                continue;
            }
            if remaining == 0 {
                return Some(i);
            }
            remaining -= 1;
        }
        None
    }

    /// Kind of the nth significant token counting from the cursor
    fn sig_kind(&self, nth: usize) -> CsSyntaxKind {
        self.sig_index(self.pos, nth)
            .map_or(CsSyntaxKind::Eof, |i| self.tokens[i].kind)
    }

    fn error_here(&mut self, message: impl Into<String>) {
        let span = self
            .tokens
            .get(self.pos)
            .map_or(0..0, |t| t.span.clone());
        self.errors.push(ParseError::new(message, span));
    }

    /// Expect a specific significant token; recover by skipping nothing
    fn expect(&mut self, kind: CsSyntaxKind) {
        self.consume_trivia();
        if self.current_kind() == kind {
            self.bump();
        } else {
            self.error_here(format!(
                "expected {:?}, found {:?}",
                kind,
                self.current_kind()
            ));
        }
    }

    /// Significant-token index of the delimiter matching the one at `open`,
    /// honoring nesting of (), [], {} and <>
    fn matching_delimiter(&self, open: usize) -> Option<usize> {
        let open_kind = self.tokens.get(open)?.kind;
        let close_kind = match open_kind {
            CsSyntaxKind::LParen => CsSyntaxKind::RParen,
            CsSyntaxKind::LBracket => CsSyntaxKind::RBracket,
            CsSyntaxKind::LBrace => CsSyntaxKind::RBrace,
            CsSyntaxKind::Lt => CsSyntaxKind::Gt,
            _ => return None,
        };
        let mut depth = 0usize;
        for (i, token) in self.tokens.iter().enumerate().skip(open) {
            if token.kind == open_kind {
                depth += 1;
            } else if token.kind == close_kind {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
        }
        None
    }

    // ------------------------------------------------------------------
    // Top level
    // ------------------------------------------------------------------

    fn parse_root(&mut self) {
        self.builder.start_node(CsSyntaxKind::Root);

        let mut iterations = 0;
        while !self.at_end() {
            iterations += 1;
            if iterations > 100_000 {
                break;
            }
            if self.at_trivia() {
                self.bump();
                continue;
            }
            match self.decl_keyword_ahead() {
                Some(CsSyntaxKind::ClassKw) => self.parse_type_decl(CsSyntaxKind::ClassDecl),
                Some(CsSyntaxKind::StructKw) => self.parse_type_decl(CsSyntaxKind::StructDecl),
                _ => {
                    if self.at_stmt_start() {
                        self.parse_expr_stmt();
                    } else {
                        // Unknown construct: keep the token, stay lossless
                        self.bump();
                    }
                }
            }
        }

        self.builder.finish_node(); // ROOT
    }

    /// Look past attribute lists and modifiers for a type declaration keyword
    fn decl_keyword_ahead(&self) -> Option<CsSyntaxKind> {
        let mut i = self.pos;
        loop {
            let token = self.tokens.get(i)?;
            match token.kind {
                k if k.is_trivia() => i += 1,
                CsSyntaxKind::LBracket => {
                    i = self.matching_delimiter(i)? + 1;
                }
                k if k.is_modifier() => i += 1,
                CsSyntaxKind::ClassKw | CsSyntaxKind::StructKw => return Some(token.kind),
                _ => return None,
            }
        }
    }

    fn at_stmt_start(&self) -> bool {
        matches!(
            self.current_kind(),
            CsSyntaxKind::Ident
                | CsSyntaxKind::ThisKw
                | CsSyntaxKind::BaseKw
                | CsSyntaxKind::NewKw
                | CsSyntaxKind::NameofKw
                | CsSyntaxKind::Number
                | CsSyntaxKind::String
        )
    }

    // ------------------------------------------------------------------
    // Declarations
    // ------------------------------------------------------------------

    fn parse_type_decl(&mut self, kind: CsSyntaxKind) {
        self.builder.start_node(kind);

        self.consume_trivia();
        while self.current_kind() == CsSyntaxKind::LBracket {
            self.parse_attribute_list();
            self.consume_trivia();
        }
        self.parse_modifier_list();

        // class/struct keyword and name
        self.bump_sig();
        self.expect(CsSyntaxKind::Ident);

        self.consume_trivia();
        if self.current_kind() == CsSyntaxKind::Colon {
            self.parse_base_list();
        }

        self.consume_trivia();
        if self.current_kind() == CsSyntaxKind::LBrace {
            self.parse_type_body();
        }

        self.builder.finish_node();
    }

    fn parse_modifier_list(&mut self) {
        self.builder.start_node(CsSyntaxKind::ModifierList);
        while self.current_kind().is_modifier() {
            self.bump();
            // Trivia between two modifiers belongs to the list
            if self.sig_kind(0).is_modifier() {
                self.consume_trivia();
            }
        }
        self.builder.finish_node();
    }

    fn parse_base_list(&mut self) {
        self.builder.start_node(CsSyntaxKind::BaseList);
        self.bump(); // colon
        loop {
            self.consume_trivia();
            if self.current_kind() != CsSyntaxKind::Ident {
                break;
            }
            self.parse_type_name();
            if self.sig_kind(0) == CsSyntaxKind::Comma {
                self.consume_trivia();
                self.bump();
            } else {
                break;
            }
        }
        self.builder.finish_node();
    }

    fn parse_type_body(&mut self) {
        self.bump(); // {
        let mut iterations = 0;
        loop {
            iterations += 1;
            if iterations > 100_000 {
                break;
            }
            self.consume_trivia();
            match self.current_kind() {
                CsSyntaxKind::RBrace => {
                    self.bump();
                    break;
                }
                CsSyntaxKind::Eof => break,
                _ => {
                    if self.at_end() {
                        break;
                    }
                    if self.decl_keyword_ahead().is_some() {
                        let kind = if self.decl_keyword_ahead() == Some(CsSyntaxKind::StructKw) {
                            CsSyntaxKind::StructDecl
                        } else {
                            CsSyntaxKind::ClassDecl
                        };
                        self.parse_type_decl(kind);
                    } else {
                        self.parse_member();
                    }
                }
            }
        }
    }

    /// Classify the member ahead: (skip attrs + modifiers) then look at the
    /// first two significant tokens. `Ident (` means constructor.
    fn member_is_ctor(&self) -> bool {
        let mut i = self.pos;
        loop {
            let Some(token) = self.tokens.get(i) else {
                return false;
            };
            match token.kind {
                k if k.is_trivia() => i += 1,
                CsSyntaxKind::LBracket => match self.matching_delimiter(i) {
                    Some(close) => i = close + 1,
                    None => return false,
                },
                k if k.is_modifier() => i += 1,
                CsSyntaxKind::Ident => {
                    let next = self.sig_index(i + 1, 0);
                    return next.is_some_and(|n| self.tokens[n].kind == CsSyntaxKind::LParen);
                }
                _ => return false,
            }
        }
    }

    fn parse_member(&mut self) {
        let is_ctor = self.member_is_ctor();
        let kind = if is_ctor {
            CsSyntaxKind::CtorDecl
        } else {
            CsSyntaxKind::MethodDecl
        };
        self.builder.start_node(kind);

        self.consume_trivia();
        while self.current_kind() == CsSyntaxKind::LBracket {
            self.parse_attribute_list();
            self.consume_trivia();
        }
        self.parse_modifier_list();
        self.consume_trivia();

        if is_ctor {
            self.bump(); // constructor name
        } else {
            // Return (or property) type, then the member name
            if matches!(self.current_kind(), CsSyntaxKind::Ident | CsSyntaxKind::VoidKw) {
                self.parse_type_name();
                self.consume_trivia();
            }
            if self.current_kind() == CsSyntaxKind::Ident {
                self.bump();
            }
        }

        self.consume_trivia();
        if self.current_kind() == CsSyntaxKind::LParen {
            self.parse_param_list();
            self.consume_trivia();
        }

        match self.current_kind() {
            CsSyntaxKind::LBrace => self.parse_block(),
            CsSyntaxKind::Arrow => {
                // Expression body: => expr ;
                self.bump();
                self.consume_trivia();
                self.parse_expression();
                self.consume_trivia();
                if self.current_kind() == CsSyntaxKind::Semicolon {
                    self.bump();
                }
            }
            CsSyntaxKind::Semicolon => self.bump(),
            _ => {
                // Field initializer or unrecognized tail: eat to semicolon
                let mut iterations = 0;
                while !self.at_end()
                    && self.current_kind() != CsSyntaxKind::Semicolon
                    && self.current_kind() != CsSyntaxKind::RBrace
                {
                    iterations += 1;
                    if iterations > 100_000 {
                        break;
                    }
                    if self.current_kind() == CsSyntaxKind::LBrace {
                        self.parse_block();
                    } else {
                        self.bump();
                    }
                }
                if self.current_kind() == CsSyntaxKind::Semicolon {
                    self.bump();
                }
            }
        }

        self.builder.finish_node();
    }

    fn parse_attribute_list(&mut self) {
        self.builder.start_node(CsSyntaxKind::AttributeList);
        self.bump(); // [
        let mut iterations = 0;
        loop {
            iterations += 1;
            if iterations > 100_000 {
                break;
            }
            self.consume_trivia();
            match self.current_kind() {
                CsSyntaxKind::RBracket => {
                    self.bump();
                    break;
                }
                CsSyntaxKind::Eof => break,
                CsSyntaxKind::Comma => self.bump(),
                CsSyntaxKind::Ident => self.parse_attribute(),
                _ => self.bump(),
            }
        }
        self.builder.finish_node();
    }

    fn parse_attribute(&mut self) {
        self.builder.start_node(CsSyntaxKind::Attribute);
        self.bump(); // name
        while self.sig_kind(0) == CsSyntaxKind::Dot && self.sig_kind(1) == CsSyntaxKind::Ident {
            self.bump_sig(); // .
            self.bump_sig(); // ident
        }
        if self.sig_kind(0) == CsSyntaxKind::LParen {
            self.consume_trivia();
            self.parse_argument_list();
        }
        self.builder.finish_node();
    }

    fn parse_param_list(&mut self) {
        self.builder.start_node(CsSyntaxKind::ParamList);
        self.bump(); // (
        let mut iterations = 0;
        loop {
            iterations += 1;
            if iterations > 100_000 {
                break;
            }
            self.consume_trivia();
            match self.current_kind() {
                CsSyntaxKind::RParen => {
                    self.bump();
                    break;
                }
                CsSyntaxKind::Eof => break,
                CsSyntaxKind::Comma => self.bump(),
                _ => self.parse_param(),
            }
        }
        self.builder.finish_node();
    }

    /// A parameter: tokens up to the next top-level comma or closing paren
    fn parse_param(&mut self) {
        self.builder.start_node(CsSyntaxKind::Param);
        let mut depth = 0i32;
        let mut iterations = 0;
        loop {
            iterations += 1;
            if iterations > 100_000 {
                break;
            }
            let kind = self.sig_kind(0);
            match kind {
                CsSyntaxKind::Eof => break,
                CsSyntaxKind::Comma | CsSyntaxKind::RParen if depth == 0 => break,
                CsSyntaxKind::LParen | CsSyntaxKind::LBracket | CsSyntaxKind::Lt => depth += 1,
                CsSyntaxKind::RParen | CsSyntaxKind::RBracket | CsSyntaxKind::Gt => depth -= 1,
                _ => {}
            }
            self.bump_sig();
        }
        self.builder.finish_node();
    }

    // ------------------------------------------------------------------
    // Statements
    // ------------------------------------------------------------------

    fn parse_block(&mut self) {
        self.builder.start_node(CsSyntaxKind::Block);
        self.bump(); // {
        let mut iterations = 0;
        loop {
            iterations += 1;
            if iterations > 100_000 {
                break;
            }
            self.consume_trivia();
            match self.current_kind() {
                CsSyntaxKind::RBrace => {
                    self.bump();
                    break;
                }
                CsSyntaxKind::Eof => break,
                CsSyntaxKind::LBrace => self.parse_block(),
                CsSyntaxKind::ReturnKw => {
                    self.builder.start_node(CsSyntaxKind::ExprStmt);
                    self.bump();
                    self.consume_trivia();
                    if self.current_kind() != CsSyntaxKind::Semicolon {
                        self.parse_expression();
                        self.consume_trivia();
                    }
                    if self.current_kind() == CsSyntaxKind::Semicolon {
                        self.bump();
                    }
                    self.builder.finish_node();
                }
                _ => {
                    if self.at_end() {
                        break;
                    }
                    if self.at_stmt_start() {
                        self.parse_expr_stmt();
                    } else {
                        self.bump();
                    }
                }
            }
        }
        self.builder.finish_node();
    }

    fn parse_expr_stmt(&mut self) {
        self.builder.start_node(CsSyntaxKind::ExprStmt);
        self.parse_expression();
        self.consume_trivia();
        if self.current_kind() == CsSyntaxKind::Semicolon {
            self.bump();
        }
        self.builder.finish_node();
    }

    // ------------------------------------------------------------------
    // Expressions
    // ------------------------------------------------------------------

    fn at_lambda_start(&self) -> bool {
        match self.current_kind() {
            CsSyntaxKind::Ident => self.sig_kind(1) == CsSyntaxKind::Arrow,
            CsSyntaxKind::LParen => {
                let Some(open) = self.sig_index(self.pos, 0) else {
                    return false;
                };
                let Some(close) = self.matching_delimiter(open) else {
                    return false;
                };
                self.sig_index(close + 1, 0)
                    .is_some_and(|i| self.tokens[i].kind == CsSyntaxKind::Arrow)
            }
            _ => false,
        }
    }

    fn parse_expression(&mut self) {
        if self.at_lambda_start() {
            self.parse_lambda();
        } else {
            self.parse_postfix_chain();
        }
    }

    fn parse_lambda(&mut self) {
        self.builder.start_node(CsSyntaxKind::Lambda);

        if self.current_kind() == CsSyntaxKind::LParen {
            // Parenthesized parameter list, kept flat inside the lambda
            if let Some(open) = self.sig_index(self.pos, 0)
                && let Some(close) = self.matching_delimiter(open)
            {
                while self.pos <= close {
                    self.bump();
                }
            }
        } else {
            self.bump(); // single parameter
        }

        self.expect(CsSyntaxKind::Arrow);
        self.consume_trivia();

        if self.current_kind() == CsSyntaxKind::LBrace {
            self.parse_block();
        } else {
            self.parse_postfix_chain();
        }

        self.builder.finish_node();
    }

    /// Primary expression plus `.member`, generic arguments, and call suffixes.
    /// The whole chain is wrapped in `Invocation` when any argument list is
    /// present, otherwise `MemberAccess` when dotted, otherwise left bare.
    fn parse_postfix_chain(&mut self) {
        let checkpoint = self.builder.checkpoint();
        self.parse_primary();

        let mut has_args = false;
        let mut has_dot = false;
        let mut iterations = 0;
        loop {
            iterations += 1;
            if iterations > 100_000 {
                break;
            }
            match self.sig_kind(0) {
                CsSyntaxKind::Dot => {
                    self.bump_sig(); // .
                    if self.sig_kind(0) == CsSyntaxKind::Ident {
                        self.bump_sig();
                    }
                    has_dot = true;
                }
                CsSyntaxKind::LParen => {
                    self.consume_trivia();
                    self.parse_argument_list();
                    has_args = true;
                }
                CsSyntaxKind::Lt if self.at_generic_call() => {
                    let open = self.sig_index(self.pos, 0).unwrap();
                    let close = self.matching_delimiter(open).unwrap();
                    while self.pos <= close {
                        self.bump();
                    }
                }
                _ => break,
            }
        }

        if has_args {
            self.builder.start_node_at(checkpoint, CsSyntaxKind::Invocation);
            self.builder.finish_node();
        } else if has_dot {
            self.builder.start_node_at(checkpoint, CsSyntaxKind::MemberAccess);
            self.builder.finish_node();
        }
    }

    /// `<...>` directly followed by `(` is a generic method call
    fn at_generic_call(&self) -> bool {
        let Some(open) = self.sig_index(self.pos, 0) else {
            return false;
        };
        let Some(close) = self.matching_delimiter(open) else {
            return false;
        };
        self.sig_index(close + 1, 0)
            .is_some_and(|i| self.tokens[i].kind == CsSyntaxKind::LParen)
    }

    fn parse_primary(&mut self) {
        match self.current_kind() {
            CsSyntaxKind::NewKw => {
                self.builder.start_node(CsSyntaxKind::ObjectCreation);
                self.bump();
                self.consume_trivia();
                if self.current_kind() == CsSyntaxKind::Ident {
                    self.parse_type_name();
                }
                if self.sig_kind(0) == CsSyntaxKind::LParen {
                    self.consume_trivia();
                    self.parse_argument_list();
                }
                if self.sig_kind(0) == CsSyntaxKind::LBrace {
                    // Object or collection initializer
                    self.consume_trivia();
                    self.parse_block();
                }
                self.builder.finish_node();
            }
            CsSyntaxKind::NameofKw => {
                self.builder.start_node(CsSyntaxKind::NameofExpr);
                self.bump();
                self.consume_trivia();
                if self.current_kind() == CsSyntaxKind::LParen
                    && let Some(close) = self.matching_delimiter(self.pos)
                {
                    while self.pos <= close {
                        self.bump();
                    }
                }
                self.builder.finish_node();
            }
            CsSyntaxKind::LParen => {
                self.bump();
                self.consume_trivia();
                if self.current_kind() != CsSyntaxKind::RParen {
                    self.parse_expression();
                }
                self.expect(CsSyntaxKind::RParen);
            }
            CsSyntaxKind::Ident
            | CsSyntaxKind::ThisKw
            | CsSyntaxKind::BaseKw
            | CsSyntaxKind::String
            | CsSyntaxKind::Number => self.bump(),
            _ => {
                self.error_here(format!("unexpected token {:?}", self.current_kind()));
                self.bump();
            }
        }
    }

    fn parse_type_name(&mut self) {
        self.builder.start_node(CsSyntaxKind::TypeName);
        self.bump(); // ident or void
        let mut iterations = 0;
        loop {
            iterations += 1;
            if iterations > 100_000 {
                break;
            }
            match self.sig_kind(0) {
                CsSyntaxKind::Dot if self.sig_kind(1) == CsSyntaxKind::Ident => {
                    self.bump_sig();
                    self.bump_sig();
                }
                CsSyntaxKind::Lt => {
                    let Some(open) = self.sig_index(self.pos, 0) else {
                        break;
                    };
                    match self.matching_delimiter(open) {
                        Some(close) => {
                            while self.pos <= close {
                                self.bump();
                            }
                        }
                        None => break,
                    }
                }
                CsSyntaxKind::LBracket if self.sig_kind(1) == CsSyntaxKind::RBracket => {
                    self.bump_sig();
                    self.bump_sig();
                }
                _ => break,
            }
        }
        self.builder.finish_node();
    }

    // ------------------------------------------------------------------
    // Argument lists (the editor's substrate)
    // ------------------------------------------------------------------

    /// Parse `( arg, arg, ... )`. Trivia between list elements stays at the
    /// list level so the editor can treat it as separator/argument runs.
    fn parse_argument_list(&mut self) {
        self.builder.start_node(CsSyntaxKind::ArgumentList);
        self.bump(); // (
        let mut iterations = 0;
        loop {
            iterations += 1;
            if iterations > 100_000 {
                break;
            }
            self.consume_trivia(); // list-level trivia
            match self.current_kind() {
                CsSyntaxKind::RParen => {
                    self.bump();
                    break;
                }
                CsSyntaxKind::Eof => {
                    self.error_here("unterminated argument list");
                    break;
                }
                CsSyntaxKind::Comma => self.bump(),
                _ => self.parse_argument(),
            }
        }
        self.builder.finish_node();
    }

    fn parse_argument(&mut self) {
        self.builder.start_node(CsSyntaxKind::Argument);

        // `name: expr` (but not `x => ...`, whose second token is the arrow)
        if self.current_kind() == CsSyntaxKind::Ident
            && self.sig_kind(1) == CsSyntaxKind::Colon
            && self.sig_kind(2) != CsSyntaxKind::Eof
        {
            self.builder.start_node(CsSyntaxKind::NameColon);
            self.bump(); // name
            self.bump_sig(); // :
            self.builder.finish_node();
            self.consume_trivia();
        }

        self.parse_expression();
        self.builder.finish_node();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cst::ast::{Argument, ArgumentList, AstNode, ClassDecl};

    fn roundtrip(src: &str) {
        let (cst, errors) = parse_cs(src);
        assert_eq!(cst.text().to_string(), src, "lossless property violated");
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    }

    fn find_arg_list(src: &str) -> (CsSyntaxNode, CsSyntaxNode) {
        let (cst, _) = parse_cs(src);
        let list = cst
            .descendants()
            .find(|n| n.kind() == CsSyntaxKind::ArgumentList)
            .expect("no argument list parsed");
        (cst.clone(), list)
    }

    #[test]
    fn roundtrip_single_line_call() {
        roundtrip("observable.Subscribe(nextValue => { });");
    }

    #[test]
    fn roundtrip_multi_line_call() {
        roundtrip("observable.Subscribe(\n                nextValue => { }\n);\n");
    }

    #[test]
    fn roundtrip_comments_everywhere() {
        roundtrip("f(\n    a, // first\n    b /* second */,\n    c);\n");
    }

    #[test]
    fn roundtrip_class_with_attributes() {
        roundtrip(
            "[TechnicalDebt(2015, 5, 1, \"legacy\")]\npublic sealed class Widget : Base\n{\n    public Widget() { Init(); }\n    public virtual void Init() { }\n}\n",
        );
    }

    #[test]
    fn roundtrip_struct_and_new() {
        roundtrip("struct Money { }\nvar m = new Money();\n");
    }

    #[test]
    fn argument_list_owns_separator_trivia() {
        let (_, list) = find_arg_list("f(\n    a,\n    b)");
        // Trivia between the delimiters, arguments, and commas must be
        // children of the list itself, not of the arguments.
        let kinds: Vec<CsSyntaxKind> = list
            .children_with_tokens()
            .map(|e| e.kind())
            .collect();
        assert_eq!(
            kinds,
            vec![
                CsSyntaxKind::LParen,
                CsSyntaxKind::Newline,
                CsSyntaxKind::Whitespace,
                CsSyntaxKind::Argument,
                CsSyntaxKind::Comma,
                CsSyntaxKind::Newline,
                CsSyntaxKind::Whitespace,
                CsSyntaxKind::Argument,
                CsSyntaxKind::RParen,
            ]
        );
    }

    #[test]
    fn named_argument_gets_name_colon() {
        let (_, list) = find_arg_list("f(onNext: x => { }, onError: y => { })");
        let list = ArgumentList::cast(list).unwrap();
        let args: Vec<Argument> = list.arguments().collect();
        assert_eq!(args.len(), 2);
        assert_eq!(args[0].name().as_deref(), Some("onNext"));
        assert_eq!(args[1].name().as_deref(), Some("onError"));
    }

    #[test]
    fn lambda_is_not_a_named_argument() {
        let (_, list) = find_arg_list("f(x => { })");
        let list = ArgumentList::cast(list).unwrap();
        let arg = list.arguments().next().unwrap();
        assert_eq!(arg.name(), None);
        assert!(
            arg.syntax()
                .children()
                .any(|n| n.kind() == CsSyntaxKind::Lambda)
        );
    }

    #[test]
    fn class_members_are_classified() {
        let (cst, errors) = parse_cs(
            "class Widget\n{\n    public Widget() { }\n    public virtual void Render() { }\n}\n",
        );
        assert!(errors.is_empty());
        let class = cst
            .descendants()
            .find_map(ClassDecl::cast)
            .expect("class not parsed");
        assert_eq!(class.name().as_deref(), Some("Widget"));
        assert_eq!(class.constructors().count(), 1);
        assert_eq!(class.methods().count(), 1);
    }

    #[test]
    fn nested_invocation_arguments_roundtrip() {
        roundtrip("Do(f(1, 2), g(h(3)));");
    }

    #[test]
    fn generic_call_roundtrip() {
        roundtrip("Create<Money>(factory);");
    }

    #[test]
    fn tolerant_of_unknown_constructs() {
        let src = "#pragma warning disable\nf(a);\n";
        let (cst, _) = parse_cs(src);
        assert_eq!(cst.text().to_string(), src);
    }
}
