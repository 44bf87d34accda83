//! Syntax kinds for the C# source subset
//!
//! Every token and node kind in the CST. Values are stable u16s grouped by
//! category so the `rowan::Language` mapping stays readable:
//! trivia 0-9, keywords 10-99, punctuation 100-149, literals 150-199,
//! structure nodes 200-399, special 400+.

/// All syntax kinds in the C# subset CST
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum CsSyntaxKind {
    // Trivia
    Whitespace = 0,
    CommentLine = 1,
    CommentBlock = 2,
    Newline = 3,

    // Keywords (10-99)
    ClassKw = 10,
    StructKw = 11,
    NewKw = 12,
    SealedKw = 13,
    AbstractKw = 14,
    StaticKw = 15,
    VirtualKw = 16,
    OverrideKw = 17,
    PublicKw = 18,
    PrivateKw = 19,
    ProtectedKw = 20,
    InternalKw = 21,
    PartialKw = 22,
    ReadonlyKw = 23,
    VoidKw = 24,
    ThisKw = 25,
    BaseKw = 26,
    ReturnKw = 27,
    NameofKw = 28,

    // Punctuation (100-149)
    LParen = 100,
    RParen = 101,
    LBrace = 102,
    RBrace = 103,
    LBracket = 104,
    RBracket = 105,
    Comma = 106,
    Dot = 107,
    Semicolon = 108,
    Colon = 109,
    Arrow = 110, // =>
    Equals = 111,
    Lt = 112,
    Gt = 113,
    Question = 114,
    Minus = 115,
    Plus = 116,

    // Literals & identifiers (150-199)
    Ident = 150,
    String = 151,
    Number = 152,

    // Structure nodes (200-399)
    Root = 200,
    ClassDecl = 210,
    StructDecl = 211,
    AttributeList = 212,
    Attribute = 213,
    ModifierList = 214,
    BaseList = 215,
    MethodDecl = 220,
    CtorDecl = 221,
    ParamList = 222,
    Param = 223,
    Block = 224,
    ExprStmt = 230,
    Invocation = 231,
    MemberAccess = 232,
    ArgumentList = 233,
    Argument = 234,
    NameColon = 235,
    Lambda = 236,
    ObjectCreation = 237,
    TypeName = 238,
    NameofExpr = 239,
    ErrorNode = 300,

    // Special tokens (400+)
    Error = 400,
    Eof = 401,
    Unknown = 402,

    // Tombstone
    Tombstone = 999,
}

impl CsSyntaxKind {
    /// Whether this kind is trivia (whitespace, comments, line breaks)
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            CsSyntaxKind::Whitespace
                | CsSyntaxKind::CommentLine
                | CsSyntaxKind::CommentBlock
                | CsSyntaxKind::Newline
        )
    }

    /// Whether this kind is a comment
    pub fn is_comment(self) -> bool {
        matches!(self, CsSyntaxKind::CommentLine | CsSyntaxKind::CommentBlock)
    }

    /// Whether this kind is a declaration modifier keyword
    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            CsSyntaxKind::SealedKw
                | CsSyntaxKind::AbstractKw
                | CsSyntaxKind::StaticKw
                | CsSyntaxKind::VirtualKw
                | CsSyntaxKind::OverrideKw
                | CsSyntaxKind::PublicKw
                | CsSyntaxKind::PrivateKw
                | CsSyntaxKind::ProtectedKw
                | CsSyntaxKind::InternalKw
                | CsSyntaxKind::PartialKw
                | CsSyntaxKind::ReadonlyKw
        )
    }

    /// Map a keyword spelling to its kind, if the identifier is a keyword
    pub fn from_keyword(ident: &str) -> Option<CsSyntaxKind> {
        let kind = match ident {
            "class" => CsSyntaxKind::ClassKw,
            "struct" => CsSyntaxKind::StructKw,
            "new" => CsSyntaxKind::NewKw,
            "sealed" => CsSyntaxKind::SealedKw,
            "abstract" => CsSyntaxKind::AbstractKw,
            "static" => CsSyntaxKind::StaticKw,
            "virtual" => CsSyntaxKind::VirtualKw,
            "override" => CsSyntaxKind::OverrideKw,
            "public" => CsSyntaxKind::PublicKw,
            "private" => CsSyntaxKind::PrivateKw,
            "protected" => CsSyntaxKind::ProtectedKw,
            "internal" => CsSyntaxKind::InternalKw,
            "partial" => CsSyntaxKind::PartialKw,
            "readonly" => CsSyntaxKind::ReadonlyKw,
            "void" => CsSyntaxKind::VoidKw,
            "this" => CsSyntaxKind::ThisKw,
            "base" => CsSyntaxKind::BaseKw,
            "return" => CsSyntaxKind::ReturnKw,
            "nameof" => CsSyntaxKind::NameofKw,
            _ => return None,
        };
        Some(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trivia_classification() {
        assert!(CsSyntaxKind::Whitespace.is_trivia());
        assert!(CsSyntaxKind::Newline.is_trivia());
        assert!(CsSyntaxKind::CommentLine.is_trivia());
        assert!(CsSyntaxKind::CommentBlock.is_comment());
        assert!(!CsSyntaxKind::Comma.is_trivia());
        assert!(!CsSyntaxKind::Argument.is_trivia());
    }

    #[test]
    fn keyword_lookup() {
        assert_eq!(CsSyntaxKind::from_keyword("class"), Some(CsSyntaxKind::ClassKw));
        assert_eq!(CsSyntaxKind::from_keyword("sealed"), Some(CsSyntaxKind::SealedKw));
        assert_eq!(CsSyntaxKind::from_keyword("Subscribe"), None);
    }
}
