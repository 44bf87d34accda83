//! Rowan language implementation for the C# subset
//!
//! Connects `CsSyntaxKind` to Rowan's generic CST infrastructure.

use rowan::Language;

use super::CsSyntaxKind;

/// Language implementation for the C# subset
///
/// Zero-sized type implementing `rowan::Language` so our syntax kinds plug
/// into Rowan's generic tree types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CsLanguage;

impl Language for CsLanguage {
    type Kind = CsSyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        match raw.0 {
            // Trivia
            0 => CsSyntaxKind::Whitespace,
            1 => CsSyntaxKind::CommentLine,
            2 => CsSyntaxKind::CommentBlock,
            3 => CsSyntaxKind::Newline,

            // Keywords (10-99)
            10 => CsSyntaxKind::ClassKw,
            11 => CsSyntaxKind::StructKw,
            12 => CsSyntaxKind::NewKw,
            13 => CsSyntaxKind::SealedKw,
            14 => CsSyntaxKind::AbstractKw,
            15 => CsSyntaxKind::StaticKw,
            16 => CsSyntaxKind::VirtualKw,
            17 => CsSyntaxKind::OverrideKw,
            18 => CsSyntaxKind::PublicKw,
            19 => CsSyntaxKind::PrivateKw,
            20 => CsSyntaxKind::ProtectedKw,
            21 => CsSyntaxKind::InternalKw,
            22 => CsSyntaxKind::PartialKw,
            23 => CsSyntaxKind::ReadonlyKw,
            24 => CsSyntaxKind::VoidKw,
            25 => CsSyntaxKind::ThisKw,
            26 => CsSyntaxKind::BaseKw,
            27 => CsSyntaxKind::ReturnKw,
            28 => CsSyntaxKind::NameofKw,

            // Punctuation (100-149)
            100 => CsSyntaxKind::LParen,
            101 => CsSyntaxKind::RParen,
            102 => CsSyntaxKind::LBrace,
            103 => CsSyntaxKind::RBrace,
            104 => CsSyntaxKind::LBracket,
            105 => CsSyntaxKind::RBracket,
            106 => CsSyntaxKind::Comma,
            107 => CsSyntaxKind::Dot,
            108 => CsSyntaxKind::Semicolon,
            109 => CsSyntaxKind::Colon,
            110 => CsSyntaxKind::Arrow,
            111 => CsSyntaxKind::Equals,
            112 => CsSyntaxKind::Lt,
            113 => CsSyntaxKind::Gt,
            114 => CsSyntaxKind::Question,
            115 => CsSyntaxKind::Minus,
            116 => CsSyntaxKind::Plus,

            // Literals & identifiers (150-199)
            150 => CsSyntaxKind::Ident,
            151 => CsSyntaxKind::String,
            152 => CsSyntaxKind::Number,

            // Structure nodes (200-399)
            200 => CsSyntaxKind::Root,
            210 => CsSyntaxKind::ClassDecl,
            211 => CsSyntaxKind::StructDecl,
            212 => CsSyntaxKind::AttributeList,
            213 => CsSyntaxKind::Attribute,
            214 => CsSyntaxKind::ModifierList,
            215 => CsSyntaxKind::BaseList,
            220 => CsSyntaxKind::MethodDecl,
            221 => CsSyntaxKind::CtorDecl,
            222 => CsSyntaxKind::ParamList,
            223 => CsSyntaxKind::Param,
            224 => CsSyntaxKind::Block,
            230 => CsSyntaxKind::ExprStmt,
            231 => CsSyntaxKind::Invocation,
            232 => CsSyntaxKind::MemberAccess,
            233 => CsSyntaxKind::ArgumentList,
            234 => CsSyntaxKind::Argument,
            235 => CsSyntaxKind::NameColon,
            236 => CsSyntaxKind::Lambda,
            237 => CsSyntaxKind::ObjectCreation,
            238 => CsSyntaxKind::TypeName,
            239 => CsSyntaxKind::NameofExpr,
            300 => CsSyntaxKind::ErrorNode,

            // Special tokens (400+)
            400 => CsSyntaxKind::Error,
            401 => CsSyntaxKind::Eof,
            402 => CsSyntaxKind::Unknown,

            // Tombstone
            999 => CsSyntaxKind::Tombstone,

            _ => {
                tracing::warn!("unknown syntax kind: {}", raw.0);
                CsSyntaxKind::Unknown
            }
        }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        rowan::SyntaxKind(kind as u16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_roundtrip() {
        let kinds = [
            CsSyntaxKind::Whitespace,
            CsSyntaxKind::ClassKw,
            CsSyntaxKind::Ident,
            CsSyntaxKind::Comma,
            CsSyntaxKind::ArgumentList,
            CsSyntaxKind::Argument,
            CsSyntaxKind::Lambda,
        ];

        for &kind in &kinds {
            let raw = CsLanguage::kind_to_raw(kind);
            let back = CsLanguage::kind_from_raw(raw);
            assert_eq!(kind, back, "Roundtrip failed for {kind:?}");
        }
    }

    #[test]
    fn test_kind_values() {
        assert_eq!(CsLanguage::kind_to_raw(CsSyntaxKind::Whitespace).0, 0);
        assert_eq!(CsLanguage::kind_to_raw(CsSyntaxKind::ClassKw).0, 10);
        assert_eq!(CsLanguage::kind_to_raw(CsSyntaxKind::LParen).0, 100);
        assert_eq!(CsLanguage::kind_to_raw(CsSyntaxKind::Root).0, 200);
    }
}
