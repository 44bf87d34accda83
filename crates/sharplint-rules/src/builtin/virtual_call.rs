//! Virtual call in constructor detection
//!
//! Calling a virtual method from a constructor dispatches to an override
//! whose instance state is not yet initialized. The rule flags constructor
//! body invocations of methods the symbol index reports as virtual on the
//! constructing type. No automatic fix: the correct rewrite (sealing the
//! method, inlining, deferring the call) depends on the class design.

use rowan::NodeOrToken;
use sharplint_core::cst::CsSyntaxKind;
use sharplint_core::cst::ast::{AstNode, Invocation};
use sharplint_core::diagnostics::{Diagnostic, Severity};
use sharplint_core::semantic::{FileModel, SymbolIndex};

/// Rule ID for virtual call in constructor validation
pub const VIRTUAL_CALL_IN_CTOR: &str = "virtual-call-in-constructor";

/// Check for constructors invoking virtual methods of their own type
pub fn check_virtual_call(model: &FileModel, index: &dyn SymbolIndex) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for class in model.root.classes() {
        let Some(class_name) = class.name() else {
            continue;
        };
        for ctor in class.constructors() {
            for invocation in ctor.invocations() {
                if !receiver_is_self(&invocation) {
                    continue;
                }
                let Some(method) = invocation.method_name() else {
                    continue;
                };
                if !index.is_virtual(&class_name, &method) {
                    continue;
                }
                diagnostics.push(Diagnostic::new(
                    VIRTUAL_CALL_IN_CTOR,
                    Severity::Warning,
                    format!(
                        "Constructor of '{class_name}' calls virtual method '{method}'; \
                         overrides run before the instance is fully constructed"
                    ),
                    model.node_location(invocation.syntax()),
                ));
            }
        }
    }

    diagnostics
}

/// Whether the call targets the instance under construction: a bare
/// `Method(...)` or an explicit `this.Method(...)`
fn receiver_is_self(invocation: &Invocation) -> bool {
    let mut significant = Vec::new();
    for element in invocation.syntax().children_with_tokens() {
        match element {
            NodeOrToken::Node(node) if node.kind() == CsSyntaxKind::ArgumentList => break,
            NodeOrToken::Node(_) => return false,
            NodeOrToken::Token(token) => {
                if !token.kind().is_trivia() {
                    significant.push(token.kind());
                }
            }
        }
    }
    matches!(
        significant.as_slice(),
        [CsSyntaxKind::Ident]
            | [CsSyntaxKind::ThisKw, CsSyntaxKind::Dot, CsSyntaxKind::Ident]
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use sharplint_core::semantic::FileSymbolIndex;

    fn diagnostics_for(source: &str) -> Vec<Diagnostic> {
        let (model, errors) = FileModel::parse("test.cs", source).unwrap();
        assert!(errors.is_empty(), "parse errors: {errors:?}");
        let mut index = FileSymbolIndex::new();
        index.add_file(&model.root);
        check_virtual_call(&model, &index)
    }

    #[test]
    fn bare_virtual_call_is_flagged() {
        let diagnostics = diagnostics_for(
            "class C\n{\n    public C()\n    {\n        Setup();\n    }\n    public virtual void Setup() { }\n}",
        );
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("Setup"));
    }

    #[test]
    fn this_qualified_call_is_flagged() {
        let diagnostics = diagnostics_for(
            "class C\n{\n    public C()\n    {\n        this.Setup();\n    }\n    public virtual void Setup() { }\n}",
        );
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn non_virtual_call_is_clean() {
        let diagnostics = diagnostics_for(
            "class C\n{\n    public C()\n    {\n        Setup();\n    }\n    public void Setup() { }\n}",
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn call_on_other_receiver_is_clean() {
        let diagnostics = diagnostics_for(
            "class C\n{\n    public C(Helper h)\n    {\n        h.Setup();\n    }\n    public virtual void Setup() { }\n}",
        );
        assert!(diagnostics.is_empty());
    }
}
