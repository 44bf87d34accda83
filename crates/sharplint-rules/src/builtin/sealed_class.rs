//! Sealed class recommendation
//!
//! A concrete class nothing inherits from should be sealed: it documents
//! intent and lets the runtime devirtualize. Classes that are abstract,
//! static, sealed already, or partial (other parts may be subclassed or add
//! virtual members) are exempt, as is any class the symbol index reports
//! subtypes for.

use sharplint_core::cst::CsSyntaxKind;
use sharplint_core::cst::ast::AstNode;
use sharplint_core::diagnostics::{CodeSuggestion, Diagnostic, Severity};
use sharplint_core::semantic::{FileModel, SymbolIndex};

/// Rule ID for sealed class validation
pub const MISSING_SEALED: &str = "missing-sealed-modifier";

/// Check for classes that could be sealed
pub fn check_sealed_class(model: &FileModel, index: &dyn SymbolIndex) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for class in model.root.classes() {
        let exempt = class.has_modifier(CsSyntaxKind::SealedKw)
            || class.has_modifier(CsSyntaxKind::AbstractKw)
            || class.has_modifier(CsSyntaxKind::StaticKw)
            || class.has_modifier(CsSyntaxKind::PartialKw);
        if exempt {
            continue;
        }
        let Some(name) = class.name() else { continue };
        if !index.subtypes_of(&name).is_empty() {
            continue;
        }

        let mut diagnostic = Diagnostic::new(
            MISSING_SEALED,
            Severity::Warning,
            format!("Class '{name}' has no subtypes and can be sealed"),
            model.node_location(class.syntax()),
        );
        if let Some(keyword) = class.class_keyword() {
            let offset: usize = keyword.text_range().start().into();
            diagnostic = diagnostic.with_suggestion(CodeSuggestion::safe(
                format!("Seal class '{name}'"),
                "sealed ",
                model.insertion_at(offset),
            ));
        }
        diagnostics.push(diagnostic);
    }

    diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;
    use sharplint_core::autofix::{FixConfig, FixEngine};
    use sharplint_core::semantic::FileSymbolIndex;

    fn model_and_index(source: &str) -> (FileModel, FileSymbolIndex) {
        let (model, errors) = FileModel::parse("test.cs", source).unwrap();
        assert!(errors.is_empty(), "parse errors: {errors:?}");
        let mut index = FileSymbolIndex::new();
        index.add_file(&model.root);
        (model, index)
    }

    #[test]
    fn leaf_class_is_flagged_with_fix() {
        let source = "public class Widget\n{\n}";
        let (model, index) = model_and_index(source);
        let diagnostics = check_sealed_class(&model, &index);
        assert_eq!(diagnostics.len(), 1);

        let engine = FixEngine::new();
        let fixes = engine.generate_fixes(&diagnostics, &FixConfig::safe_only());
        let (result, _) = engine.apply_to_source(source, &fixes).unwrap();
        assert_eq!(result, "public sealed class Widget\n{\n}");
    }

    #[test]
    fn class_with_subtype_is_exempt() {
        let (model, index) = model_and_index("class Base { }\nclass Derived : Base { }");
        let flagged: Vec<String> = check_sealed_class(&model, &index)
            .into_iter()
            .map(|d| d.message)
            .collect();
        assert_eq!(flagged.len(), 1);
        assert!(flagged[0].contains("Derived"));
    }

    #[test]
    fn abstract_static_and_sealed_are_exempt() {
        let source =
            "abstract class A { }\nstatic class S { }\nsealed class C { }\npartial class P { }";
        let (model, index) = model_and_index(source);
        assert!(check_sealed_class(&model, &index).is_empty());
    }
}
