//! Missing onError handler detection for Rx Subscribe calls
//!
//! A `Subscribe` call that only supplies an onNext handler silently drops
//! stream errors. The fix synthesizes a placeholder handler and splices it
//! into the call's argument list, preserving the call's layout (single-line
//! or multi-line) and any comments around the splice point.

use sharplint_core::cst::ast::{Argument, AstNode, Invocation};
use sharplint_core::cst::{CsSyntaxNode, InsertPosition, argument_from_text, insert_argument};
use sharplint_core::diagnostics::{CodeSuggestion, Diagnostic, Severity};
use sharplint_core::semantic::FileModel;

/// Rule ID for missing onError handler validation
pub const MISSING_ON_ERROR: &str = "missing-on-error";

const ON_ERROR_HANDLER: &str = "ex => { /*TODO: handle this!*/ }";
const ON_ERROR_LABEL: &str = "onError";

/// Check for Subscribe calls without an error handler
pub fn check_missing_on_error(model: &FileModel) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for invocation in model
        .root
        .syntax()
        .descendants()
        .filter_map(Invocation::cast)
    {
        if invocation.method_name().as_deref() != Some("Subscribe") {
            continue;
        }
        let Some(list) = invocation.argument_list() else {
            continue;
        };
        let arguments: Vec<Argument> = list.arguments().collect();
        if arguments.is_empty() {
            continue;
        }

        let uses_labels = arguments.iter().any(|a| a.is_named());
        let handled = if uses_labels {
            arguments
                .iter()
                .any(|a| a.name().as_deref() == Some(ON_ERROR_LABEL))
        } else {
            // Positional form: the second argument is the error handler.
            arguments.len() >= 2
        };
        if handled {
            continue;
        }

        let mut diagnostic = Diagnostic::new(
            MISSING_ON_ERROR,
            Severity::Warning,
            "Subscribe call has no onError handler; stream errors will go unobserved",
            model.node_location(invocation.syntax()),
        );

        let new_argument = if uses_labels {
            format!("{ON_ERROR_LABEL}: {ON_ERROR_HANDLER}")
        } else {
            ON_ERROR_HANDLER.to_string()
        };
        match build_fix(model, &list, &new_argument) {
            Ok(suggestion) => diagnostic = diagnostic.with_suggestion(suggestion),
            Err(err) => {
                tracing::warn!(error = %err, "could not synthesize onError fix");
            }
        }
        diagnostics.push(diagnostic);
    }

    diagnostics
}

fn build_fix(
    model: &FileModel,
    list: &sharplint_core::cst::ast::ArgumentList,
    argument_text: &str,
) -> sharplint_core::Result<CodeSuggestion> {
    let argument = argument_from_text(argument_text)?;
    let green = insert_argument(list, argument, InsertPosition::Last)?;
    let replacement = CsSyntaxNode::new_root(green).text().to_string();

    let range = list.syntax().text_range();
    let location = model.replacement_of(range.start().into(), range.end().into());
    Ok(CodeSuggestion::safe(
        "Add an onError handler",
        replacement,
        location,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sharplint_core::autofix::{FixConfig, FixEngine};

    fn fixed(source: &str) -> String {
        let (model, errors) = FileModel::parse("test.cs", source).unwrap();
        assert!(errors.is_empty(), "parse errors: {errors:?}");
        let diagnostics = check_missing_on_error(&model);
        assert_eq!(diagnostics.len(), 1, "expected one diagnostic");

        let engine = FixEngine::new();
        let fixes = engine.generate_fixes(&diagnostics, &FixConfig::safe_only());
        let (result, applied) = engine.apply_to_source(source, &fixes).unwrap();
        assert_eq!(applied, 1);
        result
    }

    #[test]
    fn single_line_subscribe_gains_handler() {
        assert_eq!(
            fixed("observable.Subscribe(nextValue => { });"),
            "observable.Subscribe(nextValue => { }, ex => { /*TODO: handle this!*/ });"
        );
    }

    #[test]
    fn multi_line_subscribe_keeps_indentation() {
        assert_eq!(
            fixed("observable.Subscribe(\n                nextValue => { });"),
            "observable.Subscribe(\n                nextValue => { },\n                ex => { /*TODO: handle this!*/ });"
        );
    }

    #[test]
    fn labeled_subscribe_gets_labeled_handler() {
        assert_eq!(
            fixed("observable.Subscribe(onNext: nextValue => { });"),
            "observable.Subscribe(onNext: nextValue => { }, onError: ex => { /*TODO: handle this!*/ });"
        );
    }

    #[test]
    fn existing_positional_handler_is_accepted() {
        let source = "observable.Subscribe(v => { }, e => Log(e));";
        let (model, _) = FileModel::parse("test.cs", source).unwrap();
        assert!(check_missing_on_error(&model).is_empty());
    }

    #[test]
    fn existing_labeled_handler_is_accepted() {
        let source = "observable.Subscribe(onNext: v => { }, onError: e => Log(e));";
        let (model, _) = FileModel::parse("test.cs", source).unwrap();
        assert!(check_missing_on_error(&model).is_empty());
    }

    #[test]
    fn other_methods_are_ignored() {
        let source = "observable.Select(v => v);";
        let (model, _) = FileModel::parse("test.cs", source).unwrap();
        assert!(check_missing_on_error(&model).is_empty());
    }

    #[test]
    fn subscribe_inside_method_body_is_found() {
        let source =
            "class C\n{\n    void M()\n    {\n        observable.Subscribe(v => { });\n    }\n}\n";
        let (model, _) = FileModel::parse("test.cs", source).unwrap();
        let diagnostics = check_missing_on_error(&model);
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].has_safe_fix());
        assert_eq!(diagnostics[0].location.line, 5);
    }
}
