//! MemberData fixture arity validation
//!
//! A test method annotated `[MemberData(nameof(Member))]` receives its
//! parameters from rows yielded by the named fixture member. A mismatch
//! between that member's arity and the test method's parameter list fails
//! only at run time; this rule surfaces it statically, along with
//! references to members that do not exist at all.

use sharplint_core::cst::ast::{AstNode, Attribute, MethodDecl};
use sharplint_core::diagnostics::{Diagnostic, Severity};
use sharplint_core::semantic::{FileModel, SymbolIndex};

/// Rule ID for fixture parameter mismatch validation
pub const FIXTURE_PARAM_MISMATCH: &str = "fixture-parameter-mismatch";

/// Check MemberData attributes against their fixture members
pub fn check_member_data(model: &FileModel, index: &dyn SymbolIndex) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for class in model.root.classes() {
        let Some(class_name) = class.name() else {
            continue;
        };
        for method in class.methods() {
            for attribute in method.attributes() {
                let Some(attr_name) = attribute.name() else {
                    continue;
                };
                if attr_name != "MemberData" && attr_name != "MemberDataAttribute" {
                    continue;
                }
                let Some(member) = referenced_member(&attribute) else {
                    continue;
                };
                diagnostics.extend(check_reference(
                    model, index, &class_name, &method, &attribute, &member,
                ));
            }
        }
    }

    diagnostics
}

fn check_reference(
    model: &FileModel,
    index: &dyn SymbolIndex,
    class_name: &str,
    method: &MethodDecl,
    attribute: &Attribute,
    member: &str,
) -> Option<Diagnostic> {
    let location = model.node_location(attribute.syntax());
    match index.fixture_arity(class_name, member) {
        None => Some(Diagnostic::new(
            FIXTURE_PARAM_MISMATCH,
            Severity::Error,
            format!("MemberData references '{member}', which does not exist on '{class_name}'"),
            location,
        )),
        Some(arity) => {
            let expected = method.param_count();
            if arity == expected {
                return None;
            }
            let name = method.name().unwrap_or_default();
            Some(Diagnostic::new(
                FIXTURE_PARAM_MISMATCH,
                Severity::Error,
                format!(
                    "Fixture '{member}' supplies {arity} value(s) but test method '{name}' \
                     takes {expected} parameter(s)"
                ),
                location,
            ))
        }
    }
}

/// Member name out of the attribute's first argument: `nameof(Member)` or a
/// string literal
fn referenced_member(attribute: &Attribute) -> Option<String> {
    let list = attribute.argument_list()?;
    let first = list.arguments().next()?;
    let text = first.syntax().text().to_string();
    let text = text.trim();

    if let Some(inner) = text.strip_prefix("nameof(").and_then(|t| t.strip_suffix(')')) {
        return Some(inner.trim().to_string());
    }
    if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
        return Some(text[1..text.len() - 1].to_string());
    }
    None
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
        check_member_data(&model, &index)
    }

    #[test]
    fn matching_arity_is_clean() {
        let diagnostics = diagnostics_for(
            "class Tests\n{\n    public static void Cases(int a, int b) { }\n    [MemberData(nameof(Cases))]\n    public void Sum(int a, int b) { }\n}",
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn arity_mismatch_is_flagged() {
        let diagnostics = diagnostics_for(
            "class Tests\n{\n    public static void Cases(int a) { }\n    [MemberData(nameof(Cases))]\n    public void Sum(int a, int b) { }\n}",
        );
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("1 value(s)"));
        assert!(diagnostics[0].message.contains("2 parameter(s)"));
    }

    #[test]
    fn missing_member_is_flagged() {
        let diagnostics = diagnostics_for(
            "class Tests\n{\n    [MemberData(nameof(Missing))]\n    public void Sum(int a) { }\n}",
        );
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("does not exist"));
    }

    #[test]
    fn string_reference_works_like_nameof() {
        let diagnostics = diagnostics_for(
            "class Tests\n{\n    public static void Cases(int a) { }\n    [MemberData(\"Cases\")]\n    public void Sum(int a) { }\n}",
        );
        assert!(diagnostics.is_empty());
    }
}
