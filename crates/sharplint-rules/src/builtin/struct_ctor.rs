//! Forbidden parameterless struct construction
//!
//! `new S()` on a struct always succeeds in C# and yields the zeroed value,
//! even when the author considers that value meaningless. Structs opt out by
//! carrying a `NoDefaultConstructor` attribute; this rule flags every
//! parameterless construction of such a struct.

use sharplint_core::cst::ast::{AstNode, ObjectCreation};
use sharplint_core::diagnostics::{Diagnostic, Severity};
use sharplint_core::semantic::{FileModel, SymbolIndex};

/// Rule ID for struct default constructor validation
pub const STRUCT_DEFAULT_CTOR: &str = "struct-default-constructor";

const MARKER_ATTRIBUTE: &str = "NoDefaultConstructor";

/// Check for `new S()` where `S` forbids its default constructor
pub fn check_struct_ctor(model: &FileModel, index: &dyn SymbolIndex) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for creation in model
        .root
        .syntax()
        .descendants()
        .filter_map(ObjectCreation::cast)
    {
        let Some(type_name) = creation.type_name() else {
            continue;
        };
        // `new Stack<Money>()` forbids nothing about Money; match on the
        // base name only.
        let base_name = type_name.split('<').next().unwrap_or(&type_name).trim();

        let parameterless = creation
            .argument_list()
            .is_some_and(|list| list.is_empty());
        if !parameterless {
            continue;
        }
        if !index.has_attribute(base_name, MARKER_ATTRIBUTE) {
            continue;
        }

        diagnostics.push(Diagnostic::new(
            STRUCT_DEFAULT_CTOR,
            Severity::Error,
            format!("'{base_name}' forbids parameterless construction; supply initial values"),
            model.node_location(creation.syntax()),
        ));
    }

    diagnostics
}
