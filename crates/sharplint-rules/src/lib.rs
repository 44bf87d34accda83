//! Built-in lint rules for sharplint
//!
//! Each rule lives in `builtin/<rule>.rs` as a `pub const RULE_ID` plus one
//! or more `check_*` functions over a parsed [`FileModel`]. The registry
//! here describes the rules for `sharplint rules` and runs the enabled ones
//! for a file, applying configured severity overrides.

pub mod builtin;

use sharplint_core::config::SharplintConfig;
use sharplint_core::diagnostics::{Diagnostic, Severity};
use sharplint_core::semantic::{FileModel, SymbolIndex};

/// Static description of a built-in rule
#[derive(Debug, Clone, Copy)]
pub struct RuleInfo {
    pub id: &'static str,
    pub description: &'static str,
    pub default_severity: Severity,
    pub has_fix: bool,
}

/// All built-in rules, in registry order
pub fn all_rules() -> Vec<RuleInfo> {
    vec![
        RuleInfo {
            id: builtin::rx_subscribe::MISSING_ON_ERROR,
            description: "Subscribe call without an error handler argument",
            default_severity: Severity::Warning,
            has_fix: true,
        },
        RuleInfo {
            id: builtin::sealed_class::MISSING_SEALED,
            description: "Class without subtypes should be sealed",
            default_severity: Severity::Warning,
            has_fix: true,
        },
        RuleInfo {
            id: builtin::virtual_call::VIRTUAL_CALL_IN_CTOR,
            description: "Constructor invokes a virtual method of its own type",
            default_severity: Severity::Warning,
            has_fix: false,
        },
        RuleInfo {
            id: builtin::technical_debt::TECH_DEBT_USAGE,
            description: "TechnicalDebt attribute with an invalid date or empty reason",
            default_severity: Severity::Error,
            has_fix: false,
        },
        RuleInfo {
            id: builtin::technical_debt::TECH_DEBT_EXPIRED,
            description: "TechnicalDebt deadline has passed",
            default_severity: Severity::Error,
            has_fix: false,
        },
        RuleInfo {
            id: builtin::technical_debt::TECH_DEBT_EXPIRING,
            description: "TechnicalDebt deadline is inside the warning window",
            default_severity: Severity::Warning,
            has_fix: false,
        },
        RuleInfo {
            id: builtin::struct_ctor::STRUCT_DEFAULT_CTOR,
            description: "Parameterless construction of a struct that forbids it",
            default_severity: Severity::Error,
            has_fix: false,
        },
        RuleInfo {
            id: builtin::member_data::FIXTURE_PARAM_MISMATCH,
            description: "MemberData fixture arity differs from the test method's parameters",
            default_severity: Severity::Error,
            has_fix: false,
        },
    ]
}

/// Run every enabled rule against one parsed file
pub fn check_file(
    model: &FileModel,
    index: &dyn SymbolIndex,
    config: &SharplintConfig,
) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    if config.is_enabled(builtin::rx_subscribe::MISSING_ON_ERROR) {
        diagnostics.extend(builtin::rx_subscribe::check_missing_on_error(model));
    }
    if config.is_enabled(builtin::sealed_class::MISSING_SEALED) {
        diagnostics.extend(builtin::sealed_class::check_sealed_class(model, index));
    }
    if config.is_enabled(builtin::virtual_call::VIRTUAL_CALL_IN_CTOR) {
        diagnostics.extend(builtin::virtual_call::check_virtual_call(model, index));
    }
    diagnostics.extend(
        builtin::technical_debt::check_technical_debt(model, config)
            .into_iter()
            .filter(|d| config.is_enabled(&d.rule_id)),
    );
    if config.is_enabled(builtin::struct_ctor::STRUCT_DEFAULT_CTOR) {
        diagnostics.extend(builtin::struct_ctor::check_struct_ctor(model, index));
    }
    if config.is_enabled(builtin::member_data::FIXTURE_PARAM_MISMATCH) {
        diagnostics.extend(builtin::member_data::check_member_data(model, index));
    }

    // Apply configured severity overrides; Off rules are filtered above but
    // a directly-produced diagnostic for a disabled sub-rule is dropped too.
    diagnostics
        .into_iter()
        .filter_map(|mut diagnostic| {
            let severity = config.severity_for(&diagnostic.rule_id, diagnostic.severity)?;
            diagnostic.severity = severity;
            Some(diagnostic)
        })
        .collect()
}
