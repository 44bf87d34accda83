//! Technical debt attribute tracking
//!
//! `[TechnicalDebt(year, month, day, "reason")]` marks code that must be
//! revisited by a deadline. Three checks:
//! - `technical-debt-usage`: the attribute data itself is broken (impossible
//!   calendar date, missing arguments, blank reason)
//! - `technical-debt-expired`: the deadline has passed
//! - `technical-debt-expiring`: the deadline falls inside the configured
//!   warning window

use chrono::{Local, NaiveDate};
use sharplint_core::config::SharplintConfig;
use sharplint_core::cst::ast::{AstNode, Attribute};
use sharplint_core::diagnostics::{Diagnostic, Severity};
use sharplint_core::semantic::FileModel;

/// Rule ID for malformed attribute data
pub const TECH_DEBT_USAGE: &str = "technical-debt-usage";
/// Rule ID for deadlines in the past
pub const TECH_DEBT_EXPIRED: &str = "technical-debt-expired";
/// Rule ID for deadlines inside the warning window
pub const TECH_DEBT_EXPIRING: &str = "technical-debt-expiring";

const ATTRIBUTE_NAME: &str = "TechnicalDebt";

/// Check every TechnicalDebt attribute against today's date
pub fn check_technical_debt(model: &FileModel, config: &SharplintConfig) -> Vec<Diagnostic> {
    check_technical_debt_at(
        model,
        Local::now().date_naive(),
        config.expiry_warning_days,
    )
}

/// Deterministic variant with an injected "today"
pub fn check_technical_debt_at(
    model: &FileModel,
    today: NaiveDate,
    warning_days: i64,
) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for attribute in model
        .root
        .syntax()
        .descendants()
        .filter_map(Attribute::cast)
    {
        let Some(name) = attribute.name() else { continue };
        if name != ATTRIBUTE_NAME && name != "TechnicalDebtAttribute" {
            continue;
        }
        let location = model.node_location(attribute.syntax());
        let usage_error = |message: String| {
            Diagnostic::new(TECH_DEBT_USAGE, Severity::Error, message, location.clone())
        };

        let parts: Vec<String> = attribute
            .argument_list()
            .map(|list| {
                list.arguments()
                    .map(|a| a.syntax().text().to_string().trim().to_string())
                    .collect()
            })
            .unwrap_or_default();
        if parts.len() < 4 {
            diagnostics.push(usage_error(
                "TechnicalDebt attribute expects (year, month, day, \"reason\")".to_string(),
            ));
            continue;
        }

        let numbers: Option<Vec<i32>> = parts[..3].iter().map(|p| p.parse().ok()).collect();
        let Some(numbers) = numbers else {
            diagnostics.push(usage_error(format!(
                "TechnicalDebt date components must be integer literals, got ({}, {}, {})",
                parts[0], parts[1], parts[2]
            )));
            continue;
        };
        let date = NaiveDate::from_ymd_opt(numbers[0], numbers[1] as u32, numbers[2] as u32);
        let Some(date) = date else {
            diagnostics.push(usage_error(format!(
                "{}-{}-{} is not a valid calendar date",
                numbers[0], numbers[1], numbers[2]
            )));
            continue;
        };

        let reason = parts[3].trim_matches('"').trim().to_string();
        if reason.is_empty() {
            diagnostics.push(usage_error(
                "TechnicalDebt reason must not be empty".to_string(),
            ));
            continue;
        }

        let remaining = (date - today).num_days();
        if remaining < 0 {
            diagnostics.push(Diagnostic::new(
                TECH_DEBT_EXPIRED,
                Severity::Error,
                format!("Technical debt expired on {date}: {reason}"),
                location,
            ));
        } else if remaining <= warning_days {
            diagnostics.push(Diagnostic::new(
                TECH_DEBT_EXPIRING,
                Severity::Warning,
                format!("Technical debt expires in {remaining} day(s) on {date}: {reason}"),
                location,
            ));
        }
    }

    diagnostics
}
