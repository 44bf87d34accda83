//! Autofix engine with safety classification
//!
//! Applies rule-proposed fixes to source files:
//! - Safe-by-default fix application (Applicability::Always)
//! - Unsafe fixes requiring explicit opt-in (Applicability::MaybeIncorrect)
//! - Conflict resolution for overlapping fixes
//! - Dry-run preview without touching the filesystem

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::cst::parse_cs;
use crate::diagnostics::{Applicability, CodeSuggestion, Diagnostic, Location};
use crate::error::SharplintError;
use crate::result::Result;

/// A single concrete fix derived from a diagnostic suggestion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fix {
    /// Human-readable description of what the fix does
    pub description: String,
    /// Where the replacement applies
    pub location: Location,
    /// Replacement text for the location's span
    pub replacement: String,
    /// Applicability level (Always = safe, MaybeIncorrect = unsafe)
    pub applicability: Applicability,
    /// Rule that proposed the fix
    pub rule_id: String,
    /// Priority when resolving conflicts (higher wins)
    pub priority: u32,
}

impl Fix {
    /// Create a new fix from a CodeSuggestion
    pub fn from_code_suggestion(suggestion: &CodeSuggestion, diagnostic: &Diagnostic) -> Self {
        Self {
            description: suggestion.message.clone(),
            location: suggestion.location.clone(),
            replacement: suggestion.replacement.clone(),
            applicability: suggestion.applicability,
            rule_id: diagnostic.rule_id.clone(),
            priority: match suggestion.applicability {
                Applicability::Always => 10,
                Applicability::MaybeIncorrect => 5,
            },
        }
    }

    /// Check if this fix is safe to apply automatically
    pub fn is_safe(&self) -> bool {
        matches!(self.applicability, Applicability::Always)
    }

    /// Check if this fix requires the unsafe flag
    pub fn requires_unsafe_flag(&self) -> bool {
        matches!(self.applicability, Applicability::MaybeIncorrect)
    }

    /// Get the span of this fix as (start, end) byte offsets
    pub fn span(&self) -> (usize, usize) {
        (
            self.location.offset,
            self.location.offset + self.location.length,
        )
    }

    /// Check if this fix conflicts with another fix
    pub fn conflicts_with(&self, other: &Fix) -> bool {
        if self.location.file != other.location.file {
            return false;
        }
        let (self_start, self_end) = self.span();
        let (other_start, other_end) = other.span();
        // Pure insertions at the same offset still conflict.
        if self_start == other_start {
            return true;
        }
        !(self_end <= other_start || other_end <= self_start)
    }
}

/// Configuration for fix application
#[derive(Debug, Clone)]
pub struct FixConfig {
    /// Whether to apply unsafe fixes (requires --unsafe-fixes flag)
    pub apply_unsafe: bool,
    /// Whether to run in dry-run mode (don't modify files)
    pub dry_run: bool,
    /// Maximum number of fixes to apply per file
    pub max_fixes_per_file: Option<usize>,
    /// Whether to re-parse and validate syntax after applying fixes
    pub validate_syntax: bool,
}

impl Default for FixConfig {
    fn default() -> Self {
        Self {
            apply_unsafe: false, // safe by default
            dry_run: false,
            max_fixes_per_file: None,
            validate_syntax: true,
        }
    }
}

impl FixConfig {
    /// Config that only applies safe fixes
    pub fn safe_only() -> Self {
        Self::default()
    }

    /// Config that applies all fixes (safe and unsafe)
    pub fn with_unsafe() -> Self {
        Self {
            apply_unsafe: true,
            ..Default::default()
        }
    }

    /// Config for dry-run preview
    pub fn dry_run() -> Self {
        Self {
            dry_run: true,
            ..Default::default()
        }
    }
}

/// Result of applying fixes to one file
#[derive(Debug, Clone)]
pub struct FixResult {
    pub file: PathBuf,
    pub applied_count: usize,
    pub skipped_count: usize,
    pub errors: Vec<String>,
    /// Modified content, populated in dry-run mode
    pub modified_content: Option<String>,
}

/// Fix application engine
#[derive(Debug, Default)]
pub struct FixEngine;

impl FixEngine {
    pub fn new() -> Self {
        Self
    }

    /// Collect fixes from diagnostics, honoring the safety gate
    pub fn generate_fixes(&self, diagnostics: &[Diagnostic], config: &FixConfig) -> Vec<Fix> {
        let mut fixes = Vec::new();
        for diagnostic in diagnostics {
            for suggestion in &diagnostic.suggestions {
                let fix = Fix::from_code_suggestion(suggestion, diagnostic);
                if fix.requires_unsafe_flag() && !config.apply_unsafe {
                    tracing::debug!(
                        rule = %fix.rule_id,
                        "skipping unsafe fix without --unsafe-fixes"
                    );
                    continue;
                }
                fixes.push(fix);
            }
        }
        fixes
    }

    /// Drop overlapping fixes, keeping the highest-priority one per region
    pub fn resolve_conflicts(&self, fixes: &[Fix]) -> Vec<Fix> {
        let mut by_file: HashMap<PathBuf, Vec<Fix>> = HashMap::new();
        for fix in fixes {
            by_file
                .entry(fix.location.file.clone())
                .or_default()
                .push(fix.clone());
        }

        let mut resolved = Vec::new();
        for (_, mut file_fixes) in by_file {
            file_fixes.sort_by(|a, b| {
                b.priority
                    .cmp(&a.priority)
                    .then(a.location.offset.cmp(&b.location.offset))
            });
            let mut kept: Vec<Fix> = Vec::new();
            for fix in file_fixes {
                if kept.iter().any(|k| k.conflicts_with(&fix)) {
                    tracing::debug!(rule = %fix.rule_id, "dropping conflicting fix");
                    continue;
                }
                kept.push(fix);
            }
            resolved.extend(kept);
        }
        resolved.sort_by(|a, b| {
            a.location
                .file
                .cmp(&b.location.file)
                .then(a.location.offset.cmp(&b.location.offset))
        });
        resolved
    }

    /// Apply fixes to in-memory source, returning the new text and count
    pub fn apply_to_source(&self, source: &str, fixes: &[Fix]) -> Result<(String, usize)> {
        let mut sorted: Vec<&Fix> = fixes.iter().collect();
        sorted.sort_by(|a, b| b.location.offset.cmp(&a.location.offset));

        let mut content = source.to_string();
        let mut applied = 0;
        for fix in sorted {
            let (start, end) = fix.span();
            if end > content.len()
                || !content.is_char_boundary(start)
                || !content.is_char_boundary(end)
            {
                return Err(SharplintError::autofix_error(format!(
                    "fix for rule '{}' is out of bounds ({start}..{end})",
                    fix.rule_id
                )));
            }
            content.replace_range(start..end, &fix.replacement);
            applied += 1;
        }
        Ok((content, applied))
    }

    /// Apply fixes to one file on disk
    pub fn apply_fixes_to_file(
        &self,
        file: &Path,
        fixes: &[Fix],
        config: &FixConfig,
    ) -> Result<FixResult> {
        let original = std::fs::read_to_string(file)
            .map_err(|e| SharplintError::io_error(file.to_path_buf(), e))?;

        let limited = match config.max_fixes_per_file {
            Some(max) => &fixes[..fixes.len().min(max)],
            None => fixes,
        };
        let skipped = fixes.len() - limited.len();

        let (modified, applied) = self.apply_to_source(&original, limited)?;

        let mut errors = Vec::new();
        if config.validate_syntax && applied > 0 {
            let (_, parse_errors) = parse_cs(&modified);
            if !parse_errors.is_empty() {
                errors.push(format!(
                    "syntax validation failed after fixes: {}",
                    parse_errors[0].message
                ));
            }
        }

        if !config.dry_run && applied > 0 && errors.is_empty() {
            std::fs::write(file, &modified)
                .map_err(|e| SharplintError::io_error(file.to_path_buf(), e))?;
            tracing::info!(file = %file.display(), applied, "applied fixes");
        }

        Ok(FixResult {
            file: file.to_path_buf(),
            applied_count: if errors.is_empty() { applied } else { 0 },
            skipped_count: skipped,
            errors,
            modified_content: if config.dry_run { Some(modified) } else { None },
        })
    }

    /// Full pipeline: generate, resolve, group by file, apply
    pub fn apply_fixes(&self, diagnostics: &[Diagnostic], config: &FixConfig) -> Result<Vec<FixResult>> {
        let fixes = self.generate_fixes(diagnostics, config);
        let resolved = self.resolve_conflicts(&fixes);

        let mut by_file: HashMap<PathBuf, Vec<Fix>> = HashMap::new();
        for fix in resolved {
            by_file.entry(fix.location.file.clone()).or_default().push(fix);
        }

        let mut results = Vec::new();
        for (file, file_fixes) in by_file {
            results.push(self.apply_fixes_to_file(&file, &file_fixes, config)?);
        }
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Severity;

    fn fix_at(offset: usize, length: usize, replacement: &str, priority: u32) -> Fix {
        Fix {
            description: "test".into(),
            location: Location::new(PathBuf::from("test.cs"), 1, 1, offset, length),
            replacement: replacement.into(),
            applicability: Applicability::Always,
            rule_id: "test-rule".into(),
            priority,
        }
    }

    #[test]
    fn applies_fixes_in_reverse_offset_order() {
        let engine = FixEngine::new();
        let source = "abc def ghi";
        let fixes = vec![fix_at(0, 3, "xyz", 10), fix_at(8, 3, "jkl", 10)];
        let (result, applied) = engine.apply_to_source(source, &fixes).unwrap();
        assert_eq!(result, "xyz def jkl");
        assert_eq!(applied, 2);
    }

    #[test]
    fn insertion_fix_has_zero_length() {
        let engine = FixEngine::new();
        let (result, _) = engine
            .apply_to_source("f(a)", &[fix_at(3, 0, ", b", 10)])
            .unwrap();
        assert_eq!(result, "f(a, b)");
    }

    #[test]
    fn overlapping_fixes_keep_higher_priority() {
        let engine = FixEngine::new();
        let fixes = vec![fix_at(0, 5, "low", 5), fix_at(2, 5, "high", 10)];
        let resolved = engine.resolve_conflicts(&fixes);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].replacement, "high");
    }

    #[test]
    fn out_of_bounds_fix_is_rejected() {
        let engine = FixEngine::new();
        assert!(engine.apply_to_source("abc", &[fix_at(10, 2, "x", 10)]).is_err());
    }

    #[test]
    fn unsafe_fixes_gated_behind_flag() {
        let engine = FixEngine::new();
        let location = Location::new(PathBuf::from("a.cs"), 1, 1, 0, 1);
        let diagnostic = Diagnostic::new("r", Severity::Warning, "m", location.clone())
            .with_suggestion(CodeSuggestion::unsafe_fix("risky", "x", location));

        let safe = engine.generate_fixes(std::slice::from_ref(&diagnostic), &FixConfig::safe_only());
        assert!(safe.is_empty());

        let all = engine.generate_fixes(&[diagnostic], &FixConfig::with_unsafe());
        assert_eq!(all.len(), 1);
    }

    #[test]
    fn dry_run_keeps_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.cs");
        std::fs::write(&path, "f(a)").unwrap();

        let mut fix = fix_at(3, 0, ", b", 10);
        fix.location.file = path.clone();

        let engine = FixEngine::new();
        let result = engine
            .apply_fixes_to_file(&path, &[fix], &FixConfig::dry_run())
            .unwrap();
        assert_eq!(result.modified_content.as_deref(), Some("f(a, b)"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "f(a)");
    }
}
