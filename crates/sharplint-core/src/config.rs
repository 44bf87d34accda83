//! Configuration file discovery and loading
//!
//! Settings live in `.sharplintrc.toml`, discovered by walking up from the
//! linted directory. Absent a file, everything runs at its built-in
//! defaults.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::diagnostics::Severity;
use crate::error::SharplintError;
use crate::result::Result;

const CONFIG_FILE_NAME: &str = ".sharplintrc.toml";

/// Per-rule setting: disabled, or run at an overridden severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleLevel {
    Off,
    Hint,
    Info,
    Warning,
    Error,
}

impl RuleLevel {
    pub fn severity(self) -> Option<Severity> {
        match self {
            RuleLevel::Off => None,
            RuleLevel::Hint => Some(Severity::Hint),
            RuleLevel::Info => Some(Severity::Info),
            RuleLevel::Warning => Some(Severity::Warning),
            RuleLevel::Error => Some(Severity::Error),
        }
    }
}

/// Top-level lint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SharplintConfig {
    /// Per-rule overrides keyed by rule id, e.g. `missing-on-error = "off"`
    pub rules: HashMap<String, RuleLevel>,
    /// Days before a technical-debt deadline at which to start warning
    pub expiry_warning_days: i64,
}

impl Default for SharplintConfig {
    fn default() -> Self {
        Self {
            rules: HashMap::new(),
            expiry_warning_days: 30,
        }
    }
}

impl SharplintConfig {
    /// Whether a rule should run at all
    pub fn is_enabled(&self, rule_id: &str) -> bool {
        !matches!(self.rules.get(rule_id), Some(RuleLevel::Off))
    }

    /// Effective severity for a rule, given its built-in default
    pub fn severity_for(&self, rule_id: &str, default: Severity) -> Option<Severity> {
        match self.rules.get(rule_id) {
            Some(level) => level.severity(),
            None => Some(default),
        }
    }
}

/// Configuration loader for discovering and loading config files
pub struct ConfigLoader;

impl ConfigLoader {
    /// Auto-discover `.sharplintrc.toml` by traversing upward from `start_path`
    pub fn auto_discover(start_path: &Path) -> Result<Option<PathBuf>> {
        let mut current = start_path
            .canonicalize()
            .map_err(|e| SharplintError::config_error(format!("Invalid path: {e}")))?;

        loop {
            let candidate = current.join(CONFIG_FILE_NAME);
            if candidate.is_file() {
                tracing::debug!("Found config: {}", candidate.display());
                return Ok(Some(candidate));
            }
            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => break,
            }
        }
        Ok(None)
    }

    /// Load configuration from a specific TOML file
    pub fn load_from_file(path: &Path) -> Result<SharplintConfig> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| SharplintError::io_error(path.to_path_buf(), e))?;
        toml::from_str(&text).map_err(|e| {
            SharplintError::config_error(format!(
                "Failed to parse config '{}': {e}",
                path.display()
            ))
        })
    }

    /// Load config from an explicit path, or auto-discover; defaults when
    /// nothing is found
    pub fn load(custom_path: Option<&Path>, start_dir: Option<&Path>) -> Result<SharplintConfig> {
        if let Some(path) = custom_path {
            if !path.exists() {
                return Err(SharplintError::config_error(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            return Self::load_from_file(path);
        }

        let search_dir = start_dir.unwrap_or_else(|| Path::new("."));
        match Self::auto_discover(search_dir)? {
            Some(path) => Self::load_from_file(&path),
            None => Ok(SharplintConfig::default()),
        }
    }
}
