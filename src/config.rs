//! Configuration for layout compilation.
//!
//! This module handles loading and validating build-time settings in TOML
//! format. A missing config file means defaults.

use crate::constants::{DEFAULT_MAX_ALIAS_HOPS, MAX_ALIAS_HOPS_LIMIT};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Settings applied while validating the layout table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Maximum alias hops before a chain is reported as too long
    pub max_alias_hops: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_alias_hops: DEFAULT_MAX_ALIAS_HOPS,
        }
    }
}

/// Layout configuration.
///
/// # Example
///
/// ```toml
/// [validation]
/// max_alias_hops = 2
/// ```
///
/// # Validation
///
/// - `max_alias_hops` must be between 1 and `MAX_ALIAS_HOPS_LIMIT`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Table validation settings
    pub validation: ValidationConfig,
}

impl LayoutConfig {
    /// Creates a new LayoutConfig with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the alias hop limit.
    #[must_use]
    pub const fn with_max_alias_hops(mut self, hops: usize) -> Self {
        self.validation.max_alias_hops = hops;
        self
    }

    /// Parses and validates configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse layout config")?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No layout config at {}, using defaults", path.display());
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml_str(&content)
            .context(format!("Invalid config file: {}", path.display()))
    }

    /// Serializes the configuration to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize layout config")
    }

    /// Validates configuration values.
    pub fn validate(&self) -> Result<()> {
        let hops = self.validation.max_alias_hops;
        if hops == 0 || hops > MAX_ALIAS_HOPS_LIMIT {
            anyhow::bail!(
                "max_alias_hops must be between 1 and {}, got {}",
                MAX_ALIAS_HOPS_LIMIT,
                hops
            );
        }
        Ok(())
    }
}
