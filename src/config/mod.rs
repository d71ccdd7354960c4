// slnenv-rs: Solution Environment loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for slnenv-rs.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. slnenv.toml (cwd, optional)
//! 3. --ini FILE (repeatable)
//! 4. SLNENV_* env vars
//! 5. CLI overrides
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! SLNENV_GLOBAL__OUTPUT_LOG_LEVEL=4    → global.output_log_level = 4
//! SLNENV_SOLUTION__PLATFORM=x64        → solution.platform = "x64"
//! SLNENV_REGISTRY__ENABLED=false       → registry.enabled = false
//! ```
//!
//! Sections and keys are separated by a double underscore so that keys may
//! contain single underscores.

pub mod loader;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{Result, SlnEnvResult};

use loader::ConfigLoader;
use types::{GlobalConfig, RegistryConfig, SolutionConfig};

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_FILE_NAME: &str = "slnenv.toml";

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "SLNENV";

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Host context defaults.
    pub solution: SolutionConfig,
    /// Registry token lookups.
    pub registry: RegistryConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use slnenv_rs::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("slnenv.toml")
    ///     .with_env_prefix("SLNENV")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Validate values the type system cannot express.
    ///
    /// # Errors
    ///
    /// Returns an error for blank solution configuration or platform names.
    pub fn validate(&self) -> SlnEnvResult<()> {
        self.solution.validate()?;
        Ok(())
    }

    /// Format configuration options for display, one `key = value` line each,
    /// sorted by key.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_global_options(&mut options);
        self.format_solution_options(&mut options);
        options.insert(
            "registry.enabled".to_string(),
            self.registry.enabled.to_string(),
        );

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }

    fn format_global_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "global.output_log_level".into(),
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".into(),
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.log_file".into(),
            self.global
                .log_file
                .as_ref()
                .map_or_else(String::new, |p| p.display().to_string()),
        );
    }

    fn format_solution_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "solution.path".into(),
            self.solution
                .path
                .as_ref()
                .map_or_else(String::new, |p| p.display().to_string()),
        );
        options.insert(
            "solution.configuration".into(),
            self.solution.configuration.clone().unwrap_or_default(),
        );
        options.insert(
            "solution.platform".into(),
            self.solution.platform.clone().unwrap_or_default(),
        );
    }
}
