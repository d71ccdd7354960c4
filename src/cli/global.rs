// slnenv-rs: Solution Environment loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global CLI options available for all commands.
//!
//! # Option Precedence
//!
//! ```text
//! --ini FILE          ← Additional config files (can repeat)
//! --solution FILE     ← solution.path
//! --configuration CFG ← solution.configuration
//! --platform PLAT     ← solution.platform
//! --log-level N       ← Console verbosity (0-6)
//! --file-log-level N  ← File verbosity (falls back to --log-level)
//! --no-registry       ← registry.enabled = false
//!
//! Precedence: CLI flags > SLNENV_* > --ini > slnenv.toml > defaults
//! ```

use clap::Args;
use std::path::PathBuf;

use crate::config::loader::ConfigLoader;
use crate::error::Result;

/// Global options available for all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Path to additional TOML configuration file(s).
    /// Can be specified multiple times.
    #[arg(short = 'i', long = "ini", value_name = "FILE", action = clap::ArgAction::Append)]
    pub inis: Vec<PathBuf>,

    /// Solution file (.sln). Defaults to the only .sln in the current
    /// directory.
    #[arg(short = 's', long = "solution", value_name = "FILE")]
    pub solution: Option<PathBuf>,

    /// Active build configuration (default: Debug).
    #[arg(short = 'c', long = "configuration", value_name = "NAME")]
    pub configuration: Option<String>,

    /// Active build platform (default: derived from the solution file).
    #[arg(short = 'p', long = "platform", value_name = "NAME")]
    pub platform: Option<String>,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace, 6=dump).
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub log_level: Option<u8>,

    /// File log level, overrides --log-level for the log file.
    #[arg(long = "file-log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub file_log_level: Option<u8>,

    /// Path to log file.
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Resolves every %(HKLM\...) and %(HKCU\...) token to an empty string.
    #[arg(long = "no-registry")]
    pub no_registry: bool,

    /// Disables loading slnenv.toml from the current directory, only uses --ini.
    #[arg(long = "no-default-inis")]
    pub no_default_inis: bool,
}

impl GlobalOptions {
    /// Converts command-line options to `(key, value)` configuration overrides.
    #[must_use]
    pub fn to_config_overrides(&self) -> Vec<(&'static str, config::Value)> {
        let mut overrides: Vec<(&'static str, config::Value)> = Vec::new();

        if let Some(level) = self.log_level {
            overrides.push(("global.output_log_level", i64::from(level).into()));
        }

        // file_log_level falls back to log_level if not specified
        if let Some(level) = self.file_log_level.or(self.log_level) {
            overrides.push(("global.file_log_level", i64::from(level).into()));
        }

        if let Some(ref path) = self.log_file {
            overrides.push(("global.log_file", path.display().to_string().into()));
        }

        if let Some(ref path) = self.solution {
            overrides.push(("solution.path", path.display().to_string().into()));
        }

        if let Some(ref configuration) = self.configuration {
            overrides.push(("solution.configuration", configuration.clone().into()));
        }

        if let Some(ref platform) = self.platform {
            overrides.push(("solution.platform", platform.clone().into()));
        }

        if self.no_registry {
            overrides.push(("registry.enabled", false.into()));
        }

        overrides
    }

    /// Config loader for these options: default file, `--ini` files,
    /// `SLNENV_*` variables and CLI overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if an override cannot be applied.
    pub fn config_loader(&self) -> Result<ConfigLoader> {
        let mut loader = ConfigLoader::new();
        if !self.no_default_inis {
            loader = loader.add_toml_file_optional(crate::config::DEFAULT_FILE_NAME);
        }
        for ini_path in &self.inis {
            loader = loader.add_toml_file(ini_path);
        }
        loader = loader.with_env_prefix(crate::config::ENV_PREFIX);
        for (key, value) in self.to_config_overrides() {
            loader = loader.set(key, value)?;
        }
        Ok(loader)
    }
}
