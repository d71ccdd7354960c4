// slnenv-rs: Solution Environment loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   show, run, config (options / inis)
//!
//! show:  Env::capture()      --> SessionController --> stdout / JSON
//! run:   ProcessEnvironment  --> SessionController --> spawn child
//! ```

pub mod config;
pub mod run;
pub mod show;


use std::path::Path;

use tracing::warn;

use crate::config::Config;
use crate::core::registry::{NoRegistry, RegistryReader, system_registry};
use crate::error::SlnEnvResult;
use crate::host::SolutionHost;
use crate::session::ReloadOutcome;

/// Host context for the current working directory and configuration.
///
/// # Errors
///
/// Returns an error if the working directory is unavailable or no single
/// solution can be established.
pub fn discover_host(config: &Config) -> SlnEnvResult<SolutionHost> {
    let cwd = std::env::current_dir()?;
    discover_host_in(config, &cwd)
}

/// [`discover_host`] relative to an explicit directory.
///
/// # Errors
///
/// Returns an error if no single solution can be established.
pub fn discover_host_in(config: &Config, cwd: &Path) -> SlnEnvResult<SolutionHost> {
    Ok(SolutionHost::discover(&config.solution, cwd)?)
}

/// Registry reader selected by `registry.enabled`.
#[must_use]
pub fn registry_for(config: &Config) -> Box<dyn RegistryReader> {
    if config.registry.enabled {
        system_registry()
    } else {
        Box::new(NoRegistry)
    }
}

/// Turns a reload outcome into a command result.
///
/// A missing definition file only warns; a failed pass is an error.
///
/// # Errors
///
/// Returns the parse error of a failed pass.
pub fn check_outcome(outcome: ReloadOutcome) -> SlnEnvResult<()> {
    match outcome {
        ReloadOutcome::Failed { error, .. } => Err(error.into()),
        ReloadOutcome::NotFound { path } => {
            warn!(file = %path.display(), "no solution environment file");
            Ok(())
        }
        ReloadOutcome::NoSolution | ReloadOutcome::Loaded { .. } => Ok(()),
    }
}
