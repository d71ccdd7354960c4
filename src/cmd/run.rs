// slnenv-rs: Solution Environment loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `slnenv run`: apply the solution environment, then run a program in it.
//!
//! ```text
//! reload(ProcessEnvironment)     report lines --> stderr
//!   Failed && !--keep-going  --> error, nothing spawned
//!        |
//!        v
//! which(program) --> spawn (inherits environment)
//!        |
//!   select! { child exits  --> its exit code
//!             Ctrl-C       --> kill child, exit code 130 }
//! ```

use anyhow::Context;
use std::process::ExitCode;
use tokio::process::Command;
use tracing::{debug, warn};

use super::{check_outcome, discover_host, registry_for};
use crate::cli::RunArgs;
use crate::config::Config;
use crate::core::env::process::ProcessEnvironment;
use crate::core::output::ConsoleSink;
use crate::error::{Result, SlnEnvResult};
use crate::host::HostContext;
use crate::session::{ReloadOutcome, SessionController, Trigger};

/// Exit code reported when the child was interrupted with Ctrl-C.
const INTERRUPTED_EXIT_CODE: u8 = 130;

/// Run the run command.
///
/// # Errors
///
/// Returns an error if no host context can be established, the definition
/// file fails to load (unless `--keep-going`), or the program cannot be
/// found or started.
pub async fn run_run_command(args: &RunArgs, config: &Config) -> Result<ExitCode> {
    let host = discover_host(config)?;
    run_in_host(args, config, &host).await
}

/// [`run_run_command`] against an already established host.
///
/// # Errors
///
/// Same as [`run_run_command`], minus host discovery.
pub async fn run_in_host(
    args: &RunArgs,
    config: &Config,
    host: &dyn HostContext,
) -> Result<ExitCode> {
    let Some((program, program_args)) = args.command.split_first() else {
        anyhow::bail!("no program given");
    };

    let mut session = SessionController::new(
        ProcessEnvironment::new(),
        ConsoleSink::stderr(),
        registry_for(config),
    );
    gate_outcome(session.handle(Trigger::BuildBegin, host), args.keep_going)?;

    let resolved = which::which(program)
        .with_context(|| format!("program '{program}' not found in PATH"))?;
    debug!(program = %resolved.display(), args = ?program_args, "spawning");

    let mut child = Command::new(&resolved)
        .args(program_args)
        .spawn()
        .with_context(|| format!("failed to start '{}'", resolved.display()))?;

    tokio::select! {
        status = child.wait() => {
            let status = status.with_context(|| format!("failed waiting for '{program}'"))?;
            debug!(?status, "program exited");
            Ok(exit_code(status.code()))
        }
        Ok(()) = tokio::signal::ctrl_c() => {
            warn!(program, "interrupted, terminating program");
            child.kill().await.ok();
            Ok(ExitCode::from(INTERRUPTED_EXIT_CODE))
        }
    }
}

/// Decides whether the program may start after the load.
///
/// A failed load stops the run unless `keep_going` is set.
///
/// # Errors
///
/// Returns the parse error of a failed load when `keep_going` is off.
pub fn gate_outcome(outcome: Option<ReloadOutcome>, keep_going: bool) -> SlnEnvResult<()> {
    match outcome {
        Some(outcome) if keep_going && outcome.is_failed() => {
            warn!("solution environment failed to load, running anyway");
            Ok(())
        }
        Some(outcome) => check_outcome(outcome),
        None => Ok(()),
    }
}

/// Maps a child's exit status code onto this process's exit code.
///
/// Codes outside `0..=255` (or a missing code, when the child was killed by
/// a signal) become a generic failure.
#[must_use]
pub fn exit_code(code: Option<i32>) -> ExitCode {
    code.and_then(|c| u8::try_from(c).ok())
        .map_or(ExitCode::FAILURE, ExitCode::from)
}
