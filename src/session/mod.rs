// slnenv-rs: Solution Environment loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Session controller: one reload per host trigger.
//!
//! ```text
//!  host thread(s)                    controller thread
//!  --------------                    -----------------
//!  SolutionOpened --+
//!  BuildBegin     --+--> flume --> serve() --> handle(trigger)
//!  EnterRunMode   --+                              |
//!                                                  v
//!                                               reload()
//!                                    1. revert previous session
//!                                    2. seeds from HostContext
//!                                    3. parse <solution>.slnenv
//!                                    4. report loaded / error
//! ```
//!
//! All parsing and environment mutation happens on the thread that owns the
//! controller, so the transaction log needs no locking.


use serde::Serialize;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::core::env::Environment;
use crate::core::output::OutputSink;
use crate::core::registry::RegistryReader;
use crate::definition::{self, ParseContext, Parser};
use crate::error::ParseError;
use crate::host::HostContext;
use crate::journal::TransactionLog;

/// Why the debugger entered run mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunReason {
    /// A program was launched under the debugger.
    LaunchProgram,
    /// Any other reason (attach, step, breakpoint continue, ...).
    Other,
}

/// Host lifecycle event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// The controller was created while a solution was already open.
    InitialLoad,
    SolutionOpened,
    BuildBegin,
    EnterRunMode(RunReason),
}

impl Trigger {
    /// Whether this event reloads the solution environment.
    #[must_use]
    pub const fn reloads(self) -> bool {
        !matches!(self, Self::EnterRunMode(RunReason::Other))
    }
}

/// Result of one reload.
#[derive(Debug)]
pub enum ReloadOutcome {
    /// The host has no open solution; only the revert happened.
    NoSolution,
    /// The root definition file does not exist.
    NotFound { path: PathBuf },
    /// The root definition file and its includes were applied.
    Loaded { path: PathBuf },
    /// A fatal error aborted the pass. Changes made before it stay applied.
    Failed { path: PathBuf, error: ParseError },
}

impl ReloadOutcome {
    /// Root definition file path, when a solution was open.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::NoSolution => None,
            Self::NotFound { path } | Self::Loaded { path } | Self::Failed { path, .. } => {
                Some(path)
            }
        }
    }

    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// One variable changed by the current session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedChange {
    pub name: String,
    pub prior: Option<String>,
    pub value: Option<String>,
}

/// Root definition file of a solution: same directory and stem, `.slnenv`
/// extension.
#[must_use]
pub fn definition_path(solution: &Path) -> PathBuf {
    solution.with_extension(definition::EXTENSION)
}

/// Owns the environment backend, the output sink and the transaction log
/// for the lifetime of a host session.
pub struct SessionController<E: Environment, S: OutputSink> {
    env: E,
    sink: S,
    registry: Box<dyn RegistryReader>,
    log: TransactionLog,
}

impl<E: Environment, S: OutputSink> SessionController<E, S> {
    pub fn new(env: E, sink: S, registry: Box<dyn RegistryReader>) -> Self {
        Self {
            env,
            sink,
            registry,
            log: TransactionLog::new(),
        }
    }

    /// Reverts the previous session and applies the host's definition file.
    pub fn reload(&mut self, host: &dyn HostContext) -> ReloadOutcome {
        self.revert();

        let Some(solution) = host.solution_path() else {
            debug!("no solution open, nothing to load");
            return ReloadOutcome::NoSolution;
        };

        let path = definition_path(solution);
        let context = ParseContext::for_solution(
            solution,
            host.active_configuration(),
            host.active_platform(),
        );
        debug!(
            file = %path.display(),
            configuration = context.configuration(),
            platform = context.platform(),
            "loading solution environment"
        );

        let result = Parser::new(
            &context,
            &mut self.env,
            &*self.registry,
            &mut self.log,
            &mut self.sink,
        )
        .parse_file(&path);

        match result {
            Ok(true) => {
                info!(file = %path.display(), changes = self.log.len(), "solution environment loaded");
                self.sink
                    .write_line(&format!("Solution Environment {} loaded", path.display()));
                ReloadOutcome::Loaded { path }
            }
            Ok(false) => {
                debug!(file = %path.display(), "no solution environment file");
                ReloadOutcome::NotFound { path }
            }
            Err(error) => {
                warn!(file = %path.display(), error = %error, "solution environment failed");
                self.sink.write_line(&format!(
                    "Solution Environment {} error: {error}",
                    path.display()
                ));
                ReloadOutcome::Failed { path, error }
            }
        }
    }

    /// Reloads when `trigger` calls for it.
    pub fn handle(&mut self, trigger: Trigger, host: &dyn HostContext) -> Option<ReloadOutcome> {
        if !trigger.reloads() {
            debug!(?trigger, "trigger ignored");
            return None;
        }
        debug!(?trigger, "trigger received");
        Some(self.reload(host))
    }

    /// Handles triggers from `receiver` in arrival order until every sender
    /// is dropped. Returns the number of reloads performed.
    pub fn serve(&mut self, receiver: &flume::Receiver<Trigger>, host: &dyn HostContext) -> usize {
        let mut reloads = 0;
        for trigger in receiver.iter() {
            if self.handle(trigger, host).is_some() {
                reloads += 1;
            }
        }
        debug!(reloads, "trigger channel closed");
        reloads
    }

    /// Undoes every change of the current session.
    ///
    /// Returns the number of variables whose restore could not be verified.
    pub fn revert(&mut self) -> usize {
        let failures = self.log.revert_all(&mut self.env, &mut self.sink);
        if failures > 0 {
            warn!(failures, "some environment variables could not be restored");
        }
        failures
    }

    /// Variables changed by the current session with their prior and
    /// current values.
    #[must_use]
    pub fn applied_changes(&self) -> Vec<AppliedChange> {
        self.log
            .changes()
            .iter()
            .map(|change| AppliedChange {
                name: change.name().to_owned(),
                prior: change.prior().map(Cow::into_owned),
                value: self.env.var(change.name()),
            })
            .collect()
    }

    #[must_use]
    pub const fn env(&self) -> &E {
        &self.env
    }

    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    pub const fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    #[must_use]
    pub const fn log(&self) -> &TransactionLog {
        &self.log
    }

    /// Consumes the controller without reverting.
    pub fn into_parts(self) -> (E, S) {
        (self.env, self.sink)
    }
}
