// slnenv-rs: Solution Environment loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `slnenv show`: dry run against a snapshot of the current environment.

use super::{check_outcome, discover_host, registry_for};
use crate::cli::ShowArgs;
use crate::config::Config;
use crate::core::env::container::Env;
use crate::core::output::{ConsoleSink, OutputSink, TracingSink};
use crate::core::registry::RegistryReader;
use crate::error::Result;
use crate::host::HostContext;
use crate::session::{AppliedChange, ReloadOutcome, SessionController, Trigger};

/// What a dry run would do.
#[derive(Debug)]
pub struct DryRun<S> {
    pub outcome: Option<ReloadOutcome>,
    pub changes: Vec<AppliedChange>,
    pub sink: S,
}

/// Loads the definition file of `host` into `env` without touching the
/// process, reporting to `sink`.
pub fn dry_run<S: OutputSink>(
    host: &dyn HostContext,
    env: Env,
    sink: S,
    registry: Box<dyn RegistryReader>,
) -> DryRun<S> {
    let mut session = SessionController::new(env, sink, registry);
    let outcome = session.handle(Trigger::InitialLoad, host);
    let changes = session.applied_changes();
    let (_, sink) = session.into_parts();
    DryRun {
        outcome,
        changes,
        sink,
    }
}

/// `show --json` output: an array of `{name, prior, value}` objects.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_json(changes: &[AppliedChange]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(changes)
}

/// Run the show command.
///
/// Report lines go to stdout, or to the log when `--json` prints the
/// changed variables instead.
///
/// # Errors
///
/// Returns an error if no host context can be established or the definition
/// file fails to load.
pub fn run_show_command(args: &ShowArgs, config: &Config) -> Result<()> {
    let host = discover_host(config)?;

    let sink: Box<dyn OutputSink> = if args.json {
        Box::new(TracingSink)
    } else {
        Box::new(ConsoleSink::stdout())
    };
    let report = dry_run(&host, Env::capture(), sink, registry_for(config));

    if args.json {
        println!("{}", render_json(&report.changes)?);
    }

    report.outcome.map_or(Ok(()), check_outcome)?;
    Ok(())
}
