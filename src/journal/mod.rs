// slnenv-rs: Solution Environment loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Environment transaction log.
//!
//! ```text
//! pass N:   record(PATH)  --> [PATH: "/usr/bin"]
//!           record(FOO)   --> [PATH: "/usr/bin", FOO: <unset>]
//!           record(PATH)  --> unchanged (first write wins)
//!
//! pass N+1: revert_all()  --> FOO removed, PATH = "/usr/bin", log cleared
//! ```
//!
//! Priors are kept as raw `OsString`s and restored with
//! [`Environment::restore`], so an empty variable comes back empty and a
//! non-Unicode value comes back unchanged.
//!
//! The log lives as long as the session controller that owns it; nothing is
//! persisted.


use std::borrow::Cow;
use std::ffi::{OsStr, OsString};

use tracing::debug;

use crate::core::env::{Environment, effective_value};
use crate::core::output::OutputSink;

/// Value a variable held before the current session first overwrote it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvVarChange {
    name: String,
    prior: Option<OsString>,
}

impl EnvVarChange {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Prior value as text, `None` when the variable was unset.
    #[must_use]
    pub fn prior(&self) -> Option<Cow<'_, str>> {
        self.prior.as_deref().map(OsStr::to_string_lossy)
    }

    /// Prior value exactly as it was read.
    #[must_use]
    pub fn prior_os(&self) -> Option<&OsStr> {
        self.prior.as_deref()
    }
}

/// Ordered prior-value snapshots, at most one per variable.
#[derive(Debug, Clone, Default)]
pub struct TransactionLog {
    changes: Vec<EnvVarChange>,
}

impl TransactionLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshots `name` unless it was already snapshotted this session.
    ///
    /// Returns `true` when a new record was created.
    pub fn record(&mut self, env: &dyn Environment, name: &str) -> bool {
        if self.contains(env, name) {
            return false;
        }
        let prior = env.var_os(name);
        debug!(name, prior = ?prior, "recording prior value");
        self.changes.push(EnvVarChange {
            name: name.to_owned(),
            prior,
        });
        true
    }

    /// Whether a record exists for `name`, using the environment's notion of
    /// name equality.
    #[must_use]
    pub fn contains(&self, env: &dyn Environment, name: &str) -> bool {
        self.changes.iter().any(|c| env.same_name(&c.name, name))
    }

    /// Restores every recorded variable, newest first, then clears the log.
    ///
    /// Each restore is read back and reported to `sink`. Returns the number
    /// of variables whose read-back did not match.
    pub fn revert_all(&mut self, env: &mut dyn Environment, sink: &mut dyn OutputSink) -> usize {
        if self.changes.is_empty() {
            return 0;
        }
        debug!(count = self.changes.len(), "reverting environment changes");

        let mut failures = 0;
        for change in self.changes.drain(..).rev() {
            if !restore_and_verify(env, sink, &change.name, change.prior_os()) {
                failures += 1;
            }
        }
        failures
    }

    #[must_use]
    pub fn changes(&self) -> &[EnvVarChange] {
        &self.changes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

/// Writes `value` to `name`, reads it back and reports the result.
///
/// Reports `SET name = value` on success and `FAILED SETTING name = value`
/// when the read-back differs. Returns whether the write stuck.
pub fn write_and_verify(
    env: &mut dyn Environment,
    sink: &mut dyn OutputSink,
    name: &str,
    value: Option<&str>,
) -> bool {
    env.set_var(name, value);
    let actual = env.var(name);
    let shown = value.unwrap_or_default();

    if effective_value(actual.as_deref()) == effective_value(value) {
        sink.write_line(&format!("SET {name} = {shown}"));
        true
    } else {
        sink.write_line(&format!("FAILED SETTING {name} = {shown}"));
        false
    }
}

/// Puts `name` back to `prior`, reads it back and reports the result.
///
/// Unlike [`write_and_verify`] the comparison is exact: an empty variable
/// that comes back missing is a failure.
pub fn restore_and_verify(
    env: &mut dyn Environment,
    sink: &mut dyn OutputSink,
    name: &str,
    prior: Option<&OsStr>,
) -> bool {
    env.restore(name, prior);
    let actual = env.var_os(name);
    let shown = prior.map(OsStr::to_string_lossy).unwrap_or_default();

    if actual.as_deref() == prior {
        sink.write_line(&format!("SET {name} = {shown}"));
        true
    } else {
        sink.write_line(&format!("FAILED SETTING {name} = {shown}"));
        false
    }
}
