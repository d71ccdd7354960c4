// slnenv-rs: Solution Environment loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Environment variable backends.
//!
//! # Architecture
//!
//! ```text
//!              Environment (trait)
//!      var_os / set_var / restore / same_name
//!               |              |
//!               v              v
//!   ProcessEnvironment        Env
//!   std::env, real table      copy-on-write BTreeMap
//!   (slnenv run)              (slnenv show, tests)
//! ```
//!
//! - **Assignments vs restores**: an assignment with an empty value removes
//!   the variable. A restore puts back exactly what was recorded, so a
//!   variable that existed with an empty value comes back empty, and raw
//!   (non-Unicode) values come back byte for byte.
//! - **Name comparison follows the platform**: `Path` and `PATH` are one
//!   variable on Windows and two elsewhere, in both backends.

use std::ffi::{OsStr, OsString};

pub mod container;
pub mod process;
pub mod types;


/// Read/write access to an environment-variable table.
///
/// The definition-file parser and the transaction log only ever touch the
/// environment through this trait.
pub trait Environment {
    /// Raw value of `name`, `None` when unset.
    fn var_os(&self, name: &str) -> Option<OsString>;

    /// Current value of `name` as text, `None` when unset.
    fn var(&self, name: &str) -> Option<String> {
        self.var_os(name)
            .map(|value| value.to_string_lossy().into_owned())
    }

    /// Assigns `name`; `None` or an empty value removes it.
    fn set_var(&mut self, name: &str, value: Option<&str>);

    /// Puts `name` back to exactly `prior`.
    ///
    /// `Some("")` leaves an empty variable behind; only `None` removes it.
    fn restore(&mut self, name: &str, prior: Option<&OsStr>);

    /// Whether two names denote the same variable in this table.
    fn same_name(&self, a: &str, b: &str) -> bool {
        names_equal(a, b)
    }
}

impl<E: Environment + ?Sized> Environment for &mut E {
    fn var_os(&self, name: &str) -> Option<OsString> {
        (**self).var_os(name)
    }

    fn var(&self, name: &str) -> Option<String> {
        (**self).var(name)
    }

    fn set_var(&mut self, name: &str, value: Option<&str>) {
        (**self).set_var(name, value);
    }

    fn restore(&mut self, name: &str, prior: Option<&OsStr>) {
        (**self).restore(name, prior);
    }

    fn same_name(&self, a: &str, b: &str) -> bool {
        (**self).same_name(a, b)
    }
}

/// Variable name equality of the host platform.
#[must_use]
pub fn names_equal(a: &str, b: &str) -> bool {
    if cfg!(windows) {
        a.eq_ignore_ascii_case(b)
    } else {
        a == b
    }
}

/// Normalises a value the way [`Environment::set_var`] stores it, for
/// read-back comparison: empty and absent are the same thing.
#[must_use]
pub fn effective_value(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
