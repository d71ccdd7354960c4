// slnenv-rs: Solution Environment loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The real process environment table.

use std::ffi::{OsStr, OsString};

use super::Environment;
use tracing::warn;

/// [`Environment`] backed by the operating-system environment of this process.
///
/// Every write goes through `std::env::set_var` / `remove_var`. Writes that
/// the platform would reject (empty name, `=` or NUL in the name, NUL in the
/// value) are skipped with a warning; the caller's read-back then reports the
/// mismatch.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl ProcessEnvironment {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

fn is_writable_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(['=', '\0'])
}

impl Environment for ProcessEnvironment {
    fn var_os(&self, name: &str) -> Option<OsString> {
        if !is_writable_name(name) {
            return None;
        }
        std::env::var_os(name)
    }

    fn set_var(&mut self, name: &str, value: Option<&str>) {
        match value {
            Some(value) if !value.is_empty() => self.restore(name, Some(OsStr::new(value))),
            _ => self.restore(name, None),
        }
    }

    fn restore(&mut self, name: &str, prior: Option<&OsStr>) {
        if !is_writable_name(name) {
            warn!(name, "refusing to write environment variable with invalid name");
            return;
        }
        match prior {
            Some(value) => {
                if value.as_encoded_bytes().contains(&0) {
                    warn!(name, "refusing to write environment value containing NUL");
                    return;
                }
                // SAFETY: sessions are serialised onto a single controller
                // thread and nothing else in this process mutates or reads the
                // environment table through libc while a pass runs.
                unsafe { std::env::set_var(name, value) };
            }
            None => {
                // SAFETY: see above.
                unsafe { std::env::remove_var(name) };
            }
        }
    }
}
