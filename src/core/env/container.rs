// slnenv-rs: Solution Environment loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! In-memory environment with copy-on-write sharing.
//!
//! ```text
//! Env
//!   data: Arc<EnvData>, cloned lazily by Arc::make_mut on first write
//!   Env::capture() snapshots the process table for dry runs
//! ```

use super::Environment;
use super::types::{EnvData, EnvKey};
use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};
use std::sync::Arc;

/// A set of environment variables that never touches the process table.
///
/// Used for dry runs (`slnenv show`) and anywhere a pass must be observed
/// without side effects. Clones share storage until one of them is modified.
/// Names compare the way the host platform compares them, so a dry run
/// records and merges variables exactly like [`ProcessEnvironment`].
///
/// [`ProcessEnvironment`]: super::process::ProcessEnvironment
#[derive(Debug, Clone, Default)]
pub struct Env {
    data: Arc<EnvData>,
}

impl Env {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an environment from a map of variables.
    #[must_use]
    pub fn from_map(vars: BTreeMap<String, String>) -> Self {
        let data = EnvData::from_vars(vars.into_iter().map(|(k, v)| (EnvKey::new(k), v)).collect());
        Self {
            data: Arc::new(data),
        }
    }

    /// Snapshots the current process environment.
    ///
    /// Variables whose name or value is not valid Unicode are skipped.
    #[must_use]
    pub fn capture() -> Self {
        let vars = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect();
        Self::from_map(vars)
    }

    /// Sets a variable, replacing any existing value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let key = EnvKey::new(key.into());
        let value = value.into();
        let vars = Arc::make_mut(&mut self.data).vars_mut();
        // Keep the spelling the variable was first created with.
        if let Some(existing) = vars.get_mut(&key) {
            *existing = value;
        } else {
            vars.insert(key, value);
        }
        self
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.data
            .vars()
            .get(&EnvKey::new(key))
            .map(String::as_str)
    }

    pub fn remove(&mut self, key: &str) -> &mut Self {
        if self.get(key).is_some() {
            Arc::make_mut(&mut self.data)
                .vars_mut()
                .remove(&EnvKey::new(key));
        }
        self
    }

    /// Returns all environment variables as a map.
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.data
            .vars()
            .iter()
            .map(|(k, v)| (k.as_str().to_owned(), v.clone()))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.data
            .vars()
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.vars().is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.vars().len()
    }
}

impl Environment for Env {
    fn var_os(&self, name: &str) -> Option<OsString> {
        self.get(name).map(OsString::from)
    }

    fn var(&self, name: &str) -> Option<String> {
        self.get(name).map(str::to_owned)
    }

    fn set_var(&mut self, name: &str, value: Option<&str>) {
        match value {
            Some(value) if !value.is_empty() => {
                self.set(name, value);
            }
            _ => {
                self.remove(name);
            }
        }
    }

    // Values only enter an `Env` as `String`, so the lossy conversion never
    // alters a recorded prior.
    fn restore(&mut self, name: &str, prior: Option<&OsStr>) {
        match prior {
            Some(value) => {
                self.set(name, value.to_string_lossy());
            }
            None => {
                self.remove(name);
            }
        }
    }
}
