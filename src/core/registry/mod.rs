// slnenv-rs: Solution Environment loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Read-only registry lookups for `%(HKLM\Key\Value)` tokens.
//!
//! ```text
//!          RegistryReader (trait)
//!      read(root, key_path, value_name)
//!        |            |            |
//!        v            v            v
//! WindowsRegistry  NoRegistry  MemoryRegistry
//! RegGetValueW     always None BTreeMap (tests, hosts
//! (Windows only)   (--no-registry, that inject values)
//!                   non-Windows)
//! ```

#[cfg(windows)]
pub mod win32;


use std::collections::BTreeMap;

/// Registry hive a token may read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RegistryRoot {
    /// `HKLM`
    LocalMachine,
    /// `HKCU`
    CurrentUser,
}

impl RegistryRoot {
    /// Parses the four-letter abbreviation used in definition files.
    ///
    /// Matching is exact: `hklm` is not recognised.
    #[must_use]
    pub fn from_abbreviation(root: &str) -> Option<Self> {
        match root {
            "HKLM" => Some(Self::LocalMachine),
            "HKCU" => Some(Self::CurrentUser),
            _ => None,
        }
    }

    #[must_use]
    pub const fn abbreviation(self) -> &'static str {
        match self {
            Self::LocalMachine => "HKLM",
            Self::CurrentUser => "HKCU",
        }
    }
}

impl std::fmt::Display for RegistryRoot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.abbreviation())
    }
}

/// Source of registry values.
///
/// Implementations never fail: a missing key, a missing value or a value of
/// a type without a string form all read as `None`.
pub trait RegistryReader {
    /// Reads `value_name` under `root\key_path` and renders it as a string.
    fn read(&self, root: RegistryRoot, key_path: &str, value_name: &str) -> Option<String>;
}

/// A registry with nothing in it.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRegistry;

impl RegistryReader for NoRegistry {
    fn read(&self, _root: RegistryRoot, _key_path: &str, _value_name: &str) -> Option<String> {
        None
    }
}

/// An in-memory registry.
///
/// Key paths and value names compare case-insensitively, like the real
/// registry.
#[derive(Debug, Clone, Default)]
pub struct MemoryRegistry {
    values: BTreeMap<(RegistryRoot, String, String), String>,
}

impl MemoryRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a string value.
    #[must_use]
    pub fn with_value(
        mut self,
        root: RegistryRoot,
        key_path: &str,
        value_name: &str,
        data: impl Into<String>,
    ) -> Self {
        self.values.insert(
            (
                root,
                key_path.to_ascii_lowercase(),
                value_name.to_ascii_lowercase(),
            ),
            data.into(),
        );
        self
    }
}

impl RegistryReader for MemoryRegistry {
    fn read(&self, root: RegistryRoot, key_path: &str, value_name: &str) -> Option<String> {
        self.values
            .get(&(
                root,
                key_path.to_ascii_lowercase(),
                value_name.to_ascii_lowercase(),
            ))
            .cloned()
    }
}

/// The registry of this machine: [`win32::WindowsRegistry`] on Windows,
/// [`NoRegistry`] elsewhere.
#[must_use]
pub fn system_registry() -> Box<dyn RegistryReader> {
    #[cfg(windows)]
    {
        Box::new(win32::WindowsRegistry)
    }
    #[cfg(not(windows))]
    {
        Box::new(NoRegistry)
    }
}
