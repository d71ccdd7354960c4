// slnenv-rs: Solution Environment loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Seed variables derived from the solution context.
//!
//! ```text
//! C:\proj\App.sln, Debug, x64
//!   SolutionDir           = C:\proj
//!   SolutionName          = App
//!   SolutionDrive         = C:\
//!   SolutionConfiguration = Debug
//!   SolutionPlatform      = x64
//! ```
//!
//! Seeds are visible to `$(Name)` substitution but are never written to the
//! environment. They shadow environment variables of the same name.

use std::path::{Component, Path, PathBuf};

pub const SOLUTION_DIR: &str = "SolutionDir";
pub const SOLUTION_NAME: &str = "SolutionName";
pub const SOLUTION_DRIVE: &str = "SolutionDrive";
pub const SOLUTION_CONFIGURATION: &str = "SolutionConfiguration";
pub const SOLUTION_PLATFORM: &str = "SolutionPlatform";

/// One name/value pair supplied by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedVariable {
    name: String,
    value: String,
}

impl SeedVariable {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Ordered set of seed variables with case-insensitive lookup.
///
/// When two seeds differ only in case, the first one wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedVariables {
    vars: Vec<SeedVariable>,
}

impl SeedVariables {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The five standard seeds for a solution file.
    #[must_use]
    pub fn for_solution(solution: &Path, configuration: &str, platform: &str) -> Self {
        let dir = solution
            .parent()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        let name = solution
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self::new()
            .with(SOLUTION_DIR, dir)
            .with(SOLUTION_NAME, name)
            .with(SOLUTION_DRIVE, path_root(solution))
            .with(SOLUTION_CONFIGURATION, configuration)
            .with(SOLUTION_PLATFORM, platform)
    }

    /// Appends a seed.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.push(SeedVariable {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars
            .iter()
            .find(|v| v.name.eq_ignore_ascii_case(name))
            .map(|v| v.value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &SeedVariable> {
        self.vars.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

/// Drive or root of `path`: `C:\` on Windows, `/` on Unix, empty when the
/// path is relative.
#[must_use]
pub fn path_root(path: &Path) -> String {
    let root: PathBuf = path
        .components()
        .take_while(|c| matches!(c, Component::Prefix(_) | Component::RootDir))
        .collect();
    root.display().to_string()
}
