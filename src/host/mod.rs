// slnenv-rs: Solution Environment loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Host context: which solution is open and what is being built.
//!
//! ```text
//!                HostContext (trait)
//!   solution_path / active_configuration / active_platform
//!          |                          |
//!          v                          v
//!     StaticHost                 SolutionHost
//!     fixed values               --solution / slnenv.toml / *.sln in cwd
//!     (embedding, tests)         platform derived from the .sln
//! ```

pub mod solution;
pub mod tree;


use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::types::SolutionConfig;
use crate::error::HostError;
use solution::SolutionFile;

/// Solution context supplied by the host.
pub trait HostContext {
    /// Full path of the open solution, `None` when nothing is open.
    fn solution_path(&self) -> Option<&Path>;

    /// Active build configuration name, e.g. `Debug`.
    fn active_configuration(&self) -> &str;

    /// Active build platform name, e.g. `x64`.
    fn active_platform(&self) -> &str;
}

/// Host context with fixed values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticHost {
    solution: Option<PathBuf>,
    configuration: String,
    platform: String,
}

impl StaticHost {
    #[must_use]
    pub fn new(
        solution: impl Into<PathBuf>,
        configuration: impl Into<String>,
        platform: impl Into<String>,
    ) -> Self {
        Self {
            solution: Some(solution.into()),
            configuration: configuration.into(),
            platform: platform.into(),
        }
    }

    /// A host without an open solution.
    #[must_use]
    pub fn closed() -> Self {
        Self::default()
    }

    pub fn set_configuration(&mut self, configuration: impl Into<String>) {
        self.configuration = configuration.into();
    }

    pub fn set_platform(&mut self, platform: impl Into<String>) {
        self.platform = platform.into();
    }
}

impl HostContext for StaticHost {
    fn solution_path(&self) -> Option<&Path> {
        self.solution.as_deref()
    }

    fn active_configuration(&self) -> &str {
        &self.configuration
    }

    fn active_platform(&self) -> &str {
        &self.platform
    }
}

/// Host context of the command-line tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionHost {
    solution: PathBuf,
    configuration: String,
    platform: String,
}

impl SolutionHost {
    /// Establishes the solution context from settings and `cwd`.
    ///
    /// ```text
    /// solution       settings.path (relative to cwd) | the single *.sln in cwd
    /// configuration  settings.configuration | Debug
    /// platform       settings.platform
    ///                | .sln: first project mapping for configuration|default platform
    ///                | .sln: default platform for configuration
    ///                | ""
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`HostError::SolutionNotFound`] or
    /// [`HostError::AmbiguousSolution`] when no single solution can be picked,
    /// and [`HostError::Read`] when the platform must be derived from a
    /// solution file that cannot be read.
    pub fn discover(settings: &SolutionConfig, cwd: &Path) -> Result<Self, HostError> {
        let solution = match &settings.path {
            Some(path) => cwd.join(path),
            None => find_solution(cwd)?,
        };
        let configuration = settings
            .configuration
            .clone()
            .unwrap_or_else(|| SolutionConfig::DEFAULT_CONFIGURATION.to_string());

        let platform = match &settings.platform {
            Some(platform) => platform.clone(),
            None => {
                let file = SolutionFile::load(&solution)?;
                derive_platform(&file, &configuration)
            }
        };

        debug!(
            solution = %solution.display(),
            configuration,
            platform,
            "host context established"
        );
        Ok(Self {
            solution,
            configuration,
            platform,
        })
    }

    #[must_use]
    pub fn solution(&self) -> &Path {
        &self.solution
    }
}

impl HostContext for SolutionHost {
    fn solution_path(&self) -> Option<&Path> {
        Some(&self.solution)
    }

    fn active_configuration(&self) -> &str {
        &self.configuration
    }

    fn active_platform(&self) -> &str {
        &self.platform
    }
}

/// Active platform for `configuration`, as Visual Studio would pick it.
#[must_use]
pub fn derive_platform(file: &SolutionFile, configuration: &str) -> String {
    let Some(solution_platform) = file.default_platform(configuration) else {
        return String::new();
    };
    file.active_platform(configuration, solution_platform)
        .unwrap_or(solution_platform)
        .to_owned()
}

/// The single `*.sln` file in `dir`.
///
/// # Errors
///
/// Returns [`HostError::SolutionNotFound`] for none,
/// [`HostError::AmbiguousSolution`] for several and [`HostError::Read`] when
/// the directory cannot be listed.
pub fn find_solution(dir: &Path) -> Result<PathBuf, HostError> {
    let entries = std::fs::read_dir(dir).map_err(|source| HostError::Read {
        path: dir.display().to_string(),
        source,
    })?;

    let mut candidates: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("sln"))
        })
        .collect();
    candidates.sort();

    match candidates.len() {
        0 => Err(HostError::SolutionNotFound {
            dir: dir.display().to_string(),
        }),
        1 => Ok(candidates.remove(0)),
        _ => Err(HostError::AmbiguousSolution {
            dir: dir.display().to_string(),
            candidates: candidates
                .iter()
                .filter_map(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join(", "),
        }),
    }
}
