// slnenv-rs: Solution Environment loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Reader for Visual Studio `.sln` files.
//!
//! Only the parts needed to derive the active platform are read:
//!
//! ```text
//! Project("{TYPE}") = "Name", "Path", "{GUID}"          projects
//! GlobalSection(SolutionConfigurationPlatforms)         Debug|x64 = Debug|x64
//! GlobalSection(ProjectConfigurationPlatforms)          {GUID}.Debug|x64.ActiveCfg = Debug|Win32
//! GlobalSection(NestedProjects)                         {CHILD} = {PARENT}
//! ```
//!
//! Everything else is skipped. Parsing never fails; a malformed line simply
//! contributes nothing.

use regex::Regex;
use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, trace, warn};

use super::tree;
use crate::error::HostError;
use crate::utility::encoding;

/// Project type GUID of solution folders.
pub const SOLUTION_FOLDER_TYPE: &str = "2150E333-8FDC-42A3-9474-1A3956D46DE8";

static PROJECT_LINE: LazyLock<Result<Regex, regex::Error>> = LazyLock::new(|| {
    Regex::new(
        r#"^Project\("\{([0-9A-Fa-f-]+)\}"\)\s*=\s*"([^"]*)"\s*,\s*"([^"]*)"\s*,\s*"\{([0-9A-Fa-f-]+)\}""#,
    )
});

/// One `Project(...)` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionProject {
    kind: String,
    name: String,
    path: String,
    guid: String,
}

impl SolutionProject {
    /// Project type GUID, upper case, without braces.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Path relative to the solution directory, as written in the file.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Project GUID, upper case, without braces.
    #[must_use]
    pub fn guid(&self) -> &str {
        &self.guid
    }

    #[must_use]
    pub fn is_folder(&self) -> bool {
        self.kind == SOLUTION_FOLDER_TYPE
    }
}

/// A `configuration|platform` pair offered by the solution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionConfiguration {
    pub configuration: String,
    pub platform: String,
}

#[derive(Debug, Clone)]
struct ProjectMapping {
    project: String,
    solution: String,
    active: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    SolutionConfigurations,
    ProjectConfigurations,
    NestedProjects,
    Other,
}

/// Parsed contents of a `.sln` file.
#[derive(Debug, Clone, Default)]
pub struct SolutionFile {
    projects: Vec<SolutionProject>,
    configurations: Vec<SolutionConfiguration>,
    parents: HashMap<String, String>,
    mappings: Vec<ProjectMapping>,
}

impl SolutionFile {
    /// Reads and parses a solution file.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::Read`] when the file cannot be read.
    pub fn load(path: &Path) -> Result<Self, HostError> {
        let text = encoding::read_text_file(path).map_err(|source| HostError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let solution = Self::parse(&text);
        debug!(
            file = %path.display(),
            projects = solution.projects.len(),
            configurations = solution.configurations.len(),
            "solution file read"
        );
        Ok(solution)
    }

    /// Parses solution text.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let project_line = match &*PROJECT_LINE {
            Ok(re) => Some(re),
            Err(e) => {
                warn!(error = %e, "project line pattern failed to compile");
                None
            }
        };

        let mut solution = Self::default();
        let mut section = Section::None;

        for line in text.lines().map(str::trim) {
            if let Some(rest) = line.strip_prefix("GlobalSection(") {
                section = match rest.split_once(')').map(|(name, _)| name) {
                    Some("SolutionConfigurationPlatforms") => Section::SolutionConfigurations,
                    Some("ProjectConfigurationPlatforms") => Section::ProjectConfigurations,
                    Some("NestedProjects") => Section::NestedProjects,
                    _ => Section::Other,
                };
                continue;
            }
            if line == "EndGlobalSection" {
                section = Section::None;
                continue;
            }

            match section {
                Section::None => {
                    if let Some(caps) = project_line.and_then(|re| re.captures(line)) {
                        solution.projects.push(SolutionProject {
                            kind: normalize_guid(&caps[1]),
                            name: caps[2].to_owned(),
                            path: caps[3].to_owned(),
                            guid: normalize_guid(&caps[4]),
                        });
                    }
                }
                Section::SolutionConfigurations => solution.add_configuration(line),
                Section::ProjectConfigurations => solution.add_mapping(line),
                Section::NestedProjects => solution.add_nesting(line),
                Section::Other => {}
            }
        }
        solution
    }

    fn add_configuration(&mut self, line: &str) {
        let Some((key, _)) = line.split_once('=') else {
            return;
        };
        if let Some((configuration, platform)) = key.trim().split_once('|') {
            self.configurations.push(SolutionConfiguration {
                configuration: configuration.to_owned(),
                platform: platform.to_owned(),
            });
        }
    }

    fn add_mapping(&mut self, line: &str) {
        let Some((key, value)) = line.split_once('=') else {
            return;
        };
        let Some((guid, rest)) = key
            .trim()
            .strip_prefix('{')
            .and_then(|k| k.split_once("}."))
        else {
            return;
        };
        if let Some(solution) = rest.strip_suffix(".ActiveCfg") {
            trace!(project = guid, solution, active = value.trim(), "project mapping");
            self.mappings.push(ProjectMapping {
                project: normalize_guid(guid),
                solution: solution.to_owned(),
                active: value.trim().to_owned(),
            });
        }
    }

    fn add_nesting(&mut self, line: &str) {
        if let Some((child, parent)) = line.split_once('=') {
            self.parents
                .insert(normalize_guid(child), normalize_guid(parent));
        }
    }

    #[must_use]
    pub fn projects(&self) -> &[SolutionProject] {
        &self.projects
    }

    #[must_use]
    pub fn configurations(&self) -> &[SolutionConfiguration] {
        &self.configurations
    }

    /// Parent folder GUID of a nested project.
    #[must_use]
    pub fn parent_of(&self, guid: &str) -> Option<&str> {
        self.parents.get(&normalize_guid(guid)).map(String::as_str)
    }

    /// Projects not nested in any folder, in file order.
    #[must_use]
    pub fn roots(&self) -> Vec<&SolutionProject> {
        self.projects
            .iter()
            .filter(|p| {
                self.parents
                    .get(&p.guid)
                    .is_none_or(|parent| !self.projects.iter().any(|q| q.guid == *parent))
            })
            .collect()
    }

    /// Projects nested directly in `guid`, in file order.
    #[must_use]
    pub fn children(&self, guid: &str) -> Vec<&SolutionProject> {
        let guid = normalize_guid(guid);
        self.projects
            .iter()
            .filter(|p| self.parents.get(&p.guid) == Some(&guid))
            .collect()
    }

    /// All projects, folders expanded in place, in pre-order.
    pub fn walk(&self) -> impl Iterator<Item = &SolutionProject> {
        tree::depth_first(self.roots(), |p: &&SolutionProject| self.children(&p.guid))
    }

    /// First solution platform offered for `configuration`.
    #[must_use]
    pub fn default_platform(&self, configuration: &str) -> Option<&str> {
        self.configurations
            .iter()
            .find(|c| c.configuration == configuration)
            .map(|c| c.platform.as_str())
    }

    /// Project configuration (`Cfg|Plat`) a project builds for a solution
    /// configuration.
    #[must_use]
    pub fn project_configuration(
        &self,
        project: &str,
        configuration: &str,
        solution_platform: &str,
    ) -> Option<&str> {
        let project = normalize_guid(project);
        let key = format!("{configuration}|{solution_platform}");
        self.mappings
            .iter()
            .find(|m| m.project == project && m.solution == key)
            .map(|m| m.active.as_str())
    }

    /// Platform of the first project, depth first, that maps the solution
    /// configuration.
    #[must_use]
    pub fn active_platform(&self, configuration: &str, solution_platform: &str) -> Option<&str> {
        self.walk()
            .filter(|p| !p.is_folder())
            .find_map(|p| self.project_configuration(&p.guid, configuration, solution_platform))
            .and_then(|active| active.split_once('|'))
            .map(|(_, platform)| platform)
    }
}

fn normalize_guid(guid: &str) -> String {
    guid.trim()
        .trim_start_matches('{')
        .trim_end_matches('}')
        .to_ascii_uppercase()
}
