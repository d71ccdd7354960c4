// slnenv-rs: Solution Environment loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The `configuration[|platform]` filter in front of an assignment.
//!
//! ```text
//! "Debug|x64"  --> { configuration: Debug, platform: x64 }
//! "Debug"      --> { configuration: Debug, platform: - }
//! "|x64"       --> { configuration: -,     platform: x64 }
//! ""           --> { -, - }  (always matches)
//! ```

use std::fmt;

/// Configuration and platform filters of a conditional assignment.
///
/// Each filter is optional; a present filter must equal the active value
/// exactly (case-sensitive).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Condition {
    configuration: Option<String>,
    platform: Option<String>,
}

impl Condition {
    /// Parses a condition clause (the text before the `:`).
    ///
    /// The clause splits at the first `|`. Each half is trimmed; an empty
    /// half means "any".
    #[must_use]
    pub fn parse(clause: &str) -> Self {
        let (configuration, platform) = clause
            .trim()
            .split_once('|')
            .unwrap_or((clause.trim(), ""));
        Self {
            configuration: non_empty(configuration),
            platform: non_empty(platform),
        }
    }

    #[must_use]
    pub fn new(configuration: Option<&str>, platform: Option<&str>) -> Self {
        Self {
            configuration: configuration.and_then(non_empty),
            platform: platform.and_then(non_empty),
        }
    }

    #[must_use]
    pub fn configuration(&self) -> Option<&str> {
        self.configuration.as_deref()
    }

    #[must_use]
    pub fn platform(&self) -> Option<&str> {
        self.platform.as_deref()
    }

    /// Whether the guarded line applies under the given build selection.
    #[must_use]
    pub fn matches(&self, configuration: &str, platform: &str) -> bool {
        self.configuration.as_deref().is_none_or(|c| c == configuration)
            && self.platform.as_deref().is_none_or(|p| p == platform)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.configuration, &self.platform) {
            (Some(c), Some(p)) => write!(f, "{c}|{p}"),
            (Some(c), None) => f.write_str(c),
            (None, Some(p)) => write!(f, "|{p}"),
            (None, None) => Ok(()),
        }
    }
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_owned())
}
