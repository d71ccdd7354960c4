// slnenv-rs: Solution Environment loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Token substitution inside values and include targets.
//!
//! ```text
//! "$(SolutionDir)\tools;%(HKLM\SOFTWARE\Kit\Root)"
//!        |
//!        v  pass 1: $(Name)   seeds (case-insensitive) > environment > ""
//! "C:\proj\tools;%(HKLM\SOFTWARE\Kit\Root)"
//!        |
//!        v  pass 2: %(ROOT\Key\Value)   registry > ""
//! "C:\proj\tools;C:\Kits\10"
//! ```
//!
//! Substitution never fails and never leaves an unresolved token behind.

use regex::{Captures, Regex};
use std::sync::LazyLock;
use tracing::{trace, warn};

use super::seeds::SeedVariables;
use crate::core::env::Environment;
use crate::core::registry::{RegistryReader, RegistryRoot};

struct Patterns {
    variable: Regex,
    registry: Regex,
}

impl Patterns {
    fn compile() -> Result<Self, regex::Error> {
        Ok(Self {
            variable: Regex::new(r"\$\(([A-Za-z0-9_]+)\)")?,
            registry: Regex::new(r"%\(([^)]+)\)")?,
        })
    }
}

static PATTERNS: LazyLock<Result<Patterns, regex::Error>> = LazyLock::new(Patterns::compile);

/// Resolves tokens against seeds, an environment and a registry.
#[derive(Clone, Copy)]
pub struct Resolver<'a> {
    seeds: &'a SeedVariables,
    env: &'a dyn Environment,
    registry: &'a dyn RegistryReader,
}

impl<'a> Resolver<'a> {
    #[must_use]
    pub fn new(
        seeds: &'a SeedVariables,
        env: &'a dyn Environment,
        registry: &'a dyn RegistryReader,
    ) -> Self {
        Self {
            seeds,
            env,
            registry,
        }
    }

    /// Expands `$(Name)` tokens, then `%(ROOT\Key\Value)` tokens.
    #[must_use]
    pub fn resolve(&self, text: &str) -> String {
        let patterns = match &*PATTERNS {
            Ok(patterns) => patterns,
            Err(e) => {
                warn!(error = %e, "token patterns failed to compile, leaving text as is");
                return text.to_owned();
            }
        };

        let expanded = patterns
            .variable
            .replace_all(text, |caps: &Captures<'_>| self.variable(&caps[1]));
        patterns
            .registry
            .replace_all(&expanded, |caps: &Captures<'_>| self.registry_value(&caps[1]))
            .into_owned()
    }

    fn variable(&self, name: &str) -> String {
        if let Some(value) = self.seeds.get(name) {
            trace!(name, value, "seed variable");
            return value.to_owned();
        }
        let value = self.env.var(name).unwrap_or_default();
        trace!(name, value = %value, "environment variable");
        value
    }

    fn registry_value(&self, token: &str) -> String {
        let Some((root, key_path, value_name)) = split_registry_token(token) else {
            trace!(token, "malformed registry token");
            return String::new();
        };
        let value = self
            .registry
            .read(root, key_path, value_name)
            .unwrap_or_default();
        trace!(%root, key_path, value_name, value = %value, "registry value");
        value
    }
}

/// Resolves all tokens in `text`.
#[must_use]
pub fn resolve(
    text: &str,
    seeds: &SeedVariables,
    env: &dyn Environment,
    registry: &dyn RegistryReader,
) -> String {
    Resolver::new(seeds, env, registry).resolve(text)
}

/// Splits the inside of a `%(...)` token into root, key path and value name.
///
/// The root is the first four characters and must be followed by `\`. The
/// value name is the segment after the last `\`.
#[must_use]
pub fn split_registry_token(token: &str) -> Option<(RegistryRoot, &str, &str)> {
    let root = RegistryRoot::from_abbreviation(token.get(..4)?)?;
    let rest = token.get(4..)?.strip_prefix('\\')?;
    let (key_path, value_name) = rest.rsplit_once('\\')?;
    Some((root, key_path, value_name))
}
