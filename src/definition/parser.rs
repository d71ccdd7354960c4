// slnenv-rs: Solution Environment loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Recursive interpretation of `.slnenv` files.
//!
//! ```text
//! parse_file(path)
//!   missing? --> Ok(false)
//!   push path on include stack
//!   for each line:
//!     directive::parse_line
//!       Include      --> resolve target --> parse_file (recursive)
//!                        missing: include = skip, forceinclude = error
//!                        on stack: IncludeCycle
//!       Assign       --> condition? --> resolve value
//!                        --> journal.record --> env.set_var --> read back
//!   pop path
//! ```

use std::path::{Path, PathBuf};
use tracing::{debug, trace};

use super::directive::{self, Assignment, Directive, IncludeKind};
use super::resolve::Resolver;
use super::seeds::SeedVariables;
use crate::core::env::Environment;
use crate::core::output::OutputSink;
use crate::core::registry::RegistryReader;
use crate::error::ParseError;
use crate::journal::{TransactionLog, write_and_verify};
use crate::utility::encoding;

/// Read-only state shared by every file of one pass.
#[derive(Debug, Clone, Default)]
pub struct ParseContext {
    seeds: SeedVariables,
    configuration: String,
    platform: String,
}

impl ParseContext {
    #[must_use]
    pub fn new(
        seeds: SeedVariables,
        configuration: impl Into<String>,
        platform: impl Into<String>,
    ) -> Self {
        Self {
            seeds,
            configuration: configuration.into(),
            platform: platform.into(),
        }
    }

    /// Context with the standard seeds for `solution`.
    #[must_use]
    pub fn for_solution(solution: &Path, configuration: &str, platform: &str) -> Self {
        Self::new(
            SeedVariables::for_solution(solution, configuration, platform),
            configuration,
            platform,
        )
    }

    #[must_use]
    pub const fn seeds(&self) -> &SeedVariables {
        &self.seeds
    }

    #[must_use]
    pub fn configuration(&self) -> &str {
        &self.configuration
    }

    #[must_use]
    pub fn platform(&self) -> &str {
        &self.platform
    }
}

/// Interprets definition files, applying assignments to an environment.
pub struct Parser<'a> {
    context: &'a ParseContext,
    env: &'a mut dyn Environment,
    registry: &'a dyn RegistryReader,
    log: &'a mut TransactionLog,
    sink: &'a mut dyn OutputSink,
    /// Canonical paths of the files currently being parsed, outermost first.
    stack: Vec<PathBuf>,
}

impl<'a> Parser<'a> {
    pub fn new(
        context: &'a ParseContext,
        env: &'a mut dyn Environment,
        registry: &'a dyn RegistryReader,
        log: &'a mut TransactionLog,
        sink: &'a mut dyn OutputSink,
    ) -> Self {
        Self {
            context,
            env,
            registry,
            log,
            sink,
            stack: Vec::new(),
        }
    }

    /// Parses `path` and everything it includes.
    ///
    /// Returns `Ok(false)` without touching anything when `path` is not an
    /// existing file.
    ///
    /// # Errors
    ///
    /// Returns the first fatal [`ParseError`] met in this file or any file it
    /// includes. Assignments made before the error stay applied.
    pub fn parse_file(&mut self, path: &Path) -> Result<bool, ParseError> {
        if !path.is_file() {
            debug!(file = %path.display(), "definition file not found");
            return Ok(false);
        }

        let bytes = std::fs::read(path).map_err(|source| ParseError::Read {
            path: path.display().to_string(),
            source,
        })?;
        trace!(file = %path.display(), encoding = ?encoding::detect(&bytes), "decoding");
        let text = encoding::decode(&bytes);

        debug!(file = %path.display(), "parsing definition file");
        self.stack.push(canonical(path));
        let result = self.parse_text(path, &text);
        self.stack.pop();
        result.map(|()| true)
    }

    fn parse_text(&mut self, file: &Path, text: &str) -> Result<(), ParseError> {
        for (index, raw) in text.lines().enumerate() {
            let line = index + 1;
            let directive = directive::parse_line(raw).map_err(|_| ParseError::MalformedLine {
                file: file.display().to_string(),
                line,
            })?;

            match directive {
                None => {}
                Some(Directive::Include { kind, target }) => {
                    self.include(file, line, kind, &target)?;
                }
                Some(Directive::Assign(assignment)) => self.assign(file, line, &assignment)?,
            }
        }
        Ok(())
    }

    fn include(
        &mut self,
        file: &Path,
        line: usize,
        kind: IncludeKind,
        target: &str,
    ) -> Result<(), ParseError> {
        let resolved = self.resolver().resolve(target);
        let path = include_path(file, &resolved);

        if path.is_file() {
            let key = canonical(&path);
            if let Some(start) = self.stack.iter().position(|p| *p == key) {
                let chain = self.stack[start..]
                    .iter()
                    .chain(std::iter::once(&key))
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>()
                    .join(" -> ");
                return Err(ParseError::IncludeCycle {
                    file: file.display().to_string(),
                    line,
                    target: path.display().to_string(),
                    chain,
                });
            }
        }

        if self.parse_file(&path)? {
            return Ok(());
        }

        match kind {
            IncludeKind::Include => {
                debug!(file = %file.display(), line, target = %path.display(), "optional include not found");
                Ok(())
            }
            IncludeKind::ForceInclude => Err(ParseError::MissingForceInclude {
                file: file.display().to_string(),
                line,
                target: path.display().to_string(),
            }),
        }
    }

    fn assign(
        &mut self,
        file: &Path,
        line: usize,
        assignment: &Assignment,
    ) -> Result<(), ParseError> {
        if let Some(condition) = &assignment.condition
            && !condition.matches(self.context.configuration(), self.context.platform())
        {
            trace!(file = %file.display(), line, %condition, "condition not met, skipping");
            return Ok(());
        }

        if assignment.name.is_empty() {
            return Err(ParseError::EmptyName {
                file: file.display().to_string(),
                line,
            });
        }

        let value = self.resolver().resolve(&assignment.value);
        self.log.record(&*self.env, &assignment.name);
        write_and_verify(
            &mut *self.env,
            &mut *self.sink,
            &assignment.name,
            Some(&value),
        );
        Ok(())
    }

    fn resolver(&self) -> Resolver<'_> {
        Resolver::new(self.context.seeds(), &*self.env, self.registry)
    }
}

/// Target of an include directive: relative paths are taken from the
/// including file's directory.
fn include_path(including: &Path, target: &str) -> PathBuf {
    let target = Path::new(target);
    if target.is_absolute() {
        return target.to_path_buf();
    }
    including
        .parent()
        .map_or_else(|| target.to_path_buf(), |dir| dir.join(target))
}

fn canonical(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
