// slnenv-rs: Solution Environment loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Classification of a single definition-file line.
//!
//! ```text
//! line.trim()
//!   ""            --> None
//!   "-- ..."      --> None
//!   no '='        --> "include X" | "forceinclude X" | MalformedLine
//!   "[cond:]n=v"  --> Assign
//! ```

use super::condition::Condition;

/// How a missing include target is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncludeKind {
    /// `include`: a missing file contributes nothing.
    Include,
    /// `forceinclude`: a missing file is fatal.
    ForceInclude,
}

impl IncludeKind {
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Include => "include",
            Self::ForceInclude => "forceinclude",
        }
    }
}

/// A `[condition:]name=value` line. `value` is still unresolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub condition: Option<Condition>,
    pub name: String,
    pub value: String,
}

/// One meaningful line of a definition file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    Include { kind: IncludeKind, target: String },
    Assign(Assignment),
}

/// The line is neither a directive nor an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MalformedLine;

/// Classifies one raw line.
///
/// Returns `Ok(None)` for blank lines and `--` comments. The assignment name
/// may come back empty; whether that matters depends on the condition, which
/// the caller evaluates first.
///
/// # Errors
///
/// Returns [`MalformedLine`] when a line without `=` is not an `include` or
/// `forceinclude` directive with an argument.
pub fn parse_line(line: &str) -> Result<Option<Directive>, MalformedLine> {
    let line = line.trim();
    if line.is_empty() || line.starts_with("--") {
        return Ok(None);
    }

    let Some((name, value)) = line.split_once('=') else {
        return parse_command(line).map(Some);
    };

    let name = name.trim();
    let (condition, name) = match name.split_once(':') {
        Some((clause, rest)) => (Some(Condition::parse(clause)), rest.trim()),
        None => (None, name),
    };

    Ok(Some(Directive::Assign(Assignment {
        condition,
        name: name.to_owned(),
        value: value.trim().to_owned(),
    })))
}

fn parse_command(line: &str) -> Result<Directive, MalformedLine> {
    let (command, argument) = line
        .split_once(char::is_whitespace)
        .ok_or(MalformedLine)?;

    let kind = if command.eq_ignore_ascii_case(IncludeKind::Include.keyword()) {
        IncludeKind::Include
    } else if command.eq_ignore_ascii_case(IncludeKind::ForceInclude.keyword()) {
        IncludeKind::ForceInclude
    } else {
        return Err(MalformedLine);
    };

    Ok(Directive::Include {
        kind,
        target: argument.trim().to_owned(),
    })
}
