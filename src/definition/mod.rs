// slnenv-rs: Solution Environment loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The `.slnenv` definition-file interpreter.
//!
//! # File Format
//!
//! ```text
//! -- comment
//! include relative/or/absolute/path        (missing file silently skipped)
//! forceinclude relative/or/absolute/path   (missing file is fatal)
//! NAME=value
//! Configuration|Platform:NAME=value        (either side of | optional)
//! Configuration:NAME=value
//! |Platform:NAME=value
//! ```
//!
//! Values and include targets may contain `$(Name)` (seed variable or
//! environment variable) and `%(HKLM\Key\Value)` / `%(HKCU\...)` tokens.
//!
//! # Pipeline
//!
//! ```text
//! line --> directive --> condition --> resolve --> journal --> environment
//!                                         ^
//!                               seeds, env, registry
//! ```

pub mod condition;
pub mod directive;
pub mod parser;
pub mod resolve;
pub mod seeds;

#[cfg(test)]
mod tests;

pub use condition::Condition;
pub use parser::{ParseContext, Parser};
pub use seeds::SeedVariables;

/// Extension of definition files.
pub const EXTENSION: &str = "slnenv";
