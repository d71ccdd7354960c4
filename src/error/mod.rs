// slnenv-rs: Solution Environment loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!           SlnEnvError (~16 bytes)
//!                  |
//!     +--------+---+----+--------+
//!     |        |        |        |
//!     v        v        v        v
//!   Parse    Host    Config     Io
//!    Box      Box      Box      Box
//!
//! Library entry points that cross module boundaries (`cmd::discover_host`,
//! `cmd::check_outcome`, `Config::validate`) return [`SlnEnvResult`]; the
//! CLI handlers wrap it in `anyhow`.
//!
//! Sub-errors (unboxed internally):
//!   Parse   MalformedLine, EmptyName, MissingForceInclude,
//!           IncludeCycle, Read               (fatal for a pass)
//!   Host    SolutionNotFound, AmbiguousSolution, Read
//!   Config  InvalidValue, NotFound
//! ```
//!
//! Soft conditions (a missing `include` target, a read-back mismatch after
//! writing a variable) are never errors; they are reported through the
//! output sink and parsing continues.

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`SlnEnvError`].
pub type SlnEnvResult<T> = std::result::Result<T, SlnEnvError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum two words wide.
#[derive(Debug, Error)]
pub enum SlnEnvError {
    /// A definition file could not be interpreted.
    #[error("parse error: {0}")]
    Parse(#[from] Box<ParseError>),

    /// The host context could not be established.
    #[error("host error: {0}")]
    Host(#[from] Box<HostError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),
}

macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for SlnEnvError {
                fn from(err: $error) -> Self {
                    SlnEnvError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    ParseError => Parse,
    HostError => Host,
    ConfigError => Config,
    std::io::Error => Io,
}

// --- Parse Errors ---

/// Fatal errors raised while interpreting a `.slnenv` file.
///
/// Any of these aborts the current pass; the file being parsed and all the
/// files that included it are unwound.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Neither a recognised directive nor a `name=value` assignment.
    #[error("Line #{line} of file [{file}] is invalid.  include Filename or name=value expected.")]
    MalformedLine { file: String, line: usize },

    /// An assignment with nothing before the `=` (after the condition).
    #[error("Line #{line} of file [{file}] is invalid.  variable name expected before '='.")]
    EmptyName { file: String, line: usize },

    /// A `forceinclude` target does not exist.
    #[error("Line #{line} of file [{file}] is invalid.  forceinclude [{target}] not found.")]
    MissingForceInclude {
        file: String,
        line: usize,
        target: String,
    },

    /// A file includes itself, directly or through other files.
    #[error("Line #{line} of file [{file}] is invalid.  include [{target}] is already being processed: {chain}")]
    IncludeCycle {
        file: String,
        line: usize,
        target: String,
        chain: String,
    },

    /// The file exists but could not be read.
    #[error("failed to read [{path}]: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl ParseError {
    /// Line number the error points at, if it is tied to a line.
    #[must_use]
    pub const fn line(&self) -> Option<usize> {
        match self {
            Self::MalformedLine { line, .. }
            | Self::EmptyName { line, .. }
            | Self::MissingForceInclude { line, .. }
            | Self::IncludeCycle { line, .. } => Some(*line),
            Self::Read { .. } => None,
        }
    }
}

// --- Host Errors ---

/// Errors establishing the solution context on the command-line host.
#[derive(Debug, Error)]
pub enum HostError {
    /// No solution was given and none was found in the directory.
    #[error("no solution file found in '{dir}'")]
    SolutionNotFound { dir: String },

    /// More than one solution in the directory and none was chosen.
    #[error("several solution files found in '{dir}' ({candidates}); pass --solution")]
    AmbiguousSolution { dir: String, candidates: String },

    /// The solution file could not be read.
    #[error("failed to read solution '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },

    /// Configuration file not found.
    #[error("config file not found: {0}")]
    NotFound(String),
}
