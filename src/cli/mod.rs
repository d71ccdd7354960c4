// slnenv-rs: Solution Environment loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for slnenv-rs using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! slnenv [global options] <command>
//! show [--json]
//! run -- <program> [args...]
//! options
//! inis
//! version
//! ```

pub mod global;


use crate::cli::global::GlobalOptions;
use clap::{Args, Parser, Subcommand};

/// Solution Environment
///
/// Loads `<solution>.slnenv` definition files.
#[derive(Debug, Parser)]
#[command(
    name = "slnenv",
    author,
    version,
    about = "Solution Environment loader",
    long_about = "slnenv-rs Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Applies the environment variables defined in a solution's\n\
                  .slnenv file. `slnenv show` prints what would be set, and\n\
                  `slnenv run -- msbuild App.sln` runs a program with the\n\
                  solution environment applied.",
    after_help = "DEFINITION FILES:\n\n\
                  The root definition file sits next to the solution and has the\n\
                  same name with the .slnenv extension. Lines are `-- comments`,\n\
                  `include FILE`, `forceinclude FILE`, `NAME=value` and\n\
                  `Configuration|Platform:NAME=value`. Values may reference\n\
                  $(Name) variables and %(HKLM\\Key\\Value) registry values."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Lists all options and their values from the INIs.
    Options,

    /// Lists the INIs used by slnenv.
    Inis,

    /// Shows what the solution environment would set, without changing
    /// anything.
    Show(ShowArgs),

    /// Applies the solution environment and runs a program with it.
    Run(RunArgs),
}

/// Arguments for the `show` command.
#[derive(Debug, Clone, Default, Args)]
pub struct ShowArgs {
    /// Prints the changed variables as JSON instead of report lines.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `run` command.
#[derive(Debug, Clone, Default, Args)]
pub struct RunArgs {
    /// Runs the program even if the definition file fails to load.
    #[arg(long = "keep-going")]
    pub keep_going: bool,

    /// Program and its arguments.
    #[arg(
        value_name = "PROGRAM",
        required = true,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub command: Vec<String>,
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
