// slnenv-rs: Solution Environment loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |              show / run / options
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |   config        host      |
//!              |   TOML, SLNENV_*   .sln   |
//!              '-------------+-------------'
//!                            v
//!                  session (triggers, reload)
//!                            |
//!                +-----------+-----------+
//!                v                       v
//!           definition                journal
//!     parse / resolve / seeds    first-write-wins log
//!
//!   +---------------------------------------------+
//!   |  core   env, registry, output sinks         |
//!   +---------------------------------------------+
//!   |  foundation   error, logging, utility       |
//!   +---------------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod core;
pub mod definition;
pub mod error;
pub mod host;
pub mod journal;
pub mod logging;
pub mod session;
pub mod utility;
