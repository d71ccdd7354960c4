// slnenv-rs: Solution Environment loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Side-effect boundaries of the interpreter.
//!
//! ```text
//!              core
//!               |
//!     +---------+---------+
//!     |         |         |
//!     v         v         v
//!    env     registry   output
//!     |         |         |
//!  Process   Windows   Console
//!  Env       Memory    Tracing
//!            None      Memory
//! ```

pub mod env;
pub mod output;
pub mod registry;
