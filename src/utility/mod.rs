// slnenv-rs: Solution Environment loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Utility modules.
//!
//! ```text
//! encoding
//!   detect()          BOM / UTF-8 / Windows-1252 sniffing
//!   decode()          bytes --> UTF-8
//!   read_text_file()  fs::read + decode
//! ```

pub mod encoding;
