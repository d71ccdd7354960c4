// slnenv-rs: Solution Environment loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Line-oriented diagnostic output.
//!
//! ```text
//!           OutputSink (trait)
//!            write_line(&str)
//!        |         |           |
//!        v         v           v
//!  ConsoleSink  TracingSink  MemorySink
//!  stdout or    info! event  Vec<String>
//!  stderr                    (tests)
//! ```
//!
//! Everything a reload reports (applied variables, failures, the final
//! "loaded" or "error" line) goes through a sink. There is no other
//! user-visible error surface.


use std::io::Write as _;
use tracing::info;

/// Receives report lines, one call per line, without trailing newline.
pub trait OutputSink {
    fn write_line(&mut self, line: &str);
}

impl<S: OutputSink + ?Sized> OutputSink for &mut S {
    fn write_line(&mut self, line: &str) {
        (**self).write_line(line);
    }
}

impl<S: OutputSink + ?Sized> OutputSink for Box<S> {
    fn write_line(&mut self, line: &str) {
        (**self).write_line(line);
    }
}

/// Which standard stream a [`ConsoleSink`] writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stream {
    #[default]
    Stdout,
    Stderr,
}

/// Writes each line to stdout or stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink {
    stream: Stream,
}

impl ConsoleSink {
    #[must_use]
    pub const fn stdout() -> Self {
        Self {
            stream: Stream::Stdout,
        }
    }

    #[must_use]
    pub const fn stderr() -> Self {
        Self {
            stream: Stream::Stderr,
        }
    }

    #[must_use]
    pub const fn stream(&self) -> Stream {
        self.stream
    }
}

impl OutputSink for ConsoleSink {
    fn write_line(&mut self, line: &str) {
        // A closed pipe must not abort a pass halfway through.
        let _ = match self.stream {
            Stream::Stdout => writeln!(std::io::stdout().lock(), "{line}"),
            Stream::Stderr => writeln!(std::io::stderr().lock(), "{line}"),
        };
    }
}

/// Forwards each line as an `info` event with target `slnenv_rs::output`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl OutputSink for TracingSink {
    fn write_line(&mut self, line: &str) {
        info!(target: "slnenv_rs::output", "{line}");
    }
}

/// Collects lines in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    lines: Vec<String>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Returns and forgets everything collected so far.
    pub fn take(&mut self) -> Vec<String> {
        std::mem::take(&mut self.lines)
    }
}

impl OutputSink for MemorySink {
    fn write_line(&mut self, line: &str) {
        self.lines.push(line.to_owned());
    }
}
