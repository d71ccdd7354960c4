// slnenv-rs: Solution Environment loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Text decoding for definition and solution files.
//!
//! ```text
//! bytes
//!   BOM EF BB BF  --> UTF-8
//!   BOM FF FE     --> UTF-16 LE
//!   BOM FE FF     --> UTF-16 BE
//!   valid UTF-8   --> UTF-8
//!   otherwise     --> Windows-1252 (files saved as "ANSI")
//! ```
//!
//! Uses `encoding_rs`. Invalid sequences → U+FFFD.

use encoding_rs::{UTF_8, UTF_16BE, UTF_16LE, WINDOWS_1252};
use std::borrow::Cow;
use std::path::Path;

/// Encoding detected for a file's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// UTF-8 without BOM
    Utf8,
    /// UTF-8 with BOM
    Utf8Bom,
    /// UTF-16 Little Endian, BOM required
    Utf16Le,
    /// UTF-16 Big Endian, BOM required
    Utf16Be,
    /// Windows-1252, the usual "ANSI" code page
    Windows1252,
}

/// Detects the encoding of `bytes`.
#[must_use]
pub fn detect(bytes: &[u8]) -> Encoding {
    match encoding_rs::Encoding::for_bom(bytes) {
        Some((enc, _)) if enc == UTF_8 => Encoding::Utf8Bom,
        Some((enc, _)) if enc == UTF_16LE => Encoding::Utf16Le,
        Some((enc, _)) if enc == UTF_16BE => Encoding::Utf16Be,
        _ if std::str::from_utf8(bytes).is_ok() => Encoding::Utf8,
        _ => Encoding::Windows1252,
    }
}

/// Decodes `bytes` to UTF-8, stripping any BOM.
///
/// # Example
/// ```
/// use slnenv_rs::utility::encoding::decode;
///
/// assert_eq!(decode(b"caf\xe9"), "café");
/// assert_eq!(decode(b"\xef\xbb\xbfA=1"), "A=1");
/// ```
#[must_use]
pub fn decode(bytes: &[u8]) -> Cow<'_, str> {
    match detect(bytes) {
        Encoding::Utf8 => String::from_utf8_lossy(bytes),
        Encoding::Utf8Bom => UTF_8.decode_with_bom_removal(bytes).0,
        Encoding::Utf16Le => UTF_16LE.decode_with_bom_removal(bytes).0,
        Encoding::Utf16Be => UTF_16BE.decode_with_bom_removal(bytes).0,
        Encoding::Windows1252 => WINDOWS_1252.decode_without_bom_handling(bytes).0,
    }
}

/// Reads a whole file and decodes it with [`decode`].
///
/// # Errors
///
/// Returns the I/O error if the file cannot be read.
pub fn read_text_file(path: &Path) -> std::io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(decode(&bytes).into_owned())
}
