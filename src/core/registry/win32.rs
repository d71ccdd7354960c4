// slnenv-rs: Solution Environment loader
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Registry access through `RegGetValueW`.
//!
//! ```text
//! read(root, key, value)
//!   RegGetValueW(size query) --> buffer --> RegGetValueW(data)
//!   REG_SZ / REG_EXPAND_SZ (expanded) --> UTF-16 decode
//!   REG_DWORD / REG_QWORD             --> decimal
//! ```

use super::{RegistryReader, RegistryRoot};
use tracing::trace;
use windows::Win32::Foundation::ERROR_SUCCESS;
use windows::Win32::System::Registry::{
    HKEY, HKEY_CURRENT_USER, HKEY_LOCAL_MACHINE, REG_DWORD, REG_QWORD, REG_SZ, REG_VALUE_TYPE,
    RRF_RT_REG_DWORD, RRF_RT_REG_QWORD, RRF_RT_REG_SZ, RegGetValueW,
};
use windows::core::{HSTRING, PCWSTR};

/// The registry of the running machine, opened read-only per lookup.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowsRegistry;

const fn hive(root: RegistryRoot) -> HKEY {
    match root {
        RegistryRoot::LocalMachine => HKEY_LOCAL_MACHINE,
        RegistryRoot::CurrentUser => HKEY_CURRENT_USER,
    }
}

fn decode(kind: REG_VALUE_TYPE, data: &[u8]) -> Option<String> {
    if kind == REG_SZ {
        let units: Vec<u16> = data
            .chunks_exact(2)
            .map(|c| u16::from_le_bytes([c[0], c[1]]))
            .take_while(|&u| u != 0)
            .collect();
        Some(String::from_utf16_lossy(&units))
    } else if kind == REG_DWORD {
        let bytes: [u8; 4] = data.get(..4)?.try_into().ok()?;
        Some(u32::from_le_bytes(bytes).to_string())
    } else if kind == REG_QWORD {
        let bytes: [u8; 8] = data.get(..8)?.try_into().ok()?;
        Some(u64::from_le_bytes(bytes).to_string())
    } else {
        None
    }
}

impl RegistryReader for WindowsRegistry {
    fn read(&self, root: RegistryRoot, key_path: &str, value_name: &str) -> Option<String> {
        let subkey = HSTRING::from(key_path);
        let name = HSTRING::from(value_name);
        let flags = RRF_RT_REG_SZ | RRF_RT_REG_DWORD | RRF_RT_REG_QWORD;

        let mut kind = REG_VALUE_TYPE::default();
        let mut size = 0u32;
        // SAFETY: both strings are NUL-terminated and outlive the call; the
        // out-pointers reference live locals.
        let status = unsafe {
            RegGetValueW(
                hive(root),
                PCWSTR::from_raw(subkey.as_ptr()),
                PCWSTR::from_raw(name.as_ptr()),
                flags,
                Some(&raw mut kind),
                None,
                Some(&raw mut size),
            )
        };
        if status != ERROR_SUCCESS {
            trace!(%root, key_path, value_name, code = status.0, "registry value not found");
            return None;
        }

        let mut buffer = vec![0u8; size as usize];
        // SAFETY: `buffer` holds `size` bytes, as reported by the first call.
        let status = unsafe {
            RegGetValueW(
                hive(root),
                PCWSTR::from_raw(subkey.as_ptr()),
                PCWSTR::from_raw(name.as_ptr()),
                flags,
                Some(&raw mut kind),
                Some(buffer.as_mut_ptr().cast()),
                Some(&raw mut size),
            )
        };
        if status != ERROR_SUCCESS {
            trace!(%root, key_path, value_name, code = status.0, "registry value read failed");
            return None;
        }

        buffer.truncate(size as usize);
        decode(kind, &buffer)
    }
}
