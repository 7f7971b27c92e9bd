/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::error::StreamError;
use alloc::format;
#[cfg(feature = "mem_dbg")]
use mem_dbg::{MemDbg, MemSize};

/// Byte order of multi-byte values, and bit order inside bitfields.
///
/// For multi-byte values [`Endian::Big`] stores the most significant byte
/// first. For bitfields [`Endian::Big`] fills each byte starting from its most
/// significant bit, so the first bits of the stream are the most significant
/// bits of the field; [`Endian::Little`] fills each byte starting from its
/// least significant bit, so the first bits of the stream are the least
/// significant bits of the field.
///
/// Streams store a default endianness; most operations accept an
/// `Option<Endian>` that overrides it for a single call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
#[cfg_attr(feature = "mem_dbg", mem_size(flat))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub enum Endian {
    Big,
    #[default]
    Little,
}

/// Alias for [`Endian::Big`].
pub const BE: Endian = Endian::Big;

/// Alias for [`Endian::Little`].
pub const LE: Endian = Endian::Little;

impl Endian {
    /// The endianness of the current target.
    #[cfg(target_endian = "little")]
    pub const NATIVE: Endian = Endian::Little;
    /// The endianness of the current target.
    #[cfg(target_endian = "big")]
    pub const NATIVE: Endian = Endian::Big;

    /// Resolves a per-call override against a stream default.
    #[inline(always)]
    pub fn or(endian: Option<Endian>, default: Endian) -> Endian {
        endian.unwrap_or(default)
    }
}

impl core::str::FromStr for Endian {
    type Err = StreamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let is = |t: &str| s.eq_ignore_ascii_case(t);
        if is("big") || is("be") {
            Ok(Endian::Big)
        } else if is("little") || is("le") {
            Ok(Endian::Little)
        } else {
            Err(StreamError::Configuration(format!(
                "Unknown endianness {:?}: expected \"big\" or \"little\"",
                s
            )))
        }
    }
}

impl core::fmt::Display for Endian {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Endian::Big => f.write_str("big"),
            Endian::Little => f.write_str("little"),
        }
    }
}
