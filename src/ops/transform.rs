/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Bytewise transforms over a range.
//!
//! # Example
//! ```
//! use dsi_bitbuffer::prelude::*;
//!
//! let mut stream = ByteStream::new(vec![0x0f; 4]);
//! stream.xor("ab", 0..4, false).unwrap();
//! assert_eq!(stream.as_slice(), &[0x6e, 0x6d, 0x6e, 0x6d]);
//! stream.not(1..3, true).unwrap();
//! assert_eq!(stream.as_slice(), &[0x6e, 0x92, 0x91, 0x6d]);
//! assert_eq!(stream.byte_pos(), 3);
//! ```

use crate::error::StreamError;
use crate::impls::ByteStream;
use crate::traits::*;
use alloc::format;
use alloc::vec::Vec;
use core::ops::Range;

/// The operand of a range transform.
///
/// A scalar key is applied to every byte; a sequence key is applied
/// cyclically, its first byte pairing with the first byte of the range.
/// Strings are converted to their UTF-8 bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub enum Key {
    Scalar(u8),
    Sequence(Vec<u8>),
}

impl Key {
    #[inline(always)]
    fn at(&self, i: usize) -> u8 {
        match self {
            Key::Scalar(k) => *k,
            Key::Sequence(k) => k[i % k.len()],
        }
    }
}

impl From<u8> for Key {
    fn from(k: u8) -> Self {
        Key::Scalar(k)
    }
}

impl From<&str> for Key {
    fn from(k: &str) -> Self {
        Key::Sequence(k.as_bytes().to_vec())
    }
}

impl From<&[u8]> for Key {
    fn from(k: &[u8]) -> Self {
        Key::Sequence(k.to_vec())
    }
}

impl From<Vec<u8>> for Key {
    fn from(k: Vec<u8>) -> Self {
        Key::Sequence(k)
    }
}

/// The operation of a range transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub enum BitOp {
    And,
    Or,
    Xor,
    /// Bitwise complement; the key is ignored.
    Not,
    /// Left shift; shifting by eight or more bits yields zero.
    Shl,
    /// Logical right shift; shifting by eight or more bits yields zero.
    Shr,
    /// Addition modulo 256.
    Add,
}

impl BitOp {
    /// Apply the operation to a single byte.
    #[inline]
    pub fn apply(self, byte: u8, key: u8) -> u8 {
        match self {
            BitOp::And => byte & key,
            BitOp::Or => byte | key,
            BitOp::Xor => byte ^ key,
            BitOp::Not => !byte,
            BitOp::Shl => byte.checked_shl(key as u32).unwrap_or(0),
            BitOp::Shr => byte.checked_shr(key as u32).unwrap_or(0),
            BitOp::Add => byte.wrapping_add(key),
        }
    }
}

impl ByteStream {
    /// Check that `range` is not reversed.
    pub(crate) fn check_range(&self, range: &Range<usize>) -> Result<(), StreamError> {
        if range.start > range.end {
            return Err(self.diagnose(StreamError::Configuration(format!(
                "Range start {} is past its end {}",
                range.start, range.end
            ))));
        }
        Ok(())
    }

    /// Replace every byte `b` of `range` with `op.apply(b, k)`, where `k` is
    /// the matching byte of `key`.
    ///
    /// A range past the end of the store grows elastic streams and fails on
    /// strict ones. If `consume` is true, the cursor moves to `range.end`.
    pub fn transform(
        &mut self,
        op: BitOp,
        key: impl Into<Key>,
        range: Range<usize>,
        consume: bool,
    ) -> Result<(), StreamError> {
        let key = key.into();
        self.check_range(&range)?;
        if matches!(&key, Key::Sequence(k) if k.is_empty()) {
            return Err(self.diagnose(StreamError::Configuration(
                "Empty transform key".into(),
            )));
        }
        self.ensure_len(range.end)?;
        for (i, b) in self.data_mut()[range.clone()].iter_mut().enumerate() {
            *b = op.apply(*b, key.at(i));
        }
        if consume {
            self.set_cursor(range.end as u64 * 8);
        }
        Ok(())
    }

    pub fn and(
        &mut self,
        key: impl Into<Key>,
        range: Range<usize>,
        consume: bool,
    ) -> Result<(), StreamError> {
        self.transform(BitOp::And, key, range, consume)
    }

    pub fn or(
        &mut self,
        key: impl Into<Key>,
        range: Range<usize>,
        consume: bool,
    ) -> Result<(), StreamError> {
        self.transform(BitOp::Or, key, range, consume)
    }

    pub fn xor(
        &mut self,
        key: impl Into<Key>,
        range: Range<usize>,
        consume: bool,
    ) -> Result<(), StreamError> {
        self.transform(BitOp::Xor, key, range, consume)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(&mut self, range: Range<usize>, consume: bool) -> Result<(), StreamError> {
        self.transform(BitOp::Not, 0_u8, range, consume)
    }

    pub fn shl(
        &mut self,
        key: impl Into<Key>,
        range: Range<usize>,
        consume: bool,
    ) -> Result<(), StreamError> {
        self.transform(BitOp::Shl, key, range, consume)
    }

    pub fn shr(
        &mut self,
        key: impl Into<Key>,
        range: Range<usize>,
        consume: bool,
    ) -> Result<(), StreamError> {
        self.transform(BitOp::Shr, key, range, consume)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn add(
        &mut self,
        key: impl Into<Key>,
        range: Range<usize>,
        consume: bool,
    ) -> Result<(), StreamError> {
        self.transform(BitOp::Add, key, range, consume)
    }
}
