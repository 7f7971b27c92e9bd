/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Splicing of byte ranges.
//!
//! Operations that change the length of the store, or write bytes
//! independently of the cursor ([`delete`](ByteStream::delete),
//! [`insert`](ByteStream::insert), and [`replace`](ByteStream::replace)), are
//! forbidden on strict streams and fail with
//! [`StreamError::InvalidOperation`]. [`extract`](ByteStream::extract) and
//! [`fill`](ByteStream::fill) follow the bounds policy.
//!
//! # Example
//! ```
//! use dsi_bitbuffer::prelude::*;
//!
//! let mut stream = ByteStream::new(b"hello world".to_vec());
//! assert_eq!(stream.delete(5..11, false).unwrap(), b" world");
//! stream.insert(b", bits", 5, true).unwrap();
//! assert_eq!(stream.as_slice(), b"hello, bits");
//! assert_eq!(stream.byte_pos(), 11);
//! assert_eq!(stream.extract(0..5, false).unwrap(), b"hello");
//! ```

use crate::error::StreamError;
use crate::impls::ByteStream;
use crate::traits::*;
use alloc::format;
use alloc::vec::Vec;
use core::ops::Range;

impl ByteStream {
    fn check_elastic(&self, op: &str) -> Result<(), StreamError> {
        if self.is_strict() {
            return Err(self.diagnose(StreamError::InvalidOperation(format!(
                "Cannot {} on a strict stream",
                op
            ))));
        }
        Ok(())
    }

    /// Move the cursor to `byte` if `consume` is true.
    #[inline]
    fn consume_to(&mut self, byte: usize, consume: bool) {
        if consume {
            self.set_cursor(byte as u64 * 8);
        }
    }

    /// Remove the bytes in `range` from the store and return them.
    ///
    /// The range is clamped to the store. If `consume` is true, the cursor
    /// moves to `range.start`; otherwise, it stays put, unless it is past the
    /// new end of the store, in which case it moves there.
    pub fn delete(&mut self, range: Range<usize>, consume: bool) -> Result<Vec<u8>, StreamError> {
        self.check_elastic("delete bytes")?;
        self.check_range(&range)?;
        let len = self.len();
        let (start, end) = (range.start.min(len), range.end.min(len));
        let removed: Vec<u8> = self.data_mut().drain(start..end).collect();
        let end_pos = self.len() as u64 * 8;
        if self.bit_pos() > end_pos {
            self.set_cursor(end_pos);
        }
        self.consume_to(range.start.min(self.len()), consume);
        Ok(removed)
    }

    /// Return a copy of the bytes in `range`.
    ///
    /// A range past the end of the store grows elastic streams and fails on
    /// strict ones. If `consume` is true, the cursor moves to `range.end`.
    pub fn extract(&mut self, range: Range<usize>, consume: bool) -> Result<Vec<u8>, StreamError> {
        self.check_range(&range)?;
        self.ensure_len(range.end)?;
        let bytes = self.as_slice()[range.clone()].to_vec();
        self.consume_to(range.end, consume);
        Ok(bytes)
    }

    /// Insert `data` before the byte at position `at` and return the number of
    /// bytes inserted.
    ///
    /// If `at` is past the end of the store, the store is first extended with
    /// zeros up to `at`. If `consume` is true, the cursor moves to the end of
    /// the inserted bytes.
    pub fn insert(&mut self, data: &[u8], at: usize, consume: bool) -> Result<usize, StreamError> {
        self.check_elastic("insert bytes")?;
        self.ensure_len(at)?;
        self.data_mut().splice(at..at, data.iter().copied());
        self.consume_to(at + data.len(), consume);
        Ok(data.len())
    }

    /// Overwrite the bytes starting at position `at` with `data` and return
    /// the number of bytes written, growing the store as needed.
    ///
    /// If `consume` is true, the cursor moves to the end of the written bytes.
    pub fn replace(&mut self, data: &[u8], at: usize, consume: bool) -> Result<usize, StreamError> {
        self.check_elastic("replace bytes")?;
        let end = at + data.len();
        self.ensure_len(end)?;
        self.data_mut()[at..end].copy_from_slice(data);
        self.consume_to(end, consume);
        Ok(data.len())
    }

    /// Set every byte in `range` to `value`.
    ///
    /// A range past the end of the store grows elastic streams and fails on
    /// strict ones. If `consume` is true, the cursor moves to `range.end`.
    pub fn fill(
        &mut self,
        value: u8,
        range: Range<usize>,
        consume: bool,
    ) -> Result<(), StreamError> {
        self.check_range(&range)?;
        self.ensure_len(range.end)?;
        self.data_mut()[range.clone()].fill(value);
        self.consume_to(range.end, consume);
        Ok(())
    }
}
