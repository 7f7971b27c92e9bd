/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::error::StreamError;
use crate::traits::BitSeek;
use alloc::vec;
use alloc::vec::Vec;

/// Byte-aligned reads.
///
/// A byte-aligned access starts at [`byte_pos`](BitSeek::byte_pos), ignoring
/// the bit offset of the cursor, so a partially consumed byte is accessed
/// as a whole. After the access the bit offset is zero.
pub trait ByteRead: BitSeek {
    /// Fill `buf` with the bytes at the cursor and advance past them.
    fn read_bytes_into(&mut self, buf: &mut [u8]) -> Result<(), StreamError>;

    /// Read `n` bytes at the cursor.
    fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>, StreamError> {
        self.ensure_ahead(n)?;
        let mut buf = vec![0; n];
        self.read_bytes_into(&mut buf)?;
        Ok(buf)
    }

    #[inline]
    fn read_byte(&mut self) -> Result<u8, StreamError> {
        let mut buf = [0];
        self.read_bytes_into(&mut buf)?;
        Ok(buf[0])
    }

    /// The number of bytes between the cursor and the end of the store.
    fn remaining(&self) -> usize {
        self.len().saturating_sub(self.byte_pos())
    }
}

/// Byte-aligned writes, with the same alignment rules of [`ByteRead`].
pub trait ByteWrite: BitSeek {
    /// Write `data` at the cursor, advance past it, and return the number of
    /// bytes written.
    fn write_bytes(&mut self, data: &[u8]) -> Result<usize, StreamError>;

    #[inline]
    fn write_byte(&mut self, byte: u8) -> Result<usize, StreamError> {
        self.write_bytes(&[byte])
    }
}
