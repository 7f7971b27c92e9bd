/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::error::StreamError;
use crate::traits::Endian;

/// Cursor and bounds management shared by all streams.
///
/// The cursor is a byte offset plus a bit offset in `0..8`; the logical bit
/// position is `byte_pos() * 8 + bit_offset()`. Every method that moves the
/// cursor or touches bytes consults the bounds policy through
/// [`ensure_len`](BitSeek::ensure_len) first, so that failures never leave
/// the stream partially modified.
pub trait BitSeek {
    /// The default endianness of the stream.
    fn endian(&self) -> Endian;

    /// The length in bytes of the underlying store.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The byte offset of the cursor.
    fn byte_pos(&self) -> usize;

    /// The bit offset of the cursor inside the current byte (`0..8`).
    fn bit_offset(&self) -> u8;

    /// The logical bit position of the cursor.
    #[inline(always)]
    fn bit_pos(&self) -> u64 {
        self.byte_pos() as u64 * 8 + self.bit_offset() as u64
    }

    /// Make sure that the store is at least `required` bytes long.
    ///
    /// Elastic streams grow the store with zeros; strict streams fail with
    /// [`StreamError::Capacity`].
    fn ensure_len(&mut self, required: usize) -> Result<(), StreamError>;

    /// Make sure that the `n` bytes starting at [`byte_pos`](BitSeek::byte_pos)
    /// are addressable.
    ///
    /// Sizes past the address space saturate, and thus always fail.
    #[inline]
    fn ensure_ahead(&mut self, n: usize) -> Result<(), StreamError> {
        self.ensure_len(self.byte_pos().saturating_add(n))
    }

    /// Move the cursor to the absolute bit position `bit_pos`.
    ///
    /// The byte containing the target position must be addressable, which may
    /// grow an elastic stream.
    fn set_bit_pos(&mut self, bit_pos: u64) -> Result<(), StreamError>;

    /// Hook invoked on every error before it is returned to the caller.
    ///
    /// The default implementation returns the error unchanged; streams may
    /// use it to print diagnostics.
    #[inline(always)]
    fn diagnose(&self, err: StreamError) -> StreamError {
        err
    }

    /// Absolute seek in byte and bit units; bits beyond seven carry into the
    /// byte offset.
    fn goto(&mut self, byte: usize, bit: u64) -> Result<(), StreamError> {
        self.set_bit_pos(byte as u64 * 8 + bit)
    }

    /// Relative seek in byte and bit units. Both amounts may be negative; the
    /// target is clamped at the start of the stream.
    fn skip(&mut self, bytes: i64, bits: i64) -> Result<(), StreamError> {
        let target = self.bit_pos() as i128 + bytes as i128 * 8 + bits as i128;
        self.set_bit_pos(target.max(0) as u64)
    }

    /// Move the cursor to the next byte boundary, if it is not already on one.
    fn align(&mut self) -> Result<(), StreamError> {
        match self.bit_offset() {
            0 => Ok(()),
            bit => self.skip(0, 8 - bit as i64),
        }
    }
}

/// Bit-granular reads of fields of 1 to 32 bits.
pub trait BitRead: BitSeek {
    /// Read an unsigned field of `n` bits at the cursor and advance it by `n`
    /// bits.
    ///
    /// Reading zero bits returns zero and leaves the cursor untouched; widths
    /// greater than 32 fail with [`StreamError::Configuration`].
    fn read_bits(&mut self, n: u32, endian: Endian) -> Result<u32, StreamError>;

    /// Like [`read_bits`](BitRead::read_bits), but without moving the cursor.
    fn peek_bits(&mut self, n: u32, endian: Endian) -> Result<u32, StreamError> {
        let pos = self.bit_pos();
        let value = self.read_bits(n, endian)?;
        self.set_bit_pos(pos)?;
        Ok(value)
    }
}

/// Bit-granular writes of fields of 1 to 32 bits.
pub trait BitWrite: BitSeek {
    /// Write the lowest `n` bits of `value` at the cursor and return the
    /// number of bits written, that is, `n`.
    ///
    /// Bits of `value` above the `n`-th must be zero, or the call fails with
    /// [`StreamError::Range`]. Bits of the store outside the field are
    /// preserved.
    fn write_bits(&mut self, value: u32, n: u32, endian: Endian) -> Result<usize, StreamError>;
}
