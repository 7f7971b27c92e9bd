/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::error::StreamError;
use crate::impls::bitfield;
use crate::traits::*;
use alloc::format;
use alloc::vec::Vec;
#[cfg(feature = "mem_dbg")]
use mem_dbg::{MemDbg, MemSize};

/// Construction parameters of a [`ByteStream`].
///
/// # Example
/// ```
/// use dsi_bitbuffer::prelude::*;
///
/// let config = StreamConfig::default().endian(BE).strict(true).byte_offset(2);
/// let stream = ByteStream::with_config(vec![0; 4], config).unwrap();
/// assert_eq!(stream.byte_pos(), 2);
/// assert_eq!(stream.endian(), BE);
/// assert!(stream.is_strict());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
#[cfg_attr(feature = "mem_dbg", mem_size(flat))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StreamConfig {
    /// Initial byte offset of the cursor.
    pub byte_offset: usize,
    /// Initial bit offset of the cursor; must be in `0..8`.
    pub bit_offset: u8,
    /// Default endianness.
    pub endian: Endian,
    /// Whether the store has a fixed size.
    pub strict: bool,
    /// Whether to print a hex dump around the cursor on standard error
    /// before returning an error.
    pub debug: bool,
}

impl StreamConfig {
    pub fn byte_offset(mut self, byte_offset: usize) -> Self {
        self.byte_offset = byte_offset;
        self
    }

    pub fn bit_offset(mut self, bit_offset: u8) -> Self {
        self.bit_offset = bit_offset;
        self
    }

    pub fn endian(mut self, endian: Endian) -> Self {
        self.endian = endian;
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

/// A bit-addressable stream over an owned, growable byte store.
///
/// The stream couples a `Vec<u8>` with a cursor made of a byte offset and a
/// bit offset, a default [`Endian`], and a bounds policy: elastic streams
/// (the default) grow the store with zeros whenever an access goes past its
/// end, whereas strict streams fail with [`StreamError::Capacity`].
///
/// Most functionality comes from the traits in [`traits`](crate::traits) and
/// from the extension traits in [`codes`](crate::codes), which are
/// implemented for any stream; the region editing and range transform
/// operations of [`ops`](crate::ops) are inherent methods.
///
/// Growth, insertion and deletion may reallocate the store, so slices
/// obtained through [`as_slice`](ByteStream::as_slice) must be obtained anew
/// after such operations (the borrow checker enforces this).
///
/// # Example
/// ```
/// use dsi_bitbuffer::prelude::*;
///
/// let mut stream = ByteStream::new(vec![0_u8; 1]);
/// stream.write_field(5, 3, true, Some(BE)).unwrap();
/// stream.write_field(3, 3, true, Some(BE)).unwrap();
/// assert_eq!(stream.as_slice(), &[0b1010_1100]);
/// assert_eq!(stream.bit_offset(), 6);
///
/// stream.goto(0, 0).unwrap();
/// assert_eq!(stream.read_field(3, true, Some(BE)).unwrap(), 5);
/// assert_eq!(stream.read_field(3, true, Some(BE)).unwrap(), 3);
///
/// // Elastic streams grow as needed
/// stream.align().unwrap();
/// stream.write_int(0x01020304_u32, None).unwrap();
/// assert_eq!(stream.len(), 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
pub struct ByteStream {
    data: Vec<u8>,
    offset: usize,
    bit_offset: u8,
    endian: Endian,
    strict: bool,
    debug: bool,
}

impl ByteStream {
    /// Create a little-endian, elastic stream over `data` with the cursor at
    /// the start.
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: data.into(),
            ..Default::default()
        }
    }

    /// Create a stream over `data` using the given configuration.
    ///
    /// A bit offset greater than seven is a configuration error; an initial
    /// position past the end of `data` grows an elastic stream and is an
    /// error for a strict stream.
    pub fn with_config(
        data: impl Into<Vec<u8>>,
        config: StreamConfig,
    ) -> Result<Self, StreamError> {
        let mut stream = Self {
            data: data.into(),
            offset: 0,
            bit_offset: 0,
            endian: config.endian,
            strict: config.strict,
            debug: config.debug,
        };
        if config.bit_offset > 7 {
            return Err(stream.diagnose(StreamError::Configuration(format!(
                "Bit offset {} is not in 0..8",
                config.bit_offset
            ))));
        }
        stream.goto(config.byte_offset, config.bit_offset as u64)?;
        Ok(stream)
    }

    pub fn set_endian(&mut self, endian: Endian) {
        self.endian = endian;
    }

    /// Switch between the strict and elastic bounds policies.
    pub fn set_strict(&mut self, strict: bool) {
        self.strict = strict;
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Enable or disable the hex dump printed before returning errors.
    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }

    /// Direct access to the store for the region editing operations.
    pub(crate) fn data_mut(&mut self) -> &mut Vec<u8> {
        &mut self.data
    }

    /// Move the cursor without any check.
    #[inline(always)]
    pub(crate) fn set_cursor(&mut self, bit_pos: u64) {
        self.offset = (bit_pos / 8) as usize;
        self.bit_offset = (bit_pos % 8) as u8;
    }

    #[inline]
    fn check_width(&self, n: u32) -> Result<(), StreamError> {
        if n > 32 {
            return Err(self.diagnose(StreamError::Configuration(format!(
                "Bit width {} is not in 1..=32",
                n
            ))));
        }
        Ok(())
    }
}

impl BitSeek for ByteStream {
    #[inline(always)]
    fn endian(&self) -> Endian {
        self.endian
    }

    #[inline(always)]
    fn len(&self) -> usize {
        self.data.len()
    }

    #[inline(always)]
    fn byte_pos(&self) -> usize {
        self.offset
    }

    #[inline(always)]
    fn bit_offset(&self) -> u8 {
        self.bit_offset
    }

    fn ensure_len(&mut self, required: usize) -> Result<(), StreamError> {
        if required <= self.data.len() {
            return Ok(());
        }
        if self.strict {
            return Err(self.diagnose(StreamError::Capacity {
                required,
                size: self.data.len(),
            }));
        }
        if self.data.try_reserve_exact(required - self.data.len()).is_err() {
            return Err(self.diagnose(StreamError::Capacity {
                required,
                size: self.data.len(),
            }));
        }
        self.data.resize(required, 0);
        Ok(())
    }

    fn set_bit_pos(&mut self, bit_pos: u64) -> Result<(), StreamError> {
        self.ensure_len(bit_pos.div_ceil(8) as usize)?;
        self.set_cursor(bit_pos);
        Ok(())
    }

    fn diagnose(&self, err: StreamError) -> StreamError {
        #[cfg(feature = "std")]
        if self.debug {
            let start = self.offset.saturating_sub(32);
            let end = self.offset.saturating_add(32);
            eprintln!(
                "{} (byte {}, bit {})\n{}",
                err,
                self.offset,
                self.bit_offset,
                self.hex_dump(start..end)
            );
        }
        err
    }
}

impl BitRead for ByteStream {
    fn read_bits(&mut self, n: u32, endian: Endian) -> Result<u32, StreamError> {
        if n == 0 {
            return Ok(0);
        }
        self.check_width(n)?;
        let start = self.bit_pos();
        self.ensure_len((start + n as u64).div_ceil(8) as usize)?;
        let value = bitfield::unpack(&self.data, start, n, endian);
        self.set_cursor(start + n as u64);
        Ok(value)
    }
}

impl BitWrite for ByteStream {
    fn write_bits(&mut self, value: u32, n: u32, endian: Endian) -> Result<usize, StreamError> {
        if n == 0 {
            return Ok(0);
        }
        self.check_width(n)?;
        if n < 32 && value >> n != 0 {
            return Err(self.diagnose(StreamError::Range(format!(
                "{} does not fit in {} unsigned bits",
                value, n
            ))));
        }
        let start = self.bit_pos();
        self.ensure_len((start + n as u64).div_ceil(8) as usize)?;
        bitfield::pack(&mut self.data, start, value, n, endian);
        self.set_cursor(start + n as u64);
        Ok(n as usize)
    }
}

impl ByteRead for ByteStream {
    fn read_bytes_into(&mut self, buf: &mut [u8]) -> Result<(), StreamError> {
        let start = self.offset;
        let end = start + buf.len();
        self.ensure_len(end)?;
        buf.copy_from_slice(&self.data[start..end]);
        self.offset = end;
        self.bit_offset = 0;
        Ok(())
    }
}

impl ByteWrite for ByteStream {
    fn write_bytes(&mut self, data: &[u8]) -> Result<usize, StreamError> {
        let start = self.offset;
        let end = start + data.len();
        self.ensure_len(end)?;
        self.data[start..end].copy_from_slice(data);
        self.offset = end;
        self.bit_offset = 0;
        Ok(data.len())
    }
}

impl From<Vec<u8>> for ByteStream {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data)
    }
}
