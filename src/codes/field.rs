/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Signed and unsigned bitfields of 1 to 32 bits.
//!
//! A signed field of `n` bits holds values in [-2<sup>*n*–1</sup> . .
//! 2<sup>*n*–1</sup>) in two's complement; an unsigned field holds values in
//! [0 . . 2<sup>*n*</sup>). Fields may start at any bit position and straddle
//! byte boundaries; see [`bitfield`](crate::impls::bitfield) for the bit
//! layout.
//!
//! After an operation on `n` bits the cursor has advanced by exactly `n`
//! bits; operations on zero bits do nothing.

use crate::error::StreamError;
use crate::impls::bitfield::sign_extend;
use crate::traits::*;
use alloc::format;
use num_traits::ToPrimitive;

/// Trait for reading bitfields.
pub trait FieldRead: BitRead {
    /// Read a field of `bits` bits, sign-extending it unless `unsigned` is
    /// true.
    ///
    /// If `endian` is `None`, the default endianness of the stream is used.
    fn read_field(
        &mut self,
        bits: u32,
        unsigned: bool,
        endian: Option<Endian>,
    ) -> Result<i64, StreamError> {
        let raw = self.read_bits(bits, Endian::or(endian, self.endian()))?;
        if unsigned || bits == 0 {
            Ok(raw as i64)
        } else {
            Ok(sign_extend(raw as u64, bits))
        }
    }

    #[inline]
    fn read_ubits(&mut self, bits: u32, endian: Option<Endian>) -> Result<u32, StreamError> {
        self.read_bits(bits, Endian::or(endian, self.endian()))
    }

    #[inline]
    fn read_sbits(&mut self, bits: u32, endian: Option<Endian>) -> Result<i32, StreamError> {
        Ok(self.read_field(bits, false, endian)? as i32)
    }

    /// Read a single bit.
    #[inline]
    fn read_bit(&mut self) -> Result<bool, StreamError> {
        Ok(self.read_bits(1, self.endian())? != 0)
    }
}

impl<B: BitRead + ?Sized> FieldRead for B {}

/// Trait for writing bitfields.
pub trait FieldWrite: BitWrite {
    /// Write `value` as a field of `bits` bits and return the number of bits
    /// written.
    ///
    /// The value must fit the signed or unsigned range of the field, or the
    /// call fails with [`StreamError::Range`] without touching the stream.
    /// If `endian` is `None`, the default endianness of the stream is used.
    fn write_field<V: ToPrimitive>(
        &mut self,
        value: V,
        bits: u32,
        unsigned: bool,
        endian: Option<Endian>,
    ) -> Result<usize, StreamError> {
        if bits == 0 {
            return Ok(0);
        }
        if bits > 32 {
            return Err(self.diagnose(StreamError::Configuration(format!(
                "Bit width {} is not in 1..=32",
                bits
            ))));
        }
        let (min, max) = if unsigned {
            (0, (1_i64 << bits) - 1)
        } else {
            (-(1_i64 << (bits - 1)), (1_i64 << (bits - 1)) - 1)
        };
        let value = match value.to_i64() {
            Some(v) if (min..=max).contains(&v) => v,
            _ => {
                return Err(self.diagnose(StreamError::Range(format!(
                    "{} does not fit in {} {} bits (range {}..={})",
                    value
                        .to_i128()
                        .map_or_else(|| "value".into(), |v| format!("{}", v)),
                    bits,
                    if unsigned { "unsigned" } else { "signed" },
                    min,
                    max
                ))));
            }
        };
        let raw = (value as u64 & ((1_u64 << bits) - 1)) as u32;
        self.write_bits(raw, bits, Endian::or(endian, self.endian()))
    }

    /// Write a single bit.
    #[inline]
    fn write_bit(&mut self, bit: bool) -> Result<usize, StreamError> {
        self.write_bits(bit as u32, 1, self.endian())
    }
}

impl<B: BitWrite + ?Sized> FieldWrite for B {}
