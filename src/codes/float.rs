/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! IEEE-754 binary floating-point formats.
//!
//! A format is described by the [`Ieee754`] trait, and the three standard
//! interchange formats are provided as the selector types [`Half`]
//! (binary16), [`Single`] (binary32), and [`Double`] (binary64).
//!
//! Values are decoded by reading the unsigned integer of matching width and
//! rebuilding the value from its sign, exponent and mantissa fields; they
//! are encoded by extracting the fields from the magnitude of the value,
//! rounding the mantissa to nearest, ties to even. Both directions handle
//! signed zeros, subnormals, infinities, and NaNs explicitly, so the
//! conversion does not depend on the platform float representation of the
//! target format. Formats can override [`Ieee754::decode`] and
//! [`Ieee754::encode`] to provide a different implementation.
//!
//! Finite values whose magnitude exceeds the largest finite value of the
//! target format are rejected with [`StreamError::Range`]; values too small
//! to be represented become (signed) zeros.

use crate::codes::int::{IntRead, IntWrite};
use crate::error::StreamError;
use crate::traits::*;
use alloc::format;
use num_traits::float::FloatCore;

/// Return 2<sup>`e`</sup> for `e` in [–1074 . . 1023].
#[inline]
fn pow2(e: i32) -> f64 {
    debug_assert!((-1074..=1023).contains(&e));
    if e >= -1022 {
        f64::from_bits(((e + 1023) as u64) << 52)
    } else {
        f64::from_bits(1_u64 << (e + 1074))
    }
}

/// Shift `sig` right by `shift` bits, rounding to nearest, ties to even.
#[inline]
fn round_shift(sig: u64, shift: u32) -> u64 {
    if shift == 0 {
        return sig;
    }
    if shift >= 64 {
        return 0;
    }
    let q = sig >> shift;
    let rem = sig & ((1_u64 << shift) - 1);
    let half = 1_u64 << (shift - 1);
    if rem > half || (rem == half && q & 1 == 1) {
        q + 1
    } else {
        q
    }
}

/// An IEEE-754 binary interchange format.
pub trait Ieee754 {
    /// The unsigned integer type holding an encoded value.
    type Raw: Int;
    /// The number of bits of the exponent field.
    const EXP_BITS: u32;
    /// The number of bits of the mantissa (trailing significand) field.
    const MANT_BITS: u32;
    /// The exponent bias.
    const BIAS: i32 = (1 << (Self::EXP_BITS - 1)) - 1;
    /// The all-ones exponent field of infinities and NaNs.
    const MAX_EXP: u64 = (1 << Self::EXP_BITS) - 1;

    /// The largest finite value of the format.
    fn max_finite() -> f64 {
        let emax = Self::MAX_EXP as i32 - 1 - Self::BIAS;
        ((1_u64 << (Self::MANT_BITS + 1)) - 1) as f64 * pow2(emax - Self::MANT_BITS as i32)
    }

    /// Decode the bit pattern `raw` (in the lowest bits).
    fn decode(raw: u64) -> f64 {
        let m = Self::MANT_BITS;
        let sign = (raw >> (m + Self::EXP_BITS)) & 1 != 0;
        let exp = (raw >> m) & Self::MAX_EXP;
        let mant = raw & ((1_u64 << m) - 1);

        let magnitude = if exp == 0 {
            // zero or subnormal: no implicit bit, minimum exponent
            mant as f64 * pow2(1 - Self::BIAS - m as i32)
        } else if exp == Self::MAX_EXP {
            if mant == 0 { f64::INFINITY } else { f64::NAN }
        } else {
            ((1_u64 << m) | mant) as f64 * pow2(exp as i32 - Self::BIAS - m as i32)
        };

        if sign { -magnitude } else { magnitude }
    }

    /// Encode `value`, returning its bit pattern in the lowest bits.
    fn encode(value: f64) -> Result<u64, StreamError> {
        let m = Self::MANT_BITS;
        let sign = (FloatCore::is_sign_negative(value) as u64) << (m + Self::EXP_BITS);

        if FloatCore::is_nan(value) {
            // quiet NaN
            return Ok(sign | (Self::MAX_EXP << m) | (1 << (m - 1)));
        }
        if FloatCore::is_infinite(value) {
            return Ok(sign | (Self::MAX_EXP << m));
        }
        if value == 0.0 {
            return Ok(sign);
        }
        let magnitude = FloatCore::abs(value);
        if magnitude > Self::max_finite() {
            return Err(StreamError::Range(format!(
                "{} exceeds the largest finite value {} of a {}-bit float",
                value,
                Self::max_finite(),
                1 + Self::EXP_BITS + m
            )));
        }

        // magnitude = sig * 2^(exp - 52), with sig normalized to 53 bits
        let bits = magnitude.to_bits();
        let src_exp = ((bits >> 52) & 0x7ff) as i32;
        let src_mant = bits & ((1_u64 << 52) - 1);
        let (exp, sig) = if src_exp == 0 {
            let shift = src_mant.leading_zeros() - 11;
            (-1022 - shift as i32, src_mant << shift)
        } else {
            (src_exp - 1023, src_mant | (1_u64 << 52))
        };

        let biased = exp + Self::BIAS;
        let magnitude_bits = if biased >= 1 {
            // a carry out of the rounded significand bumps the exponent
            let rounded = round_shift(sig, 52 - m);
            ((biased as u64 - 1) << m) + rounded
        } else {
            // a carry out of a subnormal yields the smallest normal value
            round_shift(sig, 52 - m + (1 - biased) as u32)
        };
        Ok(sign | magnitude_bits)
    }
}

/// Selector type for binary16 (1 sign bit, 5 exponent bits, 10 mantissa bits).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Half;

/// Selector type for binary32 (1 sign bit, 8 exponent bits, 23 mantissa bits).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Single;

/// Selector type for binary64 (1 sign bit, 11 exponent bits, 52 mantissa bits).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Double;

impl Ieee754 for Half {
    type Raw = u16;
    const EXP_BITS: u32 = 5;
    const MANT_BITS: u32 = 10;
}

impl Ieee754 for Single {
    type Raw = u32;
    const EXP_BITS: u32 = 8;
    const MANT_BITS: u32 = 23;
}

impl Ieee754 for Double {
    type Raw = u64;
    const EXP_BITS: u32 = 11;
    const MANT_BITS: u32 = 52;
}

/// Trait for reading floating-point values.
pub trait FloatRead: IntRead {
    /// Read a value in format `F`.
    ///
    /// If `endian` is `None`, the default endianness of the stream is used.
    fn read_float<F: Ieee754>(&mut self, endian: Option<Endian>) -> Result<f64, StreamError> {
        let raw = self.read_int::<F::Raw>(endian)?;
        Ok(F::decode(raw.to_raw()))
    }

    /// Read a binary16 value (always exactly representable as `f32`).
    #[inline]
    fn read_half(&mut self, endian: Option<Endian>) -> Result<f32, StreamError> {
        Ok(self.read_float::<Half>(endian)? as f32)
    }

    #[inline]
    fn read_single(&mut self, endian: Option<Endian>) -> Result<f32, StreamError> {
        Ok(self.read_float::<Single>(endian)? as f32)
    }

    #[inline]
    fn read_double(&mut self, endian: Option<Endian>) -> Result<f64, StreamError> {
        self.read_float::<Double>(endian)
    }
}

impl<B: ByteRead + ?Sized> FloatRead for B {}

/// Trait for writing floating-point values.
pub trait FloatWrite: IntWrite {
    /// Write `value` in format `F` and return the number of bytes written.
    ///
    /// Values outside the finite range of `F` fail with
    /// [`StreamError::Range`] before anything is written.
    fn write_float<F: Ieee754>(
        &mut self,
        value: f64,
        endian: Option<Endian>,
    ) -> Result<usize, StreamError> {
        let raw = F::encode(value).map_err(|e| self.diagnose(e))?;
        self.write_int(F::Raw::from_raw(raw), endian)
    }

    /// Write a binary16 value, rounding to nearest.
    #[inline]
    fn write_half(
        &mut self,
        value: impl Into<f64>,
        endian: Option<Endian>,
    ) -> Result<usize, StreamError> {
        self.write_float::<Half>(value.into(), endian)
    }

    /// Write a binary32 value, rounding to nearest.
    #[inline]
    fn write_single(
        &mut self,
        value: impl Into<f64>,
        endian: Option<Endian>,
    ) -> Result<usize, StreamError> {
        self.write_float::<Single>(value.into(), endian)
    }

    #[inline]
    fn write_double(&mut self, value: f64, endian: Option<Endian>) -> Result<usize, StreamError> {
        self.write_float::<Double>(value, endian)
    }
}

impl<B: ByteWrite + ?Sized> FloatWrite for B {}
