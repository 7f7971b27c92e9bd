/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Packing and unpacking of fields of up to 32 bits at arbitrary bit
//! positions of a byte slice.
//!
//! A field is moved in chunks, each bounded by the bits left in the current
//! byte, so it may start anywhere and straddle any number of byte boundaries.
//!
//! With [`Endian::Big`] the first chunk carries the most significant bits of
//! the field, and bits inside a byte are used from the most significant one
//! down. With [`Endian::Little`] the first chunk carries the least significant
//! bits of the field, and bits inside a byte are used from the least
//! significant one up.
//!
//! Callers must guarantee that the slice covers the whole field and that
//! `n <= 32`.

use crate::traits::Endian;

#[inline(always)]
fn mask(n: u32) -> u64 {
    (1_u64 << n) - 1
}

/// Store the lowest `n` bits of `value` at bit position `bit_pos` of `data`.
///
/// Bits of `data` outside the field are left untouched.
pub fn pack(data: &mut [u8], bit_pos: u64, value: u32, n: u32, endian: Endian) {
    debug_assert!(n <= 32);
    debug_assert!((bit_pos + n as u64).div_ceil(8) <= data.len() as u64);
    let value = value as u64 & mask(n);
    let mut pos = bit_pos;
    let mut done = 0;
    while done < n {
        let byte = (pos / 8) as usize;
        let in_byte = (pos % 8) as u32;
        let chunk = (8 - in_byte).min(n - done);
        let (bits, shift) = match endian {
            Endian::Big => (
                (value >> (n - done - chunk)) & mask(chunk),
                8 - in_byte - chunk,
            ),
            Endian::Little => ((value >> done) & mask(chunk), in_byte),
        };
        let byte_mask = (mask(chunk) << shift) as u8;
        data[byte] = (data[byte] & !byte_mask) | ((bits << shift) as u8 & byte_mask);
        done += chunk;
        pos += chunk as u64;
    }
}

/// Return the field of `n` bits at bit position `bit_pos` of `data`,
/// zero-extended.
pub fn unpack(data: &[u8], bit_pos: u64, n: u32, endian: Endian) -> u32 {
    debug_assert!(n <= 32);
    debug_assert!((bit_pos + n as u64).div_ceil(8) <= data.len() as u64);
    let mut value = 0_u64;
    let mut pos = bit_pos;
    let mut done = 0;
    while done < n {
        let byte = (pos / 8) as usize;
        let in_byte = (pos % 8) as u32;
        let chunk = (8 - in_byte).min(n - done);
        match endian {
            Endian::Big => {
                let bits = (data[byte] as u64 >> (8 - in_byte - chunk)) & mask(chunk);
                value = (value << chunk) | bits;
            }
            Endian::Little => {
                let bits = (data[byte] as u64 >> in_byte) & mask(chunk);
                value |= bits << done;
            }
        }
        done += chunk;
        pos += chunk as u64;
    }
    value as u32
}

/// Sign-extend the lowest `n` bits of `raw`, with `1 <= n <= 64`.
#[inline(always)]
pub fn sign_extend(raw: u64, n: u32) -> i64 {
    let shift = 64 - n;
    ((raw << shift) as i64) >> shift
}
