/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use dsi_bitbuffer::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::error::Error;

type Result = core::result::Result<(), Box<dyn Error + Send + Sync + 'static>>;

#[test]
fn test_fields() -> Result {
    const N: usize = 1000;
    let mut r = SmallRng::seed_from_u64(0);
    for endian in [BE, LE] {
        for start in 0..8 {
            let mut stream = ByteStream::new(vec![]);
            stream.goto(0, start)?;
            let mut fields = vec![];
            for _ in 0..N {
                let bits: u32 = r.random_range(1..=32);
                let unsigned = r.random_bool(0.5);
                let value: i64 = if unsigned {
                    r.random_range(0..=(1_i64 << bits) - 1)
                } else {
                    r.random_range(-(1_i64 << (bits - 1))..=(1_i64 << (bits - 1)) - 1)
                };
                let pos = stream.bit_pos();
                assert_eq!(
                    stream.write_field(value, bits, unsigned, Some(endian))?,
                    bits as usize
                );
                assert_eq!(stream.bit_pos(), pos + bits as u64);
                fields.push((value, bits, unsigned));
            }
            let total = start + fields.iter().map(|f| f.1 as u64).sum::<u64>();
            assert_eq!(stream.len() as u64, total.div_ceil(8));

            stream.goto(0, start)?;
            for &(value, bits, unsigned) in &fields {
                assert_eq!(stream.read_field(bits, unsigned, Some(endian))?, value);
            }
            assert_eq!(stream.bit_pos(), total);
        }
    }
    Ok(())
}

#[test]
fn test_fields_preserve_neighbors() -> Result {
    let mut r = SmallRng::seed_from_u64(1);
    for _ in 0..1000 {
        let endian = if r.random_bool(0.5) { BE } else { LE };
        let original: Vec<u8> = (0..8).map(|_| r.random()).collect();
        let bits: u32 = r.random_range(1..=32);
        let start: u64 = r.random_range(0..=64 - bits as u64);
        let mut stream = ByteStream::new(original.clone());
        stream.goto(0, start)?;
        let old = stream.peek_bits(bits, endian)?;
        stream.write_bits(!old & (u32::MAX >> (32 - bits)), bits, endian)?;
        // complementing the field twice restores the store
        stream.goto(0, start)?;
        let new = stream.read_bits(bits, endian)?;
        assert_eq!(new ^ old, u32::MAX >> (32 - bits));
        stream.goto(0, start)?;
        stream.write_bits(old, bits, endian)?;
        assert_eq!(stream.as_slice(), &original[..]);
    }
    Ok(())
}

fn test_int<T: Int>(r: &mut SmallRng) -> Result {
    const N: usize = 1000;
    for endian in [BE, LE] {
        let mut stream = ByteStream::new(vec![]);
        let values: Vec<T> = (0..N).map(|_| T::from_raw(r.random())).collect();
        for &value in &values {
            let pos = stream.bit_pos();
            assert_eq!(stream.write_int(value, Some(endian))?, T::BYTES);
            assert_eq!(stream.bit_pos(), pos + 8 * T::BYTES as u64);
        }
        assert_eq!(stream.len(), N * T::BYTES);
        stream.goto(0, 0)?;
        for &value in &values {
            assert_eq!(stream.read_int::<T>(Some(endian))?, value);
        }
        // the dynamic interface agrees with the typed one
        stream.goto(0, 0)?;
        for &value in &values {
            let raw = stream.read_int_dyn(T::BYTES, !T::SIGNED, Some(endian))?;
            assert_eq!(T::from_raw(raw as u64), value);
        }
    }
    Ok(())
}

#[test]
fn test_ints() -> Result {
    let mut r = SmallRng::seed_from_u64(2);
    test_int::<u8>(&mut r)?;
    test_int::<i8>(&mut r)?;
    test_int::<u16>(&mut r)?;
    test_int::<i16>(&mut r)?;
    test_int::<u32>(&mut r)?;
    test_int::<i32>(&mut r)?;
    test_int::<u64>(&mut r)?;
    test_int::<i64>(&mut r)?;
    Ok(())
}

#[test]
fn test_ints_extremes() -> Result {
    let mut stream = ByteStream::new(vec![]);
    stream.write_i8(i8::MIN, None)?;
    stream.write_u16(u16::MAX, Some(BE))?;
    stream.write_i32(i32::MIN, Some(BE))?;
    stream.write_u64(u64::MAX, None)?;
    stream.write_i64(i64::MIN, Some(BE))?;
    stream.goto(0, 0)?;
    assert_eq!(stream.read_i8(None)?, i8::MIN);
    assert_eq!(stream.read_u16(Some(BE))?, u16::MAX);
    assert_eq!(stream.read_i32(Some(BE))?, i32::MIN);
    assert_eq!(stream.read_u64(None)?, u64::MAX);
    assert_eq!(stream.read_i64(Some(BE))?, i64::MIN);
    Ok(())
}

#[test]
fn test_floats() -> Result {
    const N: usize = 10000;
    let mut r = SmallRng::seed_from_u64(3);
    for endian in [BE, LE] {
        let mut stream = ByteStream::new(vec![]);
        for _ in 0..N {
            // every half is exactly representable, so decoding and encoding
            // again must reproduce the bit pattern
            let bits: u16 = r.random();
            stream.goto(0, 0)?;
            stream.write_u16(bits, Some(endian))?;
            stream.goto(0, 0)?;
            let value = stream.read_half(Some(endian))?;
            stream.goto(0, 0)?;
            stream.write_half(value, Some(endian))?;
            stream.goto(0, 0)?;
            let again = stream.read_u16(Some(endian))?;
            if value.is_nan() {
                assert_eq!(again & 0x7fff, 0x7e00);
            } else {
                assert_eq!(again, bits);
            }

            let value = f32::from_bits(r.random());
            stream.goto(0, 0)?;
            stream.write_single(value, Some(endian))?;
            stream.goto(0, 0)?;
            let read = stream.read_single(Some(endian))?;
            if value.is_nan() {
                assert!(read.is_nan());
            } else {
                assert_eq!(read.to_bits(), value.to_bits());
            }

            let value = f64::from_bits(r.random());
            stream.goto(0, 0)?;
            stream.write_double(value, Some(endian))?;
            assert_eq!(stream.byte_pos(), 8);
            stream.goto(0, 0)?;
            let read = stream.read_double(Some(endian))?;
            if value.is_nan() {
                assert!(read.is_nan());
            } else {
                assert_eq!(read.to_bits(), value.to_bits());
            }
        }
    }
    Ok(())
}

#[test]
fn test_float_classes() -> Result {
    let mut stream = ByteStream::new(vec![]);
    let values = [0.0, -0.0, f64::INFINITY, f64::NEG_INFINITY, f64::NAN, 1.5, -2.0e-7];
    for &value in &values {
        stream.write_half(value, Some(BE))?;
        stream.write_single(value, None)?;
        stream.write_double(value, Some(BE))?;
    }
    assert_eq!(stream.len(), values.len() * 14);
    stream.goto(0, 0)?;
    for &value in &values {
        let h = stream.read_half(Some(BE))? as f64;
        let s = stream.read_single(None)? as f64;
        let d = stream.read_double(Some(BE))?;
        for read in [h, s, d] {
            assert_eq!(read.is_nan(), value.is_nan());
            assert_eq!(read.is_infinite(), value.is_infinite());
            if !value.is_nan() {
                assert_eq!(read.is_sign_negative(), value.is_sign_negative());
                assert_eq!(read == 0.0, value == 0.0);
            }
        }
        assert!(d.is_nan() || d == value);
    }
    // halves are subnormal near 2e-7, so the value is rounded
    stream.goto(6 * 14, 0)?;
    assert_eq!(stream.read_half(Some(BE))?, half_of(-2.0e-7));
    Ok(())
}

/// The nearest half to `x`, computed by brute force over all patterns.
fn half_of(x: f64) -> f32 {
    let mut stream = ByteStream::new(vec![]);
    let mut best = (f64::INFINITY, 0.0);
    for bits in 0..=u16::MAX {
        stream.goto(0, 0).unwrap();
        stream.write_u16(bits, None).unwrap();
        stream.goto(0, 0).unwrap();
        let h = stream.read_half(None).unwrap();
        if h.is_finite() && (h as f64 - x).abs() < best.0 {
            best = ((h as f64 - x).abs(), h);
        }
    }
    best.1
}

#[test]
fn test_strings() -> Result {
    const N: usize = 200;
    let mut r = SmallRng::seed_from_u64(4);
    let mut stream = ByteStream::new(vec![]);
    let mut written = vec![];
    for _ in 0..N {
        let len = r.random_range(0..20);
        let s: String = (0..len)
            .map(|_| r.random::<char>())
            .filter(|&c| c != '\0')
            .collect();
        let options = match r.random_range(0..5) {
            0 => StringOptions::default(),
            1 => StringOptions::new(StringType::Utf16).endian(BE),
            2 => StringOptions::new(StringType::Pascal).length_size(LengthSize::Two),
            3 => StringOptions::new(StringType::WidePascal)
                .length_size(LengthSize::Four)
                .endian(LE),
            _ => StringOptions::default().length(s.len()),
        };
        let pos = stream.byte_pos();
        let n = stream.write_string(&s, &options)?;
        assert_eq!(stream.byte_pos(), pos + n);
        written.push((s, options));
    }
    stream.goto(0, 0)?;
    for (s, options) in &written {
        assert_eq!(&stream.read_string(options)?, s);
    }
    assert_eq!(stream.byte_pos(), stream.len());
    Ok(())
}
