/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Fixed-width integers.
//!
//! An integer of *k* bytes occupies *k* consecutive bytes of the stream,
//! most significant byte first for [`Endian::Big`] and least significant
//! byte first for [`Endian::Little`]. Signed values are stored in two's
//! complement and sign-extended from the top bit of their most significant
//! byte when decoded. Integer accesses are byte aligned (see
//! [`ByteRead`](crate::traits::ByteRead)).

use crate::error::StreamError;
use crate::impls::bitfield::sign_extend;
use crate::traits::*;
use alloc::format;

/// Assemble the integer stored in `bytes` (at most eight of them).
#[inline]
pub fn decode_raw(bytes: &[u8], endian: Endian) -> u64 {
    debug_assert!(bytes.len() <= 8);
    match endian {
        Endian::Big => bytes.iter().fold(0, |acc, &b| (acc << 8) | b as u64),
        Endian::Little => bytes.iter().rev().fold(0, |acc, &b| (acc << 8) | b as u64),
    }
}

/// Store the lowest `out.len()` bytes (at most eight) of `raw` in `out`.
#[inline]
pub fn encode_raw(raw: u64, out: &mut [u8], endian: Endian) {
    debug_assert!(out.len() <= 8);
    let len = out.len();
    for (i, b) in out.iter_mut().enumerate() {
        let shift = match endian {
            Endian::Big => (len - 1 - i) * 8,
            Endian::Little => i * 8,
        };
        *b = (raw >> shift) as u8;
    }
}

fn check_int_width(width: usize) -> Result<(), StreamError> {
    match width {
        1 | 2 | 4 | 8 => Ok(()),
        _ => Err(StreamError::Configuration(format!(
            "Integer width of {} bytes is not one of 1, 2, 4, or 8",
            width
        ))),
    }
}

macro_rules! int_readers {
    ($($name:ident => $ty:ty),* $(,)?) => {$(
        #[doc = concat!("Read a `", stringify!($ty), "`; see [`read_int`](IntRead::read_int).")]
        #[inline]
        fn $name(&mut self, endian: Option<Endian>) -> Result<$ty, StreamError> {
            self.read_int::<$ty>(endian)
        }
    )*};
}

macro_rules! int_writers {
    ($($name:ident => $ty:ty),* $(,)?) => {$(
        #[doc = concat!("Write a `", stringify!($ty), "`; see [`write_int`](IntWrite::write_int).")]
        #[inline]
        fn $name(&mut self, value: $ty, endian: Option<Endian>) -> Result<usize, StreamError> {
            self.write_int::<$ty>(value, endian)
        }
    )*};
}

/// Trait for reading fixed-width integers.
pub trait IntRead: ByteRead {
    /// Read an integer of type `T`.
    ///
    /// If `endian` is `None`, the default endianness of the stream is used.
    fn read_int<T: Int>(&mut self, endian: Option<Endian>) -> Result<T, StreamError> {
        let mut buf = [0_u8; 8];
        let buf = &mut buf[..T::BYTES];
        self.read_bytes_into(buf)?;
        Ok(T::from_raw(decode_raw(buf, Endian::or(endian, self.endian()))))
    }

    /// Read an integer whose width (1, 2, 4, or 8 bytes) and signedness are
    /// known only at runtime.
    fn read_int_dyn(
        &mut self,
        width: usize,
        unsigned: bool,
        endian: Option<Endian>,
    ) -> Result<i128, StreamError> {
        check_int_width(width).map_err(|e| self.diagnose(e))?;
        let mut buf = [0_u8; 8];
        let buf = &mut buf[..width];
        self.read_bytes_into(buf)?;
        let raw = decode_raw(buf, Endian::or(endian, self.endian()));
        Ok(if unsigned {
            raw as i128
        } else {
            sign_extend(raw, width as u32 * 8) as i128
        })
    }

    int_readers!(
        read_u8 => u8, read_i8 => i8,
        read_u16 => u16, read_i16 => i16,
        read_u32 => u32, read_i32 => i32,
        read_u64 => u64, read_i64 => i64,
    );
}

impl<B: ByteRead + ?Sized> IntRead for B {}

/// Trait for writing fixed-width integers.
pub trait IntWrite: ByteWrite {
    /// Write an integer of type `T` and return the number of bytes written.
    ///
    /// If `endian` is `None`, the default endianness of the stream is used.
    fn write_int<T: Int>(
        &mut self,
        value: T,
        endian: Option<Endian>,
    ) -> Result<usize, StreamError> {
        let mut buf = [0_u8; 8];
        let buf = &mut buf[..T::BYTES];
        encode_raw(value.to_raw(), buf, Endian::or(endian, self.endian()));
        self.write_bytes(buf)
    }

    /// Write an integer whose width (1, 2, 4, or 8 bytes) and signedness are
    /// known only at runtime.
    ///
    /// The value must fit the range of the selected type, or the call fails
    /// with [`StreamError::Range`] without touching the stream.
    fn write_int_dyn(
        &mut self,
        value: i128,
        width: usize,
        unsigned: bool,
        endian: Option<Endian>,
    ) -> Result<usize, StreamError> {
        check_int_width(width).map_err(|e| self.diagnose(e))?;
        let bits = width as u32 * 8;
        let (min, max) = if unsigned {
            (0, (1_i128 << bits) - 1)
        } else {
            (-(1_i128 << (bits - 1)), (1_i128 << (bits - 1)) - 1)
        };
        if !(min..=max).contains(&value) {
            return Err(self.diagnose(StreamError::Range(format!(
                "{} does not fit in {} {} bytes",
                value,
                width,
                if unsigned { "unsigned" } else { "signed" }
            ))));
        }
        let mut buf = [0_u8; 8];
        let buf = &mut buf[..width];
        encode_raw(value as u64, buf, Endian::or(endian, self.endian()));
        self.write_bytes(buf)
    }

    int_writers!(
        write_u8 => u8, write_i8 => i8,
        write_u16 => u16, write_i16 => i16,
        write_u32 => u32, write_i32 => i32,
        write_u64 => u64, write_i64 => i64,
    );
}

impl<B: ByteWrite + ?Sized> IntWrite for B {}

#[cfg(test)]
mod test {
    use crate::prelude::*;
    use alloc::vec;

    #[test]
    fn test_endianness() {
        let mut stream = ByteStream::new(vec![0; 4]);
        stream.write_int(0x01020304_u32, Some(LE)).unwrap();
        assert_eq!(stream.as_slice(), &[4, 3, 2, 1]);
        stream.goto(0, 0).unwrap();
        assert_eq!(stream.read_u32(Some(BE)).unwrap(), 0x04030201);
    }

    #[test]
    fn test_sign_extension() {
        let mut stream = ByteStream::new(vec![0xfe, 0xff, 0x80, 0x00]);
        assert_eq!(stream.read_i16(Some(LE)).unwrap(), -2);
        assert_eq!(stream.read_i16(Some(BE)).unwrap(), i16::MIN);
        stream.goto(0, 0).unwrap();
        assert_eq!(stream.read_u16(Some(LE)).unwrap(), 0xfffe);
        stream.goto(0, 0).unwrap();
        assert_eq!(stream.read_int_dyn(2, false, Some(LE)).unwrap(), -2);
        assert_eq!(stream.read_int_dyn(2, true, Some(BE)).unwrap(), 0x8000);
    }

    #[test]
    fn test_u64_exact() {
        let mut stream = ByteStream::new(vec![]);
        let value = (1_u64 << 53) + 1;
        stream.write_u64(value, None).unwrap();
        stream.write_i64(i64::MIN + 1, Some(BE)).unwrap();
        stream.goto(0, 0).unwrap();
        assert_eq!(stream.read_u64(None).unwrap(), value);
        assert_eq!(stream.read_i64(Some(BE)).unwrap(), i64::MIN + 1);
    }

    #[test]
    fn test_dyn() {
        let mut stream = ByteStream::new(vec![]);
        assert!(matches!(
            stream.write_int_dyn(256, 1, true, None),
            Err(StreamError::Range(_))
        ));
        assert!(matches!(
            stream.write_int_dyn(-129, 1, false, None),
            Err(StreamError::Range(_))
        ));
        assert!(matches!(
            stream.write_int_dyn(0, 3, false, None),
            Err(StreamError::Configuration(_))
        ));
        assert!(stream.is_empty());
        stream.write_int_dyn(u64::MAX as i128, 8, true, None).unwrap();
        stream.write_int_dyn(-129, 2, false, Some(BE)).unwrap();
        stream.goto(0, 0).unwrap();
        assert_eq!(stream.read_int_dyn(8, true, None).unwrap(), u64::MAX as i128);
        assert_eq!(stream.read_i16(Some(BE)).unwrap(), -129);
    }

    #[test]
    fn test_strict() {
        let mut stream =
            ByteStream::with_config(vec![0; 3], StreamConfig::default().strict(true)).unwrap();
        stream.skip(1, 0).unwrap();
        assert_eq!(
            stream.write_u32(1, None),
            Err(StreamError::Capacity {
                required: 5,
                size: 3
            })
        );
        assert_eq!(stream.as_slice(), &[0; 3]);
        assert_eq!(stream.byte_pos(), 1);
        assert_eq!(stream.write_u16(0xabcd, Some(BE)).unwrap(), 2);
        assert_eq!(stream.as_slice(), &[0, 0xab, 0xcd]);
    }
}
