/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Strings.
//!
//! Strings are sequences of *units*: bytes for [`StringType::Utf8`] and
//! [`StringType::Pascal`], 16-bit words (in the chosen endianness) for
//! [`StringType::Utf16`] and [`StringType::WidePascal`]. Byte units are
//! decoded using a [`TextEncoding`]; 16-bit units are always UTF-16.
//! Invalid sequences are decoded lossily, using U+FFFD.
//!
//! - Terminated strings ([`StringType::Utf8`], [`StringType::Utf16`]) are
//!   read until `length` units have been consumed or a unit equal to the
//!   terminator is found, whichever comes first; the terminator is consumed
//!   but is not part of the result. If neither a length nor a terminator is
//!   specified, the terminator is zero. Without a length, reading stops at
//!   the end of the store. When writing, the payload is truncated or padded
//!   with zeros to `length` units, if specified, and followed by the
//!   terminator, if any (again, zero if neither is specified).
//!
//! - Length-prefixed strings ([`StringType::Pascal`],
//!   [`StringType::WidePascal`]) start with an unsigned integer of one, two
//!   or four bytes (see [`LengthSize`]) containing the number of units that
//!   follow.
//!
//! All operations are byte aligned, advance the cursor by exactly the bytes
//! transferred, and leave the stream untouched on error.
//!
//! # Example
//! ```
//! use dsi_bitbuffer::prelude::*;
//!
//! let mut stream = ByteStream::new(vec![]);
//! let options = StringOptions::new(StringType::Pascal).length_size(LengthSize::Two);
//! stream.write_string("héllo", &options).unwrap();
//! assert_eq!(stream.len(), 2 + 6);
//! stream.goto(0, 0).unwrap();
//! assert_eq!(stream.read_string(&options).unwrap(), "héllo");
//! ```

use crate::codes::int::{decode_raw, encode_raw};
use crate::error::StreamError;
use crate::traits::*;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

/// The layout of a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub enum StringType {
    /// Byte units, terminated or of fixed length.
    #[default]
    Utf8,
    /// 16-bit units, terminated or of fixed length.
    Utf16,
    /// Byte units preceded by their count.
    Pascal,
    /// 16-bit units preceded by their count.
    WidePascal,
}

impl StringType {
    /// The size in bytes of a unit.
    pub fn unit_size(self) -> usize {
        match self {
            StringType::Utf8 | StringType::Pascal => 1,
            StringType::Utf16 | StringType::WidePascal => 2,
        }
    }

    /// Whether the string is preceded by its length.
    pub fn is_prefixed(self) -> bool {
        matches!(self, StringType::Pascal | StringType::WidePascal)
    }
}

impl core::str::FromStr for StringType {
    type Err = StreamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let is = |t: &str| s.eq_ignore_ascii_case(t);
        if is("utf-8") || is("utf8") {
            Ok(StringType::Utf8)
        } else if is("utf-16") || is("utf16") {
            Ok(StringType::Utf16)
        } else if is("pascal") {
            Ok(StringType::Pascal)
        } else if is("wide-pascal") || is("widepascal") {
            Ok(StringType::WidePascal)
        } else {
            Err(StreamError::Configuration(format!(
                "Unknown string type {:?} (expected utf-8, utf-16, pascal, or wide-pascal)",
                s
            )))
        }
    }
}

/// The text encoding of byte units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub enum TextEncoding {
    #[default]
    Utf8,
    /// ISO-8859-1: each byte is the code point with the same value.
    Latin1,
}

impl TextEncoding {
    fn decode(self, bytes: &[u8]) -> String {
        match self {
            TextEncoding::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            TextEncoding::Latin1 => bytes.iter().map(|&b| b as char).collect(),
        }
    }

    fn encode(self, s: &str) -> Result<Vec<u8>, StreamError> {
        match self {
            TextEncoding::Utf8 => Ok(s.as_bytes().to_vec()),
            TextEncoding::Latin1 => s
                .chars()
                .map(|c| {
                    u8::try_from(c).map_err(|_| {
                        StreamError::Range(format!("{:?} is not representable in Latin-1", c))
                    })
                })
                .collect(),
        }
    }
}

impl core::str::FromStr for TextEncoding {
    type Err = StreamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let is = |t: &str| s.eq_ignore_ascii_case(t);
        if is("utf-8") || is("utf8") {
            Ok(TextEncoding::Utf8)
        } else if is("latin1") || is("latin-1") || is("iso-8859-1") {
            Ok(TextEncoding::Latin1)
        } else {
            Err(StreamError::Configuration(format!(
                "Unsupported text encoding {:?}",
                s
            )))
        }
    }
}

/// The size of the length prefix of Pascal strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub enum LengthSize {
    One = 1,
    Two = 2,
    Four = 4,
}

impl LengthSize {
    /// The size of the prefix in bytes.
    pub fn bytes(self) -> usize {
        self as usize
    }

    /// The largest unit count the prefix can describe.
    pub fn max(self) -> u64 {
        match self {
            LengthSize::One => u8::MAX as u64,
            LengthSize::Two => u16::MAX as u64,
            LengthSize::Four => u32::MAX as u64,
        }
    }
}

impl TryFrom<usize> for LengthSize {
    type Error = StreamError;

    fn try_from(bytes: usize) -> Result<Self, Self::Error> {
        match bytes {
            1 => Ok(LengthSize::One),
            2 => Ok(LengthSize::Two),
            4 => Ok(LengthSize::Four),
            _ => Err(StreamError::Configuration(format!(
                "Length prefix of {} bytes is not one of 1, 2, or 4",
                bytes
            ))),
        }
    }
}

impl core::str::FromStr for LengthSize {
    type Err = StreamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.trim().parse::<usize>().map_err(|_| {
            StreamError::Configuration(format!("Invalid length prefix size {:?}", s))
        })?;
        LengthSize::try_from(bytes)
    }
}

/// How to read or write a string.
///
/// The default describes a zero-terminated UTF-8 string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StringOptions {
    /// Number of units of terminated strings; for Pascal strings, the number
    /// of units written (the payload is truncated or zero-padded).
    pub length: Option<usize>,
    pub string_type: StringType,
    /// The terminator unit of terminated strings.
    pub terminate_value: Option<u16>,
    /// The size of the prefix of Pascal strings; if `None`, one byte for
    /// [`StringType::Pascal`] and two bytes for [`StringType::WidePascal`].
    pub length_size: Option<LengthSize>,
    /// Remove U+0000 from decoded strings.
    pub strip_null: bool,
    /// The encoding of byte units.
    pub encoding: TextEncoding,
    /// Endianness of 16-bit units and length prefixes; if `None`, the default
    /// endianness of the stream.
    pub endian: Option<Endian>,
}

impl StringOptions {
    pub fn new(string_type: StringType) -> Self {
        Self {
            string_type,
            ..Default::default()
        }
    }

    pub fn length(mut self, length: usize) -> Self {
        self.length = Some(length);
        self
    }

    pub fn terminator(mut self, terminate_value: u16) -> Self {
        self.terminate_value = Some(terminate_value);
        self
    }

    pub fn length_size(mut self, length_size: LengthSize) -> Self {
        self.length_size = Some(length_size);
        self
    }

    pub fn strip_null(mut self, strip_null: bool) -> Self {
        self.strip_null = strip_null;
        self
    }

    pub fn encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn endian(mut self, endian: Endian) -> Self {
        self.endian = Some(endian);
        self
    }

    fn prefix(&self) -> LengthSize {
        self.length_size.unwrap_or(match self.string_type {
            StringType::WidePascal => LengthSize::Two,
            _ => LengthSize::One,
        })
    }

    /// The terminator of a terminated string, checked against the unit size.
    fn terminator_unit(&self) -> Result<Option<u16>, StreamError> {
        let terminator = match (self.length, self.terminate_value) {
            (None, None) => Some(0),
            (_, t) => t,
        };
        match terminator {
            Some(t) if self.string_type.unit_size() == 1 && t > u8::MAX as u16 => {
                Err(StreamError::Configuration(format!(
                    "Terminator {:#x} does not fit in a byte unit",
                    t
                )))
            }
            t => Ok(t),
        }
    }

    fn decode(&self, units: &[u8], endian: Endian) -> String {
        let mut s = match self.string_type.unit_size() {
            1 => self.encoding.decode(units),
            _ => {
                let words: Vec<u16> = units
                    .chunks_exact(2)
                    .map(|w| decode_raw(w, endian) as u16)
                    .collect();
                String::from_utf16_lossy(&words)
            }
        };
        if self.strip_null {
            s.retain(|c| c != '\0');
        }
        s
    }

    /// Return the encoded payload and its length in units.
    fn encode(&self, s: &str, endian: Endian) -> Result<(Vec<u8>, usize), StreamError> {
        match self.string_type.unit_size() {
            1 => {
                let bytes = self.encoding.encode(s)?;
                let len = bytes.len();
                Ok((bytes, len))
            }
            _ => {
                let mut bytes = Vec::with_capacity(s.len() * 2);
                for w in s.encode_utf16() {
                    let mut unit = [0; 2];
                    encode_raw(w as u64, &mut unit, endian);
                    bytes.extend_from_slice(&unit);
                }
                let len = bytes.len() / 2;
                Ok((bytes, len))
            }
        }
    }
}

fn read_terminated<B: ByteRead + ?Sized>(
    stream: &mut B,
    options: &StringOptions,
    endian: Endian,
) -> Result<String, StreamError> {
    let unit = options.string_type.unit_size();
    let terminator = options.terminator_unit().map_err(|e| stream.diagnose(e))?;
    if let Some(length) = options.length {
        stream.ensure_ahead(length.saturating_mul(unit))?;
    }
    let max_units = options.length.unwrap_or(usize::MAX);
    let mut payload = Vec::new();
    let mut buf = [0_u8; 2];
    let mut units = 0;
    while units < max_units && stream.remaining() >= unit {
        stream.read_bytes_into(&mut buf[..unit])?;
        units += 1;
        if terminator == Some(decode_raw(&buf[..unit], endian) as u16) {
            break;
        }
        payload.extend_from_slice(&buf[..unit]);
    }
    Ok(options.decode(&payload, endian))
}

fn read_prefixed<B: ByteRead + ?Sized>(
    stream: &mut B,
    options: &StringOptions,
    endian: Endian,
) -> Result<String, StreamError> {
    let unit = options.string_type.unit_size();
    let mut prefix = [0_u8; 4];
    let prefix = &mut prefix[..options.prefix().bytes()];
    stream.read_bytes_into(prefix)?;
    let units = decode_raw(prefix, endian) as usize;
    let payload = stream.read_bytes(units.saturating_mul(unit))?;
    Ok(options.decode(&payload, endian))
}

/// Trait for reading strings.
pub trait StringRead: ByteRead {
    /// Read a string as described by `options`.
    fn read_string(&mut self, options: &StringOptions) -> Result<String, StreamError> {
        let endian = Endian::or(options.endian, self.endian());
        let start = self.bit_pos();
        let result = if options.string_type.is_prefixed() {
            read_prefixed(self, options, endian)
        } else {
            read_terminated(self, options, endian)
        };
        if result.is_err() {
            // the start position was valid, so this cannot fail
            let _ = self.set_bit_pos(start);
        }
        result
    }
}

impl<B: ByteRead + ?Sized> StringRead for B {}

/// Trait for writing strings.
pub trait StringWrite: ByteWrite {
    /// Write `s` as described by `options` and return the number of bytes
    /// written.
    ///
    /// The size of the whole string (prefix, payload, and terminator) is
    /// validated before anything is written.
    fn write_string(&mut self, s: &str, options: &StringOptions) -> Result<usize, StreamError> {
        let endian = Endian::or(options.endian, self.endian());
        let unit = options.string_type.unit_size();
        let (mut payload, len) = options.encode(s, endian).map_err(|e| self.diagnose(e))?;
        let units = options.length.unwrap_or(len);

        // prefix or terminator, as raw bytes
        let mut head = [0_u8; 4];
        let mut tail = [0_u8; 2];
        let (head, tail) = if options.string_type.is_prefixed() {
            let prefix = options.prefix();
            if units as u64 > prefix.max() {
                return Err(self.diagnose(StreamError::Range(format!(
                    "String of {} units does not fit a {}-byte length prefix (max {})",
                    units,
                    prefix.bytes(),
                    prefix.max()
                ))));
            }
            let n = prefix.bytes();
            encode_raw(units as u64, &mut head[..n], endian);
            (&head[..n], &tail[..0])
        } else {
            let terminator = options.terminator_unit().map_err(|e| self.diagnose(e))?;
            match terminator {
                Some(t) => {
                    encode_raw(t as u64, &mut tail[..unit], endian);
                    (&head[..0], &tail[..unit])
                }
                None => (&head[..0], &tail[..0]),
            }
        };

        let size = units.saturating_mul(unit).saturating_add(head.len() + tail.len());
        self.ensure_ahead(size)?;

        payload.resize(units * unit, 0);
        let mut buf = Vec::with_capacity(size);
        buf.extend_from_slice(head);
        buf.extend_from_slice(&payload);
        buf.extend_from_slice(tail);
        self.write_bytes(&buf)
    }
}

impl<B: ByteWrite + ?Sized> StringWrite for B {}
