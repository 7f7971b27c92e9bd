/*
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::impls::ByteStream;
use core::fmt::{Display, Formatter};
use core::ops::Range;

/// A displayable hex dump of a range of bytes.
///
/// Each row shows sixteen bytes: the eight-digit hexadecimal offset of the
/// first byte, the bytes in hexadecimal (with an extra space after the
/// eighth), and their printable ASCII characters, with `.` standing for
/// nonprintable ones. The range is clamped to the available bytes, so
/// building and displaying a dump cannot fail.
///
/// # Example
/// ```
/// use dsi_bitbuffer::prelude::*;
///
/// let stream = ByteStream::new(b"Hi!\n".to_vec());
/// assert_eq!(
///     stream.hex_dump(0..100).to_string(),
///     "00000000  48 69 21 0a                                       |Hi!.|"
/// );
/// ```
#[derive(Debug, Clone, Copy)]
pub struct HexDump<'a> {
    data: &'a [u8],
    base: usize,
}

impl<'a> HexDump<'a> {
    pub fn new(data: &'a [u8], range: Range<usize>) -> Self {
        let end = range.end.min(data.len());
        let start = range.start.min(end);
        Self {
            data: &data[start..end],
            base: start,
        }
    }
}

impl Display for HexDump<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        for (row, chunk) in self.data.chunks(16).enumerate() {
            if row != 0 {
                writeln!(f)?;
            }
            write!(f, "{:08x} ", self.base + row * 16)?;
            for i in 0..16 {
                if i == 8 {
                    write!(f, " ")?;
                }
                match chunk.get(i) {
                    Some(b) => write!(f, " {:02x}", b)?,
                    None => write!(f, "   ")?,
                }
            }
            write!(f, "  |")?;
            for &b in chunk {
                let c = if b.is_ascii_graphic() || b == b' ' {
                    b as char
                } else {
                    '.'
                };
                write!(f, "{}", c)?;
            }
            write!(f, "|")?;
        }
        Ok(())
    }
}

impl ByteStream {
    /// Return a hex dump of the bytes in `range`, clamped to the store.
    pub fn hex_dump(&self, range: Range<usize>) -> HexDump<'_> {
        HexDump::new(self.as_slice(), range)
    }
}
