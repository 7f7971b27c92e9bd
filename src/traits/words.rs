/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use core::fmt::{Debug, Display};
use num_traits::PrimInt;

/// Inner private trait used to make implementing [`Int`] impossible for
/// other types.
mod private {
    /// This is a [SealedTrait](https://predr.ag/blog/definitive-guide-to-sealed-traits-in-rust/).
    pub trait Int {}
}

/// The fixed-width integers that can be read from or written to a stream:
/// `u8`, `i8`, `u16`, `i16`, `u32`, `i32`, `u64`, and `i64`.
///
/// Values travel between the stream and the caller as a 64-bit raw pattern:
/// [`to_raw`](Int::to_raw) gives the two's complement bits of the value
/// zero-extended to 64 bits, and [`from_raw`](Int::from_raw) keeps the
/// lowest [`BYTES`](Int::BYTES) bytes, sign-extending them for signed types.
pub trait Int: PrimInt + Debug + Display + private::Int + 'static {
    /// The width of the type in bytes.
    const BYTES: usize = core::mem::size_of::<Self>();
    /// Whether the type is signed.
    const SIGNED: bool;

    /// Returns the two's complement bits of `self`, zero-extended.
    fn to_raw(self) -> u64;

    /// Builds a value from the lowest [`BYTES`](Int::BYTES) bytes of `raw`.
    fn from_raw(raw: u64) -> Self;
}

macro_rules! impl_int {
    ($($ty:ty => $uty:ty, $signed:literal);* $(;)?) => {$(
        impl private::Int for $ty {}

        impl Int for $ty {
            const SIGNED: bool = $signed;

            #[inline(always)]
            fn to_raw(self) -> u64 {
                self as $uty as u64
            }

            #[inline(always)]
            fn from_raw(raw: u64) -> Self {
                raw as $uty as $ty
            }
        }
    )*};
}

impl_int!(
    u8 => u8, false;
    i8 => u8, true;
    u16 => u16, false;
    i16 => u16, true;
    u32 => u32, false;
    i32 => u32, true;
    u64 => u64, false;
    i64 => u64, true;
);

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_raw() {
        assert_eq!((-1_i16).to_raw(), 0xffff);
        assert_eq!(i16::from_raw(0xffff), -1);
        assert_eq!(i8::from_raw(0x1_80), -128);
        assert_eq!(u32::from_raw(u64::MAX), u32::MAX);
        assert_eq!(i64::from_raw(i64::MIN.to_raw()), i64::MIN);
        assert_eq!(<u16 as Int>::BYTES, 2);
        assert!(<i64 as Int>::SIGNED);
        assert!(!<u8 as Int>::SIGNED);
    }
}
