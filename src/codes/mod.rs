/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

Traits for reading and writing typed values.

Each kind of value is implemented as a pair of extension traits for reading
and writing (e.g., [`IntRead`] and [`IntWrite`]), blanket-implemented for
every stream. The traits for bitfields depend on
[`BitRead`](crate::traits::BitRead) and [`BitWrite`](crate::traits::BitWrite);
all other traits depend on [`ByteRead`](crate::traits::ByteRead) and
[`ByteWrite`](crate::traits::ByteWrite), and are thus byte aligned: they
start at the current byte, discarding the bit offset of the cursor.

| Module     | Values                                         | Alignment |
|------------|------------------------------------------------|-----------|
| [`field`]  | signed and unsigned fields of 1 to 32 bits     | bit       |
| [`int`]    | 8, 16, 32, and 64-bit integers                 | byte      |
| [`float`]  | IEEE 754 half, single, and double precision    | byte      |
| [`string`] | terminated and length-prefixed strings         | byte      |

All methods accepting an `Option<Endian>` use the default endianness of the
stream when passed `None`.

*/

pub mod field;
pub use field::{FieldRead, FieldWrite};

pub mod int;
pub use int::{IntRead, IntWrite};

pub mod float;
pub use float::{Double, FloatRead, FloatWrite, Half, Ieee754, Single};

pub mod string;
pub use string::{LengthSize, StringOptions, StringRead, StringType, StringWrite, TextEncoding};
