/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

Implementations of the stream traits.

[`ByteStream`] owns a growable byte store and a cursor, and implements all
the traits in [`traits`](crate::traits); hence, all the codecs in
[`codes`](crate::codes) are available on it. The [`bitfield`] module contains
the bit-exact packing logic it uses, which works on plain byte slices and can
be used independently.

*/

pub mod bitfield;

mod byte_stream;
pub use byte_stream::*;
