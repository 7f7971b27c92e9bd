/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

Traits

[`BitSeek`] manages the cursor and the bounds policy; [`BitRead`] and
[`BitWrite`] move fields of up to 32 bits at arbitrary bit positions;
[`ByteRead`] and [`ByteWrite`] move byte-aligned data. The codecs in
[`codes`](crate::codes) are extension traits implemented for every type
implementing these traits.

*/

mod bit_stream;
pub use bit_stream::*;

mod bytes;
pub use bytes::*;

mod endianness;
pub use endianness::*;

mod words;
pub use words::*;
