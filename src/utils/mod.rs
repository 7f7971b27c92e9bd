/*
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

Debug helpers.

[`HexDump`] renders a range of bytes as a classic hex dump; it is what a
[`ByteStream`](crate::impls::ByteStream) in debug mode prints on standard
error before returning an error.

*/

mod hex;
pub use hex::*;
