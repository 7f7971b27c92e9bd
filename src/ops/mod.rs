/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

Whole-range operations on a [`ByteStream`](crate::impls::ByteStream).

Unlike codecs, these operations address the store by absolute byte ranges
rather than through the cursor. They are inherent methods of
[`ByteStream`](crate::impls::ByteStream), as they need direct access to its
store:

- the [range transforms](transform) apply a bitwise or arithmetic operation
  to every byte of a range, using a [`Key`];
- the [region editor](region) deletes, extracts, inserts, replaces, and
  fills ranges of bytes.

Ranges must satisfy `start <= end`. All operations take a `consume` flag
that, if true, moves the cursor past the range (or, for deletion, to its
start); otherwise, the cursor is left where it is.

*/

pub mod region;

pub mod transform;
pub use transform::{BitOp, Key};
