/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! The error type shared by all stream operations.

use alloc::string::String;

/// The error returned by every fallible operation on a
/// [`ByteStream`](crate::impls::ByteStream).
///
/// All errors are detected before the byte store or the cursor are modified,
/// so a failed operation leaves the stream exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamError {
    /// An access would exceed the byte store of a strict stream.
    Capacity {
        /// The store length the access needs.
        required: usize,
        /// The current store length.
        size: usize,
    },
    /// A value does not fit the requested width or signedness, or a string
    /// is longer than its length prefix can describe.
    Range(String),
    /// An argument is invalid (e.g., a bit width outside 1..=32).
    Configuration(String),
    /// The operation is structurally forbidden (e.g., resizing a strict stream).
    InvalidOperation(String),
}

impl core::error::Error for StreamError {}

impl core::fmt::Display for StreamError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StreamError::Capacity { required, size } => write!(
                f,
                "Access needs {} bytes but the strict stream holds {} bytes",
                required, size
            ),
            StreamError::Range(msg) => write!(f, "Value out of range: {}", msg),
            StreamError::Configuration(msg) => write!(f, "Invalid configuration: {}", msg),
            StreamError::InvalidOperation(msg) => write!(f, "Invalid operation: {}", msg),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_display() {
        let e = StreamError::Capacity {
            required: 10,
            size: 4,
        };
        assert_eq!(
            e.to_string(),
            "Access needs 10 bytes but the strict stream holds 4 bytes"
        );
        assert!(
            StreamError::Range("300 in 8 bits".into())
                .to_string()
                .contains("300 in 8 bits")
        );
    }
}
