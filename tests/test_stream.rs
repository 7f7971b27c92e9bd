/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use dsi_bitbuffer::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::error::Error;

type Result = core::result::Result<(), Box<dyn Error + Send + Sync + 'static>>;

#[test]
fn test_bitfield_example() -> Result {
    let mut stream = ByteStream::new(vec![0]);
    stream.write_field(5, 3, true, Some(BE))?;
    stream.write_field(3, 3, true, Some(BE))?;
    assert_eq!(stream.as_slice(), &[0xac]);
    assert_eq!((stream.byte_pos(), stream.bit_offset()), (0, 6));
    stream.goto(0, 0)?;
    assert_eq!(stream.read_field(3, true, Some(BE))?, 5);
    assert_eq!(stream.read_field(3, true, Some(BE))?, 3);
    Ok(())
}

#[test]
fn test_endian_example() -> Result {
    let mut stream = ByteStream::new(vec![0; 4]);
    stream.write_u32(0x01020304, Some(LE))?;
    stream.goto(0, 0)?;
    assert_eq!(stream.read_u32(Some(BE))?, 0x04030201);
    assert_eq!(stream.len(), 4);
    Ok(())
}

#[test]
fn test_default_endianness() -> Result {
    let mut stream = ByteStream::new(vec![]);
    stream.write_u16(0x0102, None)?;
    stream.set_endian("big".parse()?);
    stream.write_u16(0x0102, None)?;
    assert_eq!(stream.as_slice(), &[2, 1, 1, 2]);
    assert!(matches!(
        "middle".parse::<Endian>(),
        Err(StreamError::Configuration(_))
    ));
    Ok(())
}

/// Every failing operation on a strict stream leaves it untouched.
#[test]
fn test_strict_unchanged() -> Result {
    const N: usize = 10000;
    let mut r = SmallRng::seed_from_u64(0);
    let config = StreamConfig::default().strict(true);
    let mut stream = ByteStream::with_config(vec![0; 8], config)?;
    let mut failures = 0;
    for _ in 0..N {
        let before = stream.clone();
        let pos = r.random_range(0..=64);
        stream.goto(0, pos)?;
        let before_pos = stream.bit_pos();
        let result = match r.random_range(0..7) {
            0 => stream
                .write_field(1, r.random_range(1..=32), true, None)
                .map(|_| ()),
            1 => stream.read_bits(r.random_range(1..=32), BE).map(|_| ()),
            2 => stream.write_u32(7, None).map(|_| ()),
            3 => stream.read_double(None).map(|_| ()),
            4 => stream
                .write_string("strict", &StringOptions::default())
                .map(|_| ()),
            5 => stream.skip(0, r.random_range(-8..72)),
            _ => stream.write_single(1.0e39, None).map(|_| ()),
        };
        if let Err(err) = result {
            failures += 1;
            assert!(matches!(
                err,
                StreamError::Capacity { .. } | StreamError::Range(_)
            ));
            assert_eq!(stream.as_slice(), before.as_slice());
            assert_eq!(stream.bit_pos(), before_pos);
        }
        assert_eq!(stream.len(), 8);
    }
    assert!(failures > 0);
    Ok(())
}

#[test]
fn test_elastic_growth() -> Result {
    let mut stream = ByteStream::new(vec![0xff; 2]);
    stream.goto(1, 0)?;
    stream.write_u32(0, None)?;
    // the store grows by exactly the deficit
    assert_eq!(stream.as_slice(), &[0xff, 0, 0, 0, 0]);

    stream.goto(5, 3)?;
    assert_eq!(stream.len(), 6);
    stream.write_field(0, 14, true, None)?;
    assert_eq!(stream.len(), 8);
    assert_eq!(stream.bit_pos(), 8 * 7 + 1);

    // the partial byte is discarded, so this reads the last byte
    assert_eq!(stream.read_u8(None)?, 0);
    assert_eq!(stream.len(), 8);
    assert_eq!(stream.read_u8(None)?, 0);
    assert_eq!(stream.len(), 9);
    Ok(())
}

#[test]
fn test_cursor_advancement() -> Result {
    let mut stream = ByteStream::new(vec![]);
    stream.write_field(1, 5, true, None)?;
    assert_eq!(stream.bit_pos(), 5);
    stream.write_field(1, 5, true, None)?;
    assert_eq!((stream.byte_pos(), stream.bit_offset()), (1, 2));
    // byte-aligned operations start at the current byte
    stream.write_u16(0xabcd, Some(BE))?;
    assert_eq!((stream.byte_pos(), stream.bit_offset()), (3, 0));
    assert_eq!(&stream.as_slice()[1..], &[0xab, 0xcd]);
    stream.write_double(0.5, None)?;
    assert_eq!(stream.byte_pos(), 11);
    stream.write_bytes(b"xyz")?;
    assert_eq!(stream.byte_pos(), 14);
    stream.skip(-14, 0)?;
    assert_eq!(stream.bit_pos(), 0);
    stream.skip(1, 12)?;
    assert_eq!((stream.byte_pos(), stream.bit_offset()), (2, 4));
    stream.skip(0, -100)?;
    assert_eq!(stream.bit_pos(), 0);
    Ok(())
}

#[test]
fn test_pascal_overflow() -> Result {
    let mut stream = ByteStream::new(vec![]);
    let options = StringOptions::new(StringType::Pascal).length_size(LengthSize::Two);
    let long = "€".repeat(30000);
    assert!(matches!(
        stream.write_string(&long, &options),
        Err(StreamError::Range(_))
    ));
    assert!(stream.is_empty());
    assert_eq!(stream.bit_pos(), 0);

    stream.write_string("pascal", &options)?;
    stream.goto(0, 0)?;
    assert_eq!(stream.read_string(&options)?, "pascal");
    Ok(())
}

#[test]
fn test_editing() -> Result {
    let mut stream = ByteStream::new(b"header:payload".to_vec());
    let header = stream.extract(0..6, true)?;
    assert_eq!(header, b"header");
    assert_eq!(stream.byte_pos(), 6);
    stream.delete(6..7, true)?;
    stream.xor(0x20_u8, 6..13, false)?;
    assert_eq!(stream.as_slice(), b"headerPAYLOAD");
    stream.replace(b"HEAD", 0, false)?;
    stream.insert(b"--", 4, true)?;
    assert_eq!(stream.as_slice(), b"HEAD--erPAYLOAD");
    assert_eq!(stream.read_string(&StringOptions::default().length(2))?, "er");
    Ok(())
}

#[test]
fn test_debug() -> Result {
    // diagnostics go to standard error and never change the outcome
    let config = StreamConfig::default().strict(true).debug(true);
    let mut stream = ByteStream::with_config(vec![0x41; 40], config)?;
    stream.goto(39, 0)?;
    assert!(matches!(
        stream.write_u32(0, None),
        Err(StreamError::Capacity { required: 43, size: 40 })
    ));
    stream.set_debug(false);
    assert!(stream.delete(0..1, false).is_err());
    Ok(())
}

#[cfg(feature = "serde")]
#[test]
fn test_serde() -> Result {
    let config = StreamConfig::default().endian(BE).byte_offset(2);
    let json = serde_json::to_string(&config)?;
    assert_eq!(serde_json::from_str::<StreamConfig>(&json)?, config);

    let config: StreamConfig = serde_json::from_str(r#"{"strict": true, "endian": "big"}"#)?;
    assert_eq!(config, StreamConfig::default().strict(true).endian(BE));

    let options: StringOptions =
        serde_json::from_str(r#"{"string_type": "wide-pascal", "length_size": "Four"}"#)?;
    assert_eq!(
        options,
        StringOptions::new(StringType::WidePascal).length_size(LengthSize::Four)
    );
    Ok(())
}
