/*
 * SPDX-FileCopyrightText: 2023 Inria
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Differential harness: every command is applied both to a [`ByteStream`]
//! and to a naive model that moves one bit at a time, and the two must agree
//! on success, store contents, and cursor position.

use crate::prelude::*;
use arbitrary::Arbitrary;

const DEBUG: bool = false;

macro_rules! debugln {
    ($($arg:tt)*) => {
        if DEBUG {
            println!($($arg)*);
        }
    };
}

#[derive(Arbitrary, Debug, Clone)]
pub struct FuzzCase {
    init: Vec<u8>,
    strict: bool,
    commands: Vec<RandomCommand>,
}

#[derive(Arbitrary, Debug, Clone)]
enum RandomCommand {
    Goto(u8, u8),
    Skip(i8, i8),
    Bits(u32, u8, Endian),
    Int(u64, u8, Endian),
    Double(f64, Endian),
    Bytes(Vec<u8>),
    Pascal(String),
    Xor(u8, u8, u8),
    Insert(Vec<u8>, u8),
    Delete(u8, u8),
}

struct Model {
    data: Vec<u8>,
    pos: u64,
    strict: bool,
}

impl Model {
    fn ensure(&mut self, required: usize) -> bool {
        if required <= self.data.len() {
            true
        } else if self.strict {
            false
        } else {
            self.data.resize(required, 0);
            true
        }
    }

    fn bit_mask(q: u64, endian: Endian) -> u8 {
        match endian {
            Endian::Big => 1 << (7 - q % 8),
            Endian::Little => 1 << (q % 8),
        }
    }

    fn write_bits(&mut self, value: u32, n: u32, endian: Endian) -> bool {
        if n == 0 {
            return true;
        }
        if !self.ensure((self.pos + n as u64).div_ceil(8) as usize) {
            return false;
        }
        for k in 0..n {
            let bit = match endian {
                Endian::Big => (value >> (n - 1 - k)) & 1,
                Endian::Little => (value >> k) & 1,
            };
            let q = self.pos + k as u64;
            let mask = Self::bit_mask(q, endian);
            let byte = &mut self.data[(q / 8) as usize];
            *byte = if bit != 0 { *byte | mask } else { *byte & !mask };
        }
        self.pos += n as u64;
        true
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> bool {
        let start = (self.pos / 8) as usize;
        if !self.ensure(start + bytes.len()) {
            return false;
        }
        self.data[start..start + bytes.len()].copy_from_slice(bytes);
        self.pos = (start + bytes.len()) as u64 * 8;
        true
    }
}

fn to_bytes(value: u64, width: usize, endian: Endian) -> Vec<u8> {
    let le = value.to_le_bytes();
    let mut bytes = le[..width].to_vec();
    if endian == Endian::Big {
        bytes.reverse();
    }
    bytes
}

pub fn harness(data: FuzzCase) {
    let config = StreamConfig::default().strict(data.strict);
    let mut stream = ByteStream::with_config(data.init.clone(), config).unwrap();
    let mut model = Model {
        data: data.init,
        pos: 0,
        strict: data.strict,
    };

    for command in data.commands {
        debugln!("{:?}", command);
        match command {
            RandomCommand::Goto(byte, bit) => {
                let target = byte as u64 * 8 + bit as u64;
                let ok = model.ensure(target.div_ceil(8) as usize);
                if ok {
                    model.pos = target;
                }
                assert_eq!(stream.goto(byte as usize, bit as u64).is_ok(), ok);
            }
            RandomCommand::Skip(bytes, bits) => {
                let target = (model.pos as i64 + bytes as i64 * 8 + bits as i64).max(0) as u64;
                let ok = model.ensure(target.div_ceil(8) as usize);
                if ok {
                    model.pos = target;
                }
                assert_eq!(stream.skip(bytes as i64, bits as i64).is_ok(), ok);
            }
            RandomCommand::Bits(value, n, endian) => {
                let n = n as u32 % 33;
                let value = if n == 32 { value } else { value & ((1 << n) - 1) };
                let ok = model.write_bits(value, n, endian);
                assert_eq!(stream.write_bits(value, n, endian).is_ok(), ok);
                if ok && n != 0 {
                    stream.skip(0, -(n as i64)).unwrap();
                    let expected = ((value as i64) << (64 - n)) >> (64 - n);
                    assert_eq!(
                        stream.read_field(n, false, Some(endian)).unwrap(),
                        expected
                    );
                }
            }
            RandomCommand::Int(value, width, endian) => {
                let width = [1, 2, 4, 8][width as usize % 4];
                let value = if width == 8 {
                    value
                } else {
                    value & ((1 << (width * 8)) - 1)
                };
                let start = model.pos / 8;
                let ok = model.write_bytes(&to_bytes(value, width, endian));
                assert_eq!(
                    stream
                        .write_int_dyn(value as i128, width, true, Some(endian))
                        .is_ok(),
                    ok
                );
                if ok {
                    stream.goto(start as usize, 0).unwrap();
                    assert_eq!(
                        stream.read_int_dyn(width, true, Some(endian)).unwrap(),
                        value as i128
                    );
                }
            }
            RandomCommand::Double(value, endian) => {
                if value.is_nan() {
                    continue;
                }
                let start = model.pos / 8;
                let ok = model.write_bytes(&to_bytes(value.to_bits(), 8, endian));
                assert_eq!(stream.write_double(value, Some(endian)).is_ok(), ok);
                if ok {
                    stream.goto(start as usize, 0).unwrap();
                    assert_eq!(
                        stream.read_double(Some(endian)).unwrap().to_bits(),
                        value.to_bits()
                    );
                }
            }
            RandomCommand::Bytes(bytes) => {
                let ok = model.write_bytes(&bytes);
                assert_eq!(stream.write_bytes(&bytes).is_ok(), ok);
            }
            RandomCommand::Pascal(s) => {
                let options = StringOptions::new(StringType::Pascal);
                let start = model.pos / 8;
                let result = stream.write_string(&s, &options);
                if s.len() > u8::MAX as usize {
                    assert!(matches!(result, Err(StreamError::Range(_))));
                } else {
                    let mut bytes = vec![s.len() as u8];
                    bytes.extend_from_slice(s.as_bytes());
                    let ok = model.write_bytes(&bytes);
                    assert_eq!(result.is_ok(), ok);
                    if ok {
                        stream.goto(start as usize, 0).unwrap();
                        assert_eq!(stream.read_string(&options).unwrap(), s);
                    }
                }
            }
            RandomCommand::Xor(key, a, b) => {
                let range = a.min(b) as usize..a.max(b) as usize;
                let ok = model.ensure(range.end);
                if ok {
                    for byte in &mut model.data[range.clone()] {
                        *byte ^= key;
                    }
                }
                assert_eq!(stream.xor(key, range, false).is_ok(), ok);
            }
            RandomCommand::Insert(bytes, at) => {
                let result = stream.insert(&bytes, at as usize, false);
                if model.strict {
                    assert!(matches!(result, Err(StreamError::InvalidOperation(_))));
                } else {
                    assert!(result.is_ok());
                    model.ensure(at as usize);
                    model
                        .data
                        .splice(at as usize..at as usize, bytes.iter().copied());
                }
            }
            RandomCommand::Delete(a, b) => {
                let result = stream.delete(a.min(b) as usize..a.max(b) as usize, false);
                if model.strict {
                    assert!(matches!(result, Err(StreamError::InvalidOperation(_))));
                } else {
                    let len = model.data.len();
                    let range = (a.min(b) as usize).min(len)..(a.max(b) as usize).min(len);
                    let removed: Vec<u8> = model.data.drain(range).collect();
                    assert_eq!(result.unwrap(), removed);
                    model.pos = model.pos.min(model.data.len() as u64 * 8);
                }
            }
        }
        assert_eq!(stream.as_slice(), &model.data[..]);
        assert_eq!(stream.bit_pos(), model.pos);
    }
}
