#![no_main]

use dsi_bitbuffer::fuzz::stream::*;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: FuzzCase| harness(data));
