//! Fuzz target: `osc::decode_packet`
//!
//! Drives arbitrary byte sequences into the OSC decoder and asserts
//! that it never panics and that every decoded message is internally
//! consistent (non-empty address, arguments bounded by the input).
//!
//! cargo fuzz run fuzz_osc_decoder

#![no_main]

use libfuzzer_sys::fuzz_target;
use vrcmute::osc::{OscValue, decode_packet};

fuzz_target!(|data: &[u8]| {
    for msg in decode_packet(data) {
        assert!(!msg.address.is_empty(), "decoder must not yield empty addresses");
        for arg in &msg.args {
            if let OscValue::Blob(b) = arg {
                assert!(b.len() <= data.len(), "blob exceeds input length");
            }
        }
    }
});
