//! Fuzz target for Envelope::decode
//!
//! This fuzzer tests envelope decoding with arbitrary byte sequences to
//! find:
//! - Parser crashes or panics
//! - Misclassified decode errors
//! - Inputs that bypass the type-tag validation
//!
//! The fuzzer should NEVER panic. All invalid inputs should return an
//! error from the three-way taxonomy (malformed / unknown type / invalid
//! payload).

#![no_main]

use libfuzzer_sys::fuzz_target;
use matchbook_proto::{ClientRequest, Envelope, ServerMessage};

fuzz_target!(|data: &[u8]| {
    // Attempt to decode arbitrary bytes as a frame in both directions.
    // This should never panic, only return Err for invalid data.
    if let Ok(raw) = std::str::from_utf8(data) {
        let _ = Envelope::<ServerMessage>::decode(raw);
        let _ = Envelope::<ClientRequest>::decode(raw);
    }
});
