//! Fuzz target for the sequence decoder.
//!
//! Tests that decoding arbitrary byte runs never panics, never reads past the
//! input and always makes progress once a sequence is complete. The decoder
//! handles untrusted terminal input, so these guarantees matter.

#![no_main]

use gila_term::input::{Event, decode, decode_timed_out};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut remaining = data;

    while !remaining.is_empty() {
        let (event, consumed) = decode(remaining);
        assert!(consumed <= remaining.len(), "decoder overran its input");

        if consumed == 0 {
            assert_eq!(event, Event::None, "event reported without progress");

            // Nothing more is coming: the resolved form must not overrun either.
            let (_, resolved) = decode_timed_out(remaining);
            assert!(resolved <= remaining.len());
            break;
        }

        remaining = &remaining[consumed..];
    }
});
