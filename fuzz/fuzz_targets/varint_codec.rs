// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for varint (LEB128) encoding/decoding.
//!
//! Every length, count and position delta in a block goes through these.

#![no_main]

use libfuzzer_sys::fuzz_target;
use quarry::storage::encoding::{decode_varint, encode_varint};

fuzz_target!(|data: &[u8]| {
    // Garbage must come back as Err, never a panic.
    if let Ok((value, consumed)) = decode_varint(data) {
        assert!(consumed >= 1 && consumed <= data.len());

        let mut reencoded = Vec::new();
        encode_varint(value, &mut reencoded);
        let (redecoded, reconsumed) =
            decode_varint(&reencoded).expect("re-encoded varint must decode");

        assert_eq!(value, redecoded, "roundtrip changed {value}");
        assert_eq!(reconsumed, reencoded.len());
        // Canonical form is never longer than what we accepted.
        assert!(reencoded.len() <= consumed);
    }
});
