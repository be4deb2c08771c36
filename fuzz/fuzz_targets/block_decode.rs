// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for block and tree decoding.
//!
//! Both readers sit behind a checksum, but a file can still be truncated or
//! written by something else entirely. Decoding arbitrary bytes must fail
//! cleanly, and anything that does decode must survive a re-encode.

#![no_main]

use libfuzzer_sys::fuzz_target;
use quarry::storage::{decode_block, encode_block, BlockTree};

fuzz_target!(|data: &[u8]| {
    if let Ok(block) = decode_block(data) {
        // Compare encodings rather than values: a decoded idf may be NaN.
        let plain = encode_block(&block, false).expect("decoded block must encode");
        let packed = encode_block(&block, true).expect("decoded block must encode");
        for bytes in [&plain, &packed] {
            let again = decode_block(bytes).expect("re-encoded block must decode");
            assert_eq!(encode_block(&again, false).expect("encode"), plain);
        }
    }

    if let Ok(tree) = BlockTree::decode(data) {
        let bytes = tree.encode(false).expect("decoded tree must encode");
        let again = BlockTree::decode(&bytes).expect("re-encoded tree must decode");
        assert_eq!(tree.term_count(), again.term_count());
        assert_eq!(tree.blocks(), again.blocks());
    }
});
