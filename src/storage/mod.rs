// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! On-disk index: checksummed block files and the block tree.
//!
//! ```text
//! <output>/
//! ├── index.tree          term → block, document table
//! ├── blocks/
//! │   ├── 00000.blk       terms_per_block sorted posting lists
//! │   └── ...
//! └── temp/               SPIMI spill files, removed after merge
//! ```

mod block;
mod block_tree;
mod disk;
pub mod encoding;
pub mod header;

pub use block::{decode_block, encode_block, read_block, write_block};
pub use block_tree::BlockTree;
pub use disk::{BlockSummary, DiskIndex};

pub const TREE_FILE: &str = "index.tree";
pub const BLOCKS_DIR: &str = "blocks";
pub const TEMP_DIR: &str = "temp";

/// File name of the `index`-th final block.
pub fn block_name(index: usize) -> String {
    format!("{index:05}.blk")
}

/// File name of the `index`-th temporary spill block.
pub fn temp_block_name(index: usize) -> String {
    format!("{index:05}.tmp")
}
