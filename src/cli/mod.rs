// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the quarry command-line interface.
//!
//! Three subcommands: `index` builds a block index from a directory of text
//! files, `search` queries one, and `inspect` verifies and summarizes it.

pub mod display;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "quarry",
    about = "Block-partitioned inverted index with positional, wildcard, fuzzy and phonetic retrieval",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build an index from a directory of text files
    Index {
        /// Directory of documents (one file per document)
        #[arg(short, long)]
        input: PathBuf,

        /// Output directory for blocks/ and index.tree
        #[arg(short, long)]
        output: PathBuf,

        /// JSON config file (`{ "index": {...}, "scoring": {...} }`)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Tokens per temporary block (overrides the config file)
        #[arg(long)]
        temp_block_size: Option<usize>,

        /// Terms per final block (overrides the config file)
        #[arg(long)]
        terms_per_block: Option<usize>,

        /// Brotli-compress block payloads
        #[arg(long)]
        compress: bool,

        /// Lemma dictionary for a language, as `<code>=<path>` (e.g. `eng=lemmas.txt`)
        #[arg(long = "lemmas", value_name = "CODE=PATH")]
        lemmas: Vec<String>,
    },

    /// Query an index directory
    Search {
        /// Index directory written by `quarry index`
        index: PathBuf,

        /// Query text, a wildcard pattern in wildcard mode
        query: String,

        /// Retrieval mode
        #[arg(short, long, value_enum, default_value_t = SearchMode::Cosine)]
        mode: SearchMode,

        /// Maximum number of results to print
        #[arg(short, long, default_value = "10")]
        limit: usize,

        /// Largest position gap between the two phrase terms
        #[arg(short = 'k', long, default_value = "1")]
        window: u32,

        /// Edit budget for fuzzy mode
        #[arg(long, default_value = "1")]
        max_edits: usize,

        /// JSON config file (scoring section selects the overlap formula)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Lemma dictionary for a language, as `<code>=<path>`
        #[arg(long = "lemmas", value_name = "CODE=PATH")]
        lemmas: Vec<String>,
    },

    /// Verify every block of an index and print its layout
    Inspect {
        /// Index directory written by `quarry index`
        index: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SearchMode {
    /// Top documents by cosine similarity
    Cosine,
    /// Two-term tf-idf overlap ranking
    Overlap,
    /// Documents containing every query term
    And,
    /// Two terms within `--window` positions of each other
    Phrase,
    /// Vocabulary terms matching a `*` pattern
    Wildcard,
    /// Vocabulary terms within `--max-edits` edits
    Fuzzy,
    /// Vocabulary terms sharing the Soundex code
    Soundex,
}
