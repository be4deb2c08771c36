// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Block-partitioned inverted index with positional, wildcard, fuzzy and
//! phonetic retrieval.
//!
//! Documents are analyzed into `(term, position)` tokens, inverted into
//! posting lists and either kept in memory ([`Corpus`]) or written to disk by
//! the SPIMI builder as fixed-size term blocks plus a [`BlockTree`] that maps
//! each term to its block ([`DiskIndex`] queries them lazily).
//!
//! # Architecture
//!
//! ```text
//! ┌──────────┐   ┌──────────┐   ┌──────────────┐   ┌──────────────┐
//! │  text    │──▶│  build   │──▶│    index     │──▶│   storage    │
//! │(Analyzer)│   │ (SPIMI)  │   │   (Corpus,   │   │ (blocks,     │
//! │          │   │          │   │ PostingList) │   │  BlockTree)  │
//! └──────────┘   └──────────┘   └──────────────┘   └──────────────┘
//!                                  │    │    │            │
//!                 ┌────────────────┘    │    └──────┐     │
//!                 ▼                     ▼           ▼     ▼
//!           ┌──────────┐         ┌──────────┐   ┌─────────────────┐
//!           │  kgram   │         │ phonetic │   │ scoring         │
//!           │(wildcard)│         │(soundex) │   │ (zones, tf-idf, │
//!           └──────────┘         └──────────┘   │  cosine)        │
//!                 fuzzy (automaton + trie)      └─────────────────┘
//! ```
//!
//! | Module     | Key types                                          |
//! |------------|----------------------------------------------------|
//! | `types`    | `DocId`, `Token`, `Document`, `ScoredDoc`          |
//! | `text`     | `Analyzer`, `Lemmatizer`, `detect_language`        |
//! | `index`    | `Corpus`, `PostingList`, `PostingsLookup`          |
//! | `kgram`    | `KGramIndex`                                       |
//! | `phonetic` | `PhoneticIndex`, `soundex`                         |
//! | `fuzzy`    | `SparseAutomaton`, `AutomatonTrie`                 |
//! | `storage`  | `BlockTree`, `DiskIndex`, block codec              |
//! | `build`    | `build_index`, `SpimiBuilder`, `spimi`             |
//! | `scoring`  | `ZoneIndex`, `rank_by_tfidf_overlap`, `rank_by_cosine` |
//!
//! # Usage
//!
//! ```ignore
//! use quarry::{build_index, Document, DocId};
//!
//! let docs = vec![Document::new(DocId(0), "a.txt", "home sales rise in july")];
//! let corpus = build_index(&docs);
//! let hits = corpus.wildcard_search("ho*");
//! ```

pub mod build;
pub mod config;
mod error;
pub mod fuzzy;
pub mod index;
pub mod kgram;
pub mod phonetic;
pub mod scoring;
pub mod storage;
pub mod text;
mod types;

#[doc(hidden)]
pub mod testing;

pub use build::{build_index, build_index_with, load_documents, spimi, BuildReport, SpimiBuilder};
pub use config::{Config, IndexConfig, OverlapFormula, ScoringConfig, ZoneWeights};
pub use error::{Error, Result};
pub use fuzzy::{AutomatonTrie, SparseAutomaton};
pub use index::{
    intersect, positional_intersect, Corpus, InvariantError, PositionalMatch, Posting, PostingList,
    PostingsLookup,
};
pub use kgram::KGramIndex;
pub use phonetic::{soundex, PhoneticIndex};
pub use scoring::{rank_by_cosine, rank_by_tfidf_overlap, ZoneIndex};
pub use storage::{BlockSummary, BlockTree, DiskIndex};
pub use text::{Analyzer, Language, Lemmatizer};
pub use types::{title_from_file, DocId, Document, Position, ScoredDoc, Token};
