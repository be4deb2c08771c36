// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Crate-wide error type.
//!
//! Codec functions speak `std::io::Result` (they only ever see bytes); the
//! storage layer wraps their failures into [`Error::CorruptBlock`] once it
//! knows which file the bytes came from. Lookup misses are never errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot read input directory {}: {source}", path.display())]
    InputDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("corrupt block {}: {reason}", path.display())]
    CorruptBlock { path: PathBuf, reason: String },

    #[error("malformed dictionary {} at line {line}: {reason}", path.display())]
    MalformedDictionary {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("dictionary {} has no entries", path.display())]
    EmptyDictionary { path: PathBuf },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid JSON config {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn corrupt(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::CorruptBlock {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
