// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Core data types shared by the index, the builder and the scorers.
//!
//! Documents get a dense integer id at load time (their rank in the sorted
//! file listing). Positions are 1-based token offsets within one document and
//! run continuously across line breaks.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Dense document identifier, assigned in file-name order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct DocId(pub u32);

impl DocId {
    #[inline]
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for DocId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 1-based token offset within a document.
pub type Position = u32;

/// One occurrence of a term, the unit of work fanned out while indexing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub term: String,
    pub position: Position,
    pub doc_id: DocId,
    pub file: String,
}

impl Token {
    pub fn new(term: impl Into<String>, position: Position, doc_id: DocId, file: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            position,
            doc_id,
            file: file.into(),
        }
    }
}

/// A loaded source document.
///
/// `title` is the title zone (the file stem), `lines` the body zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocId,
    pub file: String,
    pub title: String,
    pub lines: Vec<String>,
}

impl Document {
    pub fn new(id: DocId, file: impl Into<String>, text: &str) -> Self {
        let file = file.into();
        let title = title_from_file(&file);
        Self {
            id,
            file,
            title,
            lines: text.lines().map(str::to_string).collect(),
        }
    }
}

/// Title zone of a file: its name without directories or extension.
pub fn title_from_file(file: &str) -> String {
    let name = file.rsplit(['/', '\\']).next().unwrap_or(file);
    match name.rfind('.') {
        Some(dot) if dot > 0 => name[..dot].to_string(),
        _ => name.to_string(),
    }
}

/// A ranked document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredDoc {
    pub doc_id: DocId,
    pub file: String,
    pub score: f64,
}
