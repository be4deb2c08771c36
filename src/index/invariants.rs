// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Structural checks over a term → posting list map.
//!
//! | Invariant                | Violation                |
//! |--------------------------|--------------------------|
//! | term is non-empty        | `EmptyTerm`              |
//! | list has ≥1 posting      | `EmptyPostingList`       |
//! | key matches `doc_id`     | `MisfiledPosting`        |
//! | positions strictly rise  | `UnsortedPositions`      |
//! | `frequency == |positions|` | `IncorrectFrequency`   |
//! | `total == Σ frequency`   | `IncorrectTotalFrequency`|
//! | idf > 0 after statistics | `NonPositiveIdf`         |

use std::collections::BTreeMap;
use std::fmt;

use super::postings::PostingList;
use crate::types::DocId;

#[derive(Debug, Clone, PartialEq)]
pub enum InvariantError {
    EmptyTerm,
    EmptyPostingList {
        term: String,
    },
    MisfiledPosting {
        term: String,
        key: DocId,
        doc_id: DocId,
    },
    UnsortedPositions {
        term: String,
        doc_id: DocId,
        index: usize,
    },
    IncorrectFrequency {
        term: String,
        doc_id: DocId,
        claimed: u32,
        actual: usize,
    },
    IncorrectTotalFrequency {
        term: String,
        claimed: u64,
        actual: u64,
    },
    NonPositiveIdf {
        term: String,
        idf: f64,
    },
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvariantError::EmptyTerm => write!(f, "empty term in vocabulary"),
            InvariantError::EmptyPostingList { term } => {
                write!(f, "posting list for '{}' is empty", term)
            }
            InvariantError::MisfiledPosting { term, key, doc_id } => {
                write!(
                    f,
                    "posting for '{}' stored under doc {} claims doc {}",
                    term, key, doc_id
                )
            }
            InvariantError::UnsortedPositions {
                term,
                doc_id,
                index,
            } => {
                write!(
                    f,
                    "positions of '{}' in doc {} not strictly ascending at {}",
                    term, doc_id, index
                )
            }
            InvariantError::IncorrectFrequency {
                term,
                doc_id,
                claimed,
                actual,
            } => {
                write!(
                    f,
                    "'{}' in doc {} has frequency {} but {} positions",
                    term, doc_id, claimed, actual
                )
            }
            InvariantError::IncorrectTotalFrequency {
                term,
                claimed,
                actual,
            } => {
                write!(
                    f,
                    "'{}' has total_frequency {} but postings sum to {}",
                    term, claimed, actual
                )
            }
            InvariantError::NonPositiveIdf { term, idf } => {
                write!(f, "'{}' has idf {}", term, idf)
            }
        }
    }
}

impl std::error::Error for InvariantError {}

/// First violated invariant, if any. `with_idf` additionally requires every
/// idf (collection and per-document) to be positive.
pub fn check_postings(
    postings: &BTreeMap<String, PostingList>,
    with_idf: bool,
) -> Result<(), InvariantError> {
    for (term, list) in postings {
        if term.is_empty() {
            return Err(InvariantError::EmptyTerm);
        }
        if list.docs.is_empty() {
            return Err(InvariantError::EmptyPostingList { term: term.clone() });
        }

        let mut sum = 0u64;
        for (&key, posting) in &list.docs {
            if posting.doc_id != key {
                return Err(InvariantError::MisfiledPosting {
                    term: term.clone(),
                    key,
                    doc_id: posting.doc_id,
                });
            }
            if let Some(index) = posting.positions.windows(2).position(|w| w[0] >= w[1]) {
                return Err(InvariantError::UnsortedPositions {
                    term: term.clone(),
                    doc_id: key,
                    index: index + 1,
                });
            }
            if posting.frequency as usize != posting.positions.len() {
                return Err(InvariantError::IncorrectFrequency {
                    term: term.clone(),
                    doc_id: key,
                    claimed: posting.frequency,
                    actual: posting.positions.len(),
                });
            }
            if with_idf && posting.idf <= 0.0 {
                return Err(InvariantError::NonPositiveIdf {
                    term: term.clone(),
                    idf: posting.idf,
                });
            }
            sum += u64::from(posting.frequency);
        }

        if list.total_frequency != sum {
            return Err(InvariantError::IncorrectTotalFrequency {
                term: term.clone(),
                claimed: list.total_frequency,
                actual: sum,
            });
        }
        if with_idf && list.idf <= 0.0 {
            return Err(InvariantError::NonPositiveIdf {
                term: term.clone(),
                idf: list.idf,
            });
        }
    }
    Ok(())
}
