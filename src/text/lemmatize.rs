// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Dictionary lemmatizer.
//!
//! Dictionaries are plain text, one `a<sep>b` pair per line. Which column holds
//! the lemma varies between the published word lists, so the loader takes a
//! [`LemmaColumns`] hint. A dictionary that loads nothing is an error: running
//! with a silently empty table would index inflected forms as distinct terms.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use tracing::debug;

use super::normalize::normalize;
use crate::error::{Error, Result};

/// Column order of a lemma dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LemmaColumns {
    /// `lemma<sep>form`
    #[default]
    LemmaFirst,
    /// `form<sep>lemma`
    FormFirst,
}

#[derive(Debug, Clone, Default)]
pub struct Lemmatizer {
    forms: BTreeMap<String, String>,
}

impl Lemmatizer {
    /// Load a tab-separated dictionary.
    pub fn from_file(path: &Path, columns: LemmaColumns) -> Result<Self> {
        Self::from_file_with_separator(path, columns, '\t')
    }

    pub fn from_file_with_separator(
        path: &Path,
        columns: LemmaColumns,
        separator: char,
    ) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let lemmatizer = Self::parse(&content, columns, separator).map_err(|(line, reason)| {
            Error::MalformedDictionary {
                path: path.to_path_buf(),
                line,
                reason,
            }
        })?;

        if lemmatizer.is_empty() {
            return Err(Error::EmptyDictionary {
                path: path.to_path_buf(),
            });
        }
        debug!(path = %path.display(), entries = lemmatizer.len(), "loaded lemma dictionary");
        Ok(lemmatizer)
    }

    /// Parse dictionary text. On failure returns the 1-based line and the reason.
    fn parse(
        content: &str,
        columns: LemmaColumns,
        separator: char,
    ) -> std::result::Result<Self, (usize, String)> {
        let mut forms = BTreeMap::new();
        for (i, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split(separator).collect();
            if fields.len() != 2 {
                return Err((i + 1, format!("expected 2 fields, found {}", fields.len())));
            }
            let (lemma, form) = match columns {
                LemmaColumns::LemmaFirst => (fields[0], fields[1]),
                LemmaColumns::FormFirst => (fields[1], fields[0]),
            };
            let (lemma, form) = (normalize(lemma.trim()), normalize(form.trim()));
            if lemma.is_empty() || form.is_empty() {
                return Err((i + 1, "empty field".to_string()));
            }
            forms.insert(form, lemma);
        }
        Ok(Self { forms })
    }

    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: AsRef<str>,
    {
        let forms = pairs
            .into_iter()
            .map(|(form, lemma)| (normalize(form.as_ref()), normalize(lemma.as_ref())))
            .collect();
        Self { forms }
    }

    /// The lemma of `word`, or `word` itself when the dictionary has no entry.
    pub fn lemmatize<'a>(&'a self, word: &'a str) -> &'a str {
        self.forms.get(word).map_or(word, String::as_str)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.forms.contains_key(word)
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }
}
