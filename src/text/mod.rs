// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Text analysis: raw line → indexable terms.
//!
//! The pipeline is tokenize → normalize → lemmatize. The lemmatizer is chosen
//! per document from its detected language; documents in a language with no
//! registered dictionary keep their normalized surface forms.

mod language;
mod lemmatize;
mod normalize;
mod tokenize;

use std::collections::BTreeMap;

pub use language::{detect_language, Language};
pub use lemmatize::{LemmaColumns, Lemmatizer};
pub use normalize::normalize;
pub use tokenize::{is_blacklisted, strip_punctuation, tokenize, BLACKLIST};

use crate::types::{Document, Position};

/// Bytes of body text sampled for language detection.
const DETECTION_SAMPLE: usize = 4096;

/// Terms of one document with their 1-based positions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalyzedDocument {
    pub language: Option<Language>,
    pub body: Vec<(String, Position)>,
    pub title: Vec<(String, Position)>,
}

#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    lemmatizers: BTreeMap<Language, Lemmatizer>,
}

impl Analyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the dictionary used for documents detected as `language`.
    pub fn with_lemmatizer(mut self, language: Language, lemmatizer: Lemmatizer) -> Self {
        self.lemmatizers.insert(language, lemmatizer);
        self
    }

    pub fn has_lemmatizers(&self) -> bool {
        !self.lemmatizers.is_empty()
    }

    /// Normalize and lemmatize one raw word. May return an empty string.
    pub fn analyze_word(&self, word: &str, language: Option<Language>) -> String {
        let normalized = normalize(&strip_punctuation(word));
        match language.and_then(|lang| self.lemmatizers.get(&lang)) {
            Some(lemmatizer) => lemmatizer.lemmatize(&normalized).to_string(),
            None => normalized,
        }
    }

    /// Analyze a sequence of lines as one zone, numbering positions from 1
    /// continuously across line breaks.
    pub fn analyze_lines<'a, I>(&self, lines: I, language: Option<Language>) -> Vec<(String, Position)>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut terms = Vec::new();
        let mut position: Position = 0;
        for line in lines {
            for raw in tokenize(line) {
                let term = self.analyze_word(&raw, language);
                if term.is_empty() {
                    continue;
                }
                position += 1;
                terms.push((term, position));
            }
        }
        terms
    }

    pub fn analyze_document(&self, doc: &Document) -> AnalyzedDocument {
        let language = self.document_language(doc);
        let body = self.analyze_lines(doc.lines.iter().map(String::as_str), language);
        let title = self.analyze_lines(title_words(&doc.title).iter().map(String::as_str), language);
        AnalyzedDocument {
            language,
            body,
            title,
        }
    }

    /// Query terms in order, duplicates kept.
    pub fn analyze_query(&self, query: &str) -> Vec<String> {
        let language = if self.has_lemmatizers() {
            Some(detect_language(query))
        } else {
            None
        };
        self.analyze_lines([query], language)
            .into_iter()
            .map(|(term, _)| term)
            .collect()
    }

    fn document_language(&self, doc: &Document) -> Option<Language> {
        if !self.has_lemmatizers() {
            return None;
        }
        let mut sample = String::new();
        for line in &doc.lines {
            if sample.len() >= DETECTION_SAMPLE {
                break;
            }
            sample.push_str(line);
            sample.push(' ');
        }
        Some(detect_language(&sample))
    }
}

/// File stems often use `_` or `-` as word separators.
fn title_words(title: &str) -> Vec<String> {
    vec![title.replace(['_', '-', '.'], " ")]
}
