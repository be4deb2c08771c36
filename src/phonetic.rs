// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! American Soundex and the sound-alike dictionary built on it.
//!
//! A code is the first letter followed by three digits for the consonant
//! classes that follow it. Vowels separate repeated classes, `h` and `w` do
//! not. Terms without any ASCII letter (after diacritic stripping) have no
//! code and are simply absent from the dictionary.

use std::collections::{BTreeMap, BTreeSet};

use crate::text::normalize;

const CODE_LEN: usize = 4;

/// Digit class of a lowercase ASCII letter. `Some('0')` marks a vowel
/// (separator), `None` a letter that is skipped entirely.
fn class(c: char) -> Option<char> {
    match c {
        'b' | 'f' | 'p' | 'v' => Some('1'),
        'c' | 'g' | 'j' | 'k' | 'q' | 's' | 'x' | 'z' => Some('2'),
        'd' | 't' => Some('3'),
        'l' => Some('4'),
        'm' | 'n' => Some('5'),
        'r' => Some('6'),
        'a' | 'e' | 'i' | 'o' | 'u' | 'y' => Some('0'),
        _ => None,
    }
}

/// Soundex code of a word, e.g. `Miller` → `M460`.
pub fn soundex(word: &str) -> Option<String> {
    let letters: Vec<char> = normalize(word)
        .chars()
        .filter(char::is_ascii_alphabetic)
        .collect();
    let (&first, rest) = letters.split_first()?;

    let mut code = String::with_capacity(CODE_LEN);
    code.push(first.to_ascii_uppercase());
    let mut last = class(first);

    for &c in rest {
        if code.len() == CODE_LEN {
            break;
        }
        match class(c) {
            // h and w are transparent: they neither emit nor separate.
            None => {}
            Some('0') => last = Some('0'),
            Some(digit) => {
                if last != Some(digit) {
                    code.push(digit);
                }
                last = Some(digit);
            }
        }
    }

    while code.len() < CODE_LEN {
        code.push('0');
    }
    Some(code)
}

#[derive(Debug, Clone, Default)]
pub struct PhoneticIndex {
    codes: BTreeMap<String, BTreeSet<String>>,
}

impl PhoneticIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a term under its code. Returns false for duplicates and for
    /// terms without a code.
    pub fn insert(&mut self, term: &str) -> bool {
        match soundex(term) {
            Some(code) => self.codes.entry(code).or_default().insert(term.to_string()),
            None => false,
        }
    }

    /// Every term sharing the query's code, including the query itself when
    /// it was indexed. Sorted.
    pub fn matches(&self, term: &str) -> Vec<String> {
        soundex(term)
            .and_then(|code| self.codes.get(&code))
            .map(|terms| terms.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn terms_for_code(&self, code: &str) -> Option<&BTreeSet<String>> {
        self.codes.get(code)
    }

    pub fn code_count(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}
