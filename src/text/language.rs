// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Script-based language detection.
//!
//! Good enough to pick a lemma dictionary: count letters per script, and tell
//! Ukrainian from Russian by the letters only Ukrainian uses (і ї є ґ).

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Language {
    English,
    Ukrainian,
    Russian,
    Unknown,
}

impl Language {
    /// ISO 639-3 code (`und` when undetermined).
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "eng",
            Language::Ukrainian => "ukr",
            Language::Russian => "rus",
            Language::Unknown => "und",
        }
    }

    pub fn from_code(code: &str) -> Self {
        match code {
            "eng" | "en" => Language::English,
            "ukr" | "uk" => Language::Ukrainian,
            "rus" | "ru" => Language::Russian,
            _ => Language::Unknown,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

fn is_cyrillic(c: char) -> bool {
    matches!(c, '\u{0400}'..='\u{04FF}')
}

fn is_ukrainian_only(c: char) -> bool {
    matches!(c, 'і' | 'ї' | 'є' | 'ґ' | 'І' | 'Ї' | 'Є' | 'Ґ')
}

pub fn detect_language(sample: &str) -> Language {
    let mut latin = 0usize;
    let mut cyrillic = 0usize;
    let mut ukrainian = 0usize;

    for c in sample.chars().filter(|c| c.is_alphabetic()) {
        if c.is_ascii_alphabetic() {
            latin += 1;
        } else if is_cyrillic(c) {
            cyrillic += 1;
            if is_ukrainian_only(c) {
                ukrainian += 1;
            }
        }
    }

    if cyrillic == 0 && latin == 0 {
        Language::Unknown
    } else if cyrillic >= latin {
        if ukrainian > 0 {
            Language::Ukrainian
        } else {
            Language::Russian
        }
    } else {
        Language::English
    }
}
