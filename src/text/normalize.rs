// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Term normalization: strip diacritics and fold case.
//!
//! - "Café" → "cafe"
//! - "naïve" → "naive"
//! - "Müller" → "muller"
//!
//! 1. NFD (split characters into base + combining marks)
//! 2. Drop nonspacing marks (category Mn)
//! 3. NFC (recompose whatever is left)
//! 4. Lowercase

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

pub fn normalize(word: &str) -> String {
    word.nfd()
        .filter(|c| !is_combining_mark(*c))
        .nfc()
        .collect::<String>()
        .to_lowercase()
}
