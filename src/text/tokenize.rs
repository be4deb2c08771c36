// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Whitespace tokenizer with punctuation stripping.

/// Characters removed from every word before indexing.
pub const BLACKLIST: &str = ".,-~?!\"'`;:()<>[]{}\\|/=_+*&^%$#@";

#[inline]
pub fn is_blacklisted(c: char) -> bool {
    BLACKLIST.contains(c)
}

/// Remove blacklisted characters from a word.
pub fn strip_punctuation(word: &str) -> String {
    word.chars().filter(|&c| !is_blacklisted(c)).collect()
}

/// Split a line into raw terms.
///
/// Words that consist only of punctuation disappear entirely, so the output
/// never contains an empty string.
pub fn tokenize(line: &str) -> Vec<String> {
    line.split_whitespace()
        .map(strip_punctuation)
        .filter(|word| !word.is_empty())
        .collect()
}
