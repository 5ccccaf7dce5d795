// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bag-of-words text embedder.
//!
//! Text is lowercased, every character that is neither a word character nor
//! whitespace is removed, and the remainder is split on whitespace runs.
//! There is no stopword list and no stemming.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::SparseVector;

/// `\w` is Unicode-aware here, so accented letters survive ("Café" becomes
/// `café`) where an ASCII-only word class would strip them.
static NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s]").unwrap());

/// Splits text into normalized tokens. Never yields an empty token.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    NON_WORD
        .replace_all(&lowered, "")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Embeds text as a term-frequency vector. Empty input yields an empty vector.
pub fn embed(text: &str) -> SparseVector {
    let mut vector = SparseVector::new();
    for token in tokenize(text) {
        vector.increment(&token);
    }
    vector
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn lowercases_and_strips_punctuation() {
        let v = embed("Hello, WORLD! hello?");
        assert_eq!(v.get("hello"), 2);
        assert_eq!(v.get("world"), 1);
        assert_eq!(v.len(), 2);
    }

    #[test]
    fn punctuation_inside_words_is_removed_not_split() {
        assert_eq!(tokenize("don't e-mail"), vec!["dont", "email"]);
    }

    #[test]
    fn underscores_and_digits_are_word_characters() {
        assert_eq!(tokenize("snake_case v2"), vec!["snake_case", "v2"]);
    }

    #[test]
    fn punctuation_only_tokens_vanish() {
        let v = embed("... !!! ?");
        assert!(v.is_empty());
    }

    #[test]
    fn empty_input_is_empty_vector() {
        assert!(embed("").is_empty());
        assert!(embed("   \n\t ").is_empty());
    }

    #[test]
    fn non_ascii_letters_are_kept() {
        assert_eq!(tokenize("Café Über"), vec!["café", "über"]);
    }

    proptest! {
        #[test]
        fn counts_are_positive_and_sum_to_token_count(text in "\\PC{0,200}") {
            let v = embed(&text);
            prop_assert!(v.iter().all(|(_, c)| c > 0));
            prop_assert_eq!(v.total(), tokenize(&text).len() as u64);
        }

        #[test]
        fn tokens_are_never_empty(text in "\\PC{0,200}") {
            prop_assert!(tokenize(&text).iter().all(|t| !t.is_empty()));
        }
    }
}
