// libs/doctor-cell/src/services/matching.rs
use std::collections::BTreeSet;

use strsim::normalized_levenshtein;
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// Folds text to the form every comparison runs on: accents stripped,
/// lowercase, punctuation turned into spaces, whitespace collapsed.
///
/// `"  Dûpont-Ben  Salah "` becomes `"dupont ben salah"`.
pub fn normalize_text(input: &str) -> String {
    let folded: String = input
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();

    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalized Levenshtein similarity scaled to 0-100. Empty input scores 0.
pub fn ratio(a: &str, b: &str) -> u8 {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    (normalized_levenshtein(a, b) * 100.0).round() as u8
}

/// Word-order insensitive similarity in 0-100 on already normalized text.
///
/// Both sides are split into de-duplicated sorted token sets. The shared
/// tokens are compared against each side's full set and the two full sets
/// against each other; the best of the three ratios wins. A query that is a
/// subset of the name's tokens (or the reverse) therefore scores 100.
pub fn token_set_ratio(a: &str, b: &str) -> u8 {
    let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();

    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0;
    }

    let shared = join_tokens(tokens_a.intersection(&tokens_b).copied());
    let only_a = join_tokens(tokens_a.difference(&tokens_b).copied());
    let only_b = join_tokens(tokens_b.difference(&tokens_a).copied());

    let combined_a = join_nonempty(&shared, &only_a);
    let combined_b = join_nonempty(&shared, &only_b);

    ratio(&shared, &combined_a)
        .max(ratio(&shared, &combined_b))
        .max(ratio(&combined_a, &combined_b))
}

fn join_tokens<'a>(tokens: impl Iterator<Item = &'a str>) -> String {
    tokens.collect::<Vec<_>>().join(" ")
}

fn join_nonempty(head: &str, tail: &str) -> String {
    match (head.is_empty(), tail.is_empty()) {
        (true, _) => tail.to_string(),
        (_, true) => head.to_string(),
        _ => format!("{} {}", head, tail),
    }
}

/// Threshold-gated name scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameMatcher {
    threshold: u8,
}

impl NameMatcher {
    pub fn new(threshold: u8) -> Self {
        Self {
            threshold: threshold.min(100),
        }
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    /// Returns the score when `name` clears the threshold. Both arguments must
    /// already be normalized; a record without a name never matches.
    pub fn score(&self, query: &str, name: &str) -> Option<u8> {
        if name.is_empty() {
            return None;
        }
        let score = token_set_ratio(query, name);
        (score >= self.threshold).then_some(score)
    }
}
