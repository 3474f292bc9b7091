//! Descriptive statistics over a block of text.
//!
//! [`TextMetrics::compute`] is a total, pure function: any string, including the
//! empty string, yields a valid result.
//!
//! Counting rules:
//! - words are runs of non-whitespace separated by Unicode whitespace
//! - characters are Unicode scalar values, not bytes
//! - `character_count_no_spaces` removes only the literal space `' '`
//! - a sentence is a maximal run of `.`, `!` or `?`; at least one is always reported
//! - a paragraph is a `"\n\n"`-separated block that is non-empty after trimming
//!
//! Derived ratios are rounded to one decimal place with [`f64::round`], which
//! rounds halves away from zero (`0.25` becomes `0.3`).

use serde::{Deserialize, Serialize};

/// Reading speed used for `reading_time_minutes`.
pub const WORDS_PER_MINUTE: f64 = 200.0;

/// Number of characters kept in a text preview before truncation.
pub const PREVIEW_CHARS: usize = 100;

/// Marker appended to a truncated preview.
pub const ELLIPSIS: &str = "...";

const SENTENCE_TERMINATORS: [char; 3] = ['.', '!', '?'];

/// The eight statistics derived from one input string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextMetrics {
    pub word_count: usize,
    pub character_count: usize,
    pub character_count_no_spaces: usize,
    pub sentence_count: usize,
    pub paragraph_count: usize,
    pub average_word_length: f64,
    pub longest_word: String,
    pub reading_time_minutes: f64,
}

impl TextMetrics {
    /// Compute all metrics for `text` in one pass per statistic.
    pub fn compute(text: &str) -> Self {
        let words: Vec<&str> = text.split_whitespace().collect();
        let word_count = words.len();

        let character_count = text.chars().count();
        let character_count_no_spaces = text.chars().filter(|c| *c != ' ').count();

        let average_word_length = if word_count > 0 {
            round_one_decimal(character_count_no_spaces as f64 / word_count as f64)
        } else {
            0.0
        };

        Self {
            word_count,
            character_count,
            character_count_no_spaces,
            sentence_count: count_sentences(text),
            paragraph_count: count_paragraphs(text),
            average_word_length,
            longest_word: longest_word(&words).to_string(),
            reading_time_minutes: round_one_decimal(word_count as f64 / WORDS_PER_MINUTE),
        }
    }
}

/// Count maximal runs of sentence terminators, never reporting fewer than one.
fn count_sentences(text: &str) -> usize {
    let mut runs = 0;
    let mut in_run = false;

    for c in text.chars() {
        let is_terminator = SENTENCE_TERMINATORS.contains(&c);
        if is_terminator && !in_run {
            runs += 1;
        }
        in_run = is_terminator;
    }

    runs.max(1)
}

fn count_paragraphs(text: &str) -> usize {
    text.split("\n\n")
        .filter(|block| !block.trim().is_empty())
        .count()
}

/// First word with the maximum character length; empty if there are no words.
fn longest_word<'a>(words: &[&'a str]) -> &'a str {
    let mut best = "";
    let mut best_len = 0;

    for word in words {
        let len = word.chars().count();
        if len > best_len {
            best = word;
            best_len = len;
        }
    }

    best
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// First [`PREVIEW_CHARS`] characters of `text`, with [`ELLIPSIS`] appended when
/// anything was cut.
pub fn text_preview(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}{}", &text[..cut], ELLIPSIS),
        None => text.to_string(),
    }
}
