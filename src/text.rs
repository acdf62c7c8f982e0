//! Text helpers shared across the pipeline.
//!
//! Word counting, whitespace normalization, the token-based similarity metric
//! used by the title heuristics, and a small HTML entity decoder for metadata
//! fields that sites ship pre-escaped.

use crate::patterns;

/// Collapse whitespace runs into single spaces.
#[must_use]
pub fn normalize_spaces(s: &str) -> String {
    patterns::NORMALIZE.replace_all(s, " ").to_string()
}

/// Number of whitespace-separated words.
///
/// Mirrors the split-based count used by the title heuristic: an empty string
/// counts as one word, which the surrounding thresholds rely on.
#[must_use]
pub fn word_count(s: &str) -> usize {
    patterns::MULTIPLE_WHITESPACES.split(s).count()
}

/// Compare `text_b` to `text_a`; 1.0 = same words, 0.0 = nothing in common.
///
/// Both texts are lowercased and tokenized, then the share of `text_b` made up
/// of tokens absent from `text_a` is measured by character length.
#[must_use]
pub fn text_similarity(text_a: &str, text_b: &str) -> f64 {
    let a = text_a.to_lowercase();
    let b = text_b.to_lowercase();
    let tokens_a: Vec<&str> = patterns::TOKENIZE.split(&a).collect();
    let tokens_b: Vec<&str> = patterns::TOKENIZE.split(&b).collect();
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let uniq_tokens_b: Vec<&str> = tokens_b
        .iter()
        .filter(|t| !t.is_empty() && !tokens_a.contains(t))
        .copied()
        .collect();

    let joined_b_len = tokens_b.join(" ").len();
    if joined_b_len == 0 {
        return 0.0;
    }
    let distance_b = uniq_tokens_b.join(" ").len() as f64 / joined_b_len as f64;
    1.0 - distance_b
}

/// Decode the common HTML entities in metadata strings.
///
/// Handles the five named references plus numeric character references.
/// A reference that does not map to a valid scalar value is left as-is.
#[must_use]
pub fn unescape_html_entities(s: &str) -> String {
    if s.is_empty() {
        return String::new();
    }

    let decoded = patterns::ENTITY_REFERENCES.replace_all(s, |caps: &regex::Captures| {
        match &caps[1] {
            "quot" => "\"",
            "amp" => "&",
            "apos" => "'",
            "lt" => "<",
            "gt" => ">",
            _ => unreachable!(),
        }
        .to_string()
    });

    patterns::HTML_CHAR_CODES
        .replace_all(&decoded, |caps: &regex::Captures| {
            let code_point = caps
                .get(1)
                .and_then(|hex| u32::from_str_radix(hex.as_str(), 16).ok())
                .or_else(|| caps.get(2).and_then(|dec| dec.as_str().parse::<u32>().ok()));

            match code_point.and_then(char::from_u32) {
                Some(c) => c.to_string(),
                None => caps[0].to_string(),
            }
        })
        .to_string()
}
