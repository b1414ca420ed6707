//! Approximate lexical matching of OCR tokens against a dictionary.
//!
//! A dictionary word qualifies as a hint for a token in two ways:
//! - its longest common substring with the token covers at least
//!   `threshold` of the token's length, or
//! - it literally contains the token (case-insensitive), in which case the
//!   token-length slice at the first occurrence is offered with full score.
//!
//! Lengths and positions are counted in chars throughout.

use std::cmp::Reverse;

use crate::config::MatchConfig;
use crate::error::{Error, Result};

/// A dictionary-derived suggestion and its length score
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub text: String,
    pub score: usize,
}

impl Candidate {
    fn new(text: impl Into<String>, score: usize) -> Self {
        Self {
            text: text.into(),
            score,
        }
    }
}

/// Length of the longest run of chars shared by `a` and `b`.
///
/// Classic DP over suffix lengths with two rows; `a` and `b` are scanned left
/// to right and the first maximum wins, though only its length is reported.
pub fn longest_common_substring_length(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    let mut best = 0;

    for &ca in &a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb { prev[j] + 1 } else { 0 };
            if curr[j + 1] > best {
                best = curr[j + 1];
            }
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    best
}

/// Char index of the first occurrence of `needle` in `haystack`
fn find_char_index(haystack: &str, needle: &str) -> Option<usize> {
    haystack
        .find(needle)
        .map(|byte_idx| haystack[..byte_idx].chars().count())
}

/// Up to `config.k` dictionary candidates for `token`, best first.
///
/// Exact-containment hits come before threshold-passing similarity hits and
/// the list is then stably sorted by score (descending) and candidate length
/// (ascending).
pub fn k_most_similar_words<S: AsRef<str>>(
    token: &str,
    dictionary: &[S],
    config: &MatchConfig,
) -> Result<Vec<Candidate>> {
    config.validate()?;
    let token_len = token.chars().count();
    if token_len == 0 {
        return Err(Error::EmptyToken);
    }
    if config.k == 0 {
        return Ok(Vec::new());
    }

    let word_lower = token.to_lowercase();
    let mut exact = Vec::new();
    let mut similar = Vec::new();

    for dict_word in dictionary {
        let dict_word = dict_word.as_ref();
        let dict_lower = dict_word.to_lowercase();

        let lcs = longest_common_substring_length(&word_lower, &dict_lower);
        if lcs as f64 / token_len as f64 >= config.threshold {
            similar.push(Candidate::new(dict_word, lcs));
        }

        if let Some(idx) = find_char_index(&dict_lower, &word_lower) {
            // Indexing the original word with a position from its lowercase
            // form; the slice is clamped when case folding changed the length.
            let slice: String = dict_word.chars().skip(idx).take(token_len).collect();
            exact.push(Candidate::new(slice, token_len));
        }
    }

    let mut combined = exact;
    combined.extend(similar);
    combined.sort_by_key(|c| (Reverse(c.score), c.text.chars().count()));
    combined.truncate(config.k);

    Ok(combined)
}

/// Carry the case pattern of `original` onto `candidate`, position by
/// position. The result is as long as the shorter of the two inputs.
pub fn apply_case(original: &str, candidate: &str) -> String {
    let mut out = String::with_capacity(candidate.len());
    for (orig_char, dict_char) in original.chars().zip(candidate.chars()) {
        if orig_char.is_uppercase() {
            out.extend(dict_char.to_uppercase());
        } else {
            out.extend(dict_char.to_lowercase());
        }
    }
    out
}
