//! Whitespace tokenization of a document and per-token matching.

use std::collections::HashMap;

use tracing::debug;

use crate::config::MatchConfig;
use crate::error::Result;
use crate::matcher::{apply_case, k_most_similar_words};

/// Token -> case-adjusted suggestions, iterated in first-seen token order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimilarWords {
    entries: Vec<(String, Vec<String>)>,
    index: HashMap<String, usize>,
}

impl SimilarWords {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite; an overwritten token keeps its original position.
    pub fn insert(&mut self, token: String, words: Vec<String>) {
        match self.index.get(&token) {
            Some(&pos) => self.entries[pos].1 = words,
            None => {
                self.index.insert(token.clone(), self.entries.len());
                self.entries.push((token, words));
            }
        }
    }

    pub fn get(&self, token: &str) -> Option<&[String]> {
        self.index
            .get(token)
            .map(|&pos| self.entries[pos].1.as_slice())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(token, words)| (token.as_str(), words.as_slice()))
    }

    pub fn into_vec(self) -> Vec<(String, Vec<String>)> {
        self.entries
    }
}

/// Unicode whitespace plus the ASCII information separators U+001C..U+001F
fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

/// Non-empty runs of text between separators
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split(is_separator).filter(|token| !token.is_empty())
}

/// Match every whitespace-separated token of `input_text` against the
/// dictionary. Tokens without any candidate are left out.
pub fn find_similar_words_in_text<S: AsRef<str>>(
    input_text: &str,
    dictionary: &[S],
    config: &MatchConfig,
) -> Result<SimilarWords> {
    config.validate()?;
    let mut result = SimilarWords::new();

    for token in tokenize(input_text) {
        let similar = k_most_similar_words(token, dictionary, config)?;
        if similar.is_empty() {
            continue;
        }
        let words = similar
            .iter()
            .map(|candidate| apply_case(token, &candidate.text))
            .collect();
        result.insert(token.to_string(), words);
    }

    debug!(tokens = result.len(), "matched document tokens");
    Ok(result)
}
