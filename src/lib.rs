//! Few-shot word lists for OCR post-correction of low-resource languages.
//!
//! For every token of an OCR document the matcher looks up dictionary words
//! that share a long enough common substring with it (or contain it
//! outright), keeps the best `k`, re-applies the token's casing and samples
//! at most ten token/suggestion pairs per document. The pairs feed the
//! few-shot correction prompts built in [`prompt`].

pub mod config;
pub mod corpus;
pub mod dictionary;
pub mod error;
pub mod fewshot;
pub mod matcher;
pub mod prompt;
pub mod scanner;

pub use config::MatchConfig;
pub use corpus::{ProcessSummary, process_files};
pub use error::{Error, Result};
pub use fewshot::{ExampleRecord, MAX_EXAMPLES_PER_DOCUMENT, sample_examples};
pub use matcher::{Candidate, apply_case, k_most_similar_words, longest_common_substring_length};
pub use prompt::{Language, ShotType};
pub use scanner::{SimilarWords, find_similar_words_in_text};

#[cfg(feature = "python")]
mod python {
    use std::path::Path;

    use pyo3::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::{Language, MatchConfig};

    /// Length of the longest common substring of two strings
    #[pyfunction]
    fn longest_common_substring(str1: String, str2: String) -> usize {
        crate::longest_common_substring_length(&str1, &str2)
    }

    /// Up to k (text, score) candidates for a word, best first
    #[pyfunction]
    fn k_most_similar_words(
        word: String,
        dictionary: Vec<String>,
        k: i64,
        threshold: f64,
    ) -> PyResult<Vec<(String, usize)>> {
        let config = MatchConfig::new(k, threshold)?;
        let found = crate::k_most_similar_words(&word, &dictionary, &config)?;
        Ok(found.into_iter().map(|c| (c.text, c.score)).collect())
    }

    #[pyfunction]
    fn apply_case(original: String, word: String) -> String {
        crate::apply_case(&original, &word)
    }

    /// Returns: list of (token, suggestions) in first-seen token order
    #[pyfunction]
    #[pyo3(signature = (input_text, dictionary, k=3, threshold=0.8))]
    fn find_similar_words_in_text(
        input_text: String,
        dictionary: Vec<String>,
        k: i64,
        threshold: f64,
    ) -> PyResult<Vec<(String, Vec<String>)>> {
        let config = MatchConfig::new(k, threshold)?;
        let found = crate::find_similar_words_in_text(&input_text, &dictionary, &config)?;
        Ok(found.into_vec())
    }

    /// Write one JSON-lines word list per document
    /// Returns: (documents_processed, records_written)
    #[pyfunction]
    #[pyo3(signature = (input_folder, output_folder, dictionary_path, k=3, threshold=0.8, seed=None))]
    fn process_files(
        input_folder: String,
        output_folder: String,
        dictionary_path: String,
        k: i64,
        threshold: f64,
        seed: Option<u64>,
    ) -> PyResult<(usize, usize)> {
        let config = MatchConfig::new(k, threshold)?;
        let dictionary = crate::dictionary::load_any(Path::new(&dictionary_path))?;
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let summary = crate::process_files(
            Path::new(&input_folder),
            Path::new(&output_folder),
            &dictionary,
            &config,
            &mut rng,
        )?;
        Ok((summary.documents, summary.records))
    }

    /// Examples are (input, output) pairs
    #[pyfunction]
    fn create_few_shot_prompt(
        input_text: String,
        language: String,
        examples: Vec<(String, String)>,
    ) -> PyResult<String> {
        let language: Language = language.parse()?;
        let examples: Vec<crate::ExampleRecord> = examples
            .into_iter()
            .map(|(input, output)| crate::ExampleRecord { input, output })
            .collect();
        Ok(crate::prompt::few_shot_prompt(&input_text, language, &examples))
    }

    #[pyfunction]
    fn create_zero_shot_prompt(input_text: String, language: String) -> PyResult<String> {
        let language: Language = language.parse()?;
        Ok(crate::prompt::zero_shot_prompt(&input_text, language))
    }

    #[pymodule]
    fn ocr_fewshot(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(longest_common_substring, m)?)?;
        m.add_function(wrap_pyfunction!(k_most_similar_words, m)?)?;
        m.add_function(wrap_pyfunction!(apply_case, m)?)?;
        m.add_function(wrap_pyfunction!(find_similar_words_in_text, m)?)?;
        m.add_function(wrap_pyfunction!(process_files, m)?)?;
        m.add_function(wrap_pyfunction!(create_few_shot_prompt, m)?)?;
        m.add_function(wrap_pyfunction!(create_zero_shot_prompt, m)?)?;
        Ok(())
    }
}
