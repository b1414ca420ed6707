//! Correction prompts for the language model, with or without few-shot
//! word-list examples.

use std::fmt::{self, Write as _};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::{info, warn};

use crate::corpus::{ensure_dir, list_documents};
use crate::error::{Error, Result};
use crate::fewshot::{ExampleRecord, read_examples};

const EXAMPLES_INTRO: &str = "To help with the ocr correction task, here is some pairs of words inside the input text and its similar words from sundanese dictionary, you can correct an ocr output by using some pairs below as a reference for OCR-Correction Task:\n";

const NOTE: &str = "Note: The OCR output may contain incorrect text due to unclear image quality. Please remove any incorrect substrings and correct the remaining text to produce the most accurate output.\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Sundanese,
    Javanese,
    Minangkabau,
    Balinese,
}

impl Language {
    pub const ALL: [Language; 4] = [
        Language::Sundanese,
        Language::Javanese,
        Language::Minangkabau,
        Language::Balinese,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Language::Sundanese => "Sundanese",
            Language::Javanese => "Javanese",
            Language::Minangkabau => "Minangkabau",
            Language::Balinese => "Balinese",
        }
    }

    /// Short directory name
    pub fn slug(&self) -> &'static str {
        match self {
            Language::Sundanese => "sunda",
            Language::Javanese => "jawa",
            Language::Minangkabau => "minang",
            Language::Balinese => "bali",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Language {
    type Err = Error;

    /// Accepts the display name or the slug
    fn from_str(s: &str) -> Result<Self> {
        Language::ALL
            .into_iter()
            .find(|lang| lang.name() == s || lang.slug() == s)
            .ok_or_else(|| Error::UnknownLanguage(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotType {
    FewShot,
    ZeroShot,
}

impl ShotType {
    pub fn from_flag(few_shot: bool) -> Self {
        if few_shot {
            ShotType::FewShot
        } else {
            ShotType::ZeroShot
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ShotType::FewShot => "fewShot",
            ShotType::ZeroShot => "zeroShot",
        }
    }
}

pub fn few_shot_prompt(input_text: &str, language: Language, examples: &[ExampleRecord]) -> String {
    let mut prompt = format!("Please correct the OCR output in {language} language:\n{input_text}\n\n");
    if !examples.is_empty() {
        prompt.push_str(EXAMPLES_INTRO);
        for example in examples {
            let _ = writeln!(prompt, "{}: {}", example.input, example.output);
        }
        prompt.push('\n');
    }
    prompt.push_str(NOTE);
    prompt.push_str(&desired_output(language));
    prompt
}

pub fn zero_shot_prompt(input_text: &str, language: Language) -> String {
    let mut prompt = format!("Please correct the OCR output in {language} language:\n{input_text}\n");
    prompt.push_str(NOTE);
    prompt.push_str(&desired_output(language));
    prompt
}

fn desired_output(language: Language) -> String {
    format!(
        "Desired Output: Corrected text in {language} language with proper punctuation and spacing.\nOutput:"
    )
}

/// `<slug>/prompt-template/<model>_<shot>`, where `<model>` is the last
/// `/`-separated segment of the model name.
pub fn prompt_output_dir(model_name: &str, language: Language, shot: ShotType) -> PathBuf {
    let model = model_name.rsplit('/').next().unwrap_or(model_name);
    Path::new(language.slug())
        .join("prompt-template")
        .join(format!("{model}_{}", shot.label()))
}

/// Write a prompt for every document in `input_folder` to `output_folder`.
///
/// Few-shot prompts read `<stem>.json` from `word_list_folder`; a missing
/// or empty word list gives a prompt without the examples block.
pub fn write_prompts(
    word_list_folder: &Path,
    input_folder: &Path,
    output_folder: &Path,
    language: Language,
    shot: ShotType,
) -> Result<usize> {
    ensure_dir(output_folder)?;

    let mut written = 0;
    for document in list_documents(input_folder)? {
        let input_text = document.read_text()?;
        let prompt = match shot {
            ShotType::FewShot => {
                let examples = load_word_list_examples(word_list_folder, &document.stem)?;
                few_shot_prompt(&input_text, language, &examples)
            }
            ShotType::ZeroShot => zero_shot_prompt(&input_text, language),
        };

        let output_path = output_folder.join(format!("{}.txt", document.stem));
        fs::write(&output_path, prompt).map_err(|e| Error::io(&output_path, e))?;
        info!("Generated prompt: {}", output_path.display());
        written += 1;
    }

    Ok(written)
}

fn load_word_list_examples(word_list_folder: &Path, stem: &str) -> Result<Vec<ExampleRecord>> {
    let path = word_list_folder.join(format!("{stem}.json"));
    if !path.is_file() {
        warn!("No word list for {}, writing prompt without examples", stem);
        return Ok(Vec::new());
    }
    read_examples(&path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn examples() -> Vec<ExampleRecord> {
        vec![
            ExampleRecord {
                input: "Ngara".into(),
                output: "Nagar,Negar".into(),
            },
            ExampleRecord {
                input: "sunda".into(),
                output: "sunda".into(),
            },
        ]
    }

    #[test]
    fn test_language_parsing() {
        assert_eq!("Sundanese".parse::<Language>().unwrap(), Language::Sundanese);
        assert_eq!("bali".parse::<Language>().unwrap(), Language::Balinese);
        assert_eq!(Language::Minangkabau.slug(), "minang");
        assert!(matches!(
            "Klingon".parse::<Language>(),
            Err(Error::UnknownLanguage(_))
        ));
    }

    #[test]
    fn test_few_shot_prompt_text() {
        let prompt = few_shot_prompt("Ngara di sunda", Language::Sundanese, &examples());
        let expected = format!(
            "Please correct the OCR output in Sundanese language:\nNgara di sunda\n\n\
             {EXAMPLES_INTRO}Ngara: Nagar,Negar\nsunda: sunda\n\n{NOTE}\
             Desired Output: Corrected text in Sundanese language with proper punctuation and spacing.\nOutput:"
        );
        assert_eq!(prompt, expected);
    }

    #[test]
    fn test_few_shot_without_examples() {
        let prompt = few_shot_prompt("teks", Language::Javanese, &[]);
        assert!(!prompt.contains("pairs of words"));
        assert!(prompt.starts_with("Please correct the OCR output in Javanese language:\nteks\n\nNote:"));
    }

    #[test]
    fn test_zero_shot_prompt_text() {
        let prompt = zero_shot_prompt("teks", Language::Balinese);
        assert!(prompt.starts_with("Please correct the OCR output in Balinese language:\nteks\nNote:"));
        assert!(prompt.ends_with("Balinese language with proper punctuation and spacing.\nOutput:"));
    }

    #[test]
    fn test_prompt_output_dir() {
        assert_eq!(
            prompt_output_dir("meta/llama-3.1-8b-instruct", Language::Sundanese, ShotType::FewShot),
            Path::new("sunda/prompt-template/llama-3.1-8b-instruct_fewShot")
        );
        assert_eq!(
            prompt_output_dir("gemma", Language::Balinese, ShotType::from_flag(false)),
            Path::new("bali/prompt-template/gemma_zeroShot")
        );
    }

    #[test]
    fn test_write_prompts_few_shot() {
        let words = tempfile::tempdir().unwrap();
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        fs::write(input.path().join("1.txt"), "Ngara di sunda\n").unwrap();
        fs::write(input.path().join("2.txt"), "teks").unwrap();
        crate::fewshot::write_examples(&words.path().join("1.json"), &examples()).unwrap();
        fs::write(words.path().join("2.json"), "").unwrap();

        let written = write_prompts(
            words.path(),
            input.path(),
            output.path(),
            Language::Sundanese,
            ShotType::FewShot,
        )
        .unwrap();
        assert_eq!(written, 2);

        let first = fs::read_to_string(output.path().join("1.txt")).unwrap();
        assert_eq!(first, few_shot_prompt("Ngara di sunda", Language::Sundanese, &examples()));
        let second = fs::read_to_string(output.path().join("2.txt")).unwrap();
        assert_eq!(second, few_shot_prompt("teks", Language::Sundanese, &[]));
    }

    #[test]
    fn test_write_prompts_zero_shot_ignores_word_lists() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        fs::write(input.path().join("7.txt"), "teks").unwrap();

        write_prompts(
            Path::new("/nonexistent"),
            input.path(),
            output.path(),
            Language::Javanese,
            ShotType::ZeroShot,
        )
        .unwrap();
        let prompt = fs::read_to_string(output.path().join("7.txt")).unwrap();
        assert_eq!(prompt, zero_shot_prompt("teks", Language::Javanese));
    }
}
