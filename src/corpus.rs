//! Folder-level processing: find OCR documents and write one example file
//! per document.

use std::fs;
use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use rand::Rng;
use regex::Regex;
use tracing::{debug, info};

use crate::config::MatchConfig;
use crate::error::{Error, Result};
use crate::fewshot::{sample_examples, write_examples};
use crate::scanner::find_similar_words_in_text;

lazy_static! {
    static ref DOCUMENT_NAME: Regex = Regex::new(r"^(.+)\.txt$").unwrap();
}

/// A plain-text document found in an input folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// File name without the `.txt` extension
    pub stem: String,
    pub path: PathBuf,
}

impl Document {
    /// Contents with surrounding whitespace removed
    pub fn read_text(&self) -> Result<String> {
        let text = fs::read_to_string(&self.path).map_err(|e| Error::io(&self.path, e))?;
        Ok(text.trim().to_string())
    }
}

/// Totals for one [`process_files`] run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessSummary {
    pub documents: usize,
    pub records: usize,
}

/// All `*.txt` files directly inside `dir`, sorted by file name
pub fn list_documents(dir: &Path) -> Result<Vec<Document>> {
    let entries = fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;

    let mut documents = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(dir, e))?;
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };
        let Some(caps) = DOCUMENT_NAME.captures(name) else {
            continue;
        };
        if !entry.path().is_file() {
            continue;
        }
        documents.push(Document {
            stem: caps[1].to_string(),
            path: entry.path(),
        });
    }

    documents.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(documents)
}

pub(crate) fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))
}

/// Build the few-shot word list of every document in `input_folder` and
/// write it as `<stem>.json` (JSON lines) into `output_folder`.
pub fn process_files<S, R>(
    input_folder: &Path,
    output_folder: &Path,
    dictionary: &[S],
    config: &MatchConfig,
    rng: &mut R,
) -> Result<ProcessSummary>
where
    S: AsRef<str>,
    R: Rng + ?Sized,
{
    config.validate()?;
    ensure_dir(output_folder)?;

    let mut summary = ProcessSummary::default();
    for document in list_documents(input_folder)? {
        let text = document.read_text()?;
        let matches = find_similar_words_in_text(&text, dictionary, config)?;
        let records = sample_examples(&matches, rng);
        debug!(document = %document.stem, matched = matches.len(), kept = records.len());

        let output_path = output_folder.join(format!("{}.json", document.stem));
        write_examples(&output_path, &records)?;
        info!("Generated file: {}", output_path.display());

        summary.documents += 1;
        summary.records += records.len();
    }

    Ok(summary)
}
