//! Dictionary loading for few-shot word lists.
//!
//! A dictionary is an ordered list of candidate words. Order matters because
//! equal-ranked candidates keep dictionary order, so entries are neither
//! sorted nor deduplicated. Three sources are supported: a spreadsheet or a
//! CSV table with an `input` column, and a plain word list with one entry
//! per line. Empty cells are skipped.

use std::fs;
use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use tracing::info;

use crate::error::{Error, Result};

/// Column holding the dictionary words in tabular sources
pub const DICTIONARY_COLUMN: &str = "input";

const SPREADSHEET_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Load the `input` column of a CSV file, in file order
pub fn load_dictionary(path: &Path) -> Result<Vec<String>> {
    let csv_err = |source: csv::Error| Error::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(csv_err)?;

    let column = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .position(|h| h.trim() == DICTIONARY_COLUMN)
        .ok_or_else(|| missing_column(path))?;

    let mut words = Vec::new();
    for row in reader.records() {
        let row = row.map_err(csv_err)?;
        match row.get(column) {
            Some(word) if !word.is_empty() => words.push(word.to_string()),
            _ => {}
        }
    }

    info!(path = %path.display(), words = words.len(), "Loaded dictionary");
    Ok(words)
}

/// Load the `input` column of the first worksheet of a spreadsheet
pub fn load_spreadsheet(path: &Path) -> Result<Vec<String>> {
    let sheet_err = |source: calamine::Error| Error::Spreadsheet {
        path: path.to_path_buf(),
        source,
    };

    let mut workbook = open_workbook_auto(path).map_err(sheet_err)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| Error::EmptyWorkbook(path.to_path_buf()))?
        .map_err(sheet_err)?;

    let mut rows = range.rows();
    let column = rows
        .next()
        .and_then(|header| {
            header
                .iter()
                .position(|cell| matches!(cell, Data::String(h) if h.trim() == DICTIONARY_COLUMN))
        })
        .ok_or_else(|| missing_column(path))?;

    let words: Vec<String> = rows
        .filter_map(|row| row.get(column).and_then(cell_text))
        .collect();

    info!(path = %path.display(), words = words.len(), "Loaded spreadsheet dictionary");
    Ok(words)
}

/// Text of a cell as it reads in the sheet; `None` for blanks and errors.
/// Whole numbers drop their fractional part and booleans read `True`/`False`.
fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) if s.is_empty() => None,
        Data::String(s) => Some(s.clone()),
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) if f.is_finite() && f.fract() == 0.0 => Some(format!("{f:.0}")),
        Data::Float(f) => Some(f.to_string()),
        Data::Bool(true) => Some("True".to_string()),
        Data::Bool(false) => Some("False".to_string()),
        other => Some(other.to_string()),
    }
}

fn missing_column(path: &Path) -> Error {
    Error::MissingColumn {
        column: DICTIONARY_COLUMN.to_string(),
        path: path.to_path_buf(),
    }
}

/// Load a plain word list, skipping blank lines and `#` comments
pub fn load_word_list(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;

    let words: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect();

    info!(path = %path.display(), words = words.len(), "Loaded word list");
    Ok(words)
}

/// Pick the loader from the file extension: spreadsheets, `.csv`, and
/// anything else as a word list
pub fn load_any(path: &Path) -> Result<Vec<String>> {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    if SPREADSHEET_EXTENSIONS.contains(&ext.as_str()) {
        load_spreadsheet(path)
    } else if ext == "csv" {
        load_dictionary(path)
    } else {
        load_word_list(path)
    }
}
