//! Error type shared by the matcher, loaders and writers.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("k must be non-negative, got {0}")]
    InvalidK(i64),

    #[error("threshold must be within [0, 1], got {0}")]
    InvalidThreshold(f64),

    #[error("cannot match an empty token")]
    EmptyToken,

    #[error("unknown language: {0} (expected one of Sundanese, Javanese, Minangkabau, Balinese)")]
    UnknownLanguage(String),

    #[error("column '{column}' not found in {}", .path.display())]
    MissingColumn { column: String, path: PathBuf },

    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read CSV {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to read spreadsheet {}: {source}", .path.display())]
    Spreadsheet {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("spreadsheet {} has no worksheets", .0.display())]
    EmptyWorkbook(PathBuf),

    #[error("invalid JSON record in {} line {line}: {source}", .path.display())]
    Json {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    /// True for errors caused by bad caller input rather than the filesystem
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Error::InvalidK(_)
                | Error::InvalidThreshold(_)
                | Error::EmptyToken
                | Error::UnknownLanguage(_)
        )
    }
}

#[cfg(feature = "python")]
impl From<Error> for pyo3::PyErr {
    fn from(err: Error) -> Self {
        if err.is_invalid_input() {
            pyo3::exceptions::PyValueError::new_err(err.to_string())
        } else {
            pyo3::exceptions::PyIOError::new_err(err.to_string())
        }
    }
}
