//! Few-shot example records: sampling and JSON-lines persistence.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::scanner::SimilarWords;

/// Upper bound on examples kept per document
pub const MAX_EXAMPLES_PER_DOCUMENT: usize = 10;

/// A noisy token and its comma-joined dictionary suggestions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExampleRecord {
    pub input: String,
    pub output: String,
}

/// Turn matches into records, sampling down to
/// [`MAX_EXAMPLES_PER_DOCUMENT`] without replacement when there are more.
pub fn sample_examples<R: Rng + ?Sized>(matches: &SimilarWords, rng: &mut R) -> Vec<ExampleRecord> {
    let records: Vec<ExampleRecord> = matches
        .iter()
        .map(|(token, words)| ExampleRecord {
            input: token.to_string(),
            output: words.join(","),
        })
        .collect();

    if records.len() > MAX_EXAMPLES_PER_DOCUMENT {
        records
            .choose_multiple(rng, MAX_EXAMPLES_PER_DOCUMENT)
            .cloned()
            .collect()
    } else {
        records
    }
}

/// Write one JSON object per line. No records leaves an empty file.
pub fn write_examples(path: &Path, records: &[ExampleRecord]) -> Result<()> {
    let file = fs::File::create(path).map_err(|e| Error::io(path, e))?;
    let mut writer = BufWriter::new(file);

    for (i, record) in records.iter().enumerate() {
        serde_json::to_writer(&mut writer, record).map_err(|source| Error::Json {
            path: path.to_path_buf(),
            line: i + 1,
            source,
        })?;
        writer.write_all(b"\n").map_err(|e| Error::io(path, e))?;
    }

    writer.flush().map_err(|e| Error::io(path, e))
}

/// Read records written by [`write_examples`]; blank lines are skipped.
pub fn read_examples(path: &Path) -> Result<Vec<ExampleRecord>> {
    let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;

    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str(line).map_err(|source| Error::Json {
                path: path.to_path_buf(),
                line: i + 1,
                source,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn matches(n: usize) -> SimilarWords {
        let mut found = SimilarWords::new();
        for i in 0..n {
            found.insert(format!("tok{i}"), vec![format!("a{i}"), format!("b{i}")]);
        }
        found
    }

    #[test]
    fn test_small_sets_keep_order() {
        let mut rng = StdRng::seed_from_u64(7);
        let records = sample_examples(&matches(3), &mut rng);
        assert_eq!(records.len(), 3);
        assert_eq!(
            records[0],
            ExampleRecord {
                input: "tok0".into(),
                output: "a0,b0".into()
            }
        );
        assert_eq!(records[2].input, "tok2");
    }

    #[test]
    fn test_exactly_ten_is_not_sampled() {
        let mut rng = StdRng::seed_from_u64(7);
        let records = sample_examples(&matches(10), &mut rng);
        let inputs: Vec<String> = records.into_iter().map(|r| r.input).collect();
        let expected: Vec<String> = (0..10).map(|i| format!("tok{i}")).collect();
        assert_eq!(inputs, expected);
    }

    #[test]
    fn test_large_sets_are_capped_without_duplicates() {
        let found = matches(15);
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let records = sample_examples(&found, &mut rng);
            assert_eq!(records.len(), MAX_EXAMPLES_PER_DOCUMENT);

            let unique: HashSet<&str> = records.iter().map(|r| r.input.as_str()).collect();
            assert_eq!(unique.len(), MAX_EXAMPLES_PER_DOCUMENT);
            for record in &records {
                let words = found.get(&record.input).unwrap();
                assert_eq!(record.output, words.join(","));
            }
        }
    }

    #[test]
    fn test_same_seed_same_sample() {
        let found = matches(15);
        let a = sample_examples(&found, &mut StdRng::seed_from_u64(42));
        let b = sample_examples(&found, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_jsonl_file_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("1.json");
        let records = vec![
            ExampleRecord {
                input: "Ngara".into(),
                output: "Nagar,Negar".into(),
            },
            ExampleRecord {
                input: "sunda".into(),
                output: "sunda".into(),
            },
        ];
        write_examples(&path, &records).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "{\"input\":\"Ngara\",\"output\":\"Nagar,Negar\"}\n{\"input\":\"sunda\",\"output\":\"sunda\"}\n"
        );
        assert_eq!(read_examples(&path).unwrap(), records);
    }

    #[test]
    fn test_empty_file_has_no_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("2.json");
        write_examples(&path, &[]).unwrap();
        assert_eq!(fs::metadata(&path).unwrap().len(), 0);
        assert!(read_examples(&path).unwrap().is_empty());
    }

    #[test]
    fn test_bad_line_reports_position() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("3.json");
        fs::write(&path, "{\"input\":\"a\",\"output\":\"b\"}\nnot json\n").unwrap();
        match read_examples(&path) {
            Err(Error::Json { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected JSON error, got {other:?}"),
        }
    }
}
