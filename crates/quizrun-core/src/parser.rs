//! CSV record loader.
//!
//! Turns rows of `question,answer` text into [`Record`]s. No header row is
//! assumed and fields beyond the second are ignored. Quoting is strict: a
//! quote may only open a field or close it, and quotes inside a quoted field
//! must be doubled.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{LoadError, QuoteProblem};
use crate::model::Record;

/// Convert rows of string fields into records, preserving order.
///
/// Row numbers in errors are 1-based.
pub fn parse_rows<I, R, S>(rows: I) -> Result<Vec<Record>, LoadError>
where
    I: IntoIterator<Item = R>,
    R: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    rows.into_iter()
        .enumerate()
        .map(|(i, row)| parse_row(i + 1, row))
        .collect()
}

fn parse_row<R, S>(row_number: usize, row: R) -> Result<Record, LoadError>
where
    R: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut fields = row.into_iter();
    match (fields.next(), fields.next()) {
        (Some(question), Some(answer)) => Ok(Record::new(question.as_ref(), answer)),
        (first, _) => Err(LoadError::MalformedRow {
            row: row_number,
            fields: usize::from(first.is_some()),
        }),
    }
}

/// Read records from any CSV source. `source_path` is only used in errors.
pub fn read_records<R: Read>(mut reader: R, source_path: &Path) -> Result<Vec<Record>, LoadError> {
    let mut data = Vec::new();
    reader
        .read_to_end(&mut data)
        .map_err(|e| LoadError::Csv {
            path: source_path.to_path_buf(),
            source: e.into(),
        })?;

    check_quotes(&data).map_err(|(line, problem)| LoadError::Quote {
        path: source_path.to_path_buf(),
        line,
        problem,
    })?;

    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(data.as_slice());

    let rows = csv_reader
        .records()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| LoadError::Csv {
            path: source_path.to_path_buf(),
            source: e,
        })?;

    parse_rows(&rows)
}

/// Reject quoting the `csv` reader would otherwise accept leniently.
///
/// Returns the 1-based line of the first problem.
fn check_quotes(data: &[u8]) -> Result<(), (usize, QuoteProblem)> {
    let mut line = 1;
    let mut field_start = true;
    let mut in_quotes = false;
    let mut quote_line = 1;
    let mut i = 0;

    while i < data.len() {
        let b = data[i];
        if in_quotes {
            match b {
                b'"' if data.get(i + 1) == Some(&b'"') => i += 1,
                b'"' => {
                    in_quotes = false;
                    if !matches!(data.get(i + 1), None | Some(b',' | b'\n' | b'\r')) {
                        return Err((line, QuoteProblem::Extraneous));
                    }
                }
                b'\n' => line += 1,
                _ => {}
            }
        } else {
            match b {
                b'"' if field_start => {
                    in_quotes = true;
                    quote_line = line;
                    field_start = false;
                }
                b'"' => return Err((line, QuoteProblem::Bare)),
                b',' => field_start = true,
                b'\n' => {
                    line += 1;
                    field_start = true;
                }
                _ => field_start = false,
            }
        }
        i += 1;
    }

    if in_quotes {
        return Err((quote_line, QuoteProblem::Unterminated));
    }
    Ok(())
}

/// Open a CSV file and load every record from it.
pub fn load_records(path: &Path) -> Result<Vec<Record>, LoadError> {
    let file = File::open(path).map_err(|e| LoadError::Open {
        path: path.to_path_buf(),
        source: e,
    })?;

    let records = read_records(file, path)?;
    tracing::info!("loaded {} problem(s) from {}", records.len(), path.display());
    Ok(records)
}
