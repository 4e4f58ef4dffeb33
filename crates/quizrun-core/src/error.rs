//! Error types for loading a quiz.
//!
//! A quiz cannot proceed without its question set, so every variant here is
//! fatal to the caller. They are surfaced as values rather than exiting the
//! process so the loader stays testable.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading quiz records.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The CSV file could not be opened.
    #[error("could not open file {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file was opened but is not valid delimited text.
    #[error("failed to parse the provided CSV file {}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A quote character appears where delimited text does not allow one.
    #[error("failed to parse the provided CSV file {}: {problem} on line {line}", path.display())]
    Quote {
        path: PathBuf,
        line: usize,
        problem: QuoteProblem,
    },

    /// A row has fewer than the two required fields.
    #[error("row {row} has {fields} field(s), expected at least 2 (question, answer)")]
    MalformedRow { row: usize, fields: usize },
}

/// The kind of quoting mistake found in a CSV file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QuoteProblem {
    #[error("bare \" in non-quoted field")]
    Bare,
    #[error("extraneous \" in quoted field")]
    Extraneous,
    #[error("unterminated quoted field")]
    Unterminated,
}

/// Errors that can occur while loading a `quizrun.toml` config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested config file does not exist.
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The config file exists but could not be read.
    #[error("failed to read config: {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for `QuizConfig`.
    #[error("failed to parse config: {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

