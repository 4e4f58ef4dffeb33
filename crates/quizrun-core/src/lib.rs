//! quizrun-core — Record parsing, shuffling, and the timed prompt loop.
//!
//! This crate holds everything a quiz run needs except the command-line
//! surface: loading question/answer records from CSV, reordering them,
//! racing each answer against a deadline, and reporting the score.

pub mod config;
pub mod error;
pub mod model;
pub mod parser;
pub mod report;
pub mod session;
pub mod shuffle;
pub mod source;
