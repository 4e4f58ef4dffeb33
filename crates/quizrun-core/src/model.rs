//! Core data model types for quizrun.

use serde::{Deserialize, Serialize};

/// One question/answer pair loaded from the quiz file.
///
/// The answer is stored with surrounding whitespace trimmed; the question is
/// kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Record {
    question: String,
    answer: String,
}

impl Record {
    pub fn new(question: impl Into<String>, answer: impl AsRef<str>) -> Self {
        Self {
            question: question.into(),
            answer: answer.as_ref().trim().to_string(),
        }
    }

    /// The question text, exactly as read.
    pub fn question(&self) -> &str {
        &self.question
    }

    /// The expected answer, trimmed.
    pub fn answer(&self) -> &str {
        &self.answer
    }
}

/// How a user's answer is compared against the stored answer.
///
/// Comparison is always case-sensitive. The stored side is trimmed at parse
/// time regardless of mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Trim surrounding whitespace from the user's input before comparing.
    #[default]
    Trimmed,
    /// Compare the user's input as typed (line terminator removed only).
    Exact,
}

impl MatchMode {
    /// Returns `true` if `given` matches `expected` under this mode.
    pub fn matches(self, given: &str, expected: &str) -> bool {
        match self {
            MatchMode::Trimmed => given.trim() == expected,
            MatchMode::Exact => given == expected,
        }
    }
}
