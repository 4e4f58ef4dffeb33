//! Score reporting and the persisted session report.

use std::fmt;
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::MatchMode;

/// How a single presented question resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Correct,
    Incorrect,
    /// The deadline fired before an answer arrived.
    Expired,
}

/// Result of one presented question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionResult {
    /// 1-based position in the presented order.
    pub number: usize,
    pub question: String,
    pub expected: String,
    /// What the user typed, or `None` if the question expired.
    pub given: Option<String>,
    pub outcome: Outcome,
    /// Time from presentation to resolution in milliseconds.
    pub elapsed_ms: u64,
}

/// Final tally of a quiz session.
///
/// Always `correct <= answered <= total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub correct: usize,
    /// Questions answered before their deadline.
    pub answered: usize,
    pub total: usize,
    /// Whether the session stopped early on an expired deadline.
    pub expired: bool,
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "You answered {}/{} correct!", self.correct, self.total)
    }
}

/// Print the final summary line.
pub fn write_summary<W: Write + ?Sized>(out: &mut W, score: &Score) -> std::io::Result<()> {
    writeln!(out, "{score}")?;
    out.flush()
}

/// A complete record of one quiz session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub limit_secs: u64,
    pub match_mode: MatchMode,
    pub shuffled: bool,
    /// Presented questions in order. The last one is `Expired` if the
    /// session stopped early.
    pub results: Vec<QuestionResult>,
    pub score: Score,
}

impl SessionReport {
    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, json)
    }

    /// Number of questions shown to the user.
    pub fn presented(&self) -> usize {
        self.results.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> SessionReport {
        SessionReport {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            finished_at: Utc::now(),
            limit_secs: 30,
            match_mode: MatchMode::Trimmed,
            shuffled: false,
            results: vec![
                QuestionResult {
                    number: 1,
                    question: "2+2".into(),
                    expected: "4".into(),
                    given: Some("4".into()),
                    outcome: Outcome::Correct,
                    elapsed_ms: 800,
                },
                QuestionResult {
                    number: 2,
                    question: "3+3".into(),
                    expected: "6".into(),
                    given: None,
                    outcome: Outcome::Expired,
                    elapsed_ms: 30_000,
                },
            ],
            score: Score {
                correct: 1,
                answered: 1,
                total: 3,
                expired: true,
            },
        }
    }

    #[test]
    fn summary_line_format() {
        let score = Score {
            correct: 2,
            answered: 3,
            total: 3,
            expired: false,
        };
        let mut out = Vec::new();
        write_summary(&mut out, &score).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "You answered 2/3 correct!\n");
    }

    #[test]
    fn empty_score_reads_zero_of_zero() {
        assert_eq!(Score::default().to_string(), "You answered 0/0 correct!");
    }

    #[test]
    fn report_json_persistence() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("report.json");

        let report = sample_report();
        report.save_json(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let loaded: SessionReport = serde_json::from_str(&content).unwrap();
        assert_eq!(loaded.id, report.id);
        assert_eq!(loaded.score, report.score);
        assert_eq!(loaded.presented(), 2);
        assert_eq!(loaded.results[1].outcome, Outcome::Expired);
        assert!(loaded.results[1].given.is_none());
    }

    #[test]
    fn outcome_serializes_snake_case() {
        let json = serde_json::to_string(&Outcome::Incorrect).unwrap();
        assert_eq!(json, "\"incorrect\"");
    }
}
