//! The timed prompt loop.
//!
//! For each record the loop prints the question, starts one read on the
//! [`AnswerSource`], and races it against the per-question deadline. The
//! first to resolve decides the transition. A lost read is not cancelled;
//! its receiver is dropped and any late answer is discarded. An expired
//! deadline ends the whole session.

use std::io::{self, Write};
use std::time::Duration;

use chrono::Utc;
use rand::Rng;
use tokio::time::Instant;
use uuid::Uuid;

use crate::model::{MatchMode, Record};
use crate::report::{write_summary, Outcome, QuestionResult, Score, SessionReport};
use crate::shuffle;
use crate::source::AnswerSource;

/// Default per-question time limit.
pub const DEFAULT_LIMIT: Duration = Duration::from_secs(30);

/// In-memory state of one quiz run.
#[derive(Debug, Clone)]
pub struct QuizSession {
    records: Vec<Record>,
    limit: Duration,
    match_mode: MatchMode,
    shuffled: bool,
    correct: usize,
    expired: bool,
    index: usize,
}

impl QuizSession {
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records,
            limit: DEFAULT_LIMIT,
            match_mode: MatchMode::default(),
            shuffled: false,
            correct: 0,
            expired: false,
            index: 0,
        }
    }

    /// Set the per-question time limit. A zero limit expires the first
    /// question as soon as it is presented.
    pub fn with_limit(mut self, limit: Duration) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_match_mode(mut self, match_mode: MatchMode) -> Self {
        self.match_mode = match_mode;
        self
    }

    /// Reorder the records with a clock-seeded generator.
    pub fn shuffle(&mut self) {
        shuffle::shuffle(&mut self.records);
        self.shuffled = true;
        tracing::info!("shuffled {} problem(s)", self.records.len());
    }

    /// Reorder the records with the given generator.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        shuffle::shuffle_with(&mut self.records, rng);
        self.shuffled = true;
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Run the quiz to completion, writing prompts and the final summary to
    /// `out`.
    pub async fn run<A, W>(mut self, answers: &mut A, out: &mut W) -> io::Result<SessionReport>
    where
        A: AnswerSource + ?Sized,
        W: Write + ?Sized,
    {
        let id = Uuid::new_v4();
        let started_at = Utc::now();
        let mut results = Vec::with_capacity(self.records.len());

        tracing::debug!(%id, total = self.records.len(), limit_ms = self.limit.as_millis() as u64, "quiz started");

        while !self.expired && self.index < self.records.len() {
            let number = self.index + 1;
            let record = &self.records[self.index];

            write!(out, "Problem #{number}: {} = ", record.question())?;
            out.flush()?;

            let presented_at = Instant::now();
            let given = self.await_answer(answers).await;
            let elapsed_ms = presented_at.elapsed().as_millis() as u64;

            let outcome = match &given {
                Some(answer) if self.match_mode.matches(answer, record.answer()) => {
                    Outcome::Correct
                }
                Some(_) => Outcome::Incorrect,
                None => {
                    writeln!(out, "Times Up!")?;
                    Outcome::Expired
                }
            };
            tracing::debug!(number, ?outcome, elapsed_ms, "question resolved");

            results.push(QuestionResult {
                number,
                question: record.question().to_string(),
                expected: record.answer().to_string(),
                given,
                outcome,
                elapsed_ms,
            });

            match outcome {
                Outcome::Correct => self.correct += 1,
                Outcome::Incorrect => {}
                Outcome::Expired => self.expired = true,
            }
            self.index += 1;
        }

        let answered = results
            .iter()
            .filter(|r| r.outcome != Outcome::Expired)
            .count();
        let score = Score {
            correct: self.correct,
            answered,
            total: self.records.len(),
            expired: self.expired,
        };
        write_summary(out, &score)?;

        Ok(SessionReport {
            id,
            started_at,
            finished_at: Utc::now(),
            limit_secs: self.limit.as_secs(),
            match_mode: self.match_mode,
            shuffled: self.shuffled,
            results,
            score,
        })
    }

    /// Race one read against the deadline. `None` means the deadline won.
    async fn await_answer<A: AnswerSource + ?Sized>(&self, answers: &mut A) -> Option<String> {
        if self.limit.is_zero() {
            return None;
        }

        let pending = answers.next_answer();
        match tokio::time::timeout(self.limit, pending).await {
            Ok(Ok(answer)) => Some(answer),
            // Reader went away without an answer: end of input.
            Ok(Err(_)) => Some(String::new()),
            Err(_) => None,
        }
    }
}
