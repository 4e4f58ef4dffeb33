//! Answer sources for the timed prompt loop.
//!
//! Each call to [`AnswerSource::next_answer`] starts one read activity and
//! returns the receiving half of a one-shot channel. The loop races that
//! receiver against the question deadline. If the deadline wins the receiver
//! is dropped; the activity itself is never interrupted.

use std::collections::VecDeque;
use std::io::{BufRead, BufReader, Stdin};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;
use std::time::Duration;

use tokio::sync::oneshot;

/// A producer of user answers, one read activity per call.
///
/// A receiver whose sender is dropped without sending is treated by the loop
/// as an empty answer (end of input).
pub trait AnswerSource: Send {
    /// Start reading the next answer.
    fn next_answer(&mut self) -> oneshot::Receiver<String>;
}

// ---------------------------------------------------------------------------
// Blocking line reader
// ---------------------------------------------------------------------------

/// Reads answers line by line from a blocking reader.
///
/// Every read runs on its own detached OS thread. A thread blocked on a read
/// that lost its race stays parked until a line arrives or the process
/// exits; it holds no resources the loop needs. The async runtime's blocking
/// pool is not used because runtime shutdown waits on it, which would hang
/// exit behind an abandoned read.
pub struct LineAnswers<R> {
    reader: Arc<Mutex<R>>,
}

impl<R: BufRead + Send + 'static> LineAnswers<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader: Arc::new(Mutex::new(reader)),
        }
    }
}

impl LineAnswers<BufReader<Stdin>> {
    /// Answers read from the process's standard input.
    pub fn stdin() -> Self {
        Self::new(BufReader::new(std::io::stdin()))
    }
}

impl<R: BufRead + Send + 'static> AnswerSource for LineAnswers<R> {
    fn next_answer(&mut self) -> oneshot::Receiver<String> {
        let (tx, rx) = oneshot::channel();
        let reader = Arc::clone(&self.reader);

        let spawned = thread::Builder::new()
            .name("quizrun-answer".into())
            .spawn(move || {
                let mut guard = reader.lock().unwrap_or_else(PoisonError::into_inner);
                let answer = read_answer(&mut *guard);
                // The loop may have stopped listening; that is fine.
                let _ = tx.send(answer);
            });

        if let Err(e) = spawned {
            // tx was dropped with the closure, so the loop sees end of input.
            tracing::error!("failed to spawn answer reader: {e}");
        }

        rx
    }
}

/// Read one line, stripping the trailing `\n` or `\r\n`.
///
/// End of input and read errors both produce an empty answer.
pub fn read_answer<R: BufRead + ?Sized>(reader: &mut R) -> String {
    let mut line = String::new();
    if let Err(e) = reader.read_line(&mut line) {
        tracing::warn!("failed to read answer: {e}");
        return String::new();
    }
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    line
}

// ---------------------------------------------------------------------------
// Scripted source
// ---------------------------------------------------------------------------

/// One scripted reply for [`ScriptedAnswers`].
#[derive(Debug, Clone)]
pub enum Reply {
    /// Deliver `text` after `delay`.
    After(Duration, String),
    /// Never deliver anything; the read stays pending.
    Never,
}

impl Reply {
    /// Deliver `text` with no delay.
    pub fn now(text: &str) -> Self {
        Reply::After(Duration::ZERO, text.to_string())
    }

    /// Deliver `text` after `ms` milliseconds.
    pub fn after_ms(ms: u64, text: &str) -> Self {
        Reply::After(Duration::from_millis(ms), text.to_string())
    }
}

/// A deterministic answer source driven by a script of replies.
///
/// Replies are delivered by tokio tasks, so timing follows the runtime clock
/// and works under paused time. Once the script runs out every read behaves
/// like end of input.
#[derive(Debug, Default)]
pub struct ScriptedAnswers {
    replies: VecDeque<Reply>,
    reads_started: usize,
}

impl ScriptedAnswers {
    pub fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            replies: replies.into_iter().collect(),
            reads_started: 0,
        }
    }

    /// Number of read activities started so far.
    pub fn reads_started(&self) -> usize {
        self.reads_started
    }

    /// Replies not yet consumed by a read.
    pub fn remaining(&self) -> usize {
        self.replies.len()
    }
}

impl AnswerSource for ScriptedAnswers {
    fn next_answer(&mut self) -> oneshot::Receiver<String> {
        self.reads_started += 1;
        let (tx, rx) = oneshot::channel();

        match self.replies.pop_front() {
            Some(Reply::After(delay, text)) => {
                tokio::spawn(async move {
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                    let _ = tx.send(text);
                });
            }
            Some(Reply::Never) => {
                tokio::spawn(async move {
                    let _tx = tx;
                    std::future::pending::<()>().await;
                });
            }
            None => drop(tx),
        }

        rx
    }
}
