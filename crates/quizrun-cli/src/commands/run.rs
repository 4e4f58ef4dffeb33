//! Load a problem set and run the quiz against standard input.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use quizrun_core::config::{load_config_from, QuizConfig};
use quizrun_core::parser;
use quizrun_core::session::QuizSession;
use quizrun_core::source::LineAnswers;

#[derive(Debug, Args)]
pub struct RunArgs {
    /// A csv file in the format question,answer [default: problems.csv]
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Shuffle the problems to appear in random order
    #[arg(long)]
    pub shuffle: bool,

    /// Time limit in seconds for each problem [default: 30]
    #[arg(long, allow_negative_numbers = true)]
    pub limit: Option<i64>,

    /// Compare answers exactly instead of trimming surrounding whitespace
    #[arg(long)]
    pub strict: bool,

    /// Config file path (defaults to ./quizrun.toml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write a JSON session report to this path
    #[arg(long)]
    pub json: Option<PathBuf>,
}

impl RunArgs {
    /// Layer command-line flags over a loaded config.
    fn apply(&self, mut config: QuizConfig) -> QuizConfig {
        if let Some(csv) = &self.csv {
            config.csv = csv.clone();
        }
        if let Some(limit) = self.limit {
            config.limit_secs = limit;
        }
        config.shuffle |= self.shuffle;
        config.strict |= self.strict;
        config
    }
}

pub async fn execute(args: RunArgs) -> Result<()> {
    let config = args.apply(load_config_from(args.config.as_deref())?);
    tracing::debug!(?config, "resolved configuration");

    let records = parser::load_records(&config.csv)?;

    let mut session = QuizSession::new(records)
        .with_limit(config.limit())
        .with_match_mode(config.match_mode());

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if config.shuffle {
        writeln!(out, ".. shuffling problems")?;
        session.shuffle();
    }

    let mut answers = LineAnswers::stdin();
    let report = session
        .run(&mut answers, &mut out)
        .await
        .context("failed to write to stdout")?;

    if let Some(path) = &args.json {
        report
            .save_json(path)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        tracing::info!("report saved to {}", path.display());
    }

    Ok(())
}
