//! quizrun CLI — a timed terminal quiz.

use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::run::RunArgs;

#[derive(Parser)]
#[command(
    name = "quizrun",
    version,
    about = "Timed quiz runner for question,answer CSV files"
)]
struct Cli {
    #[command(flatten)]
    run: RunArgs,
}

#[tokio::main]
async fn main() {
    // Logs go to stderr so they never land between a prompt and its answer.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("quizrun=warn")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = commands::run::execute(cli.run).await {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
