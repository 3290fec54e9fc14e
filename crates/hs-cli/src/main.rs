use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use thiserror::Error;
use tracing::info;

use hs_core::api::{FeedbackResponse, MatchResponse};
use hs_core::{
    select_embedder, EngineConfig, FeedbackError, FeedbackStore, HybridScorer, PlainTextExtractor,
    ScoreError, TextExtractor,
};

#[derive(Debug, Parser)]
#[command(
    name = "hs-cli",
    about = "Score resumes against job descriptions and manage the feedback ledger"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score a resume file against a job description file
    Score {
        /// Resume document (plain text)
        #[arg(long)]
        resume: PathBuf,
        /// Job description file
        #[arg(long)]
        jd: PathBuf,
    },
    /// Append a human-reviewed score to the feedback ledger
    Feedback {
        #[arg(long)]
        resume: PathBuf,
        #[arg(long)]
        jd: PathBuf,
        /// Human-assigned match score on the 0-100 scale
        #[arg(long)]
        score: f64,
    },
    /// Show which embedder variant the engine would run with
    ModelInfo,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Score(#[from] ScoreError),
    #[error(transparent)]
    Feedback(#[from] FeedbackError),
    #[error("could not read input file: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn read_document(path: &PathBuf) -> Result<String, CliError> {
    let bytes = fs::read(path)?;
    Ok(PlainTextExtractor.extract(&bytes))
}

fn run() -> Result<(), CliError> {
    dotenv().ok();
    hs_core::logging::init("hs-cli");

    let cli = Cli::parse();
    let config = EngineConfig::from_env();

    match cli.command {
        Command::Score { resume, jd } => {
            let resume_text = read_document(&resume)?;
            let jd_text = fs::read_to_string(&jd)?;

            let scorer = HybridScorer::from_config(&config);
            info!(variant = scorer.variant().as_ref(), "scoring resume");

            let result = scorer.score(&resume_text, &jd_text)?;
            let response = MatchResponse::from(result);
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Command::Feedback { resume, jd, score } => {
            let resume_text = read_document(&resume)?;
            let jd_text = fs::read_to_string(&jd)?;

            let store = FeedbackStore::new(config.feedback_path.clone());
            store.append(&resume_text, &jd_text, score)?;
            println!("{}", serde_json::to_string(&FeedbackResponse::saved())?);
        }
        Command::ModelInfo => {
            let selected = select_embedder(&config);
            let payload = serde_json::json!({
                "variant": selected.variant,
                "embedder": selected.embedder.name(),
                "version": selected.embedder.version(),
                "dimension": selected.embedder.dimension(),
                "scaling_factor": selected.variant.scaling_factor(),
                "model_dir": config.model_dir,
            });
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
    }

    Ok(())
}

fn main() {
    if let Err(err) = run() {
        tracing::error!(error = %err, "hs-cli failed");
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
