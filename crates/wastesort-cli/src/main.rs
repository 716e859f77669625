//! wastesort-cli: classify images against the wastesort backend from a shell.
//!
//! Drives the same controller as the web front-end, with an inert preview
//! in place of a blob URL. Useful for:
//!
//! - Checking that a deployed backend answers the `/predict` contract
//! - Classifying a handful of images without a browser
//! - Scripting (`--json` prints the raw prediction)
//!
//! # Usage
//!
//! ```text
//! cargo run --bin wastesort-cli -- --backend-url http://localhost:8000 classify bottle.jpg
//! cargo run --bin wastesort-cli -- health
//! ```
//!
//! The backend URL falls back to the `BACKEND_URL` environment variable.
//! Log verbosity follows `RUST_LOG` (default `info`); logs go to stderr.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use wastesort_client::ClassifierClient;
use wastesort_core::{ClassifierConfig, Controller, InertPreview, PredictionResult, SelectedFile};

/// Command-line client for the wastesort classifier backend.
#[derive(Parser)]
#[command(name = "wastesort-cli", version)]
struct Cli {
    /// Base URL of the classifier backend.
    #[arg(
        long,
        global = true,
        env = "BACKEND_URL",
        default_value = ClassifierConfig::DEFAULT_BACKEND_URL
    )]
    backend_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Upload one image and print the predicted label and confidence.
    Classify {
        /// Path to the image to classify.
        image_path: PathBuf,

        /// Print the prediction as JSON instead of a human-readable report.
        #[arg(long)]
        json: bool,
    },
    /// Check that the backend is reachable and report its status line.
    Health,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match ClassifierConfig::new(&cli.backend_url) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };
    let client = ClassifierClient::new(config.clone());

    match cli.command {
        Command::Classify { image_path, json } => {
            match classify(config, &client, &image_path, json).await {
                Ok(report) => {
                    println!("{report}");
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("{e}");
                    ExitCode::FAILURE
                }
            }
        }
        Command::Health => match client.health().await {
            Ok(status) => {
                println!("{}: {}", config.backend_base_url(), status.status);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!(
                    "Backend at {} is not healthy: {e}",
                    config.backend_base_url()
                );
                ExitCode::FAILURE
            }
        },
    }
}

/// Run one select -> upload -> result cycle for `image_path`.
///
/// Returns the report to print on success, or the message to show the
/// user on failure.
async fn classify(
    config: ClassifierConfig,
    client: &ClassifierClient,
    image_path: &Path,
    json: bool,
) -> Result<String, String> {
    let bytes = tokio::fs::read(image_path)
        .await
        .map_err(|e| format!("Error reading {}: {e}", image_path.display()))?;

    tracing::info!(
        image = %image_path.display(),
        bytes = bytes.len(),
        backend_url = config.backend_base_url(),
        "classifying image"
    );

    let mut controller = Controller::new(config, InertPreview);
    controller.file_chosen([SelectedFile::new(file_name_of(image_path), bytes)]);

    let pending = controller.begin_upload().map_err(|e| e.to_string())?;
    let outcome = client.send(pending.request).await;

    match controller.complete_upload(pending.ticket, outcome).into_result() {
        Some(Ok(result)) => {
            render(&result, json).map_err(|e| format!("Error serializing prediction: {e}"))
        }
        Some(Err(e)) => Err(e.to_string()),
        None => Err("Upload was superseded before it completed".to_owned()),
    }
}

/// Filename sent with the upload: the last path component.
fn file_name_of(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}

/// Format a prediction for stdout.
fn render(result: &PredictionResult, json: bool) -> Result<String, serde_json::Error> {
    if json {
        serde_json::to_string(result)
    } else {
        Ok(format!(
            "{}\nConfidence: {}",
            result.display_label(),
            result.display_confidence()
        ))
    }
}
