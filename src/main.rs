//! Score prediction service: `serve` the prediction form or `train` a model.

mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crate::config::AppConfig;
use scorecast_api::{app, ApiMetrics, AppState};
use scorecast_services::{load_training_csv, ModelTrainer, PredictPipeline};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(version, about = "Student math score prediction service")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the prediction form and JSON API (default)
    Serve,
    /// Train candidate models on a CSV and persist the best one
    Train {
        /// CSV file to train on; overrides `training.data_path`
        #[arg(long)]
        data: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scorecast=info,scorecast_ml=info,scorecast_services=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = AppConfig::new()?;
    info!("✅ Configuration loaded successfully");

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(&config).await,
        Command::Train { data } => train(&config, data),
    }
}

fn train(config: &AppConfig, data: Option<PathBuf>) -> Result<()> {
    let data_path = data.unwrap_or_else(|| config.training.data_path.clone());
    info!("🚀 Training on {}", data_path.display());

    let records = load_training_csv(&data_path)
        .with_context(|| format!("failed to load training data from {}", data_path.display()))?;
    let outcome = ModelTrainer::new(config.trainer_config())
        .train(&records)
        .context("training failed")?;

    for evaluation in outcome.report.iter() {
        info!(
            "📊 {:<24} test R² {:>8.4}  train R² {:>8.4}  cv R² {:>8.4}",
            evaluation.model_name, evaluation.test_score, evaluation.train_score, evaluation.cv_score
        );
    }
    info!("🏆 Selected {} with test R² {:.4}", outcome.best_model, outcome.best_score);
    Ok(())
}

async fn serve(config: &AppConfig) -> Result<()> {
    let predictor = match PredictPipeline::load(
        &config.artifacts.model_path,
        &config.artifacts.preprocessor_path,
    ) {
        Ok(pipeline) => Some(pipeline),
        Err(e) => {
            warn!("⚠️  No model loaded ({}); predictions will return 503 until `scorecast train` has run", e);
            None
        }
    };

    let state = AppState::new(predictor, ApiMetrics::new()?);
    let listener = tokio::net::TcpListener::bind(config.server_addr())
        .await
        .with_context(|| format!("failed to bind {}", config.server_addr()))?;
    info!("🌐 Listening on {}", config.server_addr());

    axum::serve(listener, app(state))
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            info!("👋 Shutting down gracefully");
        })
        .await?;
    Ok(())
}
