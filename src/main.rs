use axum::routing::get;
use axum::{Json, Router};
use clap::{Args, Parser, Subcommand};
use procure_ai::config::AppConfig;
use procure_ai::error::AppError;
use procure_ai::telemetry;
use procure_ai::workflows::tender::{
    tender_router, EvaluationService, GeminiClient, InMemoryTenderRepository, Submission,
};
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "Tender Evaluation Service",
    about = "AI-assisted scoring of procurement tender submissions",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Evaluate a single submission from a JSON file and print the result
    Evaluate(EvaluateArgs),
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Args, Debug)]
struct EvaluateArgs {
    /// Path to a submission JSON document
    #[arg(long)]
    submission: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    match cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()))
    {
        Command::Serve(args) => serve(config, args).await,
        Command::Evaluate(args) => evaluate_once(config, args).await,
    }
}

fn build_service(
    config: &AppConfig,
    repository: Arc<InMemoryTenderRepository>,
) -> Result<EvaluationService<InMemoryTenderRepository, GeminiClient>, AppError> {
    let api_key = config.gemini.require_api_key()?.to_string();
    let client = GeminiClient::new(&config.gemini, api_key)?;
    Ok(EvaluationService::new(repository, Arc::new(client)))
}

async fn serve(mut config: AppConfig, args: ServeArgs) -> Result<(), AppError> {
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let repository = Arc::new(InMemoryTenderRepository::default());
    let service = Arc::new(build_service(&config, repository)?);

    let app = Router::new()
        .route("/health", get(health))
        .merge(tender_router(service));

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, environment = ?config.environment, "tender evaluation service listening");

    axum::serve(listener, app).await?;
    Ok(())
}

async fn evaluate_once(config: AppConfig, args: EvaluateArgs) -> Result<(), AppError> {
    let payload = std::fs::read_to_string(&args.submission)?;
    let submission: Submission = serde_json::from_str(&payload)?;
    let submission_id = submission.id.clone();

    let repository = Arc::new(InMemoryTenderRepository::default());
    let service = build_service(&config, repository)?;

    service.submit(submission).await?;
    let record = service.evaluate(&submission_id).await?;

    println!(
        "{}",
        serde_json::to_string_pretty(&record).map_err(AppError::Submission)?
    );
    Ok(())
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
