//! Feedback GitHub server entry point.
//!
//! Loads configuration, installs logging and serves the feedback HTTP API
//! until Ctrl-C.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use feedback_github::adapters::{FeedbackHttpConfig, FeedbackHttpServer, GitHubClient};
use feedback_github::domain::ports::IssueTracker;
use feedback_github::infrastructure::config::ConfigLoader;
use feedback_github::infrastructure::logging::{LogConfig, LoggerImpl};
use feedback_github::services::SubmissionRouter;

#[derive(Parser, Debug)]
#[command(name = "feedback-github")]
#[command(about = "Files website feedback as GitHub issues", version)]
struct Args {
    /// Configuration file (defaults to ./feedback.yaml when present)
    #[arg(long, env = "FEEDBACK_CONFIG")]
    config: Option<PathBuf>,

    /// Host to bind to (overrides server.host)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides server.port)
    #[arg(long, env = "PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let _logger = LoggerImpl::init(&LogConfig::from(&config.logging))
        .context("Failed to initialize logging")?;

    let client = GitHubClient::new(&config.github)?;
    let tracker: Arc<dyn IssueTracker> = Arc::new(client);
    let router = SubmissionRouter::new(&config.github, tracker);

    tracing::info!(
        repo = router.repo(),
        allowed_repos = ?router.allowed_repos(),
        "feedback router ready"
    );

    let server = FeedbackHttpServer::new(router, FeedbackHttpConfig::from(config.server));
    server.serve_with_shutdown(shutdown_signal()).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
