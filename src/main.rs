use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use adaptive_quiz::{
    cli::{execute_command, Cli},
    config::{Config, LogFormat},
    engine::{AdaptiveRouter, QuizEngine},
    error::AppError,
    graph::QuizGraph,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(path) = cli.graph {
        config.quiz.graph_path = path;
    }

    // Initialize logging
    init_logging(&config);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Adaptive quiz starting..."
    );

    // Load the quiz graph
    let graph = match QuizGraph::from_file(&config.quiz.graph_path) {
        Ok(g) => {
            info!(
                path = %config.quiz.graph_path.display(),
                nodes = g.len(),
                start = %g.start(),
                "Quiz graph loaded"
            );
            g
        }
        Err(e) => {
            error!(error = %e, "Failed to load quiz graph");
            return Err(AppError::from(e).into());
        }
    };

    let engine = Arc::new(QuizEngine::with_router(
        Arc::new(graph),
        AdaptiveRouter::new(config.router),
    ));

    let result = execute_command(cli.command, engine).await;
    if !result.message.is_empty() {
        if result.exit_code == 0 {
            println!("{}", result.message);
        } else {
            eprintln!("{}", result.message);
        }
    }

    std::process::exit(result.exit_code);
}

/// Initialize tracing/logging
fn init_logging(config: &Config) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}
