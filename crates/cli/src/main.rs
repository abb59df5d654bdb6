//! Handbook assistant CLI
//!
//! Main entry point for the `handbook` tool. Serves the question-answering
//! endpoint over HTTP, or answers a single question from the command line.

mod commands;
mod server;

use clap::{Parser, Subcommand};
use commands::{AskCommand, ServeCommand};
use handbook_core::{config::AppConfig, logging};
use std::path::PathBuf;
use tracing::Instrument;

/// Handbook assistant - answers employee questions from the company handbook
#[derive(Parser, Debug)]
#[command(name = "handbook")]
#[command(about = "Answer employee questions grounded in the company handbook", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, env = "HANDBOOK_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output (any NO_COLOR value also disables it)
    #[arg(long, global = true)]
    no_color: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    /// Completion provider (openai, ollama)
    #[arg(short, long, global = true, env = "HANDBOOK_PROVIDER")]
    provider: Option<String>,

    /// Model identifier
    #[arg(short, long, global = true, env = "HANDBOOK_MODEL")]
    model: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the ask endpoint over HTTP
    Serve(ServeCommand),

    /// Ask a single question and print the answer
    Ask(AskCommand),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command-line arguments first (needed for logging config)
    let cli = Cli::parse();

    let config = AppConfig::load_with_config_file(cli.config.as_deref())?;

    let bind = match &cli.command {
        Commands::Serve(cmd) => cmd.bind.clone(),
        Commands::Ask(_) => None,
    };

    let config = config.with_overrides(
        cli.provider,
        cli.model,
        bind,
        cli.log_level,
        cli.verbose,
        cli.no_color,
        cli.json_logs,
    );

    logging::init_logging(
        config.log_level.as_deref(),
        config.no_color,
        config.json_logs,
    )?;

    tracing::info!("Handbook assistant starting");
    tracing::debug!("Provider: {}", config.completion.provider);
    tracing::debug!("Model: {}", config.completion.model);

    config.validate()?;

    let command_name = match &cli.command {
        Commands::Serve(_) => "serve",
        Commands::Ask(_) => "ask",
    };
    let span = tracing::info_span!("command", name = command_name);

    let result = match cli.command {
        Commands::Serve(cmd) => cmd.execute(&config).instrument(span).await,
        Commands::Ask(cmd) => cmd
            .execute(&config)
            .instrument(span)
            .await
            .map_err(anyhow::Error::from),
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_color_env_does_not_block_parsing() {
        std::env::set_var("NO_COLOR", "1");

        let cli = Cli::try_parse_from(["handbook", "ask", "How many vacation days?"]).unwrap();
        assert!(!cli.no_color);
        assert!(matches!(
            cli.command,
            Commands::Ask(AskCommand { query: Some(ref q), .. }) if q == "How many vacation days?"
        ));

        let config = AppConfig::from_lookup(|key| match key {
            "NO_COLOR" => std::env::var(key).ok(),
            _ => None,
        })
        .unwrap();
        assert!(config.no_color);
    }

    #[test]
    fn test_serve_bind_and_global_flags() {
        let cli = Cli::try_parse_from([
            "handbook",
            "--no-color",
            "--provider",
            "ollama",
            "serve",
            "--bind",
            "127.0.0.1:8080",
        ])
        .unwrap();

        assert!(cli.no_color);
        assert_eq!(cli.provider.as_deref(), Some("ollama"));
        assert!(matches!(
            cli.command,
            Commands::Serve(ServeCommand { bind: Some(ref b) }) if b == "127.0.0.1:8080"
        ));
    }
}
