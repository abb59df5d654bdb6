//! Serve command handler.

use crate::commands::build_assistant;
use crate::server::run_server;
use clap::Args;
use handbook_core::config::AppConfig;
use std::sync::Arc;

/// Run the HTTP endpoint
#[derive(Args, Debug)]
pub struct ServeCommand {
    /// Address to listen on (overrides HANDBOOK_BIND)
    #[arg(short, long)]
    pub bind: Option<String>,
}

impl ServeCommand {
    pub async fn execute(&self, config: &AppConfig) -> anyhow::Result<()> {
        let bind = self.bind.as_deref().unwrap_or(&config.server.bind);
        tracing::info!("Starting server on {}", bind);

        let assistant = Arc::new(build_assistant(config)?);
        run_server(bind, assistant).await
    }
}
