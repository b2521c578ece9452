//! `mdsite serve` command implementation.

use std::path::PathBuf;

use clap::Args;
use mdsite_config::{CliSettings, Config};
use mdsite_server::{run_server, server_config_from_config};

use crate::error::CliError;
use crate::logging;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover mdsite.toml).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Markdown source directory (overrides config).
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// Environment name; "prod" logs to file only (overrides config).
    #[arg(short, long, env = "MDSITE_ENV")]
    env: Option<String>,

    /// Site title (overrides config).
    #[arg(short, long)]
    title: Option<String>,

    /// Document served for "/" (overrides config).
    #[arg(short, long)]
    index: Option<String>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to; values outside 1-65534 use the default (overrides config).
    #[arg(short, long, allow_negative_numbers = true)]
    port: Option<i64>,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self, version: &str) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            source_dir: self.dir,
            title: self.title,
            index: self.index,
            env: self.env,
        };

        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let _log_guard = logging::init(&config.docs_resolved.logs_dir(), config.site.is_production())?;

        let port = config.server.effective_port();
        if i64::from(port) != config.server.port {
            output.port_fallback(config.server.port, port);
            tracing::warn!(requested = config.server.port, port, "Port out of range, using default");
        }

        output.startup(&config, port);

        let server_config = server_config_from_config(&config, version.to_owned());
        run_server(server_config)
            .await
            .map_err(|e| CliError::Server(e.to_string()))?;

        Ok(())
    }
}
