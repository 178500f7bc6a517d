use anyhow::{Context, Result};
use clap::Parser;
use panelist::api::HttpApi;
use panelist::auth::CredentialStore;
use panelist::config::Config;
use panelist::logger::{self, Logger};
use panelist::ui;
use std::path::PathBuf;
use std::sync::Arc;

/// Terminal admin panel for post categories, banners and users
#[derive(Debug, Parser)]
#[command(name = "panelist", version, about)]
struct Cli {
    /// Write a default configuration file and exit
    #[arg(long, value_name = "PATH")]
    generate_config: Option<Option<PathBuf>>,

    /// Use this configuration file instead of the default lookup
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = cli.generate_config {
        let path = match path {
            Some(path) => path,
            None => Config::get_default_config_path()?,
        };
        return Config::generate_default_config(path);
    }

    let config = match &cli.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::load()?,
    };

    let logger = Logger::from_config(config.logging.enabled)?;
    if let Some(path) = logger::init_logging(&logger, config.logging.enabled)? {
        logger.log(format!("Logging to {}", path.display()));
    }

    let credentials = CredentialStore::new(&config.api.token_env, config.api.resolved_token_file());
    if !credentials.has_token() {
        logger.log(format!(
            "No token in ${} or the token file; the sign-in prompt will ask for one",
            credentials.env_var()
        ));
    }

    let api = HttpApi::new(&config.api.base_url, credentials.clone(), config.api.timeout())
        .context("Failed to create the HTTP client")?;

    ui::run_app(config, Arc::new(api), credentials, logger).await
}
