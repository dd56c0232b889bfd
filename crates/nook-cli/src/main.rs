use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use nook_application::ChatSessionClient;
use nook_core::config::ClientConfig;
use nook_infrastructure::ConfigService;
use nook_interaction::HttpChatBackend;

mod commands;
mod helper;
mod host;

use host::TerminalHost;

#[derive(Parser)]
#[command(name = "nook")]
#[command(about = "Nook - chat with the healing chatbot from your terminal", long_about = None)]
struct Cli {
    /// Config file to use instead of ~/.config/nook/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Backend base URL, overriding the config file and NOOK_BASE_URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Log requests and session changes to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive chat session (default)
    Chat,
    /// Create an account
    Register,
    /// Print the stored conversation and exit
    History,
    /// Write a config file with the default settings
    InitConfig,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn config_service(path: Option<&Path>) -> Result<ConfigService> {
    match path {
        Some(path) => Ok(ConfigService::with_path(path)),
        None => ConfigService::new_default().context("Failed to locate config directory"),
    }
}

fn load_config(path: Option<&Path>, base_url: Option<String>) -> Result<ClientConfig> {
    let service = config_service(path)?;
    let mut config = service
        .load()
        .with_context(|| format!("Failed to load config from {}", service.path().display()))?;

    if let Some(base_url) = base_url {
        config.base_url = base_url;
        config.validate().context("Invalid --base-url")?;
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let command = cli.command.unwrap_or(Commands::Chat);
    if let Commands::InitConfig = command {
        return commands::config::init(&config_service(cli.config.as_deref())?);
    }

    let config = load_config(cli.config.as_deref(), cli.base_url)?;
    tracing::debug!("Using backend at {}", config.base_url);

    let backend = Arc::new(HttpChatBackend::new(config.clone())?);
    let host = Arc::new(TerminalHost::default());
    let client = ChatSessionClient::new(backend, host, &config);

    match command {
        Commands::Chat => commands::chat::run(&client).await,
        Commands::Register => commands::register::run(&client).await,
        Commands::History => commands::history::run(&client).await,
        Commands::InitConfig => Ok(()),
    }
}
