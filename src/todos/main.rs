use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use todos::config::{CONFIG_FILENAME, ServerConfig};
use todos::http::{self, AppState};
use todos::logging;
use todos::service::TodoService;
use todos::store::fs::FileStore;
use tracing::info;

mod args;
use args::{Cli, Commands, Overrides};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config_path = config_path(&cli.overrides);
    let config = resolve_config(&config_path, &cli.overrides)?;

    match cli.command {
        Some(Commands::Openapi) => handle_openapi(&config),
        Some(Commands::Config { save }) => handle_config(&config, &config_path, save),
        Some(Commands::Serve) | None => handle_serve(config, cli.verbose),
    }
}

fn config_path(overrides: &Overrides) -> PathBuf {
    overrides
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME))
}

fn resolve_config(path: &Path, overrides: &Overrides) -> Result<ServerConfig> {
    let mut config = ServerConfig::load(path)
        .with_context(|| format!("failed to load config from {}", path.display()))?;

    if let Some(host) = overrides.host {
        config.host = host;
    }
    if let Some(port) = overrides.port {
        config.port = port;
    }
    if let Some(data_file) = &overrides.data_file {
        config.data_file = data_file.clone();
    }
    if let Some(base_path) = &overrides.base_path {
        config.set_base_path(base_path);
    }
    if let Some(ttl) = overrides.cache_ttl {
        config.cache_ttl_secs = ttl;
    }
    Ok(config)
}

fn handle_openapi(config: &ServerConfig) -> Result<()> {
    let doc = http::openapi::document(&config.base_path);
    println!("{}", doc.to_pretty_json()?);
    Ok(())
}

fn handle_config(config: &ServerConfig, path: &Path, save: bool) -> Result<()> {
    if save {
        config
            .save(path)
            .with_context(|| format!("failed to save config to {}", path.display()))?;
        eprintln!("Saved configuration to {}", path.display());
    }
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}

fn handle_serve(config: ServerConfig, verbose: bool) -> Result<()> {
    logging::init(&config.log_filter, verbose);

    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    runtime.block_on(serve(config))
}

async fn serve(config: ServerConfig) -> Result<()> {
    let store = open_store(&config.data_file)?;
    let count = store.len()?;
    info!(data_file = %store.data_file().display(), todos = count, "store opened");

    let state = AppState::from_config(TodoService::new(store), &config);
    let app = http::router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!(%addr, base_path = %config.base_path, "server is listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("server stopped");
    Ok(())
}

fn open_store(data_file: &Path) -> Result<FileStore> {
    FileStore::open_path(data_file)
        .with_context(|| format!("failed to open data file {}", data_file.display()))
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown requested");
    }
}
