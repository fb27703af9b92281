use clap::{Args, Parser, Subcommand};
use std::net::IpAddr;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "todos")]
#[command(about = "REST API for todo records kept in a JSON file", long_about = None)]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub overrides: Overrides,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Settings that take precedence over the config file.
#[derive(Args, Debug, Default)]
pub struct Overrides {
    /// Config file to read (defaults to ./config.json when present)
    #[arg(long, global = true, env = "TODOS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Interface to bind
    #[arg(long, global = true, env = "TODOS_HOST")]
    pub host: Option<IpAddr>,

    /// Port to listen on
    #[arg(short, long, global = true, env = "PORT")]
    pub port: Option<u16>,

    /// JSON document holding the todos
    #[arg(long, global = true, env = "TODOS_DATA_FILE")]
    pub data_file: Option<PathBuf>,

    /// Prefix for every route (e.g. /api/v1)
    #[arg(long, global = true)]
    pub base_path: Option<String>,

    /// Seconds a cached list response stays fresh (0 disables)
    #[arg(long, global = true)]
    pub cache_ttl: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP server (default)
    Serve,

    /// Print the OpenAPI document
    Openapi,

    /// Print the resolved configuration
    Config {
        /// Write the resolved configuration back to the config file
        #[arg(long)]
        save: bool,
    },
}
