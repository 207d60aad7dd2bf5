use clap::{Parser, ValueEnum};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Command-line arguments, each with an environment fallback.
#[derive(Debug, Clone, Parser)]
#[command(name = "post-admin", version, about = "Blog post admin server")]
pub struct Config {
    /// Address the HTTP server binds to.
    #[arg(long, env = "POST_ADMIN_LISTEN", default_value = "0.0.0.0:8010")]
    pub listen: SocketAddr,

    /// Directory holding the post store.
    #[arg(long, env = "POST_ADMIN_STORE_PATH", value_name = "PATH", default_value = "./store")]
    pub store_path: PathBuf,

    #[arg(long, env = "POST_ADMIN_LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    /// Single origin allowed to make cross-origin requests. CORS stays off
    /// when unset.
    #[arg(long, env = "POST_ADMIN_CORS_ORIGIN", value_name = "ORIGIN")]
    pub cors_origin: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Compact,
    Json,
}
