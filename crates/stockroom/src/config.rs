use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_BIND: &str = "127.0.0.1:8080";
const DEFAULT_CHANNEL_CAPACITY: usize = 32;
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 5_000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// One line per event, no module targets.
    #[default]
    Compact,
    /// Newline-delimited JSON.
    Json,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "stockroom", about = "Inventory and order management service", version)]
pub struct CliArgs {
    #[arg(
        long,
        env = "STOCKROOM_BIND",
        value_name = "ADDR",
        default_value = DEFAULT_BIND,
        help = "Address the HTTP server listens on"
    )]
    pub bind: SocketAddr,

    #[arg(
        long,
        env = "STOCKROOM_DATABASE",
        value_name = "FILE",
        help = "SQLite database file; an in-memory database is used when omitted"
    )]
    pub database: Option<PathBuf>,

    #[arg(
        long,
        env = "STOCKROOM_CHANNEL_CAPACITY",
        value_name = "N",
        default_value_t = DEFAULT_CHANNEL_CAPACITY,
        help = "Queued requests per actor before callers wait"
    )]
    pub channel_capacity: usize,

    #[arg(
        long,
        env = "STOCKROOM_REQUEST_TIMEOUT_MS",
        value_name = "MS",
        default_value_t = DEFAULT_REQUEST_TIMEOUT_MS,
        help = "How long a request waits on an actor; 0 waits forever"
    )]
    pub request_timeout_ms: u64,

    #[arg(
        long,
        env = "STOCKROOM_LOG_FORMAT",
        value_enum,
        default_value_t = LogFormat::Compact,
        help = "Log output format"
    )]
    pub log_format: LogFormat,
}

/// Actor wiring knobs, independent of where the data lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActorSettings {
    pub channel_capacity: usize,
    /// Deadline for calls made through the clients handed to request handlers.
    pub request_timeout: Option<Duration>,
}

impl Default for ActorSettings {
    fn default() -> Self {
        Self {
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            request_timeout: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub database: Option<PathBuf>,
    pub actors: ActorSettings,
    pub log_format: LogFormat,
}

impl ServerConfig {
    pub fn from_args(args: CliArgs) -> Result<Self> {
        let CliArgs {
            bind,
            database,
            channel_capacity,
            request_timeout_ms,
            log_format,
        } = args;

        anyhow::ensure!(channel_capacity >= 1, "channel capacity must be at least 1");

        let request_timeout = (request_timeout_ms > 0).then(|| Duration::from_millis(request_timeout_ms));

        Ok(Self {
            bind,
            database,
            actors: ActorSettings {
                channel_capacity,
                request_timeout,
            },
            log_format,
        })
    }
}
