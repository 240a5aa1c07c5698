//! Command-line configuration.

use clap::Parser;
use notekeeper_core::default_log_level;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 8080;

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(
    name = "notekeeper",
    version,
    about = "Server-rendered in-memory note keeper"
)]
pub struct ServerConfig {
    /// Address to bind.
    #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED), value_name = "ADDR")]
    pub host: IpAddr,

    /// Port to listen on.
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Directory holding `base.html` and the page templates.
    #[arg(long, default_value = "templates", value_name = "DIR")]
    pub templates_dir: PathBuf,

    /// Directory served under `/static/`.
    #[arg(long, default_value = "static", value_name = "DIR")]
    pub static_dir: PathBuf,

    /// trace|debug|info|warn|error (default: debug builds `debug`, release `info`).
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Absolute directory for rolling log files (default: stderr).
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<String>,
}

impl ServerConfig {
    /// Listen address combining `host` and `port`.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Effective log level.
    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(default_log_level())
    }
}
