use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use dotenv::dotenv;

pub const DEFAULT_ADDR: &str = "0.0.0.0:8501";
pub const DEFAULT_ARTIFACT: &str = taspm::job::DEFAULT_ARTIFACT;
pub const DEFAULT_LOG_FILTER: &str = "taspm_server=info,tower_http=info";

#[derive(Clone, Debug)]
pub struct Config {
    /// Address to listen on
    pub addr: SocketAddr,
    /// Pipeline artifact written by `taspm-train`
    pub artifact: PathBuf,
    /// `tracing` filter directives
    pub log_filter: String,
}

impl Config {
    /// Read `TASPM_ADDR`, `TASPM_ARTIFACT` and `RUST_LOG`, honouring a `.env` file.
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let addr = env::var("TASPM_ADDR")
            .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
            .parse()
            .context("Invalid TASPM_ADDR")?;

        let artifact = env::var("TASPM_ARTIFACT").unwrap_or_else(|_| DEFAULT_ARTIFACT.to_string());

        let log_filter = env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string());

        Ok(Config {
            addr,
            artifact: PathBuf::from(artifact),
            log_filter,
        })
    }
}
