//! Server configuration from environment variables

use crate::sink::{FileSink, NoopSink, OutputSink};
use log::LevelFilter;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DEBUG_OUTPUT: &str = "debug_output.pdf";
pub const DEFAULT_STATIC_DIR: &str = "public";
pub const DEFAULT_MAX_UPLOAD_MB: usize = 50;

pub const ENV_PORT: &str = "PORT";
pub const ENV_HOST: &str = "PDF_SHEETS_HOST";
pub const ENV_DEBUG_OUTPUT: &str = "PDF_SHEETS_DEBUG_OUTPUT";
pub const ENV_STATIC_DIR: &str = "PDF_SHEETS_STATIC_DIR";
pub const ENV_MAX_UPLOAD_MB: &str = "PDF_SHEETS_MAX_UPLOAD_MB";
pub const ENV_OPTIONS: &str = "PDF_SHEETS_OPTIONS";
pub const ENV_LOG: &str = "PDF_SHEETS_LOG";
pub const ENV_RUST_LOG: &str = "RUST_LOG";

#[derive(Error, Debug)]
#[error("Invalid value {value:?} for {var}: {reason}")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Directory served for every path other than `/convert`
    pub static_dir: PathBuf,
    /// Where each successful conversion is copied; `None` disables the copy
    pub debug_output: Option<PathBuf>,
    pub max_upload_bytes: usize,
    /// JSON `ImposeOptions` file; defaults are used when unset
    pub options_path: Option<PathBuf>,
    pub log_level: LevelFilter,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            debug_output: Some(PathBuf::from(DEFAULT_DEBUG_OUTPUT)),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_MB * 1024 * 1024,
            options_path: None,
            log_level: LevelFilter::Info,
        }
    }
}

impl ServerConfig {
    /// Read the configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read the configuration through `lookup`, which maps a variable name to its value.
    ///
    /// Unset and empty variables keep their defaults, except
    /// `PDF_SHEETS_DEBUG_OUTPUT`, where an empty value turns the debug copy off.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let non_empty = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        if let Some(port) = non_empty(ENV_PORT) {
            config.port = parse(ENV_PORT, &port)?;
        }
        if let Some(host) = non_empty(ENV_HOST) {
            config.host = parse(ENV_HOST, &host)?;
        }
        if let Some(dir) = non_empty(ENV_STATIC_DIR) {
            config.static_dir = PathBuf::from(dir);
        }
        if let Some(path) = lookup(ENV_DEBUG_OUTPUT) {
            config.debug_output = Some(path)
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from);
        }
        if let Some(mb) = non_empty(ENV_MAX_UPLOAD_MB) {
            let mb: usize = parse(ENV_MAX_UPLOAD_MB, &mb)?;
            config.max_upload_bytes = mb.saturating_mul(1024 * 1024);
        }
        if let Some(path) = non_empty(ENV_OPTIONS) {
            config.options_path = Some(PathBuf::from(path));
        }
        if let Some(level) = non_empty(ENV_LOG) {
            config.log_level = parse(ENV_LOG, &level)?;
        } else if let Some(level) = non_empty(ENV_RUST_LOG) {
            // Only a bare level applies; per-target directives are ignored
            if let Ok(level) = level.trim().parse() {
                config.log_level = level;
            }
        }

        Ok(config)
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// The output sink selected by `debug_output`
    pub fn sink(&self) -> Arc<dyn OutputSink> {
        match &self.debug_output {
            Some(path) => Arc::new(FileSink::new(path.clone())),
            None => Arc::new(NoopSink),
        }
    }
}

fn parse<T>(var: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError {
        var,
        value: value.to_string(),
        reason: e.to_string(),
    })
}
