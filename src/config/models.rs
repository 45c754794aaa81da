use crate::humanize::HumanDuration;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub converter: ConverterConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

/// External converter configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConverterConfig {
    /// ImageMagick `convert` binary, looked up on PATH unless absolute
    #[serde(default = "default_program")]
    pub program: PathBuf,
    /// Upper bound on a single invocation; the process is killed on expiry
    #[serde(default = "default_timeout")]
    pub timeout: HumanDuration,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            timeout: default_timeout(),
        }
    }
}

fn default_program() -> PathBuf {
    PathBuf::from("convert")
}

fn default_timeout() -> HumanDuration {
    HumanDuration::from_secs(30)
}
