// src/config.rs
use std::path::PathBuf;
use std::time::Duration;

use crate::errors::{CodepadError, Result};

pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_RUN_BASE_URL: &str =
    "https://my-cloud-compiler-run-app-168268204735.asia-south1.run.app";

/// Settings for the esbuild invocation behind `/transpile`.
#[derive(Debug, Clone)]
pub struct BundlerConfig {
    /// Executable name or path of esbuild.
    pub binary: String,
    /// Directory holding request artifacts and the materialised shim.
    pub work_dir: PathBuf,
    /// Extra module search path handed to esbuild through `NODE_PATH`.
    pub node_modules: PathBuf,
    /// Custom shim to inject instead of the embedded React shim.
    pub shim: Option<PathBuf>,
    pub timeout: Duration,
}

/// Settings for the remote execution service the editor talks to.
#[derive(Debug, Clone)]
pub struct RunServiceConfig {
    pub base_url: String,
}

/// High-level application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub allowed_origin: String,
    /// Maximum accepted JSON body size in bytes.
    pub json_limit: usize,
    pub bundler: BundlerConfig,
    pub run_service: RunServiceConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let host = var("CODEPAD_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse_var(&var, "CODEPAD_PORT", DEFAULT_PORT)?;
        let allowed_origin =
            var("CODEPAD_ALLOWED_ORIGIN").unwrap_or_else(|| DEFAULT_ALLOWED_ORIGIN.to_string());
        let json_limit = parse_var(&var, "CODEPAD_JSON_LIMIT", 100 * 1024usize)?;

        let work_dir = var("CODEPAD_WORK_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join("codepad"));
        let node_modules = var("CODEPAD_NODE_MODULES")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("node_modules"));
        let timeout_secs = parse_var(&var, "CODEPAD_BUILD_TIMEOUT_SECS", 30u64)?;
        if timeout_secs == 0 {
            return Err(CodepadError::Config(
                "CODEPAD_BUILD_TIMEOUT_SECS must be at least 1".to_string(),
            ));
        }

        let bundler = BundlerConfig {
            binary: var("ESBUILD_BINARY").unwrap_or_else(|| "esbuild".to_string()),
            work_dir,
            node_modules,
            shim: var("CODEPAD_SHIM").map(PathBuf::from),
            timeout: Duration::from_secs(timeout_secs),
        };

        let base_url = var("CODEPAD_RUN_BASE_URL")
            .unwrap_or_else(|| DEFAULT_RUN_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(AppConfig {
            host,
            port,
            allowed_origin,
            json_limit,
            bundler,
            run_service: RunServiceConfig { base_url },
        })
    }
}

fn parse_var<T, F>(var: &F, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match var(key) {
        Some(raw) => raw
            .parse()
            .map_err(|_| CodepadError::Config(format!("{} has an invalid value: '{}'", key, raw))),
        None => Ok(default),
    }
}
