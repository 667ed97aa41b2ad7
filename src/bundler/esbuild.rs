// src/bundler/esbuild.rs

use std::process::Stdio;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::process::Command;

use crate::bundler::{BundleJob, Bundler};
use crate::config::BundlerConfig;
use crate::errors::{CodepadError, Result};

/// Runs the esbuild command-line binary as a child process.
pub struct EsbuildCli {
    binary: String,
    timeout: Duration,
}

impl EsbuildCli {
    pub fn new(binary: impl Into<String>, timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            timeout,
        }
    }

    pub fn from_config(config: &BundlerConfig) -> Self {
        Self::new(config.binary.clone(), config.timeout)
    }
}

#[async_trait]
impl Bundler for EsbuildCli {
    async fn bundle(&self, job: BundleJob<'_>) -> Result<()> {
        let node_path = std::env::join_paths(&job.options.node_paths)
            .map_err(|e| CodepadError::Config(format!("invalid node path: {}", e)))?;

        let mut cmd = Command::new(&self.binary);
        // esbuild annotates the bundle with paths relative to its cwd
        if let Some(dir) = job.entry.parent().filter(|d| !d.as_os_str().is_empty()) {
            cmd.current_dir(dir);
        }
        cmd.args(job.esbuild_args())
            .env("NODE_PATH", node_path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        log::debug!("Running {} for {}", self.binary, job.entry.display());
        let start = Instant::now();

        let output = match tokio::time::timeout(self.timeout, cmd.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(source)) => {
                return Err(CodepadError::BundlerUnavailable {
                    binary: self.binary.clone(),
                    source,
                });
            }
            Err(_) => return Err(CodepadError::BuildTimeout(self.timeout.as_secs())),
        };

        let latency_ms = start.elapsed().as_millis() as u64;
        log::debug!("{} exited with {} ({}ms)", self.binary, output.status, latency_ms);

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let message = if stderr.is_empty() {
                format!("{} exited with {}", self.binary, output.status)
            } else {
                stderr
            };
            return Err(CodepadError::BuildFailure(message));
        }

        Ok(())
    }
}
