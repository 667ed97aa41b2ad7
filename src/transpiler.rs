// src/transpiler.rs
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use uuid::Uuid;

use crate::bundler::{self, BuildOptions, BundleJob, Bundler, EsbuildCli};
use crate::config::BundlerConfig;
use crate::errors::{CodepadError, Result};
use crate::models::BuildResult;

pub const INPUT_FILE_NAME: &str = "entry.jsx";
pub const OUTPUT_FILE_NAME: &str = "bundle.js";

/// Input and output files of one transpile call.
///
/// Both live in a fresh UUID-named directory so concurrent calls never touch
/// each other's files, while the file names themselves stay fixed and the
/// bundle text does not depend on the request. Dropping the value removes
/// the directory and whatever it holds.
struct BuildArtifacts {
    dir: PathBuf,
    input: PathBuf,
    output: PathBuf,
}

impl BuildArtifacts {
    async fn create(work_dir: &Path) -> Result<Self> {
        let dir = work_dir.join(Uuid::new_v4().to_string());
        // recreates the work dir too if it was cleaned away under us
        tokio::fs::create_dir_all(&dir).await?;
        Ok(Self {
            input: dir.join(INPUT_FILE_NAME),
            output: dir.join(OUTPUT_FILE_NAME),
            dir,
        })
    }
}

impl Drop for BuildArtifacts {
    fn drop(&mut self) {
        // blocking on purpose: Drop cannot await, and the dir holds two small files
        match std::fs::remove_dir_all(&self.dir) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            // never replaces the result already produced
            Err(e) => log::warn!("Failed to remove build artifacts in {}: {}", self.dir.display(), e),
        }
    }
}

/// Turns a single JSX/JS source text into one browser-ready IIFE bundle.
pub struct Transpiler {
    bundler: Arc<dyn Bundler>,
    options: BuildOptions,
    work_dir: PathBuf,
    /// Set when the injected shim is the embedded one, so it can be
    /// written again if it disappears.
    embedded_shim: Option<BundlerConfig>,
}

impl Transpiler {
    pub fn new(bundler: Arc<dyn Bundler>, options: BuildOptions, work_dir: PathBuf) -> Self {
        Self {
            bundler,
            options,
            work_dir,
            embedded_shim: None,
        }
    }

    /// Swap the bundler, keeping options and work dir.
    pub fn with_bundler(mut self, bundler: Arc<dyn Bundler>) -> Self {
        self.bundler = bundler;
        self
    }

    /// Build a transpiler backed by the esbuild CLI, preparing the work
    /// directory and the injected shim.
    ///
    /// Relative paths are resolved against the current directory, since the
    /// bundler runs from inside each request's directory.
    pub async fn from_config(config: &BundlerConfig) -> Result<Self> {
        let config = BundlerConfig {
            work_dir: std::path::absolute(&config.work_dir)?,
            node_modules: std::path::absolute(&config.node_modules)?,
            shim: config.shim.as_deref().map(std::path::absolute).transpose()?,
            ..config.clone()
        };
        tokio::fs::create_dir_all(&config.work_dir).await?;
        let shim = bundler::prepare_shim(&config).await?;
        let options = BuildOptions::react_iife(shim, config.node_modules.clone());
        let mut transpiler = Self::new(
            Arc::new(EsbuildCli::from_config(&config)),
            options,
            config.work_dir.clone(),
        );
        if config.shim.is_none() {
            transpiler.embedded_shim = Some(config);
        }
        Ok(transpiler)
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Bundle `code`. Every failure is folded into `BuildResult::Failure`.
    pub async fn transpile(&self, code: &str) -> BuildResult {
        let start = Instant::now();
        log::debug!("Received {} bytes of code", code.len());

        match self.build(code).await {
            Ok(bundled) => {
                log::info!(
                    "Bundled {} bytes into {} bytes ({}ms)",
                    code.len(),
                    bundled.len(),
                    start.elapsed().as_millis()
                );
                BuildResult::Success { code: bundled }
            }
            Err(e) => {
                log::warn!("Build failed ({}ms): {}", start.elapsed().as_millis(), e);
                BuildResult::Failure {
                    error: e.to_string(),
                }
            }
        }
    }

    async fn restore_shim(&self) -> Result<()> {
        let Some(config) = &self.embedded_shim else {
            return Ok(());
        };
        for shim in &self.options.inject {
            if !tokio::fs::try_exists(shim).await? {
                log::warn!("Shim {} went missing; writing it again", shim.display());
                bundler::prepare_shim(config).await?;
            }
        }
        Ok(())
    }

    async fn build(&self, code: &str) -> Result<String> {
        self.restore_shim().await?;
        let artifacts = BuildArtifacts::create(&self.work_dir).await?;
        tokio::fs::write(&artifacts.input, code).await?;

        self.bundler
            .bundle(BundleJob {
                entry: &artifacts.input,
                outfile: &artifacts.output,
                options: &self.options,
            })
            .await?;

        if !tokio::fs::try_exists(&artifacts.output).await? {
            return Err(CodepadError::ArtifactMissing(artifacts.output.clone()));
        }

        let bundled = tokio::fs::read_to_string(&artifacts.output).await?;
        Ok(bundled)
    }
}
