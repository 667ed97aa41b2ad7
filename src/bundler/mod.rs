// src/bundler/mod.rs

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use rust_embed::RustEmbed;

use crate::config::BundlerConfig;
use crate::errors::{CodepadError, Result};

pub mod esbuild;

pub use esbuild::EsbuildCli;

/// Global identifier the IIFE assigns its exports to.
pub const GLOBAL_NAME: &str = "AppBundle";

/// Modules the hosting page supplies; they are never bundled.
pub const EXTERNALS: [&str; 3] = ["react", "react-dom", "react-dom/client"];

pub const SHIM_FILE_NAME: &str = "react-shim.js";

#[derive(RustEmbed)]
#[folder = "assets/"]
struct Assets;

/// The fixed build target used for every transpile request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    pub global_name: String,
    pub platform: String,
    pub format: String,
    /// `(identifier, replacement)` pairs substituted at bundle time.
    pub defines: Vec<(String, String)>,
    /// `(extension, loader)` pairs.
    pub loaders: Vec<(String, String)>,
    pub externals: Vec<String>,
    pub inject: Vec<PathBuf>,
    pub node_paths: Vec<PathBuf>,
}

impl BuildOptions {
    /// Browser IIFE exposing `AppBundle`, React kept external and bound through `shim`.
    pub fn react_iife(shim: PathBuf, node_modules: PathBuf) -> Self {
        Self {
            global_name: GLOBAL_NAME.to_string(),
            platform: "browser".to_string(),
            format: "iife".to_string(),
            defines: vec![(
                "process.env.NODE_ENV".to_string(),
                "\"development\"".to_string(),
            )],
            loaders: vec![(".jsx".to_string(), "jsx".to_string())],
            externals: EXTERNALS.iter().map(|m| m.to_string()).collect(),
            inject: vec![shim],
            node_paths: vec![node_modules],
        }
    }
}

/// One bundling run: a single entry file compiled into a single output file.
#[derive(Debug, Clone, Copy)]
pub struct BundleJob<'a> {
    pub entry: &'a Path,
    pub outfile: &'a Path,
    pub options: &'a BuildOptions,
}

impl BundleJob<'_> {
    /// Command-line arguments for the esbuild CLI.
    pub fn esbuild_args(&self) -> Vec<OsString> {
        let options = self.options;
        let mut args: Vec<OsString> = vec![self.entry.as_os_str().to_owned(), "--bundle".into()];

        let mut outfile = OsString::from("--outfile=");
        outfile.push(self.outfile.as_os_str());
        args.push(outfile);

        args.push(format!("--platform={}", options.platform).into());
        args.push(format!("--format={}", options.format).into());
        args.push(format!("--global-name={}", options.global_name).into());
        for (name, value) in &options.defines {
            args.push(format!("--define:{}={}", name, value).into());
        }
        for (ext, loader) in &options.loaders {
            args.push(format!("--loader:{}={}", ext, loader).into());
        }
        for module in &options.externals {
            args.push(format!("--external:{}", module).into());
        }
        for shim in &options.inject {
            let mut arg = OsString::from("--inject:");
            arg.push(shim.as_os_str());
            args.push(arg);
        }
        args.push("--log-level=error".into());
        args.push("--color=false".into());
        args
    }
}

/// Anything able to turn one entry file into one bundled output file.
///
/// A successful return only means the bundler reported no error; callers
/// still verify that the output file exists.
#[async_trait]
pub trait Bundler: Send + Sync {
    async fn bundle(&self, job: BundleJob<'_>) -> Result<()>;
}

/// Resolve the shim to inject, writing the embedded React shim into the work
/// directory when no custom one is configured.
pub async fn prepare_shim(config: &BundlerConfig) -> Result<PathBuf> {
    if let Some(custom) = &config.shim {
        if !tokio::fs::try_exists(custom).await? {
            return Err(CodepadError::Config(format!(
                "shim file {} does not exist",
                custom.display()
            )));
        }
        return Ok(custom.clone());
    }

    let shim = Assets::get(SHIM_FILE_NAME).ok_or_else(|| {
        CodepadError::Config(format!("embedded asset {} is missing", SHIM_FILE_NAME))
    })?;

    tokio::fs::create_dir_all(&config.work_dir).await?;
    let path = config.work_dir.join(SHIM_FILE_NAME);
    tokio::fs::write(&path, shim.data.as_ref()).await?;
    log::debug!("Wrote React shim to {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn args_as_strings(job: BundleJob<'_>) -> Vec<String> {
        job.esbuild_args()
            .into_iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_esbuild_args_carry_fixed_target() {
        let options = BuildOptions::react_iife(
            PathBuf::from("/work/react-shim.js"),
            PathBuf::from("/srv/node_modules"),
        );
        let job = BundleJob {
            entry: Path::new("/work/abc.jsx"),
            outfile: Path::new("/work/abc.js"),
            options: &options,
        };

        let args = args_as_strings(job);

        assert_eq!(args[0], "/work/abc.jsx");
        for expected in [
            "--bundle",
            "--outfile=/work/abc.js",
            "--platform=browser",
            "--format=iife",
            "--global-name=AppBundle",
            "--define:process.env.NODE_ENV=\"development\"",
            "--loader:.jsx=jsx",
            "--external:react",
            "--external:react-dom",
            "--external:react-dom/client",
            "--inject:/work/react-shim.js",
        ] {
            assert!(args.iter().any(|a| a == expected), "missing {}", expected);
        }
    }

    #[tokio::test]
    async fn test_prepare_shim_writes_embedded_asset() {
        let dir = tempfile::tempdir().unwrap();
        let config = BundlerConfig {
            binary: "esbuild".to_string(),
            work_dir: dir.path().join("work"),
            node_modules: PathBuf::from("node_modules"),
            shim: None,
            timeout: Duration::from_secs(5),
        };

        let path = prepare_shim(&config).await.unwrap();

        assert_eq!(path, dir.path().join("work").join(SHIM_FILE_NAME));
        let contents = std::fs::read_to_string(path).unwrap();
        assert!(contents.contains("window.React"));
    }

    #[tokio::test]
    async fn test_prepare_shim_rejects_missing_custom_shim() {
        let dir = tempfile::tempdir().unwrap();
        let config = BundlerConfig {
            binary: "esbuild".to_string(),
            work_dir: dir.path().to_path_buf(),
            node_modules: PathBuf::from("node_modules"),
            shim: Some(dir.path().join("nope.js")),
            timeout: Duration::from_secs(5),
        };

        let err = prepare_shim(&config).await.unwrap_err();
        assert!(matches!(err, CodepadError::Config(_)));
    }
}
