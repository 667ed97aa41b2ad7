// src/errors.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodepadError {
    #[error("File operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API request failed with status {status}: {body}")]
    ApiError { status: u16, body: String },

    /// Diagnostics printed by the bundler, passed through verbatim.
    #[error("{0}")]
    BuildFailure(String),

    #[error("Output file not created: {}", .0.display())]
    ArtifactMissing(PathBuf),

    #[error("Bundler '{binary}' could not be started: {source}")]
    BundlerUnavailable {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Bundler did not finish within {0}s")]
    BuildTimeout(u64),

    #[error("Language '{0}' is not supported")]
    UnsupportedLanguage(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, CodepadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifact_missing_names_the_path() {
        let err = CodepadError::ArtifactMissing(PathBuf::from("/tmp/codepad/abc.js"));
        assert_eq!(err.to_string(), "Output file not created: /tmp/codepad/abc.js");
    }

    #[test]
    fn build_failure_is_verbatim() {
        let err = CodepadError::BuildFailure("entry.jsx:1:9: ERROR: Expected \")\"".to_string());
        assert_eq!(err.to_string(), "entry.jsx:1:9: ERROR: Expected \")\"");
    }
}
