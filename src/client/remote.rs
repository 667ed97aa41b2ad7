// src/client/remote.rs

use reqwest::Client;
use std::time::Instant;

use crate::client::{CodeRunner, Language, RunRequest, RunResponse};
use crate::config::RunServiceConfig;
use crate::errors::{CodepadError, Result};

/// Calls the hosted compile/execute service, one endpoint per language.
#[derive(Clone)]
pub struct RemoteRunner {
    client: Client,
    config: RunServiceConfig,
}

impl RemoteRunner {
    pub fn new(client: Client, config: RunServiceConfig) -> Self {
        Self { client, config }
    }

    pub fn endpoint(&self, language: Language) -> String {
        format!(
            "{}{}",
            self.config.base_url.trim_end_matches('/'),
            language.endpoint_path()
        )
    }
}

impl CodeRunner for RemoteRunner {
    async fn run(&self, language: Language, code: &str) -> Result<RunResponse> {
        let url = self.endpoint(language);
        log::info!("Running {} code via {}", language, url);

        let start = Instant::now();
        let resp = self
            .client
            .post(&url)
            .json(&RunRequest { code })
            .send()
            .await?;

        let status = resp.status();
        let latency_ms = start.elapsed().as_millis() as u64;
        log::info!("Execution service responded {} ({}ms)", status, latency_ms);

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(CodepadError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp.text().await?;
        Ok(RunResponse::from_body(&body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_base_and_language() {
        let runner = RemoteRunner::new(
            Client::new(),
            RunServiceConfig {
                base_url: "https://runner.example/".to_string(),
            },
        );
        assert_eq!(runner.endpoint(Language::Java), "https://runner.example/run-java");
        assert_eq!(runner.endpoint(Language::C), "https://runner.example/run-c");
    }
}
