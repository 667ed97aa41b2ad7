// src/api/state.rs
use crate::config::AppConfig;
use crate::errors::Result;
use crate::transpiler::Transpiler;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub transpiler: Arc<Transpiler>,
}

impl AppState {
    pub fn new(config: AppConfig, transpiler: Transpiler) -> Self {
        Self {
            config: Arc::new(config),
            transpiler: Arc::new(transpiler),
        }
    }

    /// State backed by the esbuild CLI as configured.
    pub async fn from_config(config: AppConfig) -> Result<Self> {
        let transpiler = Transpiler::from_config(&config.bundler).await?;
        Ok(Self::new(config, transpiler))
    }
}
