pub mod api;
pub mod config;
pub mod error;
pub mod llm;
pub mod summarize;

use std::sync::Arc;
use config::Config;
use llm::{GeminiClient, SummaryUpstream};

/// Application state that will be shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub upstream: Arc<dyn SummaryUpstream>,
}

impl AppState {
    /// State backed by the real Gemini endpoint from `config`.
    pub fn new(config: Config) -> Self {
        let upstream = Arc::new(GeminiClient::new(config.api_base_url.clone()));
        AppState {
            config: Arc::new(config),
            upstream,
        }
    }
}

/// Installs the fmt subscriber. `RUST_LOG` overrides the default `info` level.
pub fn setup_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}
