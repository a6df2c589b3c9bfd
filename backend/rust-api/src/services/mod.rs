use anyhow::Context;
use std::sync::Arc;

use crate::config::Config;
use completion_client::{ChatCompletionsClient, CompletionClient};

pub struct AppState {
    pub config: Config,
    pub completion: Arc<dyn CompletionClient>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let client = ChatCompletionsClient::new(&config.llm)
            .context("Failed to build completion client")?;

        tracing::info!(
            "Completion client ready: base_url={}, model={}",
            config.llm.base_url,
            config.llm.model
        );

        Ok(Self::with_client(config, Arc::new(client)))
    }

    pub fn with_client(config: Config, completion: Arc<dyn CompletionClient>) -> Self {
        Self { config, completion }
    }
}

pub mod assistant_service;
pub mod completion_client;
pub mod normalizer;
pub mod prompt_builder;
pub mod result_parser;
pub mod validation;
