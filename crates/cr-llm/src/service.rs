use std::sync::Arc;

use cr_core::{AnalysisRequest, AnalysisResult, ProviderConfig, Result};
use tracing::info;

use super::client::ChatClient;
use super::prompt::{build_docstring_prompt, build_review_prompt};
use super::provider::{CallOptions, CompletionProvider};

const DEFAULT_TEMPERATURE: f32 = 0.3;

/// Produces a review and documentation for a snippet with two provider calls.
pub struct AnalysisService {
    provider: Arc<dyn CompletionProvider>,
    temperature: f32,
    max_tokens: Option<u32>,
}

impl AnalysisService {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self {
            provider,
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: None,
        }
    }

    /// Service backed by a [`ChatClient`] built from `config`.
    pub fn from_config(config: Arc<ProviderConfig>) -> Result<Self> {
        let temperature = config.temperature;
        let max_tokens = config.max_tokens;
        let client = ChatClient::new(config)?;
        Ok(Self::new(Arc::new(client)).with_sampling(temperature, max_tokens))
    }

    pub fn with_sampling(mut self, temperature: f32, max_tokens: Option<u32>) -> Self {
        self.temperature = temperature;
        self.max_tokens = max_tokens;
        self
    }

    /// Runs the review and documentation calls concurrently. Either failure
    /// fails the whole analysis; no partial result is returned.
    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult> {
        request.validate()?;
        info!(
            provider = self.provider.name(),
            language = %request.language,
            chars = request.code.len(),
            "analyzing code"
        );

        let review_prompt = build_review_prompt(&request.code, &request.language);
        let docstring_prompt = build_docstring_prompt(&request.code, &request.language);
        let review_options = CallOptions {
            reasoning: true,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };
        let docstring_options = CallOptions {
            reasoning: false,
            ..review_options.clone()
        };

        let (review, docstring) = tokio::try_join!(
            self.provider.complete(&review_prompt, &review_options),
            self.provider.complete(&docstring_prompt, &docstring_options),
        )?;

        info!(language = %request.language, "analysis complete");
        Ok(AnalysisResult {
            review,
            docstring,
            language: request.language.clone(),
        })
    }
}
