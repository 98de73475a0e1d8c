use std::time::Duration;

use anyhow::{bail, Context, Result};
use axum::http::HeaderValue;
use clap::Parser;
use cr_core::config::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use cr_core::ProviderConfig;

#[derive(Parser, Debug)]
#[command(name = "cr-server", about = "Code review & documentation relay: HTTP API over an LLM provider")]
pub struct Cli {
    /// Address to listen on (HTTP)
    #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:8000")]
    pub listen_addr: String,

    /// Provider API key. Startup succeeds without one; analysis requests then
    /// fail with a configuration error.
    #[arg(long, env = "OPENROUTER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Base URL of the OpenAI-compatible provider API
    #[arg(long, env = "OPENROUTER_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Model identifier sent with every completion request
    #[arg(long, env = "OPENROUTER_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    #[arg(long, env = "LLM_TEMPERATURE", default_value_t = 0.3)]
    pub temperature: f32,

    /// Completion token limit; 0 leaves it to the provider
    #[arg(long, env = "LLM_MAX_TOKENS", default_value_t = 2000)]
    pub max_tokens: u32,

    /// Per-attempt timeout for provider calls, in seconds
    #[arg(long, env = "LLM_TIMEOUT_SECS", default_value_t = 120)]
    pub timeout_secs: u64,

    /// Retries for timeouts, network errors, 429 and 5xx; 0 disables
    #[arg(long, env = "LLM_MAX_RETRIES", default_value_t = 2)]
    pub max_retries: u32,

    /// Backoff before the first retry, doubled on each subsequent one
    #[arg(long, env = "LLM_RETRY_BASE_MS", default_value_t = 500)]
    pub retry_base_ms: u64,

    /// Sent to the provider as HTTP-Referer; empty to omit
    #[arg(long, env = "APP_REFERER", default_value = "http://localhost:8000")]
    pub app_referer: String,

    /// Sent to the provider as X-Title; empty to omit
    #[arg(long, env = "APP_TITLE", default_value = "AI Code Review Tool")]
    pub app_title: String,

    /// Comma-separated origins allowed to call the API from a browser
    #[arg(
        long,
        env = "CORS_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:3000,http://localhost:5173"
    )]
    pub cors_origins: Vec<String>,
}

impl Cli {
    pub fn provider_config(&self) -> ProviderConfig {
        ProviderConfig {
            api_key: self.api_key.as_deref().and_then(non_empty),
            base_url: self.base_url.clone(),
            model: self.model.clone(),
            temperature: self.temperature,
            max_tokens: (self.max_tokens > 0).then_some(self.max_tokens),
            timeout: Duration::from_secs(self.timeout_secs),
            max_retries: self.max_retries,
            retry_base_delay: Duration::from_millis(self.retry_base_ms),
            referer: non_empty(&self.app_referer),
            title: non_empty(&self.app_title),
        }
    }

    /// Explicit origins only: credentials are allowed, which rules out `*`.
    pub fn allowed_origins(&self) -> Result<Vec<HeaderValue>> {
        self.cors_origins
            .iter()
            .map(|origin| origin.trim())
            .filter(|origin| !origin.is_empty())
            .map(|origin| {
                if origin == "*" {
                    bail!("wildcard CORS origin cannot be combined with credentials");
                }
                HeaderValue::from_str(origin)
                    .with_context(|| format!("invalid CORS origin: {origin}"))
            })
            .collect()
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}
