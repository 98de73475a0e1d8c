use std::sync::Arc;

use cr_core::{Error, ProviderConfig, Result};
use serde::Serialize;
use tracing::{debug, warn};

use super::parse::decode_reply;
use super::provider::{CallOptions, CompletionProvider};
use super::retry::RetryPolicy;

/// Client for an OpenAI-compatible `/chat/completions` endpoint
/// (OpenRouter by default).
pub struct ChatClient {
    client: reqwest::Client,
    config: Arc<ProviderConfig>,
    retry: RetryPolicy,
}

impl ChatClient {
    pub fn new(config: Arc<ProviderConfig>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Configuration(format!("failed to build HTTP client: {e}")))?;
        let retry = RetryPolicy::from_config(&config);
        Ok(Self {
            client,
            config,
            retry,
        })
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    async fn send_once(&self, api_key: &str, body: &ChatRequest<'_>, attempt: u32) -> Result<String> {
        let mut request = self
            .client
            .post(self.config.completions_url())
            .bearer_auth(api_key)
            .json(body);
        if let Some(referer) = &self.config.referer {
            request = request.header("HTTP-Referer", referer);
        }
        if let Some(title) = &self.config.title {
            request = request.header("X-Title", title);
        }

        let resp = request.send().await.map_err(|e| self.transport_error(e))?;
        let status = resp.status();
        debug!(attempt, status = status.as_u16(), "provider responded");

        let text = resp.text().await.map_err(|e| self.transport_error(e))?;
        if !status.is_success() {
            warn!(status = status.as_u16(), body = %text, "provider returned an error status");
            return Err(Error::ProviderHttp {
                status: status.as_u16(),
                body: text,
            });
        }

        decode_reply(&text).into_result()
    }

    fn transport_error(&self, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            Error::Timeout(self.config.timeout)
        } else {
            Error::Network(error_chain(&e))
        }
    }
}

#[async_trait::async_trait]
impl CompletionProvider for ChatClient {
    fn name(&self) -> &str {
        "chat-completions"
    }

    async fn complete(&self, prompt: &str, options: &CallOptions) -> Result<String> {
        let api_key = self.config.require_api_key()?;
        let body = &ChatRequest {
            model: &self.config.model,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
            temperature: options.temperature,
            max_tokens: options.max_tokens,
            reasoning: Some(options.reasoning),
        };
        self.retry
            .run(&self.config.model, |attempt| self.send_once(api_key, body, attempt))
            .await
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reasoning: Option<bool>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

/// reqwest's top-level message omits the cause ("error sending request"),
/// so append the source chain.
fn error_chain(e: &reqwest::Error) -> String {
    let mut message = e.to_string();
    let mut source = std::error::Error::source(e);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
