use cr_core::Result;

/// Per-call sampling options.
#[derive(Debug, Clone, PartialEq)]
pub struct CallOptions {
    /// Ask the provider for extended reasoning (slower, higher quality).
    pub reasoning: bool,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
}

#[async_trait::async_trait]
pub trait CompletionProvider: Send + Sync {
    fn name(&self) -> &str;
    /// Returns the completion text for a single-message prompt.
    async fn complete(&self, prompt: &str, options: &CallOptions) -> Result<String>;
}
