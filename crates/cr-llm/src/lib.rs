//! LLM side of the relay: prompt templates, the chat-completions client with
//! its retry policy and response decoding, and [`AnalysisService`], which
//! turns one snippet into a review plus documentation.

pub mod client;
pub mod parse;
pub mod prompt;
pub mod provider;
pub mod retry;
pub mod service;

pub use client::ChatClient;
pub use provider::{CallOptions, CompletionProvider};
pub use retry::RetryPolicy;
pub use service::AnalysisService;
