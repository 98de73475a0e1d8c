//! Shared types for the code review relay: the request/result pair exchanged
//! over HTTP, the provider configuration, and the error taxonomy every layer
//! reports through.

pub mod config;
pub mod error;
pub mod types;

pub use config::ProviderConfig;
pub use error::{Error, Result};
pub use types::{AnalysisRequest, AnalysisResult};
