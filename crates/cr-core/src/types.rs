use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A snippet submitted for review and documentation.
///
/// Both fields default to empty: a body without `code` is reported by
/// [`AnalysisRequest::validate`] rather than by the deserializer, and a body
/// without `language` is analyzed with an empty language.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisRequest {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub language: String,
}

impl AnalysisRequest {
    pub fn new(code: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            language: language.into(),
        }
    }

    /// Rejects blank code before anything is sent to the provider. The
    /// language is passed through as given, even when empty.
    pub fn validate(&self) -> Result<()> {
        if self.code.trim().is_empty() {
            return Err(Error::Validation("Code cannot be empty".to_string()));
        }
        Ok(())
    }
}

/// Review and documentation produced for one [`AnalysisRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub review: String,
    pub docstring: String,
    pub language: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_non_blank_code() {
        assert!(AnalysisRequest::new("def f(x): return x+1", "python").validate().is_ok());
    }

    #[test]
    fn test_rejects_empty_and_whitespace_code() {
        for code in ["", "   ", "\n\t  \n"] {
            let err = AnalysisRequest::new(code, "python").validate().unwrap_err();
            assert!(matches!(err, Error::Validation(_)), "code {code:?}");
            assert_eq!(err.to_string(), "Code cannot be empty");
        }
    }

    #[test]
    fn test_accepts_blank_language() {
        assert!(AnalysisRequest::new("fn main() {}", "").validate().is_ok());
        assert!(AnalysisRequest::new("fn main() {}", " ").validate().is_ok());
    }

    #[test]
    fn test_missing_fields_deserialize_as_empty() {
        let req: AnalysisRequest = serde_json::from_str(r#"{"language":"rust"}"#).unwrap();
        assert!(req.code.is_empty());
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_result_serializes_with_expected_keys() {
        let result = AnalysisResult {
            review: "looks fine".into(),
            docstring: "/// Adds one.".into(),
            language: "rust".into(),
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["review"], "looks fine");
        assert_eq!(value["docstring"], "/// Adds one.");
        assert_eq!(value["language"], "rust");
    }
}
