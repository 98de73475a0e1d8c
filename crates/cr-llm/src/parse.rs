use cr_core::{Error, Result};
use serde::Deserialize;

/// Longest slice of an unexpected body echoed back in an error message.
const MAX_ECHOED_BODY_CHARS: usize = 500;

/// Decoded outcome of a 2xx chat-completions response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderReply {
    Completion(String),
    /// The body carried `{"error": {"message": ...}}` instead of choices.
    VendorError(String),
    Malformed(String),
}

impl ProviderReply {
    pub fn into_result(self) -> Result<String> {
        match self {
            ProviderReply::Completion(text) => Ok(text),
            ProviderReply::VendorError(message) => Err(Error::MalformedResponse(format!(
                "provider reported an error: {message}"
            ))),
            ProviderReply::Malformed(detail) => Err(Error::MalformedResponse(detail)),
        }
    }
}

#[derive(Deserialize)]
struct Envelope {
    choices: Option<Vec<Choice>>,
    error: Option<VendorErrorBody>,
}

#[derive(Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct VendorErrorBody {
    message: Option<String>,
}

pub fn decode_reply(body: &str) -> ProviderReply {
    let envelope: Envelope = match serde_json::from_str(body) {
        Ok(envelope) => envelope,
        Err(e) => {
            return ProviderReply::Malformed(format!(
                "response body is not a JSON object ({e}): {}",
                truncate(body)
            ))
        }
    };

    if let Some(choices) = envelope.choices {
        let Some(first) = choices.into_iter().next() else {
            return ProviderReply::Malformed("provider returned empty choices".to_string());
        };
        return match first.message.and_then(|m| m.content) {
            Some(text) if !text.trim().is_empty() => ProviderReply::Completion(text),
            Some(_) => ProviderReply::Malformed("completion content is empty".to_string()),
            None => ProviderReply::Malformed("first choice has no message content".to_string()),
        };
    }

    if let Some(error) = envelope.error {
        return ProviderReply::VendorError(
            error.message.unwrap_or_else(|| "Unknown error".to_string()),
        );
    }

    ProviderReply::Malformed(format!("unexpected response format: {}", truncate(body)))
}

fn truncate(body: &str) -> &str {
    match body.char_indices().nth(MAX_ECHOED_BODY_CHARS) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_completion() {
        let body = r#"{"id":"gen-1","choices":[{"index":0,"message":{"role":"assistant","content":"Looks good."}}]}"#;
        assert_eq!(decode_reply(body), ProviderReply::Completion("Looks good.".into()));
    }

    #[test]
    fn test_decode_uses_first_choice() {
        let body = r#"{"choices":[{"message":{"content":"first"}},{"message":{"content":"second"}}]}"#;
        assert_eq!(decode_reply(body), ProviderReply::Completion("first".into()));
    }

    #[test]
    fn test_decode_vendor_error_keeps_message_verbatim() {
        let body = r#"{"error":{"message":"Rate limit exceeded: free-models-per-day","code":429}}"#;
        let reply = decode_reply(body);
        assert_eq!(
            reply,
            ProviderReply::VendorError("Rate limit exceeded: free-models-per-day".into())
        );
        let err = reply.into_result().unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)));
        assert!(err.to_string().contains("Rate limit exceeded: free-models-per-day"));
    }

    #[test]
    fn test_decode_vendor_error_without_message() {
        assert_eq!(
            decode_reply(r#"{"error":{}}"#),
            ProviderReply::VendorError("Unknown error".into())
        );
    }

    #[test]
    fn test_decode_missing_choices_and_error() {
        let reply = decode_reply(r#"{"id":"gen-2","object":"chat.completion"}"#);
        assert!(matches!(reply, ProviderReply::Malformed(ref d) if d.contains("unexpected response format")));
        assert!(matches!(reply.into_result(), Err(Error::MalformedResponse(_))));
    }

    #[test]
    fn test_decode_empty_choices() {
        assert_eq!(
            decode_reply(r#"{"choices":[]}"#),
            ProviderReply::Malformed("provider returned empty choices".into())
        );
    }

    #[test]
    fn test_decode_choice_without_content() {
        let reply = decode_reply(r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#);
        assert!(matches!(reply, ProviderReply::Malformed(_)));
        let reply = decode_reply(r#"{"choices":[{"finish_reason":"length"}]}"#);
        assert!(matches!(reply, ProviderReply::Malformed(_)));
    }

    #[test]
    fn test_decode_blank_content() {
        let reply = decode_reply(r#"{"choices":[{"message":{"content":"  \n"}}]}"#);
        assert_eq!(reply, ProviderReply::Malformed("completion content is empty".into()));
    }

    #[test]
    fn test_decode_non_json_body() {
        let reply = decode_reply("<html>Bad Gateway</html>");
        assert!(matches!(reply, ProviderReply::Malformed(ref d) if d.contains("Bad Gateway")));
    }

    #[test]
    fn test_truncate_long_body() {
        let body = "é".repeat(MAX_ECHOED_BODY_CHARS + 10);
        assert_eq!(truncate(&body).chars().count(), MAX_ECHOED_BODY_CHARS);
    }
}
