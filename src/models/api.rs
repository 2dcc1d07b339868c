use serde::{Deserialize, Serialize};

/// API request body for the /api/generate-question endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// The full natural-language instruction sent to the generative model.
    pub prompt: String,
}

impl GenerateRequest {
    /// Creates a request from an already-built prompt string.
    pub fn new(prompt: impl Into<String>) -> Self {
        GenerateRequest {
            prompt: prompt.into(),
        }
    }
}

/// Uniform error body returned by every endpoint failure path.
///
/// The server always answers errors as `{"error": "..."}` with a
/// human-readable message; clients parse this shape back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Localized, user-facing error message.
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        ErrorBody {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_request_serializes_to_prompt_field() {
        let request = GenerateRequest::new("自己紹介してください");
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, r#"{"prompt":"自己紹介してください"}"#);
    }

    #[test]
    fn test_generate_request_round_trips() {
        let request = GenerateRequest::new("フランス革命");
        let json = serde_json::to_string(&request).unwrap();
        let back: GenerateRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back.prompt, "フランス革命");
    }

    #[test]
    fn test_error_body_parses_server_shape() {
        let body: ErrorBody = serde_json::from_str(r#"{"error":"有効なプロンプトが必要です"}"#).unwrap();
        assert_eq!(body.error, "有効なプロンプトが必要です");
    }
}
