//! Endpoint core for POST /api/generate-question.
//!
//! One handler, independent of the hosting platform: the request method and
//! raw body bytes come in, an [`EndpointResponse`] comes out, and the
//! upstream service is an injected [`QuizBackend`] strategy. The `api/`
//! entrypoints only adapt this to `vercel_runtime` types.

use async_trait::async_trait;
use http::{Method, StatusCode};
use serde_json::{json, Value};

use crate::error::{ApiError, UpstreamError};

/// The upstream generation strategy the endpoint forwards prompts to.
///
/// `GeminiClient` implements this in production; tests substitute mocks.
#[async_trait]
pub trait QuizBackend: Send + Sync {
    /// Generates quiz JSON text for the given prompt.
    async fn generate(&self, prompt: &str) -> Result<String, UpstreamError>;
}

/// Platform-neutral HTTP response produced by the endpoint core.
#[derive(Debug, Clone)]
pub struct EndpointResponse {
    /// HTTP status.
    pub status: StatusCode,
    /// Value for the `Allow` header, when the method was rejected.
    pub allow: Option<&'static str>,
    /// Response body. Always JSON text.
    pub body: String,
}

impl EndpointResponse {
    /// Successful relay of upstream-generated text, byte for byte.
    pub fn ok(body: String) -> Self {
        EndpointResponse {
            status: StatusCode::OK,
            allow: None,
            body,
        }
    }

    /// Error response carrying the uniform `{"error": "..."}` body.
    pub fn from_error(error: &ApiError) -> Self {
        EndpointResponse {
            status: error.status(),
            allow: matches!(error, ApiError::MethodNotAllowed).then_some("POST"),
            body: json!({ "error": error.to_string() }).to_string(),
        }
    }

    /// Converts into a Vercel runtime response.
    pub fn into_response(
        self,
    ) -> Result<vercel_runtime::Response<vercel_runtime::Body>, vercel_runtime::Error> {
        let mut builder = vercel_runtime::Response::builder()
            .status(self.status)
            .header("Content-Type", "application/json");
        if let Some(allow) = self.allow {
            builder = builder.header("Allow", allow);
        }
        Ok(builder.body(vercel_runtime::Body::Text(self.body))?)
    }
}

/// Extracts a usable prompt from the raw request body.
///
/// Distinguishes the three caller mistakes the endpoint reports
/// separately: no body at all, a body that is not JSON, and a JSON body
/// whose `prompt` is missing, blank, or not a string.
fn parse_prompt(body: &[u8]) -> Result<String, ApiError> {
    if body.is_empty() {
        return Err(ApiError::EmptyBody);
    }
    let value: Value = serde_json::from_slice(body)?;
    value
        .get("prompt")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|prompt| !prompt.is_empty())
        .map(str::to_owned)
        .ok_or(ApiError::MissingPrompt)
}

/// Handles one generation request.
///
/// Validation failures never reach the backend; a successful backend call
/// is relayed verbatim with status 200.
pub async fn handle_generate<B: QuizBackend>(
    method: &Method,
    body: &[u8],
    backend: &B,
) -> EndpointResponse {
    if *method != Method::POST {
        return EndpointResponse::from_error(&ApiError::MethodNotAllowed);
    }

    let prompt = match parse_prompt(body) {
        Ok(prompt) => prompt,
        Err(err) => {
            log::warn!("rejected request: {err}");
            return EndpointResponse::from_error(&err);
        }
    };

    log::info!("forwarding prompt ({} chars)", prompt.chars().count());

    match backend.generate(&prompt).await {
        Ok(text) => {
            log::info!("relaying upstream response ({} chars)", text.chars().count());
            EndpointResponse::ok(text)
        }
        Err(err) => {
            log::error!("upstream generation failed: {err}");
            EndpointResponse::from_error(&ApiError::Upstream(err))
        }
    }
}
