//! Client for the Google Generative Language (Gemini) API.
//!
//! One non-streaming `generateContent` call per quiz. The response is
//! requested as `application/json` and the generated text is returned
//! verbatim — the endpoint relays it without re-validating the shape.

use std::time::Instant;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::EndpointConfig;
use crate::error::UpstreamError;
use crate::handler::QuizBackend;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    code: u16,
    #[serde(default)]
    status: String,
    message: String,
}

/// Gemini client holding the credential, model, and a reused HTTP client.
///
/// Cheap to clone; safe to keep in a process-wide `OnceLock` and reuse
/// across serverless invocations.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    /// Creates a client from an already-validated endpoint configuration.
    pub fn new(config: EndpointConfig) -> Self {
        GeminiClient {
            http: reqwest::Client::new(),
            api_key: config.api_key,
            model: config.model,
        }
    }

    /// Model identifier this client generates with.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends one prompt and returns the generated JSON text verbatim.
    pub async fn generate_json(&self, prompt: &str) -> Result<String, UpstreamError> {
        let url = Url::parse_with_params(
            &format!("{API_BASE}/models/{}:generateContent", self.model),
            [("key", self.api_key.as_str())],
        )?;

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
            },
        };

        let started = Instant::now();
        let response = self.http.post(url).json(&request).send().await?;
        let status = response.status();

        if status != StatusCode::OK {
            return Err(match response.json::<ErrorResponse>().await {
                Ok(body) => UpstreamError::Api {
                    code: body.error.code,
                    status: body.error.status,
                    message: body.error.message,
                },
                Err(err) => UpstreamError::Network(err),
            });
        }

        let body = response.json::<GenerateContentResponse>().await?;

        if let Some(reason) = body.prompt_feedback.and_then(|feedback| feedback.block_reason) {
            return Err(UpstreamError::Blocked { reason });
        }

        let candidate = body
            .candidates
            .into_iter()
            .next()
            .ok_or(UpstreamError::EmptyResponse)?;

        if candidate.finish_reason.as_deref() == Some("SAFETY") {
            return Err(UpstreamError::Blocked {
                reason: "SAFETY".to_owned(),
            });
        }

        let text = candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<String>()
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(UpstreamError::EmptyResponse);
        }

        log::info!(
            "Gemini call finished in {:.2}s, {} chars",
            started.elapsed().as_secs_f64(),
            text.chars().count()
        );

        Ok(text)
    }
}

#[async_trait]
impl QuizBackend for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, UpstreamError> {
        self.generate_json(prompt).await
    }
}
