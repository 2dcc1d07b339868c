//! Error taxonomy for the generation endpoint.
//!
//! Every failure is folded into [`ApiError`] at the endpoint boundary and
//! rendered as a uniform `{"error": "..."}` body with a localized message.
//! Upstream failures are first classified into an explicit [`UpstreamKind`]
//! — by the typed Gemini error code/status where available, by message
//! substrings only as a fallback for opaque errors — and the HTTP status
//! is chosen from the kind, never from the raw message alone.

use http::StatusCode;
use thiserror::Error;

use crate::config::ConfigError;

/// A failure reported by (or while reaching) the upstream generative service.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Transport-level failure: connection, TLS, body read, JSON decode.
    #[error("network error calling the generation API: {0}")]
    Network(#[from] reqwest::Error),

    /// Structured error returned by the Gemini API error envelope.
    #[error("Google error {code} {status}: {message}")]
    Api {
        code: u16,
        status: String,
        message: String,
    },

    /// The prompt or the candidate was blocked by the safety filter.
    #[error("generation blocked: {reason}")]
    Blocked { reason: String },

    /// The API answered 200 but carried no usable candidate text.
    #[error("generation API returned no usable candidates")]
    EmptyResponse,

    /// The endpoint URL could not be constructed.
    #[error("invalid generation endpoint URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Classified upstream failure, used to pick the HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamKind {
    /// Safety filter rejected the content. Resubmitting the same theme
    /// will not help.
    ContentPolicy,
    /// Quota or rate limit exhausted. Retryable after backoff.
    Quota,
    /// The credential was rejected upstream — a server configuration
    /// problem, not a caller problem.
    InvalidCredential,
    /// Anything else: network failures, empty responses, unclassified
    /// API errors.
    Unknown,
}

impl UpstreamError {
    /// Classifies this error into an [`UpstreamKind`].
    pub fn kind(&self) -> UpstreamKind {
        match self {
            UpstreamError::Blocked { .. } => UpstreamKind::ContentPolicy,
            UpstreamError::Api {
                code,
                status,
                message,
            } => {
                if *code == 429 || status == "RESOURCE_EXHAUSTED" || message.contains("quota") {
                    UpstreamKind::Quota
                } else if matches!(*code, 401 | 403)
                    || status == "UNAUTHENTICATED"
                    || status == "PERMISSION_DENIED"
                    || message.contains("API key")
                {
                    UpstreamKind::InvalidCredential
                } else if message.contains("SAFETY") {
                    UpstreamKind::ContentPolicy
                } else {
                    UpstreamKind::Unknown
                }
            }
            UpstreamError::Network(_)
            | UpstreamError::EmptyResponse
            | UpstreamError::InvalidUrl(_) => UpstreamKind::Unknown,
        }
    }

    /// Localized message shown to the end user for this failure.
    pub fn user_message(&self) -> String {
        match self.kind() {
            UpstreamKind::ContentPolicy => {
                "セーフティフィルターによりブロックされました。".to_owned()
            }
            UpstreamKind::Quota => {
                "API利用上限に達しました。しばらくしてから再試行してください。".to_owned()
            }
            UpstreamKind::InvalidCredential => {
                "サーバー設定エラー: APIキーが無効です。".to_owned()
            }
            UpstreamKind::Unknown => format!("サーバーエラー: {self}"),
        }
    }
}

/// Every failure the generation endpoint can answer with.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request used a method other than POST.
    #[error("POSTメソッドのみ許可されています")]
    MethodNotAllowed,

    /// Request carried no body at all.
    #[error("リクエストボディが空です。")]
    EmptyBody,

    /// Request body was not valid JSON.
    #[error("リクエスト形式が無効です。")]
    MalformedBody(#[from] serde_json::Error),

    /// Body parsed but `prompt` was missing, blank, or not a string.
    #[error("有効なプロンプトが必要です")]
    MissingPrompt,

    /// The endpoint itself is misconfigured; no upstream call was made.
    #[error("サーバー設定エラー: {0}")]
    Config(#[from] ConfigError),

    /// The upstream call failed or was rejected.
    #[error("{}", .0.user_message())]
    Upstream(#[from] UpstreamError),
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::EmptyBody | ApiError::MalformedBody(_) | ApiError::MissingPrompt => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Upstream(err) => match err.kind() {
                UpstreamKind::ContentPolicy => StatusCode::BAD_REQUEST,
                UpstreamKind::Quota => StatusCode::TOO_MANY_REQUESTS,
                UpstreamKind::InvalidCredential | UpstreamKind::Unknown => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }
}
