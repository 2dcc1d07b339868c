//! Endpoint configuration and credential access.
//!
//! The hosting platform differences (eager process-wide env on Vercel,
//! per-request secret bags elsewhere) are hidden behind [`SecretStore`],
//! so the handler core never touches `std::env` directly. Initialization
//! failure is a typed result checked once, not a sentinel re-checked on
//! every call.

use thiserror::Error;

/// Environment variable holding the Gemini API credential.
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Optional environment variable overriding the generation model.
pub const MODEL_VAR: &str = "GEMINI_MODEL";

/// Model used when no override is configured.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash-latest";

/// Access to the hosting platform's secret/environment store.
pub trait SecretStore {
    /// Returns the secret under `name`, or `None` if it is unset or empty.
    fn secret(&self, name: &str) -> Option<String>;
}

/// Secret store backed by process environment variables.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSecrets;

impl SecretStore for EnvSecrets {
    fn secret(&self, name: &str) -> Option<String> {
        std::env::var(name).ok().filter(|value| !value.is_empty())
    }
}

/// Configuration error — always fatal for the request, never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The upstream credential is not present in the secret store.
    #[error("APIキーが見つかりません。環境変数 {0} を確認してください。")]
    MissingApiKey(&'static str),
}

/// Immutable configuration for the generation endpoint.
#[derive(Debug, Clone)]
pub struct EndpointConfig {
    /// Upstream API credential.
    pub api_key: String,
    /// Generation model identifier.
    pub model: String,
}

impl EndpointConfig {
    /// Builds the configuration from a secret store.
    ///
    /// The API key is required; the model falls back to [`DEFAULT_MODEL`].
    pub fn from_secrets(store: &dyn SecretStore) -> Result<EndpointConfig, ConfigError> {
        let api_key = store
            .secret(API_KEY_VAR)
            .ok_or(ConfigError::MissingApiKey(API_KEY_VAR))?;
        let model = store
            .secret(MODEL_VAR)
            .unwrap_or_else(|| DEFAULT_MODEL.to_owned());
        Ok(EndpointConfig { api_key, model })
    }

    /// Builds the configuration from the process environment.
    pub fn from_env() -> Result<EndpointConfig, ConfigError> {
        Self::from_secrets(&EnvSecrets)
    }
}
