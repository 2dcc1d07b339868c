use std::sync::OnceLock;

use vercel_runtime::{run, Body, Error, Request, Response};

use quizgen_api::config::{ConfigError, EndpointConfig};
use quizgen_api::error::ApiError;
use quizgen_api::gemini::GeminiClient;
use quizgen_api::handler::{handle_generate, EndpointResponse};

/// Client initialized once per process and reused across invocations.
/// A configuration failure is kept as a typed result and answered on
/// every request instead of being retried.
static BACKEND: OnceLock<Result<GeminiClient, ConfigError>> = OnceLock::new();

fn backend() -> &'static Result<GeminiClient, ConfigError> {
    BACKEND.get_or_init(|| EndpointConfig::from_env().map(GeminiClient::new))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    pretty_env_logger::try_init().ok();
    run(handler).await
}

/// POST /api/generate-question — Forward a quiz prompt to Gemini and
/// relay the generated JSON verbatim.
pub async fn handler(req: Request) -> Result<Response<Body>, Error> {
    let response = match backend() {
        Ok(client) => {
            let body: &[u8] = match req.body() {
                Body::Empty => &[],
                Body::Text(text) => text.as_bytes(),
                Body::Binary(bytes) => bytes,
            };
            handle_generate(req.method(), body, client).await
        }
        Err(err) => {
            log::error!("endpoint misconfigured: {err}");
            EndpointResponse::from_error(&ApiError::Config(err.clone()))
        }
    };

    response.into_response()
}
