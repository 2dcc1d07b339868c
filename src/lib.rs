/// Quizgen API — Shared Library
///
/// This crate contains the endpoint core, the upstream Gemini client,
/// the prompt builder, the quiz data model, and the submission view
/// state shared across all API handlers.
///
/// Each serverless function in `api/` imports from this library
/// to keep handlers thin and logic reusable.
pub mod config;
pub mod error;
pub mod gemini;
pub mod handler;
pub mod models;
pub mod prompt;
pub mod view;

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
