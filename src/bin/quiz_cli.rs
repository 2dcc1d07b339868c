//! Terminal client for the quiz generation endpoint.
//!
//! Plays the role the browser page plays in production: builds the prompt
//! for a theme, POSTs it to the endpoint, and renders the structured
//! result. Useful against a local `vercel dev` server or a deployment.
//!
//! Usage: quiz-cli [--show-answers] <theme>...

use std::env;
use std::process::ExitCode;

use quizgen_api::models::api::{ErrorBody, GenerateRequest};
use quizgen_api::view::{QuizSession, SubmissionState};

const DEFAULT_ENDPOINT: &str = "http://localhost:3000/api/generate-question";

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    pretty_env_logger::init();

    let mut show_answers = false;
    let mut theme_words = Vec::new();
    for arg in env::args().skip(1) {
        if arg == "--show-answers" {
            show_answers = true;
        } else {
            theme_words.push(arg);
        }
    }
    let theme = theme_words.join(" ");

    let mut session = QuizSession::new();
    let prompt = match session.begin(&theme) {
        Ok(prompt) => prompt,
        Err(err) => {
            eprintln!("{err}");
            eprintln!("使い方: quiz-cli [--show-answers] <テーマ>...");
            return ExitCode::FAILURE;
        }
    };

    let endpoint = env::var("QUIZ_API_URL").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_owned());
    log::info!("requesting quiz from {endpoint}");

    let client = reqwest::Client::new();
    let result = client
        .post(&endpoint)
        .json(&GenerateRequest::new(prompt))
        .send()
        .await;

    match result {
        Ok(response) if response.status().is_success() => match response.text().await {
            Ok(body) => session.complete(&body),
            Err(err) => session.fail(format!("レスポンスの読み取りに失敗しました: {err}")),
        },
        Ok(response) => {
            let status = response.status();
            let message = match response.json::<ErrorBody>().await {
                Ok(body) => body.error,
                Err(_) => format!("サーバーエラーが発生しました ({status})"),
            };
            session.fail(message);
        }
        Err(err) => session.fail(format!("ネットワークエラー: {err}")),
    }

    match session.state_mut() {
        SubmissionState::Success(view) => {
            if show_answers {
                view.toggle_answers();
            }
            println!("{}", view.render());
            ExitCode::SUCCESS
        }
        SubmissionState::Failed(message) => {
            eprintln!("エラー: {message}");
            ExitCode::FAILURE
        }
        // complete()/fail() always leave Success or Failed
        _ => unreachable!("submission finished without a terminal state"),
    }
}
