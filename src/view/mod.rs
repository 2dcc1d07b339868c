//! Submission lifecycle and quiz rendering.
//!
//! This is the client-side logic of the application, kept headless so the
//! CLI (or any other front end) can drive it: a small state machine for
//! one in-flight submission, payload validation, and a plain-text
//! renderer with the answer-reveal toggle.

use std::fmt::Write;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::models::quiz::QuizPayload;
use crate::prompt::build_prompt;

const MSG_INVALID_FORMAT: &str = "生成されたデータの形式が無効です。";
const MSG_MISSING_FIELDS: &str = "生成されたデータに必要な項目が不足しています。";

/// Rejections raised before any request leaves the client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// The theme was empty or whitespace-only.
    #[error("テーマを入力してください。")]
    EmptyTheme,
    /// A previous submission has not finished yet.
    #[error("リクエストの処理中です。完了までお待ちください。")]
    InFlight,
}

/// Lifecycle of one submission.
///
/// `Idle -> Submitting -> {Success, Failed}`; the next `begin` replaces a
/// finished state with a fresh `Submitting`.
#[derive(Debug, Clone, Default)]
pub enum SubmissionState {
    /// Nothing requested yet (or previous result cleared).
    #[default]
    Idle,
    /// A request is outstanding; re-entry is rejected.
    Submitting,
    /// A complete payload arrived and is ready to display.
    Success(QuizView),
    /// The request failed; carries the user-facing message.
    Failed(String),
}

/// Drives the submission lifecycle for one user session.
#[derive(Debug, Clone, Default)]
pub struct QuizSession {
    state: SubmissionState,
}

impl QuizSession {
    pub fn new() -> Self {
        QuizSession {
            state: SubmissionState::Idle,
        }
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut SubmissionState {
        &mut self.state
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.state, SubmissionState::Submitting)
    }

    /// Starts a submission: validates the theme, clears any previous
    /// result, and returns the prompt to send.
    pub fn begin(&mut self, theme: &str) -> Result<String, SubmitError> {
        if self.is_submitting() {
            return Err(SubmitError::InFlight);
        }
        if theme.trim().is_empty() {
            return Err(SubmitError::EmptyTheme);
        }
        self.state = SubmissionState::Submitting;
        Ok(build_prompt(theme))
    }

    /// Finishes the submission with the endpoint's success body.
    ///
    /// A payload missing required content fails the submission; a
    /// question/answer count mismatch only logs a warning.
    pub fn complete(&mut self, body: &str) {
        self.state = match parse_payload(body) {
            Ok(payload) => SubmissionState::Success(QuizView::new(payload)),
            Err(message) => SubmissionState::Failed(message.to_owned()),
        };
    }

    /// Finishes the submission with a transport or endpoint error.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.state = SubmissionState::Failed(message.into());
    }
}

fn parse_payload(body: &str) -> Result<QuizPayload, &'static str> {
    let value: Value = serde_json::from_str(body).map_err(|_| MSG_INVALID_FORMAT)?;
    let payload = QuizPayload::deserialize(value).map_err(|_| MSG_MISSING_FIELDS)?;
    if !payload.is_complete() {
        return Err(MSG_MISSING_FIELDS);
    }
    Ok(payload)
}

/// A displayable quiz plus the answer-reveal toggle.
#[derive(Debug, Clone)]
pub struct QuizView {
    payload: QuizPayload,
    show_answers: bool,
}

impl QuizView {
    /// Wraps a payload for display. Answers start hidden.
    pub fn new(payload: QuizPayload) -> Self {
        if !payload.counts_match() {
            log::warn!(
                "question/answer count mismatch: {} questions, {} answers",
                payload.questions.len(),
                payload.answers.len()
            );
        }
        QuizView {
            payload,
            show_answers: false,
        }
    }

    pub fn payload(&self) -> &QuizPayload {
        &self.payload
    }

    pub fn answers_visible(&self) -> bool {
        self.show_answers
    }

    pub fn toggle_answers(&mut self) {
        self.show_answers = !self.show_answers;
    }

    /// Renders the quiz section by section, omitting empty sections.
    ///
    /// Alternate answers appear only while answers are revealed and the
    /// list is non-empty.
    pub fn render(&self) -> String {
        let quiz = &self.payload;
        let mut out = String::new();

        if !quiz.theme.is_empty() {
            let _ = writeln!(out, "【テーマ】\n{}\n", quiz.theme);
        }

        if !quiz.leading_sentence.is_empty() {
            let _ = writeln!(out, "【リード文】\n{}\n", quiz.leading_sentence);
        }

        if !quiz.questions.is_empty() {
            let _ = writeln!(out, "【設問】");
            for (index, question) in quiz.questions.iter().enumerate() {
                let _ = writeln!(out, "{}. {}", index + 1, question);
            }
            let _ = writeln!(out);
        }

        if !quiz.answers.is_empty() {
            let _ = writeln!(out, "【解答】");
            if self.show_answers {
                for (index, answer) in quiz.answers.iter().enumerate() {
                    let _ = writeln!(out, "{}. {}", index + 1, answer);
                }
                if !quiz.different_answers.is_empty() {
                    let _ = writeln!(out, "\n【別解・許容解答】");
                    for alternate in &quiz.different_answers {
                        let _ = writeln!(out, "- {alternate}");
                    }
                }
            } else {
                let _ = writeln!(out, "(解答は非表示です)");
            }
            let _ = writeln!(out);
        }

        if !quiz.explanation.is_empty() {
            let _ = writeln!(out, "【解説】\n{}", quiz.explanation);
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiz_body() -> String {
        serde_json::json!({
            "Leading Sentence": "19世紀末のアジアは列強の角逐の場となった。",
            "Questions": ["米西戦争後にフィリピン独立を宣言した指導者は誰か。", "戊戌の変法を主導した人物は誰か。"],
            "Answers": ["アギナルド", "康有為"],
            "different_answers": ["問2: 康有爲"],
            "Explaination": "帝国主義期のアジア民族運動を扱う。",
            "Theme": "帝国主義とアジア"
        })
        .to_string()
    }

    #[test]
    fn test_new_session_is_idle() {
        let session = QuizSession::new();
        assert!(matches!(session.state(), SubmissionState::Idle));
    }

    #[test]
    fn test_empty_theme_is_rejected_before_submitting() {
        let mut session = QuizSession::new();
        assert_eq!(session.begin("   "), Err(SubmitError::EmptyTheme));
        assert!(
            matches!(session.state(), SubmissionState::Idle),
            "rejected submission must not leave Idle"
        );
    }

    #[test]
    fn test_begin_builds_the_prompt_and_enters_submitting() {
        let mut session = QuizSession::new();
        let prompt = session.begin("産業革命").unwrap();
        assert!(prompt.contains("産業革命"));
        assert!(session.is_submitting());
    }

    #[test]
    fn test_reentry_while_submitting_is_rejected() {
        let mut session = QuizSession::new();
        session.begin("産業革命").unwrap();
        assert_eq!(session.begin("冷戦"), Err(SubmitError::InFlight));
    }

    #[test]
    fn test_complete_with_valid_payload_succeeds() {
        let mut session = QuizSession::new();
        session.begin("帝国主義").unwrap();
        session.complete(&quiz_body());
        match session.state() {
            SubmissionState::Success(view) => {
                assert_eq!(view.payload().theme, "帝国主義とアジア");
                assert_eq!(view.payload().answers, ["アギナルド", "康有為"]);
            }
            other => panic!("expected Success, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_required_field_fails_the_submission() {
        let mut session = QuizSession::new();
        session.begin("帝国主義").unwrap();
        session.complete(r#"{"Questions":["Q"],"Answers":["A"]}"#);
        match session.state() {
            SubmissionState::Failed(message) => {
                assert_eq!(message, "生成されたデータに必要な項目が不足しています。");
            }
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[test]
    fn test_non_json_body_fails_the_submission() {
        let mut session = QuizSession::new();
        session.begin("帝国主義").unwrap();
        session.complete("oops, not json");
        assert!(matches!(session.state(), SubmissionState::Failed(_)));
    }

    #[test]
    fn test_session_accepts_a_new_submission_after_failure() {
        let mut session = QuizSession::new();
        session.begin("帝国主義").unwrap();
        session.fail("ネットワークエラー");
        assert!(session.begin("ルネサンス").is_ok());
        assert!(session.is_submitting());
    }

    #[test]
    fn test_count_mismatch_still_displays() {
        let body = serde_json::json!({
            "Leading Sentence": "リード文",
            "Questions": ["Q1", "Q2", "Q3"],
            "Answers": ["A1", "A2"],
            "Explaination": "解説",
            "Theme": "テーマ"
        })
        .to_string();
        let mut session = QuizSession::new();
        session.begin("テーマ").unwrap();
        session.complete(&body);
        match session.state() {
            SubmissionState::Success(view) => {
                assert!(!view.payload().counts_match());
                let rendered = view.render();
                assert!(rendered.contains("Q3"));
            }
            other => panic!("expected Success despite mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_answers_hidden_by_default() {
        let payload: QuizPayload = serde_json::from_str(&quiz_body()).unwrap();
        let view = QuizView::new(payload);
        let rendered = view.render();
        assert!(rendered.contains("(解答は非表示です)"));
        assert!(!rendered.contains("アギナルド"));
        assert!(!rendered.contains("別解"));
    }

    #[test]
    fn test_toggle_reveals_answers_and_alternates() {
        let payload: QuizPayload = serde_json::from_str(&quiz_body()).unwrap();
        let mut view = QuizView::new(payload);
        view.toggle_answers();
        let rendered = view.render();
        assert!(view.answers_visible());
        assert!(rendered.contains("1. アギナルド"));
        assert!(rendered.contains("【別解・許容解答】"));
        assert!(rendered.contains("問2: 康有爲"));
    }

    #[test]
    fn test_no_alternates_section_when_list_is_empty() {
        let mut payload: QuizPayload = serde_json::from_str(&quiz_body()).unwrap();
        payload.different_answers.clear();
        let mut view = QuizView::new(payload);
        view.toggle_answers();
        assert!(!view.render().contains("別解"));
    }

    #[test]
    fn test_empty_sections_are_omitted() {
        let mut payload: QuizPayload = serde_json::from_str(&quiz_body()).unwrap();
        payload.questions.clear();
        payload.answers.clear();
        let view = QuizView::new(payload);
        let rendered = view.render();
        assert!(!rendered.contains("【設問】"));
        assert!(!rendered.contains("【解答】"));
        assert!(rendered.contains("【テーマ】"));
        assert!(rendered.contains("【解説】"));
    }
}
