use serde::{Deserialize, Serialize};

/// One generated quiz, as produced by the upstream model.
///
/// JSON field names follow the generation schema verbatim, including the
/// space in `"Leading Sentence"` and the `"Explaination"` spelling the
/// model was taught.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizPayload {
    /// Introductory lead paragraph the questions hang off of.
    #[serde(rename = "Leading Sentence")]
    pub leading_sentence: String,
    /// Short-answer questions, in presentation order.
    #[serde(rename = "Questions")]
    pub questions: Vec<String>,
    /// One answer per question, same order as `questions`.
    #[serde(rename = "Answers")]
    pub answers: Vec<String>,
    /// Accepted alternate spellings/answers ("問X: ..." entries). Optional.
    #[serde(default, rename = "different_answers")]
    pub different_answers: Vec<String>,
    /// Commentary on the background and each answer.
    #[serde(rename = "Explaination")]
    pub explanation: String,
    /// The theme, era, or region the quiz covers.
    #[serde(rename = "Theme")]
    pub theme: String,
}

impl QuizPayload {
    /// Returns true if every required field carries content.
    ///
    /// String fields must be non-empty; the question/answer lists only have
    /// to be present (an empty list is tolerated here and caught by the
    /// count check at render time).
    pub fn is_complete(&self) -> bool {
        !self.leading_sentence.is_empty() && !self.explanation.is_empty() && !self.theme.is_empty()
    }

    /// Returns true if each question has exactly one answer.
    ///
    /// The upstream model is instructed to keep the lists aligned but does
    /// not always comply; a mismatch is a warning, not an error.
    pub fn counts_match(&self) -> bool {
        self.questions.len() == self.answers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> QuizPayload {
        QuizPayload {
            leading_sentence: "19世紀末、列強のアジア進出は新たな段階を迎えた。".to_owned(),
            questions: vec![
                "米西戦争後にフィリピン独立を宣言した革命指導者は誰か。".to_owned(),
                "義和団事件後に清が列強と結んだ条約は何か。".to_owned(),
            ],
            answers: vec!["アギナルド".to_owned(), "北京議定書".to_owned()],
            different_answers: vec!["問2: 辛丑条約".to_owned()],
            explanation: "帝国主義期のアジアにおける民族運動と列強の対応を問う。".to_owned(),
            theme: "帝国主義とアジア".to_owned(),
        }
    }

    #[test]
    fn test_round_trip_preserves_all_fields() {
        let payload = sample();
        let json = serde_json::to_string(&payload).unwrap();
        let back: QuizPayload = serde_json::from_str(&json).unwrap();
        assert_eq!(back.leading_sentence, payload.leading_sentence);
        assert_eq!(back.questions, payload.questions);
        assert_eq!(back.answers, payload.answers);
        assert_eq!(back.different_answers, payload.different_answers);
        assert_eq!(back.explanation, payload.explanation);
        assert_eq!(back.theme, payload.theme);
    }

    #[test]
    fn test_deserializes_upstream_field_names() {
        let json = r#"{
            "Leading Sentence": "リード文",
            "Questions": ["設問1"],
            "Answers": ["解答1"],
            "Explaination": "解説",
            "Theme": "テーマ"
        }"#;
        let payload: QuizPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.leading_sentence, "リード文");
        assert_eq!(payload.theme, "テーマ");
        assert!(
            payload.different_answers.is_empty(),
            "missing different_answers must default to empty"
        );
    }

    #[test]
    fn test_missing_required_field_is_a_parse_error() {
        // No "Answers" key at all.
        let json = r#"{
            "Leading Sentence": "リード文",
            "Questions": ["設問1"],
            "Explaination": "解説",
            "Theme": "テーマ"
        }"#;
        assert!(serde_json::from_str::<QuizPayload>(json).is_err());
    }

    #[test]
    fn test_blank_leading_sentence_is_incomplete() {
        let mut payload = sample();
        payload.leading_sentence.clear();
        assert!(!payload.is_complete());
    }

    #[test]
    fn test_count_mismatch_is_detected_but_representable() {
        let mut payload = sample();
        payload.answers.pop();
        assert!(!payload.counts_match());
        assert!(payload.is_complete(), "mismatch alone must not invalidate the payload");
    }
}
