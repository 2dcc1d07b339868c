//! Prompt construction for the quiz generator.
//!
//! The prompt is a fixed Japanese instruction template — question counts,
//! category-balance rules, difficulty hints, one worked example — with the
//! user's theme and a serialized schema description interpolated in. Pure
//! string work, no I/O; the same theme always yields the same prompt.

use serde_json::{json, Value};

/// JSON schema description embedded in every prompt.
///
/// The model is asked to follow this schema strictly; the field names here
/// (including `Explaination`) must stay in sync with
/// [`crate::models::quiz::QuizPayload`].
pub fn question_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "Leading Sentence": {
                "type": "string",
                "description": "問題の導入となるリード文。具体的な歴史的事象や文脈を含むこと。"
            },
            "Questions": {
                "type": "array",
                "items": { "type": "string" },
                "description": "リード文に関連する設問のリスト。最低2つ以上。"
            },
            "Answers": {
                "type": "array",
                "items": { "type": "string" },
                "description": "各設問に対応する解答のリスト。Questionsと同じ順序・数であること。"
            },
            "different_answers": {
                "type": "array",
                "items": { "type": "string" },
                "description": "解答の別解や許容される表現のリスト（任意）。各要素は「問X: [別解]」のように記述する。"
            },
            "Explaination": {
                "type": "string",
                "description": "問題全体の背景や、各設問・解答に関する詳細な解説。改行を含めて記述する。"
            },
            "Theme": {
                "type": "string",
                "description": "問題が扱う主要なテーマ、時代、地域など。"
            }
        },
        "required": ["Leading Sentence", "Questions", "Answers", "Explaination", "Theme"]
    })
}

/// Builds the generation prompt for a user-supplied theme.
///
/// The caller is responsible for rejecting empty themes before this point;
/// interpolation itself performs no validation.
pub fn build_prompt(theme: &str) -> String {
    format!(
        "あなたは東京大学の世界史入試問題を作成する専門家です。\n\
         以下の指示とJSONスキーマに従って、指定されたテーマに関する一問一答形式の問題を作成してください。\n\
         \n\
         指示:\n\
         - 形式: 示唆に富むリード文300字（Leading Sentence）があり、それに関連して、100字程度の文章で必ず一つの答えに特定された単語のみを答えさせる問題を10問（Questions）とその解答（Answers）を作成してください。それぞれの問題は、多少リード文から飛躍しても、時代・地域のバランスが妥当になるようにしてください。\n\
         - テーマ: {theme}\n\
         - 問題の例:19世紀末、アメリカとの戦争（米西戦争）の結果、フィリピンの独立を宣言したが、その後アメリカの支配に抵抗してフィリピン＝アメリカ戦争を戦った革命の指導者は誰か。 回答:アギナルド\n\
         - 特徴:中国史、遊牧民族史をあわせて2題以上、文化史を1題以上含めてください。\n\
         - 注意:①難易度は東大入試レベルで、やや難しい問題を1問程度入れてください　②3問程度、へんなリード文、その人物のマイナーなエピソード、変わった語り口 (モンケのことを、ルブルックとあったモンゴルの王として聞くなど)を試みてください\n\
         - 解答: 各設問に対する解答は簡潔かつ正確に記述してください。\n\
         - 解説: 問題全体の背景、リード文の意図、各設問のポイント、解答の根拠などを簡潔に記述してください。改行も適宜使用してください。\n\
         - 別解: 表記ゆれがある場合はdifferent_answersに含めてください。(フランクリン・ルーズベルトとフランクリン・ローズヴェルト、ウェストファリア条約とウェストヴァーレン条約など)\n\
         - JSONスキーマ: 以下のスキーマに厳密に従ってJSON形式で出力してください。必須項目は必ず含めてください。\n\
         \n\
         JSONスキーマ:\n\
         {schema}",
        theme = theme,
        schema = question_schema()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_the_theme() {
        let prompt = build_prompt("モンゴル帝国");
        assert!(prompt.contains("テーマ: モンゴル帝国"));
    }

    #[test]
    fn test_prompt_embeds_the_schema() {
        let prompt = build_prompt("宗教改革");
        for field in ["Leading Sentence", "Questions", "Answers", "Explaination", "Theme"] {
            assert!(prompt.contains(field), "schema field {field} missing from prompt");
        }
    }

    #[test]
    fn test_prompt_is_deterministic() {
        assert_eq!(build_prompt("冷戦"), build_prompt("冷戦"));
    }

    #[test]
    fn test_schema_requires_the_five_core_fields() {
        let schema = question_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert_eq!(
            required,
            ["Leading Sentence", "Questions", "Answers", "Explaination", "Theme"]
        );
        // different_answers is intentionally optional
        assert!(!required.contains(&"different_answers"));
    }
}
