//! Wire shape of generated lesson content and the helpers shared by every
//! provider: the prompt, fence stripping, parsing and the fallback payload.

use log::warn;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::core::content::{Flashcard, Question, QuestionKind, TopicContent};

use super::provider::ProviderError;

/// Summary shown when generation failed for any reason.
pub const FALLBACK_SUMMARY: &str = "İçerik oluşturulurken bir hata oluştu. Lütfen tekrar deneyin.";

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct GeneratedFlashcard {
    #[serde(default)]
    pub id: String,
    /// Question or term
    pub front: String,
    /// Answer or definition
    pub back: String,
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedQuestion {
    #[serde(default)]
    pub id: String,
    pub text: String,
    pub options: Vec<String>,
    /// Zero-based index into `options`
    pub correct_index: usize,
    #[serde(rename = "type", default)]
    pub kind: GeneratedQuestionKind,
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GeneratedQuestionKind {
    #[default]
    MultipleChoice,
    FillBlank,
}

/// Structured payload returned by a content generator.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, Default, PartialEq)]
pub struct GeneratedContent {
    /// A concise two-sentence summary of the topic
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub flashcards: Vec<GeneratedFlashcard>,
    #[serde(default)]
    pub questions: Vec<GeneratedQuestion>,
}

impl GeneratedContent {
    /// Degraded payload: explanatory summary, nothing to study.
    pub fn fallback() -> Self {
        Self {
            summary: FALLBACK_SUMMARY.to_string(),
            flashcards: Vec::new(),
            questions: Vec::new(),
        }
    }

    /// JSON schema handed to providers that support structured output.
    pub fn json_schema() -> serde_json::Value {
        let schema = schemars::schema_for!(GeneratedContent);
        serde_json::to_value(schema).unwrap_or_else(|_| serde_json::json!({ "type": "object" }))
    }

    /// Converts into lesson content, filling missing ids and dropping
    /// questions whose answer index does not point at an option.
    pub fn into_topic_content(self) -> TopicContent {
        let flashcards = self
            .flashcards
            .into_iter()
            .enumerate()
            .map(|(i, card)| Flashcard {
                id: if card.id.is_empty() { format!("gen_{}", i + 1) } else { card.id },
                front: card.front,
                back: card.back,
            })
            .collect();

        let questions = self
            .questions
            .into_iter()
            .enumerate()
            .filter_map(|(i, q)| {
                let question = Question {
                    id: if q.id.is_empty() { format!("gen_q{}", i + 1) } else { q.id },
                    text: q.text,
                    options: q.options,
                    correct_index: q.correct_index,
                    kind: match q.kind {
                        GeneratedQuestionKind::MultipleChoice => QuestionKind::MultipleChoice,
                        GeneratedQuestionKind::FillBlank => QuestionKind::FillBlank,
                    },
                };
                if question.is_well_formed() {
                    Some(question)
                } else {
                    warn!(
                        "Dropping generated question {}: correct index {} with {} options",
                        question.id,
                        question.correct_index,
                        question.options.len()
                    );
                    None
                }
            })
            .collect();

        TopicContent {
            summary: self.summary,
            flashcards,
            questions,
            ..Default::default()
        }
    }
}

/// Strips Markdown code fences the model sometimes wraps JSON in.
pub fn clean_json(text: &str) -> &str {
    let trimmed = text.trim();
    let trimmed = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    trimmed.strip_suffix("```").unwrap_or(trimmed).trim()
}

/// Parses a provider's text output into generated content.
pub fn parse_generated(text: &str) -> Result<GeneratedContent, ProviderError> {
    let cleaned = clean_json(text);
    if cleaned.is_empty() {
        return Err(ProviderError::Parse("empty response".to_string()));
    }
    serde_json::from_str(cleaned).map_err(|e| ProviderError::Parse(e.to_string()))
}

/// Instruction sent to the model for `topic_title`.
pub fn topic_prompt(topic_title: &str) -> String {
    format!(
        r#"You are an expert Turkish history and geography teacher for exam preparation (KPSS/TYT/AYT).
Create content for the topic: "{topic_title}".

Return a JSON object with the following structure:
{{
    "summary": "A concise 2-sentence summary of the topic.",
    "flashcards": [
        {{ "id": "gen_1", "front": "Question/Term", "back": "Answer/Definition" }}
    ],
    "questions": [
        {{
            "id": "gen_q1",
            "text": "Multiple choice question text?",
            "options": ["Option A", "Option B", "Option C", "Option D"],
            "correctIndex": 0,
            "type": "MULTIPLE_CHOICE"
        }}
    ]
}}
Generate 3 flashcards and 2 questions. Keep the language Turkish."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_json_strips_fences() {
        assert_eq!(clean_json("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(clean_json("```\n{}\n```  "), "{}");
        assert_eq!(clean_json("  {\"summary\":\"x\"} "), "{\"summary\":\"x\"}");
    }

    #[test]
    fn test_parse_generated_accepts_camel_case_questions() {
        let text = r#"```json
{
  "summary": "Lale Devri barış dönemidir.",
  "flashcards": [{"id": "gen_1", "front": "Padişah?", "back": "III. Ahmet"}],
  "questions": [{"id": "gen_q1", "text": "Sadrazam?", "options": ["Nevşehirli", "Kuyucu"], "correctIndex": 0, "type": "MULTIPLE_CHOICE"}]
}
```"#;
        let content = parse_generated(text).unwrap();
        assert_eq!(content.flashcards.len(), 1);
        assert_eq!(content.questions[0].correct_index, 0);
    }

    #[test]
    fn test_parse_generated_rejects_garbage() {
        assert!(matches!(parse_generated("not json"), Err(ProviderError::Parse(_))));
        assert!(matches!(parse_generated("```json\n```"), Err(ProviderError::Parse(_))));
    }

    #[test]
    fn test_into_topic_content_drops_malformed_questions_and_fills_ids() {
        let generated = GeneratedContent {
            summary: "s".into(),
            flashcards: vec![GeneratedFlashcard {
                id: String::new(),
                front: "f".into(),
                back: "b".into(),
            }],
            questions: vec![
                GeneratedQuestion {
                    id: String::new(),
                    text: "ok?".into(),
                    options: vec!["a".into(), "b".into()],
                    correct_index: 1,
                    kind: GeneratedQuestionKind::MultipleChoice,
                },
                GeneratedQuestion {
                    id: "bad".into(),
                    text: "out of range?".into(),
                    options: vec!["a".into()],
                    correct_index: 3,
                    kind: GeneratedQuestionKind::MultipleChoice,
                },
                GeneratedQuestion {
                    id: "empty".into(),
                    text: "no options?".into(),
                    options: vec![],
                    correct_index: 0,
                    kind: GeneratedQuestionKind::MultipleChoice,
                },
            ],
        };
        let content = generated.into_topic_content();
        assert_eq!(content.flashcards[0].id, "gen_1");
        assert_eq!(content.questions.len(), 1);
        assert_eq!(content.questions[0].id, "gen_q1");
        assert!(content.video_url.is_none());
    }

    #[test]
    fn test_fallback_has_summary_and_no_items() {
        let fallback = GeneratedContent::fallback();
        assert!(!fallback.summary.is_empty());
        assert!(fallback.flashcards.is_empty());
        assert!(fallback.questions.is_empty());
    }

    #[test]
    fn test_schema_names_every_field() {
        let schema = GeneratedContent::json_schema().to_string();
        for field in ["summary", "flashcards", "questions", "correctIndex"] {
            assert!(schema.contains(field), "schema missing {field}");
        }
    }

    #[test]
    fn test_prompt_mentions_title() {
        assert!(topic_prompt("Kavimler Göçü").contains("\"Kavimler Göçü\""));
    }
}
