use crate::error::{ExtractorError, Result};
use serde::{Deserialize, Serialize};

/// One answer option in display order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnswerOption {
    /// Option letter as displayed (e.g. "A")
    pub letter: String,

    /// Option text
    pub text: String,

    /// Platform answer id from the option's input, if any
    #[serde(default)]
    pub id: Option<String>,

    /// Position among all answer buttons on the page
    pub index: usize,
}

impl AnswerOption {
    pub fn new(letter: impl Into<String>, text: impl Into<String>, index: usize) -> Self {
        Self { letter: letter.into(), text: text.into(), id: None, index }
    }

    /// Builder method: set the platform answer id
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// Point-in-time read of the displayed question
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QuestionSnapshot {
    pub question_text: String,
    pub answers: Vec<AnswerOption>,
}

impl QuestionSnapshot {
    pub fn new(question_text: impl Into<String>, answers: Vec<AnswerOption>) -> Self {
        Self { question_text: question_text.into(), answers }
    }

    pub fn is_empty(&self) -> bool {
        self.question_text.is_empty()
    }
}

/// What the page shows right now: the question plus whether it is a review screen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedQuestion {
    pub snapshot: QuestionSnapshot,

    /// Any answer option carries a correct/incorrect marker
    pub review_markers_present: bool,
}

/// Answer button as reported by the extraction script, before validation
#[derive(Debug, Deserialize)]
struct RawAnswer {
    letter: Option<String>,
    text: Option<String>,
    id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawQuestion {
    #[serde(default)]
    question_text: String,
    #[serde(default)]
    answers: Vec<RawAnswer>,
    #[serde(default)]
    review_markers_present: bool,
}

impl RenderedQuestion {
    pub fn new(snapshot: QuestionSnapshot, review_markers_present: bool) -> Self {
        Self { snapshot, review_markers_present }
    }

    /// Parse the JSON produced by `extract_question.js`.
    ///
    /// Buttons lacking a letter or a text span are dropped; the survivors keep
    /// their original button position as `index`.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawQuestion = serde_json::from_str(json)
            .map_err(|e| ExtractorError::DomParseFailed(format!("Failed to parse question JSON: {}", e)))?;

        let answers = raw
            .answers
            .into_iter()
            .enumerate()
            .filter_map(|(index, answer)| match (answer.letter, answer.text) {
                (Some(letter), Some(text)) => Some(AnswerOption { letter, text, id: answer.id, index }),
                _ => None,
            })
            .collect();

        Ok(Self {
            snapshot: QuestionSnapshot { question_text: raw.question_text, answers },
            review_markers_present: raw.review_markers_present,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_full_question() {
        let json = r#"{
            "questionText": "Which material is renewable?",
            "answers": [
                {"letter": "A", "text": "Bamboo", "id": "a-17"},
                {"letter": "B", "text": "Coal", "id": null}
            ],
            "reviewMarkersPresent": false
        }"#;

        let rendered = RenderedQuestion::from_json(json).unwrap();

        assert_eq!(rendered.snapshot.question_text, "Which material is renewable?");
        assert_eq!(
            rendered.snapshot.answers,
            vec![AnswerOption::new("A", "Bamboo", 0).with_id("a-17"), AnswerOption::new("B", "Coal", 1)]
        );
        assert!(!rendered.review_markers_present);
    }

    #[test]
    fn test_from_json_drops_incomplete_buttons_and_keeps_index() {
        let json = r#"{
            "questionText": "Q",
            "answers": [
                {"letter": null, "text": "orphan text", "id": null},
                {"letter": "B", "text": "", "id": null},
                {"letter": "C", "text": null, "id": "c"},
                {"letter": "D", "text": "Last", "id": "d"}
            ],
            "reviewMarkersPresent": true
        }"#;

        let rendered = RenderedQuestion::from_json(json).unwrap();
        let answers = &rendered.snapshot.answers;

        assert_eq!(answers.len(), 2);
        assert_eq!(answers[0], AnswerOption::new("B", "", 1));
        assert_eq!(answers[1], AnswerOption::new("D", "Last", 3).with_id("d"));
        assert!(rendered.review_markers_present);
    }

    #[test]
    fn test_from_json_missing_page_is_empty() {
        let rendered = RenderedQuestion::from_json(r#"{"questionText": "", "answers": []}"#).unwrap();

        assert!(rendered.snapshot.is_empty());
        assert!(rendered.snapshot.answers.is_empty());
        assert!(!rendered.review_markers_present);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        let err = RenderedQuestion::from_json("not json").unwrap_err();
        assert!(matches!(err, ExtractorError::DomParseFailed(_)));
    }

    #[test]
    fn test_snapshot_serialization() {
        let snapshot = QuestionSnapshot::new("Q", vec![AnswerOption::new("A", "Yes", 0)]);
        let json = serde_json::to_value(&snapshot).unwrap();

        assert_eq!(json["questionText"], "Q");
        assert_eq!(json["answers"][0]["letter"], "A");
        assert_eq!(json["answers"][0]["index"], 0);
        assert!(json["answers"][0]["id"].is_null());
    }
}
