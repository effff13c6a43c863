use crate::dom::{AnswerOption, QuestionSnapshot};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

/// An approved extraction, handed to the reporter and the analyzer
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionEvent {
    pub question: String,
    pub answers: Vec<AnswerOption>,

    /// Question plus formatted answer options, as sent to the analyzer
    pub combined_text: String,

    /// RFC 3339 UTC timestamp with millisecond precision
    pub timestamp: String,
}

impl ExtractionEvent {
    /// Build an event from a snapshot, stamped with the current time
    pub fn new(snapshot: QuestionSnapshot) -> Self {
        let combined_text = combine_question_text(&snapshot);
        Self {
            question: snapshot.question_text,
            answers: snapshot.answers,
            combined_text,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Format a question and its options as one block of text
pub fn combine_question_text(snapshot: &QuestionSnapshot) -> String {
    let mut combined = format!("Question: {}\n\nAnswer options:\n", snapshot.question_text);
    for answer in &snapshot.answers {
        combined.push_str(&format!("{}. {}\n", answer.letter, answer.text));
    }
    combined
}
