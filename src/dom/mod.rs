//! Quiz DOM inspection
//!
//! This module reads the currently displayed question from the quiz page:
//! - QuestionSnapshot / AnswerOption: point-in-time view of the question
//! - QuizDom: the inspection seam used by the extractor
//! - TabQuizDom: QuizDom backed by a live headless_chrome tab

pub mod question;

pub use question::{AnswerOption, QuestionSnapshot, RenderedQuestion};

use crate::error::{ExtractorError, Result};
use headless_chrome::Tab;
use std::sync::Arc;

/// Selector of the element holding the question text
pub const QUESTION_TEXT_SELECTOR: &str = r#"[wa-id="questionDetails__Text"]"#;

/// Reads the rendered question from a page
pub trait QuizDom: Send + Sync {
    /// Snapshot the question and check the answer options for correctness markers.
    ///
    /// Missing elements yield an empty snapshot, not an error.
    fn read_question(&self) -> Result<RenderedQuestion>;
}

/// [`QuizDom`] over a browser tab
#[derive(Clone)]
pub struct TabQuizDom {
    tab: Arc<Tab>,
}

impl TabQuizDom {
    pub fn new(tab: Arc<Tab>) -> Self {
        Self { tab }
    }
}

impl QuizDom for TabQuizDom {
    fn read_question(&self) -> Result<RenderedQuestion> {
        let js_code = include_str!("extract_question.js");

        let result = self
            .tab
            .evaluate(js_code, false)
            .map_err(|e| ExtractorError::EvaluationFailed(format!("Failed to execute question extraction script: {}", e)))?;

        let json_value = result
            .value
            .ok_or_else(|| ExtractorError::DomParseFailed("No value returned from question extraction".to_string()))?;

        // The script returns a JSON string
        let json_str: String = serde_json::from_value(json_value)
            .map_err(|e| ExtractorError::DomParseFailed(format!("Failed to get JSON string: {}", e)))?;

        RenderedQuestion::from_json(&json_str)
    }
}
