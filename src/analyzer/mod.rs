//! Remote answer lookup
//!
//! [`Analyzer`] is the seam between the extractor and the language model;
//! [`GeminiAnalyzer`] is the production implementation.

pub mod config;
pub mod gemini;

pub use config::AnalyzerConfig;
pub use gemini::GeminiAnalyzer;

use crate::error::Result;
use async_trait::async_trait;

/// Looks up a suggested answer for a formatted question
#[async_trait]
pub trait Analyzer: Send + Sync {
    /// Return the free-text answer for `combined_text`. One attempt, no retry.
    async fn analyze(&self, combined_text: &str) -> Result<String>;
}

/// Render an analysis result as the text shown to the observer
pub fn describe_outcome(result: Result<String>) -> String {
    match result {
        Ok(answer) => answer,
        Err(e) => format!("Error: Unable to get answer from Gemini - {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExtractorError;

    #[test]
    fn test_describe_success() {
        assert_eq!(describe_outcome(Ok("C. Paris".to_string())), "C. Paris");
    }

    #[test]
    fn test_describe_failure() {
        let text = describe_outcome(Err(ExtractorError::Network("connection refused".to_string())));
        assert_eq!(text, "Error: Unable to get answer from Gemini - Network error: connection refused");
    }
}
