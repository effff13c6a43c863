use crate::analyzer::{Analyzer, AnalyzerConfig};
use crate::error::{ExtractorError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Instructions appended to every question
const ANSWER_INSTRUCTIONS: &str = "\n\nPlease analyze this multiple choice question and provide ONLY the correct answer in this exact format: [Letter]. [Answer text]\n\nExample: A. Eco-friendly construction\n\nDo not include any explanation or additional text.";

/// Build the prompt sent to Gemini for a formatted question
pub fn build_prompt(combined_text: &str) -> String {
    format!("{}{}", combined_text, ANSWER_INSTRUCTIONS)
}

// =============================================================================
// Wire types
// =============================================================================

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    tools: Vec<RequestTool>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Option<Vec<Part>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
struct RequestTool {
    google_search: GoogleSearch,
}

/// Serializes as `{}`
#[derive(Debug, Serialize)]
struct GoogleSearch {}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

impl GenerateContentRequest {
    fn new(prompt: String) -> Self {
        Self {
            contents: vec![Content { parts: Some(vec![Part { text: Some(prompt) }]) }],
            tools: vec![RequestTool { google_search: GoogleSearch {} }],
        }
    }
}

impl GenerateContentResponse {
    /// `candidates[0].content.parts[0].text`
    fn into_answer(self) -> Option<String> {
        self.candidates?
            .into_iter()
            .next()?
            .content?
            .parts?
            .into_iter()
            .next()?
            .text
    }
}

// =============================================================================
// Client
// =============================================================================

/// [`Analyzer`] backed by the Gemini generateContent API with Google Search grounding
#[derive(Clone)]
pub struct GeminiAnalyzer {
    http_client: Client,
    config: AnalyzerConfig,
}

impl GeminiAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ExtractorError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { http_client, config })
    }

    /// Create from `GEMINI_API_KEY` / `GEMINI_API_URL`
    pub fn from_env() -> Result<Self> {
        Self::new(AnalyzerConfig::from_env()?)
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }
}

#[async_trait]
impl Analyzer for GeminiAnalyzer {
    async fn analyze(&self, combined_text: &str) -> Result<String> {
        let prompt = build_prompt(combined_text);
        log::info!("Calling Google Gemini API...");
        log::debug!("Prompt sent to Gemini: {}", prompt);

        let start = std::time::Instant::now();

        let response = self
            .http_client
            .post(&self.config.endpoint)
            .query(&[("key", self.config.api_key.as_str())])
            .json(&GenerateContentRequest::new(prompt))
            .send()
            .await
            .map_err(|e| ExtractorError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::warn!("Gemini API error {}: {}", status, body);
            return Err(ExtractorError::Api {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ExtractorError::InvalidResponse(e.to_string()))?;

        let answer = body
            .into_answer()
            .ok_or_else(|| ExtractorError::InvalidResponse("no candidate text".to_string()))?;

        log::debug!("Gemini API response received in {} ms", start.elapsed().as_millis());

        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_prompt() {
        let prompt = build_prompt("Question: Q\n\nAnswer options:\nA. x\n");

        assert!(prompt.starts_with("Question: Q\n\nAnswer options:\nA. x\n\n\nPlease analyze"));
        assert!(prompt.contains("[Letter]. [Answer text]"));
        assert!(prompt.ends_with("Do not include any explanation or additional text."));
    }

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(GenerateContentRequest::new("hello".to_string())).unwrap();

        assert_eq!(
            body,
            serde_json::json!({
                "contents": [{"parts": [{"text": "hello"}]}],
                "tools": [{"google_search": {}}]
            })
        );
    }

    #[test]
    fn test_response_answer() {
        let json = r#"{"candidates": [{"content": {"parts": [{"text": "C. Paris"}, {"text": "ignored"}], "role": "model"}}]}"#;
        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.into_answer(), Some("C. Paris".to_string()));
    }

    #[test]
    fn test_response_missing_fields() {
        for json in [
            r#"{}"#,
            r#"{"candidates": []}"#,
            r#"{"candidates": [{}]}"#,
            r#"{"candidates": [{"content": {}}]}"#,
            r#"{"candidates": [{"content": {"parts": []}}]}"#,
            r#"{"candidates": [{"content": {"parts": [{}]}}]}"#,
        ] {
            let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
            assert_eq!(response.into_answer(), None, "{}", json);
        }
    }

    #[test]
    fn test_analyzer_keeps_config() {
        let analyzer = GeminiAnalyzer::new(AnalyzerConfig::new("k").endpoint("http://localhost:1/gen")).unwrap();
        assert_eq!(analyzer.config().endpoint, "http://localhost:1/gen");
    }
}
