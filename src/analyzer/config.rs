use crate::error::{ExtractorError, Result};
use std::time::Duration;

/// Gemini generateContent endpoint used unless overridden
pub const DEFAULT_GEMINI_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent";

/// Where the analyzer sends questions and how it authenticates
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Full generateContent URL
    pub endpoint: String,

    /// API key, sent as the `key` query parameter
    pub api_key: String,

    /// Request timeout
    pub timeout: Duration,
}

impl AnalyzerConfig {
    /// Config for the default endpoint with the given key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            endpoint: DEFAULT_GEMINI_API_URL.to_string(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(60),
        }
    }

    /// Read `GEMINI_API_KEY` / `GEMINI_API_URL`, falling back to the values
    /// baked in when the crate was built.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .or_else(|| option_env!("GEMINI_API_KEY").map(str::to_string))
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ExtractorError::Config("GEMINI_API_KEY not set".into()))?;

        let mut config = Self::new(api_key);
        if let Some(endpoint) = std::env::var("GEMINI_API_URL")
            .ok()
            .or_else(|| option_env!("GEMINI_API_URL").map(str::to_string))
        {
            config.endpoint = endpoint;
        }

        Ok(config)
    }

    /// Builder method: set the endpoint URL
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Builder method: set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
