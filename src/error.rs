use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, ExtractorError>;

/// Errors produced while driving the quiz page or talking to the analyzer
#[derive(Debug, Error)]
pub enum ExtractorError {
    /// Chrome could not be launched
    #[error("Failed to launch browser: {0}")]
    LaunchFailed(String),

    /// Could not attach to an already running browser
    #[error("Failed to connect to browser: {0}")]
    ConnectionFailed(String),

    #[error("Tab operation failed: {0}")]
    TabOperationFailed(String),

    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    /// A script evaluated in the page threw or could not be sent
    #[error("JavaScript evaluation failed: {0}")]
    EvaluationFailed(String),

    /// The page returned something we could not decode
    #[error("Failed to parse DOM data: {0}")]
    DomParseFailed(String),

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// The render target never showed up within the hook timeout
    #[error("Render hook target unavailable: {0}")]
    IntegrationMissing(String),

    /// Missing API key, malformed endpoint and the like
    #[error("Configuration error: {0}")]
    Config(String),

    /// The analyzer request never got a response
    #[error("Network error: {0}")]
    Network(String),

    /// The analyzer answered with a non-2xx status
    #[error("Gemini API request failed: {status} {message}")]
    Api { status: u16, message: String },

    /// The analyzer answered 2xx but without a usable candidate
    #[error("Invalid response format from Gemini API: {0}")]
    InvalidResponse(String),
}

impl ExtractorError {
    /// Whether this error came from the remote analyzer rather than the page
    pub fn is_service_error(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Api { .. } | Self::InvalidResponse(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = ExtractorError::Api { status: 503, message: "Service Unavailable".to_string() };
        assert_eq!(err.to_string(), "Gemini API request failed: 503 Service Unavailable");
        assert!(err.is_service_error());
    }

    #[test]
    fn test_page_errors_are_not_service_errors() {
        assert!(!ExtractorError::ElementNotFound("#x".to_string()).is_service_error());
        assert!(!ExtractorError::IntegrationMissing("timeout".to_string()).is_service_error());
    }
}
