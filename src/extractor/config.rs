use std::time::Duration;

/// Timing knobs for the extractor
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// Pause between a render notification and reading the DOM, so the answer
    /// options have settled (default: 150 ms)
    pub settle_delay: Duration,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self { settle_delay: Duration::from_millis(150) }
    }
}

impl ExtractorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the settle delay
    pub fn settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }
}
