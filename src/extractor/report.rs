use crate::event::ExtractionEvent;
use crate::gate::SkipReason;

/// Observer of extraction outcomes
pub trait Reporter: Send + Sync {
    /// A new question was approved and extracted
    fn on_extraction(&self, event: &ExtractionEvent);

    /// A check ran but the gate declined it
    fn on_skip(&self, _reason: SkipReason) {}

    /// The analyzer finished for `event`; `answer` is the answer or an error description
    fn on_analysis(&self, event: &ExtractionEvent, answer: &str);
}

/// [`Reporter`] that writes everything to the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn on_extraction(&self, event: &ExtractionEvent) {
        log::info!("=== NEW QUESTION DETECTED ===");
        log::info!("Combined question data:\n{}", event.combined_text);
        log::info!("================================");
    }

    fn on_skip(&self, reason: SkipReason) {
        match reason {
            SkipReason::ReviewMarkersDetected => log::info!("Detected review stage - skipping extraction"),
            other => log::debug!("Skipped extraction ({:?})", other),
        }
    }

    fn on_analysis(&self, _event: &ExtractionEvent, answer: &str) {
        log::info!("=== GEMINI AI ANALYSIS ===");
        log::info!("Gemini response: {}", answer);
        log::info!("==========================");
    }
}
