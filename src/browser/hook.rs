use crate::dom::QUESTION_TEXT_SELECTOR;
use crate::error::{ExtractorError, Result};
use headless_chrome::Tab;
use std::sync::Arc;
use std::time::Duration;

/// Called with the question text each time the page renders a new question
pub type RenderCallback = Arc<dyn Fn(String) + Send + Sync>;

/// Registration point for "a new question was rendered" notifications
pub trait RenderHook: Send + Sync {
    /// Start delivering render notifications to `callback`.
    ///
    /// Fails with [`ExtractorError::IntegrationMissing`] when the page never
    /// exposes the question UI.
    fn install(&self, callback: RenderCallback) -> Result<()>;

    /// Stop delivering notifications
    fn uninstall(&self) -> Result<()>;
}

/// Name of the CDP binding the page observer reports through
pub const DEFAULT_BINDING_NAME: &str = "__quizExtractorRendered";

/// [`RenderHook`] that watches the question element of a tab with a
/// `MutationObserver` and reports changes through a CDP binding
pub struct TabRenderHook {
    tab: Arc<Tab>,
    binding_name: String,
    timeout: Duration,
}

impl TabRenderHook {
    pub fn new(tab: Arc<Tab>) -> Self {
        Self { tab, binding_name: DEFAULT_BINDING_NAME.to_string(), timeout: Duration::from_secs(10) }
    }

    /// Builder method: how long to wait for the question element before giving up
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builder method: override the binding name
    pub fn binding_name(mut self, name: impl Into<String>) -> Self {
        self.binding_name = name.into();
        self
    }

    fn observer_script(&self) -> String {
        // JSON string literals are valid JS string literals
        let name = serde_json::Value::String(self.binding_name.clone());
        format!("{}({})", include_str!("observe_question.js").trim_end(), name)
    }
}

/// Pull the question text out of a binding payload.
///
/// headless_chrome hands the binding argument over as a JSON string holding
/// `{"questionText": ...}`; bindings registered for new documents wrap it in a
/// `{name, seq, args: [...]}` envelope instead.
fn question_text_from_payload(payload: &serde_json::Value) -> Option<String> {
    match payload {
        serde_json::Value::String(raw) => match serde_json::from_str::<serde_json::Value>(raw) {
            Ok(inner) if !inner.is_string() => question_text_from_payload(&inner),
            _ => None,
        },
        serde_json::Value::Object(fields) => match fields.get("questionText") {
            Some(text) => text.as_str().map(str::to_string),
            None => fields
                .get("args")
                .and_then(|args| args.as_array())
                .and_then(|args| args.first())
                .and_then(question_text_from_payload),
        },
        _ => None,
    }
}

/// Binding handler that decodes each payload and forwards the question text
fn render_listener(callback: RenderCallback) -> Arc<dyn Fn(serde_json::Value) + Send + Sync> {
    Arc::new(move |payload: serde_json::Value| match question_text_from_payload(&payload) {
        Some(text) => callback(text),
        None => log::debug!("Ignoring malformed render payload: {}", payload),
    })
}

impl RenderHook for TabRenderHook {
    fn install(&self, callback: RenderCallback) -> Result<()> {
        self.tab
            .wait_for_element_with_custom_timeout(QUESTION_TEXT_SELECTOR, self.timeout)
            .map_err(|e| {
                ExtractorError::IntegrationMissing(format!(
                    "'{}' did not appear within {:?}: {}",
                    QUESTION_TEXT_SELECTOR, self.timeout, e
                ))
            })?;

        let listener = render_listener(callback);
        self.tab
            .expose_function(&self.binding_name, Arc::new(move |payload: serde_json::Value| listener(payload)))
            .map_err(|e| ExtractorError::TabOperationFailed(format!("Failed to expose render binding: {}", e)))?;

        self.tab
            .evaluate(&self.observer_script(), false)
            .map_err(|e| ExtractorError::EvaluationFailed(format!("Failed to install question observer: {}", e)))?;

        Ok(())
    }

    fn uninstall(&self) -> Result<()> {
        self.tab
            .evaluate(include_str!("unobserve_question.js"), false)
            .map_err(|e| ExtractorError::EvaluationFailed(format!("Failed to remove question observer: {}", e)))?;

        Ok(())
    }
}
