//! Question extractor
//!
//! Wires the page render hook to the [`ExtractionGate`], and approved
//! extractions to the analyzer and the reporter. Render notifications are
//! queued to a single worker task, so the gate has exactly one writer besides
//! the explicit control calls, and every evaluate/commit pair runs under one
//! lock acquisition.
//!
//! Analyses are fire-and-forget: each approved question spawns its own task,
//! and overlapping analyses are neither cancelled nor ordered.

pub mod config;
pub mod report;

pub use config::ExtractorConfig;
pub use report::{LogReporter, Reporter};

use crate::analyzer::{describe_outcome, Analyzer};
use crate::browser::{BrowserSession, RenderCallback, RenderHook};
use crate::dom::{QuizDom, RenderedQuestion};
use crate::error::{ExtractorError, Result};
use crate::event::ExtractionEvent;
use crate::gate::{Decision, ExtractionGate, GateState};
use parking_lot::Mutex;
use std::sync::{Arc, Weak};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Question used by [`QuestionExtractor::test_analyzer`] when none is given
pub const SAMPLE_QUESTION: &str =
    "Which of the following is the capital of France?\nA. London\nB. Berlin\nC. Paris\nD. Madrid";

struct Shared {
    gate: Mutex<ExtractionGate>,
    dom: Arc<dyn QuizDom>,
    render_hook: Arc<dyn RenderHook>,
    analyzer: Arc<dyn Analyzer>,
    reporter: Arc<dyn Reporter>,
    config: ExtractorConfig,
    hook_slot: Mutex<HookSlot>,
}

/// Render hook lifecycle
enum HookSlot {
    Unhooked,
    /// A `hook()` call is installing the render hook
    Installing,
    /// Installed; holds the render worker
    Hooked(JoinHandle<()>),
}

impl Drop for Shared {
    fn drop(&mut self) {
        if let HookSlot::Hooked(worker) = std::mem::replace(self.hook_slot.get_mut(), HookSlot::Unhooked) {
            worker.abort();
        }
    }
}

/// Puts the slot back to `Unhooked` unless the installation completed
struct InstallReservation<'a> {
    slot: &'a Mutex<HookSlot>,
    completed: bool,
}

impl Drop for InstallReservation<'_> {
    fn drop(&mut self) {
        if !self.completed {
            *self.slot.lock() = HookSlot::Unhooked;
        }
    }
}

/// Builder for [`QuestionExtractor`]
pub struct ExtractorBuilder {
    dom: Arc<dyn QuizDom>,
    render_hook: Arc<dyn RenderHook>,
    analyzer: Arc<dyn Analyzer>,
    reporter: Arc<dyn Reporter>,
    config: ExtractorConfig,
}

impl ExtractorBuilder {
    /// Builder method: set the reporter (default: [`LogReporter`])
    pub fn reporter(mut self, reporter: Arc<dyn Reporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Builder method: set timing configuration
    pub fn config(mut self, config: ExtractorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> QuestionExtractor {
        QuestionExtractor {
            shared: Arc::new(Shared {
                gate: Mutex::new(ExtractionGate::new()),
                dom: self.dom,
                render_hook: self.render_hook,
                analyzer: self.analyzer,
                reporter: self.reporter,
                config: self.config,
                hook_slot: Mutex::new(HookSlot::Unhooked),
            }),
        }
    }
}

/// Handle to a running extractor; clones share the same gate and hook
#[derive(Clone)]
pub struct QuestionExtractor {
    shared: Arc<Shared>,
}

impl QuestionExtractor {
    pub fn builder(
        dom: Arc<dyn QuizDom>,
        render_hook: Arc<dyn RenderHook>,
        analyzer: Arc<dyn Analyzer>,
    ) -> ExtractorBuilder {
        ExtractorBuilder {
            dom,
            render_hook,
            analyzer,
            reporter: Arc::new(LogReporter),
            config: ExtractorConfig::default(),
        }
    }

    pub fn new(dom: Arc<dyn QuizDom>, render_hook: Arc<dyn RenderHook>, analyzer: Arc<dyn Analyzer>) -> Self {
        Self::builder(dom, render_hook, analyzer).build()
    }

    /// Builder wired to the active tab of `session`
    pub fn for_session(session: &BrowserSession, analyzer: Arc<dyn Analyzer>) -> Result<ExtractorBuilder> {
        Ok(Self::builder(Arc::new(session.quiz_dom()?), Arc::new(session.render_hook()?), analyzer))
    }

    /// Log startup and try to hook; a missing render target only warns
    pub async fn init(&self) {
        log::info!("Question extractor initialized");

        if let Err(e) = self.hook().await {
            log::warn!("Could not hook into question rendering: {}", e);
        }
    }

    /// Start reacting to rendered questions
    pub async fn hook(&self) -> Result<()> {
        let mut reservation = {
            let mut slot = self.shared.hook_slot.lock();
            if !matches!(*slot, HookSlot::Unhooked) {
                log::warn!("Question extractor is already hooked");
                return Ok(());
            }
            *slot = HookSlot::Installing;
            InstallReservation { slot: &self.shared.hook_slot, completed: false }
        };

        let (tx, rx) = mpsc::unbounded_channel::<String>();
        let callback: RenderCallback = Arc::new(move |question_text| {
            // a closed channel means we were unhooked
            let _ = tx.send(question_text);
        });

        let render_hook = Arc::clone(&self.shared.render_hook);
        tokio::task::spawn_blocking(move || render_hook.install(callback))
            .await
            .map_err(|e| ExtractorError::TabOperationFailed(format!("Render hook installation aborted: {}", e)))??;

        let worker = tokio::spawn(run_worker(Arc::downgrade(&self.shared), rx));
        *self.shared.hook_slot.lock() = HookSlot::Hooked(worker);
        reservation.completed = true;

        log::info!("Question extractor hooked to question rendering");
        Ok(())
    }

    /// Stop reacting to rendered questions
    pub async fn unhook(&self) -> Result<()> {
        let worker = {
            let mut slot = self.shared.hook_slot.lock();
            match std::mem::replace(&mut *slot, HookSlot::Unhooked) {
                HookSlot::Hooked(worker) => worker,
                other => {
                    *slot = other;
                    log::warn!("Question extractor is not hooked");
                    return Ok(());
                }
            }
        };
        worker.abort();

        let render_hook = Arc::clone(&self.shared.render_hook);
        tokio::task::spawn_blocking(move || render_hook.uninstall())
            .await
            .map_err(|e| ExtractorError::TabOperationFailed(format!("Render hook removal aborted: {}", e)))??;

        log::info!("Question extractor unhooked from question rendering");
        Ok(())
    }

    pub fn is_hooked(&self) -> bool {
        matches!(*self.shared.hook_slot.lock(), HookSlot::Hooked(_))
    }

    /// Read-only copy of the gate state
    pub fn state(&self) -> GateState {
        self.shared.gate.lock().state()
    }

    /// Forget the last question and any review stage
    pub fn reset_extraction_state(&self) {
        self.shared.gate.lock().force_reset();
        log::info!("Extraction state reset");
    }

    /// Reset the gate and extract whatever the page shows now
    ///
    /// Empty pages and review screens are still skipped.
    pub async fn extract_now(&self) -> Option<ExtractionEvent> {
        log::info!("Manual question data extraction...");
        let rendered = self.read_page().await;
        self.check_rendered(rendered, true)
    }

    /// Read the page, run it through the gate and, if approved, report it and
    /// start its analysis. Returns the event when one was produced.
    pub async fn check_now(&self) -> Option<ExtractionEvent> {
        let rendered = self.read_page().await;
        self.check_rendered(rendered, false)
    }

    /// Gate `rendered`, resetting first when `force` is set. Reset, evaluate
    /// and commit share one lock acquisition.
    fn check_rendered(&self, rendered: RenderedQuestion, force: bool) -> Option<ExtractionEvent> {
        let outcome = {
            let mut gate = self.shared.gate.lock();
            if force {
                gate.force_reset();
            }
            match gate.evaluate(&rendered.snapshot, rendered.review_markers_present) {
                Decision::Skip(reason) => Err(reason),
                Decision::Proceed => {
                    let event = ExtractionEvent::new(rendered.snapshot);
                    gate.commit(&event.question);
                    Ok(event)
                }
            }
        };

        match outcome {
            Err(reason) => {
                self.shared.reporter.on_skip(reason);
                None
            }
            Ok(event) => {
                self.shared.reporter.on_extraction(&event);
                self.spawn_analysis(event.clone());
                Some(event)
            }
        }
    }

    /// Send `sample` (or [`SAMPLE_QUESTION`]) straight to the analyzer
    pub async fn test_analyzer(&self, sample: Option<&str>) -> String {
        log::info!("Testing analyzer with sample question...");
        describe_outcome(self.shared.analyzer.analyze(sample.unwrap_or(SAMPLE_QUESTION)).await)
    }

    async fn on_question_rendered(&self, question_text: String) {
        self.shared.gate.lock().notify_new_question_rendered(&question_text);

        tokio::time::sleep(self.shared.config.settle_delay).await;

        if self.check_now().await.is_none() {
            log::debug!("Skipped extraction (duplicate or review stage)");
        }
    }

    async fn read_page(&self) -> RenderedQuestion {
        let dom = Arc::clone(&self.shared.dom);
        match tokio::task::spawn_blocking(move || dom.read_question()).await {
            Ok(Ok(rendered)) => rendered,
            Ok(Err(e)) => {
                log::warn!("Failed to read question from page: {}", e);
                RenderedQuestion::default()
            }
            Err(e) => {
                log::error!("Question reader task failed: {}", e);
                RenderedQuestion::default()
            }
        }
    }

    fn spawn_analysis(&self, event: ExtractionEvent) {
        let analyzer = Arc::clone(&self.shared.analyzer);
        let reporter = Arc::clone(&self.shared.reporter);

        tokio::spawn(async move {
            let result = analyzer.analyze(&event.combined_text).await;
            if let Err(e) = &result {
                log::error!("Error calling analyzer: {}", e);
            }
            reporter.on_analysis(&event, &describe_outcome(result));
        });
    }
}

/// Drain render notifications one at a time until unhooked or dropped
async fn run_worker(shared: Weak<Shared>, mut rx: mpsc::UnboundedReceiver<String>) {
    while let Some(question_text) = rx.recv().await {
        let Some(shared) = shared.upgrade() else {
            break;
        };
        QuestionExtractor { shared }.on_question_rendered(question_text).await;
    }
}
