//! # quiz-extractor
//!
//! Watches a quiz page through the Chrome DevTools Protocol (CDP), extracts every
//! newly rendered question with its answer options, and asks Google Gemini for
//! the suggested answer.
//!
//! ## How it works
//!
//! - A [`RenderHook`] notifies the extractor whenever the page renders new question text
//! - After a short settle delay the [`QuizDom`] reads the question, the answer options
//!   and whether the options carry correct/incorrect markers (the review screen)
//! - The [`ExtractionGate`] decides whether this is a genuinely new question, skipping
//!   empty pages, duplicate re-renders and review screens
//! - Approved questions become an [`ExtractionEvent`], reported through a [`Reporter`]
//!   and sent to the [`Analyzer`] without waiting for the answer
//!
//! ## Usage
//!
//! ```rust,no_run
//! use quiz_extractor::{AnalyzerConfig, BrowserSession, GeminiAnalyzer, LaunchOptions, QuestionExtractor};
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> quiz_extractor::Result<()> {
//! let session = BrowserSession::launch(LaunchOptions::new().headless(false))?;
//! session.navigate("https://quiz.example.com/play")?;
//! session.wait_for_navigation()?;
//!
//! let analyzer = GeminiAnalyzer::new(AnalyzerConfig::from_env()?)?;
//! let extractor = QuestionExtractor::for_session(&session, Arc::new(analyzer))?.build();
//!
//! // Hook into the page; answers show up in the log as questions appear
//! extractor.init().await;
//!
//! // Or extract whatever is on screen right now
//! if let Some(event) = extractor.extract_now().await {
//!     println!("{}", event.combined_text);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! - [`gate`]: the extraction gate state machine
//! - [`extractor`]: render hook wiring and the public control surface
//! - [`dom`]: question snapshots and page inspection
//! - [`browser`]: browser session, configuration and the page render hook
//! - [`analyzer`]: Gemini answer lookup
//! - [`event`]: extraction events
//! - [`error`]: error types and result aliases

pub mod analyzer;
pub mod browser;
pub mod dom;
pub mod error;
pub mod event;
pub mod extractor;
pub mod gate;

pub use analyzer::{Analyzer, AnalyzerConfig, GeminiAnalyzer};
pub use browser::{BrowserSession, ConnectionOptions, LaunchOptions, RenderCallback, RenderHook, TabRenderHook};
pub use dom::{AnswerOption, QuestionSnapshot, QuizDom, RenderedQuestion, TabQuizDom};
pub use error::{ExtractorError, Result};
pub use event::ExtractionEvent;
pub use extractor::{ExtractorBuilder, ExtractorConfig, LogReporter, QuestionExtractor, Reporter};
pub use gate::{Decision, ExtractionGate, GateState, SkipReason};
