//! Extraction gate
//!
//! Decides, for every rendered question, whether it is a genuinely new question
//! that should be extracted and analyzed, or a duplicate re-render / post-answer
//! review screen that should be ignored.
//!
//! The gate never touches the page or the network. Callers read the page, ask
//! [`ExtractionGate::evaluate`] for a [`Decision`] and, on [`Decision::Proceed`],
//! record the acceptance with [`ExtractionGate::commit`].

use crate::dom::QuestionSnapshot;
use serde::Serialize;

/// Observed state owned by the gate
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GateState {
    /// Question text of the most recently approved extraction
    pub last_question_text: String,

    /// Set while the page shows correctness markers on the answer options
    pub is_in_review_stage: bool,
}

/// Why a snapshot was not extracted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No question text on the page
    EmptyQuestion,
    /// Same text as the last approved extraction
    Duplicate,
    /// Already in the review stage
    Reviewing,
    /// Correctness markers were seen on this check; the gate is now reviewing
    ReviewMarkersDetected,
}

/// Outcome of [`ExtractionGate::evaluate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Proceed,
    Skip(SkipReason),
}

impl Decision {
    pub fn is_proceed(&self) -> bool {
        matches!(self, Decision::Proceed)
    }
}

/// Single authority on whether a rendered question gets extracted
#[derive(Debug, Default)]
pub struct ExtractionGate {
    state: GateState,
}

impl ExtractionGate {
    /// Create a gate in the initial `("", false)` state
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only copy of the current state
    pub fn state(&self) -> GateState {
        self.state.clone()
    }

    /// Decide whether `snapshot` should be extracted.
    ///
    /// Only the review-marker rule mutates state (it enters the review stage);
    /// every other outcome leaves the gate untouched.
    pub fn evaluate(&mut self, snapshot: &QuestionSnapshot, review_markers_present: bool) -> Decision {
        if snapshot.question_text.is_empty() {
            return Decision::Skip(SkipReason::EmptyQuestion);
        }

        if snapshot.question_text == self.state.last_question_text {
            return Decision::Skip(SkipReason::Duplicate);
        }

        if self.state.is_in_review_stage {
            return Decision::Skip(SkipReason::Reviewing);
        }

        if review_markers_present {
            self.state.is_in_review_stage = true;
            return Decision::Skip(SkipReason::ReviewMarkersDetected);
        }

        Decision::Proceed
    }

    /// Record an approved extraction of `question_text`
    pub fn commit(&mut self, question_text: &str) {
        self.state.last_question_text = question_text.to_string();
        self.state.is_in_review_stage = false;
    }

    /// A new question was rendered; it supersedes any review stage
    pub fn notify_new_question_rendered(&mut self, question_text: &str) {
        if !question_text.trim().is_empty() {
            self.state.is_in_review_stage = false;
        }
    }

    /// Return to the initial state
    pub fn force_reset(&mut self) {
        self.state = GateState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::AnswerOption;

    fn snapshot(text: &str) -> QuestionSnapshot {
        QuestionSnapshot {
            question_text: text.to_string(),
            answers: vec![
                AnswerOption::new("A", "3", 0),
                AnswerOption::new("B", "4", 1),
            ],
        }
    }

    fn gate_with(last: &str, reviewing: bool) -> ExtractionGate {
        ExtractionGate {
            state: GateState { last_question_text: last.to_string(), is_in_review_stage: reviewing },
        }
    }

    #[test]
    fn test_initial_state() {
        let gate = ExtractionGate::new();
        assert_eq!(gate.state(), GateState { last_question_text: String::new(), is_in_review_stage: false });
    }

    #[test]
    fn test_empty_question_skips_without_state_change() {
        for (last, reviewing) in [("", false), ("Q1", false), ("Q1", true)] {
            for markers in [false, true] {
                let mut gate = gate_with(last, reviewing);
                let before = gate.state();

                let decision = gate.evaluate(&snapshot(""), markers);

                assert_eq!(decision, Decision::Skip(SkipReason::EmptyQuestion));
                assert_eq!(gate.state(), before);
            }
        }
    }

    #[test]
    fn test_duplicate_skips_without_state_change() {
        for reviewing in [false, true] {
            for markers in [false, true] {
                let mut gate = gate_with("Q1", reviewing);
                let before = gate.state();

                assert_eq!(gate.evaluate(&snapshot("Q1"), markers), Decision::Skip(SkipReason::Duplicate));
                assert_eq!(gate.evaluate(&snapshot("Q1"), markers), Decision::Skip(SkipReason::Duplicate));
                assert_eq!(gate.state(), before);
            }
        }
    }

    #[test]
    fn test_review_markers_enter_review_stage() {
        let mut gate = gate_with("Q1", false);

        assert_eq!(gate.evaluate(&snapshot("Q2"), true), Decision::Skip(SkipReason::ReviewMarkersDetected));
        assert!(gate.state().is_in_review_stage);
        assert_eq!(gate.state().last_question_text, "Q1");

        // markers gone, same question: the review lock still holds
        assert_eq!(gate.evaluate(&snapshot("Q2"), false), Decision::Skip(SkipReason::Reviewing));
        assert!(gate.state().is_in_review_stage);
    }

    #[test]
    fn test_reviewing_skips_without_state_change() {
        let mut gate = gate_with("Q1", true);
        let before = gate.state();

        assert_eq!(gate.evaluate(&snapshot("Q2"), false), Decision::Skip(SkipReason::Reviewing));
        assert_eq!(gate.state(), before);
    }

    #[test]
    fn test_new_question_clears_review_lock() {
        let mut gate = gate_with("Q1", true);

        gate.notify_new_question_rendered("Q2");

        assert_eq!(gate.evaluate(&snapshot("Q2"), false), Decision::Proceed);
    }

    #[test]
    fn test_blank_render_keeps_review_lock() {
        let mut gate = gate_with("Q1", true);

        gate.notify_new_question_rendered("");
        gate.notify_new_question_rendered("   \n");

        assert!(gate.state().is_in_review_stage);
    }

    #[test]
    fn test_proceed_commit_then_duplicate() {
        let mut gate = ExtractionGate::new();
        let snap = snapshot("What is 2+2?");

        let decision = gate.evaluate(&snap, false);
        assert_eq!(decision, Decision::Proceed);
        assert_eq!(gate.state(), GateState::default());

        gate.commit(&snap.question_text);
        assert_eq!(
            gate.state(),
            GateState { last_question_text: "What is 2+2?".to_string(), is_in_review_stage: false }
        );

        assert_eq!(gate.evaluate(&snap, false), Decision::Skip(SkipReason::Duplicate));
    }

    #[test]
    fn test_review_then_next_question() {
        let mut gate = gate_with("Q1", false);

        assert!(!gate.evaluate(&snapshot("Q1"), true).is_proceed());
        // the duplicate rule fires first, so the review flag is not set here
        assert_eq!(gate.state(), GateState { last_question_text: "Q1".to_string(), is_in_review_stage: false });

        gate.state.is_in_review_stage = true;
        gate.notify_new_question_rendered("Q2");
        assert_eq!(gate.evaluate(&snapshot("Q2"), false), Decision::Proceed);
    }

    #[test]
    fn test_force_reset() {
        for (last, reviewing) in [("", false), ("Q1", false), ("Q1", true), ("", true)] {
            let mut gate = gate_with(last, reviewing);
            gate.force_reset();
            assert_eq!(gate.state(), GateState::default());
        }
    }

    #[test]
    fn test_state_serializes_camel_case() {
        let gate = gate_with("Q1", true);
        let json = serde_json::to_value(gate.state()).unwrap();
        assert_eq!(json, serde_json::json!({"lastQuestionText": "Q1", "isInReviewStage": true}));
    }
}
