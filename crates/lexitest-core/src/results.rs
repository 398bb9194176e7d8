//! Per-question outcome types: hint state and graded responses.

use serde::{Deserialize, Serialize};

use crate::model::Difficulty;

/// Per-question hint progression.
///
/// Steps only ever increase within a question's lifetime; a review retry of
/// the same word gets a fresh question id and starts over at [`HintStep::NoHint`].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum HintStep {
    #[default]
    NoHint,
    SynonymRevealed,
    OptionEliminated,
}

impl HintStep {
    /// Number of hints this step represents.
    pub fn hints_used(self) -> u8 {
        match self {
            HintStep::NoHint => 0,
            HintStep::SynonymRevealed => 1,
            HintStep::OptionEliminated => 2,
        }
    }

    /// Display label for summaries.
    pub fn label(self) -> &'static str {
        match self {
            HintStep::NoHint => "No hints",
            HintStep::SynonymRevealed => "Similar word",
            HintStep::OptionEliminated => "Similar + elimination",
        }
    }
}

/// Hint state for one question, keyed by question id in the engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HintState {
    /// Current hint step; monotonic within the question's lifetime.
    pub step: HintStep,
    /// The synonym revealed at step 1, fixed on first reveal.
    pub revealed_synonym: Option<String>,
    /// The incorrect option removed at step 2.
    pub eliminated_option_id: Option<String>,
}

/// The graded record of one submitted question.
///
/// At most one live record exists per question id; a defensive resubmission
/// replaces the record without re-applying scoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    pub question_id: String,
    /// The prompt word text.
    pub word: String,
    pub selected_option_id: String,
    pub selected_definition: String,
    pub correct_definition: String,
    pub is_correct: bool,
    pub difficulty: Option<Difficulty>,
    pub time_spent_ms: u64,
    /// Signed points change applied by this answer.
    pub points_delta: i64,
    /// Streak immediately after this answer.
    pub streak_after: u32,
    /// Hints consumed on this question (0, 1, or 2).
    pub hints_used: u8,
}
