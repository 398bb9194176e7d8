//! Engine construction errors.
//!
//! Misuse of a running session (submitting with no selection, hinting
//! twice, advancing before reveal) is a silent no-op by design; only
//! building a session over unusable inputs is an error.

use thiserror::Error;

/// Errors that can occur when constructing a quiz session.
#[derive(Debug, Error)]
pub enum QuizError {
    /// The word bank contained no words.
    #[error("word bank is empty")]
    EmptyWordBank,

    /// The configured option count cannot form a multiple-choice question.
    #[error("choices per question must be at least 2, got {0}")]
    TooFewChoices(usize),

    /// The configured batch size is zero.
    #[error("question count must be at least 1")]
    ZeroQuestionCount,
}
