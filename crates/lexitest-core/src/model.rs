//! Core data model types for lexitest.
//!
//! These are the fundamental types that the entire lexitest system uses
//! to represent vocabulary words, word banks, and multiple-choice questions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Self-reported difficulty of a vocabulary word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" | "med" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// A single vocabulary entry.
///
/// Owned by the word bank; the engine only ever reads these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocabWord {
    /// Unique identifier within the bank.
    pub id: String,
    /// The word itself (the question prompt).
    pub word: String,
    /// The definition, used as the correct option label.
    pub definition: String,
    /// Difficulty rating, if the bank provides one.
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    /// Part of speech (e.g. "adjective").
    #[serde(default)]
    pub part_of_speech: Option<String>,
    /// Synonyms, in bank order. The synonym hint draws from these.
    #[serde(default)]
    pub synonyms: Vec<String>,
    /// An example sentence.
    #[serde(default)]
    pub example: Option<String>,
}

/// A collection of vocabulary words loaded from a bank file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordBank {
    /// Unique identifier for this bank.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Description of this bank.
    #[serde(default)]
    pub description: String,
    /// The words in this bank.
    #[serde(default)]
    pub words: Vec<VocabWord>,
}

/// One multiple-choice option within a question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionOption {
    /// Unique within the owning question.
    pub id: String,
    /// The definition text shown to the player.
    pub label: String,
    /// Whether this option is the prompt word's own definition.
    pub is_correct: bool,
    /// The word this definition was drawn from.
    pub source_word_id: String,
}

/// A multiple-choice question.
///
/// Built once and never mutated; exactly one option is correct and its
/// `source_word_id` equals `word.id`. Distractor sources are pairwise
/// distinct and never the prompt word.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Unique within the session's question sequence.
    pub id: String,
    /// The prompt word.
    pub word: VocabWord,
    /// The shuffled option set.
    pub options: Vec<QuestionOption>,
}

impl Question {
    /// The correct option. Every builder-produced question has exactly one.
    pub fn correct_option(&self) -> Option<&QuestionOption> {
        self.options.iter().find(|o| o.is_correct)
    }

    /// Look up an option by id.
    pub fn option(&self, option_id: &str) -> Option<&QuestionOption> {
        self.options.iter().find(|o| o.id == option_id)
    }
}
