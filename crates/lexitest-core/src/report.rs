//! Session reports with JSON persistence and markdown rendering.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::QuizConfig;
use crate::results::{HintStep, Response};

/// Aggregate figures for one quiz session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizSummary {
    /// Questions in the session, review injections included.
    pub total_questions: usize,
    /// Questions with a submitted answer.
    pub answered: usize,
    /// Correctly answered questions.
    pub correct: usize,
    /// Percentage of correct answers over submitted answers.
    pub accuracy: u32,
    pub points: u32,
    pub max_streak: u32,
    /// Mean seconds per answered question, one decimal.
    pub average_time_seconds: f64,
    /// Total session seconds, one decimal.
    pub total_time_seconds: f64,
    pub total_hints_used: u32,
}

/// Summary of the word bank a session ran over (without the full word list).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordBankSummary {
    pub id: String,
    pub name: String,
    pub word_count: usize,
}

/// A complete session report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// The bank the session ran over.
    pub bank: WordBankSummary,
    /// The configuration the session ran with.
    pub config: QuizConfig,
    /// Aggregate summary.
    pub summary: QuizSummary,
    /// Per-question responses, in answer order.
    pub responses: Vec<Response>,
}

impl QuizReport {
    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: QuizReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Format the report as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!("## Quiz results — {}\n\n", self.bank.name));
        md.push_str(&format!(
            "**Summary:** {} / {} correct ({}% accuracy), {} points, max streak {}\n\n",
            self.summary.correct,
            self.summary.answered,
            self.summary.accuracy,
            self.summary.points,
            self.summary.max_streak
        ));
        md.push_str(&format!(
            "Total time {}s, average {}s per question, {} hint(s) used.\n\n",
            self.summary.total_time_seconds,
            self.summary.average_time_seconds,
            self.summary.total_hints_used
        ));

        if !self.responses.is_empty() {
            md.push_str("| Word | Result | Your choice | Points | Hints |\n");
            md.push_str("|------|--------|-------------|--------|-------|\n");
            for r in &self.responses {
                let result = if r.is_correct { "Correct" } else { "Reviewed" };
                let points = if r.points_delta > 0 {
                    format!("+{}", r.points_delta)
                } else {
                    r.points_delta.to_string()
                };
                let hints = match r.hints_used {
                    1 => HintStep::SynonymRevealed.label(),
                    2 => HintStep::OptionEliminated.label(),
                    _ => HintStep::NoHint.label(),
                };
                md.push_str(&format!(
                    "| {} | {} | {} | {} | {} |\n",
                    r.word, result, r.selected_definition, points, hints
                ));
            }
        }

        md
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Difficulty;

    fn make_response(word: &str, correct: bool, delta: i64) -> Response {
        Response {
            question_id: word.to_string(),
            word: word.to_string(),
            selected_option_id: format!("{word}-correct"),
            selected_definition: "a definition".into(),
            correct_definition: "a definition".into(),
            is_correct: correct,
            difficulty: Some(Difficulty::Easy),
            time_spent_ms: 1500,
            points_delta: delta,
            streak_after: u32::from(correct),
            hints_used: 0,
        }
    }

    fn make_report(responses: Vec<Response>) -> QuizReport {
        let correct = responses.iter().filter(|r| r.is_correct).count();
        QuizReport {
            id: Uuid::nil(),
            created_at: Utc::now(),
            bank: WordBankSummary {
                id: "test".into(),
                name: "Test Bank".into(),
                word_count: 12,
            },
            config: QuizConfig::default(),
            summary: QuizSummary {
                total_questions: responses.len(),
                answered: responses.len(),
                correct,
                accuracy: 50,
                points: 110,
                max_streak: 1,
                average_time_seconds: 1.5,
                total_time_seconds: 3.0,
                total_hints_used: 0,
            },
            responses,
        }
    }

    #[test]
    fn json_roundtrip() {
        let report = make_report(vec![
            make_response("ephemeral", true, 110),
            make_response("laconic", false, -30),
        ]);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");

        report.save_json(&path).unwrap();
        let loaded = QuizReport::load_json(&path).unwrap();

        assert_eq!(loaded.bank.id, "test");
        assert_eq!(loaded.responses.len(), 2);
        assert_eq!(loaded.summary.points, 110);
    }

    #[test]
    fn load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(QuizReport::load_json(&dir.path().join("nope.json")).is_err());
    }

    #[test]
    fn markdown_output() {
        let report = make_report(vec![
            make_response("ephemeral", true, 110),
            make_response("laconic", false, -30),
        ]);
        let md = report.to_markdown();
        assert!(md.contains("Test Bank"));
        assert!(md.contains("ephemeral"));
        assert!(md.contains("+110"));
        assert!(md.contains("Reviewed"));
    }

    #[test]
    fn markdown_without_responses_skips_table() {
        let md = make_report(vec![]).to_markdown();
        assert!(!md.contains("| Word |"));
    }
}
