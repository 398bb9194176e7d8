//! The quiz session state machine.
//!
//! Owns the question sequence, the per-question hint side-table, the
//! running score/streak, the response history, and the finish-gate policy
//! that keeps appending review questions until the required streak has
//! been reached.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::builder;
use crate::error::QuizError;
use crate::model::{Question, WordBank};
use crate::report::{QuizReport, QuizSummary, WordBankSummary};
use crate::results::{HintState, HintStep, Response};
use crate::scoring::{self, ScoringConfig};
use crate::traits::RandomSource;

/// Configuration for a quiz session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizConfig {
    /// Size of the initial question batch.
    pub question_count: usize,
    /// Options per question, correct one included.
    pub choices_per_question: usize,
    /// Unbroken streak the player must reach before the quiz may finish.
    pub required_streak: u32,
    /// Point and penalty constants.
    pub scoring: ScoringConfig,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            question_count: 10,
            choices_per_question: 4,
            required_streak: 3,
            scoring: ScoringConfig::default(),
        }
    }
}

/// A user intent dispatched by the presentation layer.
///
/// Every intent is a guarded transition: when its preconditions do not
/// hold it is a silent no-op, never an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    SelectOption(String),
    RevealSynonymHint,
    EliminateOptionHint,
    SubmitAnswer,
    Advance,
    Restart,
}

/// Mutable session state, owned exclusively by the engine.
#[derive(Debug)]
struct SessionState {
    questions: Vec<Question>,
    current_index: usize,
    selected_option: Option<String>,
    revealed: bool,
    finished: bool,
    points: u32,
    streak: u32,
    max_streak: u32,
    pending_review: Vec<String>,
    responses: Vec<Response>,
    hints: HashMap<String, HintState>,
    finish_guard: Option<String>,
    attempted_finish_without_streak: bool,
    quiz_started: Instant,
    question_started: Instant,
    total_elapsed: Option<Duration>,
    review_counter: u32,
}

impl SessionState {
    fn new(questions: Vec<Question>) -> Self {
        let now = Instant::now();
        Self {
            questions,
            current_index: 0,
            selected_option: None,
            revealed: false,
            finished: false,
            points: 0,
            streak: 0,
            max_streak: 0,
            pending_review: Vec::new(),
            responses: Vec::new(),
            hints: HashMap::new(),
            finish_guard: None,
            attempted_finish_without_streak: false,
            quiz_started: now,
            question_started: now,
            total_elapsed: None,
            review_counter: 0,
        }
    }
}

/// The quiz engine: one instance per session, single-owner and synchronous.
pub struct QuizEngine {
    config: QuizConfig,
    bank: WordBank,
    rng: Box<dyn RandomSource>,
    state: SessionState,
}

impl QuizEngine {
    /// Start a session over `bank` with the given config and random source.
    pub fn new(
        bank: WordBank,
        config: QuizConfig,
        mut rng: Box<dyn RandomSource>,
    ) -> Result<Self, QuizError> {
        if bank.words.is_empty() {
            return Err(QuizError::EmptyWordBank);
        }
        if config.choices_per_question < 2 {
            return Err(QuizError::TooFewChoices(config.choices_per_question));
        }
        if config.question_count == 0 {
            return Err(QuizError::ZeroQuestionCount);
        }

        let questions = builder::build_quiz_questions(
            &bank.words,
            config.question_count,
            config.choices_per_question,
            rng.as_mut(),
        );
        tracing::debug!(
            "session started: {} questions from bank '{}'",
            questions.len(),
            bank.id
        );

        Ok(Self {
            config,
            bank,
            rng,
            state: SessionState::new(questions),
        })
    }

    /// Apply one intent. Invalid intents are silent no-ops.
    pub fn apply(&mut self, intent: Intent) {
        if self.state.finished && intent != Intent::Restart {
            return;
        }
        match intent {
            Intent::SelectOption(option_id) => self.on_select(option_id),
            Intent::RevealSynonymHint => self.on_reveal_synonym(),
            Intent::EliminateOptionHint => self.on_eliminate_option(),
            Intent::SubmitAnswer => self.on_submit(),
            Intent::Advance => self.on_advance(),
            Intent::Restart => self.on_restart(),
        }
    }

    // Convenience wrappers for the presentation layer.

    pub fn select_option(&mut self, option_id: &str) {
        self.apply(Intent::SelectOption(option_id.to_string()));
    }

    pub fn reveal_synonym_hint(&mut self) {
        self.apply(Intent::RevealSynonymHint);
    }

    pub fn eliminate_option_hint(&mut self) {
        self.apply(Intent::EliminateOptionHint);
    }

    pub fn submit_answer(&mut self) {
        self.apply(Intent::SubmitAnswer);
    }

    pub fn advance(&mut self) {
        self.apply(Intent::Advance);
    }

    pub fn restart(&mut self) {
        self.apply(Intent::Restart);
    }

    // Transitions.

    fn on_select(&mut self, option_id: String) {
        if self.state.revealed {
            return;
        }
        let eliminated = self.current_hint().eliminated_option_id.clone();
        let Some(question) = self.current_question() else {
            return;
        };
        if question.option(&option_id).is_none() {
            return;
        }
        if eliminated.as_deref() == Some(option_id.as_str()) {
            return;
        }
        self.state.selected_option = Some(option_id);
    }

    fn on_reveal_synonym(&mut self) {
        let Some(question) = self.current_question() else {
            return;
        };
        let synonyms = question.word.synonyms.clone();
        if synonyms.is_empty() {
            return;
        }
        let question_id = question.id.clone();

        let needs_roll = self
            .state
            .hints
            .get(&question_id)
            .map_or(true, |h| h.revealed_synonym.is_none());
        let chosen = if needs_roll {
            Some(synonyms[self.rng.pick(synonyms.len())].clone())
        } else {
            None
        };

        let hint = self.state.hints.entry(question_id).or_default();
        if let Some(synonym) = chosen {
            hint.revealed_synonym = Some(synonym);
        }
        hint.step = hint.step.max(HintStep::SynonymRevealed);
    }

    fn on_eliminate_option(&mut self) {
        if self.state.revealed {
            return;
        }
        let Some(question) = self.current_question() else {
            return;
        };
        let question_id = question.id.clone();
        let hint = self.state.hints.get(&question_id).cloned().unwrap_or_default();
        if hint.step != HintStep::SynonymRevealed {
            return;
        }

        let candidates: Vec<String> = question
            .options
            .iter()
            .filter(|o| !o.is_correct && hint.eliminated_option_id.as_deref() != Some(o.id.as_str()))
            .map(|o| o.id.clone())
            .collect();
        if candidates.is_empty() {
            return;
        }

        let eliminated = candidates[self.rng.pick(candidates.len())].clone();
        if self.state.selected_option.as_deref() == Some(eliminated.as_str()) {
            self.state.selected_option = None;
        }

        let entry = self.state.hints.entry(question_id).or_default();
        entry.eliminated_option_id = Some(eliminated);
        entry.step = HintStep::OptionEliminated;
    }

    fn on_submit(&mut self) {
        let Some(selected_id) = self.state.selected_option.clone() else {
            return;
        };
        let Some(question) = self.current_question() else {
            return;
        };
        let Some(chosen) = question.option(&selected_id) else {
            return;
        };

        let question_id = question.id.clone();
        let word_id = question.word.id.clone();
        let word_text = question.word.word.clone();
        let correct_definition = question.word.definition.clone();
        let difficulty = question.word.difficulty;
        let is_correct = chosen.is_correct;
        let selected_definition = chosen.label.clone();

        let time_spent_ms = self.state.question_started.elapsed().as_millis() as u64;
        let hints_used = self
            .state
            .hints
            .get(&question_id)
            .map_or(0, |h| h.step.hints_used());

        let existing = self
            .state
            .responses
            .iter()
            .position(|r| r.question_id == question_id);

        let (points_delta, streak_after) = match existing {
            // First submission: the only path that touches the score.
            None => {
                if is_correct {
                    let streak_after = self.state.streak + 1;
                    let earned = scoring::points_earned(&self.config.scoring, streak_after);
                    self.state.streak = streak_after;
                    self.state.max_streak = self.state.max_streak.max(streak_after);
                    self.state.points += earned;
                    self.state.pending_review.retain(|id| id != &word_id);
                    self.state.finish_guard = None;
                    tracing::debug!(
                        "correct answer on {question_id}: +{earned}, streak {streak_after}"
                    );
                    (earned as i64, streak_after)
                } else {
                    let penalty = scoring::penalty_on_miss(&self.config.scoring, self.state.streak);
                    self.state.points = scoring::apply_penalty(self.state.points, penalty);
                    self.state.streak = 0;
                    if !self.state.pending_review.contains(&word_id) {
                        self.state.pending_review.push(word_id.clone());
                    }
                    tracing::debug!("incorrect answer on {question_id}: -{penalty}, streak reset");
                    (-(penalty as i64), 0)
                }
            }
            // Resubmission: replace the record, never re-apply scoring.
            Some(index) => {
                let prior = &self.state.responses[index];
                let deltas = (prior.points_delta, prior.streak_after);
                if is_correct {
                    self.state.pending_review.retain(|id| id != &word_id);
                    self.state.finish_guard = None;
                }
                deltas
            }
        };

        let response = Response {
            question_id: question_id.clone(),
            word: word_text,
            selected_option_id: selected_id,
            selected_definition,
            correct_definition,
            is_correct,
            difficulty,
            time_spent_ms,
            points_delta,
            streak_after,
            hints_used,
        };

        match existing {
            Some(index) => self.state.responses[index] = response,
            None => self.state.responses.push(response),
        }
        self.state.revealed = true;
    }

    fn on_advance(&mut self) {
        if !self.state.revealed || self.current_question().is_none() {
            return;
        }

        let last = self.state.current_index + 1 >= self.state.questions.len();
        if !last {
            self.state.current_index += 1;
            self.state.selected_option = None;
            self.state.revealed = false;
            self.state.finish_guard = None;
            self.state.question_started = Instant::now();
            return;
        }

        if self.has_met_required_streak() {
            self.state.finished = true;
            self.state.total_elapsed = Some(self.state.quiz_started.elapsed());
            self.state.finish_guard = None;
            self.state.attempted_finish_without_streak = false;
            tracing::debug!(
                "session finished: {} points, max streak {}",
                self.state.points,
                self.state.max_streak
            );
            return;
        }

        self.state.attempted_finish_without_streak = true;
        self.inject_review_question();
    }

    /// The finish gate: append a fresh question for the head of the pending
    /// review list (or a random bank word) instead of finishing.
    fn inject_review_question(&mut self) {
        let word = self
            .state
            .pending_review
            .first()
            .and_then(|id| self.bank.words.iter().find(|w| &w.id == id))
            .cloned()
            .unwrap_or_else(|| {
                let index = self.rng.pick(self.bank.words.len());
                self.bank.words[index].clone()
            });

        self.state.review_counter += 1;
        let question_id = format!("{}-retry-{}", word.id, self.state.review_counter);
        let question = builder::build_question(
            &word,
            &self.bank.words,
            self.config.choices_per_question,
            self.rng.as_mut(),
            Some(question_id.clone()),
        );
        tracing::debug!("review question {question_id} injected for '{}'", word.word);

        self.state.questions.push(question);
        self.state.pending_review.retain(|id| id != &word.id);
        self.state.selected_option = None;
        self.state.revealed = false;
        self.state.current_index += 1;
        self.state.question_started = Instant::now();
        self.state.finish_guard = Some(format!(
            "Reach a streak of {} to finish. Keep going!",
            self.config.required_streak
        ));
    }

    fn on_restart(&mut self) {
        let questions = builder::build_quiz_questions(
            &self.bank.words,
            self.config.question_count,
            self.config.choices_per_question,
            self.rng.as_mut(),
        );
        self.state = SessionState::new(questions);
        tracing::debug!("session restarted");
    }

    // Read model.

    pub fn config(&self) -> &QuizConfig {
        &self.config
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.state.questions.get(self.state.current_index)
    }

    /// Hint state for the active question (blank if none has been used).
    pub fn current_hint(&self) -> HintState {
        self.current_question()
            .and_then(|q| self.state.hints.get(&q.id))
            .cloned()
            .unwrap_or_default()
    }

    pub fn selected_option(&self) -> Option<&str> {
        self.state.selected_option.as_deref()
    }

    pub fn is_revealed(&self) -> bool {
        self.state.revealed
    }

    pub fn is_finished(&self) -> bool {
        self.state.finished
    }

    pub fn points(&self) -> u32 {
        self.state.points
    }

    pub fn streak(&self) -> u32 {
        self.state.streak
    }

    pub fn max_streak(&self) -> u32 {
        self.state.max_streak
    }

    pub fn current_index(&self) -> usize {
        self.state.current_index
    }

    pub fn total_questions(&self) -> usize {
        self.state.questions.len()
    }

    pub fn responses(&self) -> &[Response] {
        &self.state.responses
    }

    pub fn pending_review_word_ids(&self) -> &[String] {
        &self.state.pending_review
    }

    pub fn finish_guard_message(&self) -> Option<&str> {
        self.state.finish_guard.as_deref()
    }

    pub fn has_met_required_streak(&self) -> bool {
        self.state.max_streak >= self.config.required_streak
    }

    pub fn is_last_question(&self) -> bool {
        !self.state.finished && self.state.current_index + 1 == self.state.questions.len()
    }

    /// Whether the "see summary" call to action applies: on the last
    /// question, once the streak is met or before any finish attempt has
    /// been turned away.
    pub fn should_show_summary_cta(&self) -> bool {
        self.is_last_question()
            && (self.has_met_required_streak() || !self.state.attempted_finish_without_streak)
    }

    /// Percentage of correct answers over submitted answers.
    pub fn accuracy(&self) -> u32 {
        let answered = self.state.responses.len();
        if answered == 0 {
            return 0;
        }
        let correct = self.state.responses.iter().filter(|r| r.is_correct).count();
        ((correct as f64 / answered as f64) * 100.0).round() as u32
    }

    /// Mean seconds per answered question, to one decimal.
    pub fn average_time_seconds(&self) -> f64 {
        if self.state.responses.is_empty() {
            return 0.0;
        }
        let total_ms: u64 = self.state.responses.iter().map(|r| r.time_spent_ms).sum();
        (total_ms as f64 / self.state.responses.len() as f64 / 100.0).round() / 10.0
    }

    /// Total session seconds, frozen at finish, to one decimal.
    pub fn total_time_seconds(&self) -> f64 {
        let elapsed = self
            .state
            .total_elapsed
            .unwrap_or_else(|| self.state.quiz_started.elapsed());
        (elapsed.as_millis() as f64 / 100.0).round() / 10.0
    }

    pub fn total_hints_used(&self) -> u32 {
        self.state
            .responses
            .iter()
            .map(|r| u32::from(r.hints_used))
            .sum()
    }

    /// Letter (A, B, C, …) of the correct option in the active question.
    pub fn correct_answer_letter(&self) -> Option<char> {
        let question = self.current_question()?;
        let index = question.options.iter().position(|o| o.is_correct)?;
        Some((b'A' + index as u8) as char)
    }

    pub fn progress_percent(&self) -> u32 {
        let total = self.state.questions.len();
        if total == 0 {
            return 0;
        }
        (((self.state.current_index + 1) as f64 / total as f64) * 100.0).round() as u32
    }

    /// Aggregate summary of the session so far.
    pub fn summary(&self) -> QuizSummary {
        let answered = self.state.responses.len();
        let correct = self.state.responses.iter().filter(|r| r.is_correct).count();
        QuizSummary {
            total_questions: self.state.questions.len(),
            answered,
            correct,
            accuracy: self.accuracy(),
            points: self.state.points,
            max_streak: self.state.max_streak,
            average_time_seconds: self.average_time_seconds(),
            total_time_seconds: self.total_time_seconds(),
            total_hints_used: self.total_hints_used(),
        }
    }

    /// Full report for persistence or rendering.
    pub fn report(&self) -> QuizReport {
        QuizReport {
            id: uuid::Uuid::new_v4(),
            created_at: chrono::Utc::now(),
            bank: WordBankSummary {
                id: self.bank.id.clone(),
                name: self.bank.name.clone(),
                word_count: self.bank.words.len(),
            },
            config: self.config.clone(),
            summary: self.summary(),
            responses: self.state.responses.to_vec(),
        }
    }
}
