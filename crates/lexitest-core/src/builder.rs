//! Question building.
//!
//! Turns word-bank entries into multiple-choice questions: one correct
//! option from the prompt word's definition plus distractors drawn from
//! other words, all shuffled through the injected random source.

use crate::model::{Question, QuestionOption, VocabWord};
use crate::traits::RandomSource;

/// Shuffle a slice in place with an unbiased Fisher–Yates permutation.
pub fn shuffle<T>(items: &mut [T], rng: &mut dyn RandomSource) {
    for i in (1..items.len()).rev() {
        let j = rng.pick(i + 1);
        items.swap(i, j);
    }
}

/// Build one question for `word`.
///
/// Draws `choices - 1` distractors from a uniform random permutation of
/// `bank` excluding `word` (all available candidates if the bank is
/// smaller), shuffles the full option set, and assigns `id_override` as
/// the question id when given, else `word.id`.
pub fn build_question(
    word: &VocabWord,
    bank: &[VocabWord],
    choices: usize,
    rng: &mut dyn RandomSource,
    id_override: Option<String>,
) -> Question {
    let mut pool: Vec<&VocabWord> = bank.iter().filter(|c| c.id != word.id).collect();
    shuffle(&mut pool, rng);

    let mut options: Vec<QuestionOption> = vec![QuestionOption {
        id: format!("{}-correct", word.id),
        label: word.definition.clone(),
        is_correct: true,
        source_word_id: word.id.clone(),
    }];

    options.extend(
        pool.iter()
            .take(choices.saturating_sub(1))
            .enumerate()
            .map(|(index, distractor)| QuestionOption {
                id: format!("{}-distractor-{index}", word.id),
                label: distractor.definition.clone(),
                is_correct: false,
                source_word_id: distractor.id.clone(),
            }),
    );

    shuffle(&mut options, rng);

    Question {
        id: id_override.unwrap_or_else(|| word.id.clone()),
        word: word.clone(),
        options,
    }
}

/// Build the initial question batch: a uniform random permutation of the
/// bank, truncated to `count`, one question per word.
///
/// No word appears twice, and each question's id equals its word's id.
pub fn build_quiz_questions(
    bank: &[VocabWord],
    count: usize,
    choices: usize,
    rng: &mut dyn RandomSource,
) -> Vec<Question> {
    let mut order: Vec<&VocabWord> = bank.iter().collect();
    shuffle(&mut order, rng);
    order
        .into_iter()
        .take(count.min(bank.len()))
        .map(|word| build_question(word, bank, choices, rng, None))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{SeededRandom, StubRandom};
    use std::collections::HashSet;

    fn make_bank(n: usize) -> Vec<VocabWord> {
        (0..n)
            .map(|i| VocabWord {
                id: format!("w{i}"),
                word: format!("word-{i}"),
                definition: format!("definition {i}"),
                difficulty: None,
                part_of_speech: None,
                synonyms: vec![format!("synonym-{i}")],
                example: None,
            })
            .collect()
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut rng = SeededRandom::new(7);
        let mut items: Vec<u32> = (0..50).collect();
        shuffle(&mut items, &mut rng);

        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..50).collect::<Vec<u32>>());
    }

    #[test]
    fn shuffle_handles_degenerate_lengths() {
        let mut rng = StubRandom::fixed(0);
        let mut empty: Vec<u32> = vec![];
        shuffle(&mut empty, &mut rng);
        assert!(empty.is_empty());

        let mut single = vec![1];
        shuffle(&mut single, &mut rng);
        assert_eq!(single, vec![1]);
    }

    #[test]
    fn question_has_exactly_one_correct_option() {
        let bank = make_bank(8);
        let mut rng = SeededRandom::new(3);
        let question = build_question(&bank[0], &bank, 4, &mut rng, None);

        let correct: Vec<_> = question.options.iter().filter(|o| o.is_correct).collect();
        assert_eq!(correct.len(), 1);
        assert_eq!(correct[0].source_word_id, "w0");
        assert_eq!(correct[0].label, "definition 0");
    }

    #[test]
    fn distractor_sources_are_distinct_and_exclude_prompt() {
        let bank = make_bank(10);
        let mut rng = SeededRandom::new(11);
        let question = build_question(&bank[3], &bank, 4, &mut rng, None);

        assert_eq!(question.options.len(), 4);
        let sources: HashSet<&str> = question
            .options
            .iter()
            .filter(|o| !o.is_correct)
            .map(|o| o.source_word_id.as_str())
            .collect();
        assert_eq!(sources.len(), 3);
        assert!(!sources.contains("w3"));
    }

    #[test]
    fn option_ids_are_unique_within_question() {
        let bank = make_bank(6);
        let mut rng = SeededRandom::new(5);
        let question = build_question(&bank[1], &bank, 4, &mut rng, None);

        let ids: HashSet<&str> = question.options.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids.len(), question.options.len());
    }

    #[test]
    fn small_bank_degrades_to_fewer_distractors() {
        let bank = make_bank(2);
        let mut rng = SeededRandom::new(1);
        let question = build_question(&bank[0], &bank, 4, &mut rng, None);

        // Only one other word exists, so one distractor.
        assert_eq!(question.options.len(), 2);
        assert_eq!(
            question.options.iter().filter(|o| o.is_correct).count(),
            1
        );
    }

    #[test]
    fn id_override_replaces_word_id() {
        let bank = make_bank(4);
        let mut rng = SeededRandom::new(2);
        let question =
            build_question(&bank[0], &bank, 4, &mut rng, Some("w0-retry-1".into()));
        assert_eq!(question.id, "w0-retry-1");
        assert_eq!(question.word.id, "w0");
    }

    #[test]
    fn batch_words_are_pairwise_distinct() {
        let bank = make_bank(15);
        let mut rng = SeededRandom::new(9);
        let questions = build_quiz_questions(&bank, 10, 4, &mut rng);

        assert_eq!(questions.len(), 10);
        let word_ids: HashSet<&str> = questions.iter().map(|q| q.word.id.as_str()).collect();
        assert_eq!(word_ids.len(), 10);
        for q in &questions {
            assert_eq!(q.id, q.word.id);
        }
    }

    #[test]
    fn batch_is_capped_at_bank_size() {
        let bank = make_bank(4);
        let mut rng = SeededRandom::new(13);
        let questions = build_quiz_questions(&bank, 10, 4, &mut rng);
        assert_eq!(questions.len(), 4);
    }
}
