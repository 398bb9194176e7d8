//! The `lexitest play` command: an interactive quiz session.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use comfy_table::Table;

use lexitest_core::engine::{QuizConfig, QuizEngine};
use lexitest_core::model::Question;
use lexitest_core::parser;
use lexitest_core::results::HintStep;
use lexitest_core::traits::{RandomSource, SeededRandom, ThreadRandom};

pub fn execute(
    bank_path: PathBuf,
    count: usize,
    choices: usize,
    required_streak: u32,
    seed: Option<u64>,
    output: Option<PathBuf>,
) -> Result<()> {
    let bank = parser::parse_word_bank(&bank_path)?;
    let warnings = parser::validate_word_bank(&bank);
    if !warnings.is_empty() {
        tracing::warn!(
            "word bank '{}' has {} validation warning(s); run `lexitest validate` for details",
            bank.id,
            warnings.len()
        );
    }

    let rng: Box<dyn RandomSource> = match seed {
        Some(seed) => Box::new(SeededRandom::new(seed)),
        None => Box::new(ThreadRandom),
    };
    let config = QuizConfig {
        question_count: count,
        choices_per_question: choices,
        required_streak,
        ..QuizConfig::default()
    };
    let bank_name = bank.name.clone();
    let mut engine = QuizEngine::new(bank, config, rng)?;

    println!("{bank_name} — reach a streak of {required_streak} correct answers to finish.");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut aborted = false;

    'session: while !engine.is_finished() {
        let Some(question) = engine.current_question().cloned() else {
            break;
        };
        render_question(&engine, &question);

        // Answer phase: loop until a submission lands or the player quits.
        loop {
            print!("> ");
            io::stdout().flush()?;
            let Some(line) = read_line(&mut lines) else {
                aborted = true;
                break 'session;
            };
            let input = line.trim().to_lowercase();
            match input.as_str() {
                "q" => {
                    aborted = true;
                    break 'session;
                }
                "h" => match engine_reveal_synonym(&mut engine) {
                    Some(synonym) => println!("Hint: similar to \"{synonym}\""),
                    None => println!("No synonyms are available for this word."),
                },
                "e" => handle_eliminate(&mut engine, &question),
                _ => {
                    let Some(index) = parse_letter(&input, question.options.len()) else {
                        println!(
                            "Answer with a letter, h for a hint, e to eliminate, q to quit."
                        );
                        continue;
                    };
                    let option_id = question.options[index].id.clone();
                    engine.select_option(&option_id);
                    if engine.selected_option() != Some(option_id.as_str()) {
                        println!("That option was eliminated. Pick another one.");
                        continue;
                    }
                    engine.submit_answer();
                    if engine.is_revealed() {
                        break;
                    }
                }
            }
        }

        render_grade(&engine, &question);

        print!("\nPress Enter for the next question (q to quit) ");
        io::stdout().flush()?;
        match read_line(&mut lines) {
            None => {
                aborted = true;
                break;
            }
            Some(line) if line.trim().eq_ignore_ascii_case("q") => {
                aborted = true;
                break;
            }
            Some(_) => {}
        }

        engine.advance();
        if let Some(message) = engine.finish_guard_message() {
            println!("\n{message}");
        }
    }

    if engine.is_finished() {
        render_summary(&engine);
        if let Some(path) = output {
            engine.report().save_json(&path)?;
            println!("Report saved to {}", path.display());
        }
    } else if aborted {
        println!("\nQuiz aborted — no report saved.");
    }

    Ok(())
}

fn read_line(lines: &mut impl Iterator<Item = io::Result<String>>) -> Option<String> {
    lines.next().and_then(|line| line.ok())
}

/// Map "a"/"b"/… to an option index, bounds-checked.
fn parse_letter(input: &str, option_count: usize) -> Option<usize> {
    let mut chars = input.chars();
    let letter = chars.next()?;
    if chars.next().is_some() || !letter.is_ascii_lowercase() {
        return None;
    }
    let index = (letter as u8 - b'a') as usize;
    (index < option_count).then_some(index)
}

fn engine_reveal_synonym(engine: &mut QuizEngine) -> Option<String> {
    engine.reveal_synonym_hint();
    engine.current_hint().revealed_synonym
}

fn handle_eliminate(engine: &mut QuizEngine, question: &Question) {
    let before = engine.current_hint();
    engine.eliminate_option_hint();
    let after = engine.current_hint();

    if after.eliminated_option_id != before.eliminated_option_id {
        if let Some(eliminated) = &after.eliminated_option_id {
            if let Some(index) = question.options.iter().position(|o| &o.id == eliminated) {
                println!("Option {} eliminated.", (b'A' + index as u8) as char);
            }
        }
    } else if before.step < HintStep::SynonymRevealed {
        println!("Use the synonym hint first (h).");
    } else {
        println!("No option could be eliminated.");
    }
}

fn render_question(engine: &QuizEngine, question: &Question) {
    println!(
        "\nQuestion {}/{} — {} points, streak {}",
        engine.current_index() + 1,
        engine.total_questions(),
        engine.points(),
        engine.streak()
    );

    match &question.word.part_of_speech {
        Some(pos) => println!("What is the meaning of \"{}\" ({pos})?", question.word.word),
        None => println!("What is the meaning of \"{}\"?", question.word.word),
    }

    let hint = engine.current_hint();
    for (index, option) in question.options.iter().enumerate() {
        let eliminated = hint.eliminated_option_id.as_deref() == Some(option.id.as_str());
        let marker = if eliminated { " (eliminated)" } else { "" };
        println!("  {}. {}{marker}", (b'A' + index as u8) as char, option.label);
    }
    if let Some(synonym) = &hint.revealed_synonym {
        println!("  Hint: similar to \"{synonym}\"");
    }
}

fn render_grade(engine: &QuizEngine, question: &Question) {
    let Some(response) = engine
        .responses()
        .iter()
        .find(|r| r.question_id == question.id)
    else {
        return;
    };

    if response.is_correct {
        println!(
            "Correct! +{} points (streak {})",
            response.points_delta, response.streak_after
        );
    } else {
        let letter = engine
            .correct_answer_letter()
            .map(|l| format!(" ({l})"))
            .unwrap_or_default();
        println!(
            "Not quite — the answer was \"{}\"{letter}. {} points.",
            response.correct_definition, response.points_delta
        );
    }
    if let Some(example) = &question.word.example {
        println!("Example: {example}");
    }
}

fn hint_label(hints_used: u8) -> &'static str {
    match hints_used {
        1 => HintStep::SynonymRevealed.label(),
        2 => HintStep::OptionEliminated.label(),
        _ => HintStep::NoHint.label(),
    }
}

fn render_summary(engine: &QuizEngine) {
    let summary = engine.summary();

    println!("\nTest summary");
    println!(
        "You answered {} out of {} correctly ({}% accuracy).",
        summary.correct, summary.answered, summary.accuracy
    );

    let mut table = Table::new();
    table.set_header(vec![
        "Points",
        "Accuracy",
        "Avg. time",
        "Max streak",
        "Total time",
        "Hints used",
    ]);
    table.add_row(vec![
        summary.points.to_string(),
        format!("{}%", summary.accuracy),
        format!("{}s", summary.average_time_seconds),
        summary.max_streak.to_string(),
        format!("{}s", summary.total_time_seconds),
        summary.total_hints_used.to_string(),
    ]);
    println!("{table}");

    for response in engine.responses() {
        let status = if response.is_correct { "Correct" } else { "Reviewed" };
        let points = if response.points_delta > 0 {
            format!("+{}", response.points_delta)
        } else {
            response.points_delta.to_string()
        };
        println!(
            "  {} — {status} ({points} points, {})",
            response.word,
            hint_label(response.hints_used)
        );
        println!("      correct meaning: {}", response.correct_definition);
        if !response.is_correct {
            println!("      your choice: {}", response.selected_definition);
        }
    }
}
