//! Scripted interactive sessions through the `play` command.
//!
//! Stdin scripts drive the quiz loop; correctness of any given answer is
//! random, so assertions stick to output the script forces regardless of
//! the option order.

use assert_cmd::Command;
use predicates::prelude::*;

const BANK: &str = "../../word-banks/english-core.toml";

fn lexitest() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("lexitest").unwrap()
}

#[test]
fn play_aborts_on_eof() {
    lexitest()
        .arg("play")
        .arg("--bank")
        .arg(BANK)
        .arg("--seed")
        .arg("42")
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Question 1/10"))
        .stdout(predicate::str::contains("Quiz aborted"));
}

#[test]
fn play_aborts_on_quit_command() {
    lexitest()
        .arg("play")
        .arg("--bank")
        .arg(BANK)
        .arg("--seed")
        .arg("7")
        .write_stdin("q\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Quiz aborted"));
}

#[test]
fn play_shows_synonym_hint() {
    lexitest()
        .arg("play")
        .arg("--bank")
        .arg(BANK)
        .arg("--seed")
        .arg("3")
        .write_stdin("h\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Hint: similar to"));
}

#[test]
fn play_requires_synonym_before_elimination() {
    lexitest()
        .arg("play")
        .arg("--bank")
        .arg(BANK)
        .arg("--seed")
        .arg("3")
        .write_stdin("e\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Use the synonym hint first"));
}

#[test]
fn play_eliminates_after_synonym() {
    lexitest()
        .arg("play")
        .arg("--bank")
        .arg(BANK)
        .arg("--seed")
        .arg("3")
        .write_stdin("h\ne\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("eliminated"));
}

#[test]
fn play_rejects_unknown_input() {
    lexitest()
        .arg("play")
        .arg("--bank")
        .arg(BANK)
        .arg("--seed")
        .arg("5")
        .write_stdin("xyz\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Answer with a letter"));
}

#[test]
fn play_grades_a_submitted_answer() {
    // Whatever option "a" is, submitting it produces a grade line and a
    // continue prompt before the script quits.
    lexitest()
        .arg("play")
        .arg("--bank")
        .arg(BANK)
        .arg("--seed")
        .arg("11")
        .write_stdin("a\nq\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Correct!").or(predicate::str::contains("Not quite")),
        )
        .stdout(predicate::str::contains("Press Enter for the next question"));
}

#[test]
fn play_moves_to_second_question() {
    lexitest()
        .arg("play")
        .arg("--bank")
        .arg(BANK)
        .arg("--seed")
        .arg("13")
        .write_stdin("a\n\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Question 2/10"));
}

#[test]
fn play_rejects_missing_bank() {
    lexitest()
        .arg("play")
        .arg("--bank")
        .arg("no-such-bank.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}
