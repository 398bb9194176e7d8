//! The `lexitest report` command.

use std::path::PathBuf;

use anyhow::Result;

use lexitest_core::report::QuizReport;

pub fn execute(file: PathBuf, format: String) -> Result<()> {
    let report = QuizReport::load_json(&file)?;

    match format.as_str() {
        "markdown" | "md" => {
            println!("{}", report.to_markdown());
        }
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => {
            // text format
            println!(
                "Quiz on '{}' ({} words) — {}",
                report.bank.name,
                report.bank.word_count,
                report.created_at.format("%Y-%m-%d %H:%M UTC")
            );
            println!(
                "{} / {} correct ({}%), {} points, max streak {}",
                report.summary.correct,
                report.summary.answered,
                report.summary.accuracy,
                report.summary.points,
                report.summary.max_streak
            );
            println!(
                "Total time {}s, avg {}s per question, {} hint(s) used",
                report.summary.total_time_seconds,
                report.summary.average_time_seconds,
                report.summary.total_hints_used
            );

            if !report.responses.is_empty() {
                println!("\nResponses:");
                for r in &report.responses {
                    let status = if r.is_correct { "correct" } else { "missed" };
                    println!(
                        "  {} — {status} ({:+} points, {} hints)",
                        r.word, r.points_delta, r.hints_used
                    );
                }
            }
        }
    }

    Ok(())
}
