//! The `lexitest validate` command.

use std::path::PathBuf;

use anyhow::Result;

pub fn execute(bank_path: PathBuf) -> Result<()> {
    let banks = if bank_path.is_dir() {
        lexitest_core::parser::load_bank_directory(&bank_path)?
    } else {
        vec![lexitest_core::parser::parse_word_bank(&bank_path)?]
    };

    let mut total_warnings = 0;

    for bank in &banks {
        println!("Word bank: {} ({} words)", bank.name, bank.words.len());

        let warnings = lexitest_core::parser::validate_word_bank(bank);
        for w in &warnings {
            let prefix = w
                .word_id
                .as_ref()
                .map(|id| format!("  [{id}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All word banks valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
