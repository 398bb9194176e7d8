//! TOML word-bank parser.
//!
//! Loads word banks from TOML files and directories, and validates them.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{Difficulty, VocabWord, WordBank};

/// Intermediate TOML structure for parsing word-bank files.
#[derive(Debug, Deserialize)]
struct TomlBankFile {
    word_bank: TomlBankHeader,
    #[serde(default)]
    words: Vec<TomlWord>,
}

#[derive(Debug, Deserialize)]
struct TomlBankHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct TomlWord {
    id: String,
    word: String,
    definition: String,
    #[serde(default)]
    difficulty: Option<String>,
    #[serde(default)]
    part_of_speech: Option<String>,
    #[serde(default)]
    synonyms: Vec<String>,
    #[serde(default)]
    example: Option<String>,
}

/// Parse a single TOML file into a `WordBank`.
pub fn parse_word_bank(path: &Path) -> Result<WordBank> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read word bank file: {}", path.display()))?;

    parse_word_bank_str(&content, path)
}

/// Parse a TOML string into a `WordBank` (useful for testing).
pub fn parse_word_bank_str(content: &str, source_path: &Path) -> Result<WordBank> {
    let parsed: TomlBankFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let words = parsed
        .words
        .into_iter()
        .map(|w| {
            let difficulty = w
                .difficulty
                .map(|d| {
                    d.parse::<Difficulty>()
                        .map_err(|e| anyhow::anyhow!("word '{}': {}", w.id, e))
                })
                .transpose()?;

            Ok(VocabWord {
                id: w.id,
                word: w.word,
                definition: w.definition,
                difficulty,
                part_of_speech: w.part_of_speech,
                synonyms: w.synonyms,
                example: w.example,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(WordBank {
        id: parsed.word_bank.id,
        name: parsed.word_bank.name,
        description: parsed.word_bank.description,
        words,
    })
}

/// Recursively load all `.toml` word-bank files from a directory.
pub fn load_bank_directory(dir: &Path) -> Result<Vec<WordBank>> {
    let mut banks = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            banks.extend(load_bank_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_word_bank(&path) {
                Ok(bank) => banks.push(bank),
                Err(e) => {
                    tracing::warn!("skipping {}: {}", path.display(), e);
                }
            }
        }
    }

    Ok(banks)
}

/// A warning from word-bank validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The word ID (if applicable).
    pub word_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a word bank for common issues.
pub fn validate_word_bank(bank: &WordBank) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    // Check for duplicate word IDs
    let mut seen_ids = std::collections::HashSet::new();
    for word in &bank.words {
        if !seen_ids.insert(&word.id) {
            warnings.push(ValidationWarning {
                word_id: Some(word.id.clone()),
                message: format!("duplicate word ID: {}", word.id),
            });
        }
    }

    // Check for empty word or definition text
    for word in &bank.words {
        if word.word.trim().is_empty() {
            warnings.push(ValidationWarning {
                word_id: Some(word.id.clone()),
                message: "word text is empty".into(),
            });
        }
        if word.definition.trim().is_empty() {
            warnings.push(ValidationWarning {
                word_id: Some(word.id.clone()),
                message: "definition is empty".into(),
            });
        }
    }

    // Duplicate definitions make distractors indistinguishable from the
    // correct option.
    let mut seen_definitions = std::collections::HashMap::new();
    for word in &bank.words {
        if let Some(first) = seen_definitions.insert(word.definition.trim(), &word.id) {
            warnings.push(ValidationWarning {
                word_id: Some(word.id.clone()),
                message: format!("definition duplicates word '{first}'"),
            });
        }
    }

    // The synonym hint is unavailable for words without synonyms
    for word in &bank.words {
        if word.synonyms.is_empty() {
            warnings.push(ValidationWarning {
                word_id: Some(word.id.clone()),
                message: "no synonyms; the synonym hint will be unavailable".into(),
            });
        }
    }

    if bank.words.len() < 2 {
        warnings.push(ValidationWarning {
            word_id: None,
            message: "bank has fewer than 2 words; questions will have no distractors".into(),
        });
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const VALID_TOML: &str = r#"
[word_bank]
id = "test-bank"
name = "Test Bank"
description = "A test word bank"

[[words]]
id = "ephemeral"
word = "ephemeral"
definition = "lasting for a very short time"
difficulty = "medium"
part_of_speech = "adjective"
synonyms = ["fleeting", "transient"]
example = "The ephemeral beauty of a sunset."

[[words]]
id = "laconic"
word = "laconic"
definition = "using very few words"
difficulty = "hard"
synonyms = ["terse", "brief"]
"#;

    #[test]
    fn parse_valid_toml() {
        let bank = parse_word_bank_str(VALID_TOML, &PathBuf::from("test.toml")).unwrap();
        assert_eq!(bank.id, "test-bank");
        assert_eq!(bank.name, "Test Bank");
        assert_eq!(bank.words.len(), 2);
        assert_eq!(bank.words[0].difficulty, Some(Difficulty::Medium));
        assert_eq!(bank.words[0].synonyms, vec!["fleeting", "transient"]);
        assert!(bank.words[1].example.is_none());
    }

    #[test]
    fn parse_missing_optional_fields() {
        let toml = r#"
[word_bank]
id = "minimal"
name = "Minimal"

[[words]]
id = "word1"
word = "word1"
definition = "a definition"
"#;
        let bank = parse_word_bank_str(toml, &PathBuf::from("test.toml")).unwrap();
        assert_eq!(bank.description, "");
        assert!(bank.words[0].difficulty.is_none());
        assert!(bank.words[0].synonyms.is_empty());
    }

    #[test]
    fn parse_rejects_unknown_difficulty() {
        let toml = r#"
[word_bank]
id = "bad"
name = "Bad"

[[words]]
id = "word1"
word = "word1"
definition = "a definition"
difficulty = "legendary"
"#;
        let result = parse_word_bank_str(toml, &PathBuf::from("test.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn parse_malformed_toml() {
        let bad = "this is not [valid toml }{";
        let result = parse_word_bank_str(bad, &PathBuf::from("bad.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn validate_duplicate_ids() {
        let toml = r#"
[word_bank]
id = "dupes"
name = "Dupes"

[[words]]
id = "same"
word = "first"
definition = "first definition"
synonyms = ["one"]

[[words]]
id = "same"
word = "second"
definition = "second definition"
synonyms = ["two"]
"#;
        let bank = parse_word_bank_str(toml, &PathBuf::from("test.toml")).unwrap();
        let warnings = validate_word_bank(&bank);
        assert!(warnings.iter().any(|w| w.message.contains("duplicate word ID")));
    }

    #[test]
    fn validate_duplicate_definitions_and_missing_synonyms() {
        let toml = r#"
[word_bank]
id = "sloppy"
name = "Sloppy"

[[words]]
id = "w1"
word = "first"
definition = "shared definition"
synonyms = ["one"]

[[words]]
id = "w2"
word = "second"
definition = "shared definition"
"#;
        let bank = parse_word_bank_str(toml, &PathBuf::from("test.toml")).unwrap();
        let warnings = validate_word_bank(&bank);
        assert!(warnings.iter().any(|w| w.message.contains("duplicates word 'w1'")));
        assert!(warnings
            .iter()
            .any(|w| w.word_id.as_deref() == Some("w2") && w.message.contains("no synonyms")));
    }

    #[test]
    fn validate_tiny_bank() {
        let toml = r#"
[word_bank]
id = "tiny"
name = "Tiny"

[[words]]
id = "only"
word = "only"
definition = "the one and only"
synonyms = ["sole"]
"#;
        let bank = parse_word_bank_str(toml, &PathBuf::from("test.toml")).unwrap();
        let warnings = validate_word_bank(&bank);
        assert!(warnings.iter().any(|w| w.message.contains("no distractors")));
    }

    #[test]
    fn load_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("test.toml");
        std::fs::write(&file_path, VALID_TOML).unwrap();

        let banks = load_bank_directory(dir.path()).unwrap();
        assert_eq!(banks.len(), 1);
        assert_eq!(banks[0].id, "test-bank");
    }
}
