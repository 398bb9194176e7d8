//! The `lexitest init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    std::fs::create_dir_all("word-banks")?;
    let starter_path = std::path::Path::new("word-banks/starter.toml");
    if starter_path.exists() {
        println!("word-banks/starter.toml already exists, skipping.");
    } else {
        std::fs::write(starter_path, STARTER_BANK)?;
        println!("Created word-banks/starter.toml");
    }

    println!("\nNext steps:");
    println!("  1. Add your own words to word-banks/starter.toml");
    println!("  2. Run: lexitest validate --bank word-banks/starter.toml");
    println!("  3. Run: lexitest play --bank word-banks/starter.toml");

    Ok(())
}

const STARTER_BANK: &str = r#"[word_bank]
id = "starter"
name = "Starter Bank"
description = "A small starter word bank to get going"

[[words]]
id = "ephemeral"
word = "ephemeral"
definition = "lasting for a very short time"
difficulty = "medium"
part_of_speech = "adjective"
synonyms = ["fleeting", "transient", "momentary"]
example = "Fame in the industry tends to be ephemeral."

[[words]]
id = "laconic"
word = "laconic"
definition = "using very few words"
difficulty = "hard"
part_of_speech = "adjective"
synonyms = ["terse", "concise", "brief"]
example = "His laconic reply suggested a lack of interest."

[[words]]
id = "ubiquitous"
word = "ubiquitous"
definition = "present or found everywhere"
difficulty = "medium"
part_of_speech = "adjective"
synonyms = ["omnipresent", "pervasive"]
example = "Smartphones have become ubiquitous in daily life."

[[words]]
id = "candor"
word = "candor"
definition = "the quality of being open and honest"
difficulty = "easy"
part_of_speech = "noun"
synonyms = ["frankness", "openness", "honesty"]
example = "She spoke with surprising candor about her mistakes."

[[words]]
id = "venerate"
word = "venerate"
definition = "to regard with great respect"
difficulty = "hard"
part_of_speech = "verb"
synonyms = ["revere", "esteem", "honor"]
example = "The villagers venerate the shrine's founder."

[[words]]
id = "pragmatic"
word = "pragmatic"
definition = "dealing with things sensibly and realistically"
difficulty = "easy"
part_of_speech = "adjective"
synonyms = ["practical", "sensible", "realistic"]
example = "A pragmatic approach beats wishful thinking here."
"#;
