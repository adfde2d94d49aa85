//! The `quizmark init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    write_once(Path::new("quizmark.toml"), SAMPLE_CONFIG)?;

    std::fs::create_dir_all("quizzes")?;
    write_once(Path::new("quizzes/example.toml"), EXAMPLE_QUIZ)?;

    std::fs::create_dir_all("answers")?;
    write_once(Path::new("answers/example.toml"), EXAMPLE_ANSWERS)?;

    println!("\nNext steps:");
    println!("  1. Run: quizmark validate --quiz quizzes/example.toml");
    println!("  2. Run: quizmark grade --quiz quizzes/example.toml --answers answers/example.toml");
    println!("  3. Edit answers/example.toml and grade again");

    Ok(())
}

fn write_once(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, content)?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizmark configuration

default_format = "text"
show_hints = false

# Checkbox partial credit. These are the defaults.
[grading]
penalty_per_wrong = 0.25
max_penalty = 0.5
correct_threshold = 0.999
"#;

const EXAMPLE_QUIZ: &str = r#"[quiz]
id = "example"
name = "Quiz de découverte"
description = "Un exemple avec les trois types de questions"

[[questions]]
id = 1
type = "radio"
points = 1
answer = "Paris"
title = "Quelle est la capitale de la France ?"
reveal = "Paris"

[[questions]]
id = 2
type = "text"
points = 2
answers = "Loire, la Loire"
title = "Quel est le plus long fleuve de France ?"
reveal = "La Loire"

[[questions]]
id = 3
type = "checkbox"
points = 3
answer = ["rouge", "blanc", "bleu"]
title = "Quelles couleurs figurent sur le drapeau français ?"
reveal = "Bleu, blanc, rouge"
"#;

const EXAMPLE_ANSWERS: &str = r#"[answers]
1 = "Paris"
2 = "  la LOIRE "
3 = ["bleu", "rouge", "vert"]
"#;
