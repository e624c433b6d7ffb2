//! The `examforge init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create examforge.toml
    if std::path::Path::new("examforge.toml").exists() {
        println!("examforge.toml already exists, skipping.");
    } else {
        std::fs::write("examforge.toml", SAMPLE_CONFIG)?;
        println!("Created examforge.toml");
    }

    // Create example question bank
    std::fs::create_dir_all("banks")?;
    let example_path = std::path::Path::new("banks/example.toml");
    if example_path.exists() {
        println!("banks/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_BANK)?;
        println!("Created banks/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit examforge.toml with your institution details");
    println!("  2. Run: examforge validate --bank banks/example.toml");
    println!("  3. Run: examforge generate --bank banks/example.toml --versions 4 --output exam.json");
    println!("  4. Run: examforge key --input exam.json");
    println!("  5. Print: examforge generate --bank banks/example.toml --format markdown > exam.md");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# examforge configuration

default_versions = 2
default_mode = "both"   # both, questions, options
output_dir = "./examforge-output"

[settings]
university_name = ""
professor_name = "${USER}"
course = ""
subject = ""
duration = "120 minutes"
logo_url = ""
"#;

const EXAMPLE_BANK: &str = r#"[bank]
id = "example"
name = "Example Exam"
description = "A small all multiple-choice bank to get started"

[bank.settings]
subject = "Mathematics"

[[questions]]
id = "sum"
type = "multiple-choice"
text = "What is $2 + 2$?"
points = 1.0
options = ["2", "4", "6", "8"]
correct_option = 1

[[questions]]
id = "derivative"
type = "multiple-choice"
text = "What is $\\frac{d}{dx} x^2$?"
points = 2.0
options = ["$x$", "$2x$", "$x^2$", "$2$"]
correct_option = 1

[[questions]]
id = "root"
type = "multiple-choice"
text = "Which value satisfies $x^2 = 9$ and $x > 0$?"
points = 1.0
options = ["-3", "3", "9", "81"]
correct_option = 1
"#;
