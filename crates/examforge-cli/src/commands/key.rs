//! The `examforge key` command.

use std::path::PathBuf;

use anyhow::Result;

use examforge_core::render;
use examforge_core::report::GeneratedExam;

pub fn execute(input: PathBuf, version: Option<char>, format: String) -> Result<()> {
    let exam = GeneratedExam::load_json(&input)?;

    let mut keys = exam.answer_keys()?;
    if let Some(code) = version {
        let code = code.to_ascii_uppercase();
        keys.retain(|k| k.version_code == code);
        anyhow::ensure!(!keys.is_empty(), "no version {code} in {}", input.display());
    }

    match format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&keys)?);
        }
        "markdown" | "md" => {
            for key in &keys {
                println!(
                    "{}",
                    render::key_sheet(key, &exam.settings, exam.shuffle_mode)
                );
            }
        }
        _ => {
            use comfy_table::{Cell, Table};

            for key in &keys {
                println!("Answer key, version {}", key.version_code);

                let mut table = Table::new();
                table.set_header(vec!["#", "Answer"]);
                for entry in &key.entries {
                    table.add_row(vec![Cell::new(entry.position), Cell::new(entry.letter)]);
                }
                println!("{table}");

                let stats = key.statistics();
                let distribution: Vec<String> = stats
                    .letter_distribution
                    .iter()
                    .map(|(letter, n)| format!("{letter}={n}"))
                    .collect();
                println!(
                    "{} questions, {:.1} points, distribution {}\n",
                    stats.question_count,
                    stats.total_points,
                    distribution.join(" ")
                );
            }
        }
    }

    Ok(())
}
