//! The `examforge generate` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use examforge_core::answer_key::AnswerKey;
use examforge_core::config::load_config_from;
use examforge_core::model::{ShuffleMode, VersionCount, MAX_VERSIONS};
use examforge_core::parser;
use examforge_core::report::GeneratedExam;
use examforge_core::versions::VersionSet;

pub fn execute(
    bank_path: PathBuf,
    versions: Option<usize>,
    mode: Option<String>,
    output: Option<PathBuf>,
    save: bool,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let mut bank = parser::parse_bank(&bank_path)?;
    bank.settings.fill_from(&config.settings);

    for w in parser::validate_bank(&bank) {
        match &w.question_id {
            Some(id) => tracing::warn!("[{id}] {}", w.message),
            None => tracing::warn!("{}", w.message),
        }
    }

    let count = match versions {
        Some(n) => {
            if !(1..=MAX_VERSIONS).contains(&n) {
                tracing::warn!("--versions {n} is outside 1..={MAX_VERSIONS}, clamping");
            }
            VersionCount::clamped(n)
        }
        None => config.version_count(),
    };

    let mode = match mode {
        Some(m) => m.parse::<ShuffleMode>().context("invalid --mode")?,
        None => config.default_mode,
    };

    let mut set = VersionSet::new();
    set.generate(&bank.questions, count, mode);
    let exam = GeneratedExam::new(&bank, mode, set);

    let output = output.or_else(|| {
        save.then(|| {
            config.output_dir.join(format!(
                "{}-{}.json",
                exam.bank.id,
                exam.created_at.format("%Y%m%d-%H%M%S")
            ))
        })
    });

    if let Some(path) = &output {
        exam.save_json(path)?;
        eprintln!("Generated exam written to {}", path.display());
    }

    match format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&exam)?);
        }
        "markdown" | "md" => {
            println!("{}", exam.to_markdown());
        }
        _ => print_summary(&exam),
    }

    Ok(())
}

fn print_summary(exam: &GeneratedExam) {
    use comfy_table::{Cell, Table};

    println!(
        "{}: {} version(s), shuffling {}",
        exam.bank.name,
        exam.versions.len(),
        exam.shuffle_mode.describe()
    );

    let mut table = Table::new();
    table.set_header(vec!["Version", "Questions", "Points", "Answer key"]);

    for version in &exam.versions {
        let key = AnswerKey::derive(version)
            .map(|k| k.letters())
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            Cell::new(version.code),
            Cell::new(version.questions.len()),
            Cell::new(format!("{:.1}", version.total_points())),
            Cell::new(key),
        ]);
    }

    println!("{table}");

    if !exam.key_eligible() {
        println!("This exam contains essay questions; answer keys are not generated.");
    }
}
