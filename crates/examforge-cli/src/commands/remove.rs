//! The `examforge remove` command.

use std::path::PathBuf;

use anyhow::Result;

use examforge_core::report::GeneratedExam;

pub fn execute(
    input: PathBuf,
    version: Option<char>,
    all: bool,
    output: Option<PathBuf>,
) -> Result<()> {
    let mut exam = GeneratedExam::load_json(&input)?;

    if all {
        let count = exam.versions.len();
        exam.clear_versions();
        println!("Removed all {count} version(s).");
    } else if let Some(code) = version {
        let code = code.to_ascii_uppercase();
        let Some(removed) = exam.remove_version(code) else {
            anyhow::bail!("no version {code} in {}", input.display());
        };
        let codes: String = exam.versions.codes().into_iter().collect();
        println!(
            "Removed version {} ({} version(s) left: {})",
            removed.code,
            exam.versions.len(),
            if codes.is_empty() { "-".to_string() } else { codes }
        );
    }

    let path = output.unwrap_or(input);
    exam.save_json(&path)?;
    eprintln!("Generated exam written to {}", path.display());

    Ok(())
}
