//! The `examforge validate` command.

use std::path::PathBuf;

use anyhow::Result;

use examforge_core::answer_key::is_key_eligible;
use examforge_core::parser;

pub fn execute(bank_path: PathBuf) -> Result<()> {
    let banks = if bank_path.is_dir() {
        parser::load_bank_directory(&bank_path)?
    } else {
        vec![parser::parse_bank(&bank_path)?]
    };

    let mut total_warnings = 0;

    for bank in &banks {
        println!(
            "Question bank: {} ({} questions, {} multiple-choice, {:.1} points)",
            bank.name,
            bank.questions.len(),
            bank.multiple_choice_count(),
            bank.total_points()
        );
        if !is_key_eligible(&bank.questions) {
            println!("  note: answer keys are only generated for all multiple-choice banks");
        }

        let warnings = parser::validate_bank(bank);
        for w in &warnings {
            let prefix = w
                .question_id
                .as_ref()
                .map(|id| format!("  [{id}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All question banks valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
