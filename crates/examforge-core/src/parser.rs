//! TOML question bank parser.
//!
//! Loads question banks from TOML files and directories, and lints them for
//! authoring mistakes.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::error::ExamError;
use crate::model::{
    validate_points, Choices, ExamSettings, Question, QuestionBank, QuestionKind, QuestionType,
};

/// Intermediate TOML structure for parsing bank files.
#[derive(Debug, Deserialize)]
struct TomlBankFile {
    bank: TomlBankHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlBankHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    settings: ExamSettings,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    id: String,
    #[serde(rename = "type", default = "default_type")]
    question_type: String,
    text: String,
    #[serde(default = "default_points")]
    points: f64,
    #[serde(default)]
    options: Option<Vec<String>>,
    #[serde(default)]
    correct_option: Option<usize>,
}

fn default_type() -> String {
    "multiple-choice".to_string()
}

fn default_points() -> f64 {
    1.0
}

impl TomlQuestion {
    fn into_question(self) -> Result<Question, ExamError> {
        let points = validate_points(self.points)?;
        let kind = match self.question_type.parse::<QuestionType>()? {
            QuestionType::MultipleChoice => match (self.options, self.correct_option) {
                (Some(options), Some(correct)) => {
                    QuestionKind::MultipleChoice(Choices::new(options, correct)?)
                }
                _ => return Err(ExamError::MissingChoices(self.id)),
            },
            QuestionType::Essay => {
                if self.options.is_some() || self.correct_option.is_some() {
                    tracing::debug!(
                        "essay question {} declares options; they are ignored",
                        self.id
                    );
                }
                QuestionKind::Essay
            }
        };

        Ok(Question {
            id: self.id,
            text: self.text,
            points,
            kind,
        })
    }
}

/// Parse a single TOML file into a `QuestionBank`.
pub fn parse_bank(path: &Path) -> Result<QuestionBank> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read question bank: {}", path.display()))?;

    parse_bank_str(&content, path)
}

/// Parse a TOML string into a `QuestionBank` (useful for testing).
pub fn parse_bank_str(content: &str, source_path: &Path) -> Result<QuestionBank> {
    let parsed: TomlBankFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let questions = parsed
        .questions
        .into_iter()
        .map(|q| {
            let id = q.id.clone();
            q.into_question()
                .with_context(|| format!("invalid question {id} in {}", source_path.display()))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(QuestionBank {
        id: parsed.bank.id,
        name: parsed.bank.name,
        description: parsed.bank.description,
        settings: parsed.bank.settings,
        questions,
    })
}

/// Recursively load all `.toml` question banks from a directory.
pub fn load_bank_directory(dir: &Path) -> Result<Vec<QuestionBank>> {
    let mut banks = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();

        if path.is_dir() {
            banks.extend(load_bank_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_bank(&path) {
                Ok(bank) => banks.push(bank),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(banks)
}

/// A warning from question bank validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question ID (if applicable).
    pub question_id: Option<String>,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    fn question(id: &str, message: impl Into<String>) -> Self {
        Self {
            question_id: Some(id.to_string()),
            message: message.into(),
        }
    }
}

/// Validate a question bank for common authoring issues.
pub fn validate_bank(bank: &QuestionBank) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if bank.questions.is_empty() {
        warnings.push(ValidationWarning {
            question_id: None,
            message: "bank has no questions".into(),
        });
    }

    // Check for duplicate question IDs
    let mut seen_ids = HashSet::new();
    for question in &bank.questions {
        if !seen_ids.insert(&question.id) {
            warnings.push(ValidationWarning::question(
                &question.id,
                format!("duplicate question ID: {}", question.id),
            ));
        }
    }

    for question in &bank.questions {
        if question.text.trim().is_empty() {
            warnings.push(ValidationWarning::question(&question.id, "question text is empty"));
        }

        let Some(options) = question.options() else {
            continue;
        };

        if options.iter().any(|o| o.trim().is_empty()) {
            warnings.push(ValidationWarning::question(&question.id, "an option is empty"));
        }

        // Repeated texts are legal, the key tracks positions, but students
        // cannot tell the options apart.
        let mut seen_texts = HashSet::new();
        if options.iter().any(|o| !seen_texts.insert(o.trim())) {
            warnings.push(ValidationWarning::question(
                &question.id,
                "two options share the same text",
            ));
        }
    }

    warnings
}
