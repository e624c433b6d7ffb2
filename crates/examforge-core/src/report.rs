//! Generated exam output with JSON persistence and summaries.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::answer_key::{answer_keys, is_key_eligible, AnswerKey};
use crate::error::ExamError;
use crate::model::{ExamSettings, ExamVersion, QuestionBank, ShuffleMode};
use crate::render;
use crate::versions::VersionSet;

/// The result of one generation run, as written to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedExam {
    /// Unique identifier of this generation run.
    pub id: Uuid,
    /// When the versions were generated.
    pub created_at: DateTime<Utc>,
    /// Summary of the source bank.
    pub bank: BankSummary,
    /// Header metadata for printing.
    #[serde(default)]
    pub settings: ExamSettings,
    /// Shuffle mode the versions were built with.
    pub shuffle_mode: ShuffleMode,
    /// The generated versions.
    pub versions: VersionSet,
}

/// Summary of a question bank (without the questions themselves).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankSummary {
    pub id: String,
    pub name: String,
    pub question_count: usize,
    pub total_points: f64,
}

impl BankSummary {
    pub fn of(bank: &QuestionBank) -> Self {
        Self {
            id: bank.id.clone(),
            name: bank.name.clone(),
            question_count: bank.questions.len(),
            total_points: bank.total_points(),
        }
    }
}

impl GeneratedExam {
    pub fn new(bank: &QuestionBank, shuffle_mode: ShuffleMode, versions: VersionSet) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            bank: BankSummary::of(bank),
            settings: bank.settings.clone(),
            shuffle_mode,
            versions,
        }
    }

    /// Whether answer keys can be derived for these versions.
    pub fn key_eligible(&self) -> bool {
        self.versions
            .versions()
            .first()
            .is_some_and(|v| is_key_eligible(&v.questions))
    }

    pub fn answer_keys(&self) -> Result<Vec<AnswerKey>, ExamError> {
        answer_keys(&self.versions)
    }

    /// Save the generated exam as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize exam")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write exam to {}", path.display()))?;
        Ok(())
    }

    /// Load a generated exam from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read exam from {}", path.display()))?;
        let exam: GeneratedExam =
            serde_json::from_str(&content).context("failed to parse exam JSON")?;
        Ok(exam)
    }

    /// Remove the version printed with `code` (case-insensitive). The
    /// remaining versions are relettered.
    pub fn remove_version(&mut self, code: char) -> Option<ExamVersion> {
        let id = self.versions.get(code)?.id;
        self.versions.remove(id)
    }

    /// Drop every version, keeping the bank summary and settings.
    pub fn clear_versions(&mut self) {
        self.versions.clear();
    }

    /// Render the whole run as Markdown: a run header, then each version's
    /// exam sheet followed by its answer-key page.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!("## {}\n\n", self.bank.name));
        if !self.settings.university_name.is_empty() {
            md.push_str(&format!("**Institution:** {}\n\n", self.settings.university_name));
        }
        md.push_str(&format!(
            "**Versions:** {} | **Questions:** {} | **Total points:** {:.1} | **Shuffle:** {}\n\n",
            self.versions.len(),
            self.bank.question_count,
            self.bank.total_points,
            self.shuffle_mode.describe()
        ));

        let eligible = self.key_eligible();
        if !eligible {
            md.push_str("_This exam contains essay questions; no answer key is generated._\n\n");
        }

        for version in &self.versions {
            md.push_str("---\n\n");
            md.push_str(&render::version_sheet(version, &self.settings));
            if eligible {
                if let Some(key) = AnswerKey::derive(version) {
                    md.push_str("\n---\n\n");
                    md.push_str(&render::key_sheet(&key, &self.settings, self.shuffle_mode));
                }
            }
            md.push('\n');
        }

        md
    }
}
