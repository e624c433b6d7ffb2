//! Core data model types for examforge.
//!
//! Questions, question banks, shuffle policies and generated exam versions.
//! A multiple-choice question carries a [`Choices`] value, which can only be
//! built through a validating constructor, so the engine never sees a
//! question whose correct index falls outside its option list.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ExamError;

/// Version codes are single letters, so at most 26 versions exist at once.
pub const MAX_VERSIONS: usize = 26;

/// Options are labelled A..Z as well.
pub const MAX_OPTIONS: usize = 26;

/// Number of versions generated when nothing else is configured.
pub const DEFAULT_VERSIONS: usize = 2;

/// Letter for a zero-based position: `0 -> 'A'`, `1 -> 'B'`, ...
///
/// Used both for version codes and for option labels in answer keys. Both
/// are capped at 26, so callers only ever see `'A'..='Z'`.
pub fn letter_for(index: usize) -> char {
    u32::try_from(index)
        .ok()
        .and_then(|i| ('A' as u32).checked_add(i))
        .and_then(char::from_u32)
        .unwrap_or('?')
}

/// A single exam question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier within the bank.
    pub id: String,
    /// Question statement. May embed LaTeX; never interpreted here.
    pub text: String,
    /// Weight of the question in the final score.
    pub points: f64,
    /// Objective or essay, with the options for objective questions.
    pub kind: QuestionKind,
}

impl Question {
    /// Build a multiple-choice question, validating its options.
    pub fn multiple_choice(
        id: impl Into<String>,
        text: impl Into<String>,
        points: f64,
        options: Vec<String>,
        correct_option: usize,
    ) -> Result<Self, ExamError> {
        Ok(Self {
            id: id.into(),
            text: text.into(),
            points,
            kind: QuestionKind::MultipleChoice(Choices::new(options, correct_option)?),
        })
    }

    /// Build an essay question.
    pub fn essay(id: impl Into<String>, text: impl Into<String>, points: f64) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            points,
            kind: QuestionKind::Essay,
        }
    }

    pub fn question_type(&self) -> QuestionType {
        match self.kind {
            QuestionKind::MultipleChoice(_) => QuestionType::MultipleChoice,
            QuestionKind::Essay => QuestionType::Essay,
        }
    }

    pub fn is_multiple_choice(&self) -> bool {
        matches!(self.kind, QuestionKind::MultipleChoice(_))
    }

    /// The options and correct index, for multiple-choice questions.
    pub fn choices(&self) -> Option<&Choices> {
        match &self.kind {
            QuestionKind::MultipleChoice(choices) => Some(choices),
            QuestionKind::Essay => None,
        }
    }

    pub fn options(&self) -> Option<&[String]> {
        self.choices().map(Choices::options)
    }

    pub fn correct_option(&self) -> Option<usize> {
        self.choices().map(Choices::correct_option)
    }
}

/// The variant-specific part of a question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum QuestionKind {
    MultipleChoice(Choices),
    Essay,
}

/// Option list of a multiple-choice question together with its answer.
///
/// Invariant: at least two options, and `correct_option < options.len()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawChoices")]
pub struct Choices {
    options: Vec<String>,
    correct_option: usize,
}

#[derive(Deserialize)]
struct RawChoices {
    options: Vec<String>,
    correct_option: usize,
}

impl TryFrom<RawChoices> for Choices {
    type Error = ExamError;

    fn try_from(raw: RawChoices) -> Result<Self, Self::Error> {
        Choices::new(raw.options, raw.correct_option)
    }
}

impl Choices {
    pub fn new(options: Vec<String>, correct_option: usize) -> Result<Self, ExamError> {
        if options.len() < 2 {
            return Err(ExamError::TooFewOptions(options.len()));
        }
        if options.len() > MAX_OPTIONS {
            return Err(ExamError::TooManyOptions(options.len()));
        }
        if correct_option >= options.len() {
            return Err(ExamError::CorrectOptionOutOfRange {
                index: correct_option,
                len: options.len(),
            });
        }
        Ok(Self {
            options,
            correct_option,
        })
    }

    /// Rebuild from a permutation of a valid `Choices`. The caller guarantees
    /// the invariant still holds.
    pub(crate) fn from_permuted(options: Vec<String>, correct_option: usize) -> Self {
        debug_assert!(options.len() >= 2 && correct_option < options.len());
        Self {
            options,
            correct_option,
        }
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn correct_option(&self) -> usize {
        self.correct_option
    }

    /// Text of the correct option.
    pub fn correct_text(&self) -> &str {
        &self.options[self.correct_option]
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Never true for a validated value.
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

/// Accept `points` only when finite and non-negative.
pub fn validate_points(points: f64) -> Result<f64, ExamError> {
    if points.is_finite() && points >= 0.0 {
        Ok(points)
    } else {
        Err(ExamError::InvalidPoints(points))
    }
}

/// Tag naming the kind of a question, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    MultipleChoice,
    Essay,
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionType::MultipleChoice => write!(f, "multiple-choice"),
            QuestionType::Essay => write!(f, "essay"),
        }
    }
}

impl FromStr for QuestionType {
    type Err = ExamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "multiple-choice" | "multiple_choice" | "mc" => Ok(QuestionType::MultipleChoice),
            "essay" => Ok(QuestionType::Essay),
            other => Err(ExamError::UnknownQuestionType(other.to_string())),
        }
    }
}

/// The shuffle choices offered to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ShuffleMode {
    /// Shuffle question order and option order.
    #[default]
    #[serde(rename = "both")]
    Both,
    /// Shuffle question order only.
    #[serde(rename = "questions")]
    QuestionsOnly,
    /// Shuffle option order only.
    #[serde(rename = "options")]
    OptionsOnly,
}

impl ShuffleMode {
    pub fn policy(self) -> ShufflePolicy {
        ShufflePolicy::from(self)
    }

    /// Human-readable description used in summaries.
    pub fn describe(self) -> &'static str {
        match self {
            ShuffleMode::Both => "questions and options",
            ShuffleMode::QuestionsOnly => "questions only",
            ShuffleMode::OptionsOnly => "options only",
        }
    }
}

impl fmt::Display for ShuffleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShuffleMode::Both => write!(f, "both"),
            ShuffleMode::QuestionsOnly => write!(f, "questions"),
            ShuffleMode::OptionsOnly => write!(f, "options"),
        }
    }
}

impl FromStr for ShuffleMode {
    type Err = ExamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "both" | "all" => Ok(ShuffleMode::Both),
            "questions" | "questions-only" => Ok(ShuffleMode::QuestionsOnly),
            "options" | "options-only" => Ok(ShuffleMode::OptionsOnly),
            other => Err(ExamError::UnknownShuffleMode(other.to_string())),
        }
    }
}

/// What the version builder permutes. Unlike [`ShuffleMode`], "neither" is
/// representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ShufflePolicy {
    pub shuffle_questions: bool,
    pub shuffle_options: bool,
}

impl ShufflePolicy {
    /// Copy the bank as-is.
    pub const NONE: ShufflePolicy = ShufflePolicy {
        shuffle_questions: false,
        shuffle_options: false,
    };
}

impl From<ShuffleMode> for ShufflePolicy {
    fn from(mode: ShuffleMode) -> Self {
        match mode {
            ShuffleMode::Both => ShufflePolicy {
                shuffle_questions: true,
                shuffle_options: true,
            },
            ShuffleMode::QuestionsOnly => ShufflePolicy {
                shuffle_questions: true,
                shuffle_options: false,
            },
            ShuffleMode::OptionsOnly => ShufflePolicy {
                shuffle_questions: false,
                shuffle_options: true,
            },
        }
    }
}

/// Number of versions to generate, always within `1..=26`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VersionCount(usize);

impl VersionCount {
    pub fn new(count: usize) -> Result<Self, ExamError> {
        if (1..=MAX_VERSIONS).contains(&count) {
            Ok(Self(count))
        } else {
            Err(ExamError::VersionCountOutOfRange(count))
        }
    }

    /// Clamp any requested count into range.
    pub fn clamped(count: usize) -> Self {
        Self(count.clamp(1, MAX_VERSIONS))
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for VersionCount {
    fn default() -> Self {
        Self(DEFAULT_VERSIONS)
    }
}

impl fmt::Display for VersionCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One generated variant of the exam.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamVersion {
    /// Unique per generation.
    pub id: Uuid,
    /// Letter derived from the version's position in its set.
    pub code: char,
    /// Owned copies of the processed questions.
    pub questions: Vec<Question>,
}

impl ExamVersion {
    pub fn total_points(&self) -> f64 {
        self.questions.iter().map(|q| q.points).sum()
    }
}

/// Header metadata printed on each exam. Never affects generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamSettings {
    #[serde(default)]
    pub professor_name: String,
    #[serde(default)]
    pub university_name: String,
    #[serde(default)]
    pub course: String,
    #[serde(default)]
    pub subject: String,
    /// Exam date, free-form (usually `YYYY-MM-DD`).
    #[serde(default)]
    pub date: String,
    #[serde(default = "default_duration")]
    pub duration: String,
    #[serde(default)]
    pub logo_url: String,
}

fn default_duration() -> String {
    "120 minutes".to_string()
}

impl Default for ExamSettings {
    fn default() -> Self {
        Self {
            professor_name: String::new(),
            university_name: String::new(),
            course: String::new(),
            subject: String::new(),
            date: String::new(),
            duration: default_duration(),
            logo_url: String::new(),
        }
    }
}

impl ExamSettings {
    /// Fill every empty field from `fallback`.
    pub fn fill_from(&mut self, fallback: &ExamSettings) {
        let fields = [
            (&mut self.professor_name, &fallback.professor_name),
            (&mut self.university_name, &fallback.university_name),
            (&mut self.course, &fallback.course),
            (&mut self.subject, &fallback.subject),
            (&mut self.date, &fallback.date),
            (&mut self.duration, &fallback.duration),
            (&mut self.logo_url, &fallback.logo_url),
        ];
        for (field, value) in fields {
            if field.trim().is_empty() {
                field.clone_from(value);
            }
        }
    }
}

/// An ordered bank of questions plus exam metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionBank {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub settings: ExamSettings,
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl QuestionBank {
    pub fn total_points(&self) -> f64 {
        self.questions.iter().map(|q| q.points).sum()
    }

    pub fn multiple_choice_count(&self) -> usize {
        self.questions.iter().filter(|q| q.is_multiple_choice()).count()
    }
}
