//! Error types for the generation engine.
//!
//! The engine itself is total once its inputs are valid. These errors are
//! raised at the boundary, where banks are loaded and counts are chosen, so
//! that malformed input never reaches the shuffling code.

use thiserror::Error;

use crate::model::{MAX_OPTIONS, MAX_VERSIONS};

/// Errors raised while building or validating generation inputs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExamError {
    /// A multiple-choice question needs at least two options.
    #[error("multiple-choice question needs at least 2 options, got {0}")]
    TooFewOptions(usize),

    /// Option letters run A..Z, so a question has at most 26 options.
    #[error("multiple-choice question allows at most {MAX_OPTIONS} options, got {0}")]
    TooManyOptions(usize),

    /// The correct option index does not point into the option list.
    #[error("correct option {index} is out of range for {len} options")]
    CorrectOptionOutOfRange { index: usize, len: usize },

    /// A multiple-choice question was declared without options or a correct index.
    #[error("question {0} is multiple-choice but has no options or correct_option")]
    MissingChoices(String),

    /// Points must be a finite, non-negative number.
    #[error("points must be a non-negative number, got {0}")]
    InvalidPoints(f64),

    /// The question `type` tag was not recognised.
    #[error("unknown question type: {0}")]
    UnknownQuestionType(String),

    /// The shuffle mode name was not recognised.
    #[error("unknown shuffle mode: {0} (expected both, questions or options)")]
    UnknownShuffleMode(String),

    /// Version count outside `1..=26`.
    #[error("version count must be between 1 and {MAX_VERSIONS}, got {0}")]
    VersionCountOutOfRange(usize),

    /// An answer key was requested for questions that are not all multiple-choice.
    #[error("answer key unavailable: exam contains essay questions or no questions")]
    AnswerKeyUnavailable,
}

impl ExamError {
    /// Returns `true` if the error comes from a malformed question definition.
    pub fn is_authoring_error(&self) -> bool {
        matches!(
            self,
            ExamError::TooFewOptions(_)
                | ExamError::TooManyOptions(_)
                | ExamError::CorrectOptionOutOfRange { .. }
                | ExamError::InvalidPoints(_)
                | ExamError::MissingChoices(_)
                | ExamError::UnknownQuestionType(_)
        )
    }
}
