//! examforge-core: Exam version generation and answer-key engine.
//!
//! This crate defines the question model, the shuffling engine that turns a
//! question bank into lettered exam versions, and the answer-key projection
//! that the rest of examforge builds on.

pub mod answer_key;
pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod parser;
pub mod remap;
pub mod render;
pub mod report;
pub mod shuffle;
pub mod versions;

pub use answer_key::{answer_keys, is_key_eligible, AnswerKey};
pub use engine::{build_version, VersionBuilder};
pub use error::ExamError;
pub use model::{
    Choices, ExamSettings, ExamVersion, Question, QuestionBank, QuestionKind, QuestionType,
    ShuffleMode, ShufflePolicy, VersionCount,
};
pub use versions::VersionSet;
