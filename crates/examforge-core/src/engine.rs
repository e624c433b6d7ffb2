//! Version builder.
//!
//! Turns the question bank into one exam version: optionally permutes the
//! question order, then optionally shuffles the options of every
//! multiple-choice question. Each version owns fresh copies of its
//! questions, so nothing it holds aliases the bank or another version.

use rand::Rng;
use uuid::Uuid;

use crate::model::{letter_for, ExamVersion, Question, ShufflePolicy, MAX_VERSIONS};
use crate::remap::remap_options;
use crate::shuffle::shuffled;

/// Letter code for the version at `index` in its set.
pub fn version_code(index: usize) -> char {
    debug_assert!(index < MAX_VERSIONS, "version index {index} out of range");
    letter_for(index)
}

/// Builds exam versions from a borrowed bank under a fixed policy.
#[derive(Debug, Clone, Copy)]
pub struct VersionBuilder<'a> {
    bank: &'a [Question],
    policy: ShufflePolicy,
}

impl<'a> VersionBuilder<'a> {
    pub fn new(bank: &'a [Question], policy: impl Into<ShufflePolicy>) -> Self {
        Self {
            bank,
            policy: policy.into(),
        }
    }

    pub fn policy(&self) -> ShufflePolicy {
        self.policy
    }

    /// Build the version at position `index` using the thread-local generator.
    pub fn build(&self, index: usize) -> ExamVersion {
        self.build_with_rng(index, &mut rand::thread_rng())
    }

    /// Build the version at position `index` drawing from `rng`.
    pub fn build_with_rng<R: Rng + ?Sized>(&self, index: usize, rng: &mut R) -> ExamVersion {
        let ordered = if self.policy.shuffle_questions {
            shuffled(self.bank, &mut *rng)
        } else {
            self.bank.to_vec()
        };

        let questions = if self.policy.shuffle_options {
            ordered.iter().map(|q| remap_options(q, &mut *rng)).collect()
        } else {
            ordered
        };

        let version = ExamVersion {
            id: Uuid::new_v4(),
            code: version_code(index),
            questions,
        };

        tracing::debug!(
            code = %version.code,
            questions = version.questions.len(),
            shuffle_questions = self.policy.shuffle_questions,
            shuffle_options = self.policy.shuffle_options,
            "built exam version"
        );

        version
    }
}

/// Convenience wrapper: build a single version with the thread-local generator.
pub fn build_version(
    bank: &[Question],
    policy: impl Into<ShufflePolicy>,
    index: usize,
) -> ExamVersion {
    VersionBuilder::new(bank, policy).build(index)
}
