//! The active set of generated exam versions.
//!
//! Codes in a [`VersionSet`] always form a dense prefix of the alphabet:
//! the version at position `i` carries letter `i`. Generation replaces the
//! whole set, removal renumbers the survivors, and nothing else mutates it.

use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::engine::{version_code, VersionBuilder};
use crate::model::{ExamVersion, Question, ShufflePolicy, VersionCount, MAX_VERSIONS};

/// Ordered collection of exam versions with positional letter codes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct VersionSet {
    versions: Vec<ExamVersion>,
}

impl VersionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the set with `count` freshly built versions of `bank`.
    pub fn generate(
        &mut self,
        bank: &[Question],
        count: VersionCount,
        policy: impl Into<ShufflePolicy>,
    ) {
        self.generate_with_rng(bank, count, policy, &mut rand::thread_rng());
    }

    /// [`generate`](Self::generate) drawing from `rng`.
    pub fn generate_with_rng<R: Rng + ?Sized>(
        &mut self,
        bank: &[Question],
        count: VersionCount,
        policy: impl Into<ShufflePolicy>,
        rng: &mut R,
    ) {
        let builder = VersionBuilder::new(bank, policy);
        let replaced = self.versions.len();
        self.versions = (0..count.get())
            .map(|index| builder.build_with_rng(index, &mut *rng))
            .collect();

        tracing::info!(
            versions = self.versions.len(),
            questions = bank.len(),
            replaced,
            "generated exam versions"
        );
    }

    /// Remove the version with `id` and renumber the remaining codes.
    ///
    /// Only `code` changes on the survivors; their questions are untouched.
    /// Returns `None` and leaves the set as is when no version matches.
    pub fn remove(&mut self, id: Uuid) -> Option<ExamVersion> {
        let position = self.versions.iter().position(|v| v.id == id)?;
        let removed = self.versions.remove(position);
        self.renumber();

        tracing::debug!(
            removed_code = %removed.code,
            remaining = self.versions.len(),
            "removed exam version"
        );

        Some(removed)
    }

    /// Drop every version.
    pub fn clear(&mut self) {
        tracing::debug!(cleared = self.versions.len(), "cleared exam versions");
        self.versions.clear();
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    pub fn versions(&self) -> &[ExamVersion] {
        &self.versions
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ExamVersion> {
        self.versions.iter()
    }

    /// Look up a version by its letter code (case-insensitive).
    pub fn get(&self, code: char) -> Option<&ExamVersion> {
        let code = code.to_ascii_uppercase();
        self.versions.iter().find(|v| v.code == code)
    }

    pub fn get_by_id(&self, id: Uuid) -> Option<&ExamVersion> {
        self.versions.iter().find(|v| v.id == id)
    }

    /// Letter codes in position order.
    pub fn codes(&self) -> Vec<char> {
        self.versions.iter().map(|v| v.code).collect()
    }

    fn renumber(&mut self) {
        for (index, version) in self.versions.iter_mut().enumerate() {
            version.code = version_code(index);
        }
    }
}

impl<'de> Deserialize<'de> for VersionSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let versions = Vec::<ExamVersion>::deserialize(deserializer)?;
        if versions.len() > MAX_VERSIONS {
            return Err(serde::de::Error::custom(format!(
                "version set holds {} versions, at most {} allowed",
                versions.len(),
                MAX_VERSIONS
            )));
        }
        let mut set = VersionSet { versions };
        set.renumber();
        Ok(set)
    }
}

impl<'a> IntoIterator for &'a VersionSet {
    type Item = &'a ExamVersion;
    type IntoIter = std::slice::Iter<'a, ExamVersion>;

    fn into_iter(self) -> Self::IntoIter {
        self.versions.iter()
    }
}
