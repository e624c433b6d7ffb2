//! Answer-key eligibility and projection.
//!
//! A key is only meaningful when every question is multiple-choice. It is
//! never stored: it is derived from a version's own questions each time, so
//! it always matches the options printed on that version.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ExamError;
use crate::model::{letter_for, ExamVersion, Question};
use crate::versions::VersionSet;

/// `true` iff `questions` is non-empty and entirely multiple-choice.
pub fn is_key_eligible(questions: &[Question]) -> bool {
    !questions.is_empty() && questions.iter().all(Question::is_multiple_choice)
}

/// Label for an option position: `0 -> 'A'`.
pub fn option_letter(index: usize) -> char {
    letter_for(index)
}

/// One line of an answer key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEntry {
    /// 1-based question number as printed.
    pub position: usize,
    pub question_id: String,
    /// Zero-based index of the correct option in this version.
    pub correct_option: usize,
    /// Printed label of the correct option.
    pub letter: char,
}

/// The answer key of a single exam version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerKey {
    pub version_id: Uuid,
    pub version_code: char,
    pub entries: Vec<KeyEntry>,
    pub total_points: f64,
}

/// Summary figures printed alongside a key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyStatistics {
    pub question_count: usize,
    pub total_points: f64,
    /// How many answers fall on each letter.
    pub letter_distribution: BTreeMap<char, usize>,
}

impl AnswerKey {
    /// Project the key out of `version`, or `None` when it has essay
    /// questions or no questions at all.
    pub fn derive(version: &ExamVersion) -> Option<AnswerKey> {
        if !is_key_eligible(&version.questions) {
            return None;
        }

        let entries = version
            .questions
            .iter()
            .enumerate()
            .filter_map(|(index, question)| {
                question.correct_option().map(|correct| KeyEntry {
                    position: index + 1,
                    question_id: question.id.clone(),
                    correct_option: correct,
                    letter: option_letter(correct),
                })
            })
            .collect();

        Some(AnswerKey {
            version_id: version.id,
            version_code: version.code,
            entries,
            total_points: version.total_points(),
        })
    }

    /// `(position, correct_option)` pairs in question order.
    pub fn pairs(&self) -> Vec<(usize, usize)> {
        self.entries
            .iter()
            .map(|e| (e.position, e.correct_option))
            .collect()
    }

    /// Correct letters in question order, e.g. `"BADC"`.
    pub fn letters(&self) -> String {
        self.entries.iter().map(|e| e.letter).collect()
    }

    pub fn statistics(&self) -> KeyStatistics {
        let mut letter_distribution = BTreeMap::new();
        for entry in &self.entries {
            *letter_distribution.entry(entry.letter).or_insert(0) += 1;
        }
        KeyStatistics {
            question_count: self.entries.len(),
            total_points: self.total_points,
            letter_distribution,
        }
    }

    /// Render the key as a Markdown section.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!("### Answer key: version {}\n\n", self.version_code));
        md.push_str("| # | Answer |\n");
        md.push_str("|---|--------|\n");
        for entry in &self.entries {
            md.push_str(&format!("| {} | {} |\n", entry.position, entry.letter));
        }
        md.push('\n');

        let stats = self.statistics();
        md.push_str(&format!(
            "**Questions:** {} | **Total points:** {:.1}\n\n",
            stats.question_count, stats.total_points
        ));
        let distribution: Vec<String> = stats
            .letter_distribution
            .iter()
            .map(|(letter, n)| format!("{letter}: {n}"))
            .collect();
        md.push_str(&format!("**Distribution:** {}\n", distribution.join(", ")));

        md
    }
}

/// Keys for every version in `set`.
///
/// Eligibility is decided once, on the first version: shuffling never changes
/// a question's type, so all versions of a set share the same composition.
pub fn answer_keys(set: &VersionSet) -> Result<Vec<AnswerKey>, ExamError> {
    let eligible = set
        .versions()
        .first()
        .is_some_and(|v| is_key_eligible(&v.questions));
    if !eligible {
        return Err(ExamError::AnswerKeyUnavailable);
    }
    set.iter()
        .map(|v| AnswerKey::derive(v).ok_or(ExamError::AnswerKeyUnavailable))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ShuffleMode, ShufflePolicy, VersionCount};

    fn mc(id: &str, correct: usize) -> Question {
        Question::multiple_choice(
            id,
            format!("Question {id}"),
            1.0,
            vec!["a".into(), "b".into(), "c".into(), "d".into()],
            correct,
        )
        .unwrap()
    }

    fn version_of(questions: Vec<Question>) -> ExamVersion {
        ExamVersion {
            id: Uuid::new_v4(),
            code: 'A',
            questions,
        }
    }

    #[test]
    fn eligibility_gating() {
        assert!(!is_key_eligible(&[]));
        assert!(is_key_eligible(&[mc("q1", 0), mc("q2", 3)]));
        assert!(!is_key_eligible(&[
            mc("q1", 0),
            Question::essay("q2", "Discuss.", 2.0)
        ]));
    }

    #[test]
    fn derive_projects_positions_and_letters() {
        let key = AnswerKey::derive(&version_of(vec![mc("q1", 1), mc("q2", 0), mc("q3", 3)]))
            .unwrap();
        assert_eq!(key.pairs(), vec![(1, 1), (2, 0), (3, 3)]);
        assert_eq!(key.letters(), "BAD");
        assert_eq!(key.entries[2].question_id, "q3");
        assert_eq!(key.total_points, 3.0);
    }

    #[test]
    fn derive_refuses_essays() {
        let version = version_of(vec![mc("q1", 1), Question::essay("q2", "Why?", 1.0)]);
        assert!(AnswerKey::derive(&version).is_none());
        assert!(AnswerKey::derive(&version_of(vec![])).is_none());
    }

    #[test]
    fn statistics_count_letters() {
        let key = AnswerKey::derive(&version_of(vec![
            mc("q1", 1),
            mc("q2", 1),
            mc("q3", 2),
        ]))
        .unwrap();
        let stats = key.statistics();
        assert_eq!(stats.question_count, 3);
        assert_eq!(stats.letter_distribution.get(&'B'), Some(&2));
        assert_eq!(stats.letter_distribution.get(&'C'), Some(&1));
        assert_eq!(stats.letter_distribution.get(&'A'), None);
    }

    #[test]
    fn markdown_lists_every_question() {
        let key = AnswerKey::derive(&version_of(vec![mc("q1", 2), mc("q2", 0)])).unwrap();
        let md = key.to_markdown();
        assert!(md.contains("version A"));
        assert!(md.contains("| 1 | C |"));
        assert!(md.contains("| 2 | A |"));
        assert!(md.contains("**Total points:** 2.0"));
    }

    #[test]
    fn keys_match_each_version_options() {
        let bank: Vec<Question> = (0..6).map(|i| mc(&format!("q{i}"), i % 4)).collect();
        let mut set = VersionSet::new();
        set.generate(&bank, VersionCount::new(4).unwrap(), ShuffleMode::Both);

        let keys = answer_keys(&set).unwrap();
        assert_eq!(keys.len(), 4);
        for (key, version) in keys.iter().zip(&set) {
            assert_eq!(key.version_code, version.code);
            for (entry, question) in key.entries.iter().zip(&version.questions) {
                let original = bank.iter().find(|b| b.id == question.id).unwrap();
                let printed = &question.options().unwrap()[entry.correct_option];
                assert_eq!(printed, original.choices().unwrap().correct_text());
            }
        }
    }

    #[test]
    fn keys_unavailable_for_essay_sets() {
        let bank = vec![mc("q1", 1), Question::essay("q2", "Explain.", 1.0)];
        let mut set = VersionSet::new();
        set.generate(&bank, VersionCount::new(3).unwrap(), ShufflePolicy::NONE);
        assert_eq!(answer_keys(&set), Err(ExamError::AnswerKeyUnavailable));
        assert_eq!(
            answer_keys(&VersionSet::new()),
            Err(ExamError::AnswerKeyUnavailable)
        );
    }
}
