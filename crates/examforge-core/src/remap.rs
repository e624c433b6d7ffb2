//! Option shuffling that keeps the answer attached to its text.
//!
//! Each option is paired with its original index before shuffling, and the
//! new correct index is wherever the pair carrying the old correct index
//! ended up. Matching on the index rather than on the text keeps questions
//! with repeated option texts correct.

use rand::Rng;

use crate::model::{Choices, Question, QuestionKind};
use crate::shuffle::shuffled;

/// Shuffle a set of choices and recompute the correct index.
pub fn remap_choices<R: Rng + ?Sized>(choices: &Choices, rng: &mut R) -> Choices {
    let paired: Vec<(usize, &String)> = choices.options().iter().enumerate().collect();
    let permuted = shuffled(&paired, rng);

    let mut new_correct = 0;
    let mut options = Vec::with_capacity(permuted.len());
    for (position, (original_index, text)) in permuted.into_iter().enumerate() {
        if original_index == choices.correct_option() {
            new_correct = position;
        }
        options.push(text.clone());
    }

    Choices::from_permuted(options, new_correct)
}

/// Return a copy of `question` with its options shuffled.
///
/// Essay questions come back as plain copies.
pub fn remap_options<R: Rng + ?Sized>(question: &Question, rng: &mut R) -> Question {
    match &question.kind {
        QuestionKind::MultipleChoice(choices) => Question {
            kind: QuestionKind::MultipleChoice(remap_choices(choices, rng)),
            ..question.clone()
        },
        QuestionKind::Essay => question.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn opts(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn correct_text_survives_shuffle() {
        let mut rng = StdRng::seed_from_u64(5);
        let question =
            Question::multiple_choice("q1", "2 + 2?", 1.0, opts(&["2", "4", "6", "8"]), 1)
                .unwrap();
        for _ in 0..200 {
            let remapped = remap_options(&question, &mut rng);
            let choices = remapped.choices().unwrap();
            assert_eq!(choices.correct_text(), "4");
            let mut sorted = choices.options().to_vec();
            sorted.sort();
            assert_eq!(sorted, opts(&["2", "4", "6", "8"]));
        }
    }

    #[test]
    fn duplicate_texts_track_by_position() {
        // Same seed, same permutation: the tagged copy shows which "same" won.
        let question =
            Question::multiple_choice("q", "pick", 1.0, opts(&["same", "same", "other"]), 1)
                .unwrap();
        let tagged =
            Question::multiple_choice("q", "pick", 1.0, opts(&["same#0", "same#1", "other"]), 1)
                .unwrap();
        for seed in 0..100 {
            let plain = remap_options(&question, &mut StdRng::seed_from_u64(seed));
            let marked = remap_options(&tagged, &mut StdRng::seed_from_u64(seed));
            assert_eq!(plain.correct_option(), marked.correct_option());
            assert_eq!(marked.choices().unwrap().correct_text(), "same#1");
            assert_eq!(plain.choices().unwrap().correct_text(), "same");
        }
    }

    #[test]
    fn essay_passes_through() {
        let mut rng = StdRng::seed_from_u64(0);
        let essay = Question::essay("e1", "Explain limits.", 3.0);
        assert_eq!(remap_options(&essay, &mut rng), essay);
    }

    #[test]
    fn other_fields_are_kept() {
        let mut rng = StdRng::seed_from_u64(8);
        let question =
            Question::multiple_choice("q9", "$x^2$?", 2.5, opts(&["a", "b", "c"]), 2).unwrap();
        let remapped = remap_options(&question, &mut rng);
        assert_eq!(remapped.id, "q9");
        assert_eq!(remapped.text, "$x^2$?");
        assert_eq!(remapped.points, 2.5);
    }

    #[test]
    fn every_slot_can_hold_the_answer() {
        let mut rng = StdRng::seed_from_u64(31);
        let choices = Choices::new(opts(&["a", "b", "c", "d"]), 0).unwrap();
        let mut hits = [false; 4];
        for _ in 0..300 {
            hits[remap_choices(&choices, &mut rng).correct_option()] = true;
        }
        assert!(hits.iter().all(|&h| h));
    }
}
