//! Unbiased permutation of sequences.
//!
//! Fisher–Yates over a copy of the input, via [`SliceRandom::shuffle`]. The
//! random source is injected so callers can seed it in tests; production
//! paths use [`rand::thread_rng`].

use rand::seq::SliceRandom;
use rand::Rng;

/// Permute `items` in place.
pub fn shuffle_in_place<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    items.shuffle(rng);
}

/// Return a uniformly random permutation of `items`, leaving the input untouched.
pub fn shuffled<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut copy = items.to_vec();
    shuffle_in_place(&mut copy, rng);
    copy
}

/// [`shuffled`] with the thread-local generator.
pub fn shuffled_random<T: Clone>(items: &[T]) -> Vec<T> {
    shuffled(items, &mut rand::thread_rng())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn empty_and_single() {
        let mut rng = StdRng::seed_from_u64(7);
        let empty: Vec<u32> = vec![];
        assert!(shuffled(&empty, &mut rng).is_empty());
        assert_eq!(shuffled(&[42], &mut rng), vec![42]);
    }

    #[test]
    fn input_is_not_modified() {
        let mut rng = StdRng::seed_from_u64(1);
        let input = vec![1, 2, 3, 4, 5, 6, 7, 8];
        let _ = shuffled(&input, &mut rng);
        assert_eq!(input, vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn output_is_a_permutation() {
        let mut rng = StdRng::seed_from_u64(99);
        for len in 0..40usize {
            let input: Vec<usize> = (0..len).collect();
            let mut out = shuffled(&input, &mut rng);
            assert_eq!(out.len(), len);
            out.sort_unstable();
            assert_eq!(out, input);
        }
    }

    #[test]
    fn keeps_duplicates() {
        let mut rng = StdRng::seed_from_u64(3);
        let input = vec!["x", "x", "y", "y", "y"];
        let mut out = shuffled(&input, &mut rng);
        out.sort_unstable();
        assert_eq!(out, vec!["x", "x", "y", "y", "y"]);
    }

    #[test]
    fn every_position_is_reachable() {
        // Each element of a 4-element sequence should land in each slot
        // at least once over many draws.
        let mut rng = StdRng::seed_from_u64(2024);
        let input = [0usize, 1, 2, 3];
        let mut seen = [[false; 4]; 4];
        for _ in 0..500 {
            for (pos, &value) in shuffled(&input, &mut rng).iter().enumerate() {
                seen[value][pos] = true;
            }
        }
        assert!(seen.iter().all(|row| row.iter().all(|&hit| hit)));
    }

    #[test]
    fn roughly_uniform_first_slot() {
        let mut rng = StdRng::seed_from_u64(11);
        let input = [0usize, 1, 2];
        let mut counts = [0u32; 3];
        let trials = 6000;
        for _ in 0..trials {
            counts[shuffled(&input, &mut rng)[0]] += 1;
        }
        for count in counts {
            // expected 2000 each
            assert!((1700..=2300).contains(&count), "skewed: {counts:?}");
        }
    }

    #[test]
    fn in_place_matches_copying_shuffle() {
        let mut items: Vec<u32> = (0..20).collect();
        shuffle_in_place(&mut items, &mut StdRng::seed_from_u64(5));
        let copied = shuffled(&(0..20).collect::<Vec<u32>>(), &mut StdRng::seed_from_u64(5));
        assert_eq!(items, copied);
        assert_ne!(items, (0..20).collect::<Vec<u32>>());
    }

    #[test]
    fn thread_rng_wrapper() {
        let mut out = shuffled_random(&[3, 1, 2]);
        out.sort_unstable();
        assert_eq!(out, vec![1, 2, 3]);
    }
}
