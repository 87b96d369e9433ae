use std::collections::HashSet;

use rand::{Rng, RngCore};

use super::{Candidate, PairKey, PairingStrategy, fresh_pairs};

/// 在分层内的未比较答案对中均匀随机选择
pub struct RandomPairing;

impl PairingStrategy for RandomPairing {
    fn choose(
        &self,
        cohort: &[Candidate],
        judged: &HashSet<PairKey>,
        rng: &mut dyn RngCore,
    ) -> Option<(i64, i64)> {
        let pairs: Vec<(i64, i64)> = fresh_pairs(cohort, judged)
            .map(|(a, b)| (a.answer_id, b.answer_id))
            .collect();

        if pairs.is_empty() {
            return None;
        }
        Some(pairs[rng.random_range(0..pairs.len())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_covers_every_fresh_pair() {
        let cohort: Vec<Candidate> = (1..=4)
            .map(|id| Candidate {
                answer_id: id,
                comparisons: 0,
                score: 50.0,
            })
            .collect();
        let judged = HashSet::from([PairKey::new(1, 2)]);
        let mut rng = StdRng::seed_from_u64(5);

        let mut seen = HashSet::new();
        for _ in 0..200 {
            let (a, b) = RandomPairing.choose(&cohort, &judged, &mut rng).unwrap();
            seen.insert(PairKey::new(a, b));
        }
        assert_eq!(seen.len(), 5);
        assert!(!seen.contains(&PairKey::new(1, 2)));
    }
}
