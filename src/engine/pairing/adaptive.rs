use std::collections::HashSet;

use rand::{Rng, RngCore};

use super::{Candidate, PairKey, PairingStrategy, fresh_pairs};

// 得分差比较容差
const SCORE_EPSILON: f64 = 1e-9;

/// 在分层内挑选得分最接近的未比较答案对，多对并列时随机选择
pub struct AdaptivePairing;

impl PairingStrategy for AdaptivePairing {
    fn choose(
        &self,
        cohort: &[Candidate],
        judged: &HashSet<PairKey>,
        rng: &mut dyn RngCore,
    ) -> Option<(i64, i64)> {
        let mut sorted = cohort.to_vec();
        sorted.sort_by(|a, b| {
            a.score
                .total_cmp(&b.score)
                .then(a.answer_id.cmp(&b.answer_id))
        });

        let mut best = f64::INFINITY;
        let mut closest: Vec<(i64, i64)> = Vec::new();

        for (a, b) in fresh_pairs(&sorted, judged) {
            let distance = (a.score - b.score).abs();
            if distance + SCORE_EPSILON < best {
                best = distance;
                closest.clear();
                closest.push((a.answer_id, b.answer_id));
            } else if (distance - best).abs() <= SCORE_EPSILON {
                closest.push((a.answer_id, b.answer_id));
            }
        }

        if closest.is_empty() {
            return None;
        }
        Some(closest[rng.random_range(0..closest.len())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn candidate(answer_id: i64, score: f64) -> Candidate {
        Candidate {
            answer_id,
            comparisons: 1,
            score,
        }
    }

    #[test]
    fn test_picks_closest_scores() {
        let cohort = vec![
            candidate(1, 10.0),
            candidate(2, 90.0),
            candidate(3, 55.0),
            candidate(4, 52.0),
        ];
        let mut rng = StdRng::seed_from_u64(1);

        let (a, b) = AdaptivePairing
            .choose(&cohort, &HashSet::new(), &mut rng)
            .unwrap();
        assert_eq!(PairKey::new(a, b), PairKey::new(3, 4));
    }

    #[test]
    fn test_skips_judged_closest_pair() {
        let cohort = vec![
            candidate(1, 10.0),
            candidate(2, 90.0),
            candidate(3, 55.0),
            candidate(4, 52.0),
        ];
        let judged = HashSet::from([PairKey::new(3, 4)]);
        let mut rng = StdRng::seed_from_u64(1);

        let (a, b) = AdaptivePairing.choose(&cohort, &judged, &mut rng).unwrap();
        // 剩余最接近的是 2 与 3（相差 35）
        assert_eq!(PairKey::new(a, b), PairKey::new(2, 3));
    }
}
