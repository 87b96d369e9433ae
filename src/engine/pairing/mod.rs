//! 配对策略
//!
//! 两种策略共享同一条候选过滤流程：按已完成比较次数从少到多分层，
//! 逐层放宽，直到当前层内存在评审者尚未比较过的答案对；策略只负责在该层内挑选。

mod adaptive;
mod random;

pub use adaptive::AdaptivePairing;
pub use random::RandomPairing;

use std::collections::HashSet;

use rand::{Rng, RngCore};

use crate::errors::{CompairError, Result};

/// 配对候选答案
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub answer_id: i64,
    // 所有评审者已完成的非示例比较次数
    pub comparisons: i64,
    // 当前加权得分，未计分为中性 50
    pub score: f64,
}

/// 无序答案对
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairKey(i64, i64);

impl PairKey {
    pub fn new(a: i64, b: i64) -> Self {
        if a <= b { Self(a, b) } else { Self(b, a) }
    }
}

pub trait PairingStrategy: Send + Sync {
    /// 在给定分层内挑选一对尚未比较过的答案，不存在时返回 None
    fn choose(
        &self,
        cohort: &[Candidate],
        judged: &HashSet<PairKey>,
        rng: &mut dyn RngCore,
    ) -> Option<(i64, i64)>;
}

// 配对算法
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairingAlgorithm {
    Random,
    Adaptive,
}

impl PairingAlgorithm {
    pub const RANDOM: &'static str = "random";
    pub const ADAPTIVE: &'static str = "adaptive";

    pub fn all() -> Vec<String> {
        vec![Self::RANDOM.to_string(), Self::ADAPTIVE.to_string()]
    }

    /// 解析作业上的算法名称，空值使用默认算法
    pub fn resolve(name: &str, default: &str) -> Result<Self> {
        let name = if name.trim().is_empty() { default } else { name };
        name.trim()
            .to_ascii_lowercase()
            .parse::<PairingAlgorithm>()
            .map_err(CompairError::unknown_strategy)
    }

    pub fn strategy(&self) -> &'static dyn PairingStrategy {
        match self {
            PairingAlgorithm::Random => &RandomPairing,
            PairingAlgorithm::Adaptive => &AdaptivePairing,
        }
    }
}

impl std::fmt::Display for PairingAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PairingAlgorithm::Random => write!(f, "{}", PairingAlgorithm::RANDOM),
            PairingAlgorithm::Adaptive => write!(f, "{}", PairingAlgorithm::ADAPTIVE),
        }
    }
}

impl std::str::FromStr for PairingAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            PairingAlgorithm::RANDOM => Ok(PairingAlgorithm::Random),
            PairingAlgorithm::ADAPTIVE => Ok(PairingAlgorithm::Adaptive),
            _ => Err(format!("Unknown pairing algorithm: {s}")),
        }
    }
}

/// 列出分层内所有尚未比较过的答案对
pub(crate) fn fresh_pairs<'a>(
    cohort: &'a [Candidate],
    judged: &'a HashSet<PairKey>,
) -> impl Iterator<Item = (&'a Candidate, &'a Candidate)> + 'a {
    cohort.iter().enumerate().flat_map(move |(i, a)| {
        cohort[i + 1..]
            .iter()
            .filter(move |b| a.answer_id != b.answer_id)
            .filter(move |b| !judged.contains(&PairKey::new(a.answer_id, b.answer_id)))
            .map(move |b| (a, b))
    })
}

/// 选择下一对答案，左右顺序随机
pub fn select_pair(
    strategy: &dyn PairingStrategy,
    candidates: &[Candidate],
    judged: &HashSet<PairKey>,
    rng: &mut dyn RngCore,
) -> Result<(i64, i64)> {
    let mut levels: Vec<i64> = candidates.iter().map(|c| c.comparisons).collect();
    levels.sort_unstable();
    levels.dedup();

    for level in levels {
        let cohort: Vec<Candidate> = candidates
            .iter()
            .filter(|c| c.comparisons <= level)
            .copied()
            .collect();

        if cohort.len() < 2 {
            continue;
        }

        if let Some((a, b)) = strategy.choose(&cohort, judged, rng) {
            return Ok(if rng.random_bool(0.5) { (a, b) } else { (b, a) });
        }
    }

    Err(CompairError::all_pairs_compared(
        "您已经比较过当前所有可用的答案组合",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn candidate(answer_id: i64, comparisons: i64) -> Candidate {
        Candidate {
            answer_id,
            comparisons,
            score: 50.0,
        }
    }

    #[test]
    fn test_resolve_algorithm() {
        assert_eq!(
            PairingAlgorithm::resolve("", "adaptive").unwrap(),
            PairingAlgorithm::Adaptive
        );
        assert_eq!(
            PairingAlgorithm::resolve(" Random ", "adaptive").unwrap(),
            PairingAlgorithm::Random
        );
        let err = PairingAlgorithm::resolve("acj", "adaptive").unwrap_err();
        assert!(matches!(err, CompairError::UnknownStrategy(_)));
    }

    #[test]
    fn test_prefers_least_compared_answers() {
        let candidates = vec![
            candidate(1, 0),
            candidate(2, 0),
            candidate(3, 5),
            candidate(4, 5),
        ];
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..20 {
            let (a, b) =
                select_pair(&RandomPairing, &candidates, &HashSet::new(), &mut rng).unwrap();
            assert_eq!(PairKey::new(a, b), PairKey::new(1, 2));
        }
    }

    #[test]
    fn test_widens_when_lowest_group_exhausted() {
        let candidates = vec![candidate(1, 0), candidate(2, 0), candidate(3, 2)];
        let judged = HashSet::from([PairKey::new(1, 2)]);
        let mut rng = StdRng::seed_from_u64(11);

        let (a, b) = select_pair(&RandomPairing, &candidates, &judged, &mut rng).unwrap();
        assert_ne!(a, b);
        assert!(a == 3 || b == 3);
    }

    #[test]
    fn test_all_pairs_compared() {
        let candidates = vec![candidate(1, 0), candidate(2, 0), candidate(3, 0)];
        let judged = HashSet::from([PairKey::new(1, 2), PairKey::new(1, 3), PairKey::new(2, 3)]);
        let mut rng = StdRng::seed_from_u64(3);

        for strategy in [PairingAlgorithm::Random, PairingAlgorithm::Adaptive] {
            let err = select_pair(strategy.strategy(), &candidates, &judged, &mut rng).unwrap_err();
            assert!(matches!(err, CompairError::AllPairsCompared(_)));
        }
    }

    #[test]
    fn test_sides_are_randomized() {
        let candidates = vec![candidate(1, 0), candidate(2, 0)];
        let mut rng = StdRng::seed_from_u64(42);
        let mut firsts = HashSet::new();

        for _ in 0..64 {
            let (a, _) =
                select_pair(&RandomPairing, &candidates, &HashSet::new(), &mut rng).unwrap();
            firsts.insert(a);
        }
        assert_eq!(firsts.len(), 2);
    }
}
