//! 得分与排名
//!
//! 每个答案在每条评审标准下维护胜场数与比较数，归一化得分为平滑胜率
//! `100 * (胜场 + 1) / (比较数 + 2)`：未参与比较时为中性 50，胜场越多得分越高，
//! 同样胜场下比较数越多得分越低。名次采用竞赛排名，并列共享名次。

use std::collections::{BTreeSet, HashMap};

use crate::models::assignments::entities::AssignmentCriterion;
use crate::models::comparisons::entities::WinningAnswer;

/// 未参与比较时的中性得分
pub const NEUTRAL_SCORE: f64 = 50.0;

const RANK_EPSILON: f64 = 1e-9;

pub fn normalized_score(raw_win_count: i64, comparisons_count: i64) -> f64 {
    100.0 * (raw_win_count + 1) as f64 / (comparisons_count + 2) as f64
}

/// 单个 (答案, 标准) 的计数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreTally {
    pub raw_win_count: i64,
    pub comparisons_count: i64,
}

impl ScoreTally {
    pub fn record(&mut self, won: bool) {
        self.comparisons_count += 1;
        if won {
            self.raw_win_count += 1;
        }
    }

    pub fn normalized(&self) -> f64 {
        normalized_score(self.raw_win_count, self.comparisons_count)
    }
}

/// 一次已完成比较对得分的影响
#[derive(Debug, Clone)]
pub struct CompletedOutcome {
    pub answer1_id: i64,
    pub answer2_id: i64,
    // (criterion_id, 单项胜者)
    pub verdicts: Vec<(i64, WinningAnswer)>,
}

impl CompletedOutcome {
    /// 受影响的 (答案, 标准) 及该答案是否胜出
    pub fn touched(&self) -> impl Iterator<Item = ((i64, i64), bool)> + '_ {
        self.verdicts.iter().flat_map(move |(criterion_id, winner)| {
            [
                (
                    (self.answer1_id, *criterion_id),
                    *winner == WinningAnswer::Answer1,
                ),
                (
                    (self.answer2_id, *criterion_id),
                    *winner == WinningAnswer::Answer2,
                ),
            ]
        })
    }
}

/// 整个作业的计分板，键为 (answer_id, criterion_id)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreBoard {
    tallies: HashMap<(i64, i64), ScoreTally>,
}

impl ScoreBoard {
    /// 由完整历史批量重建
    pub fn rebuild<'a>(outcomes: impl IntoIterator<Item = &'a CompletedOutcome>) -> Self {
        let mut board = Self::default();
        for outcome in outcomes {
            board.apply(outcome);
        }
        board
    }

    /// 增量记录一次已完成比较
    pub fn apply(&mut self, outcome: &CompletedOutcome) {
        for (key, won) in outcome.touched() {
            self.tallies.entry(key).or_default().record(won);
        }
    }

    pub fn tally(&self, answer_id: i64, criterion_id: i64) -> ScoreTally {
        self.tallies
            .get(&(answer_id, criterion_id))
            .copied()
            .unwrap_or_default()
    }

    pub fn tallies(&self) -> &HashMap<(i64, i64), ScoreTally> {
        &self.tallies
    }

    pub fn criteria(&self) -> BTreeSet<i64> {
        self.tallies.keys().map(|(_, criterion_id)| *criterion_id).collect()
    }

    /// 某条标准下各答案的名次
    pub fn ranks(&self, criterion_id: i64) -> HashMap<i64, i64> {
        let cohort: Vec<(i64, f64)> = self
            .tallies
            .iter()
            .filter(|((_, c), _)| *c == criterion_id)
            .map(|((answer_id, _), tally)| (*answer_id, tally.normalized()))
            .collect();
        assign_ranks(&cohort)
    }
}

/// 竞赛排名：名次 = 1 + 得分严格更高的数量
pub fn assign_ranks(scores: &[(i64, f64)]) -> HashMap<i64, i64> {
    let mut sorted: Vec<f64> = scores.iter().map(|(_, s)| *s).collect();
    sorted.sort_by(|a, b| b.total_cmp(a));

    scores
        .iter()
        .map(|(id, score)| {
            let higher = sorted.partition_point(|s| *s > *score + RANK_EPSILON);
            (*id, higher as i64 + 1)
        })
        .collect()
}

/// 答案的整体得分：各标准归一化得分按权重加权平均，无记录的标准按中性分计
pub fn weighted_score(per_criterion: &HashMap<i64, f64>, criteria: &[AssignmentCriterion]) -> f64 {
    let total_weight: i64 = criteria.iter().map(|c| i64::from(c.weight.max(0))).sum();
    if total_weight == 0 {
        return NEUTRAL_SCORE;
    }

    let sum: f64 = criteria
        .iter()
        .map(|c| {
            let score = per_criterion
                .get(&c.criterion_id)
                .copied()
                .unwrap_or(NEUTRAL_SCORE);
            score * f64::from(c.weight.max(0))
        })
        .sum();

    sum / total_weight as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn outcome(a1: i64, a2: i64, winner: WinningAnswer) -> CompletedOutcome {
        CompletedOutcome {
            answer1_id: a1,
            answer2_id: a2,
            verdicts: vec![(1, winner)],
        }
    }

    #[test]
    fn test_unscored_is_neutral() {
        assert_eq!(normalized_score(0, 0), NEUTRAL_SCORE);
        assert_eq!(ScoreTally::default().normalized(), NEUTRAL_SCORE);
    }

    #[test]
    fn test_score_monotonicity() {
        // 胜场增加得分上升
        for comparisons in 1..10 {
            for wins in 0..comparisons {
                assert!(normalized_score(wins + 1, comparisons) > normalized_score(wins, comparisons));
            }
        }
        // 只输不赢时比较越多得分越低
        let mut tally = ScoreTally::default();
        let mut previous = tally.normalized();
        for _ in 0..5 {
            tally.record(false);
            assert!(tally.normalized() < previous);
            previous = tally.normalized();
        }
        // 赢一场得分上升
        let before = tally.normalized();
        tally.record(true);
        assert!(tally.normalized() > before);
    }

    #[test]
    fn test_draw_counts_comparison_without_win() {
        let board = ScoreBoard::rebuild(&[outcome(1, 2, WinningAnswer::Draw)]);
        assert_eq!(
            board.tally(1, 1),
            ScoreTally {
                raw_win_count: 0,
                comparisons_count: 1
            }
        );
        assert_eq!(board.tally(1, 1), board.tally(2, 1));
    }

    #[test]
    fn test_competition_ranking() {
        let ranks = assign_ranks(&[(1, 80.0), (2, 50.0), (3, 80.0), (4, 20.0)]);
        assert_eq!(ranks[&1], 1);
        assert_eq!(ranks[&3], 1);
        assert_eq!(ranks[&2], 3);
        assert_eq!(ranks[&4], 4);
    }

    #[test]
    fn test_incremental_matches_rebuild() {
        let mut rng = StdRng::seed_from_u64(2024);
        let winners = [
            WinningAnswer::Answer1,
            WinningAnswer::Answer2,
            WinningAnswer::Draw,
        ];
        let history: Vec<CompletedOutcome> = (0..200)
            .map(|_| {
                let a1 = rng.random_range(1..=8);
                let mut a2 = rng.random_range(1..=8);
                if a2 == a1 {
                    a2 = a1 % 8 + 1;
                }
                CompletedOutcome {
                    answer1_id: a1,
                    answer2_id: a2,
                    verdicts: vec![
                        (1, winners[rng.random_range(0..3)]),
                        (2, winners[rng.random_range(0..3)]),
                    ],
                }
            })
            .collect();

        let mut incremental = ScoreBoard::default();
        for o in &history {
            incremental.apply(o);
        }
        let batch = ScoreBoard::rebuild(&history);

        assert_eq!(incremental, batch);
        for criterion_id in batch.criteria() {
            assert_eq!(incremental.ranks(criterion_id), batch.ranks(criterion_id));
        }
    }

    #[test]
    fn test_weighted_score() {
        let criteria = vec![
            AssignmentCriterion {
                criterion_id: 1,
                name: "Idea".into(),
                description: None,
                weight: 3,
                position: 0,
            },
            AssignmentCriterion {
                criterion_id: 2,
                name: "Style".into(),
                description: None,
                weight: 1,
                position: 1,
            },
        ];
        let scores = HashMap::from([(1, 100.0)]);
        // (100 * 3 + 50 * 1) / 4
        assert_eq!(weighted_score(&scores, &criteria), 87.5);
        assert_eq!(weighted_score(&HashMap::new(), &criteria), NEUTRAL_SCORE);
    }
}
