use std::collections::{HashMap, HashSet};

use crate::errors::{CompairError, Result};
use crate::models::assignments::entities::AssignmentCriterion;
use crate::models::comparisons::entities::WinningAnswer;
use crate::models::comparisons::requests::{ComparisonCriterionInput, WinnerInput};

/// 已校验的单项判定
#[derive(Debug, Clone, PartialEq)]
pub struct CriterionVerdict {
    pub criterion_id: i64,
    pub winner: WinningAnswer,
    pub content: Option<String>,
}

/// 将客户端传入的胜者解析为 `WinningAnswer`
///
/// 答案 ID 必须是比较双方之一；null 视为 undecided。
pub fn resolve_winner(
    input: Option<&WinnerInput>,
    answer1_id: i64,
    answer2_id: i64,
) -> Result<WinningAnswer> {
    match input {
        None => Ok(WinningAnswer::Undecided),
        Some(WinnerInput::AnswerId(id)) if *id == answer1_id => Ok(WinningAnswer::Answer1),
        Some(WinnerInput::AnswerId(id)) if *id == answer2_id => Ok(WinningAnswer::Answer2),
        Some(WinnerInput::AnswerId(id)) => Err(CompairError::validation(format!(
            "胜者答案 {id} 不属于本次比较"
        ))),
        Some(WinnerInput::Keyword(keyword)) => keyword
            .parse::<WinningAnswer>()
            .map_err(|_| CompairError::validation(format!("无效的胜者取值: {keyword}"))),
    }
}

/// 校验提交的判定：必须恰好覆盖作业的全部有效评审标准，每条一次
///
/// 返回结果按评审标准的顺序排列。
pub fn validate_verdicts(
    inputs: Vec<ComparisonCriterionInput>,
    criteria: &[AssignmentCriterion],
    answer1_id: i64,
    answer2_id: i64,
) -> Result<Vec<CriterionVerdict>> {
    let expected: HashSet<i64> = criteria.iter().map(|c| c.criterion_id).collect();
    let mut submitted: HashMap<i64, CriterionVerdict> = HashMap::with_capacity(inputs.len());

    for input in inputs {
        if !expected.contains(&input.criterion_id) {
            return Err(CompairError::validation(format!(
                "评审标准 {} 不属于该作业",
                input.criterion_id
            )));
        }
        let winner = resolve_winner(input.winner.as_ref(), answer1_id, answer2_id)?;
        let verdict = CriterionVerdict {
            criterion_id: input.criterion_id,
            winner,
            content: input.content,
        };
        if submitted.insert(input.criterion_id, verdict).is_some() {
            return Err(CompairError::validation(format!(
                "评审标准 {} 重复提交",
                input.criterion_id
            )));
        }
    }

    criteria
        .iter()
        .map(|c| {
            submitted.remove(&c.criterion_id).ok_or_else(|| {
                CompairError::validation(format!("缺少评审标准 {} 的判定", c.criterion_id))
            })
        })
        .collect()
}

/// 按权重汇总单项判定得到整体胜者
///
/// 任一单项未决定则整体为 `Undecided`；加权和严格更大的一方胜出，相等为平局。
pub fn overall_winner(
    verdicts: &[CriterionVerdict],
    criteria: &[AssignmentCriterion],
) -> WinningAnswer {
    if verdicts.iter().any(|v| !v.winner.is_decided()) {
        return WinningAnswer::Undecided;
    }

    let weights: HashMap<i64, i64> = criteria
        .iter()
        .map(|c| (c.criterion_id, i64::from(c.weight)))
        .collect();

    let (mut answer1, mut answer2) = (0i64, 0i64);
    for v in verdicts {
        let weight = weights.get(&v.criterion_id).copied().unwrap_or(0);
        match v.winner {
            WinningAnswer::Answer1 => answer1 += weight,
            WinningAnswer::Answer2 => answer2 += weight,
            WinningAnswer::Draw | WinningAnswer::Undecided => {}
        }
    }

    match answer1.cmp(&answer2) {
        std::cmp::Ordering::Greater => WinningAnswer::Answer1,
        std::cmp::Ordering::Less => WinningAnswer::Answer2,
        std::cmp::Ordering::Equal => WinningAnswer::Draw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn criterion(criterion_id: i64, weight: i32) -> AssignmentCriterion {
        AssignmentCriterion {
            criterion_id,
            name: format!("criterion {criterion_id}"),
            description: None,
            weight,
            position: criterion_id as i32,
        }
    }

    fn verdict(criterion_id: i64, winner: WinningAnswer) -> CriterionVerdict {
        CriterionVerdict {
            criterion_id,
            winner,
            content: None,
        }
    }

    fn input(criterion_id: i64, winner: Option<WinnerInput>) -> ComparisonCriterionInput {
        ComparisonCriterionInput {
            criterion_id,
            winner,
            content: None,
        }
    }

    #[test]
    fn test_equal_weights_split_is_draw() {
        let criteria = vec![criterion(1, 100), criterion(2, 100)];
        let verdicts = vec![
            verdict(1, WinningAnswer::Answer1),
            verdict(2, WinningAnswer::Answer2),
        ];
        assert_eq!(overall_winner(&verdicts, &criteria), WinningAnswer::Draw);
    }

    #[test]
    fn test_equal_weights_same_side_wins() {
        let criteria = vec![criterion(1, 100), criterion(2, 100)];
        let verdicts = vec![
            verdict(1, WinningAnswer::Answer1),
            verdict(2, WinningAnswer::Answer1),
        ];
        assert_eq!(overall_winner(&verdicts, &criteria), WinningAnswer::Answer1);
    }

    #[test]
    fn test_heavier_criterion_decides() {
        let criteria = vec![criterion(1, 1), criterion(2, 3)];
        let verdicts = vec![
            verdict(1, WinningAnswer::Answer1),
            verdict(2, WinningAnswer::Answer2),
        ];
        assert_eq!(overall_winner(&verdicts, &criteria), WinningAnswer::Answer2);

        let verdicts = vec![
            verdict(1, WinningAnswer::Answer1),
            verdict(2, WinningAnswer::Draw),
        ];
        assert_eq!(overall_winner(&verdicts, &criteria), WinningAnswer::Answer1);
    }

    #[test]
    fn test_any_undecided_keeps_overall_undecided() {
        let criteria = vec![criterion(1, 1), criterion(2, 1)];
        let verdicts = vec![
            verdict(1, WinningAnswer::Answer1),
            verdict(2, WinningAnswer::Undecided),
        ];
        assert_eq!(
            overall_winner(&verdicts, &criteria),
            WinningAnswer::Undecided
        );
    }

    #[test]
    fn test_resolve_winner_inputs() {
        assert_eq!(
            resolve_winner(Some(&WinnerInput::AnswerId(10)), 10, 20).unwrap(),
            WinningAnswer::Answer1
        );
        assert_eq!(
            resolve_winner(Some(&WinnerInput::AnswerId(20)), 10, 20).unwrap(),
            WinningAnswer::Answer2
        );
        assert_eq!(
            resolve_winner(None, 10, 20).unwrap(),
            WinningAnswer::Undecided
        );
        assert_eq!(
            resolve_winner(Some(&WinnerInput::Keyword("draw".into())), 10, 20).unwrap(),
            WinningAnswer::Draw
        );
        assert!(resolve_winner(Some(&WinnerInput::AnswerId(30)), 10, 20).is_err());
        assert!(resolve_winner(Some(&WinnerInput::Keyword("left".into())), 10, 20).is_err());
    }

    #[test]
    fn test_criterion_set_must_match_exactly() {
        let criteria = vec![criterion(1, 1), criterion(2, 1)];
        let a1 = Some(WinnerInput::Keyword("answer1".into()));

        // 缺少一条
        let err = validate_verdicts(vec![input(1, a1.clone())], &criteria, 10, 20).unwrap_err();
        assert!(matches!(err, CompairError::Validation(_)));

        // 未知标准
        let err = validate_verdicts(
            vec![input(1, a1.clone()), input(2, None), input(3, None)],
            &criteria,
            10,
            20,
        )
        .unwrap_err();
        assert!(matches!(err, CompairError::Validation(_)));

        // 重复提交
        let err = validate_verdicts(
            vec![input(1, a1.clone()), input(1, None), input(2, None)],
            &criteria,
            10,
            20,
        )
        .unwrap_err();
        assert!(matches!(err, CompairError::Validation(_)));

        // 顺序按评审标准排列
        let verdicts =
            validate_verdicts(vec![input(2, None), input(1, a1)], &criteria, 10, 20).unwrap();
        assert_eq!(verdicts[0].criterion_id, 1);
        assert_eq!(verdicts[0].winner, WinningAnswer::Answer1);
        assert_eq!(verdicts[1].winner, WinningAnswer::Undecided);
    }
}
