use std::collections::{HashMap, HashSet};

use crate::models::{
    answers::entities::Answer,
    comparisons::entities::{Comparison, ComparisonExample},
};

/// 评审者需要完成的比较示例（按 ID 升序）
///
/// 仅保留启用中的示例，且两份答案都仍可比较、都不是评审者本人的答案。
/// 被跳过的示例不计入评审者的配额。
pub fn applicable_examples<'a>(
    examples: &'a [ComparisonExample],
    answers: &[Answer],
    assignment_id: i64,
    judge_id: i64,
) -> Vec<&'a ComparisonExample> {
    let by_id: HashMap<i64, &Answer> = answers.iter().map(|a| (a.id, a)).collect();
    let usable = |answer_id: i64| {
        by_id
            .get(&answer_id)
            .is_some_and(|a| a.is_comparable_for(assignment_id) && a.user_id != judge_id)
    };

    let mut applicable: Vec<&ComparisonExample> = examples
        .iter()
        .filter(|e| e.active && usable(e.answer1_id) && usable(e.answer2_id))
        .collect();
    applicable.sort_by_key(|e| e.id);
    applicable
}

/// 返回评审者下一个尚未完成的比较示例
///
/// 评审者的任何比较引用过某示例即视为已消耗。
pub fn next_example<'a>(
    applicable: &[&'a ComparisonExample],
    consumed: &HashSet<i64>,
) -> Option<&'a ComparisonExample> {
    applicable
        .iter()
        .copied()
        .find(|e| !consumed.contains(&e.id))
}

/// 评审者的完成进度：(常规比较完成数, 仍需完成的示例中已完成的数量)
pub fn completed_progress(history: &[Comparison], applicable: &[&ComparisonExample]) -> (i64, i64) {
    let required: HashSet<i64> = applicable.iter().map(|e| e.id).collect();
    history
        .iter()
        .filter(|c| c.completed)
        .fold((0, 0), |(regular, examples), c| match c.comparison_example_id {
            None => (regular + 1, examples),
            Some(id) if required.contains(&id) => (regular, examples + 1),
            Some(_) => (regular, examples),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn example(id: i64, active: bool) -> ComparisonExample {
        ComparisonExample {
            id,
            assignment_id: 1,
            answer1_id: id * 10,
            answer2_id: id * 10 + 1,
            active,
            created_at: Utc::now(),
        }
    }

    fn answer(id: i64, user_id: i64) -> Answer {
        let now = Utc::now();
        Answer {
            id,
            assignment_id: 1,
            user_id,
            content: None,
            active: true,
            draft: false,
            practice: false,
            created_at: now,
            updated_at: now,
        }
    }

    fn answers_for(examples: &[ComparisonExample]) -> Vec<Answer> {
        examples
            .iter()
            .flat_map(|e| [answer(e.answer1_id, e.answer1_id), answer(e.answer2_id, e.answer2_id)])
            .collect()
    }

    fn comparison(id: i64, example_id: Option<i64>, completed: bool) -> Comparison {
        let now = Utc::now();
        Comparison {
            id,
            assignment_id: 1,
            user_id: 1,
            answer1_id: 1,
            answer2_id: 2,
            comparison_example_id: example_id,
            winner: None,
            completed,
            comparison_criteria: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_examples_served_in_order_until_consumed() {
        let examples = vec![example(3, true), example(1, true), example(2, false)];
        let answers = answers_for(&examples);
        let applicable = applicable_examples(&examples, &answers, 1, 999);
        let mut consumed = HashSet::new();

        assert_eq!(next_example(&applicable, &consumed).map(|e| e.id), Some(1));
        consumed.insert(1);
        assert_eq!(next_example(&applicable, &consumed).map(|e| e.id), Some(3));
        consumed.insert(3);
        assert!(next_example(&applicable, &consumed).is_none());
    }

    #[test]
    fn test_examples_skip_own_and_unusable_answers() {
        let examples = vec![example(1, true), example(2, true), example(3, true)];
        let mut answers = answers_for(&examples);
        // 评审者 10 是示例 1 中答案 10 的作者
        answers[0].user_id = 10;
        // 示例 2 的答案之一变为草稿，示例 3 的答案之一缺失
        answers[2].draft = true;
        answers.retain(|a| a.id != 31);

        assert!(applicable_examples(&examples, &answers, 1, 10).is_empty());
        let others = applicable_examples(&examples, &answers, 1, 20);
        assert_eq!(others.iter().map(|e| e.id).collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_progress_ignores_examples_no_longer_required() {
        let examples = vec![example(1, true), example(2, false)];
        let answers = answers_for(&examples);
        let applicable = applicable_examples(&examples, &answers, 1, 999);
        let history = vec![
            comparison(1, Some(1), true),
            comparison(2, Some(2), true),
            comparison(3, None, true),
            comparison(4, None, false),
        ];

        assert_eq!(completed_progress(&history, &applicable), (1, 1));
    }
}
