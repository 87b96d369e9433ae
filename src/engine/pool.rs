use std::collections::HashSet;

use crate::errors::{CompairError, Result};
use crate::models::answers::entities::Answer;

/// 进入配对的答案引用
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnswerRef {
    pub id: i64,
    pub author_id: i64,
}

/// 计算评审者可比较的答案集合（按答案 ID 升序）
///
/// 排除评审者自己的答案、草稿/停用/练习答案；`include_role_restricted` 为 false 时
/// 同时排除 `restricted_authors`（课程中的教师/助教）提交的答案。
/// 少于两个答案时返回 `InsufficientAnswers`。
pub fn eligible_answers(
    answers: &[Answer],
    assignment_id: i64,
    judge_id: i64,
    restricted_authors: &HashSet<i64>,
    include_role_restricted: bool,
) -> Result<Vec<AnswerRef>> {
    let mut pool: Vec<AnswerRef> = answers
        .iter()
        .filter(|a| a.is_comparable_for(assignment_id))
        .filter(|a| a.user_id != judge_id)
        .filter(|a| include_role_restricted || !restricted_authors.contains(&a.user_id))
        .map(|a| AnswerRef {
            id: a.id,
            author_id: a.user_id,
        })
        .collect();

    pool.sort();
    pool.dedup_by_key(|a| a.id);

    if pool.len() < 2 {
        return Err(CompairError::insufficient_answers(
            "可供比较的答案不足两份，请稍后再试",
        ));
    }

    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

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

    #[test]
    fn test_excludes_own_draft_inactive_and_practice() {
        let mut draft = answer(3, 12);
        draft.draft = true;
        let mut inactive = answer(4, 13);
        inactive.active = false;
        let mut practice = answer(5, 14);
        practice.practice = true;
        let mut other_assignment = answer(6, 15);
        other_assignment.assignment_id = 2;

        let answers = vec![
            answer(2, 11),
            answer(1, 10),
            draft,
            inactive,
            practice,
            other_assignment,
            answer(7, 99),
            answer(8, 16),
        ];

        let pool = eligible_answers(&answers, 1, 99, &HashSet::new(), false).unwrap();
        let ids: Vec<i64> = pool.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 2, 8]);
    }

    #[test]
    fn test_role_restricted_authors() {
        let answers = vec![answer(1, 10), answer(2, 11), answer(3, 50)];
        let restricted = HashSet::from([50]);

        let pool = eligible_answers(&answers, 1, 99, &restricted, false).unwrap();
        assert_eq!(pool.len(), 2);

        let pool = eligible_answers(&answers, 1, 99, &restricted, true).unwrap();
        assert_eq!(pool.len(), 3);
    }

    #[test]
    fn test_insufficient_answers() {
        let answers = vec![answer(1, 10), answer(2, 99)];
        let err = eligible_answers(&answers, 1, 99, &HashSet::new(), false).unwrap_err();
        assert!(matches!(err, CompairError::InsufficientAnswers(_)));
    }
}
