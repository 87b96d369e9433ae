//! 得分存储操作

use std::collections::{BTreeSet, HashMap};

use super::SeaOrmStorage;
use crate::engine::scoring::{CompletedOutcome, ScoreBoard, ScoreTally, assign_ranks};
use crate::entity::answer_criterion_scores::{
    ActiveModel, Column, Entity as AnswerCriterionScores, Model,
};
use crate::entity::comparison_criteria::Entity as ComparisonCriteria;
use crate::entity::comparisons::{Column as ComparisonColumn, Entity as Comparisons};
use crate::errors::{CompairError, Result};
use crate::models::comparisons::entities::WinningAnswer;
use crate::models::scores::{
    entities::AnswerCriterionScore, responses::RecomputeScoresResponse,
};
use sea_orm::sea_query::{Expr, ExprTrait};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::info;

/// 计数与名次按 32 位整数存储
fn to_i32(value: i64, field: &str) -> Result<i32> {
    i32::try_from(value)
        .map_err(|_| CompairError::database_operation(format!("{field} 超出存储范围: {value}")))
}

impl SeaOrmStorage {
    /// 写入单行计数，行不存在时创建
    async fn write_tally<C: ConnectionTrait>(
        conn: &C,
        assignment_id: i64,
        key: (i64, i64),
        tally: ScoreTally,
        existing: Option<Model>,
        now: i64,
    ) -> Result<()> {
        let (answer_id, criterion_id) = key;
        let raw_win_count = to_i32(tally.raw_win_count, "raw_win_count")?;
        let comparisons_count = to_i32(tally.comparisons_count, "comparisons_count")?;

        match existing {
            Some(row) => {
                let mut model: ActiveModel = row.into();
                model.raw_win_count = Set(raw_win_count);
                model.comparisons_count = Set(comparisons_count);
                model.normalized_score = Set(tally.normalized());
                model.updated_at = Set(now);
                model
                    .update(conn)
                    .await
                    .map_err(|e| CompairError::database_operation(format!("更新得分失败: {e}")))?;
            }
            None => {
                ActiveModel {
                    assignment_id: Set(assignment_id),
                    answer_id: Set(answer_id),
                    criterion_id: Set(criterion_id),
                    raw_win_count: Set(raw_win_count),
                    comparisons_count: Set(comparisons_count),
                    normalized_score: Set(tally.normalized()),
                    rank: Set(1),
                    updated_at: Set(now),
                    ..Default::default()
                }
                .insert(conn)
                .await
                .map_err(|e| CompairError::database_operation(format!("创建得分失败: {e}")))?;
            }
        }

        Ok(())
    }

    /// 重新计算某条标准下整个作业的名次
    async fn rerank<C: ConnectionTrait>(
        conn: &C,
        assignment_id: i64,
        criterion_id: i64,
        now: i64,
    ) -> Result<()> {
        let rows = AnswerCriterionScores::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .filter(Column::CriterionId.eq(criterion_id))
            .all(conn)
            .await
            .map_err(|e| CompairError::database_operation(format!("查询得分失败: {e}")))?;

        let cohort: Vec<(i64, f64)> = rows
            .iter()
            .map(|row| (row.answer_id, row.normalized_score))
            .collect();
        let ranks = assign_ranks(&cohort);

        for row in rows {
            let rank = ranks.get(&row.answer_id).copied().unwrap_or(1);
            if rank == i64::from(row.rank) {
                continue;
            }
            let mut model: ActiveModel = row.into();
            model.rank = Set(to_i32(rank, "rank")?);
            model.updated_at = Set(now);
            model
                .update(conn)
                .await
                .map_err(|e| CompairError::database_operation(format!("更新名次失败: {e}")))?;
        }

        Ok(())
    }

    /// 增量记录一次已完成比较（在调用方事务内执行）
    ///
    /// 计数在数据库内原子自增；得分行不存在时先以零计数插入，唯一索引冲突时忽略。
    pub(super) async fn apply_completion<C: ConnectionTrait>(
        conn: &C,
        assignment_id: i64,
        outcome: &CompletedOutcome,
        now: i64,
    ) -> Result<()> {
        for ((answer_id, criterion_id), won) in outcome.touched() {
            AnswerCriterionScores::insert(ActiveModel {
                assignment_id: Set(assignment_id),
                answer_id: Set(answer_id),
                criterion_id: Set(criterion_id),
                raw_win_count: Set(0),
                comparisons_count: Set(0),
                normalized_score: Set(ScoreTally::default().normalized()),
                rank: Set(1),
                updated_at: Set(now),
                ..Default::default()
            })
            .on_conflict_do_nothing_on([Column::AnswerId, Column::CriterionId])
            .exec_without_returning(conn)
            .await
            .map_err(|e| CompairError::database_operation(format!("创建得分失败: {e}")))?;

            AnswerCriterionScores::update_many()
                .col_expr(
                    Column::ComparisonsCount,
                    Expr::col(Column::ComparisonsCount).add(1),
                )
                .col_expr(
                    Column::RawWinCount,
                    Expr::col(Column::RawWinCount).add(i32::from(won)),
                )
                .col_expr(Column::UpdatedAt, Expr::value(now))
                .filter(Column::AnswerId.eq(answer_id))
                .filter(Column::CriterionId.eq(criterion_id))
                .exec(conn)
                .await
                .map_err(|e| CompairError::database_operation(format!("更新得分失败: {e}")))?;

            // 本事务已持有该行的写锁，读到的计数即为自增后的值
            let row = AnswerCriterionScores::find()
                .filter(Column::AnswerId.eq(answer_id))
                .filter(Column::CriterionId.eq(criterion_id))
                .one(conn)
                .await
                .map_err(|e| CompairError::database_operation(format!("查询得分失败: {e}")))?
                .ok_or_else(|| CompairError::database_operation("得分行不存在"))?;

            let tally = ScoreTally {
                raw_win_count: i64::from(row.raw_win_count),
                comparisons_count: i64::from(row.comparisons_count),
            };
            AnswerCriterionScores::update_many()
                .col_expr(Column::NormalizedScore, Expr::value(tally.normalized()))
                .filter(Column::Id.eq(row.id))
                .exec(conn)
                .await
                .map_err(|e| CompairError::database_operation(format!("更新得分失败: {e}")))?;
        }

        let criteria: BTreeSet<i64> = outcome.verdicts.iter().map(|(c, _)| *c).collect();
        for criterion_id in criteria {
            Self::rerank(conn, assignment_id, criterion_id, now).await?;
        }

        Ok(())
    }

    /// 列出作业的全部得分
    pub async fn list_answer_scores_impl(
        &self,
        assignment_id: i64,
    ) -> Result<Vec<AnswerCriterionScore>> {
        let rows = AnswerCriterionScores::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .order_by_asc(Column::AnswerId)
            .order_by_asc(Column::CriterionId)
            .all(&self.db)
            .await
            .map_err(|e| CompairError::database_operation(format!("查询得分失败: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|m| m.into_answer_criterion_score())
            .collect())
    }

    /// 由已完成的非示例比较重新计算作业得分
    pub async fn recompute_scores_impl(
        &self,
        assignment_id: i64,
    ) -> Result<RecomputeScoresResponse> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CompairError::database_operation(format!("开启事务失败: {e}")))?;

        let now = chrono::Utc::now().timestamp();

        let history = Comparisons::find()
            .filter(ComparisonColumn::AssignmentId.eq(assignment_id))
            .filter(ComparisonColumn::Completed.eq(true))
            .filter(ComparisonColumn::ComparisonExampleId.is_null())
            .order_by_asc(ComparisonColumn::Id)
            .find_with_related(ComparisonCriteria)
            .all(&txn)
            .await
            .map_err(|e| CompairError::database_operation(format!("查询比较历史失败: {e}")))?;

        let outcomes: Vec<CompletedOutcome> = history
            .into_iter()
            .map(|(comparison, criteria)| CompletedOutcome {
                answer1_id: comparison.answer1_id,
                answer2_id: comparison.answer2_id,
                verdicts: criteria
                    .into_iter()
                    .filter_map(|row| {
                        row.winner
                            .parse::<WinningAnswer>()
                            .ok()
                            .map(|winner| (row.criterion_id, winner))
                    })
                    .collect(),
            })
            .collect();

        let board = ScoreBoard::rebuild(&outcomes);

        let mut existing: HashMap<(i64, i64), Model> = AnswerCriterionScores::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .all(&txn)
            .await
            .map_err(|e| CompairError::database_operation(format!("查询得分失败: {e}")))?
            .into_iter()
            .map(|row| ((row.answer_id, row.criterion_id), row))
            .collect();

        let mut criteria = board.criteria();
        let mut rows_written = 0i64;

        for (key, tally) in board.tallies() {
            let row = existing.remove(key);
            Self::write_tally(&txn, assignment_id, *key, *tally, row, now).await?;
            rows_written += 1;
        }

        // 已无比较历史的答案归零，不删除
        for (key, row) in existing {
            criteria.insert(key.1);
            Self::write_tally(&txn, assignment_id, key, ScoreTally::default(), Some(row), now)
                .await?;
            rows_written += 1;
        }

        for criterion_id in criteria {
            Self::rerank(&txn, assignment_id, criterion_id, now).await?;
        }

        txn.commit()
            .await
            .map_err(|e| CompairError::database_operation(format!("提交事务失败: {e}")))?;

        info!(
            "Recomputed scores for assignment {}: {} comparisons, {} rows",
            assignment_id,
            outcomes.len(),
            rows_written
        );

        Ok(RecomputeScoresResponse {
            assignment_id,
            comparisons_counted: outcomes.len() as i64,
            rows_written,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_i32_rejects_out_of_range_counts() {
        assert_eq!(to_i32(42, "rank").unwrap(), 42);
        let err = to_i32(i64::from(i32::MAX) + 1, "comparisons_count").unwrap_err();
        assert!(matches!(err, CompairError::DatabaseOperation(_)));
        assert!(err.message().contains("comparisons_count"));
    }
}
