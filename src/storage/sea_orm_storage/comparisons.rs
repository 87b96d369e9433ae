//! 比较存储操作
//!
//! 未完成比较由 `(assignment_id, user_id, open_slot)` 唯一索引保护：新建时在事务中
//! 先查后插，插入撞上唯一约束说明并发请求已建好未完成比较，直接返回该比较。
//! 完成比较时先用条件更新占住该记录，再写入判定与得分，保证只会完成一次。

use std::collections::{HashMap, HashSet};

use super::SeaOrmStorage;
use crate::engine::scoring::CompletedOutcome;
use crate::engine::verdict::CriterionVerdict;
use crate::entity::comparison_criteria::{
    self, Column as CriterionColumn, Entity as ComparisonCriteria,
};
use crate::entity::comparisons::{ActiveModel, Column, Entity as Comparisons, Model, OPEN_SLOT};
use crate::errors::{CompairError, Result};
use crate::models::comparisons::{
    entities::{Comparison, WinningAnswer},
    requests::NewComparison,
};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, SqlErr, TransactionTrait,
};
use tracing::debug;

impl SeaOrmStorage {
    /// 加载比较的单项判定并转换为业务模型
    async fn load_comparison<C: ConnectionTrait>(conn: &C, model: Model) -> Result<Comparison> {
        let criteria = ComparisonCriteria::find()
            .filter(CriterionColumn::ComparisonId.eq(model.id))
            .order_by_asc(CriterionColumn::Id)
            .all(conn)
            .await
            .map_err(|e| CompairError::database_operation(format!("查询比较判定失败: {e}")))?;

        Ok(model.into_comparison(criteria))
    }

    /// 获取评审者在作业中的未完成比较
    pub async fn find_open_comparison_impl<C: ConnectionTrait>(
        &self,
        conn: &C,
        assignment_id: i64,
        user_id: i64,
    ) -> Result<Option<Comparison>> {
        let model = Comparisons::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .filter(Column::UserId.eq(user_id))
            .filter(Column::OpenSlot.eq(OPEN_SLOT))
            .one(conn)
            .await
            .map_err(|e| CompairError::database_operation(format!("查询未完成比较失败: {e}")))?;

        match model {
            Some(model) => Ok(Some(Self::load_comparison(conn, model).await?)),
            None => Ok(None),
        }
    }

    /// 通过ID获取比较
    pub async fn get_comparison_impl(&self, comparison_id: i64) -> Result<Option<Comparison>> {
        let model = Comparisons::find_by_id(comparison_id)
            .one(&self.db)
            .await
            .map_err(|e| CompairError::database_operation(format!("查询比较失败: {e}")))?;

        match model {
            Some(model) => Ok(Some(Self::load_comparison(&self.db, model).await?)),
            None => Ok(None),
        }
    }

    /// 列出评审者在作业中的全部比较
    pub async fn list_user_comparisons_impl(
        &self,
        assignment_id: i64,
        user_id: i64,
    ) -> Result<Vec<Comparison>> {
        let rows = Comparisons::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .filter(Column::UserId.eq(user_id))
            .order_by_asc(Column::Id)
            .find_with_related(ComparisonCriteria)
            .all(&self.db)
            .await
            .map_err(|e| CompairError::database_operation(format!("查询比较列表失败: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|(model, criteria)| model.into_comparison(criteria))
            .collect())
    }

    /// 统计每个答案已完成的非示例比较次数（所有评审者）
    pub async fn count_completed_comparisons_by_answer_impl(
        &self,
        assignment_id: i64,
    ) -> Result<HashMap<i64, i64>> {
        let pairs: Vec<(i64, i64)> = Comparisons::find()
            .select_only()
            .column(Column::Answer1Id)
            .column(Column::Answer2Id)
            .filter(Column::AssignmentId.eq(assignment_id))
            .filter(Column::Completed.eq(true))
            .filter(Column::ComparisonExampleId.is_null())
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| CompairError::database_operation(format!("统计比较次数失败: {e}")))?;

        let mut counts: HashMap<i64, i64> = HashMap::new();
        for (answer1_id, answer2_id) in pairs {
            *counts.entry(answer1_id).or_default() += 1;
            *counts.entry(answer2_id).or_default() += 1;
        }
        Ok(counts)
    }

    /// 新建未完成比较
    pub async fn open_comparison_impl(
        &self,
        new: NewComparison,
        criterion_ids: &[i64],
    ) -> Result<(Comparison, bool)> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CompairError::database_operation(format!("开启事务失败: {e}")))?;

        if let Some(existing) = self
            .find_open_comparison_impl(&txn, new.assignment_id, new.user_id)
            .await?
        {
            txn.commit()
                .await
                .map_err(|e| CompairError::database_operation(format!("提交事务失败: {e}")))?;
            return Ok((existing, false));
        }

        let now = chrono::Utc::now().timestamp();
        let model = ActiveModel {
            assignment_id: Set(new.assignment_id),
            user_id: Set(new.user_id),
            answer1_id: Set(new.answer1_id),
            answer2_id: Set(new.answer2_id),
            comparison_example_id: Set(new.comparison_example_id),
            winner: Set(None),
            completed: Set(false),
            open_slot: Set(Some(OPEN_SLOT)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let inserted = match model.insert(&txn).await {
            Ok(inserted) => inserted,
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                txn.rollback()
                    .await
                    .map_err(|e| CompairError::database_operation(format!("回滚事务失败: {e}")))?;
                debug!(
                    "Concurrent open comparison detected for user {} on assignment {}",
                    new.user_id, new.assignment_id
                );
                return self
                    .find_open_comparison_impl(&self.db, new.assignment_id, new.user_id)
                    .await?
                    .map(|existing| (existing, false))
                    .ok_or_else(|| {
                        CompairError::database_operation("并发创建比较后未找到未完成的比较")
                    });
            }
            Err(e) => {
                return Err(CompairError::database_operation(format!(
                    "创建比较失败: {e}"
                )));
            }
        };

        let mut criteria = Vec::with_capacity(criterion_ids.len());
        for criterion_id in criterion_ids {
            let row = comparison_criteria::ActiveModel {
                comparison_id: Set(inserted.id),
                criterion_id: Set(*criterion_id),
                winner: Set(WinningAnswer::Undecided.to_string()),
                content: Set(None),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(|e| CompairError::database_operation(format!("创建比较判定失败: {e}")))?;
            criteria.push(row);
        }

        txn.commit()
            .await
            .map_err(|e| CompairError::database_operation(format!("提交事务失败: {e}")))?;

        Ok((inserted.into_comparison(criteria), true))
    }

    /// 写入单项判定：更新已有行、补充缺失行、删除已不属于作业的行
    async fn write_verdicts<C: ConnectionTrait>(
        conn: &C,
        comparison_id: i64,
        verdicts: &[CriterionVerdict],
    ) -> Result<()> {
        let mut existing: HashMap<i64, comparison_criteria::Model> = ComparisonCriteria::find()
            .filter(CriterionColumn::ComparisonId.eq(comparison_id))
            .all(conn)
            .await
            .map_err(|e| CompairError::database_operation(format!("查询比较判定失败: {e}")))?
            .into_iter()
            .map(|row| (row.criterion_id, row))
            .collect();

        let keep: HashSet<i64> = verdicts.iter().map(|v| v.criterion_id).collect();
        let stale: Vec<i64> = existing
            .values()
            .filter(|row| !keep.contains(&row.criterion_id))
            .map(|row| row.id)
            .collect();

        if !stale.is_empty() {
            ComparisonCriteria::delete_many()
                .filter(CriterionColumn::Id.is_in(stale))
                .exec(conn)
                .await
                .map_err(|e| {
                    CompairError::database_operation(format!("删除过期比较判定失败: {e}"))
                })?;
        }

        for verdict in verdicts {
            match existing.remove(&verdict.criterion_id) {
                Some(row) => {
                    let mut model: comparison_criteria::ActiveModel = row.into();
                    model.winner = Set(verdict.winner.to_string());
                    model.content = Set(verdict.content.clone());
                    model.update(conn).await.map_err(|e| {
                        CompairError::database_operation(format!("更新比较判定失败: {e}"))
                    })?;
                }
                None => {
                    comparison_criteria::ActiveModel {
                        comparison_id: Set(comparison_id),
                        criterion_id: Set(verdict.criterion_id),
                        winner: Set(verdict.winner.to_string()),
                        content: Set(verdict.content.clone()),
                        ..Default::default()
                    }
                    .insert(conn)
                    .await
                    .map_err(|e| {
                        CompairError::database_operation(format!("创建比较判定失败: {e}"))
                    })?;
                }
            }
        }

        Ok(())
    }

    /// 保存草稿判定
    pub async fn save_comparison_draft_impl(
        &self,
        comparison_id: i64,
        verdicts: &[CriterionVerdict],
    ) -> Result<Comparison> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CompairError::database_operation(format!("开启事务失败: {e}")))?;

        let now = chrono::Utc::now().timestamp();
        let touched = Comparisons::update_many()
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::Id.eq(comparison_id))
            .filter(Column::Completed.eq(false))
            .exec(&txn)
            .await
            .map_err(|e| CompairError::database_operation(format!("更新比较失败: {e}")))?;

        if touched.rows_affected == 0 {
            txn.rollback()
                .await
                .map_err(|e| CompairError::database_operation(format!("回滚事务失败: {e}")))?;
            return Err(CompairError::no_open_comparison("该比较已完成，无法修改"));
        }

        Self::write_verdicts(&txn, comparison_id, verdicts).await?;

        txn.commit()
            .await
            .map_err(|e| CompairError::database_operation(format!("提交事务失败: {e}")))?;

        self.get_comparison_impl(comparison_id)
            .await?
            .ok_or_else(|| CompairError::not_found("比较不存在"))
    }

    /// 完成比较并更新得分
    pub async fn complete_comparison_impl(
        &self,
        comparison_id: i64,
        verdicts: &[CriterionVerdict],
        winner: WinningAnswer,
    ) -> Result<Comparison> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CompairError::database_operation(format!("开启事务失败: {e}")))?;

        let now = chrono::Utc::now().timestamp();

        // 条件更新占住记录，并发的第二次提交在这里落空
        let claimed = Comparisons::update_many()
            .col_expr(Column::Completed, Expr::value(true))
            .col_expr(Column::OpenSlot, Expr::value(Option::<i16>::None))
            .col_expr(Column::Winner, Expr::value(Some(winner.to_string())))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::Id.eq(comparison_id))
            .filter(Column::Completed.eq(false))
            .exec(&txn)
            .await
            .map_err(|e| CompairError::database_operation(format!("完成比较失败: {e}")))?;

        if claimed.rows_affected == 0 {
            txn.rollback()
                .await
                .map_err(|e| CompairError::database_operation(format!("回滚事务失败: {e}")))?;
            return Err(CompairError::no_open_comparison("该比较已完成，无法重复提交"));
        }

        Self::write_verdicts(&txn, comparison_id, verdicts).await?;

        let model = Comparisons::find_by_id(comparison_id)
            .one(&txn)
            .await
            .map_err(|e| CompairError::database_operation(format!("查询比较失败: {e}")))?
            .ok_or_else(|| CompairError::not_found("比较不存在"))?;

        // 比较示例只用于校准，不计入得分
        if model.comparison_example_id.is_none() {
            let outcome = CompletedOutcome {
                answer1_id: model.answer1_id,
                answer2_id: model.answer2_id,
                verdicts: verdicts
                    .iter()
                    .map(|v| (v.criterion_id, v.winner))
                    .collect(),
            };
            Self::apply_completion(&txn, model.assignment_id, &outcome, now).await?;
        }

        let comparison = Self::load_comparison(&txn, model).await?;

        txn.commit()
            .await
            .map_err(|e| CompairError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(comparison)
    }
}
