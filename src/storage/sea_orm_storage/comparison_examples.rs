//! 比较示例存储操作

use super::SeaOrmStorage;
use crate::entity::comparison_examples::{ActiveModel, Column, Entity as ComparisonExamples};
use crate::errors::{CompairError, Result};
use crate::models::comparisons::{
    entities::ComparisonExample,
    requests::{CreateComparisonExampleRequest, UpdateComparisonExampleRequest},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 列出作业的比较示例
    pub async fn list_comparison_examples_impl(
        &self,
        assignment_id: i64,
        include_inactive: bool,
    ) -> Result<Vec<ComparisonExample>> {
        let mut select = ComparisonExamples::find().filter(Column::AssignmentId.eq(assignment_id));
        if !include_inactive {
            select = select.filter(Column::Active.eq(true));
        }

        let examples = select
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| CompairError::database_operation(format!("查询比较示例失败: {e}")))?;

        Ok(examples
            .into_iter()
            .map(|m| m.into_comparison_example())
            .collect())
    }

    /// 创建比较示例
    pub async fn create_comparison_example_impl(
        &self,
        assignment_id: i64,
        example: CreateComparisonExampleRequest,
    ) -> Result<ComparisonExample> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            assignment_id: Set(assignment_id),
            answer1_id: Set(example.answer1_id),
            answer2_id: Set(example.answer2_id),
            active: Set(true),
            created_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CompairError::database_operation(format!("创建比较示例失败: {e}")))?;

        Ok(result.into_comparison_example())
    }

    /// 修改比较示例的答案对，示例不属于该作业时返回 None
    pub async fn update_comparison_example_impl(
        &self,
        assignment_id: i64,
        example_id: i64,
        update: UpdateComparisonExampleRequest,
    ) -> Result<Option<ComparisonExample>> {
        let Some(existing) = ComparisonExamples::find_by_id(example_id)
            .filter(Column::AssignmentId.eq(assignment_id))
            .one(&self.db)
            .await
            .map_err(|e| CompairError::database_operation(format!("查询比较示例失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        model.answer1_id = Set(update.answer1_id);
        model.answer2_id = Set(update.answer2_id);

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| CompairError::database_operation(format!("更新比较示例失败: {e}")))?;

        Ok(Some(result.into_comparison_example()))
    }

    /// 停用比较示例（软删除）
    pub async fn deactivate_comparison_example_impl(
        &self,
        assignment_id: i64,
        example_id: i64,
    ) -> Result<bool> {
        let result = ComparisonExamples::update_many()
            .col_expr(Column::Active, sea_orm::sea_query::Expr::value(false))
            .filter(Column::Id.eq(example_id))
            .filter(Column::AssignmentId.eq(assignment_id))
            .filter(Column::Active.eq(true))
            .exec(&self.db)
            .await
            .map_err(|e| CompairError::database_operation(format!("停用比较示例失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
