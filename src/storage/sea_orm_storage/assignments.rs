//! 作业与评审标准存储操作（只读）

use super::SeaOrmStorage;
use crate::entity::assignment_criteria::{Column as LinkColumn, Entity as AssignmentCriteria};
use crate::entity::assignments::Entity as Assignments;
use crate::entity::criteria::Entity as Criteria;
use crate::errors::{CompairError, Result};
use crate::models::assignments::entities::{Assignment, AssignmentCriterion};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};

impl SeaOrmStorage {
    /// 通过ID获取作业
    pub async fn get_assignment_impl(&self, assignment_id: i64) -> Result<Option<Assignment>> {
        let result = Assignments::find_by_id(assignment_id)
            .one(&self.db)
            .await
            .map_err(|e| CompairError::database_operation(format!("查询作业失败: {e}")))?;

        Ok(result.map(|m| m.into_assignment()))
    }

    /// 获取作业的有效评审标准
    pub async fn list_assignment_criteria_impl(
        &self,
        assignment_id: i64,
    ) -> Result<Vec<AssignmentCriterion>> {
        let links = AssignmentCriteria::find()
            .filter(LinkColumn::AssignmentId.eq(assignment_id))
            .filter(LinkColumn::Active.eq(true))
            .order_by_asc(LinkColumn::Position)
            .order_by_asc(LinkColumn::Id)
            .find_also_related(Criteria)
            .all(&self.db)
            .await
            .map_err(|e| CompairError::database_operation(format!("查询评审标准失败: {e}")))?;

        Ok(links
            .into_iter()
            .map(|(link, criterion)| link.into_assignment_criterion(criterion))
            .collect())
    }
}
