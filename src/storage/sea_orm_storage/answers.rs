//! 答案存储操作（只读）

use super::SeaOrmStorage;
use crate::entity::answers::{Column, Entity as Answers};
use crate::errors::{CompairError, Result};
use crate::models::answers::entities::Answer;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};

impl SeaOrmStorage {
    /// 列出作业的全部答案
    pub async fn list_answers_impl(&self, assignment_id: i64) -> Result<Vec<Answer>> {
        let answers = Answers::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| CompairError::database_operation(format!("查询答案列表失败: {e}")))?;

        Ok(answers.into_iter().map(|m| m.into_answer()).collect())
    }

    /// 通过ID获取答案
    pub async fn get_answer_impl(&self, answer_id: i64) -> Result<Option<Answer>> {
        let result = Answers::find_by_id(answer_id)
            .one(&self.db)
            .await
            .map_err(|e| CompairError::database_operation(format!("查询答案失败: {e}")))?;

        Ok(result.map(|m| m.into_answer()))
    }
}
