//! 课程成员存储操作（只读）

use super::SeaOrmStorage;
use crate::entity::course_users::{Column, Entity as CourseUsers};
use crate::errors::{CompairError, Result};
use crate::models::course_users::entities::{CourseRole, CourseUser};
use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryFilter, QuerySelect};

impl SeaOrmStorage {
    /// 获取用户在课程中的成员信息
    pub async fn get_course_user_impl(
        &self,
        course_id: i64,
        user_id: i64,
    ) -> Result<Option<CourseUser>> {
        let result = CourseUsers::find()
            .filter(
                Condition::all()
                    .add(Column::CourseId.eq(course_id))
                    .add(Column::UserId.eq(user_id)),
            )
            .one(&self.db)
            .await
            .map_err(|e| CompairError::database_operation(format!("查询课程成员失败: {e}")))?;

        Ok(result.map(|m| m.into_course_user()))
    }

    /// 列出课程中持有指定角色的用户 ID
    pub async fn list_course_user_ids_by_roles_impl(
        &self,
        course_id: i64,
        roles: &[CourseRole],
    ) -> Result<Vec<i64>> {
        if roles.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = CourseUsers::find()
            .select_only()
            .column(Column::UserId)
            .filter(Column::CourseId.eq(course_id))
            .filter(Column::Role.is_in(roles.iter().map(|r| r.to_string())))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| CompairError::database_operation(format!("查询课程成员失败: {e}")))?;

        Ok(ids)
    }
}
