//! 课程成员实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "course_users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_id: i64,
    pub user_id: i64,
    pub role: String,
    pub joined_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_course_user(self) -> crate::models::course_users::entities::CourseUser {
        use crate::models::course_users::entities::{CourseRole, CourseUser};

        CourseUser {
            id: self.id,
            course_id: self.course_id,
            user_id: self.user_id,
            // 未知角色按已退课处理，不授予任何比较资格
            role: self.role.parse::<CourseRole>().unwrap_or(CourseRole::Dropped),
            joined_at: super::from_timestamp(self.joined_at),
        }
    }
}
