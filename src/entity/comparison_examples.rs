//! 比较示例实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "comparison_examples")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub assignment_id: i64,
    pub answer1_id: i64,
    pub answer2_id: i64,
    pub active: bool,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::assignments::Entity",
        from = "Column::AssignmentId",
        to = "super::assignments::Column::Id"
    )]
    Assignment,
}

impl Related<super::assignments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_comparison_example(self) -> crate::models::comparisons::entities::ComparisonExample {
        use crate::models::comparisons::entities::ComparisonExample;

        ComparisonExample {
            id: self.id,
            assignment_id: self.assignment_id,
            answer1_id: self.answer1_id,
            answer2_id: self.answer2_id,
            active: self.active,
            created_at: super::from_timestamp(self.created_at),
        }
    }
}
