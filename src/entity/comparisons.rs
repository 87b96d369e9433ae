//! 比较实体

use sea_orm::entity::prelude::*;

/// 未完成比较的占位值，完成后置空
pub const OPEN_SLOT: i16 = 1;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "comparisons")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub assignment_id: i64,
    pub user_id: i64,
    pub answer1_id: i64,
    pub answer2_id: i64,
    pub comparison_example_id: Option<i64>,
    pub winner: Option<String>,
    pub completed: bool,
    pub open_slot: Option<i16>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::assignments::Entity",
        from = "Column::AssignmentId",
        to = "super::assignments::Column::Id"
    )]
    Assignment,
    #[sea_orm(has_many = "super::comparison_criteria::Entity")]
    ComparisonCriteria,
}

impl Related<super::assignments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignment.def()
    }
}

impl Related<super::comparison_criteria::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ComparisonCriteria.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_comparison(
        self,
        criteria: Vec<super::comparison_criteria::Model>,
    ) -> crate::models::comparisons::entities::Comparison {
        use crate::models::comparisons::entities::{Comparison, WinningAnswer};

        Comparison {
            id: self.id,
            assignment_id: self.assignment_id,
            user_id: self.user_id,
            answer1_id: self.answer1_id,
            answer2_id: self.answer2_id,
            comparison_example_id: self.comparison_example_id,
            winner: self
                .winner
                .as_deref()
                .and_then(|w| w.parse::<WinningAnswer>().ok()),
            completed: self.completed,
            comparison_criteria: criteria
                .into_iter()
                .map(|c| c.into_comparison_criterion())
                .collect(),
            created_at: super::from_timestamp(self.created_at),
            updated_at: super::from_timestamp(self.updated_at),
        }
    }
}
