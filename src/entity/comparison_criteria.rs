//! 比较的单项判定实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "comparison_criteria")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub comparison_id: i64,
    pub criterion_id: i64,
    pub winner: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub content: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::comparisons::Entity",
        from = "Column::ComparisonId",
        to = "super::comparisons::Column::Id"
    )]
    Comparison,
}

impl Related<super::comparisons::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comparison.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_comparison_criterion(
        self,
    ) -> crate::models::comparisons::entities::ComparisonCriterion {
        use crate::models::comparisons::entities::{ComparisonCriterion, WinningAnswer};

        ComparisonCriterion {
            id: self.id,
            comparison_id: self.comparison_id,
            criterion_id: self.criterion_id,
            winner: self
                .winner
                .parse::<WinningAnswer>()
                .unwrap_or(WinningAnswer::Undecided),
            content: self.content,
        }
    }
}
