//! 评审标准实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "criteria")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::assignment_criteria::Entity")]
    AssignmentCriteria,
}

impl Related<super::assignment_criteria::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AssignmentCriteria.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
