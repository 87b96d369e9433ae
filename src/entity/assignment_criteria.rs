//! 作业与评审标准关联实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "assignment_criteria")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub assignment_id: i64,
    pub criterion_id: i64,
    pub weight: i32,
    pub position: i32,
    pub active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::assignments::Entity",
        from = "Column::AssignmentId",
        to = "super::assignments::Column::Id"
    )]
    Assignment,
    #[sea_orm(
        belongs_to = "super::criteria::Entity",
        from = "Column::CriterionId",
        to = "super::criteria::Column::Id"
    )]
    Criterion,
}

impl Related<super::assignments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignment.def()
    }
}

impl Related<super::criteria::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Criterion.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// 与评审标准合并为业务模型
    pub fn into_assignment_criterion(
        self,
        criterion: Option<super::criteria::Model>,
    ) -> crate::models::assignments::entities::AssignmentCriterion {
        use crate::models::assignments::entities::AssignmentCriterion;

        let (name, description) = criterion
            .map(|c| (c.name, c.description))
            .unwrap_or_default();

        AssignmentCriterion {
            criterion_id: self.criterion_id,
            name,
            description,
            weight: self.weight,
            position: self.position,
        }
    }
}
