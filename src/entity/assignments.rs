//! 作业实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "assignments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_id: i64,
    pub name: String,
    pub number_of_comparisons: i32,
    pub pairing_algorithm: String,
    pub educators_can_compare: bool,
    pub answer_start: Option<i64>,
    pub answer_end: Option<i64>,
    pub compare_start: Option<i64>,
    pub compare_end: Option<i64>,
    pub active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::answers::Entity")]
    Answers,
    #[sea_orm(has_many = "super::assignment_criteria::Entity")]
    AssignmentCriteria,
    #[sea_orm(has_many = "super::comparisons::Entity")]
    Comparisons,
}

impl Related<super::answers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Answers.def()
    }
}

impl Related<super::assignment_criteria::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AssignmentCriteria.def()
    }
}

impl Related<super::comparisons::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comparisons.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_assignment(self) -> crate::models::assignments::entities::Assignment {
        use crate::models::assignments::entities::Assignment;

        Assignment {
            id: self.id,
            course_id: self.course_id,
            name: self.name,
            number_of_comparisons: self.number_of_comparisons,
            pairing_algorithm: self.pairing_algorithm,
            educators_can_compare: self.educators_can_compare,
            answer_start: super::from_timestamp_opt(self.answer_start),
            answer_end: super::from_timestamp_opt(self.answer_end),
            compare_start: super::from_timestamp_opt(self.compare_start),
            compare_end: super::from_timestamp_opt(self.compare_end),
            active: self.active,
            created_at: super::from_timestamp(self.created_at),
            updated_at: super::from_timestamp(self.updated_at),
        }
    }
}
