//! 答案单项得分实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "answer_criterion_scores")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub assignment_id: i64,
    pub answer_id: i64,
    pub criterion_id: i64,
    pub raw_win_count: i32,
    pub comparisons_count: i32,
    #[sea_orm(column_type = "Double")]
    pub normalized_score: f64,
    pub rank: i32,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::answers::Entity",
        from = "Column::AnswerId",
        to = "super::answers::Column::Id"
    )]
    Answer,
}

impl Related<super::answers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Answer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_answer_criterion_score(self) -> crate::models::scores::entities::AnswerCriterionScore {
        use crate::models::scores::entities::AnswerCriterionScore;

        AnswerCriterionScore {
            id: self.id,
            assignment_id: self.assignment_id,
            answer_id: self.answer_id,
            criterion_id: self.criterion_id,
            raw_win_count: i64::from(self.raw_win_count),
            comparisons_count: i64::from(self.comparisons_count),
            normalized_score: self.normalized_score,
            rank: i64::from(self.rank),
            updated_at: super::from_timestamp(self.updated_at),
        }
    }
}
