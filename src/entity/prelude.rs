//! 预导入模块，方便使用

pub use super::answer_criterion_scores::{
    ActiveModel as AnswerCriterionScoreActiveModel, Entity as AnswerCriterionScores,
    Model as AnswerCriterionScoreModel,
};
pub use super::answers::{ActiveModel as AnswerActiveModel, Entity as Answers, Model as AnswerModel};
pub use super::assignment_criteria::{
    ActiveModel as AssignmentCriterionActiveModel, Entity as AssignmentCriteria,
    Model as AssignmentCriterionModel,
};
pub use super::assignments::{
    ActiveModel as AssignmentActiveModel, Entity as Assignments, Model as AssignmentModel,
};
pub use super::comparison_criteria::{
    ActiveModel as ComparisonCriterionActiveModel, Entity as ComparisonCriteria,
    Model as ComparisonCriterionModel,
};
pub use super::comparison_examples::{
    ActiveModel as ComparisonExampleActiveModel, Entity as ComparisonExamples,
    Model as ComparisonExampleModel,
};
pub use super::comparisons::{
    ActiveModel as ComparisonActiveModel, Entity as Comparisons, Model as ComparisonModel,
};
pub use super::course_users::{
    ActiveModel as CourseUserActiveModel, Entity as CourseUsers, Model as CourseUserModel,
};
pub use super::criteria::{ActiveModel as CriterionActiveModel, Entity as Criteria, Model as CriterionModel};
