use std::collections::HashMap;
use std::sync::Arc;

use crate::engine::verdict::CriterionVerdict;
use crate::models::{
    answers::entities::Answer,
    assignments::entities::{Assignment, AssignmentCriterion},
    comparisons::{
        entities::{Comparison, ComparisonExample, WinningAnswer},
        requests::{CreateComparisonExampleRequest, NewComparison, UpdateComparisonExampleRequest},
    },
    course_users::entities::{CourseRole, CourseUser},
    scores::{entities::AnswerCriterionScore, responses::RecomputeScoresResponse},
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 作业（只读）
    // 通过ID获取作业
    async fn get_assignment(&self, assignment_id: i64) -> Result<Option<Assignment>>;
    // 获取作业的有效评审标准（启用的关联，按位置排序）
    async fn list_assignment_criteria(&self, assignment_id: i64)
    -> Result<Vec<AssignmentCriterion>>;

    /// 课程成员（只读）
    // 获取用户在课程中的成员信息
    async fn get_course_user(&self, course_id: i64, user_id: i64) -> Result<Option<CourseUser>>;
    // 列出课程中持有指定角色的用户 ID
    async fn list_course_user_ids_by_roles(
        &self,
        course_id: i64,
        roles: &[CourseRole],
    ) -> Result<Vec<i64>>;

    /// 答案（只读）
    // 列出作业的全部答案
    async fn list_answers(&self, assignment_id: i64) -> Result<Vec<Answer>>;
    // 通过ID获取答案
    async fn get_answer(&self, answer_id: i64) -> Result<Option<Answer>>;

    /// 比较示例管理
    // 列出作业的比较示例（按 ID 升序）
    async fn list_comparison_examples(
        &self,
        assignment_id: i64,
        include_inactive: bool,
    ) -> Result<Vec<ComparisonExample>>;
    // 创建比较示例
    async fn create_comparison_example(
        &self,
        assignment_id: i64,
        example: CreateComparisonExampleRequest,
    ) -> Result<ComparisonExample>;
    // 修改比较示例的答案对，示例不存在时返回 None
    async fn update_comparison_example(
        &self,
        assignment_id: i64,
        example_id: i64,
        update: UpdateComparisonExampleRequest,
    ) -> Result<Option<ComparisonExample>>;
    // 停用比较示例
    async fn deactivate_comparison_example(
        &self,
        assignment_id: i64,
        example_id: i64,
    ) -> Result<bool>;

    /// 比较
    // 获取评审者在作业中的未完成比较
    async fn find_open_comparison(
        &self,
        assignment_id: i64,
        user_id: i64,
    ) -> Result<Option<Comparison>>;
    // 通过ID获取比较
    async fn get_comparison(&self, comparison_id: i64) -> Result<Option<Comparison>>;
    // 列出评审者在作业中的全部比较
    async fn list_user_comparisons(
        &self,
        assignment_id: i64,
        user_id: i64,
    ) -> Result<Vec<Comparison>>;
    // 统计每个答案已完成的非示例比较次数
    async fn count_completed_comparisons_by_answer(
        &self,
        assignment_id: i64,
    ) -> Result<HashMap<i64, i64>>;
    // 新建未完成比较，已存在未完成比较时返回该比较；布尔值表示是否新建
    async fn open_comparison(
        &self,
        comparison: NewComparison,
        criterion_ids: &[i64],
    ) -> Result<(Comparison, bool)>;
    // 保存草稿判定，比较保持未完成
    async fn save_comparison_draft(
        &self,
        comparison_id: i64,
        verdicts: &[CriterionVerdict],
    ) -> Result<Comparison>;
    // 完成比较并在同一事务中更新得分
    async fn complete_comparison(
        &self,
        comparison_id: i64,
        verdicts: &[CriterionVerdict],
        winner: WinningAnswer,
    ) -> Result<Comparison>;

    /// 得分
    // 列出作业的全部得分
    async fn list_answer_scores(&self, assignment_id: i64) -> Result<Vec<AnswerCriterionScore>>;
    // 由比较历史重新计算作业得分
    async fn recompute_scores(&self, assignment_id: i64) -> Result<RecomputeScoresResponse>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
