use serde::Serialize;
use ts_rs::TS;

use super::entities::{Comparison, ComparisonExample};
use crate::models::{answers::entities::AnswerView, assignments::entities::AssignmentCriterion};

/// 获取下一对答案的响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "comparison.ts")]
pub struct NextPairResponse {
    pub comparison: Comparison,
    pub answer1: AnswerView,
    pub answer2: AnswerView,
    pub criteria: Vec<AssignmentCriterion>,
    // 是否为尚未完成的比较（重复请求返回同一对）
    pub is_resume: bool,
    // 当前是第几次比较（从 1 开始）
    pub current: i64,
    pub comparisons_done: i64,
    pub comparisons_required: i64,
}

/// 提交比较的响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "comparison.ts")]
pub struct SubmitComparisonResponse {
    pub comparison: Comparison,
}

/// 比较示例列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "comparison.ts")]
pub struct ComparisonExampleListResponse {
    pub items: Vec<ComparisonExample>,
}
