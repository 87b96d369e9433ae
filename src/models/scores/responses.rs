use serde::Serialize;
use ts_rs::TS;

use super::entities::AnswerCriterionScore;

/// 单个答案的得分汇总
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "score.ts")]
pub struct AnswerScoreSummary {
    pub answer_id: i64,
    pub user_id: i64,
    // 按标准权重加权的整体得分，无记录的标准按中性 50 计
    pub overall_score: f64,
    pub criteria: Vec<AnswerCriterionScore>,
}

/// 作业得分列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "score.ts")]
pub struct AssignmentScoresResponse {
    pub assignment_id: i64,
    pub items: Vec<AnswerScoreSummary>,
}

/// 重新计算得分的响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "score.ts")]
pub struct RecomputeScoresResponse {
    pub assignment_id: i64,
    // 参与计分的已完成比较数
    pub comparisons_counted: i64,
    // 写入的得分行数
    pub rows_written: i64,
}
