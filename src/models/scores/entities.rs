use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 答案在某条评审标准下的得分
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "score.ts")]
pub struct AnswerCriterionScore {
    pub id: i64,
    pub assignment_id: i64,
    pub answer_id: i64,
    pub criterion_id: i64,
    // 胜场数
    pub raw_win_count: i64,
    // 参与的已完成比较数
    pub comparisons_count: i64,
    // 归一化得分（0 - 100）
    pub normalized_score: f64,
    // 同作业同标准内的名次，从 1 开始，并列共享名次
    pub rank: i64,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
