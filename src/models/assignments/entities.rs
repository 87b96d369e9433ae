use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 作业（由作业协作方维护，此处只读）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "assignment.ts")]
pub struct Assignment {
    // 唯一 ID
    pub id: i64,
    // 所属课程 ID
    pub course_id: i64,
    // 作业名称
    pub name: String,
    // 每个评审者需要完成的常规比较次数（不含比较示例）
    pub number_of_comparisons: i32,
    // 配对算法名称，空字符串表示使用默认算法
    pub pairing_algorithm: String,
    // 是否允许教师/助教参与比较
    pub educators_can_compare: bool,
    // 作答开始/结束时间
    pub answer_start: Option<DateTime<Utc>>,
    pub answer_end: Option<DateTime<Utc>>,
    // 比较开始/结束时间
    pub compare_start: Option<DateTime<Utc>>,
    pub compare_end: Option<DateTime<Utc>>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Assignment {
    /// 比较阶段开始时间：未单独设置时沿用作答截止时间
    pub fn compare_starts_at(&self) -> Option<DateTime<Utc>> {
        self.compare_start.or(self.answer_end)
    }

    /// 作答阶段是否开放
    pub fn answer_period_open(&self, now: DateTime<Utc>) -> bool {
        self.answer_start.is_none_or(|start| now >= start)
            && self.answer_end.is_none_or(|end| now <= end)
    }

    /// 比较阶段是否开放（含截止后的宽限时间）
    pub fn compare_period_open(&self, now: DateTime<Utc>, grace: Duration) -> bool {
        self.compare_starts_at().is_none_or(|start| now >= start)
            && self.compare_end.is_none_or(|end| now <= end + grace)
    }

    /// 需要完成的比较总数：常规比较 + 比较示例
    pub fn total_comparisons_required(&self, example_count: usize) -> i64 {
        i64::from(self.number_of_comparisons.max(0)) + example_count as i64
    }
}

/// 作业的有效评价标准（启用的关联，按位置排序）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "assignment.ts")]
pub struct AssignmentCriterion {
    pub criterion_id: i64,
    pub name: String,
    pub description: Option<String>,
    // 同一作业内的相对权重
    pub weight: i32,
    pub position: i32,
}
