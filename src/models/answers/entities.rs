use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 已提交的答案（由答案协作方维护，此处只读）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "answer.ts")]
pub struct Answer {
    pub id: i64,
    pub assignment_id: i64,
    // 作者 ID
    pub user_id: i64,
    pub content: Option<String>,
    pub active: bool,
    pub draft: bool,
    pub practice: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Answer {
    /// 是否可以进入比较：启用、非草稿、非练习，且属于目标作业
    pub fn is_comparable_for(&self, assignment_id: i64) -> bool {
        self.active && !self.draft && !self.practice && self.assignment_id == assignment_id
    }
}

/// 返回给评审者的答案视图
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "answer.ts")]
pub struct AnswerView {
    pub id: i64,
    pub content: Option<String>,
    // 仅教育者可见作者
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
}

impl AnswerView {
    pub fn from_answer(answer: Answer, reveal_author: bool) -> Self {
        Self {
            id: answer.id,
            content: answer.content,
            user_id: reveal_author.then_some(answer.user_id),
        }
    }
}
