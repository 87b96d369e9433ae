//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! Storage 层使用这些实体进行 CRUD 操作，然后转换为 models 中的业务实体。

pub mod prelude;

pub mod answer_criterion_scores;
pub mod answers;
pub mod assignment_criteria;
pub mod assignments;
pub mod comparison_criteria;
pub mod comparison_examples;
pub mod comparisons;
pub mod course_users;
pub mod criteria;

use chrono::{DateTime, Utc};

/// Unix 秒时间戳转换为 UTC 时间
pub(crate) fn from_timestamp(ts: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()
}

/// 可空时间戳转换
pub(crate) fn from_timestamp_opt(ts: Option<i64>) -> Option<DateTime<Utc>> {
    ts.and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0))
}
