//! 比较生命周期观察者
//!
//! 每次成功的状态变化之后调用，通过 `web::Data<Arc<dyn ComparisonObserver>>` 注入。

use tracing::info;

use crate::models::comparisons::entities::Comparison;

pub trait ComparisonObserver: Send + Sync {
    /// 返回已存在的未完成比较（重复请求）
    fn on_comparison_get(&self, _comparison: &Comparison) {}

    /// 新建比较
    fn on_comparison_create(&self, _comparison: &Comparison) {}

    /// 保存草稿或完成比较
    fn on_comparison_update(&self, _comparison: &Comparison) {}
}

/// 默认观察者：输出结构化日志
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl ComparisonObserver for TracingObserver {
    fn on_comparison_get(&self, comparison: &Comparison) {
        info!(
            comparison_id = comparison.id,
            assignment_id = comparison.assignment_id,
            user_id = comparison.user_id,
            "Comparison resumed"
        );
    }

    fn on_comparison_create(&self, comparison: &Comparison) {
        info!(
            comparison_id = comparison.id,
            assignment_id = comparison.assignment_id,
            user_id = comparison.user_id,
            answer1_id = comparison.answer1_id,
            answer2_id = comparison.answer2_id,
            example = comparison.is_example(),
            "Comparison created"
        );
    }

    fn on_comparison_update(&self, comparison: &Comparison) {
        info!(
            comparison_id = comparison.id,
            assignment_id = comparison.assignment_id,
            user_id = comparison.user_id,
            completed = comparison.completed,
            winner = ?comparison.winner,
            "Comparison updated"
        );
    }
}
