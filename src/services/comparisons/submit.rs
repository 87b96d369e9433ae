use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::{DateTime, Duration, Utc};

use super::ComparisonService;
use crate::config::{AppConfig, EngineConfig};
use crate::engine::observer::ComparisonObserver;
use crate::engine::{guard, verdict};
use crate::errors::{CompairError, Result};
use crate::models::{
    ApiResponse,
    comparisons::{
        entities::Comparison, requests::SubmitComparisonRequest,
        responses::SubmitComparisonResponse,
    },
};
use crate::services::{current_user_id, error_response, load_assignment_and_membership};
use crate::storage::Storage;

pub async fn submit_comparison(
    service: &ComparisonService,
    request: &HttpRequest,
    assignment_id: i64,
    comparison_id: i64,
    body: SubmitComparisonRequest,
) -> ActixResult<HttpResponse> {
    let user_id = match current_user_id(request) {
        Ok(id) => id,
        Err(resp) => return Ok(resp),
    };

    let storage = service.get_storage(request);
    let observer = service.get_observer(request);
    let config = &AppConfig::get().engine;

    match submit_verdicts(
        storage.as_ref(),
        observer.as_ref(),
        config,
        assignment_id,
        comparison_id,
        user_id,
        body,
        Utc::now(),
    )
    .await
    {
        Ok(comparison) => {
            let message = if comparison.completed {
                "Comparison completed successfully"
            } else {
                "Comparison draft saved successfully"
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                SubmitComparisonResponse { comparison },
                message,
            )))
        }
        Err(err) => Ok(error_response(&err)),
    }
}

/// 提交判定
///
/// 草稿或存在未决定的单项时只保存判定；否则计算整体胜者并完成比较，
/// 得分在同一事务中更新。
#[allow(clippy::too_many_arguments)]
pub async fn submit_verdicts(
    storage: &dyn Storage,
    observer: &dyn ComparisonObserver,
    config: &EngineConfig,
    assignment_id: i64,
    comparison_id: i64,
    judge_id: i64,
    body: SubmitComparisonRequest,
    now: DateTime<Utc>,
) -> Result<Comparison> {
    let (assignment, membership) =
        load_assignment_and_membership(storage, assignment_id, judge_id).await?;
    guard::check_eligible(&assignment, membership.as_ref())?;

    let comparison = storage
        .get_comparison(comparison_id)
        .await?
        .filter(|c| c.assignment_id == assignment_id)
        .ok_or_else(|| CompairError::not_found("比较不存在"))?;

    if comparison.user_id != judge_id {
        return Err(CompairError::not_eligible("只能提交自己的比较"));
    }
    if comparison.completed {
        return Err(CompairError::no_open_comparison(
            "该比较已完成，无法重复提交",
        ));
    }

    guard::check_compare_window(
        &assignment,
        now,
        Duration::seconds(config.compare_grace_seconds),
    )?;

    let criteria = storage.list_assignment_criteria(assignment_id).await?;
    let verdicts = verdict::validate_verdicts(
        body.comparison_criteria,
        &criteria,
        comparison.answer1_id,
        comparison.answer2_id,
    )?;
    let winner = verdict::overall_winner(&verdicts, &criteria);

    let updated = if body.draft || !winner.is_decided() {
        storage
            .save_comparison_draft(comparison_id, &verdicts)
            .await?
    } else {
        storage
            .complete_comparison(comparison_id, &verdicts, winner)
            .await?
    };

    observer.on_comparison_update(&updated);
    Ok(updated)
}
