use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ScoreService;
use crate::engine::guard;
use crate::errors::Result;
use crate::models::{ApiResponse, scores::responses::RecomputeScoresResponse};
use crate::services::{current_user_id, error_response, load_assignment_and_membership};
use crate::storage::Storage;

pub async fn recompute_scores(
    service: &ScoreService,
    request: &HttpRequest,
    assignment_id: i64,
) -> ActixResult<HttpResponse> {
    let user_id = match current_user_id(request) {
        Ok(id) => id,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match recompute_for_educator(storage.as_ref(), assignment_id, user_id).await {
        Ok(summary) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            summary,
            "Scores recomputed successfully",
        ))),
        Err(err) => Ok(error_response(&err)),
    }
}

pub async fn recompute_for_educator(
    storage: &dyn Storage,
    assignment_id: i64,
    user_id: i64,
) -> Result<RecomputeScoresResponse> {
    let (_, membership) = load_assignment_and_membership(storage, assignment_id, user_id).await?;
    guard::check_educator(membership.as_ref())?;

    storage.recompute_scores(assignment_id).await
}
