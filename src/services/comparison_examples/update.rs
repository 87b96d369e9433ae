use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ComparisonExampleService;
use super::create::validate_answer_pair;
use crate::engine::guard;
use crate::errors::{CompairError, Result};
use crate::models::{
    ApiResponse,
    comparisons::{entities::ComparisonExample, requests::UpdateComparisonExampleRequest},
};
use crate::services::{current_user_id, error_response, load_assignment_and_membership};
use crate::storage::Storage;

pub async fn update_example(
    service: &ComparisonExampleService,
    request: &HttpRequest,
    assignment_id: i64,
    example_id: i64,
    body: UpdateComparisonExampleRequest,
) -> ActixResult<HttpResponse> {
    let user_id = match current_user_id(request) {
        Ok(id) => id,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match update_for_educator(storage.as_ref(), assignment_id, example_id, user_id, body).await {
        Ok(example) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            example,
            "Comparison example updated successfully",
        ))),
        Err(err) => Ok(error_response(&err)),
    }
}

/// 教育者修改比较示例的答案对；已引用该示例的比较记录不受影响
pub async fn update_for_educator(
    storage: &dyn Storage,
    assignment_id: i64,
    example_id: i64,
    user_id: i64,
    body: UpdateComparisonExampleRequest,
) -> Result<ComparisonExample> {
    let (_, membership) = load_assignment_and_membership(storage, assignment_id, user_id).await?;
    guard::check_educator(membership.as_ref())?;

    validate_answer_pair(storage, assignment_id, body.answer1_id, body.answer2_id).await?;

    let example = storage
        .update_comparison_example(assignment_id, example_id, body)
        .await?
        .ok_or_else(|| CompairError::not_found("比较示例不存在"))?;

    info!(
        "Comparison example {} of assignment {} updated by user {}",
        example.id, assignment_id, user_id
    );

    Ok(example)
}
