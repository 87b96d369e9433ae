use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ComparisonExampleService;
use crate::engine::guard;
use crate::errors::{CompairError, Result};
use crate::models::ApiResponse;
use crate::services::{current_user_id, error_response, load_assignment_and_membership};
use crate::storage::Storage;

pub async fn delete_example(
    service: &ComparisonExampleService,
    request: &HttpRequest,
    assignment_id: i64,
    example_id: i64,
) -> ActixResult<HttpResponse> {
    let user_id = match current_user_id(request) {
        Ok(id) => id,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match deactivate_for_educator(storage.as_ref(), assignment_id, example_id, user_id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Comparison example deactivated successfully",
        ))),
        Err(err) => Ok(error_response(&err)),
    }
}

/// 停用比较示例；已有比较记录保持不变
pub async fn deactivate_for_educator(
    storage: &dyn Storage,
    assignment_id: i64,
    example_id: i64,
    user_id: i64,
) -> Result<()> {
    let (_, membership) = load_assignment_and_membership(storage, assignment_id, user_id).await?;
    guard::check_educator(membership.as_ref())?;

    if !storage
        .deactivate_comparison_example(assignment_id, example_id)
        .await?
    {
        return Err(CompairError::not_found("比较示例不存在"));
    }
    Ok(())
}
