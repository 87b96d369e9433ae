use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ComparisonExampleService;
use crate::engine::guard;
use crate::errors::Result;
use crate::models::{ApiResponse, comparisons::responses::ComparisonExampleListResponse};
use crate::services::{current_user_id, error_response, load_assignment_and_membership};
use crate::storage::Storage;

pub async fn list_examples(
    service: &ComparisonExampleService,
    request: &HttpRequest,
    assignment_id: i64,
) -> ActixResult<HttpResponse> {
    let user_id = match current_user_id(request) {
        Ok(id) => id,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match list_for_member(storage.as_ref(), assignment_id, user_id).await {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            list,
            "Comparison examples retrieved successfully",
        ))),
        Err(err) => Ok(error_response(&err)),
    }
}

/// 课程成员可查看启用中的示例，教育者同时可见已停用的示例
pub async fn list_for_member(
    storage: &dyn Storage,
    assignment_id: i64,
    user_id: i64,
) -> Result<ComparisonExampleListResponse> {
    let (_, membership) = load_assignment_and_membership(storage, assignment_id, user_id).await?;
    guard::check_member(membership.as_ref())?;

    let include_inactive = membership.as_ref().is_some_and(|m| m.role.is_educator());
    let items = storage
        .list_comparison_examples(assignment_id, include_inactive)
        .await?;

    Ok(ComparisonExampleListResponse { items })
}
