use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ComparisonExampleService;
use crate::engine::guard;
use crate::errors::{CompairError, Result};
use crate::models::{
    ApiResponse,
    comparisons::{entities::ComparisonExample, requests::CreateComparisonExampleRequest},
};
use crate::services::{current_user_id, error_response, load_assignment_and_membership};
use crate::storage::Storage;

pub async fn create_example(
    service: &ComparisonExampleService,
    request: &HttpRequest,
    assignment_id: i64,
    body: CreateComparisonExampleRequest,
) -> ActixResult<HttpResponse> {
    let user_id = match current_user_id(request) {
        Ok(id) => id,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match create_for_educator(storage.as_ref(), assignment_id, user_id, body).await {
        Ok(example) => Ok(HttpResponse::Created().json(ApiResponse::success(
            example,
            "Comparison example created successfully",
        ))),
        Err(err) => Ok(error_response(&err)),
    }
}

/// 教育者创建比较示例，两份答案须为该作业下不同的有效答案
pub async fn create_for_educator(
    storage: &dyn Storage,
    assignment_id: i64,
    user_id: i64,
    body: CreateComparisonExampleRequest,
) -> Result<ComparisonExample> {
    let (_, membership) = load_assignment_and_membership(storage, assignment_id, user_id).await?;
    guard::check_educator(membership.as_ref())?;

    validate_answer_pair(storage, assignment_id, body.answer1_id, body.answer2_id).await?;

    let example = storage
        .create_comparison_example(assignment_id, body)
        .await?;

    info!(
        "Comparison example {} created for assignment {} by user {}",
        example.id, assignment_id, user_id
    );

    Ok(example)
}

/// 示例答案对校验：两份答案不同，且均为该作业下可比较的答案
pub(super) async fn validate_answer_pair(
    storage: &dyn Storage,
    assignment_id: i64,
    answer1_id: i64,
    answer2_id: i64,
) -> Result<()> {
    if answer1_id == answer2_id {
        return Err(CompairError::validation("比较示例的两份答案不能相同"));
    }

    for answer_id in [answer1_id, answer2_id] {
        let valid = storage
            .get_answer(answer_id)
            .await?
            .is_some_and(|a| a.is_comparable_for(assignment_id));
        if !valid {
            return Err(CompairError::validation(format!(
                "答案 {answer_id} 不存在或不可用于该作业"
            )));
        }
    }

    Ok(())
}
