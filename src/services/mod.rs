pub mod comparison_examples;
pub mod comparisons;
pub mod scores;
pub mod system;

pub use comparison_examples::ComparisonExampleService;
pub use comparisons::ComparisonService;
pub use scores::ScoreService;
pub use system::SystemService;

use actix_web::{HttpRequest, HttpResponse};
use std::sync::Arc;
use tracing::error;

use crate::errors::{CompairError, Result};
use crate::middlewares::RequireIdentity;
use crate::models::assignments::entities::Assignment;
use crate::models::course_users::entities::CourseUser;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

/// 从 app data 获取存储实例
pub(crate) fn storage_from_request(request: &HttpRequest) -> Arc<dyn Storage> {
    request
        .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
        .expect("Storage not found in app data")
        .get_ref()
        .clone()
}

/// 业务错误转换为 HTTP 响应，服务端故障只返回通用信息
pub(crate) fn error_response(err: &CompairError) -> HttpResponse {
    if err.is_server_fault() {
        error!("{}", err);
        return HttpResponse::build(err.status()).json(ApiResponse::error_empty(
            ErrorCode::from(err),
            "服务器内部错误，请稍后重试",
        ));
    }

    HttpResponse::build(err.status()).json(ApiResponse::from_error(err))
}

/// 获取当前用户 ID，缺失时返回 401 响应
pub(crate) fn current_user_id(request: &HttpRequest) -> std::result::Result<i64, HttpResponse> {
    RequireIdentity::extract_user_id(request).ok_or_else(|| {
        HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "用户未登录",
        ))
    })
}

/// 加载启用中的作业
pub(crate) async fn load_active_assignment(
    storage: &dyn Storage,
    assignment_id: i64,
) -> Result<Assignment> {
    storage
        .get_assignment(assignment_id)
        .await?
        .filter(|a| a.active)
        .ok_or_else(|| CompairError::not_found("作业不存在"))
}

/// 加载作业及当前用户的课程成员信息
pub(crate) async fn load_assignment_and_membership(
    storage: &dyn Storage,
    assignment_id: i64,
    user_id: i64,
) -> Result<(Assignment, Option<CourseUser>)> {
    let assignment = load_active_assignment(storage, assignment_id).await?;
    let membership = storage
        .get_course_user(assignment.course_id, user_id)
        .await?;
    Ok((assignment, membership))
}
