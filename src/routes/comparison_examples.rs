use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::RequireIdentity;
use crate::models::comparisons::requests::{
    CreateComparisonExampleRequest, UpdateComparisonExampleRequest,
};
use crate::services::ComparisonExampleService;

// 懒加载的全局 ComparisonExampleService 实例
static COMPARISON_EXAMPLE_SERVICE: Lazy<ComparisonExampleService> =
    Lazy::new(ComparisonExampleService::new_lazy);

// 列出比较示例
pub async fn list_examples(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    COMPARISON_EXAMPLE_SERVICE
        .list_examples(&req, path.into_inner())
        .await
}

// 创建比较示例
pub async fn create_example(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<CreateComparisonExampleRequest>,
) -> ActixResult<HttpResponse> {
    COMPARISON_EXAMPLE_SERVICE
        .create_example(&req, path.into_inner(), body.into_inner())
        .await
}

// 修改比较示例
pub async fn update_example(
    req: HttpRequest,
    path: web::Path<(i64, i64)>,
    body: web::Json<UpdateComparisonExampleRequest>,
) -> ActixResult<HttpResponse> {
    let (assignment_id, example_id) = path.into_inner();
    COMPARISON_EXAMPLE_SERVICE
        .update_example(&req, assignment_id, example_id, body.into_inner())
        .await
}

// 停用比较示例
pub async fn delete_example(
    req: HttpRequest,
    path: web::Path<(i64, i64)>,
) -> ActixResult<HttpResponse> {
    let (assignment_id, example_id) = path.into_inner();
    COMPARISON_EXAMPLE_SERVICE
        .delete_example(&req, assignment_id, example_id)
        .await
}

// 配置路由
pub fn configure_comparison_examples_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/assignments/{assignment_id}/comparison-examples")
            .wrap(RequireIdentity)
            .service(
                web::resource("")
                    // 列出示例 - 课程成员
                    .route(web::get().to(list_examples))
                    // 创建示例 - 仅教师和助教（业务层检查）
                    .route(web::post().to(create_example)),
            )
            .service(
                web::resource("/{example_id}")
                    // 修改与停用示例 - 仅教师和助教（业务层检查）
                    .route(web::post().to(update_example))
                    .route(web::delete().to(delete_example)),
            ),
    );
}
