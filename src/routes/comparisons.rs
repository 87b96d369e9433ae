use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::RequireIdentity;
use crate::models::comparisons::requests::SubmitComparisonRequest;
use crate::services::ComparisonService;

// 懒加载的全局 ComparisonService 实例
static COMPARISON_SERVICE: Lazy<ComparisonService> = Lazy::new(ComparisonService::new_lazy);

// 获取下一对待比较的答案（已有未完成比较时原样返回）
pub async fn next_pair(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    COMPARISON_SERVICE.next_pair(&req, path.into_inner()).await
}

// 提交比较判定（草稿或最终）
pub async fn submit_comparison(
    req: HttpRequest,
    path: web::Path<(i64, i64)>,
    body: web::Json<SubmitComparisonRequest>,
) -> ActixResult<HttpResponse> {
    let (assignment_id, comparison_id) = path.into_inner();
    COMPARISON_SERVICE
        .submit_comparison(&req, assignment_id, comparison_id, body.into_inner())
        .await
}

// 配置路由
pub fn configure_comparisons_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/assignments/{assignment_id}/comparisons")
            .wrap(RequireIdentity)
            // 课程成员均可访问，资格在业务层检查
            .service(web::resource("").route(web::get().to(next_pair)))
            .service(web::resource("/{comparison_id}").route(web::post().to(submit_comparison))),
    );
}
