use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::RequireIdentity;
use crate::services::ScoreService;

// 懒加载的全局 ScoreService 实例
static SCORE_SERVICE: Lazy<ScoreService> = Lazy::new(ScoreService::new_lazy);

// 列出作业得分
pub async fn list_scores(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    SCORE_SERVICE.list_scores(&req, path.into_inner()).await
}

// 重新计算作业得分
pub async fn recompute_scores(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    SCORE_SERVICE.recompute_scores(&req, path.into_inner()).await
}

// 配置路由
pub fn configure_scores_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/assignments/{assignment_id}/scores")
            .wrap(RequireIdentity)
            // 仅教师和助教，权限在业务层检查
            .service(web::resource("").route(web::get().to(list_scores)))
            .service(web::resource("/recompute").route(web::post().to(recompute_scores))),
    );
}
