/*!
 * 身份识别中间件
 *
 * 认证由上游网关完成，网关在请求头中转发已认证的用户 ID。
 * 此中间件读取该请求头，校验其为正整数后存入请求扩展，缺失或非法时返回 401。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * use actix_web::{web, App};
 * use crate::middlewares::RequireIdentity;
 *
 * App::new().service(
 *     web::scope("/api")
 *         .wrap(RequireIdentity)
 *         .route("/protected", web::get().to(protected_handler)),
 * );
 *
 * async fn protected_handler(req: HttpRequest) -> Result<HttpResponse> {
 *     let user_id = RequireIdentity::extract_user_id(&req);
 *     // ...
 * }
 * ```
 *
 * 请求头名称由 `identity.user_header` 配置，默认 `X-User-Id`。
 */

use crate::config::AppConfig;
use crate::models::{ApiResponse, ErrorCode};
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::header::CONTENT_TYPE,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::{debug, info};

/// 请求扩展中保存的已认证用户
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser(pub i64);

#[derive(Clone)]
pub struct RequireIdentity;

// 辅助函数：预检请求直接放行
fn preflight_response() -> HttpResponse {
    HttpResponse::NoContent()
        .insert_header((CONTENT_TYPE, "text/plain; charset=utf-8"))
        .finish()
}

// 辅助函数：身份缺失或无效
fn unauthorized_response(message: &str) -> HttpResponse {
    HttpResponse::Unauthorized()
        .insert_header((CONTENT_TYPE, "application/json; charset=utf-8"))
        .json(ApiResponse::<()>::error_empty(ErrorCode::Unauthorized, message))
}

// 辅助函数：解析用户 ID 请求头
fn parse_user_header(value: Option<&str>) -> Result<i64, &'static str> {
    let raw = value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or("缺少用户身份")?;

    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err("用户身份无效"),
    }
}

fn extract_user(req: &ServiceRequest) -> Result<AuthenticatedUser, &'static str> {
    let header_name = &AppConfig::get().identity.user_header;
    let value = req
        .headers()
        .get(header_name.as_str())
        .and_then(|h| h.to_str().ok());

    parse_user_header(value).map(AuthenticatedUser)
}

impl<S, B> Transform<S, ServiceRequest> for RequireIdentity
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireIdentityMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireIdentityMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireIdentityMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireIdentityMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            // 处理 OPTIONS 请求
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(req.into_response(
                    preflight_response().map_into_right_body(),
                ));
            }

            match extract_user(&req) {
                Ok(user) => {
                    debug!("Identity accepted for user ID: {}", user.0);
                    req.extensions_mut().insert(user);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(err) => {
                    info!("Identity rejected for request to {}: {}", req.path(), err);
                    Ok(req.into_response(
                        unauthorized_response(err).map_into_right_body(),
                    ))
                }
            }
        })
    }
}

impl RequireIdentity {
    /// 从请求扩展中提取用户ID
    /// 此函数应该在应用了RequireIdentity中间件的路由处理程序中使用
    pub fn extract_user_id(req: &actix_web::HttpRequest) -> Option<i64> {
        req.extensions().get::<AuthenticatedUser>().map(|user| user.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::{Method, StatusCode};
    use actix_web::{App, HttpRequest, test as actix_test, web};

    async fn whoami(req: HttpRequest) -> HttpResponse {
        match RequireIdentity::extract_user_id(&req) {
            Some(id) => HttpResponse::Ok().body(id.to_string()),
            None => HttpResponse::InternalServerError().finish(),
        }
    }

    #[test]
    fn test_parse_user_header() {
        assert_eq!(parse_user_header(Some("42")), Ok(42));
        assert_eq!(parse_user_header(Some(" 7 ")), Ok(7));
        assert!(parse_user_header(None).is_err());
        assert!(parse_user_header(Some("")).is_err());
        assert!(parse_user_header(Some("0")).is_err());
        assert!(parse_user_header(Some("-3")).is_err());
        assert!(parse_user_header(Some("abc")).is_err());
    }

    #[actix_web::test]
    async fn test_header_identity_reaches_handler() {
        let app = actix_test::init_service(
            App::new().service(
                web::scope("/api")
                    .wrap(RequireIdentity)
                    .route("/whoami", web::get().to(whoami)),
            ),
        )
        .await;

        let req = actix_test::TestRequest::get()
            .uri("/api/whoami")
            .insert_header(("X-User-Id", "15"))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = actix_test::read_body(resp).await;
        assert_eq!(&body[..], b"15");

        let req = actix_test::TestRequest::get().uri("/api/whoami").to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = actix_test::read_body_json(resp).await;
        assert_eq!(body["code"], ErrorCode::Unauthorized as i32);

        // 预检请求无需身份
        let req = actix_test::TestRequest::default()
            .method(Method::OPTIONS)
            .uri("/api/whoami")
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    }
}
