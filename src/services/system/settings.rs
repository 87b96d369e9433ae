use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use super::SystemService;
use crate::engine::pairing::PairingAlgorithm;
use crate::models::{ApiResponse, AppStartTime, system::responses::SystemSettingsResponse};

/// 获取公开系统设置（只读）
pub async fn get_settings(
    service: &SystemService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    // 获取配置
    let config = service.get_config();

    let uptime_seconds = request
        .app_data::<web::Data<AppStartTime>>()
        .map(|start| {
            chrono::Utc::now()
                .signed_duration_since(start.start_datetime)
                .num_seconds()
        })
        .unwrap_or_default();

    let response = SystemSettingsResponse {
        system_name: config.app.system_name.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: config.app.environment.clone(),
        log_level: config.app.log_level.clone(),
        default_pairing_algorithm: config.engine.default_pairing_algorithm.clone(),
        pairing_algorithms: PairingAlgorithm::all(),
        compare_grace_seconds: config.engine.compare_grace_seconds,
        uptime_seconds,
    };

    // 构建响应
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Settings retrieved successfully",
    )))
}
