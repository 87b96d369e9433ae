use actix_cors::Cors;
use actix_web::dev::{ServerHandle, ServiceFactory, ServiceRequest};
use actix_web::middleware::{Compress, DefaultHeaders};
use actix_web::{App, HttpServer, web};
use dotenv::dotenv;
use human_panic::setup_panic;
use std::time::Duration;
use tracing::{debug, warn};

// 从 lib.rs 导入模块
use compair_engine::config::AppConfig;
use compair_engine::models::AppStartTime;
use compair_engine::routes;
use compair_engine::runtime::lifetime::startup::StartupContext;
use compair_engine::runtime::{lifetime, logging};
use compair_engine::utils::{json_error_handler, path_error_handler};

/// 公共中间件与应用数据
fn build_app(
    config: &'static AppConfig,
    startup: StartupContext,
    app_start_time: AppStartTime,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .wrap(
            Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(config.cors.max_age),
        )
        .wrap(Compress::default())
        .wrap(
            DefaultHeaders::new()
                .add(("Connection", "keep-alive"))
                .add((
                    "Keep-Alive",
                    format!("timeout={}, max=1000", config.server.timeouts.keep_alive),
                ))
                .add(("Cache-Control", "no-cache, no-store, must-revalidate")),
        )
        .app_data(web::PathConfig::default().error_handler(path_error_handler)) // 路径参数错误处理器
        .app_data(web::JsonConfig::default().error_handler(json_error_handler)) // JSON 错误处理器
        .app_data(web::Data::new(startup.storage))
        .app_data(web::Data::new(startup.observer))
        .app_data(web::Data::new(app_start_time))
        .app_data(web::PayloadConfig::new(
            config.server.limits.max_payload_size,
        )) // 最大请求体大小
        .configure(routes::configure_api_routes)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    // 记录程序启动时间
    let app_start_time = AppStartTime {
        start_datetime: chrono::Utc::now(),
    };

    // 启动前预处理 //

    // 初始化配置
    setup_panic!();
    AppConfig::init().expect("Failed to initialize configuration");
    let config = AppConfig::get();

    // 初始化日志
    let _guard = logging::init_tracing(config);

    warn!(
        "Starting {} ({} v{}), default pairing algorithm: {}",
        config.app.system_name,
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        config.engine.default_pairing_algorithm
    );

    let startup = lifetime::startup::prepare_server_startup().await;

    debug!(
        "Pre-startup processing completed in {} ms",
        chrono::Utc::now()
            .signed_duration_since(app_start_time.start_datetime)
            .num_milliseconds()
    );

    // 预处理完成 //

    warn!("Using {} workers for the server", config.server.workers);

    let server = HttpServer::new(move || build_app(config, startup.clone(), app_start_time.clone()))
        .keep_alive(Duration::from_secs(config.server.timeouts.keep_alive))
        .client_request_timeout(Duration::from_millis(config.server.timeouts.client_request))
        .client_disconnect_timeout(Duration::from_millis(
            config.server.timeouts.client_disconnect,
        ))
        .workers(config.server.workers);

    #[cfg(unix)]
    let server = match config.unix_socket_path() {
        Some(socket_path) => {
            warn!("Starting server on Unix socket: {}", socket_path);
            if std::path::Path::new(socket_path).exists() {
                std::fs::remove_file(socket_path)?;
            }
            server.bind_uds(socket_path)?
        }
        None => {
            let bind_address = config.server_bind_address();
            warn!("Starting server at http://{}", bind_address);
            server.bind(bind_address)?
        }
    };

    #[cfg(not(unix))]
    let server = {
        let bind_address = config.server_bind_address();
        warn!("Starting server at http://{}", bind_address);
        server.bind(bind_address)?
    };

    let server = server.run();
    let handle: ServerHandle = server.handle();

    tokio::select! {
        res = server => {
            res?;
        }
        _ = lifetime::shutdown::listen_for_shutdown() => {
            // 停止接收新连接，等待进行中的请求完成
            handle.stop(true).await;
            warn!("Graceful shutdown: all tasks completed");
        }
    }

    Ok(())
}
