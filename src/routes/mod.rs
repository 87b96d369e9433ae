pub mod comparison_examples;

pub mod comparisons;

pub mod scores;

pub mod system;

pub use comparison_examples::configure_comparison_examples_routes;
pub use comparisons::configure_comparisons_routes;
pub use scores::configure_scores_routes;
pub use system::configure_system_routes;

use actix_web::web;

/// 注册全部 API 路由
pub fn configure_api_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_comparisons_routes)
        .configure(configure_comparison_examples_routes)
        .configure(configure_scores_routes)
        .configure(configure_system_routes);
}
