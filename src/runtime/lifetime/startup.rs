use crate::config::AppConfig;
use crate::engine::observer::{ComparisonObserver, TracingObserver};
use crate::engine::pairing::PairingAlgorithm;
use crate::storage::Storage;
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Clone)]
pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub observer: Arc<dyn ComparisonObserver>,
}

/// 校验引擎配置
/// 默认配对算法无法识别时直接拒绝启动
fn validate_engine_config(config: &AppConfig) -> Result<PairingAlgorithm, String> {
    let engine = &config.engine;

    if engine.compare_grace_seconds < 0 {
        return Err(format!(
            "engine.compare_grace_seconds must not be negative, got {}",
            engine.compare_grace_seconds
        ));
    }

    PairingAlgorithm::resolve(&engine.default_pairing_algorithm, "")
        .map_err(|e| format!("engine.default_pairing_algorithm: {e}"))
}

/// 准备服务器启动的上下文
/// 包括存储与比较观察者
pub async fn prepare_server_startup() -> StartupContext {
    let config = AppConfig::get();

    let algorithm = validate_engine_config(config).expect("Invalid engine configuration");
    debug!(
        "Default pairing algorithm: {}, grace period: {}s, role-restricted answers included: {}",
        algorithm, config.engine.compare_grace_seconds, config.engine.include_role_restricted_answers
    );

    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized and migrations completed");

    let observer: Arc<dyn ComparisonObserver> = Arc::new(TracingObserver);

    StartupContext { storage, observer }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(algorithm: &str, grace: i64) -> AppConfig {
        let mut config = AppConfig::get().clone();
        config.engine.default_pairing_algorithm = algorithm.to_string();
        config.engine.compare_grace_seconds = grace;
        config
    }

    #[test]
    fn test_validate_engine_config() {
        assert_eq!(
            validate_engine_config(&config_with("random", 0)),
            Ok(PairingAlgorithm::Random)
        );
        assert_eq!(
            validate_engine_config(&config_with(" Adaptive ", 60)),
            Ok(PairingAlgorithm::Adaptive)
        );
        assert!(validate_engine_config(&config_with("elo", 60)).is_err());
        assert!(validate_engine_config(&config_with("random", -1)).is_err());
    }
}
