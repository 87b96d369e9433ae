use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "system.ts")]
pub struct SystemSettingsResponse {
    pub system_name: String,               // 系统名称
    pub version: String,                   // 服务版本
    pub environment: String,               // 运行环境
    pub log_level: String,                 // 日志级别
    pub default_pairing_algorithm: String, // 默认配对算法
    pub pairing_algorithms: Vec<String>,   // 支持的配对算法
    pub compare_grace_seconds: i64,        // 比较截止宽限时间（秒）
    pub uptime_seconds: i64,               // 运行时长（秒）
}
