//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码、类型名称和 HTTP 状态。

use std::fmt;

use actix_web::http::StatusCode;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - status() 方法 - 返回对应的 HTTP 状态
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_compair_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal, $status:ident)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum CompairError {
            $($variant(String),)*
        }

        impl CompairError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(CompairError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(CompairError::$variant(_) => $type_name,)*
                }
            }

            /// 获取 HTTP 状态
            pub fn status(&self) -> StatusCode {
                match self {
                    $(CompairError::$variant(_) => StatusCode::$status,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(CompairError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl CompairError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        CompairError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_compair_errors! {
    DatabaseConfig("E001", "Database Configuration Error", INTERNAL_SERVER_ERROR),
    DatabaseConnection("E002", "Database Connection Error", INTERNAL_SERVER_ERROR),
    DatabaseOperation("E003", "Database Operation Error", INTERNAL_SERVER_ERROR),
    FileOperation("E004", "File Operation Error", INTERNAL_SERVER_ERROR),
    Serialization("E005", "Serialization Error", INTERNAL_SERVER_ERROR),
    Validation("E006", "Validation Error", BAD_REQUEST),
    NotFound("E007", "Resource Not Found", NOT_FOUND),
    NotEligible("E008", "Not Eligible", FORBIDDEN),
    DeadlinePassed("E009", "Deadline Passed", FORBIDDEN),
    InsufficientAnswers("E010", "Insufficient Answers", BAD_REQUEST),
    QuotaExhausted("E011", "Quota Exhausted", BAD_REQUEST),
    AllPairsCompared("E012", "All Pairs Compared", BAD_REQUEST),
    NoOpenComparison("E013", "No Open Comparison", BAD_REQUEST),
    UnknownStrategy("E014", "Unknown Pairing Strategy", INTERNAL_SERVER_ERROR),
}

impl CompairError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 是否属于服务端故障（不应把细节暴露给终端用户）
    pub fn is_server_fault(&self) -> bool {
        self.status().is_server_error()
    }
}

impl fmt::Display for CompairError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CompairError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for CompairError {
    fn from(err: sea_orm::DbErr) -> Self {
        CompairError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for CompairError {
    fn from(err: std::io::Error) -> Self {
        CompairError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for CompairError {
    fn from(err: serde_json::Error) -> Self {
        CompairError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CompairError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(CompairError::database_config("test").code(), "E001");
        assert_eq!(CompairError::validation("test").code(), "E006");
        assert_eq!(CompairError::quota_exhausted("test").code(), "E011");
        assert_eq!(CompairError::unknown_strategy("test").code(), "E014");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            CompairError::insufficient_answers("test").error_type(),
            "Insufficient Answers"
        );
        assert_eq!(
            CompairError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_error_status_classes() {
        assert_eq!(
            CompairError::not_eligible("x").status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            CompairError::deadline_passed("x").status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            CompairError::insufficient_answers("x").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            CompairError::no_open_comparison("x").status(),
            StatusCode::BAD_REQUEST
        );
        assert!(CompairError::unknown_strategy("x").is_server_fault());
        assert!(!CompairError::quota_exhausted("x").is_server_fault());
    }

    #[test]
    fn test_format_simple() {
        let err = CompairError::validation("Unknown criterion");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("Unknown criterion"));
    }
}
