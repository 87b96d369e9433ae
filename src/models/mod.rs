pub mod answers;
pub mod assignments;
pub mod common;
pub mod comparisons;
pub mod course_users;
pub mod scores;
pub mod system;

pub use common::response::ApiResponse;

/// 应用启动时间（用于运行状态统计）
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// 业务错误码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误
    BadRequest = 1000,
    Unauthorized = 1001,
    NotFound = 1004,
    InternalServerError = 1005,
    ValidationFailed = 1006,

    // 比较
    ComparisonNotEligible = 3001,
    ComparisonDeadlinePassed = 3002,
    InsufficientAnswers = 3003,
    ComparisonQuotaExhausted = 3004,
    AllPairsCompared = 3005,
    NoOpenComparison = 3006,
    PairingMisconfigured = 3007,
}

impl From<&crate::errors::CompairError> for ErrorCode {
    fn from(err: &crate::errors::CompairError) -> Self {
        use crate::errors::CompairError;

        match err {
            CompairError::Validation(_) => ErrorCode::ValidationFailed,
            CompairError::NotFound(_) => ErrorCode::NotFound,
            CompairError::NotEligible(_) => ErrorCode::ComparisonNotEligible,
            CompairError::DeadlinePassed(_) => ErrorCode::ComparisonDeadlinePassed,
            CompairError::InsufficientAnswers(_) => ErrorCode::InsufficientAnswers,
            CompairError::QuotaExhausted(_) => ErrorCode::ComparisonQuotaExhausted,
            CompairError::AllPairsCompared(_) => ErrorCode::AllPairsCompared,
            CompairError::NoOpenComparison(_) => ErrorCode::NoOpenComparison,
            CompairError::UnknownStrategy(_) => ErrorCode::PairingMisconfigured,
            CompairError::DatabaseConfig(_)
            | CompairError::DatabaseConnection(_)
            | CompairError::DatabaseOperation(_)
            | CompairError::FileOperation(_)
            | CompairError::Serialization(_) => ErrorCode::InternalServerError,
        }
    }
}
