//! 统一 API 错误码定义

use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::errors::RotatorError;

/// API 错误码枚举
///
/// 使用 serde_repr 序列化为数字。按千位分域：
/// - 0: 成功
/// - 1000-1099: 通用错误
/// - 3000-3099: 轮播错误
/// - 4000-4099: 目录（banner/slot/group）错误
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(i32)]
pub enum ErrorCode {
    // 成功
    Success = 0,

    // 通用错误 1000-1099
    BadRequest = 1000,
    NotFound = 1004,
    InternalServerError = 1005,
    ServiceUnavailable = 1030,
    Timeout = 1031,

    // 轮播错误 3000-3099
    RotationNotFound = 3000,
    NoActiveBanners = 3001,
    InvalidIdentifier = 3002,
    StoreError = 3005,

    // 目录错误 4000-4099
    CatalogInvalidEntry = 4000,
}

impl From<&RotatorError> for ErrorCode {
    fn from(err: &RotatorError) -> Self {
        match err {
            RotatorError::InvalidArgument(_) => ErrorCode::InvalidIdentifier,
            RotatorError::NotFound(_) => ErrorCode::RotationNotFound,
            RotatorError::NoActiveBanners(_) => ErrorCode::NoActiveBanners,
            RotatorError::StoreUnavailable(_) => ErrorCode::ServiceUnavailable,
            RotatorError::StoreOperation(_) => ErrorCode::StoreError,
            RotatorError::Timeout(_) => ErrorCode::Timeout,
            RotatorError::Config(_) | RotatorError::DatabaseConfig(_) => {
                ErrorCode::InternalServerError
            }
        }
    }
}
