//! 统一 API 错误码定义

use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::errors::LinkbioError;

/// API 错误码枚举
///
/// 使用 serde_repr 序列化为数字。按千位分域：
/// - 0: 成功
/// - 1000-1099: 通用错误
/// - 3000-3099: 链接与主页错误
/// - 6000-6099: Analytics 错误
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(i32)]
pub enum ErrorCode {
    // 成功
    Success = 0,

    // 通用错误 1000-1099
    BadRequest = 1000,
    Unauthorized = 1001,
    NotFound = 1004,
    InternalServerError = 1005,
    ServiceUnavailable = 1030,

    // 链接与主页错误 3000-3099
    LinkNotFound = 3000,
    ValidationFailed = 3002,
    HandleTaken = 3010,

    // Analytics 错误 6000-6099
    AnalyticsQueryFailed = 6000,
}

impl From<&LinkbioError> for ErrorCode {
    fn from(err: &LinkbioError) -> Self {
        match err {
            LinkbioError::Validation(_) => ErrorCode::ValidationFailed,
            LinkbioError::NotFoundOrForbidden(_) => ErrorCode::NotFound,
            LinkbioError::HandleTaken(_) => ErrorCode::HandleTaken,
            LinkbioError::Unauthorized(_) => ErrorCode::Unauthorized,
            LinkbioError::StoreUnavailable(_) => ErrorCode::ServiceUnavailable,
            LinkbioError::DatabaseConfig(_) | LinkbioError::Serialization(_) => {
                ErrorCode::InternalServerError
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_as_number() {
        assert_eq!(serde_json::to_string(&ErrorCode::HandleTaken).unwrap(), "3010");
        let code: ErrorCode = serde_json::from_str("6000").unwrap();
        assert_eq!(code, ErrorCode::AnalyticsQueryFailed);
    }

    #[test]
    fn test_from_linkbio_error() {
        assert_eq!(
            ErrorCode::from(&LinkbioError::validation("x")),
            ErrorCode::ValidationFailed
        );
        assert_eq!(
            ErrorCode::from(&LinkbioError::store_unavailable("x")),
            ErrorCode::ServiceUnavailable
        );
        assert_eq!(
            ErrorCode::from(&LinkbioError::not_found_or_forbidden("x")),
            ErrorCode::NotFound
        );
    }
}
