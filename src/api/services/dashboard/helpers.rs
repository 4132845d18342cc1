//! Dashboard API 帮助函数

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde::Serialize;
use tracing::error;

use crate::errors::LinkbioError;

use super::error_code::ErrorCode;
use super::types::ApiResponse;

/// 构建 JSON 响应
pub fn json_response<T: Serialize>(
    status: StatusCode,
    code: ErrorCode,
    message: impl Into<String>,
    data: Option<T>,
) -> HttpResponse {
    HttpResponse::build(status)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(ApiResponse {
            code: code as i32,
            message: message.into(),
            data,
        })
}

/// 构建成功响应
pub fn success_response<T: Serialize>(data: T) -> HttpResponse {
    json_response(StatusCode::OK, ErrorCode::Success, "OK", Some(data))
}

/// 构建错误响应
pub fn error_response(status: StatusCode, error_code: ErrorCode, message: &str) -> HttpResponse {
    json_response::<()>(status, error_code, message, None)
}

/// 从 LinkbioError 构建错误响应（自动映射 HTTP 状态码和 ErrorCode）
pub fn error_from_linkbio(err: &LinkbioError) -> HttpResponse {
    error_with_code(err, ErrorCode::from(err))
}

/// 同上，但使用调用方指定的 ErrorCode
pub fn error_with_code(err: &LinkbioError, code: ErrorCode) -> HttpResponse {
    if err.http_status().is_server_error() {
        error!("Dashboard API: {}", err);
    }
    error_response(err.http_status(), code, err.message())
}

/// 统一 Result → HttpResponse 转换
///
/// 成功时返回 200 OK + JSON 数据，失败时自动映射 LinkbioError。
pub fn api_result<T: Serialize>(result: Result<T, LinkbioError>) -> HttpResponse {
    match result {
        Ok(data) => success_response(data),
        Err(e) => error_from_linkbio(&e),
    }
}

/// 链接相关路由：未找到时使用 LinkNotFound
pub fn link_result<T: Serialize>(result: Result<T, LinkbioError>) -> HttpResponse {
    match result {
        Ok(data) => success_response(data),
        Err(e @ LinkbioError::NotFoundOrForbidden(_)) => error_with_code(&e, ErrorCode::LinkNotFound),
        Err(e) => error_from_linkbio(&e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_response() {
        let response = success_response("success_data");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_error_response() {
        let response = error_response(
            StatusCode::BAD_REQUEST,
            ErrorCode::BadRequest,
            "Something went wrong",
        );
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_api_result_maps_status() {
        let response = api_result::<()>(Err(LinkbioError::handle_taken("taken")));
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let response = api_result::<()>(Err(LinkbioError::store_unavailable("down")));
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_link_result_not_found() {
        let response = link_result::<()>(Err(LinkbioError::not_found_or_forbidden("gone")));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
