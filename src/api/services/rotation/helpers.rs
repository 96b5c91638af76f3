//! Rotation API 帮助函数

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde::Serialize;
use uuid::Uuid;

use crate::errors::RotatorError;

use super::error_code::ErrorCode;
use super::types::ApiResponse;

/// 解析路径或请求体中的 UUID，失败时返回 InvalidArgument
pub fn parse_id(field: &str, raw: &str) -> Result<Uuid, RotatorError> {
    Uuid::parse_str(raw.trim()).map_err(|e| {
        RotatorError::invalid_argument(format!("{} '{}' is not a valid UUID: {}", field, raw, e))
    })
}

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

pub fn created_response<T: Serialize>(data: T) -> HttpResponse {
    json_response(StatusCode::CREATED, ErrorCode::Success, "Created", Some(data))
}

/// 构建错误响应
pub fn error_response(status: StatusCode, error_code: ErrorCode, message: &str) -> HttpResponse {
    json_response::<()>(status, error_code, message, None)
}

/// 从 RotatorError 构建错误响应（自动映射 HTTP 状态码和 ErrorCode）
pub fn error_from_rotator(err: &RotatorError) -> HttpResponse {
    error_response(err.http_status(), ErrorCode::from(err), err.message())
}

/// 统一 Result → HttpResponse 转换
pub fn api_result<T, E>(result: Result<T, E>) -> HttpResponse
where
    T: Serialize,
    E: Into<RotatorError>,
{
    match result {
        Ok(data) => success_response(data),
        Err(e) => error_from_rotator(&e.into()),
    }
}
