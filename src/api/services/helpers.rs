//! API 帮助函数

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde::Serialize;
use tracing::error;

use crate::errors::ClicktrailError;

/// 错误响应体：`{ "error": "..." }`
#[derive(Debug, Serialize)]
pub struct ErrorBody<'a> {
    pub error: &'a str,
}

/// 构建 JSON 错误响应
pub fn json_error(status: StatusCode, message: &str) -> HttpResponse {
    HttpResponse::build(status)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(ErrorBody { error: message })
}

/// 从 ClicktrailError 构建错误响应（自动映射 HTTP 状态码）
///
/// 服务端错误不向客户端暴露内部细节。
pub fn error_response(err: &ClicktrailError) -> HttpResponse {
    let status = err.http_status();
    if err.is_client_error() {
        json_error(status, err.message())
    } else {
        error!("Request failed: {}", err);
        json_error(status, status.canonical_reason().unwrap_or("Internal Server Error"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[actix_rt::test]
    async fn test_client_error_keeps_message() {
        let resp = error_response(&ClicktrailError::validation("url is required"));
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body = to_bytes(resp.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "url is required");
    }

    #[actix_rt::test]
    async fn test_server_error_hides_details() {
        let resp = error_response(&ClicktrailError::storage_unavailable(
            "connection refused at 10.0.0.5:5432",
        ));
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(resp.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Internal Server Error");
    }
}
