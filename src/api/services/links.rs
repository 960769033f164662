//! Link routes
//!
//! - `POST {prefix}`                   `{ "url": ... }` -> `{ "id": ... }`
//! - `GET  {prefix}/{id}`              307 redirect to the destination
//! - `GET  {prefix}/analytics/{id}`    `{ "totalClicks": n, "analytics": [...] }`

use std::sync::Arc;

use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, web};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::helpers::{error_response, json_error};
use crate::services::LinkService;

/// 请求体大小上限
const JSON_LIMIT: usize = 64 * 1024;

/// Location 头中需要转义的字符：控制字符、空白与 URL 中不允许出现的符号。
/// `%` 保留原样，已编码的目标地址不会被二次编码。
const LOCATION_ESCAPE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'\\')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// 把目标地址编码为合法的 `Location` 头值（非 ASCII 按 UTF-8 百分号编码）
pub fn encode_location(destination: &str) -> String {
    utf8_percent_encode(destination, LOCATION_ESCAPE).to_string()
}

#[derive(Debug, Deserialize)]
pub struct CreateLinkBody {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateLinkResponse {
    pub id: String,
}

pub struct LinkApi {}

impl LinkApi {
    pub async fn create(
        service: web::Data<Arc<LinkService>>,
        body: web::Json<CreateLinkBody>,
    ) -> impl Responder {
        let url = body.into_inner().url.unwrap_or_default();
        match service.create_short_link(&url).await {
            Ok(id) => HttpResponse::Ok().json(CreateLinkResponse { id }),
            Err(e) => error_response(&e),
        }
    }

    pub async fn redirect(
        service: web::Data<Arc<LinkService>>,
        path: web::Path<String>,
    ) -> impl Responder {
        let id = path.into_inner();
        match service.resolve_and_track(&id).await {
            Ok(destination) => HttpResponse::build(StatusCode::TEMPORARY_REDIRECT)
                .insert_header(("Location", encode_location(&destination)))
                .insert_header(("Cache-Control", "no-store"))
                .finish(),
            Err(e) => {
                trace!("Redirect failed for '{}': {}", id, e);
                error_response(&e)
            }
        }
    }

    pub async fn analytics(
        service: web::Data<Arc<LinkService>>,
        path: web::Path<String>,
    ) -> impl Responder {
        match service.get_analytics(&path.into_inner()).await {
            Ok(report) => HttpResponse::Ok().json(report),
            Err(e) => error_response(&e),
        }
    }
}

/// 请求体解析失败时同样返回 `{ "error": ... }`
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_LIMIT)
        .error_handler(|err, _req| {
            let message = match &err {
                // 非 JSON 请求体或空请求体等同于缺少 url
                JsonPayloadError::ContentType => "url is required".to_string(),
                JsonPayloadError::Deserialize(e) if e.is_eof() && e.column() == 0 => {
                    "url is required".to_string()
                }
                _ => err.to_string(),
            };
            let response = json_error(StatusCode::BAD_REQUEST, &message);
            InternalError::from_response(err, response).into()
        })
}

/// Link 路由配置
pub fn links_routes(prefix: &str) -> actix_web::Scope {
    web::scope(prefix)
        .app_data(json_config())
        .route("", web::post().to(LinkApi::create))
        .route("/", web::post().to(LinkApi::create))
        .route("/analytics/{id}", web::get().to(LinkApi::analytics))
        .route("/{id}", web::get().to(LinkApi::redirect))
}
