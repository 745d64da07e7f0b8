//! Per-IP rate limit for the login endpoint: 10 requests per minute.

use std::time::Duration;

use actix_extensible_rate_limit::backend::{SimpleInputFunctionBuilder, SimpleOutput};
use actix_web::HttpResponse;
use serde_json::json;

use crate::logging::security;

pub const LOGIN_ENDPOINT: &str = "/api/auth";

pub fn login_rate_limit_config() -> SimpleInputFunctionBuilder {
    SimpleInputFunctionBuilder::new(Duration::from_secs(60), 10).real_ip_key()
}

/// 429 body for a denied login attempt; also emits the security event.
pub fn login_denied_response(_output: &SimpleOutput) -> HttpResponse {
    security::rate_limit_hit(LOGIN_ENDPOINT);
    HttpResponse::TooManyRequests().json(json!({
        "code": "RATE_LIMITED",
        "detail": "요청이 너무 많습니다. 잠시 후 다시 시도해주세요.",
    }))
}
