use std::ops::{Deref, DerefMut};

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use bytes::BytesMut;
use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use serde_json::Error as JsonError;
use tracing::{debug, warn};

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::logging::pii::Redacted;
use crate::state::app_state::AppState;
use crate::trace_ctx;

const DEFAULT_LIMIT: usize = 256 * 1024;

/// JSON body extractor whose failures render as problem details (400
/// `BAD_REQUEST`) instead of actix's plain-text default.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T> ValidatedJson<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> DerefMut for ValidatedJson<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<T> FromRequest for ValidatedJson<T>
where
    T: DeserializeOwned + 'static,
{
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let mut payload = payload.take();

        let content_type = req
            .headers()
            .get("content-type")
            .and_then(|ct| ct.to_str().ok())
            .unwrap_or("")
            .to_string();
        let limit = req
            .app_data::<web::Data<AppState>>()
            .map(|state| state.config.max_json_payload_size)
            .unwrap_or(DEFAULT_LIMIT);

        Box::pin(async move {
            let trace_id = trace_ctx::trace_id();

            let mut body = BytesMut::new();
            while let Some(chunk) = payload.next().await {
                let chunk = chunk.map_err(|e| {
                    warn!(trace_id = %trace_id, error = %e, "Failed to read request body chunk");
                    AppError::bad_request(ErrorCode::BadRequest, "요청 본문을 읽을 수 없습니다.")
                })?;
                if body.len() + chunk.len() > limit {
                    warn!(trace_id = %trace_id, limit, "Request body over limit");
                    return Err(AppError::bad_request(
                        ErrorCode::BadRequest,
                        "요청 본문이 너무 큽니다.",
                    ));
                }
                body.extend_from_slice(&chunk);
            }

            let parsed = serde_json::from_slice::<T>(&body).map_err(|e| {
                let detail = classify_json_error(&e);
                debug!(
                    trace_id = %trace_id,
                    error = %Redacted(&e.to_string()),
                    content_type = %content_type,
                    body_size = body.len(),
                    "JSON parsing failed"
                );
                AppError::bad_request(ErrorCode::BadRequest, detail)
            })?;

            Ok(ValidatedJson(parsed))
        })
    }
}

/// Sanitized description of a serde_json failure; never echoes the body.
fn classify_json_error(error: &JsonError) -> String {
    match error.classify() {
        serde_json::error::Category::Syntax => {
            format!("잘못된 JSON 형식입니다. (line {})", error.line())
        }
        serde_json::error::Category::Eof => "JSON 본문이 중간에 끝났습니다.".to_string(),
        serde_json::error::Category::Data => {
            let msg = error.to_string();
            match msg.split_once("missing field `") {
                Some((_, rest)) => {
                    let field = rest.split('`').next().unwrap_or_default();
                    format!("필수 항목이 누락되었습니다: {field}")
                }
                None => "요청 항목의 형식이 올바르지 않습니다.".to_string(),
            }
        }
        serde_json::error::Category::Io => "요청 본문을 읽을 수 없습니다.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct NewPartner {
        display_name: String,
        #[allow(dead_code)]
        is_active: bool,
    }

    #[test]
    fn syntax_errors_report_the_line() {
        let error = serde_json::from_str::<NewPartner>("{\n\"display_name\": }").unwrap_err();
        assert_eq!(classify_json_error(&error), "잘못된 JSON 형식입니다. (line 2)");
    }

    #[test]
    fn truncated_body_is_eof() {
        let error = serde_json::from_str::<NewPartner>(r#"{"display_name": "a""#).unwrap_err();
        assert_eq!(classify_json_error(&error), "JSON 본문이 중간에 끝났습니다.");
    }

    #[test]
    fn missing_field_is_named() {
        let error = serde_json::from_str::<NewPartner>(r#"{"is_active": true}"#).unwrap_err();
        assert_eq!(
            classify_json_error(&error),
            "필수 항목이 누락되었습니다: display_name"
        );
    }

    #[test]
    fn wrong_types_do_not_leak_values() {
        let error =
            serde_json::from_str::<NewPartner>(r#"{"display_name": 1012345678, "is_active": true}"#)
                .unwrap_err();
        let detail = classify_json_error(&error);
        assert_eq!(detail, "요청 항목의 형식이 올바르지 않습니다.");
        assert!(!detail.contains("1012345678"));
    }

    #[test]
    fn deref_reaches_the_inner_value() {
        let mut v = ValidatedJson(NewPartner {
            display_name: "스튜디오".into(),
            is_active: true,
        });
        assert_eq!(v.display_name, "스튜디오");
        v.display_name = "레이블".into();
        assert_eq!(v.into_inner().display_name, "레이블");
    }
}
