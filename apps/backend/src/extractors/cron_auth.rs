//! Shared-secret guard for scheduler-triggered endpoints.
//!
//! The secret may arrive as `Authorization: Bearer <secret>` or as `?key=`.
//! With no `CRON_SECRET` configured every call is let through.

use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::http::header::{self, HeaderValue};
use actix_web::{web, FromRequest, HttpRequest};
use serde::Deserialize;

use crate::error::AppError;
use crate::logging::security;
use crate::middleware::jwt_extract::bearer_token;
use crate::state::app_state::AppState;

#[derive(Debug, Clone, Copy)]
pub struct CronAuth;

#[derive(Deserialize)]
struct KeyQuery {
    key: Option<String>,
}

/// Whether the presented credentials match `secret`.
pub fn cron_authorized(secret: Option<&str>, auth: Option<&HeaderValue>, query: &str) -> bool {
    let Some(secret) = secret else {
        return true;
    };
    if bearer_token(auth).is_ok_and(|token| token == secret) {
        return true;
    }
    web::Query::<KeyQuery>::from_query(query)
        .ok()
        .and_then(|q| q.into_inner().key)
        .is_some_and(|key| key == secret)
}

impl FromRequest for CronAuth {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(state) = req.app_data::<web::Data<AppState>>() else {
            return ready(Err(AppError::internal("AppState not available")));
        };

        let ok = cron_authorized(
            state.config.cron_secret.as_deref(),
            req.headers().get(header::AUTHORIZATION),
            req.query_string(),
        );
        if ok {
            ready(Ok(CronAuth))
        } else {
            security::cron_rejected(req.path());
            ready(Err(AppError::unauthorized_cron()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_when_no_secret_is_configured() {
        assert!(cron_authorized(None, None, ""));
    }

    #[test]
    fn accepts_bearer_or_query_key() {
        let good = HeaderValue::from_static("Bearer s3cret");
        assert!(cron_authorized(Some("s3cret"), Some(&good), ""));
        assert!(cron_authorized(Some("s3cret"), None, "days=1&key=s3cret"));
    }

    #[test]
    fn rejects_wrong_or_missing_secret() {
        let bad = HeaderValue::from_static("Bearer nope");
        assert!(!cron_authorized(Some("s3cret"), Some(&bad), ""));
        assert!(!cron_authorized(Some("s3cret"), None, "key=nope"));
        assert!(!cron_authorized(Some("s3cret"), None, ""));
    }
}
