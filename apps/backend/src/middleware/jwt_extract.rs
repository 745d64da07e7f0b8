//! Guards the `/api` scope: requires `Authorization: Bearer <jwt>` and stores
//! the verified `Claims` in request extensions for `CurrentUser`.
//!
//! Rejections are rendered here as problem details rather than bubbled as
//! errors.

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{self, HeaderValue};
use actix_web::{web, Error, HttpMessage, ResponseError};
use futures_util::future::{ready, LocalBoxFuture, Ready};

use crate::auth::jwt::verify_access_token;
use crate::error::AppError;
use crate::state::app_state::AppState;

pub struct JwtExtract;

impl<S, B> Transform<S, ServiceRequest> for JwtExtract
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtExtractMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtExtractMiddleware { service }))
    }
}

pub struct JwtExtractMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for JwtExtractMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // CORS preflight never carries credentials.
        if req.method() == actix_web::http::Method::OPTIONS {
            let fut = self.service.call(req);
            return Box::pin(async move { Ok(fut.await?.map_into_left_body()) });
        }

        let verified = bearer_token(req.headers().get(header::AUTHORIZATION)).and_then(|token| {
            let state = req
                .app_data::<web::Data<AppState>>()
                .ok_or_else(|| AppError::internal("AppState not available"))?;
            verify_access_token(token, &state.security)
        });

        match verified {
            Ok(claims) => {
                req.extensions_mut().insert(claims);
                let fut = self.service.call(req);
                Box::pin(async move { Ok(fut.await?.map_into_left_body()) })
            }
            // Rendered inside the future so the trace scope opened by
            // `RequestTrace` is active.
            Err(err) => Box::pin(async move {
                let res = req.into_response(err.error_response());
                Ok(res.map_into_right_body())
            }),
        }
    }
}

/// Token part of a `Bearer` authorization header.
pub fn bearer_token(value: Option<&HeaderValue>) -> Result<&str, AppError> {
    let raw = value
        .ok_or_else(AppError::unauthorized_missing_bearer)?
        .to_str()
        .map_err(|_| AppError::unauthorized_missing_bearer())?;

    let mut parts = raw.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("bearer") => Ok(token),
        _ => Err(AppError::unauthorized_missing_bearer()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    #[test]
    fn parses_bearer_header() {
        let v = HeaderValue::from_static("Bearer abc.def.ghi");
        assert_eq!(bearer_token(Some(&v)).unwrap(), "abc.def.ghi");
        let v = HeaderValue::from_static("bearer xyz");
        assert_eq!(bearer_token(Some(&v)).unwrap(), "xyz");
    }

    #[test]
    fn rejects_missing_or_malformed_header() {
        assert_eq!(
            bearer_token(None).unwrap_err().code(),
            ErrorCode::UnauthorizedMissingBearer
        );
        for raw in ["Basic abc", "Bearer", "Bearer a b", ""] {
            let v = HeaderValue::from_str(raw).unwrap();
            assert!(bearer_token(Some(&v)).is_err(), "{raw:?} should be rejected");
        }
    }
}
