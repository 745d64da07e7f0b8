use std::time::SystemTime;

use actix_web::http::header::AUTHORIZATION;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info};

use crate::auth::jwt::{mint_access_token, verify_access_token};
use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::extractors::ValidatedJson;
use crate::logging::pii::Redacted;
use crate::middleware::jwt_extract::bearer_token;
use crate::repos::users::{self as users_repo, User};
use crate::services::users;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub auth_sub: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Exchange an identity-provider subject for a backend access token.
async fn login(
    req: HttpRequest,
    app_state: web::Data<AppState>,
    body: ValidatedJson<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let payload = body.into_inner();
    let (Some(email), Some(auth_sub)) = (present(payload.email), present(payload.auth_sub)) else {
        return Err(AppError::missing_fields("email and auth_sub are required"));
    };

    let user = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { users::login(txn, &email, &auth_sub).await })
    })
    .await?;

    let token = mint_access_token(user.id, &user.email, SystemTime::now(), &app_state.security)?;
    info!(user_id = %user.id, email = %Redacted(&user.email), "login succeeded");

    Ok(HttpResponse::Ok().json(LoginResponse { token, user }))
}

/// Profile of the bearer, or `null`. Never fails on a bad or missing token.
async fn me(req: HttpRequest, app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let claims = bearer_token(req.headers().get(AUTHORIZATION))
        .and_then(|token| verify_access_token(token, &app_state.security))
        .and_then(|claims| claims.user_id());

    let user_id = match claims {
        Ok(user_id) => user_id,
        Err(err) => {
            debug!(code = %err.code(), "me: no usable bearer");
            return Ok(HttpResponse::Ok().json(json!({ "user": null })));
        }
    };

    let user = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { Ok(users_repo::find_user_by_id(txn, user_id).await?) })
    })
    .await?;

    Ok(HttpResponse::Ok().json(json!({ "user": user })))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/login", web::post().to(login))
        .route("/me", web::get().to(me));
}
