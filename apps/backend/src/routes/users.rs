use actix_web::{web, HttpRequest, HttpResponse};
use serde::Serialize;

use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::extractors::{CurrentUser, ValidatedJson};
use crate::repos::users::User;
use crate::services::users::{self, CreateUser};
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UsersResponse {
    users: Vec<User>,
    current_user: User,
}

async fn list_users(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let users = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { users::list(txn).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(UsersResponse {
        users,
        current_user: current_user.into_inner(),
    }))
}

async fn create_user(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    body: ValidatedJson<CreateUser>,
) -> Result<HttpResponse, AppError> {
    let caller = current_user.into_inner();
    let input = body.into_inner();
    let user = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { users::create(txn, &caller, input).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(user))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(list_users))
            .route(web::post().to(create_user)),
    );
}
