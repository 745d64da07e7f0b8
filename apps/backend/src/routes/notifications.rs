use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use serde_json::json;

use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::extractors::{CurrentUser, ValidatedJson};
use crate::routes::success;
use crate::services::notifications::{self, CreateNotification};
use crate::state::app_state::AppState;

const DEFAULT_PAGE_SIZE: u64 = 20;

#[derive(Debug, Deserialize)]
struct NotificationQuery {
    limit: Option<u64>,
    offset: Option<u64>,
    #[serde(default)]
    unread_only: bool,
}

#[derive(Debug, Deserialize)]
pub struct MarkReadRequest {
    pub read: bool,
}

async fn list_notifications(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    query: web::Query<NotificationQuery>,
) -> Result<HttpResponse, AppError> {
    let user_id = current_user.id;
    let query = query.into_inner();
    let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE);
    let offset = query.offset.unwrap_or(0);
    let unread_only = query.unread_only;

    let page = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move {
            notifications::list_own(txn, user_id, limit, offset, unread_only).await
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(page))
}

async fn create_notification(
    req: HttpRequest,
    _current_user: CurrentUser,
    app_state: web::Data<AppState>,
    body: ValidatedJson<CreateNotification>,
) -> Result<HttpResponse, AppError> {
    let input = body.into_inner();
    let notification = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { notifications::create(txn, input).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(notification))
}

async fn mark_read(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    path: web::Path<i64>,
    body: ValidatedJson<MarkReadRequest>,
) -> Result<HttpResponse, AppError> {
    let user_id = current_user.id;
    let id = path.into_inner();
    let read = body.read;
    let notification = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { notifications::set_read(txn, user_id, id, read).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(notification))
}

async fn delete_notification(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let user_id = current_user.id;
    let id = path.into_inner();
    with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { notifications::delete_own(txn, user_id, id).await })
    })
    .await?;

    Ok(success())
}

async fn mark_all_read(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user_id = current_user.id;
    let updated = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { notifications::mark_all_read(txn, user_id).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(json!({ "success": true, "updated": updated })))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(list_notifications))
            .route(web::post().to(create_notification)),
    )
    // Ahead of `/{id}`: a path match with the wrong method answers 405.
    .route("/read-all", web::post().to(mark_all_read))
    .service(
        web::resource("/{id}")
            .route(web::patch().to(mark_read))
            .route(web::delete().to(delete_notification)),
    );
}
