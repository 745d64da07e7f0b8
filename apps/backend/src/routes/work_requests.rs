use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

use crate::db::txn::with_txn;
use crate::entities::enums::ApprovalStatus;
use crate::error::AppError;
use crate::extractors::{CurrentUser, ValidatedJson};
use crate::services::work_requests::{self, CreateWorkRequest, RejectWorkRequest};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
struct WorkRequestQuery {
    requester_id: Option<Uuid>,
    status: Option<ApprovalStatus>,
}

async fn list_requests(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    query: web::Query<WorkRequestQuery>,
) -> Result<HttpResponse, AppError> {
    let caller = current_user.into_inner();
    let WorkRequestQuery {
        requester_id,
        status,
    } = query.into_inner();
    let requests = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { work_requests::list(txn, &caller, requester_id, status).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(requests))
}

async fn create_request(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    body: ValidatedJson<CreateWorkRequest>,
) -> Result<HttpResponse, AppError> {
    let caller = current_user.into_inner();
    let input = body.into_inner();
    let request = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { work_requests::create(txn, &caller, input).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(request))
}

async fn get_request(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let caller = current_user.into_inner();
    let id = path.into_inner();
    let request = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { work_requests::get(txn, &caller, id).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(request))
}

async fn approve_request(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let caller = current_user.into_inner();
    let id = path.into_inner();
    let request = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { work_requests::approve(txn, &caller, id).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(request))
}

async fn reject_request(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    path: web::Path<i64>,
    body: ValidatedJson<RejectWorkRequest>,
) -> Result<HttpResponse, AppError> {
    let caller = current_user.into_inner();
    let id = path.into_inner();
    let input = body.into_inner();
    let request = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { work_requests::reject(txn, &caller, id, input).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(request))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(list_requests))
            .route(web::post().to(create_request)),
    )
    .route("/{id}", web::get().to(get_request))
    .route("/{id}/approve", web::post().to(approve_request))
    .route("/{id}/reject", web::post().to(reject_request));
}
