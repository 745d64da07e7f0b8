//! Partner settlements. Every response is wrapped in `{data}`.

use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use serde_json::json;

use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::extractors::{CurrentUser, ValidatedJson};
use crate::routes::success;
use crate::services::settlements::{self, CreateSettlement, UpdateSettlement};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettlementQuery {
    partner_id: Option<i64>,
}

async fn list_settlements(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    query: web::Query<SettlementQuery>,
) -> Result<HttpResponse, AppError> {
    let caller = current_user.into_inner();
    let partner_id = query.into_inner().partner_id;
    let data = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { settlements::list(txn, &caller, partner_id).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(json!({ "data": data })))
}

async fn create_settlement(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    body: ValidatedJson<CreateSettlement>,
) -> Result<HttpResponse, AppError> {
    let caller = current_user.into_inner();
    let input = body.into_inner();
    let data = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { settlements::create(txn, &caller, input).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(json!({ "data": data })))
}

async fn get_settlement(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let caller = current_user.into_inner();
    let id = path.into_inner();
    let data = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { settlements::get(txn, &caller, id).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(json!({ "data": data })))
}

async fn update_settlement(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    path: web::Path<i64>,
    body: ValidatedJson<UpdateSettlement>,
) -> Result<HttpResponse, AppError> {
    let caller = current_user.into_inner();
    let id = path.into_inner();
    let patch = body.into_inner();
    let data = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { settlements::update(txn, &caller, id, patch).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(json!({ "data": data })))
}

async fn delete_settlement(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let caller = current_user.into_inner();
    let id = path.into_inner();
    with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { settlements::delete(txn, &caller, id).await })
    })
    .await?;

    Ok(success())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(list_settlements))
            .route(web::post().to(create_settlement)),
    )
    .service(
        web::resource("/{id}")
            .route(web::get().to(get_settlement))
            .route(web::patch().to(update_settlement))
            .route(web::delete().to(delete_settlement)),
    );
}
