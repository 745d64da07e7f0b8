use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;

use crate::db::txn::with_txn;
use crate::entities::enums::BuCode;
use crate::error::AppError;
use crate::extractors::{CurrentUser, ValidatedJson};
use crate::routes::success;
use crate::services::manuals::{self, CreateManual, UpdateManual};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
struct ManualQuery {
    bu: Option<BuCode>,
    category: Option<String>,
}

async fn list_manuals(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    query: web::Query<ManualQuery>,
) -> Result<HttpResponse, AppError> {
    let caller = current_user.into_inner();
    let ManualQuery { bu, category } = query.into_inner();
    let category = category.filter(|c| !c.is_empty());
    let rows = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { manuals::list(txn, &caller, bu, category.as_deref()).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(rows))
}

async fn create_manual(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    body: ValidatedJson<CreateManual>,
) -> Result<HttpResponse, AppError> {
    let caller = current_user.into_inner();
    let input = body.into_inner();
    let manual = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { manuals::create(txn, &caller, input).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(manual))
}

async fn get_manual(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let caller = current_user.into_inner();
    let id = path.into_inner();
    let manual = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { manuals::get(txn, &caller, id).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(manual))
}

async fn update_manual(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    path: web::Path<i64>,
    body: ValidatedJson<UpdateManual>,
) -> Result<HttpResponse, AppError> {
    let caller = current_user.into_inner();
    let id = path.into_inner();
    let patch = body.into_inner();
    let manual = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { manuals::update(txn, &caller, id, patch).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(manual))
}

async fn delete_manual(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let caller = current_user.into_inner();
    let id = path.into_inner();
    with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { manuals::delete(txn, &caller, id).await })
    })
    .await?;

    Ok(success())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(list_manuals))
            .route(web::post().to(create_manual)),
    )
    .service(
        web::resource("/{id}")
            .route(web::get().to(get_manual))
            .route(web::patch().to(update_manual))
            .route(web::delete().to(delete_manual)),
    );
}
