use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;

use crate::db::txn::with_txn;
use crate::entities::enums::{BuCode, FinancialKind};
use crate::error::AppError;
use crate::extractors::{CurrentUser, ValidatedJson};
use crate::repos::financial_entries::EntryFilter;
use crate::routes::{query_date, success};
use crate::services::financial_entries::{self as entries, CreateEntry, UpdateEntry};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
struct EntryQuery {
    bu: Option<BuCode>,
    project_id: Option<i64>,
    kind: Option<FinancialKind>,
    start_date: Option<String>,
    end_date: Option<String>,
}

impl EntryQuery {
    fn into_filter(self) -> Result<EntryFilter, AppError> {
        Ok(EntryFilter {
            bu: self.bu,
            project_id: self.project_id,
            kind: self.kind,
            start_date: query_date(self.start_date.as_deref())?,
            end_date: query_date(self.end_date.as_deref())?,
        })
    }
}

#[derive(Debug, Deserialize)]
struct PermissionQuery {
    project_id: Option<i64>,
    entry_id: Option<i64>,
    bu: Option<BuCode>,
}

async fn list_entries(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    query: web::Query<EntryQuery>,
) -> Result<HttpResponse, AppError> {
    let caller = current_user.into_inner();
    let filter = query.into_inner().into_filter()?;
    let rows = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { entries::list(txn, &caller, filter).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(rows))
}

async fn create_entry(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    body: ValidatedJson<CreateEntry>,
) -> Result<HttpResponse, AppError> {
    let caller = current_user.into_inner();
    let input = body.into_inner();
    let entry = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { entries::create(txn, &caller, input).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(entry))
}

async fn update_entry(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    path: web::Path<i64>,
    body: ValidatedJson<UpdateEntry>,
) -> Result<HttpResponse, AppError> {
    let caller = current_user.into_inner();
    let id = path.into_inner();
    let patch = body.into_inner();
    let entry = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { entries::update(txn, &caller, id, patch).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(entry))
}

async fn delete_entry(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let caller = current_user.into_inner();
    let id = path.into_inner();
    with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { entries::delete(txn, &caller, id).await })
    })
    .await?;

    Ok(success())
}

async fn entry_permissions(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    query: web::Query<PermissionQuery>,
) -> Result<HttpResponse, AppError> {
    let caller = current_user.into_inner();
    let PermissionQuery {
        project_id,
        entry_id,
        bu,
    } = query.into_inner();
    let permission = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { entries::permissions(txn, &caller, project_id, entry_id, bu).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(permission))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(list_entries))
            .route(web::post().to(create_entry)),
    )
    // Before `/{id}` so "permissions" is not parsed as an id.
    .service(web::resource("/permissions").route(web::get().to(entry_permissions)))
    .service(
        web::resource("/{id}")
            .route(web::patch().to(update_entry))
            .route(web::delete().to(delete_entry)),
    );
}
