use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;

use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::extractors::{CurrentUser, ValidatedJson};
use crate::services::partners::{self, CreatePartner};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
struct PartnerQuery {
    entity_type: Option<String>,
}

async fn list_partners(
    req: HttpRequest,
    _current_user: CurrentUser,
    app_state: web::Data<AppState>,
    query: web::Query<PartnerQuery>,
) -> Result<HttpResponse, AppError> {
    let entity_type = query.into_inner().entity_type.filter(|t| !t.is_empty());
    let partners = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { partners::list(txn, entity_type.as_deref()).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(partners))
}

async fn create_partner(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    body: ValidatedJson<CreatePartner>,
) -> Result<HttpResponse, AppError> {
    let caller = current_user.into_inner();
    let input = body.into_inner();
    let partner = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { partners::create(txn, &caller, input).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(partner))
}

async fn get_partner(
    req: HttpRequest,
    _current_user: CurrentUser,
    app_state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let partner = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { partners::get(txn, id).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(partner))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(list_partners))
            .route(web::post().to(create_partner)),
    )
    .service(web::resource("/{id}").route(web::get().to(get_partner)));
}
