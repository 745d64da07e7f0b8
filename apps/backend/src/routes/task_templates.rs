use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;

use crate::db::txn::with_txn;
use crate::entities::enums::BuCode;
use crate::error::AppError;
use crate::extractors::{CurrentUser, ValidatedJson};
use crate::routes::success;
use crate::services::task_templates::{self, CreateTemplate, GenerateTasks, UpdateTemplate};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
struct TemplateQuery {
    bu: Option<BuCode>,
}

async fn list_templates(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    query: web::Query<TemplateQuery>,
) -> Result<HttpResponse, AppError> {
    let caller = current_user.into_inner();
    let bu = query.into_inner().bu;
    let rows = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { task_templates::list(txn, &caller, bu).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(rows))
}

async fn create_template(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    body: ValidatedJson<CreateTemplate>,
) -> Result<HttpResponse, AppError> {
    let caller = current_user.into_inner();
    let input = body.into_inner();
    let template = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { task_templates::create(txn, &caller, input).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(template))
}

async fn get_template(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let caller = current_user.into_inner();
    let id = path.into_inner();
    let template = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { task_templates::get(txn, &caller, id).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(template))
}

async fn update_template(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    path: web::Path<i64>,
    body: ValidatedJson<UpdateTemplate>,
) -> Result<HttpResponse, AppError> {
    let caller = current_user.into_inner();
    let id = path.into_inner();
    let patch = body.into_inner();
    let template = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { task_templates::update(txn, &caller, id, patch).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(template))
}

async fn delete_template(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let caller = current_user.into_inner();
    let id = path.into_inner();
    with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { task_templates::delete(txn, &caller, id).await })
    })
    .await?;

    Ok(success())
}

async fn generate_tasks(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    body: ValidatedJson<GenerateTasks>,
) -> Result<HttpResponse, AppError> {
    let caller = current_user.into_inner();
    let input = body.into_inner();
    let generated = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { task_templates::generate(txn, &caller, input).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(generated))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(list_templates))
            .route(web::post().to(create_template)),
    )
    .route("/generate", web::post().to(generate_tasks))
    .service(
        web::resource("/{id}")
            .route(web::get().to(get_template))
            .route(web::patch().to(update_template))
            .route(web::delete().to(delete_template)),
    );
}
