use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

use crate::db::txn::with_txn;
use crate::entities::enums::ApprovalStatus;
use crate::error::AppError;
use crate::extractors::{CurrentUser, ValidatedJson};
use crate::routes::{query_bu, success};
use crate::services::leave::{
    self, CreateCompensatory, CreateLeaveRequest, GrantLeave, RejectRequest, RequestQuery,
};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
struct BalanceQuery {
    user_id: Option<Uuid>,
    year: Option<i32>,
    #[serde(default)]
    summary: bool,
}

#[derive(Debug, Deserialize)]
struct TeamQuery {
    bu_code: Option<String>,
    year: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct GrantQuery {
    user_id: Option<Uuid>,
    year: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct CompensatoryQuery {
    requester_id: Option<Uuid>,
    status: Option<ApprovalStatus>,
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

async fn list_requests(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    query: web::Query<RequestQuery>,
) -> Result<HttpResponse, AppError> {
    let caller = current_user.into_inner();
    let query = query.into_inner();
    let requests = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { leave::list_requests(txn, &caller, query).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(requests))
}

async fn create_request(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    body: ValidatedJson<CreateLeaveRequest>,
) -> Result<HttpResponse, AppError> {
    let caller = current_user.into_inner();
    let input = body.into_inner();
    let request = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { leave::create_request(txn, &caller, input).await })
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
        Box::pin(async move { leave::get_request(txn, &caller, id).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(request))
}

async fn cancel_request(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let caller = current_user.into_inner();
    let id = path.into_inner();
    with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { leave::cancel_request(txn, &caller, id).await })
    })
    .await?;

    Ok(success())
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
        Box::pin(async move { leave::approve_request(txn, &caller, id).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(request))
}

async fn reject_request(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    path: web::Path<i64>,
    body: ValidatedJson<RejectRequest>,
) -> Result<HttpResponse, AppError> {
    let caller = current_user.into_inner();
    let id = path.into_inner();
    let input = body.into_inner();
    let request = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { leave::reject_request(txn, &caller, id, input).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(request))
}

// ---------------------------------------------------------------------------
// Balances and grants
// ---------------------------------------------------------------------------

async fn balances(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    query: web::Query<BalanceQuery>,
) -> Result<HttpResponse, AppError> {
    let caller = current_user.into_inner();
    let BalanceQuery {
        user_id,
        year,
        summary,
    } = query.into_inner();
    let view = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { leave::balances(txn, &caller, user_id, year, summary).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(view))
}

async fn team_balances(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    query: web::Query<TeamQuery>,
) -> Result<HttpResponse, AppError> {
    let caller = current_user.into_inner();
    let TeamQuery { bu_code, year } = query.into_inner();
    let bu = query_bu(bu_code.as_deref())?;
    let rows = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { leave::team_balances(txn, &caller, bu, year).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(rows))
}

async fn list_grants(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    query: web::Query<GrantQuery>,
) -> Result<HttpResponse, AppError> {
    let caller = current_user.into_inner();
    let GrantQuery { user_id, year } = query.into_inner();
    let grants = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { leave::grants(txn, &caller, user_id, year).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(grants))
}

async fn create_grant(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    body: ValidatedJson<GrantLeave>,
) -> Result<HttpResponse, AppError> {
    let caller = current_user.into_inner();
    let input = body.into_inner();
    let grant = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { leave::grant(txn, &caller, input).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(grant))
}

// ---------------------------------------------------------------------------
// Compensatory
// ---------------------------------------------------------------------------

async fn list_compensatory(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    query: web::Query<CompensatoryQuery>,
) -> Result<HttpResponse, AppError> {
    let caller = current_user.into_inner();
    let CompensatoryQuery {
        requester_id,
        status,
    } = query.into_inner();
    let requests = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { leave::list_compensatory(txn, &caller, requester_id, status).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(requests))
}

async fn create_compensatory(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    body: ValidatedJson<CreateCompensatory>,
) -> Result<HttpResponse, AppError> {
    let caller = current_user.into_inner();
    let input = body.into_inner();
    let request = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { leave::create_compensatory(txn, &caller, input).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(request))
}

async fn approve_compensatory(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let caller = current_user.into_inner();
    let id = path.into_inner();
    let request = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { leave::approve_compensatory(txn, &caller, id).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(request))
}

async fn reject_compensatory(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    path: web::Path<i64>,
    body: ValidatedJson<RejectRequest>,
) -> Result<HttpResponse, AppError> {
    let caller = current_user.into_inner();
    let id = path.into_inner();
    let input = body.into_inner();
    let request = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { leave::reject_compensatory(txn, &caller, id, input).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(request))
}

/// Approval inbox: leave requests plus, for HEAD admins, compensatory ones.
async fn pending(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let caller = current_user.into_inner();
    let items = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { leave::pending(txn, &caller).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(items))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/requests")
            .route(web::get().to(list_requests))
            .route(web::post().to(create_request)),
    )
    .service(
        web::resource("/requests/{id}")
            .route(web::get().to(get_request))
            .route(web::delete().to(cancel_request)),
    )
    .route("/requests/{id}/approve", web::post().to(approve_request))
    .route("/requests/{id}/reject", web::post().to(reject_request))
    .route("/balances", web::get().to(balances))
    .route("/team-stats", web::get().to(team_balances))
    .service(
        web::resource("/grants")
            .route(web::get().to(list_grants))
            .route(web::post().to(create_grant)),
    )
    .service(
        web::resource("/compensatory")
            .route(web::get().to(list_compensatory))
            .route(web::post().to(create_compensatory)),
    )
    .route("/compensatory/{id}/approve", web::post().to(approve_compensatory))
    .route("/compensatory/{id}/reject", web::post().to(reject_compensatory))
    .route("/pending", web::get().to(pending));
}
