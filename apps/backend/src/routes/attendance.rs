use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::extractors::{CurrentUser, ValidatedJson};
use crate::routes::{query_bu, query_date, success};
use crate::services::attendance::{self, CorrectCheckout, CreateLog, SetWorkStatus, UpdateLog};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
struct LogQuery {
    user_id: Option<Uuid>,
    start_date: Option<String>,
    end_date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StatsQuery {
    user_id: Option<Uuid>,
    year: Option<i32>,
    month: Option<u8>,
}

#[derive(Debug, Deserialize)]
struct OverviewQuery {
    date: Option<String>,
    bu_code: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TeamStatsQuery {
    year: Option<i32>,
    month: Option<u8>,
    bu_code: Option<String>,
}

async fn check_in(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let caller = current_user.into_inner();
    let log = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { attendance::check_in(txn, &caller).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(log))
}

async fn check_out(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let caller = current_user.into_inner();
    let log = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { attendance::check_out(txn, &caller).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(log))
}

async fn today_status(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let caller = current_user.into_inner();
    let status = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { attendance::status(txn, &caller).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(status))
}

async fn list_logs(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    query: web::Query<LogQuery>,
) -> Result<HttpResponse, AppError> {
    let caller = current_user.into_inner();
    let query = query.into_inner();
    let start = query_date(query.start_date.as_deref())?;
    let end = query_date(query.end_date.as_deref())?;
    let user_id = query.user_id;

    let logs = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { attendance::list_logs(txn, &caller, user_id, start, end).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(logs))
}

async fn get_log(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let caller = current_user.into_inner();
    let id = path.into_inner();
    let log = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { attendance::get_log(txn, &caller, id).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(log))
}

async fn update_log(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    path: web::Path<i64>,
    body: ValidatedJson<UpdateLog>,
) -> Result<HttpResponse, AppError> {
    let caller = current_user.into_inner();
    let id = path.into_inner();
    let patch = body.into_inner();
    let log = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { attendance::update_log(txn, &caller, id, patch).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(log))
}

async fn delete_log(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let caller = current_user.into_inner();
    let id = path.into_inner();
    with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { attendance::delete_log(txn, &caller, id).await })
    })
    .await?;

    Ok(success())
}

async fn correct_checkout(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    path: web::Path<i64>,
    body: ValidatedJson<CorrectCheckout>,
) -> Result<HttpResponse, AppError> {
    let caller = current_user.into_inner();
    let id = path.into_inner();
    let input = body.into_inner();
    let outcome = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { attendance::correct_checkout(txn, &caller, id, input).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(outcome))
}

async fn pending_auto_checkouts(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let caller = current_user.into_inner();
    let pending = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { attendance::pending_auto_checkouts(txn, &caller).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(pending))
}

async fn monthly_stats(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    query: web::Query<StatsQuery>,
) -> Result<HttpResponse, AppError> {
    let caller = current_user.into_inner();
    let StatsQuery {
        user_id,
        year,
        month,
    } = query.into_inner();
    let stats = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { attendance::monthly(txn, &caller, user_id, year, month).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(stats))
}

async fn auto_checkout_history(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let caller = current_user.into_inner();
    let history = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { attendance::auto_checkout_history(txn, &caller).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(history))
}

async fn get_work_status(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let caller = current_user.into_inner();
    let status = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { attendance::work_status(txn, &caller).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(status))
}

async fn set_work_status(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    body: ValidatedJson<SetWorkStatus>,
) -> Result<HttpResponse, AppError> {
    let caller = current_user.into_inner();
    let input = body.into_inner();
    let status = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { attendance::set_work_status(txn, &caller, input).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(status))
}

async fn admin_overview(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    query: web::Query<OverviewQuery>,
) -> Result<HttpResponse, AppError> {
    let caller = current_user.into_inner();
    let query = query.into_inner();
    let date = query_date(query.date.as_deref())?;
    let bu = query_bu(query.bu_code.as_deref())?;
    let board = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { attendance::admin_overview(txn, &caller, date, bu).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(board))
}

async fn admin_create_log(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    body: ValidatedJson<CreateLog>,
) -> Result<HttpResponse, AppError> {
    let caller = current_user.into_inner();
    let input = body.into_inner();
    let log = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { attendance::admin_create_log(txn, &caller, input).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(log))
}

async fn team_stats(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    query: web::Query<TeamStatsQuery>,
) -> Result<HttpResponse, AppError> {
    let caller = current_user.into_inner();
    let TeamStatsQuery {
        year,
        month,
        bu_code,
    } = query.into_inner();
    let bu = query_bu(bu_code.as_deref())?;
    let stats = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { attendance::team_stats(txn, &caller, year, month, bu).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(stats))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/check-in", web::post().to(check_in))
        .route("/check-out", web::post().to(check_out))
        .route("/status", web::get().to(today_status))
        .route("/pending-auto-checkouts", web::get().to(pending_auto_checkouts))
        .route("/auto-checkout-history", web::get().to(auto_checkout_history))
        .route("/stats", web::get().to(monthly_stats))
        .route("/team-stats", web::get().to(team_stats))
        .service(
            web::resource("/work-status")
                .route(web::get().to(get_work_status))
                .route(web::post().to(set_work_status)),
        )
        .route("/admin/overview", web::get().to(admin_overview))
        .route("/admin/create-log", web::post().to(admin_create_log))
        .route("/logs", web::get().to(list_logs))
        .service(
            web::resource("/logs/{id}")
                .route(web::get().to(get_log))
                .route(web::patch().to(update_log))
                .route(web::delete().to(delete_log)),
        )
        .route(
            "/logs/{id}/correct-checkout",
            web::post().to(correct_checkout),
        );
}
