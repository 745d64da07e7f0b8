//! Scheduler-triggered batch jobs. Each accepts POST and GET so any cron
//! service can reach it, and authenticates with the shared secret instead
//! of a bearer token.

use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use tracing::info;

use crate::db::txn::with_txn;
use crate::domain::kst;
use crate::error::AppError;
use crate::extractors::CronAuth;
use crate::services::{attendance, leave, notifications};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
struct DueSoonQuery {
    days: Option<i64>,
}

async fn auto_checkout(
    req: HttpRequest,
    _auth: CronAuth,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let summary = with_txn(Some(&req), &app_state, |txn| {
        Box::pin(async move { attendance::auto_checkout(txn).await })
    })
    .await?;

    info!(job = "auto_checkout", result = %summary, "cron job finished");
    Ok(HttpResponse::Ok().json(summary))
}

async fn leave_monthly(
    req: HttpRequest,
    _auth: CronAuth,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let summary = with_txn(Some(&req), &app_state, |txn| {
        Box::pin(async move { leave::auto_generate_monthly(txn).await })
    })
    .await?;

    info!(job = "leave_monthly", result = %summary, "cron job finished");
    Ok(HttpResponse::Ok().json(summary))
}

async fn leave_yearly(
    req: HttpRequest,
    _auth: CronAuth,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let summary = with_txn(Some(&req), &app_state, |txn| {
        Box::pin(async move { leave::auto_generate_yearly(txn).await })
    })
    .await?;

    info!(job = "leave_yearly", result = %summary, "cron job finished");
    Ok(HttpResponse::Ok().json(summary))
}

async fn due_soon(
    req: HttpRequest,
    _auth: CronAuth,
    app_state: web::Data<AppState>,
    query: web::Query<DueSoonQuery>,
) -> Result<HttpResponse, AppError> {
    let days = query.days.unwrap_or(1);
    let due = notifications::due_date(kst::today_kst(), days)?;
    let summary = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { notifications::send_due_soon(txn, due).await })
    })
    .await?;

    info!(job = "due_soon", days, result = %summary, "cron job finished");
    Ok(HttpResponse::Ok().json(summary))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/attendance/auto-checkout")
            .route(web::post().to(auto_checkout))
            .route(web::get().to(auto_checkout)),
    )
    .service(
        web::resource("/api/leave/auto-generate-monthly")
            .route(web::post().to(leave_monthly))
            .route(web::get().to(leave_monthly)),
    )
    .service(
        web::resource("/api/leave/auto-generate-yearly")
            .route(web::post().to(leave_yearly))
            .route(web::get().to(leave_yearly)),
    )
    .service(
        web::resource("/api/notifications/due-soon")
            .route(web::post().to(due_soon))
            .route(web::get().to(due_soon)),
    );
}
