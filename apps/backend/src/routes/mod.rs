use actix_web::{web, HttpResponse};
use serde_json::json;
use time::Date;

use crate::domain::kst;
use crate::entities::enums::BuCode;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::middleware::JwtExtract;

pub mod activity_logs;
pub mod attendance;
pub mod auth;
pub mod business_units;
pub mod cron;
pub mod financial_entries;
pub mod health;
pub mod leave;
pub mod manuals;
pub mod notifications;
pub mod partner_settlements;
pub mod partners;
pub mod projects;
pub mod task_templates;
pub mod tasks;
pub mod users;
pub mod work_requests;

/// Configure application routes for tests and non-HttpServer contexts.
///
/// In production, `main.rs` wraps `/api/auth` in the login rate limiter and
/// then calls [`configure_app`]. Tests get the same paths without the
/// limiter.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api/auth").configure(auth::configure_routes));
    configure_app(cfg);
}

/// Everything except `/api/auth`.
///
/// Cron triggers authenticate with the shared secret, so they are
/// registered ahead of the bearer-protected `/api` scope: a matched scope
/// never falls through to later services.
pub fn configure_app(cfg: &mut web::ServiceConfig) {
    extractor_config(cfg);

    // Health check: /health
    cfg.configure(health::configure_routes);

    // Cron triggers: /api/{attendance,leave,notifications}/...
    cfg.configure(cron::configure_routes);

    cfg.service(
        web::scope("/api")
            .wrap(JwtExtract)
            .service(web::scope("/users").configure(users::configure_routes))
            .service(web::scope("/business-units").configure(business_units::configure_routes))
            .service(web::scope("/partners").configure(partners::configure_routes))
            .service(web::scope("/projects").configure(projects::configure_routes))
            .service(web::scope("/tasks").configure(tasks::configure_routes))
            .service(
                web::scope("/financial-entries").configure(financial_entries::configure_routes),
            )
            .service(
                web::scope("/partner-settlements")
                    .configure(partner_settlements::configure_routes),
            )
            .service(
                web::scope("/attendance")
                    .service(
                        web::scope("/work-requests").configure(work_requests::configure_routes),
                    )
                    .configure(attendance::configure_routes),
            )
            .service(web::scope("/leave").configure(leave::configure_routes))
            .service(web::scope("/manuals").configure(manuals::configure_routes))
            .service(web::scope("/task-templates").configure(task_templates::configure_routes))
            .service(web::scope("/notifications").configure(notifications::configure_routes))
            .service(web::scope("/activity-logs").configure(activity_logs::configure_routes)),
    );
}

/// Query and path extraction failures render as problem details.
fn extractor_config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(|err, _req| {
        AppError::bad_request(ErrorCode::BadRequest, err.to_string()).into()
    }))
    .app_data(web::PathConfig::default().error_handler(|err, _req| {
        AppError::not_found(ErrorCode::NotFound, err.to_string()).into()
    }));
}

/// Optional `YYYY-MM-DD` query value; blank counts as absent.
pub(crate) fn query_date(raw: Option<&str>) -> Result<Option<Date>, AppError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => kst::parse_date(s).map(Some).ok_or_else(|| {
            AppError::invalid_with(ErrorCode::InvalidDate, format!("Invalid date: {s}"))
        }),
    }
}

/// Optional business-unit filter; blank and `all` mean every unit.
pub(crate) fn query_bu(raw: Option<&str>) -> Result<Option<BuCode>, AppError> {
    match raw.map(str::trim).filter(|s| !s.is_empty() && !s.eq_ignore_ascii_case("all")) {
        None => Ok(None),
        Some(s) => serde_json::from_value(serde_json::Value::String(s.to_string()))
            .map(Some)
            .map_err(|_| AppError::invalid(format!("Invalid bu_code: {s}"))),
    }
}

pub(crate) fn success() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "success": true }))
}
