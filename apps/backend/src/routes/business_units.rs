use actix_web::{web, HttpRequest, HttpResponse};

use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::extractors::CurrentUser;
use crate::services::business_units;
use crate::state::app_state::AppState;

/// Served from the in-process cache after the first hit.
async fn list_business_units(
    req: HttpRequest,
    _current_user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let cache = app_state.bu_cache.clone();
    let units = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { business_units::list(txn, &cache).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(units.as_ref()))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(list_business_units));
}
