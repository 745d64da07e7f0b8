use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use time::{Date, OffsetDateTime, Time};

use crate::db::txn::with_txn;
use crate::domain::kst;
use crate::error::AppError;
use crate::extractors::CurrentUser;
use crate::routes::query_date;
use crate::services::activity;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
struct ActivityQuery {
    date: Option<String>,
    start_date: Option<String>,
    end_date: Option<String>,
    limit: Option<u64>,
}

fn day_start(d: Date) -> OffsetDateTime {
    kst::at_kst(d, Time::MIDNIGHT)
}

fn day_end(d: Date) -> Option<OffsetDateTime> {
    d.next_day().map(day_start)
}

/// `[from, to)` covering whole KST days. A single `date` wins over a range.
fn kst_window(
    date: Option<Date>,
    start: Option<Date>,
    end: Option<Date>,
) -> (Option<OffsetDateTime>, Option<OffsetDateTime>) {
    match date {
        Some(d) => (Some(day_start(d)), day_end(d)),
        None => (start.map(day_start), end.and_then(day_end)),
    }
}

async fn list_activity(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    query: web::Query<ActivityQuery>,
) -> Result<HttpResponse, AppError> {
    let user_id = current_user.id;
    let query = query.into_inner();
    let (from, to) = kst_window(
        query_date(query.date.as_deref())?,
        query_date(query.start_date.as_deref())?,
        query_date(query.end_date.as_deref())?,
    );
    let limit = query.limit;

    let logs = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { activity::list_own(txn, user_id, from, to, limit).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(logs))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(list_activity));
}
