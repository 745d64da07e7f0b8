use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

use crate::db::txn::with_txn;
use crate::entities::enums::BuCode;
use crate::error::AppError;
use crate::extractors::{CurrentUser, ValidatedJson};
use crate::repos::tasks::TaskFilter;
use crate::routes::success;
use crate::services::tasks::{self, CreateTask, UpdateTask};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
struct TaskQuery {
    bu: Option<BuCode>,
    project_id: Option<i64>,
    assignee_id: Option<Uuid>,
}

impl From<TaskQuery> for TaskFilter {
    fn from(q: TaskQuery) -> Self {
        TaskFilter {
            bu: q.bu,
            project_id: q.project_id,
            assignee_id: q.assignee_id,
        }
    }
}

async fn list_tasks(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    query: web::Query<TaskQuery>,
) -> Result<HttpResponse, AppError> {
    let caller = current_user.into_inner();
    let filter = TaskFilter::from(query.into_inner());
    let tasks = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { tasks::list(txn, &caller, filter).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(tasks))
}

async fn create_task(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    body: ValidatedJson<CreateTask>,
) -> Result<HttpResponse, AppError> {
    let caller = current_user.into_inner();
    let input = body.into_inner();
    let task = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { tasks::create(txn, &caller, input).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(task))
}

async fn get_task(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let caller = current_user.into_inner();
    let id = path.into_inner();
    let task = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { tasks::get(txn, &caller, id).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(task))
}

async fn update_task(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    path: web::Path<i64>,
    body: ValidatedJson<UpdateTask>,
) -> Result<HttpResponse, AppError> {
    let caller = current_user.into_inner();
    let id = path.into_inner();
    let patch = body.into_inner();
    let task = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { tasks::update(txn, &caller, id, patch).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(task))
}

async fn delete_task(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let caller = current_user.into_inner();
    let id = path.into_inner();
    with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { tasks::delete(txn, &caller, id).await })
    })
    .await?;

    Ok(success())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(list_tasks))
            .route(web::post().to(create_task)),
    )
    .service(
        web::resource("/{id}")
            .route(web::get().to(get_task))
            .route(web::patch().to(update_task))
            .route(web::delete().to(delete_task)),
    );
}
