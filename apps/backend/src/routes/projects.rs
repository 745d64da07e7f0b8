use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::db::txn::with_txn;
use crate::entities::enums::BuCode;
use crate::error::AppError;
use crate::extractors::{CurrentUser, ValidatedJson};
use crate::routes::success;
use crate::services::projects::{
    self, CreateProject, ParticipantInput, UpdateProject, UpdateShareSettings,
};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
struct ProjectQuery {
    bu: Option<BuCode>,
}

async fn list_projects(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    query: web::Query<ProjectQuery>,
) -> Result<HttpResponse, AppError> {
    let caller = current_user.into_inner();
    let bu = query.into_inner().bu;
    let projects = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { projects::list(txn, &caller, bu).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(projects))
}

async fn create_project(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    body: ValidatedJson<CreateProject>,
) -> Result<HttpResponse, AppError> {
    let caller = current_user.into_inner();
    let input = body.into_inner();
    let project = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { projects::create(txn, &caller, input).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(project))
}

async fn get_project(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let caller = current_user.into_inner();
    let id = path.into_inner();
    let detail = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { projects::get(txn, &caller, id).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(detail))
}

async fn update_project(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    path: web::Path<i64>,
    body: ValidatedJson<UpdateProject>,
) -> Result<HttpResponse, AppError> {
    let caller = current_user.into_inner();
    let id = path.into_inner();
    let patch = body.into_inner();
    let project = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { projects::update(txn, &caller, id, patch).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(project))
}

async fn delete_project(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let caller = current_user.into_inner();
    let id = path.into_inner();
    with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { projects::delete(txn, &caller, id).await })
    })
    .await?;

    Ok(success())
}

async fn list_participants(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let caller = current_user.into_inner();
    let project_id = path.into_inner();
    let participants = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { projects::participants(txn, &caller, project_id).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(participants))
}

async fn add_participant(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    path: web::Path<i64>,
    body: ValidatedJson<ParticipantInput>,
) -> Result<HttpResponse, AppError> {
    let caller = current_user.into_inner();
    let project_id = path.into_inner();
    let input = body.into_inner();
    let participants = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { projects::add_participant(txn, &caller, project_id, input).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(participants))
}

/// `{pid}` is a user id for internal participants and a numeric id for
/// external workers.
fn participant_from_path(pid: &str) -> ParticipantInput {
    let (user_id, external_worker_id) = match Uuid::parse_str(pid) {
        Ok(user_id) => (Some(user_id), None),
        Err(_) => (None, pid.parse::<i64>().ok()),
    };
    ParticipantInput {
        user_id,
        external_worker_id,
        role: None,
        is_pm: None,
    }
}

async fn update_participant(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    path: web::Path<(i64, String)>,
    body: ValidatedJson<ParticipantInput>,
) -> Result<HttpResponse, AppError> {
    let caller = current_user.into_inner();
    let (project_id, pid) = path.into_inner();
    let mut input = body.into_inner();
    if input.user_id.is_none() && input.external_worker_id.is_none() {
        let from_path = participant_from_path(&pid);
        input.user_id = from_path.user_id;
        input.external_worker_id = from_path.external_worker_id;
    }

    let participants = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(
            async move { projects::update_participant(txn, &caller, project_id, input).await },
        )
    })
    .await?;

    Ok(HttpResponse::Ok().json(participants))
}

async fn remove_participant(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    path: web::Path<(i64, String)>,
) -> Result<HttpResponse, AppError> {
    let caller = current_user.into_inner();
    let (project_id, pid) = path.into_inner();
    let input = participant_from_path(&pid);
    let participants = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(
            async move { projects::remove_participant(txn, &caller, project_id, input).await },
        )
    })
    .await?;

    Ok(HttpResponse::Ok().json(participants))
}

async fn get_share_settings(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let caller = current_user.into_inner();
    let project_id = path.into_inner();
    let settings = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { projects::share_settings(txn, &caller, project_id).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(json!({ "data": settings })))
}

async fn update_share_settings(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    path: web::Path<i64>,
    body: ValidatedJson<UpdateShareSettings>,
) -> Result<HttpResponse, AppError> {
    let caller = current_user.into_inner();
    let project_id = path.into_inner();
    let patch = body.into_inner();
    let settings = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move {
            projects::update_share_settings(txn, &caller, project_id, patch).await
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(json!({ "data": settings })))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(list_projects))
            .route(web::post().to(create_project)),
    )
    .service(
        web::resource("/{id}")
            .route(web::get().to(get_project))
            .route(web::patch().to(update_project))
            .route(web::delete().to(delete_project)),
    )
    .service(
        web::resource("/{id}/participants")
            .route(web::get().to(list_participants))
            .route(web::post().to(add_participant)),
    )
    .service(
        web::resource("/{id}/participants/{pid}")
            .route(web::patch().to(update_participant))
            .route(web::delete().to(remove_participant)),
    )
    .service(
        web::resource("/{id}/share-settings")
            .route(web::get().to(get_share_settings))
            .route(web::patch().to(update_share_settings)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn participant_path_accepts_user_ids_and_worker_ids() {
        let user = participant_from_path("1b4e28ba-2fa1-11d2-883f-0016d3cca427");
        assert!(user.user_id.is_some());
        assert_eq!(user.external_worker_id, None);

        let worker = participant_from_path("42");
        assert_eq!(worker.user_id, None);
        assert_eq!(worker.external_worker_id, Some(42));

        let neither = participant_from_path("pm");
        assert_eq!(neither.user_id, None);
        assert_eq!(neither.external_worker_id, None);
    }
}
