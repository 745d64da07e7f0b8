// Bearer handling on the `/api` scope.

use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use backend_test_support::problem_details::assert_problem_response;
use grigo_backend::middleware::RequestTrace;
use grigo_backend::routes;
use uuid::Uuid;

use crate::common::{bearer_for, expired_bearer_for, state_without_db};

macro_rules! app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .wrap(RequestTrace)
                .app_data(web::Data::new($state))
                .configure(routes::configure),
        )
        .await
    };
}

#[actix_web::test]
async fn missing_bearer_is_rejected_on_every_scope() {
    let app = app!(state_without_db());

    for uri in [
        "/api/users",
        "/api/projects",
        "/api/tasks",
        "/api/financial-entries/permissions",
        "/api/attendance/status",
        "/api/attendance/work-requests",
        "/api/leave/balances",
        "/api/notifications",
        "/api/activity-logs",
        "/api/manuals",
        "/api/manuals/1",
        "/api/task-templates",
        "/api/attendance/admin/overview",
        "/api/attendance/team-stats",
        "/api/attendance/work-status",
        "/api/attendance/auto-checkout-history",
        "/api/leave/team-stats",
    ] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(
            resp.headers().get("www-authenticate").map(|v| v.as_bytes()),
            Some(&b"Bearer"[..]),
            "{uri}"
        );
        assert_problem_response(
            resp,
            "UNAUTHORIZED_MISSING_BEARER",
            StatusCode::UNAUTHORIZED,
            None,
        )
        .await;
    }
}

#[actix_web::test]
async fn garbage_token_is_invalid() {
    let app = app!(state_without_db());

    let req = test::TestRequest::get()
        .uri("/api/projects")
        .insert_header(("Authorization", "Bearer not.a.jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_response(resp, "UNAUTHORIZED_INVALID_JWT", StatusCode::UNAUTHORIZED, None)
        .await;
}

#[actix_web::test]
async fn expired_token_has_its_own_code() {
    let state = state_without_db();
    let bearer = expired_bearer_for(&state, Uuid::new_v4());
    let app = app!(state);

    let req = test::TestRequest::get()
        .uri("/api/tasks")
        .insert_header(("Authorization", bearer))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_response(resp, "UNAUTHORIZED_EXPIRED_JWT", StatusCode::UNAUTHORIZED, None)
        .await;
}

#[actix_web::test]
async fn valid_token_reaches_user_lookup() {
    let state = state_without_db();
    let bearer = bearer_for(&state, Uuid::new_v4());
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/api/attendance/check-in")
        .insert_header(("Authorization", bearer))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_response(resp, "DB_UNAVAILABLE", StatusCode::SERVICE_UNAVAILABLE, None).await;
}

#[actix_web::test]
async fn template_generation_is_behind_the_bearer() {
    let app = app!(state_without_db());

    let req = test::TestRequest::post()
        .uri("/api/task-templates/generate")
        .set_json(serde_json::json!({ "template_id": 1, "tasks": [] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_response(
        resp,
        "UNAUTHORIZED_MISSING_BEARER",
        StatusCode::UNAUTHORIZED,
        None,
    )
    .await;
}
