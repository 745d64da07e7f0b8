// Cron triggers sit outside the bearer scope and check the shared secret.

use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use backend_test_support::problem_details::assert_problem_response;
use grigo_backend::middleware::RequestTrace;
use grigo_backend::routes;

use crate::common::{state_with_cron_secret, state_without_db};

const CRON_PATHS: [&str; 4] = [
    "/api/attendance/auto-checkout",
    "/api/leave/auto-generate-monthly",
    "/api/leave/auto-generate-yearly",
    "/api/notifications/due-soon",
];

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
async fn wrong_or_missing_secret_is_rejected() {
    let app = app!(state_with_cron_secret("s3cret"));

    for path in CRON_PATHS {
        let req = test::TestRequest::post().uri(path).to_request();
        let resp = test::call_service(&app, req).await;
        assert_problem_response(resp, "UNAUTHORIZED_CRON", StatusCode::UNAUTHORIZED, None).await;

        let req = test::TestRequest::get()
            .uri(&format!("{path}?key=wrong"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_problem_response(resp, "UNAUTHORIZED_CRON", StatusCode::UNAUTHORIZED, None).await;
    }
}

#[actix_web::test]
async fn secret_in_header_or_query_is_accepted() {
    let app = app!(state_with_cron_secret("s3cret"));

    let req = test::TestRequest::post()
        .uri("/api/attendance/auto-checkout")
        .insert_header(("Authorization", "Bearer s3cret"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_response(resp, "DB_UNAVAILABLE", StatusCode::SERVICE_UNAVAILABLE, None).await;

    let req = test::TestRequest::get()
        .uri("/api/notifications/due-soon?days=3&key=s3cret")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_response(resp, "DB_UNAVAILABLE", StatusCode::SERVICE_UNAVAILABLE, None).await;
}

#[actix_web::test]
async fn open_when_no_secret_is_configured() {
    let app = app!(state_without_db());

    let req = test::TestRequest::get()
        .uri("/api/leave/auto-generate-yearly")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_response(resp, "DB_UNAVAILABLE", StatusCode::SERVICE_UNAVAILABLE, None).await;
}

#[actix_web::test]
async fn due_soon_rejects_unbounded_look_ahead() {
    let app = app!(state_with_cron_secret("s3cret"));

    for days in ["-1", "366", "9223372036854775807"] {
        let req = test::TestRequest::get()
            .uri(&format!("/api/notifications/due-soon?days={days}&key=s3cret"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_problem_response(resp, "VALIDATION_ERROR", StatusCode::BAD_REQUEST, None).await;
    }
}
