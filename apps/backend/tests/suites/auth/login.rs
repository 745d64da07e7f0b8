use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use backend_test_support::problem_details::assert_problem_response;
use backend_test_support::unique_helpers::{unique_auth_sub, unique_email};
use grigo_backend::middleware::RequestTrace;
use grigo_backend::routes;
use serde_json::json;

use crate::common::state_without_db;

macro_rules! app {
    () => {
        test::init_service(
            App::new()
                .wrap(RequestTrace)
                .app_data(web::Data::new(state_without_db()))
                .configure(routes::configure),
        )
        .await
    };
}

#[actix_web::test]
async fn missing_fields_fail_before_the_database() {
    let app = app!();

    for body in [
        json!({}),
        json!({ "email": unique_email("staff") }),
        json!({ "email": "  ", "auth_sub": unique_auth_sub() }),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(&body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_problem_response(
            resp,
            "MISSING_REQUIRED_FIELDS",
            StatusCode::BAD_REQUEST,
            Some("auth_sub"),
        )
        .await;
    }
}

#[actix_web::test]
async fn malformed_json_is_a_bad_request() {
    let app = app!();

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"email\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_response(resp, "BAD_REQUEST", StatusCode::BAD_REQUEST, None).await;
}

#[actix_web::test]
async fn complete_request_needs_the_database() {
    let app = app!();

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": unique_email("staff"), "auth_sub": unique_auth_sub() }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_response(resp, "DB_UNAVAILABLE", StatusCode::SERVICE_UNAVAILABLE, None).await;
}
