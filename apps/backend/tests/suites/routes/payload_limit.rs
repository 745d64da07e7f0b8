use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use backend_test_support::problem_details::assert_problem_response;
use grigo_backend::config::app::AppConfig;
use grigo_backend::middleware::RequestTrace;
use grigo_backend::routes;

use crate::common::state_with_config;

#[actix_web::test]
async fn bodies_over_the_configured_limit_are_rejected() {
    let mut config = AppConfig::for_tests();
    config.max_json_payload_size = 32;
    let app = test::init_service(
        App::new()
            .wrap(RequestTrace)
            .app_data(web::Data::new(state_with_config(config)))
            .configure(routes::configure),
    )
    .await;

    let body = serde_json::json!({
        "email": "someone-with-a-long-address@grigo.test",
        "auth_sub": "idp|0123456789",
    });
    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(&body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_response(resp, "BAD_REQUEST", StatusCode::BAD_REQUEST, Some("너무 큽니다"))
        .await;
}
