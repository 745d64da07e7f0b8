use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use backend_test_support::problem_details::assert_problem_response;
use grigo_backend::middleware::RequestTrace;
use grigo_backend::routes;
use serde_json::Value;
use uuid::Uuid;

use crate::common::{bearer_for, expired_bearer_for, state_without_db};

#[actix_web::test]
async fn no_usable_bearer_means_null_user() {
    let state = state_without_db();
    let expired = expired_bearer_for(&state, Uuid::new_v4());
    let app = test::init_service(
        App::new()
            .wrap(RequestTrace)
            .app_data(web::Data::new(state))
            .configure(routes::configure),
    )
    .await;

    for auth in [None, Some("Bearer nope".to_string()), Some(expired)] {
        let mut req = test::TestRequest::get().uri("/api/auth/me");
        if let Some(auth) = auth {
            req = req.insert_header(("Authorization", auth));
        }
        let resp = test::call_service(&app, req.to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["user"].is_null());
    }
}

#[actix_web::test]
async fn valid_bearer_looks_the_user_up() {
    let state = state_without_db();
    let bearer = bearer_for(&state, Uuid::new_v4());
    let app = test::init_service(
        App::new()
            .wrap(RequestTrace)
            .app_data(web::Data::new(state))
            .configure(routes::configure),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/auth/me")
        .insert_header(("Authorization", bearer))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_response(resp, "DB_UNAVAILABLE", StatusCode::SERVICE_UNAVAILABLE, None).await;
}
