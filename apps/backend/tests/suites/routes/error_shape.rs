// Problem-details contract: every AppError renders the same JSON shape and
// the body trace id matches the `x-trace-id` header.

use actix_web::http::StatusCode;
use actix_web::{test, web, App, HttpResponse};
use backend_test_support::problem_details::assert_problem_response;
use grigo_backend::errors::ErrorCode;
use grigo_backend::middleware::RequestTrace;
use grigo_backend::AppError;

async fn failing_handler() -> Result<HttpResponse, AppError> {
    Err(AppError::invalid_with(
        ErrorCode::InvalidDate,
        "날짜 형식이 올바르지 않습니다.",
    ))
}

async fn unavailable_handler() -> Result<HttpResponse, AppError> {
    Err(AppError::db_unavailable("down"))
}

#[actix_web::test]
async fn validation_error_renders_problem_details() {
    let app = test::init_service(
        App::new()
            .wrap(RequestTrace)
            .route("/_test/error", web::get().to(failing_handler)),
    )
    .await;

    let req = test::TestRequest::get().uri("/_test/error").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(
        resp.headers().get("content-type").unwrap(),
        "application/problem+json"
    );
    assert!(resp.headers().contains_key("x-request-id"));

    let problem = assert_problem_response(
        resp,
        "INVALID_DATE",
        StatusCode::BAD_REQUEST,
        Some("날짜"),
    )
    .await;
    assert!(problem.type_.starts_with("https://grigo-erp.app/errors/"));
    assert!(!problem.trace_id.is_empty());
}

#[actix_web::test]
async fn service_unavailable_carries_retry_after() {
    let app = test::init_service(
        App::new()
            .wrap(RequestTrace)
            .route("/_test/down", web::get().to(unavailable_handler)),
    )
    .await;

    let req = test::TestRequest::get().uri("/_test/down").to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.headers().contains_key("retry-after"));
    assert_problem_response(
        resp,
        "DB_UNAVAILABLE",
        StatusCode::SERVICE_UNAVAILABLE,
        None,
    )
    .await;
}
