// The login limiter answers 429 once the window budget is spent.

use std::time::Duration;

use actix_extensible_rate_limit::backend::memory::InMemoryBackend;
use actix_extensible_rate_limit::backend::SimpleInputFunctionBuilder;
use actix_extensible_rate_limit::RateLimiter;
use actix_web::{test, web, App};
use grigo_backend::middleware::rate_limit::login_denied_response;
use grigo_backend::middleware::RequestTrace;
use grigo_backend::routes;
use serde_json::Value;

use crate::common::state_without_db;

#[actix_web::test]
async fn login_is_limited_per_window() {
    let backend = InMemoryBackend::builder().build();
    let input = SimpleInputFunctionBuilder::new(Duration::from_secs(60), 2)
        .path_key()
        .build();
    let limiter = RateLimiter::builder(backend, input)
        .add_headers()
        .request_denied_response(login_denied_response)
        .build();

    let app = test::init_service(
        App::new()
            .wrap(RequestTrace)
            .app_data(web::Data::new(state_without_db()))
            .service(
                web::scope("/api/auth")
                    .wrap(limiter)
                    .configure(routes::auth::configure_routes),
            ),
    )
    .await;

    for i in 0..2 {
        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(serde_json::json!({}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 400, "request {} is within budget", i + 1);
        assert!(resp.headers().contains_key("x-ratelimit-remaining"));
    }

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(serde_json::json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 429);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "RATE_LIMITED");
}
