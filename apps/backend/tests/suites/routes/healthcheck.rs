use actix_web::{test, web, App};
use grigo_backend::middleware::RequestTrace;
use grigo_backend::routes;
use serde_json::Value;

use crate::common::state_without_db;

#[actix_web::test]
async fn health_is_ok_even_without_database() {
    let app = test::init_service(
        App::new()
            .wrap(RequestTrace)
            .app_data(web::Data::new(state_without_db()))
            .configure(routes::configure),
    )
    .await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], "error");
    assert_eq!(body["migrations"], "unknown");
    assert!(body["db_error"]
        .as_str()
        .is_some_and(|e| e.starts_with("DB unavailable")));
    assert_eq!(body["app_version"], env!("CARGO_PKG_VERSION"));
    assert!(body["time"].as_str().is_some());
}
