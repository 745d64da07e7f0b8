use actix_web::{test, web, App};
use grigo_backend::middleware::{security_headers, RequestTrace};
use grigo_backend::routes;

use crate::common::state_without_db;

#[actix_web::test]
async fn hardening_headers_on_success_and_error() {
    let app = test::init_service(
        App::new()
            .wrap(RequestTrace)
            .wrap(security_headers())
            .app_data(web::Data::new(state_without_db()))
            .configure(routes::configure),
    )
    .await;

    for uri in ["/health", "/api/projects"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        let headers = resp.headers();
        assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff", "{uri}");
        assert_eq!(headers.get("x-frame-options").unwrap(), "DENY", "{uri}");
        assert!(headers.contains_key("strict-transport-security"), "{uri}");
        assert!(headers.contains_key("content-security-policy"), "{uri}");
    }
}
