use actix_cors::Cors;
use actix_web::http::header;

/// CORS for the configured origins only. Entries that are not http(s) URLs
/// are ignored.
pub fn cors_middleware(allowed_origins: &[String]) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
        ])
        .expose_headers(vec![
            header::HeaderName::from_static("x-trace-id"),
            header::HeaderName::from_static("x-request-id"),
        ])
        .max_age(3600);

    for origin in allowed_origins
        .iter()
        .filter(|o| o.starts_with("http://") || o.starts_with("https://"))
    {
        cors = cors.allowed_origin(origin);
    }

    cors
}
