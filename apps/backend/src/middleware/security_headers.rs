//! Hardening headers for a JSON-only API.

use actix_web::http::header;
use actix_web::middleware::DefaultHeaders;

/// Added to every response that does not already set them. Responses carry
/// per-user data, hence `no-store`.
pub fn security_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add((header::X_CONTENT_TYPE_OPTIONS, "nosniff"))
        .add((header::X_FRAME_OPTIONS, "DENY"))
        .add((
            header::STRICT_TRANSPORT_SECURITY,
            "max-age=31536000; includeSubDomains",
        ))
        .add((header::REFERRER_POLICY, "strict-origin-when-cross-origin"))
        .add((
            header::CONTENT_SECURITY_POLICY,
            "default-src 'none'; frame-ancestors 'none'",
        ))
        .add((
            header::HeaderName::from_static("permissions-policy"),
            "geolocation=(), microphone=(), camera=()",
        ))
        .add((header::CACHE_CONTROL, "no-store"))
}
