pub mod cron_auth;
pub mod error_shape;
pub mod healthcheck;
pub mod payload_limit;
pub mod protected_routes;
pub mod rate_limiting;
pub mod security_headers;
