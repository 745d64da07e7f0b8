// HTTP routes and middleware tests that run without a database.
//
// Run all routes tests:
//   cargo test --test routes_tests
//
// Run one suite:
//   cargo test --test routes_tests routes::cron_auth::

mod common;

#[path = "suites/routes/mod.rs"]
mod routes;
