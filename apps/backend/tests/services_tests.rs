// Service-layer rules checked against sea-orm's MockDatabase: each test
// queues the rows the service will read and inspects the statements it
// issued, transaction by transaction.
//
// Run all service tests:
//   cargo test --test services_tests
//
// Run one suite:
//   cargo test --test services_tests services::approvals::

mod common;

#[path = "suites/services/mod.rs"]
mod services;
