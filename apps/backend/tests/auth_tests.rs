//! Login and `/api/auth/me` behavior that does not need a database.
//!
//! Run all auth tests:
//!   cargo test --test auth_tests

mod common;

#[path = "suites/auth/mod.rs"]
mod auth;
