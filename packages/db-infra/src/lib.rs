//! Database configuration and migration orchestration for the GRIGO backend
//! and `migration-cli`.

pub mod config;
pub mod error;
pub mod infra;

pub use config::db;
pub use error::DbInfraError;
pub use infra::db::core::{build_admin_pool, orchestrate_migration};
