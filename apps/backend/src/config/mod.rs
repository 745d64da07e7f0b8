pub mod app;

pub use db_infra::config::db;
