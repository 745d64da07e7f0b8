pub mod core;
pub mod locking;

pub use core::{build_admin_pool, orchestrate_migration, sanitize_db_url};
pub use locking::MigrationLock;
