use sea_orm::DatabaseConnection;

use super::security_config::SecurityConfig;
use crate::config::app::AppConfig;
use crate::services::business_units::BuCache;

/// Shared resources handed to every handler through `web::Data`.
#[derive(Clone)]
pub struct AppState {
    /// `None` in tests that exercise routing and error shape only.
    pub db: Option<DatabaseConnection>,
    pub security: SecurityConfig,
    pub config: AppConfig,
    pub bu_cache: BuCache,
}

impl AppState {
    pub fn new(db: DatabaseConnection, security: SecurityConfig, config: AppConfig) -> Self {
        Self {
            db: Some(db),
            security,
            config,
            bu_cache: BuCache::new(),
        }
    }

    pub fn without_db(security: SecurityConfig, config: AppConfig) -> Self {
        Self {
            db: None,
            security,
            config,
            bu_cache: BuCache::new(),
        }
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }

    pub fn for_tests_without_db() -> Self {
        Self::without_db(SecurityConfig::default(), AppConfig::for_tests())
    }
}
