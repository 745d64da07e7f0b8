use db_infra::config::db::RuntimeEnv;

use crate::config::app::AppConfig;
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

/// Assembles an `AppState` for `main` and for tests.
pub struct StateBuilder {
    security_config: SecurityConfig,
    app_config: AppConfig,
    env: Option<RuntimeEnv>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            security_config: SecurityConfig::default(),
            app_config: AppConfig::for_tests(),
            env: None,
        }
    }

    pub fn with_db(mut self, env: RuntimeEnv) -> Self {
        self.env = Some(env);
        self
    }

    pub fn with_security(mut self, security_config: SecurityConfig) -> Self {
        self.security_config = security_config;
        self
    }

    pub fn with_config(mut self, app_config: AppConfig) -> Self {
        self.app_config = app_config;
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        match self.env {
            Some(env) => {
                let conn = bootstrap_db(env).await?;
                Ok(AppState::new(conn, self.security_config, self.app_config))
            }
            None => Ok(AppState::without_db(self.security_config, self.app_config)),
        }
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
