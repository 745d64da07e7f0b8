#![allow(dead_code)]

use std::time::{Duration, SystemTime};

use grigo_backend::config::app::AppConfig;
use grigo_backend::{mint_access_token, AppState, SecurityConfig};
use uuid::Uuid;

pub const TEST_SECRET: &str = "integration_test_secret_for_grigo";

#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

/// State without a pool: routing, auth and error shape only. Anything that
/// reaches the database answers 503 `DB_UNAVAILABLE`.
pub fn state_without_db() -> AppState {
    state_with_config(AppConfig::for_tests())
}

pub fn state_with_config(config: AppConfig) -> AppState {
    AppState::without_db(SecurityConfig::new(TEST_SECRET.as_bytes()), config)
}

pub fn state_with_cron_secret(secret: &str) -> AppState {
    let mut config = AppConfig::for_tests();
    config.cron_secret = Some(secret.to_string());
    state_with_config(config)
}

pub fn bearer_for(state: &AppState, user_id: Uuid) -> String {
    let token = mint_access_token(user_id, "member@grigo.test", SystemTime::now(), &state.security)
        .expect("mint token");
    format!("Bearer {token}")
}

pub fn expired_bearer_for(state: &AppState, user_id: Uuid) -> String {
    let issued = SystemTime::now() - Duration::from_secs(3600);
    let token =
        mint_access_token(user_id, "member@grigo.test", issued, &state.security).expect("mint token");
    format!("Bearer {token}")
}
