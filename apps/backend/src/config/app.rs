//! Process configuration loaded from environment variables.
//!
//! Database settings are resolved separately by `db_infra::config::db`.

use std::env;

use crate::error::AppError;

const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";
const DEFAULT_JWT_TTL_SECS: i64 = 15 * 60;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_ttl_secs: i64,
    /// When `None`, cron endpoints are open.
    pub cron_secret: Option<String>,
    pub cors_allowed_origins: Vec<String>,
    pub max_json_payload_size: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let host = env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port_str = env::var("BACKEND_PORT").unwrap_or_else(|_| "3001".to_string());
        let port = port_str.parse::<u16>().map_err(|_| {
            AppError::config(format!(
                "BACKEND_PORT must be a valid port number, got '{port_str}'"
            ))
        })?;

        let jwt_secret = env::var("BACKEND_JWT_SECRET")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| AppError::config("BACKEND_JWT_SECRET must be set"))?;

        let jwt_ttl_secs = match env::var("BACKEND_JWT_TTL_SECS") {
            Ok(raw) => raw
                .trim()
                .parse::<i64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| {
                    AppError::config(format!(
                        "BACKEND_JWT_TTL_SECS must be a positive number of seconds, got '{raw}'"
                    ))
                })?,
            Err(_) => DEFAULT_JWT_TTL_SECS,
        };

        let cron_secret = env::var("CRON_SECRET")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .map(|raw| parse_origins(&raw))
            .unwrap_or_default();
        let cors_allowed_origins = if cors_allowed_origins.is_empty() {
            vec![DEFAULT_CORS_ORIGIN.to_string()]
        } else {
            cors_allowed_origins
        };

        let max_json_payload_size = env::var("MAX_JSON_PAYLOAD_SIZE")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(256 * 1024);

        Ok(Self {
            host,
            port,
            jwt_secret,
            jwt_ttl_secs,
            cron_secret,
            cors_allowed_origins,
            max_json_payload_size,
        })
    }

    /// Configuration for tests that never touch the environment.
    pub fn for_tests() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 0,
            jwt_secret: "test_secret_for_grigo_backend".to_string(),
            jwt_ttl_secs: DEFAULT_JWT_TTL_SECS,
            cron_secret: None,
            cors_allowed_origins: vec![DEFAULT_CORS_ORIGIN.to_string()],
            max_json_payload_size: 256 * 1024,
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().trim_end_matches('/').to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    fn clear_env() {
        for key in [
            "BACKEND_HOST",
            "BACKEND_PORT",
            "BACKEND_JWT_SECRET",
            "BACKEND_JWT_TTL_SECS",
            "CRON_SECRET",
            "CORS_ALLOWED_ORIGINS",
            "MAX_JSON_PAYLOAD_SIZE",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn origins_are_trimmed_and_deduplicated_of_blanks() {
        assert_eq!(
            parse_origins(" https://erp.grigo.kr/ , ,http://localhost:3000"),
            vec!["https://erp.grigo.kr", "http://localhost:3000"]
        );
        assert!(parse_origins(" , ").is_empty());
    }

    #[test]
    #[serial]
    fn missing_jwt_secret_is_a_config_error() {
        clear_env();
        let err = AppConfig::from_env().unwrap_err();
        assert_eq!(err.code(), crate::errors::ErrorCode::ConfigError);
    }

    #[test]
    #[serial]
    fn defaults_apply() {
        clear_env();
        env::set_var("BACKEND_JWT_SECRET", "s3cret");
        let cfg = AppConfig::from_env().unwrap();
        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.port, 3001);
        assert_eq!(cfg.jwt_ttl_secs, 900);
        assert_eq!(cfg.cron_secret, None);
        assert_eq!(cfg.cors_allowed_origins, vec![DEFAULT_CORS_ORIGIN]);
        clear_env();
    }

    #[test]
    #[serial]
    fn bad_port_and_blank_cron_secret() {
        clear_env();
        env::set_var("BACKEND_JWT_SECRET", "s3cret");
        env::set_var("CRON_SECRET", "   ");
        let cfg = AppConfig::from_env().unwrap();
        assert_eq!(cfg.cron_secret, None);

        env::set_var("BACKEND_PORT", "eighty");
        assert!(AppConfig::from_env().is_err());
        clear_env();
    }

    #[test]
    #[serial]
    fn jwt_ttl_must_be_positive() {
        clear_env();
        env::set_var("BACKEND_JWT_SECRET", "s3cret");
        env::set_var("BACKEND_JWT_TTL_SECS", "3600");
        assert_eq!(AppConfig::from_env().unwrap().jwt_ttl_secs, 3600);

        env::set_var("BACKEND_JWT_TTL_SECS", "0");
        assert!(AppConfig::from_env().is_err());
        clear_env();
    }
}
