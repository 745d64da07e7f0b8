use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey};

use crate::config::app::AppConfig;

const ACCESS_TOKEN_TTL_SECS: i64 = 15 * 60;

/// Access-token signing material. HS256 only.
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    pub jwt_secret: Vec<u8>,
    pub algorithm: Algorithm,
    pub token_ttl_secs: i64,
}

impl SecurityConfig {
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            algorithm: Algorithm::HS256,
            token_ttl_secs: ACCESS_TOKEN_TTL_SECS,
        }
    }

    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            token_ttl_secs: config.jwt_ttl_secs,
            ..Self::new(config.jwt_secret.as_bytes())
        }
    }

    pub fn encoding_key(&self) -> EncodingKey {
        EncodingKey::from_secret(&self.jwt_secret)
    }

    pub fn decoding_key(&self) -> DecodingKey {
        DecodingKey::from_secret(&self.jwt_secret)
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self::from_app_config(&AppConfig::for_tests())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ttl_follows_app_config() {
        let mut config = AppConfig::for_tests();
        config.jwt_ttl_secs = 3600;
        let security = SecurityConfig::from_app_config(&config);
        assert_eq!(security.token_ttl_secs, 3600);
        assert_eq!(security.jwt_secret, config.jwt_secret.as_bytes());
        assert_eq!(security.algorithm, Algorithm::HS256);
    }
}
