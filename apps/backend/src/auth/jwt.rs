use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::state::security_config::SecurityConfig;

/// Claims carried by backend-issued access tokens.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// `app_users.id`
    pub sub: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn user_id(&self) -> Result<Uuid, AppError> {
        Uuid::parse_str(&self.sub).map_err(|_| AppError::unauthorized_invalid_jwt())
    }
}

/// Mint an access token valid for `security.token_ttl_secs` from `now`.
pub fn mint_access_token(
    user_id: Uuid,
    email: &str,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    let iat = now
        .duration_since(UNIX_EPOCH)
        .map_err(|_| AppError::internal("system clock is before the unix epoch"))?
        .as_secs() as i64;

    let claims = Claims {
        sub: user_id.to_string(),
        email: email.to_string(),
        iat,
        exp: iat + security.token_ttl_secs,
    };

    encode(
        &Header::new(security.algorithm),
        &claims,
        &security.encoding_key(),
    )
    .map_err(|e| AppError::internal(format!("failed to encode JWT: {e}")))
}

/// Verify signature and expiry. Expired tokens get their own error code so
/// clients can refresh instead of logging out.
pub fn verify_access_token(token: &str, security: &SecurityConfig) -> Result<Claims, AppError> {
    let mut validation = Validation::new(security.algorithm);
    validation.leeway = 0;

    decode::<Claims>(token, &security.decoding_key(), &validation)
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AppError::unauthorized_expired_jwt(),
        _ => AppError::unauthorized_invalid_jwt(),
    })
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::errors::ErrorCode;

    fn security() -> SecurityConfig {
        SecurityConfig::new("test_secret_key_for_grigo".as_bytes())
    }

    #[test]
    fn mint_and_verify() {
        let id = Uuid::new_v4();
        let now = SystemTime::now();
        let token = mint_access_token(id, "kim@grigo.test", now, &security()).unwrap();
        let claims = verify_access_token(&token, &security()).unwrap();

        assert_eq!(claims.user_id().unwrap(), id);
        assert_eq!(claims.email, "kim@grigo.test");
        assert_eq!(claims.exp - claims.iat, 15 * 60);
    }

    #[test]
    fn expired_token_has_dedicated_code() {
        let now = SystemTime::now() - Duration::from_secs(20 * 60);
        let token = mint_access_token(Uuid::new_v4(), "a@b.c", now, &security()).unwrap();
        let err = verify_access_token(&token, &security()).unwrap_err();
        assert_eq!(err.code(), ErrorCode::UnauthorizedExpiredJwt);
    }

    #[test]
    fn wrong_secret_and_garbage_are_invalid() {
        let token =
            mint_access_token(Uuid::new_v4(), "a@b.c", SystemTime::now(), &security()).unwrap();
        let other = SecurityConfig::new("another-secret".as_bytes());
        assert_eq!(
            verify_access_token(&token, &other).unwrap_err().code(),
            ErrorCode::UnauthorizedInvalidJwt
        );
        assert_eq!(
            verify_access_token("not.a.jwt", &security())
                .unwrap_err()
                .code(),
            ErrorCode::UnauthorizedInvalidJwt
        );
    }

    #[test]
    fn non_uuid_subject_is_rejected() {
        let claims = Claims {
            sub: "google-oauth2|123".into(),
            email: "a@b.c".into(),
            iat: 0,
            exp: 0,
        };
        assert!(claims.user_id().is_err());
    }
}
