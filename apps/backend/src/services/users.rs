//! Login binding and the user directory.

use lazy_regex::regex_is_match;
use sea_orm::ConnectionTrait;
use serde::Deserialize;
use time::Date;
use tracing::{debug, info, warn};

use crate::entities::enums::{BuCode, Role};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::logging::pii::Redacted;
use crate::logging::security;
use crate::repos::users::{self, User, UserCreate};

/// Show only the first four characters of an identity-provider subject.
fn redact_auth_sub(sub: &str) -> String {
    let prefix: String = sub.chars().take(4).collect();
    if prefix.len() == sub.len() {
        "*".repeat(sub.chars().count())
    } else {
        format!("{prefix}***")
    }
}

pub fn is_valid_email(email: &str) -> bool {
    regex_is_match!(r"^[^\s@]+@[^\s@]+\.[^\s@]+$", email)
}

/// Resolve the `app_users` row for a login. Accounts are provisioned by an
/// admin; the identity-provider subject is bound the first time the account
/// signs in and must match afterwards.
pub async fn login<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: &str,
    auth_sub: &str,
) -> Result<User, AppError> {
    let email = email.trim().to_lowercase();
    let auth_sub = auth_sub.trim();

    if email.is_empty() || auth_sub.is_empty() {
        return Err(AppError::missing_fields("email and auth_sub are required"));
    }
    if !is_valid_email(&email) {
        return Err(AppError::invalid_with(
            ErrorCode::InvalidEmail,
            "올바른 이메일 형식이 아닙니다.",
        ));
    }

    let Some(account) = users::find_account_by_email(conn, &email).await? else {
        security::login_failed("unknown_email", Some(&email));
        return Err(AppError::forbidden_user_not_found());
    };

    match account.auth_sub.as_deref() {
        Some(existing) if existing != auth_sub => {
            warn!(
                user_id = %account.id,
                email = %Redacted(&email),
                incoming_sub = %redact_auth_sub(auth_sub),
                existing_sub = %redact_auth_sub(existing),
                "auth subject mismatch"
            );
            security::login_failed("auth_sub_mismatch", Some(&email));
            Err(AppError::conflict(
                ErrorCode::AuthSubMismatch,
                "이 이메일은 다른 계정에 연결되어 있습니다. 관리자에게 문의해주세요.",
            ))
        }
        Some(_) => {
            debug!(user_id = %account.id, "repeat login");
            Ok(User::from(account))
        }
        None => {
            info!(
                user_id = %account.id,
                email = %Redacted(&email),
                auth_sub = %redact_auth_sub(auth_sub),
                "binding auth subject on first login"
            );
            Ok(users::bind_auth_sub(conn, account, auth_sub).await?)
        }
    }
}

pub async fn list<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<Vec<User>, AppError> {
    Ok(users::list_users(conn).await?)
}

#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub email: Option<String>,
    pub name: Option<String>,
    pub role: Option<Role>,
    pub bu_code: Option<BuCode>,
    pub position: Option<String>,
    pub hire_date: Option<Date>,
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    caller: &User,
    input: CreateUser,
) -> Result<User, AppError> {
    if caller.role != Role::Admin {
        security::admin_action_denied("create_user", &caller.id.to_string());
        return Err(AppError::forbidden("Permission denied"));
    }

    let email = input.email.map(|e| e.trim().to_lowercase()).unwrap_or_default();
    let name = input.name.map(|n| n.trim().to_string()).unwrap_or_default();
    if email.is_empty() || name.is_empty() {
        return Err(AppError::missing_fields("email and name are required"));
    }
    if !is_valid_email(&email) {
        return Err(AppError::invalid_with(
            ErrorCode::InvalidEmail,
            "올바른 이메일 형식이 아닙니다.",
        ));
    }

    let dto = UserCreate {
        email,
        name,
        role: input.role.unwrap_or(Role::Member),
        bu_code: input.bu_code,
        position: input.position.filter(|p| !p.trim().is_empty()),
        hire_date: input.hire_date,
    };
    let user = users::create_user(conn, dto).await?;
    info!(user_id = %user.id, role = ?user.role, "user created");
    Ok(user)
}
