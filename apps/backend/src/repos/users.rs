//! User repository functions for the domain layer (generic over
//! ConnectionTrait).

use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::Date;
use uuid::Uuid;

use crate::adapters::users_sea as users_adapter;
use crate::domain::permissions::Actor;
use crate::entities::app_users;
use crate::entities::enums::{BuCode, Role};
use crate::errors::domain::{DomainError, NotFoundKind};

pub use users_adapter::UserCreate;

/// Profile exposed through the API. The identity-provider subject stays
/// server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub bu_code: Option<BuCode>,
    pub position: Option<String>,
    pub hire_date: Option<Date>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: time::OffsetDateTime,
}

impl User {
    pub fn actor(&self) -> Actor {
        Actor {
            id: self.id,
            role: self.role,
            bu_code: self.bu_code,
        }
    }
}

pub async fn find_user_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
) -> Result<Option<User>, DomainError> {
    let user = users_adapter::find_by_id(conn, user_id).await?;
    Ok(user.map(User::from))
}

pub async fn require_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
) -> Result<User, DomainError> {
    find_user_by_id(conn, user_id)
        .await?
        .ok_or_else(|| DomainError::not_found(NotFoundKind::User, "User not found"))
}

/// Raw row including `auth_sub`; only the login flow needs it.
pub async fn find_account_by_email<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: &str,
) -> Result<Option<app_users::Model>, DomainError> {
    Ok(users_adapter::find_by_email(conn, email).await?)
}

pub async fn bind_auth_sub<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    account: app_users::Model,
    auth_sub: &str,
) -> Result<User, DomainError> {
    let user = users_adapter::bind_auth_sub(conn, account, auth_sub).await?;
    Ok(User::from(user))
}

pub async fn list_users<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<User>, DomainError> {
    let users = users_adapter::list_all(conn).await?;
    Ok(users.into_iter().map(User::from).collect())
}

/// Non-artist users, optionally limited to one business unit.
pub async fn list_staff<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    bu: Option<BuCode>,
) -> Result<Vec<User>, DomainError> {
    let users = users_adapter::list_staff(conn, bu).await?;
    Ok(users.into_iter().map(User::from).collect())
}

/// Admins and leaders; recipients of new leave requests.
pub async fn list_approvers<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<User>, DomainError> {
    let users = users_adapter::list_by_roles(conn, &[Role::Admin, Role::Leader]).await?;
    Ok(users.into_iter().map(User::from).collect())
}

pub async fn list_with_hire_date<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<User>, DomainError> {
    let users = users_adapter::list_with_hire_date(conn).await?;
    Ok(users.into_iter().map(User::from).collect())
}

pub async fn ids_in_bu<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    bu: BuCode,
) -> Result<Vec<Uuid>, DomainError> {
    Ok(users_adapter::ids_in_bu(conn, bu).await?)
}

pub async fn create_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: UserCreate,
) -> Result<User, DomainError> {
    let user = users_adapter::create_user(conn, dto).await?;
    Ok(User::from(user))
}

impl From<app_users::Model> for User {
    fn from(model: app_users::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            name: model.name,
            role: model.role,
            bu_code: model.bu_code,
            position: model.position,
            hire_date: model.hire_date,
            created_at: model.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use time::macros::{date, datetime};

    use super::*;

    #[test]
    fn profile_drops_auth_subject() {
        let model = app_users::Model {
            id: Uuid::nil(),
            email: "kim@grigo.test".into(),
            name: "김그리고".into(),
            role: Role::Leader,
            bu_code: Some(BuCode::Flow),
            position: Some("팀장".into()),
            hire_date: Some(date!(2023 - 04 - 01)),
            auth_sub: Some("idp|123".into()),
            created_at: datetime!(2023-04-01 00:00 UTC),
            updated_at: datetime!(2023-04-01 00:00 UTC),
        };
        let user = User::from(model);
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("auth_sub").is_none());
        assert_eq!(json["bu_code"], "FLOW");
        assert_eq!(json["hire_date"], "2023-04-01");
        assert_eq!(user.actor().role, Role::Leader);
    }
}
