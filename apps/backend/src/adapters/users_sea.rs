//! SeaORM adapter for `app_users` - generic over ConnectionTrait.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::entities::app_users;
use crate::entities::enums::{BuCode, Role};

// Adapter functions return DbErr; the repos layer maps to DomainError.

#[derive(Debug, Clone)]
pub struct UserCreate {
    pub email: String,
    pub name: String,
    pub role: Role,
    pub bu_code: Option<BuCode>,
    pub position: Option<String>,
    pub hire_date: Option<Date>,
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
) -> Result<Option<app_users::Model>, sea_orm::DbErr> {
    app_users::Entity::find_by_id(id).one(conn).await
}

pub async fn find_by_email<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: &str,
) -> Result<Option<app_users::Model>, sea_orm::DbErr> {
    app_users::Entity::find()
        .filter(app_users::Column::Email.eq(email))
        .one(conn)
        .await
}

pub async fn list_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<app_users::Model>, sea_orm::DbErr> {
    app_users::Entity::find()
        .order_by_desc(app_users::Column::CreatedAt)
        .all(conn)
        .await
}

/// Everyone except artists, grouped by business unit then name.
pub async fn list_staff<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    bu: Option<BuCode>,
) -> Result<Vec<app_users::Model>, sea_orm::DbErr> {
    let mut query = app_users::Entity::find().filter(app_users::Column::Role.ne(Role::Artist));
    if let Some(bu) = bu {
        query = query.filter(app_users::Column::BuCode.eq(bu));
    }
    query
        .order_by_asc(app_users::Column::BuCode)
        .order_by_asc(app_users::Column::Name)
        .all(conn)
        .await
}

pub async fn list_by_roles<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    roles: &[Role],
) -> Result<Vec<app_users::Model>, sea_orm::DbErr> {
    app_users::Entity::find()
        .filter(app_users::Column::Role.is_in(roles.iter().copied()))
        .all(conn)
        .await
}

pub async fn list_with_hire_date<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<app_users::Model>, sea_orm::DbErr> {
    app_users::Entity::find()
        .filter(app_users::Column::HireDate.is_not_null())
        .order_by_asc(app_users::Column::HireDate)
        .all(conn)
        .await
}

pub async fn ids_in_bu<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    bu: BuCode,
) -> Result<Vec<Uuid>, sea_orm::DbErr> {
    let users = app_users::Entity::find()
        .filter(app_users::Column::BuCode.eq(bu))
        .all(conn)
        .await?;
    Ok(users.into_iter().map(|u| u.id).collect())
}

pub async fn create_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: UserCreate,
) -> Result<app_users::Model, sea_orm::DbErr> {
    let now = OffsetDateTime::now_utc();
    app_users::ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set(dto.email),
        name: Set(dto.name),
        role: Set(dto.role),
        bu_code: Set(dto.bu_code),
        position: Set(dto.position),
        hire_date: Set(dto.hire_date),
        auth_sub: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(conn)
    .await
}

pub async fn bind_auth_sub<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user: app_users::Model,
    auth_sub: &str,
) -> Result<app_users::Model, sea_orm::DbErr> {
    let mut active: app_users::ActiveModel = user.into();
    active.auth_sub = Set(Some(auth_sub.to_string()));
    active.updated_at = Set(OffsetDateTime::now_utc());
    active.update(conn).await
}
