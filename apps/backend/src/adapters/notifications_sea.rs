//! SeaORM adapter for `notifications`.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::entities::enums::NotificationType;
use crate::entities::notifications::{self, Column};

#[derive(Debug, Clone)]
pub struct NotificationCreate {
    pub user_id: Uuid,
    pub title: String,
    pub message: String,
    pub kind: NotificationType,
    pub entity_type: Option<String>,
    pub entity_id: Option<String>,
    pub action_url: Option<String>,
}

pub async fn find_owned<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    user_id: Uuid,
) -> Result<Option<notifications::Model>, sea_orm::DbErr> {
    notifications::Entity::find_by_id(id)
        .filter(Column::UserId.eq(user_id))
        .one(conn)
        .await
}

pub async fn page_for<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
    unread_only: bool,
    limit: u64,
    offset: u64,
) -> Result<Vec<notifications::Model>, sea_orm::DbErr> {
    let mut query = notifications::Entity::find().filter(Column::UserId.eq(user_id));
    if unread_only {
        query = query.filter(Column::Read.eq(false));
    }
    query
        .order_by_desc(Column::CreatedAt)
        .offset(offset)
        .limit(limit)
        .all(conn)
        .await
}

pub async fn count_for<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
    unread_only: bool,
) -> Result<u64, sea_orm::DbErr> {
    let mut query = notifications::Entity::find().filter(Column::UserId.eq(user_id));
    if unread_only {
        query = query.filter(Column::Read.eq(false));
    }
    query.count(conn).await
}

/// Whether `user_id` already received a notification titled `title` since
/// `since`.
pub async fn sent_since<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
    title: &str,
    since: OffsetDateTime,
) -> Result<bool, sea_orm::DbErr> {
    let found = notifications::Entity::find()
        .filter(Column::UserId.eq(user_id))
        .filter(Column::Title.eq(title))
        .filter(Column::CreatedAt.gte(since))
        .one(conn)
        .await?;
    Ok(found.is_some())
}

pub async fn create_notification<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: NotificationCreate,
) -> Result<notifications::Model, sea_orm::DbErr> {
    notifications::ActiveModel {
        user_id: Set(dto.user_id),
        title: Set(dto.title),
        message: Set(dto.message),
        kind: Set(dto.kind),
        entity_type: Set(dto.entity_type),
        entity_id: Set(dto.entity_id),
        action_url: Set(dto.action_url),
        read: Set(false),
        created_at: Set(OffsetDateTime::now_utc()),
        ..Default::default()
    }
    .insert(conn)
    .await
}

pub async fn set_read<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    notification: notifications::Model,
    read: bool,
) -> Result<notifications::Model, sea_orm::DbErr> {
    let mut active: notifications::ActiveModel = notification.into();
    active.read = Set(read);
    active.update(conn).await
}

pub async fn mark_all_read<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
) -> Result<u64, sea_orm::DbErr> {
    let res = notifications::Entity::update_many()
        .col_expr(Column::Read, Expr::value(true))
        .filter(Column::UserId.eq(user_id))
        .filter(Column::Read.eq(false))
        .exec(conn)
        .await?;
    Ok(res.rows_affected)
}

pub async fn delete_owned<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    user_id: Uuid,
) -> Result<u64, sea_orm::DbErr> {
    let res = notifications::Entity::delete_many()
        .filter(Column::Id.eq(id))
        .filter(Column::UserId.eq(user_id))
        .exec(conn)
        .await?;
    Ok(res.rows_affected)
}
