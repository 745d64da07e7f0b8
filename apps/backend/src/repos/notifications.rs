use sea_orm::ConnectionTrait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::adapters::notifications_sea as notifications_adapter;
use crate::entities::notifications;
use crate::errors::domain::{DomainError, NotFoundKind};

pub use notifications_adapter::NotificationCreate;

pub type Notification = notifications::Model;

fn not_found() -> DomainError {
    DomainError::not_found(NotFoundKind::Notification, "Notification not found")
}

pub async fn require_owned<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    user_id: Uuid,
) -> Result<Notification, DomainError> {
    notifications_adapter::find_owned(conn, id, user_id)
        .await?
        .ok_or_else(not_found)
}

pub async fn page_for<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
    unread_only: bool,
    limit: u64,
    offset: u64,
) -> Result<Vec<Notification>, DomainError> {
    Ok(notifications_adapter::page_for(conn, user_id, unread_only, limit, offset).await?)
}

pub async fn count_for<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
    unread_only: bool,
) -> Result<u64, DomainError> {
    Ok(notifications_adapter::count_for(conn, user_id, unread_only).await?)
}

pub async fn sent_since<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
    title: &str,
    since: OffsetDateTime,
) -> Result<bool, DomainError> {
    Ok(notifications_adapter::sent_since(conn, user_id, title, since).await?)
}

pub async fn create_notification<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: NotificationCreate,
) -> Result<Notification, DomainError> {
    Ok(notifications_adapter::create_notification(conn, dto).await?)
}

pub async fn set_read<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    notification: Notification,
    read: bool,
) -> Result<Notification, DomainError> {
    Ok(notifications_adapter::set_read(conn, notification, read).await?)
}

pub async fn mark_all_read<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
) -> Result<u64, DomainError> {
    Ok(notifications_adapter::mark_all_read(conn, user_id).await?)
}

pub async fn delete_owned<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    user_id: Uuid,
) -> Result<(), DomainError> {
    match notifications_adapter::delete_owned(conn, id, user_id).await? {
        0 => Err(not_found()),
        _ => Ok(()),
    }
}
