use sea_orm::ConnectionTrait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::adapters::activity_logs_sea as activity_adapter;
use crate::entities::activity_logs;
use crate::errors::domain::DomainError;

pub use activity_adapter::ActivityCreate;

pub type ActivityLog = activity_logs::Model;

pub async fn create_activity<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: ActivityCreate,
) -> Result<ActivityLog, DomainError> {
    Ok(activity_adapter::create_activity(conn, dto).await?)
}

pub async fn list_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
    from: Option<OffsetDateTime>,
    to: Option<OffsetDateTime>,
    limit: u64,
) -> Result<Vec<ActivityLog>, DomainError> {
    Ok(activity_adapter::list_for_user(conn, user_id, from, to, limit).await?)
}
