use std::collections::HashMap;

use sea_orm::ConnectionTrait;
use uuid::Uuid;

use crate::adapters::work_status_sea as work_status_adapter;
use crate::entities::enums::WorkStatus;
use crate::entities::user_work_status;
use crate::errors::domain::DomainError;

pub type UserWorkStatus = user_work_status::Model;

pub async fn find_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
) -> Result<Option<UserWorkStatus>, DomainError> {
    Ok(work_status_adapter::find_for_user(conn, user_id).await?)
}

/// Status by user; users without a row are absent from the map.
pub async fn statuses_of<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_ids: &[Uuid],
) -> Result<HashMap<Uuid, WorkStatus>, DomainError> {
    let rows = work_status_adapter::find_for_users(conn, user_ids).await?;
    Ok(rows.into_iter().map(|r| (r.user_id, r.status)).collect())
}

pub async fn set_status<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
    status: WorkStatus,
) -> Result<UserWorkStatus, DomainError> {
    Ok(work_status_adapter::upsert(conn, user_id, status).await?)
}
