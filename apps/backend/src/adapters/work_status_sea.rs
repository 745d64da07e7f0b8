//! SeaORM adapter for `user_work_status`.

use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::entities::enums::WorkStatus;
use crate::entities::user_work_status::{self, Column};

pub async fn find_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
) -> Result<Option<user_work_status::Model>, sea_orm::DbErr> {
    user_work_status::Entity::find_by_id(user_id).one(conn).await
}

pub async fn find_for_users<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_ids: &[Uuid],
) -> Result<Vec<user_work_status::Model>, sea_orm::DbErr> {
    if user_ids.is_empty() {
        return Ok(Vec::new());
    }
    user_work_status::Entity::find()
        .filter(Column::UserId.is_in(user_ids.iter().copied()))
        .all(conn)
        .await
}

/// Insert or overwrite the caller's row.
pub async fn upsert<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
    status: WorkStatus,
) -> Result<user_work_status::Model, sea_orm::DbErr> {
    let row = user_work_status::ActiveModel {
        user_id: Set(user_id),
        status: Set(status),
        updated_at: Set(OffsetDateTime::now_utc()),
    };
    user_work_status::Entity::insert(row)
        .on_conflict(
            OnConflict::column(Column::UserId)
                .update_columns([Column::Status, Column::UpdatedAt])
                .to_owned(),
        )
        .exec_with_returning(conn)
        .await
}
