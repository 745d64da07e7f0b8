//! SeaORM adapter for `attendance_logs`.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::entities::attendance_logs::{self, Column};
use crate::entities::enums::AttendanceStatus;

#[derive(Debug, Clone)]
pub struct LogCreate {
    pub user_id: Uuid,
    pub work_date: Date,
    pub check_in_at: Option<OffsetDateTime>,
    pub check_out_at: Option<OffsetDateTime>,
    pub status: AttendanceStatus,
    pub is_overtime: bool,
    pub modification_reason: Option<String>,
    pub modified_by: Option<Uuid>,
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<attendance_logs::Model>, sea_orm::DbErr> {
    attendance_logs::Entity::find_by_id(id).one(conn).await
}

/// Every log of `user_id` on `day`, latest first.
pub async fn for_user_on<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
    day: Date,
) -> Result<Vec<attendance_logs::Model>, sea_orm::DbErr> {
    attendance_logs::Entity::find()
        .filter(Column::UserId.eq(user_id))
        .filter(Column::WorkDate.eq(day))
        .order_by_desc(Column::CreatedAt)
        .order_by_desc(Column::Id)
        .all(conn)
        .await
}

pub async fn list_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
    start: Option<Date>,
    end: Option<Date>,
) -> Result<Vec<attendance_logs::Model>, sea_orm::DbErr> {
    let mut query = attendance_logs::Entity::find().filter(Column::UserId.eq(user_id));
    if let Some(start) = start {
        query = query.filter(Column::WorkDate.gte(start));
    }
    if let Some(end) = end {
        query = query.filter(Column::WorkDate.lte(end));
    }
    query
        .order_by_desc(Column::WorkDate)
        .order_by_desc(Column::CreatedAt)
        .all(conn)
        .await
}

/// Auto-checked-out logs the owner has not confirmed yet.
pub async fn pending_auto_checkouts<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
    limit: u64,
) -> Result<Vec<attendance_logs::Model>, sea_orm::DbErr> {
    attendance_logs::Entity::find()
        .filter(Column::UserId.eq(user_id))
        .filter(Column::IsAutoCheckout.eq(true))
        .filter(Column::UserConfirmed.eq(false))
        .order_by_desc(Column::WorkDate)
        .limit(limit)
        .all(conn)
        .await
}

/// Every user's logs between `start` and `end` inclusive.
pub async fn between<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    start: Date,
    end: Date,
) -> Result<Vec<attendance_logs::Model>, sea_orm::DbErr> {
    attendance_logs::Entity::find()
        .filter(Column::WorkDate.gte(start))
        .filter(Column::WorkDate.lte(end))
        .order_by_asc(Column::WorkDate)
        .order_by_asc(Column::Id)
        .all(conn)
        .await
}

/// Auto-checked-out logs of `user_id`, confirmed or not.
pub async fn auto_checkouts<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
    limit: u64,
) -> Result<Vec<attendance_logs::Model>, sea_orm::DbErr> {
    attendance_logs::Entity::find()
        .filter(Column::UserId.eq(user_id))
        .filter(Column::IsAutoCheckout.eq(true))
        .order_by_desc(Column::WorkDate)
        .limit(limit)
        .all(conn)
        .await
}

/// Logs on `day` with a check-in and no check-out.
pub async fn open_on<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    day: Date,
) -> Result<Vec<attendance_logs::Model>, sea_orm::DbErr> {
    attendance_logs::Entity::find()
        .filter(Column::WorkDate.eq(day))
        .filter(Column::CheckInAt.is_not_null())
        .filter(Column::CheckOutAt.is_null())
        .order_by_asc(Column::Id)
        .all(conn)
        .await
}

pub async fn create_log<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: LogCreate,
) -> Result<attendance_logs::Model, sea_orm::DbErr> {
    let now = OffsetDateTime::now_utc();
    attendance_logs::ActiveModel {
        user_id: Set(dto.user_id),
        work_date: Set(dto.work_date),
        check_in_at: Set(dto.check_in_at),
        check_out_at: Set(dto.check_out_at),
        status: Set(dto.status),
        is_overtime: Set(dto.is_overtime),
        is_auto_checkout: Set(false),
        is_modified: Set(dto.modification_reason.is_some()),
        user_confirmed: Set(false),
        modification_reason: Set(dto.modification_reason),
        modified_by: Set(dto.modified_by),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(conn)
    .await
}

pub async fn save_log<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    log: attendance_logs::Model,
) -> Result<attendance_logs::Model, sea_orm::DbErr> {
    let mut active: attendance_logs::ActiveModel = log.into();
    active = active.reset_all();
    active.updated_at = Set(OffsetDateTime::now_utc());
    active.update(conn).await
}

pub async fn delete_log<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let res = attendance_logs::Entity::delete_by_id(id).exec(conn).await?;
    Ok(res.rows_affected)
}
