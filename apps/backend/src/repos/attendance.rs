use sea_orm::ConnectionTrait;
use time::Date;
use uuid::Uuid;

use crate::adapters::attendance_sea as attendance_adapter;
use crate::entities::attendance_logs;
use crate::errors::domain::{DomainError, NotFoundKind};

pub use attendance_adapter::LogCreate;

pub type AttendanceLog = attendance_logs::Model;

pub async fn require_log<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<AttendanceLog, DomainError> {
    attendance_adapter::find_by_id(conn, id)
        .await?
        .ok_or_else(|| {
            DomainError::not_found(NotFoundKind::AttendanceLog, "Attendance log not found")
        })
}

/// Latest first.
pub async fn logs_on<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
    day: Date,
) -> Result<Vec<AttendanceLog>, DomainError> {
    Ok(attendance_adapter::for_user_on(conn, user_id, day).await?)
}

pub async fn list_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
    start: Option<Date>,
    end: Option<Date>,
) -> Result<Vec<AttendanceLog>, DomainError> {
    Ok(attendance_adapter::list_for_user(conn, user_id, start, end).await?)
}

pub async fn pending_auto_checkouts<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
    limit: u64,
) -> Result<Vec<AttendanceLog>, DomainError> {
    Ok(attendance_adapter::pending_auto_checkouts(conn, user_id, limit).await?)
}

pub async fn logs_between<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    start: Date,
    end: Date,
) -> Result<Vec<AttendanceLog>, DomainError> {
    Ok(attendance_adapter::between(conn, start, end).await?)
}

pub async fn auto_checkouts<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
    limit: u64,
) -> Result<Vec<AttendanceLog>, DomainError> {
    Ok(attendance_adapter::auto_checkouts(conn, user_id, limit).await?)
}

pub async fn open_on<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    day: Date,
) -> Result<Vec<AttendanceLog>, DomainError> {
    Ok(attendance_adapter::open_on(conn, day).await?)
}

pub async fn create_log<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: LogCreate,
) -> Result<AttendanceLog, DomainError> {
    Ok(attendance_adapter::create_log(conn, dto).await?)
}

pub async fn save_log<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    log: AttendanceLog,
) -> Result<AttendanceLog, DomainError> {
    Ok(attendance_adapter::save_log(conn, log).await?)
}

pub async fn delete_log<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<(), DomainError> {
    match attendance_adapter::delete_log(conn, id).await? {
        0 => Err(DomainError::not_found(
            NotFoundKind::AttendanceLog,
            "Attendance log not found",
        )),
        _ => Ok(()),
    }
}
