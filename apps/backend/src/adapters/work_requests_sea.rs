//! SeaORM adapter for `work_requests`.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::entities::enums::{ApprovalStatus, WorkRequestType};
use crate::entities::work_requests::{self, Column};

#[derive(Debug, Clone)]
pub struct WorkRequestCreate {
    pub requester_id: Uuid,
    pub request_type: WorkRequestType,
    pub start_date: Date,
    pub end_date: Date,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub reason: String,
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<work_requests::Model>, sea_orm::DbErr> {
    work_requests::Entity::find_by_id(id).one(conn).await
}

/// Row-locked read for the approve/reject path.
pub async fn lock_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<work_requests::Model>, sea_orm::DbErr> {
    work_requests::Entity::find_by_id(id)
        .lock_exclusive()
        .one(conn)
        .await
}

/// `requesters = None` lists everyone's requests.
pub async fn list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    requesters: Option<Vec<Uuid>>,
    status: Option<ApprovalStatus>,
) -> Result<Vec<work_requests::Model>, sea_orm::DbErr> {
    let mut query = work_requests::Entity::find();
    if let Some(ids) = requesters {
        query = query.filter(Column::RequesterId.is_in(ids));
    }
    if let Some(status) = status {
        query = query.filter(Column::Status.eq(status));
    }
    query.order_by_desc(Column::CreatedAt).all(conn).await
}

pub async fn create_request<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: WorkRequestCreate,
) -> Result<work_requests::Model, sea_orm::DbErr> {
    let now = OffsetDateTime::now_utc();
    work_requests::ActiveModel {
        requester_id: Set(dto.requester_id),
        request_type: Set(dto.request_type),
        start_date: Set(dto.start_date),
        end_date: Set(dto.end_date),
        start_time: Set(dto.start_time),
        end_time: Set(dto.end_time),
        reason: Set(dto.reason),
        status: Set(ApprovalStatus::Pending),
        approver_id: Set(None),
        approved_at: Set(None),
        rejection_reason: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(conn)
    .await
}

pub async fn save_request<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    request: work_requests::Model,
) -> Result<work_requests::Model, sea_orm::DbErr> {
    let mut active: work_requests::ActiveModel = request.into();
    active = active.reset_all();
    active.updated_at = Set(OffsetDateTime::now_utc());
    active.update(conn).await
}
