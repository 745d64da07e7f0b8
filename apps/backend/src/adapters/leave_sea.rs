//! SeaORM adapter for leave balances, grants, requests and compensatory
//! requests.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::entities::enums::{ApprovalStatus, LeaveGrantType, LeaveRequestType, LeaveType};
use crate::entities::{compensatory_requests, leave_balances, leave_grants, leave_requests};

// ---------------------------------------------------------------------------
// Balances
// ---------------------------------------------------------------------------

pub async fn find_balance<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
    leave_type: LeaveType,
    year: i32,
) -> Result<Option<leave_balances::Model>, sea_orm::DbErr> {
    leave_balances::Entity::find()
        .filter(leave_balances::Column::UserId.eq(user_id))
        .filter(leave_balances::Column::LeaveType.eq(leave_type))
        .filter(leave_balances::Column::Year.eq(year))
        .one(conn)
        .await
}

pub async fn balances_for<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
    year: i32,
) -> Result<Vec<leave_balances::Model>, sea_orm::DbErr> {
    leave_balances::Entity::find()
        .filter(leave_balances::Column::UserId.eq(user_id))
        .filter(leave_balances::Column::Year.eq(year))
        .order_by_asc(leave_balances::Column::LeaveType)
        .all(conn)
        .await
}

pub async fn balances_of_users<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_ids: &[Uuid],
    year: i32,
) -> Result<Vec<leave_balances::Model>, sea_orm::DbErr> {
    if user_ids.is_empty() {
        return Ok(Vec::new());
    }
    leave_balances::Entity::find()
        .filter(leave_balances::Column::UserId.is_in(user_ids.iter().copied()))
        .filter(leave_balances::Column::Year.eq(year))
        .all(conn)
        .await
}

/// Add `total_delta` / `used_delta` to the (user, type, year) balance,
/// creating it at zero first when missing.
pub async fn adjust_balance<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
    leave_type: LeaveType,
    year: i32,
    total_delta: f64,
    used_delta: f64,
) -> Result<leave_balances::Model, sea_orm::DbErr> {
    let now = OffsetDateTime::now_utc();
    match find_balance(conn, user_id, leave_type, year).await? {
        Some(existing) => {
            let total = existing.total_days + total_delta;
            let used = existing.used_days + used_delta;
            let mut active: leave_balances::ActiveModel = existing.into();
            active.total_days = Set(total);
            active.used_days = Set(used);
            active.updated_at = Set(now);
            active.update(conn).await
        }
        None => {
            leave_balances::ActiveModel {
                user_id: Set(user_id),
                leave_type: Set(leave_type),
                year: Set(year),
                total_days: Set(total_delta),
                used_days: Set(used_delta),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(conn)
            .await
        }
    }
}

// ---------------------------------------------------------------------------
// Grants
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct GrantCreate {
    pub user_id: Uuid,
    pub leave_type: LeaveType,
    pub grant_type: LeaveGrantType,
    pub days: f64,
    pub reason: Option<String>,
    pub granted_by: Option<Uuid>,
    pub year: i32,
}

pub async fn create_grant<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GrantCreate,
) -> Result<leave_grants::Model, sea_orm::DbErr> {
    leave_grants::ActiveModel {
        user_id: Set(dto.user_id),
        leave_type: Set(dto.leave_type),
        grant_type: Set(dto.grant_type),
        days: Set(dto.days),
        reason: Set(dto.reason),
        granted_by: Set(dto.granted_by),
        granted_at: Set(OffsetDateTime::now_utc()),
        year: Set(dto.year),
        ..Default::default()
    }
    .insert(conn)
    .await
}

pub async fn grants_for<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
    year: Option<i32>,
) -> Result<Vec<leave_grants::Model>, sea_orm::DbErr> {
    let mut query = leave_grants::Entity::find().filter(leave_grants::Column::UserId.eq(user_id));
    if let Some(year) = year {
        query = query.filter(leave_grants::Column::Year.eq(year));
    }
    query
        .order_by_desc(leave_grants::Column::GrantedAt)
        .all(conn)
        .await
}

pub async fn grant_exists_since<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
    grant_type: LeaveGrantType,
    since: OffsetDateTime,
) -> Result<bool, sea_orm::DbErr> {
    let found = leave_grants::Entity::find()
        .filter(leave_grants::Column::UserId.eq(user_id))
        .filter(leave_grants::Column::GrantType.eq(grant_type))
        .filter(leave_grants::Column::GrantedAt.gte(since))
        .one(conn)
        .await?;
    Ok(found.is_some())
}

pub async fn grant_exists_for_year<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
    grant_type: LeaveGrantType,
    year: i32,
) -> Result<bool, sea_orm::DbErr> {
    let found = leave_grants::Entity::find()
        .filter(leave_grants::Column::UserId.eq(user_id))
        .filter(leave_grants::Column::GrantType.eq(grant_type))
        .filter(leave_grants::Column::Year.eq(year))
        .one(conn)
        .await?;
    Ok(found.is_some())
}

// ---------------------------------------------------------------------------
// Leave requests
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct LeaveRequestCreate {
    pub requester_id: Uuid,
    pub leave_type: LeaveRequestType,
    pub start_date: Date,
    pub end_date: Date,
    pub days_used: f64,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct LeaveRequestFilter {
    /// `None` lists every requester.
    pub requesters: Option<Vec<Uuid>>,
    pub status: Option<ApprovalStatus>,
    pub start_from: Option<Date>,
    pub start_to: Option<Date>,
    pub end_to: Option<Date>,
}

pub async fn find_request<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<leave_requests::Model>, sea_orm::DbErr> {
    leave_requests::Entity::find_by_id(id).one(conn).await
}

/// `SELECT .. FOR UPDATE`; holds the row until the surrounding transaction ends.
pub async fn lock_request<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<leave_requests::Model>, sea_orm::DbErr> {
    leave_requests::Entity::find_by_id(id)
        .lock_exclusive()
        .one(conn)
        .await
}

pub async fn list_requests<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    filter: LeaveRequestFilter,
    newest_first: bool,
) -> Result<Vec<leave_requests::Model>, sea_orm::DbErr> {
    use leave_requests::Column;

    let mut query = leave_requests::Entity::find();
    if let Some(ids) = filter.requesters {
        query = query.filter(Column::RequesterId.is_in(ids));
    }
    if let Some(status) = filter.status {
        query = query.filter(Column::Status.eq(status));
    }
    if let Some(d) = filter.start_from {
        query = query.filter(Column::StartDate.gte(d));
    }
    if let Some(d) = filter.start_to {
        query = query.filter(Column::StartDate.lte(d));
    }
    if let Some(d) = filter.end_to {
        query = query.filter(Column::EndDate.lte(d));
    }
    let query = if newest_first {
        query.order_by_desc(Column::CreatedAt)
    } else {
        query.order_by_asc(Column::CreatedAt)
    };
    query.all(conn).await
}

pub async fn create_request<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: LeaveRequestCreate,
) -> Result<leave_requests::Model, sea_orm::DbErr> {
    let now = OffsetDateTime::now_utc();
    leave_requests::ActiveModel {
        requester_id: Set(dto.requester_id),
        leave_type: Set(dto.leave_type),
        start_date: Set(dto.start_date),
        end_date: Set(dto.end_date),
        days_used: Set(dto.days_used),
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
    request: leave_requests::Model,
) -> Result<leave_requests::Model, sea_orm::DbErr> {
    let mut active: leave_requests::ActiveModel = request.into();
    active = active.reset_all();
    active.updated_at = Set(OffsetDateTime::now_utc());
    active.update(conn).await
}

pub async fn delete_request<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let res = leave_requests::Entity::delete_by_id(id).exec(conn).await?;
    Ok(res.rows_affected)
}

// ---------------------------------------------------------------------------
// Compensatory requests
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct CompensatoryCreate {
    pub requester_id: Uuid,
    pub days: f64,
    pub reason: String,
    pub work_date: Option<Date>,
}

pub async fn find_compensatory<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<compensatory_requests::Model>, sea_orm::DbErr> {
    compensatory_requests::Entity::find_by_id(id).one(conn).await
}

pub async fn lock_compensatory<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<compensatory_requests::Model>, sea_orm::DbErr> {
    compensatory_requests::Entity::find_by_id(id)
        .lock_exclusive()
        .one(conn)
        .await
}

pub async fn list_compensatory<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    requester: Option<Uuid>,
    status: Option<ApprovalStatus>,
    newest_first: bool,
) -> Result<Vec<compensatory_requests::Model>, sea_orm::DbErr> {
    use compensatory_requests::Column;

    let mut query = compensatory_requests::Entity::find();
    if let Some(id) = requester {
        query = query.filter(Column::RequesterId.eq(id));
    }
    if let Some(status) = status {
        query = query.filter(Column::Status.eq(status));
    }
    let query = if newest_first {
        query.order_by_desc(Column::CreatedAt)
    } else {
        query.order_by_asc(Column::CreatedAt)
    };
    query.all(conn).await
}

pub async fn create_compensatory<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: CompensatoryCreate,
) -> Result<compensatory_requests::Model, sea_orm::DbErr> {
    let now = OffsetDateTime::now_utc();
    compensatory_requests::ActiveModel {
        requester_id: Set(dto.requester_id),
        days: Set(dto.days),
        reason: Set(dto.reason),
        work_date: Set(dto.work_date),
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

pub async fn save_compensatory<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    request: compensatory_requests::Model,
) -> Result<compensatory_requests::Model, sea_orm::DbErr> {
    let mut active: compensatory_requests::ActiveModel = request.into();
    active = active.reset_all();
    active.updated_at = Set(OffsetDateTime::now_utc());
    active.update(conn).await
}
