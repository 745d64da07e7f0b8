//! Leave repository: balances, the grant ledger, leave and compensatory
//! requests.

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::adapters::leave_sea as leave_adapter;
use crate::entities::enums::{ApprovalStatus, LeaveGrantType, LeaveType};
use crate::entities::{compensatory_requests, leave_balances, leave_grants, leave_requests};
use crate::errors::domain::{DomainError, NotFoundKind};

pub use leave_adapter::{CompensatoryCreate, GrantCreate, LeaveRequestCreate, LeaveRequestFilter};

pub type LeaveBalance = leave_balances::Model;
pub type LeaveGrant = leave_grants::Model;
pub type LeaveRequest = leave_requests::Model;
pub type CompensatoryRequest = compensatory_requests::Model;

pub async fn find_balance<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
    leave_type: LeaveType,
    year: i32,
) -> Result<Option<LeaveBalance>, DomainError> {
    Ok(leave_adapter::find_balance(conn, user_id, leave_type, year).await?)
}

pub async fn balances_for<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
    year: i32,
) -> Result<Vec<LeaveBalance>, DomainError> {
    Ok(leave_adapter::balances_for(conn, user_id, year).await?)
}

pub async fn balances_of_users<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_ids: &[Uuid],
    year: i32,
) -> Result<Vec<LeaveBalance>, DomainError> {
    Ok(leave_adapter::balances_of_users(conn, user_ids, year).await?)
}

pub async fn add_granted_days<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
    leave_type: LeaveType,
    year: i32,
    days: f64,
) -> Result<LeaveBalance, DomainError> {
    Ok(leave_adapter::adjust_balance(conn, user_id, leave_type, year, days, 0.0).await?)
}

pub async fn add_used_days<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
    leave_type: LeaveType,
    year: i32,
    days: f64,
) -> Result<LeaveBalance, DomainError> {
    Ok(leave_adapter::adjust_balance(conn, user_id, leave_type, year, 0.0, days).await?)
}

/// Ledger entry plus the matching balance increase.
pub async fn grant_days<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GrantCreate,
) -> Result<LeaveGrant, DomainError> {
    let (user_id, leave_type, year, days) = (dto.user_id, dto.leave_type, dto.year, dto.days);
    let grant = leave_adapter::create_grant(conn, dto).await?;
    leave_adapter::adjust_balance(conn, user_id, leave_type, year, days, 0.0).await?;
    Ok(grant)
}

pub async fn grants_for<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
    year: Option<i32>,
) -> Result<Vec<LeaveGrant>, DomainError> {
    Ok(leave_adapter::grants_for(conn, user_id, year).await?)
}

pub async fn grant_exists_since<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
    grant_type: LeaveGrantType,
    since: OffsetDateTime,
) -> Result<bool, DomainError> {
    Ok(leave_adapter::grant_exists_since(conn, user_id, grant_type, since).await?)
}

pub async fn grant_exists_for_year<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
    grant_type: LeaveGrantType,
    year: i32,
) -> Result<bool, DomainError> {
    Ok(leave_adapter::grant_exists_for_year(conn, user_id, grant_type, year).await?)
}

pub async fn require_request<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<LeaveRequest, DomainError> {
    leave_adapter::find_request(conn, id).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::LeaveRequest, "휴가 신청을 찾을 수 없습니다.")
    })
}

/// As [`require_request`], but row-locked for a status transition.
pub async fn lock_request<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<LeaveRequest, DomainError> {
    leave_adapter::lock_request(conn, id).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::LeaveRequest, "휴가 신청을 찾을 수 없습니다.")
    })
}

pub async fn list_requests<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    filter: LeaveRequestFilter,
    newest_first: bool,
) -> Result<Vec<LeaveRequest>, DomainError> {
    Ok(leave_adapter::list_requests(conn, filter, newest_first).await?)
}

pub async fn create_request<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: LeaveRequestCreate,
) -> Result<LeaveRequest, DomainError> {
    Ok(leave_adapter::create_request(conn, dto).await?)
}

pub async fn save_request<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    request: LeaveRequest,
) -> Result<LeaveRequest, DomainError> {
    Ok(leave_adapter::save_request(conn, request).await?)
}

pub async fn delete_request<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<(), DomainError> {
    leave_adapter::delete_request(conn, id).await?;
    Ok(())
}

pub async fn require_compensatory<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<CompensatoryRequest, DomainError> {
    leave_adapter::find_compensatory(conn, id).await?.ok_or_else(|| {
        DomainError::not_found(
            NotFoundKind::CompensatoryRequest,
            "대체휴무 신청을 찾을 수 없습니다.",
        )
    })
}

pub async fn lock_compensatory<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<CompensatoryRequest, DomainError> {
    leave_adapter::lock_compensatory(conn, id).await?.ok_or_else(|| {
        DomainError::not_found(
            NotFoundKind::CompensatoryRequest,
            "대체휴무 신청을 찾을 수 없습니다.",
        )
    })
}

pub async fn list_compensatory<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    requester: Option<Uuid>,
    status: Option<ApprovalStatus>,
    newest_first: bool,
) -> Result<Vec<CompensatoryRequest>, DomainError> {
    Ok(leave_adapter::list_compensatory(conn, requester, status, newest_first).await?)
}

pub async fn create_compensatory<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: CompensatoryCreate,
) -> Result<CompensatoryRequest, DomainError> {
    Ok(leave_adapter::create_compensatory(conn, dto).await?)
}

pub async fn save_compensatory<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    request: CompensatoryRequest,
) -> Result<CompensatoryRequest, DomainError> {
    Ok(leave_adapter::save_compensatory(conn, request).await?)
}
