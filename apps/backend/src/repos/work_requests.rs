use sea_orm::ConnectionTrait;
use uuid::Uuid;

use crate::adapters::work_requests_sea as work_requests_adapter;
use crate::entities::enums::ApprovalStatus;
use crate::entities::work_requests;
use crate::errors::domain::{DomainError, NotFoundKind};

pub use work_requests_adapter::WorkRequestCreate;

pub type WorkRequest = work_requests::Model;

pub async fn require_request<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<WorkRequest, DomainError> {
    work_requests_adapter::find_by_id(conn, id)
        .await?
        .ok_or_else(|| DomainError::not_found(NotFoundKind::WorkRequest, "Work request not found"))
}

pub async fn lock_request<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<WorkRequest, DomainError> {
    work_requests_adapter::lock_by_id(conn, id)
        .await?
        .ok_or_else(|| DomainError::not_found(NotFoundKind::WorkRequest, "Work request not found"))
}

pub async fn list_requests<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    requesters: Option<Vec<Uuid>>,
    status: Option<ApprovalStatus>,
) -> Result<Vec<WorkRequest>, DomainError> {
    Ok(work_requests_adapter::list(conn, requesters, status).await?)
}

pub async fn create_request<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: WorkRequestCreate,
) -> Result<WorkRequest, DomainError> {
    Ok(work_requests_adapter::create_request(conn, dto).await?)
}

pub async fn save_request<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    request: WorkRequest,
) -> Result<WorkRequest, DomainError> {
    Ok(work_requests_adapter::save_request(conn, request).await?)
}
