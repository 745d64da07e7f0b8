//! External-work, remote-work, overtime and correction requests.

use sea_orm::{ConnectionTrait, TransactionTrait};
use serde::Deserialize;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use super::notifications::{notify, Notice};
use crate::domain::kst;
use crate::domain::permissions::{can_approve_request, can_view_all_attendance, can_view_team_attendance};
use crate::entities::enums::{ApprovalStatus, NotificationType, WorkRequestType};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::repos::users::{self as users_repo, User};
use crate::repos::work_requests::{self as work_requests_repo, WorkRequest, WorkRequestCreate};

const REQUIRED_FIELDS: &str = "필수 항목을 입력해주세요.";

async fn can_see_requests_of<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    caller: &User,
    requester_id: Uuid,
) -> Result<bool, AppError> {
    let actor = caller.actor();
    if requester_id == caller.id || can_view_all_attendance(&actor) {
        return Ok(true);
    }
    let requester = users_repo::require_user(conn, requester_id).await?;
    Ok(can_view_team_attendance(&actor, requester.bu_code))
}

pub async fn list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    caller: &User,
    requester_id: Option<Uuid>,
    status: Option<ApprovalStatus>,
) -> Result<Vec<WorkRequest>, AppError> {
    let requesters = match requester_id {
        Some(id) => {
            if !can_see_requests_of(conn, caller, id).await? {
                return Err(AppError::forbidden("Forbidden"));
            }
            Some(vec![id])
        }
        None if can_view_all_attendance(&caller.actor()) => None,
        None => Some(vec![caller.id]),
    };
    Ok(work_requests_repo::list_requests(conn, requesters, status).await?)
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateWorkRequest {
    pub request_type: Option<WorkRequestType>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub reason: Option<String>,
}

fn optional_hhmm(value: Option<String>) -> Result<Option<String>, AppError> {
    match value.filter(|s| !s.trim().is_empty()) {
        None => Ok(None),
        Some(s) => kst::parse_hhmm(&s)
            .map(|_| Some(s.trim().to_string()))
            .ok_or_else(|| {
                AppError::invalid_with(ErrorCode::InvalidTime, "시간은 HH:mm 형식이어야 합니다.")
            }),
    }
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    caller: &User,
    input: CreateWorkRequest,
) -> Result<WorkRequest, AppError> {
    let reason = input.reason.filter(|r| !r.trim().is_empty());
    let (Some(request_type), Some(start_date), Some(end_date), Some(reason)) =
        (input.request_type, input.start_date, input.end_date, reason)
    else {
        return Err(AppError::missing_fields(REQUIRED_FIELDS));
    };
    if end_date < start_date {
        return Err(AppError::invalid_with(
            ErrorCode::InvalidDate,
            "종료일은 시작일 이후여야 합니다.",
        ));
    }

    let request = work_requests_repo::create_request(
        conn,
        WorkRequestCreate {
            requester_id: caller.id,
            request_type,
            start_date,
            end_date,
            start_time: optional_hhmm(input.start_time)?,
            end_time: optional_hhmm(input.end_time)?,
            reason,
        },
    )
    .await?;
    Ok(request)
}

pub async fn get<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    caller: &User,
    id: i64,
) -> Result<WorkRequest, AppError> {
    let request = work_requests_repo::require_request(conn, id).await?;
    if !can_see_requests_of(conn, caller, request.requester_id).await? {
        return Err(AppError::forbidden("Forbidden"));
    }
    Ok(request)
}

/// Pending check, then the approver's BU check against the requester. The
/// row is locked, so call it on the transaction that saves the decision.
async fn load_for_decision<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    caller: &User,
    id: i64,
    denied: &str,
) -> Result<WorkRequest, AppError> {
    let request = work_requests_repo::lock_request(conn, id).await?;
    if request.status != ApprovalStatus::Pending {
        return Err(AppError::bad_request(
            ErrorCode::AlreadyProcessed,
            "이미 처리된 신청입니다.",
        ));
    }
    let requester = users_repo::require_user(conn, request.requester_id).await?;
    if !can_approve_request(&caller.actor(), requester.bu_code) {
        return Err(AppError::forbidden(denied));
    }
    Ok(request)
}

pub async fn approve<C>(conn: &C, caller: &User, id: i64) -> Result<WorkRequest, AppError>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync,
{
    let txn = conn.begin().await?;
    let mut request = load_for_decision(&txn, caller, id, "승인 권한이 없습니다.").await?;
    request.status = ApprovalStatus::Approved;
    request.approver_id = Some(caller.id);
    request.approved_at = Some(OffsetDateTime::now_utc());
    let request = work_requests_repo::save_request(&txn, request).await?;
    txn.commit().await?;

    let label = request.request_type.label();
    let notice = Notice::new(
        request.requester_id,
        format!("{label} 신청이 승인되었습니다"),
        format!("{} {label} 신청이 승인되었습니다.", kst::format_date(request.start_date)),
    )
    .kind(NotificationType::Success)
    .entity("work_request", request.id)
    .action_url("/attendance");
    notify(conn, notice).await;

    Ok(request)
}

#[derive(Debug, Default, Deserialize)]
pub struct RejectWorkRequest {
    pub rejection_reason: Option<String>,
}

pub async fn reject<C>(
    conn: &C,
    caller: &User,
    id: i64,
    input: RejectWorkRequest,
) -> Result<WorkRequest, AppError>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync,
{
    let reason = input
        .rejection_reason
        .filter(|r| !r.trim().is_empty())
        .ok_or_else(|| AppError::missing_fields("반려 사유를 입력해주세요."))?;

    let txn = conn.begin().await?;
    let mut request = load_for_decision(&txn, caller, id, "반려 권한이 없습니다.").await?;
    request.status = ApprovalStatus::Rejected;
    request.approver_id = Some(caller.id);
    request.approved_at = Some(OffsetDateTime::now_utc());
    request.rejection_reason = Some(reason.clone());
    let request = work_requests_repo::save_request(&txn, request).await?;
    txn.commit().await?;

    let label = request.request_type.label();
    let notice = Notice::new(
        request.requester_id,
        format!("{label} 신청이 반려되었습니다"),
        format!(
            "{} {label} 신청이 반려되었습니다. 사유: {reason}",
            kst::format_date(request.start_date)
        ),
    )
    .kind(NotificationType::Error)
    .entity("work_request", request.id)
    .action_url("/attendance");
    notify(conn, notice).await;

    Ok(request)
}
