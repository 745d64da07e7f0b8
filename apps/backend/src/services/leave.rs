//! Leave requests, balances, the grant ledger, compensatory leave and the
//! accrual crons.

use std::collections::HashMap;

use sea_orm::{ActiveEnum, ConnectionTrait, TransactionTrait};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use time::{Date, Month, OffsetDateTime};
use tracing::{info, warn};
use uuid::Uuid;

use super::activity::{self, action, entity, Activity};
use super::notifications::{kst_day_start, notify, Notice};
use crate::domain::kst;
use crate::domain::leave_calc::{
    balance_type_for, days_used, full_years_between, grant_log_label, monthly_grant_ordinal,
    request_type_label, weekdays_in_range,
};
use crate::domain::permissions::{
    can_access_leave_admin, can_adjust_annual_leave, can_approve_compensatory_request,
    can_approve_leave_request, Actor,
};
use crate::entities::enums::{
    ApprovalStatus, AttendanceStatus, BuCode, LeaveGrantType, LeaveRequestType, LeaveType,
    NotificationType, Role,
};
use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::errors::ErrorCode;
use crate::repos::attendance::{self as attendance_repo, LogCreate};
use crate::repos::leave::{
    self as leave_repo, CompensatoryCreate, CompensatoryRequest, GrantCreate, LeaveBalance,
    LeaveGrant, LeaveRequest, LeaveRequestCreate, LeaveRequestFilter,
};
use crate::repos::users::{self as users_repo, User};

const REQUIRED_FIELDS: &str = "필수 항목을 입력해주세요.";
const YEARLY_GRANT_DAYS: f64 = 15.0;

fn already_processed() -> AppError {
    AppError::bad_request(ErrorCode::AlreadyProcessed, "이미 처리된 신청입니다.")
}

fn date_range(start: Date, end: Date) -> String {
    if start == end {
        kst::format_date(start)
    } else {
        format!("{} ~ {}", kst::format_date(start), kst::format_date(end))
    }
}

fn year_bounds(year: i32) -> Option<(Date, Date)> {
    Some((
        Date::from_calendar_date(year, Month::January, 1).ok()?,
        Date::from_calendar_date(year, Month::December, 31).ok()?,
    ))
}

fn month_bounds(year: i32, month: u8) -> Option<(Date, Date)> {
    let month = Month::try_from(month).ok()?;
    Some((
        Date::from_calendar_date(year, month, 1).ok()?,
        Date::from_calendar_date(year, month, month.length(year)).ok()?,
    ))
}

/// Requester ids the caller may see when no explicit filter is given.
/// `None` means everyone.
async fn visible_requesters<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    caller: &User,
) -> Result<Option<Vec<Uuid>>, AppError> {
    match (caller.role, caller.bu_code) {
        (Role::Admin, _) => Ok(None),
        (Role::Leader, Some(bu)) => Ok(Some(users_repo::ids_in_bu(conn, bu).await?)),
        (Role::Leader, None) => Ok(Some(Vec::new())),
        _ => Ok(Some(vec![caller.id])),
    }
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct RequestQuery {
    pub requester_id: Option<Uuid>,
    pub status: Option<ApprovalStatus>,
    pub year: Option<i32>,
    pub month: Option<u8>,
}

/// Date bounds derived from `year` / `month`.
fn apply_period(filter: &mut LeaveRequestFilter, year: Option<i32>, month: Option<u8>) {
    let Some(year) = year else {
        return;
    };
    match month.and_then(|m| month_bounds(year, m)) {
        Some((first, last)) => {
            filter.start_from = Some(first);
            filter.start_to = Some(last);
        }
        None => {
            if let Some((first, last)) = year_bounds(year) {
                filter.start_from = Some(first);
                filter.end_to = Some(last);
            }
        }
    }
}

pub async fn list_requests<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    caller: &User,
    query: RequestQuery,
) -> Result<Vec<LeaveRequest>, AppError> {
    let requesters = match query.requester_id {
        Some(id) if id == caller.id => Some(vec![id]),
        Some(id) => {
            let requester = users_repo::require_user(conn, id).await?;
            if !can_approve_leave_request(&caller.actor(), requester.bu_code) {
                return Err(AppError::forbidden("권한이 없습니다."));
            }
            Some(vec![id])
        }
        None => visible_requesters(conn, caller).await?,
    };

    let mut filter = LeaveRequestFilter {
        requesters,
        status: query.status,
        ..LeaveRequestFilter::default()
    };
    apply_period(&mut filter, query.year, query.month);

    Ok(leave_repo::list_requests(conn, filter, true).await?)
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateLeaveRequest {
    pub leave_type: Option<LeaveRequestType>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub reason: Option<String>,
}

fn remaining(balance: Option<&LeaveBalance>) -> f64 {
    balance.map_or(0.0, |b| b.total_days - b.used_days)
}

pub async fn create_request<C>(
    conn: &C,
    caller: &User,
    input: CreateLeaveRequest,
) -> Result<LeaveRequest, AppError>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync,
{
    let reason = input.reason.filter(|r| !r.trim().is_empty());
    let (Some(leave_type), Some(start_date), Some(end_date), Some(reason)) =
        (input.leave_type, input.start_date, input.end_date, reason)
    else {
        return Err(AppError::missing_fields(REQUIRED_FIELDS));
    };
    if end_date < start_date {
        return Err(AppError::invalid_with(
            ErrorCode::InvalidDate,
            "종료일은 시작일 이후여야 합니다.",
        ));
    }

    let days = days_used(leave_type, start_date, end_date);
    let year = kst::today_kst().year();
    let balance =
        leave_repo::find_balance(conn, caller.id, balance_type_for(leave_type), year).await?;
    let left = remaining(balance.as_ref());
    if days > left {
        return Err(AppError::bad_request(
            ErrorCode::InsufficientLeaveBalance,
            format!("잔여 휴가가 부족합니다. (잔여: {left}일, 신청: {days}일)"),
        ));
    }

    let request = leave_repo::create_request(
        conn,
        LeaveRequestCreate {
            requester_id: caller.id,
            leave_type,
            start_date,
            end_date,
            days_used: days,
            reason,
        },
    )
    .await?;

    let label = request_type_label(leave_type);
    let range = date_range(start_date, end_date);
    for approver in users_repo::list_approvers(conn).await? {
        if approver.id == caller.id {
            continue;
        }
        let notice = Notice::new(
            approver.id,
            "새로운 휴가 신청",
            format!("{}님이 {label} 신청 ({range})", caller.name),
        )
        .entity("leave_request", request.id)
        .action_url("/leave/admin");
        notify(conn, notice).await;
    }

    Ok(request)
}

pub async fn get_request<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    caller: &User,
    id: i64,
) -> Result<LeaveRequest, AppError> {
    let request = leave_repo::require_request(conn, id).await?;
    if request.requester_id != caller.id && !caller.actor().is_admin() {
        let requester = users_repo::require_user(conn, request.requester_id).await?;
        if !can_approve_leave_request(&caller.actor(), requester.bu_code) {
            return Err(AppError::forbidden("권한이 없습니다."));
        }
    }
    Ok(request)
}

pub async fn cancel_request<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    caller: &User,
    id: i64,
) -> Result<(), AppError> {
    let request = leave_repo::require_request(conn, id).await?;
    if request.requester_id != caller.id {
        return Err(AppError::forbidden("본인의 신청만 취소할 수 있습니다."));
    }
    if request.status != ApprovalStatus::Pending {
        return Err(AppError::bad_request(
            ErrorCode::AlreadyProcessed,
            "대기 중인 신청만 취소할 수 있습니다.",
        ));
    }
    Ok(leave_repo::delete_request(conn, id).await?)
}

/// Role, existence, pending and BU checks shared by approve and reject.
/// Call inside the deciding transaction: the request row stays locked until
/// it commits, so a concurrent decision sees the new status.
async fn load_for_decision<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    caller: &User,
    id: i64,
    denied: &str,
    other_bu: &str,
) -> Result<LeaveRequest, AppError> {
    let actor = caller.actor();
    if !can_access_leave_admin(&actor) {
        return Err(AppError::forbidden(denied));
    }
    let request = leave_repo::lock_request(conn, id).await?;
    if request.status != ApprovalStatus::Pending {
        return Err(already_processed());
    }
    let requester = users_repo::require_user(conn, request.requester_id).await?;
    if !can_approve_leave_request(&actor, requester.bu_code) {
        return Err(AppError::forbidden(other_bu));
    }
    Ok(request)
}

/// Modification reason stamped on vacation logs, e.g. `휴가 승인 (half_am)`.
pub fn vacation_reason(leave_type: LeaveRequestType) -> String {
    format!("휴가 승인 ({})", leave_type.to_value())
}

/// Mark every weekday of an approved request as a vacation day. Every log
/// already recorded on such a day is rewritten.
async fn mark_vacation_days<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    request: &LeaveRequest,
    approver: Uuid,
) -> Result<(), DomainError> {
    let reason = vacation_reason(request.leave_type);
    for day in weekdays_in_range(request.start_date, request.end_date) {
        let existing = attendance_repo::logs_on(conn, request.requester_id, day).await?;
        if existing.is_empty() {
            attendance_repo::create_log(
                conn,
                LogCreate {
                    user_id: request.requester_id,
                    work_date: day,
                    check_in_at: None,
                    check_out_at: None,
                    status: AttendanceStatus::Vacation,
                    is_overtime: false,
                    modification_reason: Some(reason.clone()),
                    modified_by: Some(approver),
                },
            )
            .await?;
            continue;
        }
        for mut log in existing {
            log.status = AttendanceStatus::Vacation;
            log.is_modified = true;
            log.modified_by = Some(approver);
            log.modification_reason = Some(reason.clone());
            attendance_repo::save_log(conn, log).await?;
        }
    }
    Ok(())
}

pub async fn approve_request<C>(conn: &C, caller: &User, id: i64) -> Result<LeaveRequest, AppError>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync,
{
    let txn = conn.begin().await?;
    let mut request = load_for_decision(
        &txn,
        caller,
        id,
        "승인 권한이 없습니다.",
        "같은 사업부의 신청만 승인할 수 있습니다.",
    )
    .await?;
    request.status = ApprovalStatus::Approved;
    request.approver_id = Some(caller.id);
    request.approved_at = Some(OffsetDateTime::now_utc());
    let request = leave_repo::save_request(&txn, request).await?;
    leave_repo::add_used_days(
        &txn,
        request.requester_id,
        balance_type_for(request.leave_type),
        request.start_date.year(),
        request.days_used,
    )
    .await?;
    if matches!(
        request.leave_type,
        LeaveRequestType::Annual | LeaveRequestType::Compensatory | LeaveRequestType::Special
    ) {
        mark_vacation_days(&txn, &request, caller.id).await?;
    }
    txn.commit().await?;

    let label = request_type_label(request.leave_type);
    let notice = Notice::new(
        request.requester_id,
        "휴가 신청이 승인되었습니다",
        format!(
            "{label} 신청 ({})이 승인되었습니다.",
            date_range(request.start_date, request.end_date)
        ),
    )
    .kind(NotificationType::Success)
    .entity("leave_request", request.id)
    .action_url("/leave");
    notify(conn, notice).await;

    Ok(request)
}

#[derive(Debug, Default, Deserialize)]
pub struct RejectRequest {
    pub rejection_reason: Option<String>,
}

fn rejection_reason(input: RejectRequest) -> Result<String, AppError> {
    input
        .rejection_reason
        .filter(|r| !r.trim().is_empty())
        .ok_or_else(|| AppError::missing_fields("반려 사유를 입력해주세요."))
}

pub async fn reject_request<C>(
    conn: &C,
    caller: &User,
    id: i64,
    input: RejectRequest,
) -> Result<LeaveRequest, AppError>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync,
{
    let reason = rejection_reason(input)?;
    let txn = conn.begin().await?;
    let mut request = load_for_decision(
        &txn,
        caller,
        id,
        "반려 권한이 없습니다.",
        "같은 사업부의 신청만 반려할 수 있습니다.",
    )
    .await?;

    request.status = ApprovalStatus::Rejected;
    request.approver_id = Some(caller.id);
    request.approved_at = Some(OffsetDateTime::now_utc());
    request.rejection_reason = Some(reason.clone());
    let request = leave_repo::save_request(&txn, request).await?;
    txn.commit().await?;

    let label = request_type_label(request.leave_type);
    let notice = Notice::new(
        request.requester_id,
        "휴가 신청이 반려되었습니다",
        format!(
            "{label} 신청 ({})이 반려되었습니다. 사유: {reason}",
            date_range(request.start_date, request.end_date)
        ),
    )
    .kind(NotificationType::Error)
    .entity("leave_request", request.id)
    .action_url("/leave");
    notify(conn, notice).await;

    Ok(request)
}

// ---------------------------------------------------------------------------
// Balances and grants
// ---------------------------------------------------------------------------

fn require_leave_viewer(caller: &User, user_id: Uuid) -> Result<(), AppError> {
    if user_id != caller.id && !can_access_leave_admin(&caller.actor()) {
        return Err(AppError::forbidden("권한이 없습니다."));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct BalanceFigures {
    pub total: f64,
    pub used: f64,
    pub remaining: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct BalanceSummary {
    pub annual: BalanceFigures,
    pub compensatory: BalanceFigures,
    pub special: BalanceFigures,
}

impl BalanceSummary {
    pub fn from_balances(balances: &[LeaveBalance]) -> Self {
        let figures = |kind: LeaveType| {
            balances
                .iter()
                .filter(|b| b.leave_type == kind)
                .fold(BalanceFigures::default(), |acc, b| BalanceFigures {
                    total: acc.total + b.total_days,
                    used: acc.used + b.used_days,
                    remaining: acc.remaining + (b.total_days - b.used_days),
                })
        };
        Self {
            annual: figures(LeaveType::Annual),
            compensatory: figures(LeaveType::Compensatory),
            special: figures(LeaveType::Special),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum BalancesView {
    Rows(Vec<LeaveBalance>),
    Summary(BalanceSummary),
}

pub async fn balances<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    caller: &User,
    user_id: Option<Uuid>,
    year: Option<i32>,
    summary: bool,
) -> Result<BalancesView, AppError> {
    let user_id = user_id.unwrap_or(caller.id);
    require_leave_viewer(caller, user_id)?;
    let year = year.unwrap_or_else(|| kst::today_kst().year());

    let rows = leave_repo::balances_for(conn, user_id, year).await?;
    if summary {
        return Ok(BalancesView::Summary(BalanceSummary::from_balances(&rows)));
    }
    Ok(BalancesView::Rows(rows))
}

#[derive(Debug, Serialize)]
pub struct MemberLeave {
    pub user_id: Uuid,
    pub user_name: String,
    pub bu_code: Option<BuCode>,
    pub position: Option<String>,
    pub hire_date: Option<Date>,
    pub annual_total: f64,
    pub annual_used: f64,
    pub annual_remaining: f64,
    pub compensatory_total: f64,
    pub compensatory_used: f64,
    pub compensatory_remaining: f64,
    pub special_total: f64,
    pub special_used: f64,
    pub special_remaining: f64,
}

impl MemberLeave {
    pub fn new(user: User, balances: &[LeaveBalance]) -> Self {
        let s = BalanceSummary::from_balances(balances);
        Self {
            user_id: user.id,
            user_name: user.name,
            bu_code: user.bu_code,
            position: user.position,
            hire_date: user.hire_date,
            annual_total: s.annual.total,
            annual_used: s.annual.used,
            annual_remaining: s.annual.remaining,
            compensatory_total: s.compensatory.total,
            compensatory_used: s.compensatory.used,
            compensatory_remaining: s.compensatory.remaining,
            special_total: s.special.total,
            special_used: s.special.used,
            special_remaining: s.special.remaining,
        }
    }
}

/// Business units whose balances `caller` may list; `None` lists every unit.
/// Leaders are pinned to their own unit whatever they ask for.
pub fn team_scope(caller: &User, requested: Option<BuCode>) -> Result<Option<BuCode>, AppError> {
    match caller.role {
        Role::Admin => Ok(requested),
        Role::Leader => caller
            .bu_code
            .map(Some)
            .ok_or_else(|| AppError::forbidden("조회 권한이 없습니다.")),
        _ => Err(AppError::forbidden("조회 권한이 없습니다.")),
    }
}

/// Per-user annual, compensatory and special figures for `year`.
pub async fn team_balances<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    caller: &User,
    bu: Option<BuCode>,
    year: Option<i32>,
) -> Result<Vec<MemberLeave>, AppError> {
    let bu = team_scope(caller, bu)?;
    let year = year.unwrap_or_else(|| kst::today_kst().year());

    let users = users_repo::list_staff(conn, bu).await?;
    if users.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Vec<Uuid> = users.iter().map(|u| u.id).collect();
    let mut by_user: HashMap<Uuid, Vec<LeaveBalance>> = HashMap::new();
    for balance in leave_repo::balances_of_users(conn, &ids, year).await? {
        by_user.entry(balance.user_id).or_default().push(balance);
    }

    Ok(users
        .into_iter()
        .map(|u| {
            let rows = by_user.remove(&u.id).unwrap_or_default();
            MemberLeave::new(u, &rows)
        })
        .collect())
}

pub async fn grants<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    caller: &User,
    user_id: Option<Uuid>,
    year: Option<i32>,
) -> Result<Vec<LeaveGrant>, AppError> {
    let user_id = user_id.unwrap_or(caller.id);
    require_leave_viewer(caller, user_id)?;
    Ok(leave_repo::grants_for(conn, user_id, year).await?)
}

#[derive(Debug, Default, Deserialize)]
pub struct GrantLeave {
    pub user_id: Option<Uuid>,
    pub leave_type: Option<LeaveType>,
    pub days: Option<f64>,
    pub reason: Option<String>,
}

pub async fn grant<C>(conn: &C, caller: &User, input: GrantLeave) -> Result<LeaveGrant, AppError>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync,
{
    if !can_adjust_annual_leave(&caller.actor()) {
        return Err(AppError::forbidden("휴가 부여 권한이 없습니다."));
    }
    let reason = input.reason.filter(|r| !r.trim().is_empty());
    let (Some(user_id), Some(leave_type), Some(days), Some(reason)) =
        (input.user_id, input.leave_type, input.days, reason)
    else {
        return Err(AppError::missing_fields(REQUIRED_FIELDS));
    };
    if !(days > 0.0) {
        return Err(AppError::invalid("부여 일수는 0보다 커야 합니다."));
    }
    users_repo::require_user(conn, user_id).await?;

    let txn = conn.begin().await?;
    let grant = leave_repo::grant_days(
        &txn,
        GrantCreate {
            user_id,
            leave_type,
            grant_type: LeaveGrantType::Manual,
            days,
            reason: Some(reason),
            granted_by: Some(caller.id),
            year: kst::today_kst().year(),
        },
    )
    .await?;
    txn.commit().await?;

    let label = grant_log_label(leave_type, days);
    activity::record(
        conn,
        Activity::new(caller.id, action::LEAVE_GRANTED, entity::LEAVE_GRANT, grant.id)
            .title(format!("{label} {days}일 부여"))
            .metadata(json!({"target_user_id": user_id, "leave_type": leave_type, "days": days})),
    )
    .await;

    Ok(grant)
}

// ---------------------------------------------------------------------------
// Compensatory
// ---------------------------------------------------------------------------

pub async fn list_compensatory<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    caller: &User,
    requester_id: Option<Uuid>,
    status: Option<ApprovalStatus>,
) -> Result<Vec<CompensatoryRequest>, AppError> {
    let requester = if can_approve_compensatory_request(&caller.actor()) {
        requester_id
    } else {
        Some(caller.id)
    };
    Ok(leave_repo::list_compensatory(conn, requester, status, true).await?)
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateCompensatory {
    pub days: Option<f64>,
    pub reason: Option<String>,
    pub work_date: Option<Date>,
}

pub async fn create_compensatory<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    caller: &User,
    input: CreateCompensatory,
) -> Result<CompensatoryRequest, AppError> {
    let reason = input
        .reason
        .filter(|r| !r.trim().is_empty())
        .ok_or_else(|| AppError::missing_fields("대체휴무 생성 사유를 입력해주세요."))?;
    let days = input.days.unwrap_or(1.0);
    if !(days > 0.0) {
        return Err(AppError::invalid("일수는 0보다 커야 합니다."));
    }

    Ok(leave_repo::create_compensatory(
        conn,
        CompensatoryCreate {
            requester_id: caller.id,
            days,
            reason,
            work_date: input.work_date,
        },
    )
    .await?)
}

async fn load_compensatory_for_decision<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    caller: &User,
    id: i64,
    denied: &str,
) -> Result<CompensatoryRequest, AppError> {
    if !can_approve_compensatory_request(&caller.actor()) {
        return Err(AppError::forbidden(denied));
    }
    let request = leave_repo::lock_compensatory(conn, id).await?;
    if request.status != ApprovalStatus::Pending {
        return Err(already_processed());
    }
    Ok(request)
}

pub async fn approve_compensatory<C>(
    conn: &C,
    caller: &User,
    id: i64,
) -> Result<CompensatoryRequest, AppError>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync,
{
    let txn = conn.begin().await?;
    let mut request =
        load_compensatory_for_decision(&txn, caller, id, "대체휴무 생성 승인 권한이 없습니다.")
            .await?;
    request.status = ApprovalStatus::Approved;
    request.approver_id = Some(caller.id);
    request.approved_at = Some(OffsetDateTime::now_utc());
    let request = leave_repo::save_compensatory(&txn, request).await?;
    leave_repo::grant_days(
        &txn,
        GrantCreate {
            user_id: request.requester_id,
            leave_type: LeaveType::Compensatory,
            grant_type: LeaveGrantType::CompensatoryApproved,
            days: request.days,
            reason: Some(request.reason.clone()),
            granted_by: Some(caller.id),
            year: kst::today_kst().year(),
        },
    )
    .await?;
    txn.commit().await?;

    let notice = Notice::new(
        request.requester_id,
        "대체휴무 생성이 승인되었습니다",
        format!("대체휴무 {}일이 부여되었습니다.", request.days),
    )
    .kind(NotificationType::Success)
    .entity("compensatory_request", request.id)
    .action_url("/leave");
    notify(conn, notice).await;

    Ok(request)
}

pub async fn reject_compensatory<C>(
    conn: &C,
    caller: &User,
    id: i64,
    input: RejectRequest,
) -> Result<CompensatoryRequest, AppError>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync,
{
    let reason = rejection_reason(input)?;
    let txn = conn.begin().await?;
    let mut request =
        load_compensatory_for_decision(&txn, caller, id, "대체휴무 생성 반려 권한이 없습니다.")
            .await?;

    request.status = ApprovalStatus::Rejected;
    request.approver_id = Some(caller.id);
    request.approved_at = Some(OffsetDateTime::now_utc());
    request.rejection_reason = Some(reason.clone());
    let request = leave_repo::save_compensatory(&txn, request).await?;
    txn.commit().await?;

    let notice = Notice::new(
        request.requester_id,
        "대체휴무 생성이 반려되었습니다",
        format!("사유: {reason}"),
    )
    .kind(NotificationType::Error)
    .entity("compensatory_request", request.id)
    .action_url("/leave");
    notify(conn, notice).await;

    Ok(request)
}

// ---------------------------------------------------------------------------
// Pending queue
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(tag = "request_kind", rename_all = "snake_case")]
pub enum PendingItem {
    Leave(LeaveRequest),
    Compensatory(CompensatoryRequest),
}

impl PendingItem {
    fn created_at(&self) -> OffsetDateTime {
        match self {
            Self::Leave(r) => r.created_at,
            Self::Compensatory(r) => r.created_at,
        }
    }
}

/// Oldest first.
pub fn merge_pending(
    leave: Vec<LeaveRequest>,
    compensatory: Vec<CompensatoryRequest>,
) -> Vec<PendingItem> {
    let mut items: Vec<PendingItem> = leave
        .into_iter()
        .map(PendingItem::Leave)
        .chain(compensatory.into_iter().map(PendingItem::Compensatory))
        .collect();
    items.sort_by_key(PendingItem::created_at);
    items
}

pub async fn pending<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    caller: &User,
) -> Result<Vec<PendingItem>, AppError> {
    let actor: Actor = caller.actor();
    if !can_access_leave_admin(&actor) {
        return Err(AppError::forbidden("권한이 없습니다."));
    }

    let filter = LeaveRequestFilter {
        requesters: visible_requesters(conn, caller).await?,
        status: Some(ApprovalStatus::Pending),
        ..LeaveRequestFilter::default()
    };
    let leave = leave_repo::list_requests(conn, filter, false).await?;
    let compensatory = if can_approve_compensatory_request(&actor) {
        leave_repo::list_compensatory(conn, None, Some(ApprovalStatus::Pending), false).await?
    } else {
        Vec::new()
    };

    Ok(merge_pending(leave, compensatory))
}

// ---------------------------------------------------------------------------
// Cron
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct GrantFailure {
    user_id: Uuid,
    error: String,
}

async fn grant_in_savepoint<C>(conn: &C, dto: GrantCreate) -> Result<(), DomainError>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync,
{
    let savepoint = conn.begin().await?;
    leave_repo::grant_days(&savepoint, dto).await?;
    savepoint.commit().await?;
    Ok(())
}

fn with_errors(mut body: Value, errors: Vec<GrantFailure>) -> Value {
    if !errors.is_empty() {
        body["errors"] = json!(errors);
    }
    body
}

/// One day per completed month during the first year, granted on the hire
/// day-of-month.
pub async fn auto_generate_monthly<C>(conn: &C) -> Result<Value, AppError>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync,
{
    let users = users_repo::list_with_hire_date(conn).await?;
    if users.is_empty() {
        return Ok(json!({"message": "입사일이 등록된 사용자가 없습니다.", "processed": 0}));
    }

    let today = kst::today_kst();
    let year = today.year();
    let day_start = kst_day_start(kst::now_kst());
    let (mut processed, mut skipped) = (0u32, 0u32);
    let mut errors = Vec::new();

    for user in users {
        let Some(hire) = user.hire_date else {
            continue;
        };
        let Some(ordinal) = monthly_grant_ordinal(hire, today) else {
            skipped += 1;
            continue;
        };
        if leave_repo::grant_exists_since(conn, user.id, LeaveGrantType::AutoMonthly, day_start)
            .await?
        {
            skipped += 1;
            continue;
        }

        let dto = GrantCreate {
            user_id: user.id,
            leave_type: LeaveType::Annual,
            grant_type: LeaveGrantType::AutoMonthly,
            days: 1.0,
            reason: Some(format!(
                "입사일 기준 {ordinal}개월차 자동 부여 (입사일: {})",
                kst::format_date(hire)
            )),
            granted_by: None,
            year,
        };
        match grant_in_savepoint(conn, dto).await {
            Ok(()) => processed += 1,
            Err(err) => {
                warn!(user_id = %user.id, error = %err, "monthly leave grant failed");
                errors.push(GrantFailure {
                    user_id: user.id,
                    error: err.to_string(),
                });
            }
        }
    }

    info!(processed, skipped, failed = errors.len(), "monthly leave accrual finished");

    Ok(with_errors(
        json!({
            "message": "월별 자동 생성 완료",
            "date": kst::format_date(today),
            "year": year,
            "processed": processed,
            "skipped": skipped,
        }),
        errors,
    ))
}

/// Fifteen days on Jan 1 for everyone with at least one year of tenure.
pub async fn auto_generate_yearly<C>(conn: &C) -> Result<Value, AppError>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync,
{
    let users = users_repo::list_with_hire_date(conn).await?;
    if users.is_empty() {
        return Ok(json!({"message": "입사일이 등록된 사용자가 없습니다.", "processed": 0}));
    }

    let year = kst::today_kst().year();
    let Some((year_start, _)) = year_bounds(year) else {
        return Err(AppError::internal("invalid calendar year"));
    };
    let (mut processed, mut skipped) = (0u32, 0u32);
    let mut errors = Vec::new();

    for user in users {
        let Some(hire) = user.hire_date else {
            continue;
        };
        if full_years_between(hire, year_start) < 1
            || leave_repo::grant_exists_for_year(conn, user.id, LeaveGrantType::AutoYearly, year)
                .await?
        {
            skipped += 1;
            continue;
        }

        let dto = GrantCreate {
            user_id: user.id,
            leave_type: LeaveType::Annual,
            grant_type: LeaveGrantType::AutoYearly,
            days: YEARLY_GRANT_DAYS,
            reason: Some(format!("{year}년 연간 자동 부여")),
            granted_by: None,
            year,
        };
        match grant_in_savepoint(conn, dto).await {
            Ok(()) => processed += 1,
            Err(err) => {
                warn!(user_id = %user.id, error = %err, "yearly leave grant failed");
                errors.push(GrantFailure {
                    user_id: user.id,
                    error: err.to_string(),
                });
            }
        }
    }

    info!(year, processed, skipped, failed = errors.len(), "yearly leave accrual finished");

    Ok(with_errors(
        json!({
            "message": "연간 자동 생성 완료",
            "year": year,
            "processed": processed,
            "skipped": skipped,
        }),
        errors,
    ))
}

#[cfg(test)]
mod tests {
    use time::macros::{date, datetime};

    use super::*;

    fn balance(kind: LeaveType, total: f64, used: f64) -> LeaveBalance {
        LeaveBalance {
            id: 1,
            user_id: Uuid::nil(),
            leave_type: kind,
            year: 2025,
            total_days: total,
            used_days: used,
            created_at: datetime!(2025-01-01 00:00 UTC),
            updated_at: datetime!(2025-01-01 00:00 UTC),
        }
    }

    #[test]
    fn summary_groups_by_type() {
        let rows = vec![
            balance(LeaveType::Annual, 15.0, 3.5),
            balance(LeaveType::Compensatory, 2.0, 0.0),
        ];
        let s = BalanceSummary::from_balances(&rows);
        assert_eq!(s.annual.remaining, 11.5);
        assert_eq!(s.compensatory.total, 2.0);
        assert_eq!(s.special, BalanceFigures::default());

        let json = serde_json::to_value(BalancesView::Summary(s)).unwrap();
        assert_eq!(json["annual"]["used"], 3.5);
    }

    fn user(role: Role, bu: Option<BuCode>) -> User {
        User {
            id: Uuid::from_u128(5),
            email: "lee@grigo.kr".into(),
            name: "이".into(),
            role,
            bu_code: bu,
            position: Some("PD".into()),
            hire_date: Some(date!(2023 - 05 - 02)),
            created_at: datetime!(2023-05-02 00:00 UTC),
        }
    }

    #[test]
    fn team_scope_pins_leaders_to_their_unit() {
        let admin = user(Role::Admin, Some(BuCode::Head));
        assert_eq!(team_scope(&admin, None).unwrap(), None);
        assert_eq!(team_scope(&admin, Some(BuCode::Flow)).unwrap(), Some(BuCode::Flow));

        let leader = user(Role::Leader, Some(BuCode::React));
        assert_eq!(team_scope(&leader, Some(BuCode::Flow)).unwrap(), Some(BuCode::React));
        assert_eq!(team_scope(&leader, None).unwrap(), Some(BuCode::React));

        assert!(team_scope(&user(Role::Leader, None), None).is_err());
        for role in [Role::Manager, Role::Member, Role::Viewer, Role::Artist] {
            let err = team_scope(&user(role, Some(BuCode::React)), None).unwrap_err();
            assert_eq!(err.detail(), "조회 권한이 없습니다.");
        }
    }

    #[test]
    fn member_leave_flattens_the_summary() {
        let rows = vec![
            balance(LeaveType::Annual, 15.0, 4.0),
            balance(LeaveType::Special, 1.0, 1.0),
        ];
        let row = MemberLeave::new(user(Role::Member, Some(BuCode::React)), &rows);
        assert_eq!(row.annual_remaining, 11.0);
        assert_eq!(row.special_remaining, 0.0);
        assert_eq!(row.compensatory_total, 0.0);

        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["annual_used"], 4.0);
        assert_eq!(json["hire_date"], "2023-05-02");
        assert_eq!(json["user_name"], "이");
    }

    #[test]
    fn remaining_without_balance_is_zero() {
        assert_eq!(remaining(None), 0.0);
        assert_eq!(remaining(Some(&balance(LeaveType::Annual, 15.0, 14.5))), 0.5);
    }

    #[test]
    fn period_filter_bounds() {
        let mut f = LeaveRequestFilter::default();
        apply_period(&mut f, Some(2025), None);
        assert_eq!(f.start_from, Some(date!(2025 - 01 - 01)));
        assert_eq!(f.end_to, Some(date!(2025 - 12 - 31)));
        assert_eq!(f.start_to, None);

        let mut f = LeaveRequestFilter::default();
        apply_period(&mut f, Some(2024), Some(2));
        assert_eq!(f.start_from, Some(date!(2024 - 02 - 01)));
        assert_eq!(f.start_to, Some(date!(2024 - 02 - 29)));

        let mut f = LeaveRequestFilter::default();
        apply_period(&mut f, None, Some(2));
        assert_eq!(f.start_from, None);
    }

    #[test]
    fn vacation_reason_keeps_the_stored_type() {
        assert_eq!(vacation_reason(LeaveRequestType::Annual), "휴가 승인 (annual)");
        assert_eq!(vacation_reason(LeaveRequestType::Compensatory), "휴가 승인 (compensatory)");
    }

    #[test]
    fn ranges_collapse_single_days() {
        assert_eq!(date_range(date!(2025 - 03 - 04), date!(2025 - 03 - 04)), "2025-03-04");
        assert_eq!(
            date_range(date!(2025 - 03 - 04), date!(2025 - 03 - 06)),
            "2025-03-04 ~ 2025-03-06"
        );
    }

    #[test]
    fn errors_key_only_when_something_failed() {
        let body = with_errors(json!({"processed": 1}), Vec::new());
        assert!(body.get("errors").is_none());

        let body = with_errors(
            json!({"processed": 0}),
            vec![GrantFailure {
                user_id: Uuid::nil(),
                error: "boom".into(),
            }],
        );
        assert_eq!(body["errors"][0]["error"], "boom");
    }
}
