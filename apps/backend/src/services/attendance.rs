//! Check-in/check-out, log administration, the admin board and the
//! auto-checkout cron.

use std::collections::HashMap;

use sea_orm::{ActiveEnum, ConnectionTrait, TransactionTrait};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use serde_with::rust::double_option;
use time::macros::time;
use time::{Date, Month, OffsetDateTime, Time};
use tracing::info;
use uuid::Uuid;

use super::activity::{self, action, entity, Activity};
use super::notifications::{notify, Notice};
use crate::domain::kst;
use crate::domain::permissions::{
    can_access_attendance_log, can_modify_attendance, can_view_all_attendance,
    can_view_team_attendance,
};
use crate::domain::work_time::{monthly_stats, work_time_minutes, MonthlyStats};
use crate::entities::enums::{AttendanceStatus, BuCode, NotificationType, Role, WorkStatus};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::repos::attendance::{self as attendance_repo, AttendanceLog, LogCreate};
use crate::repos::users::{self as users_repo, User};
use crate::repos::work_status::{self as work_status_repo, UserWorkStatus};

const AUTO_CHECKOUT_TIME: Time = time!(18:00);
const AUTO_CHECKOUT_REASON: &str = "시스템 강제 퇴근 조치 (당일 23:59까지 퇴근 미기록)";
const PENDING_AUTO_CHECKOUT_LIMIT: u64 = 30;
const AUTO_CHECKOUT_HISTORY_LIMIT: u64 = 30;

// ---------------------------------------------------------------------------
// Check-in / check-out
// ---------------------------------------------------------------------------

/// Where the caller stands on a day, judged from punched logs only; a
/// vacation log without a check-in time is neither open nor closed.
#[derive(Debug, PartialEq, Eq)]
pub enum PunchState<'a> {
    NotStarted,
    Open(&'a AttendanceLog),
    Closed,
}

/// `logs` latest first.
pub fn punch_state(logs: &[AttendanceLog]) -> PunchState<'_> {
    if let Some(open) = logs
        .iter()
        .find(|l| l.check_in_at.is_some() && l.check_out_at.is_none())
    {
        return PunchState::Open(open);
    }
    if logs.iter().any(|l| l.check_in_at.is_some()) {
        PunchState::Closed
    } else {
        PunchState::NotStarted
    }
}

pub async fn check_in<C>(conn: &C, caller: &User) -> Result<AttendanceLog, AppError>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync,
{
    let today = kst::today_kst();
    let logs = attendance_repo::logs_on(conn, caller.id, today).await?;

    let is_overtime = match punch_state(&logs) {
        PunchState::Open(_) => {
            return Err(AppError::bad_request(
                ErrorCode::AlreadyCheckedIn,
                "이미 출근 처리되었습니다.",
            ));
        }
        PunchState::Closed => true,
        PunchState::NotStarted => false,
    };

    let log = attendance_repo::create_log(
        conn,
        LogCreate {
            user_id: caller.id,
            work_date: today,
            check_in_at: Some(OffsetDateTime::now_utc()),
            check_out_at: None,
            status: AttendanceStatus::Present,
            is_overtime,
            modification_reason: None,
            modified_by: None,
        },
    )
    .await?;

    activity::record(
        conn,
        Activity::new(caller.id, action::CHECK_IN, entity::ATTENDANCE, log.id)
            .title(if is_overtime { "추가 근무 출근" } else { "출근" })
            .metadata(json!({"work_date": kst::format_date(today), "is_overtime": is_overtime})),
    )
    .await;

    Ok(log)
}

pub async fn check_out<C>(conn: &C, caller: &User) -> Result<AttendanceLog, AppError>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync,
{
    let today = kst::today_kst();
    let logs = attendance_repo::logs_on(conn, caller.id, today).await?;
    let mut log = match punch_state(&logs) {
        PunchState::NotStarted => {
            return Err(AppError::bad_request(
                ErrorCode::NotCheckedIn,
                "출근 기록이 없습니다. 먼저 출근해주세요.",
            ));
        }
        PunchState::Closed => {
            return Err(AppError::bad_request(
                ErrorCode::AlreadyCheckedOut,
                "이미 퇴근 처리되었습니다.",
            ));
        }
        PunchState::Open(log) => log.clone(),
    };

    log.check_out_at = Some(OffsetDateTime::now_utc());
    let log = attendance_repo::save_log(conn, log).await?;

    activity::record(
        conn,
        Activity::new(caller.id, action::CHECK_OUT, entity::ATTENDANCE, log.id)
            .title("퇴근")
            .metadata(json!({
                "work_date": kst::format_date(today),
                "work_time_minutes": work_time_minutes(log.check_in_at, log.check_out_at),
            })),
    )
    .await;

    Ok(log)
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TodayStatus {
    pub is_checked_in: bool,
    pub is_checked_out: bool,
    pub has_checked_out: bool,
    #[serde(with = "time::serde::rfc3339::option")]
    pub check_in_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub check_out_at: Option<OffsetDateTime>,
    pub work_date: Date,
    pub status: AttendanceStatus,
    pub work_time_minutes: Option<i64>,
}

/// Summary of the latest log of `today`; `None` means nothing recorded yet.
pub fn today_status(latest: Option<&AttendanceLog>, today: Date) -> TodayStatus {
    match latest {
        None => TodayStatus {
            is_checked_in: false,
            is_checked_out: false,
            has_checked_out: false,
            check_in_at: None,
            check_out_at: None,
            work_date: today,
            status: AttendanceStatus::Absent,
            work_time_minutes: None,
        },
        Some(log) => {
            let checked_out = log.check_out_at.is_some();
            TodayStatus {
                is_checked_in: log.check_in_at.is_some() && !checked_out,
                is_checked_out: checked_out,
                has_checked_out: checked_out,
                check_in_at: log.check_in_at,
                check_out_at: log.check_out_at,
                work_date: log.work_date,
                status: log.status,
                work_time_minutes: work_time_minutes(log.check_in_at, log.check_out_at),
            }
        }
    }
}

pub async fn status<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    caller: &User,
) -> Result<TodayStatus, AppError> {
    let today = kst::today_kst();
    let logs = attendance_repo::logs_on(conn, caller.id, today).await?;
    Ok(today_status(logs.first(), today))
}

// ---------------------------------------------------------------------------
// Logs
// ---------------------------------------------------------------------------

/// Resolve whose logs are requested and check the caller may see them.
async fn viewable_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    caller: &User,
    user_id: Option<Uuid>,
) -> Result<Uuid, AppError> {
    let target = user_id.unwrap_or(caller.id);
    if target == caller.id {
        return Ok(target);
    }
    let actor = caller.actor();
    if can_view_all_attendance(&actor) {
        return Ok(target);
    }
    let owner = users_repo::require_user(conn, target).await?;
    if !can_view_team_attendance(&actor, owner.bu_code) {
        return Err(AppError::forbidden("Forbidden"));
    }
    Ok(target)
}

pub async fn list_logs<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    caller: &User,
    user_id: Option<Uuid>,
    start: Option<Date>,
    end: Option<Date>,
) -> Result<Vec<AttendanceLog>, AppError> {
    let target = viewable_user(conn, caller, user_id).await?;
    Ok(attendance_repo::list_for_user(conn, target, start, end).await?)
}

pub async fn get_log<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    caller: &User,
    id: i64,
) -> Result<AttendanceLog, AppError> {
    let log = attendance_repo::require_log(conn, id).await?;
    let actor = caller.actor();
    if log.user_id == caller.id || can_view_all_attendance(&actor) {
        return Ok(log);
    }
    let owner = users_repo::require_user(conn, log.user_id).await?;
    if !can_access_attendance_log(&actor, log.user_id, owner.bu_code) {
        return Err(AppError::forbidden("Forbidden"));
    }
    Ok(log)
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateLog {
    #[serde(default, with = "double_option")]
    pub check_in_time: Option<Option<String>>,
    #[serde(default, with = "double_option")]
    pub check_out_time: Option<Option<String>>,
    pub status: Option<AttendanceStatus>,
    pub modification_reason: Option<String>,
}

/// `Some(None)` clears; `Some(Some(ts))` sets; `None` leaves as is.
fn resolve_time(
    work_date: Date,
    value: Option<Option<String>>,
) -> Result<Option<Option<OffsetDateTime>>, AppError> {
    match value {
        None => Ok(None),
        Some(None) => Ok(Some(None)),
        Some(Some(s)) if s.trim().is_empty() => Ok(Some(None)),
        Some(Some(s)) => {
            let t = kst::parse_hhmm(&s).ok_or_else(|| {
                AppError::invalid_with(ErrorCode::InvalidTime, "시간은 HH:mm 형식이어야 합니다.")
            })?;
            Ok(Some(Some(kst::at_kst(work_date, t))))
        }
    }
}

pub async fn update_log<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    caller: &User,
    id: i64,
    patch: UpdateLog,
) -> Result<AttendanceLog, AppError> {
    if !can_modify_attendance(&caller.actor()) {
        return Err(AppError::forbidden("Forbidden: 수정 권한이 없습니다."));
    }
    let mut log = attendance_repo::require_log(conn, id).await?;

    if let Some(v) = resolve_time(log.work_date, patch.check_in_time)? {
        log.check_in_at = v;
    }
    if let Some(v) = resolve_time(log.work_date, patch.check_out_time)? {
        log.check_out_at = v;
    }
    if let Some(status) = patch.status {
        log.status = status;
    }
    log.is_modified = true;
    log.modified_by = Some(caller.id);
    log.modification_reason = Some(
        patch
            .modification_reason
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(|| format!("관리자 수정 ({})", caller.name)),
    );

    Ok(attendance_repo::save_log(conn, log).await?)
}

pub async fn delete_log<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    caller: &User,
    id: i64,
) -> Result<(), AppError> {
    if caller.role != Role::Admin {
        return Err(AppError::forbidden("Forbidden: admin만 삭제할 수 있습니다."));
    }
    Ok(attendance_repo::delete_log(conn, id).await?)
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateLog {
    pub user_id: Option<Uuid>,
    pub work_date: Option<String>,
    pub check_in_time: Option<String>,
    pub check_out_time: Option<String>,
}

/// Backfill a log for someone else; at least one of the two times is
/// required.
pub async fn admin_create_log<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    caller: &User,
    input: CreateLog,
) -> Result<AttendanceLog, AppError> {
    let raw_date = input
        .work_date
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());
    let (Some(user_id), Some(raw_date)) = (input.user_id, raw_date) else {
        return Err(AppError::missing_fields("사용자 ID와 근무일은 필수입니다."));
    };
    let work_date = kst::parse_date(raw_date).ok_or_else(|| {
        AppError::invalid_with(ErrorCode::InvalidDate, format!("Invalid date: {raw_date}"))
    })?;

    let check_in_at = resolve_time(work_date, input.check_in_time.map(Some))?.flatten();
    let check_out_at = resolve_time(work_date, input.check_out_time.map(Some))?.flatten();
    if check_in_at.is_none() && check_out_at.is_none() {
        return Err(AppError::missing_fields(
            "출근 또는 퇴근 시각 중 하나 이상 입력해주세요.",
        ));
    }

    if !can_modify_attendance(&caller.actor()) {
        return Err(AppError::forbidden("Forbidden: 수정 권한이 없습니다."));
    }
    let target = users_repo::find_user_by_id(conn, user_id)
        .await?
        .ok_or_else(|| {
            AppError::not_found(ErrorCode::UserNotFound, "대상 사용자를 찾을 수 없습니다.")
        })?;

    let registrar = if caller.name.trim().is_empty() {
        &caller.email
    } else {
        &caller.name
    };
    let log = attendance_repo::create_log(
        conn,
        LogCreate {
            user_id: target.id,
            work_date,
            check_in_at,
            check_out_at,
            status: AttendanceStatus::Present,
            is_overtime: false,
            modification_reason: Some(format!("관리자 등록 ({registrar})")),
            modified_by: Some(caller.id),
        },
    )
    .await?;

    info!(log_id = log.id, target = %target.id, "attendance log backfilled");
    Ok(log)
}

// ---------------------------------------------------------------------------
// Auto-checkout correction
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct CorrectCheckout {
    pub check_out_time: Option<String>,
    #[serde(default)]
    pub skip_correction: bool,
}

#[derive(Debug, Serialize)]
pub struct CorrectionOutcome {
    pub message: &'static str,
    pub log: AttendanceLog,
}

pub async fn correct_checkout<C>(
    conn: &C,
    caller: &User,
    id: i64,
    input: CorrectCheckout,
) -> Result<CorrectionOutcome, AppError>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync,
{
    let mut log = attendance_repo::require_log(conn, id).await?;
    if log.user_id != caller.id {
        return Err(AppError::forbidden("자신의 기록만 수정할 수 있습니다."));
    }
    if !log.is_auto_checkout {
        return Err(AppError::bad_request(
            ErrorCode::BadRequest,
            "자동 퇴근 처리된 기록만 수정할 수 있습니다.",
        ));
    }

    if input.skip_correction {
        log.user_confirmed = true;
        let log = attendance_repo::save_log(conn, log).await?;
        return Ok(CorrectionOutcome {
            message: "확인 처리되었습니다.",
            log,
        });
    }

    let time_str = input
        .check_out_time
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| AppError::missing_fields("퇴근 시간을 입력해주세요."))?;
    let t = kst::parse_hhmm(&time_str).ok_or_else(|| {
        AppError::invalid_with(ErrorCode::InvalidTime, "시간은 HH:mm 형식이어야 합니다.")
    })?;

    let original = log
        .check_out_at
        .map(kst::format_hhmm_kst)
        .unwrap_or_else(|| "-".to_string());
    log.check_out_at = Some(kst::at_kst(log.work_date, t));
    log.is_modified = true;
    log.user_confirmed = true;
    log.modified_by = Some(caller.id);
    log.modification_reason = Some(format!("사용자 직접 수정 (원래 자동 퇴근: {original})"));
    let log = attendance_repo::save_log(conn, log).await?;

    activity::record(
        conn,
        Activity::new(
            caller.id,
            action::ATTENDANCE_CORRECTED,
            entity::ATTENDANCE,
            log.id,
        )
        .title("퇴근 시간 수정")
        .metadata(json!({
            "work_date": kst::format_date(log.work_date),
            "original_check_out": original,
            "check_out": time_str,
        })),
    )
    .await;

    Ok(CorrectionOutcome {
        message: "퇴근 시간이 수정되었습니다.",
        log,
    })
}

#[derive(Debug, Serialize)]
pub struct PendingAutoCheckouts {
    pub logs: Vec<AttendanceLog>,
    pub count: usize,
}

pub async fn pending_auto_checkouts<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    caller: &User,
) -> Result<PendingAutoCheckouts, AppError> {
    let logs =
        attendance_repo::pending_auto_checkouts(conn, caller.id, PENDING_AUTO_CHECKOUT_LIMIT)
            .await?;
    let count = logs.len();
    Ok(PendingAutoCheckouts { logs, count })
}

#[derive(Debug, Serialize)]
pub struct AutoCheckoutEntry {
    pub id: i64,
    pub work_date: Date,
    #[serde(with = "time::serde::rfc3339::option")]
    pub check_in_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub check_out_at: Option<OffsetDateTime>,
}

pub async fn auto_checkout_history<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    caller: &User,
) -> Result<Vec<AutoCheckoutEntry>, AppError> {
    let logs =
        attendance_repo::auto_checkouts(conn, caller.id, AUTO_CHECKOUT_HISTORY_LIMIT).await?;
    Ok(logs
        .into_iter()
        .map(|l| AutoCheckoutEntry {
            id: l.id,
            work_date: l.work_date,
            check_in_at: l.check_in_at,
            check_out_at: l.check_out_at,
        })
        .collect())
}

// ---------------------------------------------------------------------------
// Realtime work status
// ---------------------------------------------------------------------------

/// The caller's presence; callers who never set one are off work.
pub async fn work_status<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    caller: &User,
) -> Result<UserWorkStatus, AppError> {
    let current = work_status_repo::find_for_user(conn, caller.id).await?;
    Ok(current.unwrap_or_else(|| UserWorkStatus {
        user_id: caller.id,
        status: WorkStatus::OffWork,
        updated_at: OffsetDateTime::now_utc(),
    }))
}

#[derive(Debug, Default, Deserialize)]
pub struct SetWorkStatus {
    pub status: Option<String>,
}

pub fn parse_work_status(raw: Option<&str>) -> Result<WorkStatus, AppError> {
    raw.and_then(|s| WorkStatus::try_from_value(&s.to_string()).ok())
        .ok_or_else(|| AppError::bad_request(ErrorCode::ValidationError, "Invalid status"))
}

pub async fn set_work_status<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    caller: &User,
    input: SetWorkStatus,
) -> Result<UserWorkStatus, AppError> {
    let status = parse_work_status(input.status.as_deref())?;
    Ok(work_status_repo::set_status(conn, caller.id, status).await?)
}

// ---------------------------------------------------------------------------
// Admin board
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DisplayStatus {
    OffWork,
    CheckedOut,
    Away,
    Overtime,
    Working,
}

/// Board label for one user's logs of a day. A break or meeting only shows
/// on today's board.
pub fn display_status(
    logs: &[&AttendanceLog],
    realtime: Option<WorkStatus>,
    is_today: bool,
) -> DisplayStatus {
    let checked_in = logs.iter().any(|l| l.check_in_at.is_some());
    let checked_out = !logs.is_empty() && logs.iter().all(|l| l.check_out_at.is_some());

    if !checked_in {
        DisplayStatus::OffWork
    } else if checked_out {
        DisplayStatus::CheckedOut
    } else if is_today && matches!(realtime, Some(WorkStatus::Break | WorkStatus::Meeting)) {
        DisplayStatus::Away
    } else if logs.iter().any(|l| l.is_overtime) {
        DisplayStatus::Overtime
    } else {
        DisplayStatus::Working
    }
}

#[derive(Debug, Serialize)]
pub struct BoardEntry {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub bu_code: Option<BuCode>,
    pub position: Option<String>,
    pub display_status: DisplayStatus,
    pub realtime_status: Option<WorkStatus>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub first_check_in: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub last_check_out: Option<OffsetDateTime>,
    pub is_overtime: bool,
    pub logs_count: usize,
}

pub fn board_entry(
    user: User,
    logs: &[&AttendanceLog],
    realtime: Option<WorkStatus>,
    is_today: bool,
) -> BoardEntry {
    BoardEntry {
        user_id: user.id,
        name: user.name,
        email: user.email,
        role: user.role,
        bu_code: user.bu_code,
        position: user.position,
        display_status: display_status(logs, realtime, is_today),
        realtime_status: realtime,
        first_check_in: logs.iter().filter_map(|l| l.check_in_at).min(),
        last_check_out: logs.iter().filter_map(|l| l.check_out_at).max(),
        is_overtime: logs.iter().any(|l| l.is_overtime),
        logs_count: logs.len(),
    }
}

#[derive(Debug, Default, PartialEq, Eq, Serialize)]
pub struct BoardStats {
    pub total: usize,
    pub working: usize,
    pub checked_out: usize,
    pub off_work: usize,
    pub away: usize,
    pub overtime: usize,
}

impl BoardStats {
    pub fn tally(entries: &[BoardEntry]) -> Self {
        let mut stats = Self {
            total: entries.len(),
            ..Self::default()
        };
        for entry in entries {
            match entry.display_status {
                DisplayStatus::Working => stats.working += 1,
                DisplayStatus::CheckedOut => stats.checked_out += 1,
                DisplayStatus::OffWork => stats.off_work += 1,
                DisplayStatus::Away => stats.away += 1,
                DisplayStatus::Overtime => stats.overtime += 1,
            }
        }
        stats
    }
}

#[derive(Debug, Serialize)]
pub struct AttendanceBoard {
    pub date: Date,
    pub is_today: bool,
    pub stats: BoardStats,
    pub users: Vec<BoardEntry>,
}

/// Every non-artist user's presence on `date` (default today, KST).
pub async fn admin_overview<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    caller: &User,
    date: Option<Date>,
    bu: Option<BuCode>,
) -> Result<AttendanceBoard, AppError> {
    if !can_view_all_attendance(&caller.actor()) {
        return Err(AppError::forbidden("Forbidden: Admin access required"));
    }
    let today = kst::today_kst();
    let date = date.unwrap_or(today);
    let is_today = date == today;

    let users = users_repo::list_staff(conn, bu).await?;
    let logs = attendance_repo::logs_between(conn, date, date).await?;
    let realtime = if is_today {
        let ids: Vec<Uuid> = users.iter().map(|u| u.id).collect();
        work_status_repo::statuses_of(conn, &ids).await?
    } else {
        HashMap::new()
    };

    let mut by_user: HashMap<Uuid, Vec<&AttendanceLog>> = HashMap::new();
    for log in &logs {
        by_user.entry(log.user_id).or_default().push(log);
    }

    let entries: Vec<BoardEntry> = users
        .into_iter()
        .map(|u| {
            let user_logs = by_user.get(&u.id).map(Vec::as_slice).unwrap_or(&[]);
            let realtime = realtime.get(&u.id).copied();
            board_entry(u, user_logs, realtime, is_today)
        })
        .collect();

    Ok(AttendanceBoard {
        date,
        is_today,
        stats: BoardStats::tally(&entries),
        users: entries,
    })
}

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

fn month_bounds(year: i32, month: u8) -> Result<(Date, Date), AppError> {
    let invalid = || AppError::invalid_with(ErrorCode::InvalidDate, "잘못된 연도/월입니다.");
    let month = Month::try_from(month).map_err(|_| invalid())?;
    let first = Date::from_calendar_date(year, month, 1).map_err(|_| invalid())?;
    let last = Date::from_calendar_date(year, month, month.length(year)).map_err(|_| invalid())?;
    Ok((first, last))
}

pub async fn monthly<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    caller: &User,
    user_id: Option<Uuid>,
    year: Option<i32>,
    month: Option<u8>,
) -> Result<MonthlyStats, AppError> {
    let target = viewable_user(conn, caller, user_id).await?;
    let today = kst::today_kst();
    let year = year.unwrap_or(today.year());
    let month = month.unwrap_or(today.month() as u8);
    let (first, last) = month_bounds(year, month)?;

    let logs = attendance_repo::list_for_user(conn, target, Some(first), Some(last)).await?;
    Ok(monthly_stats(&logs, year, month))
}

#[derive(Debug, Serialize)]
pub struct MemberMonth {
    pub user_id: Uuid,
    pub user_name: String,
    pub bu_code: Option<BuCode>,
    pub position: Option<String>,
    #[serde(rename = "totalWorkDays")]
    pub total_work_days: u32,
    #[serde(rename = "totalWorkMinutes")]
    pub total_work_minutes: i64,
    #[serde(rename = "averageWorkMinutes")]
    pub average_work_minutes: i64,
    #[serde(rename = "lateCount")]
    pub late_count: u32,
    #[serde(rename = "earlyLeaveCount")]
    pub early_leave_count: u32,
}

#[derive(Debug, Serialize)]
pub struct TeamStats {
    pub year: i32,
    pub month: u8,
    pub stats: Vec<MemberMonth>,
}

/// One row per user, most minutes worked first.
pub fn rank_members(
    users: Vec<User>,
    logs: &[AttendanceLog],
    year: i32,
    month: u8,
) -> Vec<MemberMonth> {
    let mut by_user: HashMap<Uuid, Vec<&AttendanceLog>> = HashMap::new();
    for log in logs {
        by_user.entry(log.user_id).or_default().push(log);
    }

    let mut rows: Vec<MemberMonth> = users
        .into_iter()
        .map(|u| {
            let stats = monthly_stats(
                by_user.get(&u.id).into_iter().flatten().copied(),
                year,
                month,
            );
            MemberMonth {
                user_id: u.id,
                user_name: u.name,
                bu_code: u.bu_code,
                position: u.position,
                total_work_days: stats.total_work_days,
                total_work_minutes: stats.total_work_minutes,
                average_work_minutes: stats.average_work_minutes,
                late_count: stats.late_count,
                early_leave_count: stats.early_leave_count,
            }
        })
        .collect();
    rows.sort_by(|a, b| b.total_work_minutes.cmp(&a.total_work_minutes));
    rows
}

pub async fn team_stats<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    caller: &User,
    year: Option<i32>,
    month: Option<u8>,
    bu: Option<BuCode>,
) -> Result<TeamStats, AppError> {
    if !can_view_all_attendance(&caller.actor()) {
        return Err(AppError::forbidden("Forbidden"));
    }
    let today = kst::today_kst();
    let year = year.unwrap_or(today.year());
    let month = month.unwrap_or(today.month() as u8);
    let (first, last) = month_bounds(year, month)?;

    let users = users_repo::list_staff(conn, bu).await?;
    let logs = attendance_repo::logs_between(conn, first, last).await?;
    Ok(TeamStats {
        year,
        month,
        stats: rank_members(users, &logs, year, month),
    })
}

// ---------------------------------------------------------------------------
// Cron
// ---------------------------------------------------------------------------

/// Close every log of today (KST) still missing a check-out at 18:00 KST and
/// tell the owner.
pub async fn auto_checkout<C>(conn: &C) -> Result<Value, AppError>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync,
{
    let today = kst::today_kst();
    let date = kst::format_date(today);
    let open = attendance_repo::open_on(conn, today).await?;

    if open.is_empty() {
        return Ok(json!({
            "message": "처리할 미퇴근 기록이 없습니다.",
            "processed": 0,
        }));
    }

    let check_out_at = kst::at_kst(today, AUTO_CHECKOUT_TIME);
    let mut processed = 0usize;
    for mut log in open {
        log.check_out_at = Some(check_out_at);
        log.is_auto_checkout = true;
        log.is_modified = true;
        log.modification_reason = Some(AUTO_CHECKOUT_REASON.to_string());
        let log = attendance_repo::save_log(conn, log).await?;
        processed += 1;

        activity::record(
            conn,
            Activity::new(log.user_id, action::AUTO_CHECK_OUT, entity::ATTENDANCE, log.id)
                .title("시스템 강제 퇴근")
                .metadata(json!({"work_date": date, "check_out": "18:00"})),
        )
        .await;

        let notice = Notice::new(
            log.user_id,
            "시스템 강제 퇴근 처리",
            format!("{date} 출근 기록이 퇴근 미처리로 자동 퇴근 처리되었습니다. 확인해주세요."),
        )
        .kind(NotificationType::Warning)
        .entity(entity::ATTENDANCE, log.id)
        .action_url("/attendance");
        notify(conn, notice).await;
    }

    info!(date = %date, processed, "auto-checkout finished");

    Ok(json!({
        "message": format!("{processed}건의 출근 기록이 강제 퇴근 처리되었습니다."),
        "processed": processed,
        "date": date,
    }))
}
