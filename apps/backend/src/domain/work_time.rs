//! Worked-time arithmetic for attendance logs.

use serde::Serialize;
use time::{Date, Month, OffsetDateTime};

use super::kst;
use crate::entities::attendance_logs;
use crate::entities::enums::AttendanceStatus;

pub const STANDARD_WORK_MINUTES: i64 = 8 * 60;
pub const LUNCH_BREAK_MINUTES: i64 = 60;
pub const STANDARD_CHECK_IN_HOUR: u8 = 9;

/// Minutes worked minus lunch; `None` unless both ends exist and are ordered.
pub fn work_time_minutes(
    check_in: Option<OffsetDateTime>,
    check_out: Option<OffsetDateTime>,
) -> Option<i64> {
    let (check_in, check_out) = (check_in?, check_out?);
    if check_out <= check_in {
        return None;
    }
    let total = (check_out - check_in).whole_minutes();
    Some((total - LUNCH_BREAK_MINUTES).max(0))
}

/// Any check-in after 09:00 KST.
pub fn is_late(check_in: Option<OffsetDateTime>) -> bool {
    let Some(check_in) = check_in else {
        return false;
    };
    let local = kst::to_kst(check_in);
    local.hour() > STANDARD_CHECK_IN_HOUR
        || (local.hour() == STANDARD_CHECK_IN_HOUR && local.minute() > 0)
}

pub fn is_early_leave(check_out: Option<OffsetDateTime>, minutes: Option<i64>) -> bool {
    match (check_out, minutes) {
        (Some(_), Some(m)) => m < STANDARD_WORK_MINUTES,
        _ => false,
    }
}

pub fn determine_status(
    check_in: Option<OffsetDateTime>,
    check_out: Option<OffsetDateTime>,
    minutes: Option<i64>,
) -> AttendanceStatus {
    if check_in.is_none() {
        AttendanceStatus::Absent
    } else if is_late(check_in) {
        AttendanceStatus::Late
    } else if is_early_leave(check_out, minutes) {
        AttendanceStatus::EarlyLeave
    } else {
        AttendanceStatus::Present
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStats {
    pub date: Date,
    pub work_time_minutes: i64,
    #[serde(with = "time::serde::rfc3339::option")]
    pub check_in_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub check_out_at: Option<OffsetDateTime>,
    pub status: AttendanceStatus,
    pub is_late: bool,
    pub is_early_leave: bool,
}

pub fn daily_stats(log: &attendance_logs::Model) -> DailyStats {
    let minutes = work_time_minutes(log.check_in_at, log.check_out_at);
    DailyStats {
        date: log.work_date,
        work_time_minutes: minutes.unwrap_or(0),
        check_in_at: log.check_in_at,
        check_out_at: log.check_out_at,
        status: log.status,
        is_late: is_late(log.check_in_at),
        is_early_leave: is_early_leave(log.check_out_at, minutes),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyStats {
    pub year: i32,
    pub month: u8,
    pub total_work_days: u32,
    pub total_work_minutes: i64,
    pub average_work_minutes: i64,
    pub late_count: u32,
    pub early_leave_count: u32,
    pub absent_count: u32,
    pub vacation_count: u32,
    pub remote_count: u32,
    pub external_count: u32,
}

/// Aggregate the logs whose `work_date` falls in `year`-`month`; others are
/// ignored.
pub fn monthly_stats<'a>(
    logs: impl IntoIterator<Item = &'a attendance_logs::Model>,
    year: i32,
    month: u8,
) -> MonthlyStats {
    let mut stats = MonthlyStats {
        year,
        month,
        ..MonthlyStats::default()
    };
    let Ok(month_enum) = Month::try_from(month) else {
        return stats;
    };

    for log in logs.into_iter().filter(|l| {
        l.work_date.year() == year && l.work_date.month() == month_enum
    }) {
        let minutes = work_time_minutes(log.check_in_at, log.check_out_at);
        if let Some(m) = minutes {
            stats.total_work_minutes += m;
            if m > 0 {
                stats.total_work_days += 1;
            }
        }
        match log.status {
            AttendanceStatus::Late => stats.late_count += 1,
            AttendanceStatus::EarlyLeave => stats.early_leave_count += 1,
            AttendanceStatus::Absent => stats.absent_count += 1,
            AttendanceStatus::Vacation => stats.vacation_count += 1,
            AttendanceStatus::Remote => stats.remote_count += 1,
            AttendanceStatus::External => stats.external_count += 1,
            AttendanceStatus::Present => {}
        }
    }

    if stats.total_work_days > 0 {
        let avg = stats.total_work_minutes as f64 / f64::from(stats.total_work_days);
        stats.average_work_minutes = super::settlement::round_half_up(avg);
    }
    stats
}

/// "N분", "N시간" or "N시간 M분".
pub fn format_work_time(minutes: i64) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;
    match (hours, mins) {
        (0, m) => format!("{m}분"),
        (h, 0) => format!("{h}시간"),
        (h, m) => format!("{h}시간 {m}분"),
    }
}
