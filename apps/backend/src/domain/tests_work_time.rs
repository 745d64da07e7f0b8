use time::macros::{date, datetime};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use super::work_time::*;
use crate::entities::attendance_logs;
use crate::entities::enums::AttendanceStatus;

fn log(
    work_date: Date,
    check_in_at: Option<OffsetDateTime>,
    check_out_at: Option<OffsetDateTime>,
    status: AttendanceStatus,
) -> attendance_logs::Model {
    let stamp = datetime!(2025-03-01 00:00 UTC);
    attendance_logs::Model {
        id: 1,
        user_id: Uuid::nil(),
        work_date,
        check_in_at,
        check_out_at,
        status,
        is_overtime: false,
        is_auto_checkout: false,
        is_modified: false,
        user_confirmed: false,
        modification_reason: None,
        modified_by: None,
        created_at: stamp,
        updated_at: stamp,
    }
}

#[test]
fn lateness_is_judged_on_the_korean_clock() {
    // 00:00 UTC is 09:00 KST.
    assert!(!is_late(Some(datetime!(2025-03-04 00:00 UTC))));
    assert!(is_late(Some(datetime!(2025-03-04 00:01 UTC))));
    assert!(!is_late(Some(datetime!(2025-03-03 23:59 UTC))));
    assert!(is_late(Some(datetime!(2025-03-04 10:00 +09:00))));
    assert!(!is_late(None));
}

#[test]
fn lunch_hour_is_deducted() {
    let check_in = Some(datetime!(2025-03-04 09:00 +09:00));
    let check_out = Some(datetime!(2025-03-04 18:00 +09:00));
    assert_eq!(work_time_minutes(check_in, check_out), Some(480));

    let short = Some(datetime!(2025-03-04 09:30 +09:00));
    assert_eq!(work_time_minutes(check_in, short), Some(0));

    assert_eq!(work_time_minutes(check_out, check_in), None);
    assert_eq!(work_time_minutes(check_in, None), None);
}

#[test]
fn status_prefers_absent_then_late_then_early_leave() {
    let on_time = Some(datetime!(2025-03-04 09:00 +09:00));
    let late = Some(datetime!(2025-03-04 09:10 +09:00));
    let early_out = Some(datetime!(2025-03-04 17:00 +09:00));
    let full_out = Some(datetime!(2025-03-04 18:00 +09:00));

    let status = |i, o| determine_status(i, o, work_time_minutes(i, o));
    assert_eq!(status(None, None), AttendanceStatus::Absent);
    assert_eq!(status(late, early_out), AttendanceStatus::Late);
    assert_eq!(status(on_time, early_out), AttendanceStatus::EarlyLeave);
    assert_eq!(status(on_time, full_out), AttendanceStatus::Present);
    assert_eq!(status(on_time, None), AttendanceStatus::Present);
}

#[test]
fn daily_stats_for_open_shift() {
    let l = log(
        date!(2025 - 03 - 04),
        Some(datetime!(2025-03-04 09:20 +09:00)),
        None,
        AttendanceStatus::Late,
    );
    let s = daily_stats(&l);
    assert_eq!(s.work_time_minutes, 0);
    assert!(s.is_late);
    assert!(!s.is_early_leave);

    let json = serde_json::to_value(&s).unwrap();
    assert_eq!(json["workTimeMinutes"], 0);
    assert_eq!(json["isLate"], true);
    assert!(json["checkOutAt"].is_null());
}

#[test]
fn monthly_stats_aggregates_only_the_requested_month() {
    let logs = vec![
        log(
            date!(2025 - 03 - 03),
            Some(datetime!(2025-03-03 09:00 +09:00)),
            Some(datetime!(2025-03-03 18:00 +09:00)),
            AttendanceStatus::Present,
        ),
        log(
            date!(2025 - 03 - 04),
            Some(datetime!(2025-03-04 09:30 +09:00)),
            Some(datetime!(2025-03-04 18:30 +09:00)),
            AttendanceStatus::Late,
        ),
        log(date!(2025 - 03 - 05), None, None, AttendanceStatus::Absent),
        log(
            date!(2025 - 03 - 06),
            Some(datetime!(2025-03-06 09:00 +09:00)),
            Some(datetime!(2025-03-06 17:59 +09:00)),
            AttendanceStatus::EarlyLeave,
        ),
        log(
            date!(2025 - 02 - 28),
            Some(datetime!(2025-02-28 09:00 +09:00)),
            Some(datetime!(2025-02-28 18:00 +09:00)),
            AttendanceStatus::Remote,
        ),
    ];

    let s = monthly_stats(&logs, 2025, 3);
    assert_eq!(s.total_work_days, 3);
    assert_eq!(s.total_work_minutes, 480 + 480 + 479);
    assert_eq!(s.average_work_minutes, 480);
    assert_eq!(s.late_count, 1);
    assert_eq!(s.early_leave_count, 1);
    assert_eq!(s.absent_count, 1);
    assert_eq!(s.remote_count, 0);
}

#[test]
fn monthly_stats_of_empty_or_invalid_month() {
    let empty: Vec<attendance_logs::Model> = Vec::new();
    let s = monthly_stats(&empty, 2025, 4);
    assert_eq!(s.average_work_minutes, 0);
    assert_eq!(s.month, 4);

    let s = monthly_stats(&empty, 2025, 13);
    assert_eq!(s.total_work_days, 0);
}

#[test]
fn work_time_rendering() {
    assert_eq!(format_work_time(45), "45분");
    assert_eq!(format_work_time(120), "2시간");
    assert_eq!(format_work_time(485), "8시간 5분");
}
