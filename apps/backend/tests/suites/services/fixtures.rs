use grigo_backend::entities::enums::{
    ApprovalStatus, AttendanceStatus, BuCode, LeaveGrantType, LeaveRequestType, LeaveType, Role,
    SettlementStatus, WorkRequestType,
};
use grigo_backend::entities::{
    app_users, attendance_logs, compensatory_requests, leave_balances, leave_grants,
    leave_requests, partner_settlements, work_requests,
};
use grigo_backend::repos::users::User;
use sea_orm::{DatabaseConnection, MockExecResult};
use time::macros::{date, datetime};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

pub const DAY: Date = date!(2025 - 03 - 04);
const STAMP: OffsetDateTime = datetime!(2025-03-01 00:00 UTC);

pub fn account(role: Role, bu: Option<BuCode>) -> app_users::Model {
    let id = Uuid::new_v4();
    app_users::Model {
        id,
        email: format!("{id}@grigo.test"),
        name: "테스터".into(),
        role,
        bu_code: bu,
        position: None,
        hire_date: None,
        auth_sub: None,
        created_at: STAMP,
        updated_at: STAMP,
    }
}

pub fn head_admin() -> User {
    account(Role::Admin, Some(BuCode::Head)).into()
}

pub fn attendance_log(
    user_id: Uuid,
    id: i64,
    check_in: Option<OffsetDateTime>,
    check_out: Option<OffsetDateTime>,
) -> attendance_logs::Model {
    attendance_logs::Model {
        id,
        user_id,
        work_date: DAY,
        check_in_at: check_in,
        check_out_at: check_out,
        status: AttendanceStatus::Present,
        is_overtime: false,
        is_auto_checkout: false,
        is_modified: false,
        user_confirmed: false,
        modification_reason: None,
        modified_by: None,
        created_at: STAMP,
        updated_at: STAMP,
    }
}

pub fn vacation_log(user_id: Uuid, id: i64) -> attendance_logs::Model {
    attendance_logs::Model {
        status: AttendanceStatus::Vacation,
        is_modified: true,
        modification_reason: Some("휴가 승인 (annual)".into()),
        ..attendance_log(user_id, id, None, None)
    }
}

pub fn leave_request(requester: Uuid, status: ApprovalStatus) -> leave_requests::Model {
    leave_requests::Model {
        id: 10,
        requester_id: requester,
        leave_type: LeaveRequestType::Annual,
        start_date: DAY,
        end_date: DAY,
        days_used: 1.0,
        reason: "가족 행사".into(),
        status,
        approver_id: None,
        approved_at: None,
        rejection_reason: None,
        created_at: STAMP,
        updated_at: STAMP,
    }
}

pub fn compensatory_request(
    requester: Uuid,
    status: ApprovalStatus,
) -> compensatory_requests::Model {
    compensatory_requests::Model {
        id: 20,
        requester_id: requester,
        days: 1.0,
        reason: "주말 행사 지원".into(),
        work_date: Some(DAY),
        status,
        approver_id: None,
        approved_at: None,
        rejection_reason: None,
        created_at: STAMP,
        updated_at: STAMP,
    }
}

pub fn work_request(requester: Uuid, status: ApprovalStatus) -> work_requests::Model {
    work_requests::Model {
        id: 30,
        requester_id: requester,
        request_type: WorkRequestType::RemoteWork,
        start_date: DAY,
        end_date: DAY,
        start_time: None,
        end_time: None,
        reason: "이사".into(),
        status,
        approver_id: None,
        approved_at: None,
        rejection_reason: None,
        created_at: STAMP,
        updated_at: STAMP,
    }
}

pub fn balance(user_id: Uuid, leave_type: LeaveType, total: f64, used: f64) -> leave_balances::Model {
    leave_balances::Model {
        id: 40,
        user_id,
        leave_type,
        year: 2025,
        total_days: total,
        used_days: used,
        created_at: STAMP,
        updated_at: STAMP,
    }
}

pub fn grant(user_id: Uuid, leave_type: LeaveType, grant_type: LeaveGrantType) -> leave_grants::Model {
    leave_grants::Model {
        id: 50,
        user_id,
        leave_type,
        grant_type,
        days: 1.0,
        reason: None,
        granted_by: None,
        granted_at: OffsetDateTime::now_utc(),
        year: 2025,
    }
}

pub fn settlement(status: SettlementStatus) -> partner_settlements::Model {
    partner_settlements::Model {
        id: 60,
        partner_id: 2,
        period_start: date!(2025 - 01 - 01),
        period_end: date!(2025 - 03 - 31),
        total_revenue: 10_000,
        total_expense: 4_000,
        net_profit: 6_000,
        partner_amount: 3_000,
        company_amount: 3_000,
        status,
        memo: None,
        created_by: None,
        confirmed_at: None,
        paid_at: None,
        created_at: STAMP,
        updated_at: STAMP,
    }
}

pub fn rows_affected(n: u64) -> MockExecResult {
    MockExecResult {
        last_insert_id: 0,
        rows_affected: n,
    }
}

/// SQL of every logged transaction, statement by statement.
pub fn sql_log(db: DatabaseConnection) -> Vec<Vec<String>> {
    db.into_transaction_log()
        .into_iter()
        .map(|txn| txn.statements().iter().map(|s| s.sql.clone()).collect())
        .collect()
}

/// The first logged transaction that opened with `BEGIN`.
pub fn first_transaction(log: &[Vec<String>]) -> &[String] {
    log.iter()
        .find(|stmts| stmts.first().is_some_and(|s| s == "BEGIN"))
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

pub fn count_prefixed(stmts: &[String], prefix: &str) -> usize {
    stmts.iter().filter(|s| s.starts_with(prefix)).count()
}

pub fn all_statements(log: &[Vec<String>]) -> Vec<String> {
    log.iter().flatten().cloned().collect()
}
