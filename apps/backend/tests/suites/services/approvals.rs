// Approve/reject paths: the pending check and every write of a decision
// happen inside one transaction that holds the request row.

use grigo_backend::entities::enums::{ApprovalStatus, BuCode, LeaveGrantType, LeaveType, Role};
use grigo_backend::entities::{
    attendance_logs, compensatory_requests, leave_balances, leave_requests, work_requests,
};
use grigo_backend::errors::ErrorCode;
use grigo_backend::services::{leave, work_requests as work_requests_svc};
use sea_orm::{DatabaseBackend, MockDatabase};
use time::macros::datetime;

use super::fixtures::{
    account, attendance_log, balance, compensatory_request, count_prefixed, first_transaction,
    grant, head_admin, leave_request, sql_log, work_request,
};

fn locked_read(stmts: &[String], table: &str) -> bool {
    let from = format!(r#"FROM "{table}""#);
    stmts
        .iter()
        .any(|s| s.starts_with("SELECT") && s.contains(&from) && s.ends_with("FOR UPDATE"))
}

#[tokio::test]
async fn leave_approval_writes_status_balance_and_vacation_logs_together() {
    let caller = head_admin();
    let requester = account(Role::Member, Some(BuCode::Grigo));
    let pending = leave_request(requester.id, ApprovalStatus::Pending);
    let approved = leave_requests::Model {
        status: ApprovalStatus::Approved,
        approver_id: Some(caller.id),
        approved_at: Some(datetime!(2025-03-03 00:00 UTC)),
        ..pending.clone()
    };
    let existing = balance(requester.id, LeaveType::Annual, 15.0, 2.0);
    // Two punches already on the leave day: both become vacation.
    let morning = attendance_log(requester.id, 1, Some(datetime!(2025-03-04 00:00 UTC)), None);
    let overtime = attendance_log(requester.id, 2, Some(datetime!(2025-03-04 10:00 UTC)), None);

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![pending]])
        .append_query_results([vec![requester.clone()]])
        .append_query_results([vec![approved.clone()]])
        .append_query_results([vec![existing.clone()]])
        .append_query_results([vec![leave_balances::Model {
            used_days: 3.0,
            ..existing
        }]])
        .append_query_results([vec![overtime.clone(), morning.clone()]])
        .append_query_results([vec![overtime]])
        .append_query_results([vec![morning]])
        .into_connection();

    let out = leave::approve_request(&db, &caller, 10).await.unwrap();
    assert_eq!(out.status, ApprovalStatus::Approved);

    let log = sql_log(db);
    let txn = first_transaction(&log);
    assert_eq!(txn.first().map(String::as_str), Some("BEGIN"));
    assert_eq!(txn.last().map(String::as_str), Some("COMMIT"));
    assert!(locked_read(txn, "leave_requests"));
    assert_eq!(count_prefixed(txn, r#"UPDATE "leave_requests""#), 1);
    assert_eq!(count_prefixed(txn, r#"UPDATE "leave_balances""#), 1);
    assert_eq!(count_prefixed(txn, r#"UPDATE "attendance_logs""#), 2);
}

#[tokio::test]
async fn leave_approval_without_prior_logs_creates_a_vacation_day() {
    let caller = head_admin();
    let requester = account(Role::Member, Some(BuCode::Flow));
    let pending = leave_request(requester.id, ApprovalStatus::Pending);
    let approved = leave_requests::Model {
        status: ApprovalStatus::Approved,
        ..pending.clone()
    };

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![pending]])
        .append_query_results([vec![requester.clone()]])
        .append_query_results([vec![approved]])
        .append_query_results([Vec::<leave_balances::Model>::new()])
        .append_query_results([vec![balance(requester.id, LeaveType::Annual, 0.0, 1.0)]])
        .append_query_results([Vec::<attendance_logs::Model>::new()])
        .append_query_results([vec![attendance_log(requester.id, 3, None, None)]])
        .into_connection();

    leave::approve_request(&db, &caller, 10).await.unwrap();

    let log = sql_log(db);
    let txn = first_transaction(&log);
    assert_eq!(txn.last().map(String::as_str), Some("COMMIT"));
    assert_eq!(count_prefixed(txn, r#"INSERT INTO "leave_balances""#), 1);
    assert_eq!(count_prefixed(txn, r#"INSERT INTO "attendance_logs""#), 1);
}

#[tokio::test]
async fn decided_leave_request_is_not_decided_again() {
    let caller = head_admin();
    let requester = account(Role::Member, Some(BuCode::Grigo));

    for status in [ApprovalStatus::Approved, ApprovalStatus::Rejected] {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![leave_request(requester.id, status)]])
            .into_connection();

        let err = leave::approve_request(&db, &caller, 10).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::AlreadyProcessed);

        let log = sql_log(db);
        let txn = first_transaction(&log);
        assert!(locked_read(txn, "leave_requests"));
        assert_eq!(txn.last().map(String::as_str), Some("ROLLBACK"));
        assert_eq!(count_prefixed(txn, "UPDATE"), 0);
    }
}

#[tokio::test]
async fn leave_rejection_checks_pending_inside_its_transaction() {
    let caller = head_admin();
    let requester = account(Role::Member, Some(BuCode::Grigo));
    let pending = leave_request(requester.id, ApprovalStatus::Pending);
    let rejected = leave_requests::Model {
        status: ApprovalStatus::Rejected,
        rejection_reason: Some("인원 부족".into()),
        ..pending.clone()
    };
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![pending]])
        .append_query_results([vec![requester]])
        .append_query_results([vec![rejected]])
        .into_connection();

    let input = leave::RejectRequest {
        rejection_reason: Some("인원 부족".into()),
    };
    let out = leave::reject_request(&db, &caller, 10, input).await.unwrap();
    assert_eq!(out.status, ApprovalStatus::Rejected);

    let log = sql_log(db);
    let txn = first_transaction(&log);
    assert!(locked_read(txn, "leave_requests"));
    assert_eq!(count_prefixed(txn, r#"UPDATE "leave_requests""#), 1);
    assert_eq!(txn.last().map(String::as_str), Some("COMMIT"));
}

#[tokio::test]
async fn compensatory_approval_grants_in_the_same_transaction() {
    let caller = head_admin();
    let requester = account(Role::Member, Some(BuCode::Grigo));
    let pending = compensatory_request(requester.id, ApprovalStatus::Pending);
    let approved = compensatory_requests::Model {
        status: ApprovalStatus::Approved,
        ..pending.clone()
    };
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![pending]])
        .append_query_results([vec![approved]])
        .append_query_results([vec![grant(
            requester.id,
            LeaveType::Compensatory,
            LeaveGrantType::CompensatoryApproved,
        )]])
        .append_query_results([Vec::<leave_balances::Model>::new()])
        .append_query_results([vec![balance(requester.id, LeaveType::Compensatory, 1.0, 0.0)]])
        .into_connection();

    leave::approve_compensatory(&db, &caller, 20).await.unwrap();

    let log = sql_log(db);
    let txn = first_transaction(&log);
    assert!(locked_read(txn, "compensatory_requests"));
    assert_eq!(count_prefixed(txn, r#"UPDATE "compensatory_requests""#), 1);
    assert_eq!(count_prefixed(txn, r#"INSERT INTO "leave_grants""#), 1);
    assert_eq!(count_prefixed(txn, r#"INSERT INTO "leave_balances""#), 1);
    assert_eq!(txn.last().map(String::as_str), Some("COMMIT"));
}

#[tokio::test]
async fn decided_compensatory_request_grants_nothing() {
    let caller = head_admin();
    let requester = account(Role::Member, Some(BuCode::Grigo));
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![compensatory_request(
            requester.id,
            ApprovalStatus::Approved,
        )]])
        .into_connection();

    let err = leave::approve_compensatory(&db, &caller, 20).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::AlreadyProcessed);

    let log = sql_log(db);
    let all = log.concat();
    assert_eq!(count_prefixed(&all, r#"INSERT INTO "leave_grants""#), 0);
}

#[tokio::test]
async fn work_request_decisions_lock_and_guard_pending() {
    let caller = head_admin();
    let requester = account(Role::Member, Some(BuCode::Grigo));
    let pending = work_request(requester.id, ApprovalStatus::Pending);
    let approved = work_requests::Model {
        status: ApprovalStatus::Approved,
        ..pending.clone()
    };
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![pending]])
        .append_query_results([vec![requester.clone()]])
        .append_query_results([vec![approved]])
        .into_connection();

    let out = work_requests_svc::approve(&db, &caller, 30).await.unwrap();
    assert_eq!(out.status, ApprovalStatus::Approved);
    let log = sql_log(db);
    let txn = first_transaction(&log);
    assert!(locked_read(txn, "work_requests"));
    assert_eq!(count_prefixed(txn, r#"UPDATE "work_requests""#), 1);
    assert_eq!(txn.last().map(String::as_str), Some("COMMIT"));

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![work_request(requester.id, ApprovalStatus::Rejected)]])
        .into_connection();
    let input = work_requests_svc::RejectWorkRequest {
        rejection_reason: Some("중복 신청".into()),
    };
    let err = work_requests_svc::reject(&db, &caller, 30, input).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::AlreadyProcessed);
    let log = sql_log(db);
    assert_eq!(count_prefixed(&log.concat(), "UPDATE"), 0);
}
