// Check-in/check-out decisions against the logs already recorded today.

use grigo_backend::entities::attendance_logs;
use grigo_backend::errors::ErrorCode;
use grigo_backend::services::attendance;
use sea_orm::{DatabaseBackend, MockDatabase, Value};
use time::macros::datetime;

use super::fixtures::{attendance_log, count_prefixed, head_admin, sql_log, vacation_log};

const INSERT_LOG: &str = r#"INSERT INTO "attendance_logs""#;
const UPDATE_LOG: &str = r#"UPDATE "attendance_logs""#;

#[tokio::test]
async fn check_in_is_allowed_on_a_vacation_only_day() {
    let caller = head_admin();
    let created = attendance_log(caller.id, 2, Some(datetime!(2025-03-04 00:00 UTC)), None);
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![vacation_log(caller.id, 1)]])
        .append_query_results([vec![created.clone()]])
        .into_connection();

    let log = attendance::check_in(&db, &caller).await.unwrap();
    assert_eq!(log.id, created.id);

    let log = db.into_transaction_log();
    let insert = log
        .iter()
        .flat_map(|t| t.statements())
        .find(|s| s.sql.starts_with(INSERT_LOG))
        .expect("attendance insert");
    let values = insert.values.as_ref().expect("bound values");
    assert!(
        !values.0.contains(&Value::Bool(Some(true))),
        "a vacation log must not turn the first check-in into overtime"
    );
}

#[tokio::test]
async fn check_in_after_a_closed_session_is_overtime() {
    let caller = head_admin();
    let closed = attendance_log(
        caller.id,
        1,
        Some(datetime!(2025-03-04 00:00 UTC)),
        Some(datetime!(2025-03-04 09:00 UTC)),
    );
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![closed.clone()]])
        .append_query_results([vec![attendance_logs::Model {
            id: 2,
            is_overtime: true,
            ..closed
        }]])
        .into_connection();

    attendance::check_in(&db, &caller).await.unwrap();

    let log = db.into_transaction_log();
    let insert = log
        .iter()
        .flat_map(|t| t.statements())
        .find(|s| s.sql.starts_with(INSERT_LOG))
        .expect("attendance insert");
    let values = insert.values.as_ref().expect("bound values");
    assert!(values.0.contains(&Value::Bool(Some(true))));
}

#[tokio::test]
async fn second_check_in_while_open_is_rejected() {
    let caller = head_admin();
    let open = attendance_log(caller.id, 1, Some(datetime!(2025-03-04 00:00 UTC)), None);
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![vacation_log(caller.id, 2), open]])
        .into_connection();

    let err = attendance::check_in(&db, &caller).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::AlreadyCheckedIn);

    let log = sql_log(db);
    assert_eq!(count_prefixed(&log.concat(), INSERT_LOG), 0);
}

#[tokio::test]
async fn check_out_without_check_in_is_rejected() {
    let caller = head_admin();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![vacation_log(caller.id, 1)]])
        .into_connection();

    let err = attendance::check_out(&db, &caller).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotCheckedIn);
    assert_eq!(err.status().as_u16(), 400);

    let log = sql_log(db);
    assert_eq!(count_prefixed(&log.concat(), UPDATE_LOG), 0);
}

#[tokio::test]
async fn check_out_closes_the_open_session_not_the_vacation_log() {
    let caller = head_admin();
    let open = attendance_log(caller.id, 7, Some(datetime!(2025-03-04 00:00 UTC)), None);
    let closed = attendance_logs::Model {
        check_out_at: Some(datetime!(2025-03-04 09:00 UTC)),
        ..open.clone()
    };
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![vacation_log(caller.id, 1), open]])
        .append_query_results([vec![closed]])
        .into_connection();

    let log = attendance::check_out(&db, &caller).await.unwrap();
    assert_eq!(log.id, 7);
    assert!(log.check_out_at.is_some());

    let log = db.into_transaction_log();
    let update = log
        .iter()
        .flat_map(|t| t.statements())
        .find(|s| s.sql.starts_with(UPDATE_LOG))
        .expect("attendance update");
    let values = update.values.as_ref().expect("bound values");
    assert!(values.0.contains(&Value::BigInt(Some(7))));
    assert!(!values.0.contains(&Value::BigInt(Some(1))));
}

#[tokio::test]
async fn check_out_twice_is_rejected() {
    let caller = head_admin();
    let closed = attendance_log(
        caller.id,
        1,
        Some(datetime!(2025-03-04 00:00 UTC)),
        Some(datetime!(2025-03-04 09:00 UTC)),
    );
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![closed]])
        .into_connection();

    let err = attendance::check_out(&db, &caller).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::AlreadyCheckedOut);
}
