// Monthly accrual runs once per day: a second trigger finds the grant made
// earlier and writes nothing.

use grigo_backend::domain::kst;
use grigo_backend::entities::app_users;
use grigo_backend::entities::enums::{BuCode, LeaveGrantType, LeaveType, Role};
use grigo_backend::entities::{leave_balances, leave_grants};
use grigo_backend::services::leave;
use sea_orm::{DatabaseBackend, MockDatabase};

use super::fixtures::{account, all_statements, balance, count_prefixed, grant, sql_log};

fn hired_today() -> app_users::Model {
    app_users::Model {
        hire_date: Some(kst::today_kst()),
        ..account(Role::Member, Some(BuCode::Grigo))
    }
}

#[tokio::test]
async fn monthly_grant_is_written_with_its_balance() {
    let user = hired_today();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![user.clone()]])
        .append_query_results([Vec::<leave_grants::Model>::new()])
        .append_query_results([vec![grant(user.id, LeaveType::Annual, LeaveGrantType::AutoMonthly)]])
        .append_query_results([Vec::<leave_balances::Model>::new()])
        .append_query_results([vec![balance(user.id, LeaveType::Annual, 1.0, 0.0)]])
        .into_connection();

    let summary = leave::auto_generate_monthly(&db).await.unwrap();
    assert_eq!(summary["processed"], 1);
    assert_eq!(summary["skipped"], 0);
    assert!(summary.get("errors").is_none());

    let log = sql_log(db);
    let grant_txn = log
        .iter()
        .find(|stmts| count_prefixed(stmts, r#"INSERT INTO "leave_grants""#) == 1)
        .expect("grant transaction");
    assert_eq!(grant_txn.first().map(String::as_str), Some("BEGIN"));
    assert_eq!(count_prefixed(grant_txn, r#"INSERT INTO "leave_balances""#), 1);
    assert_eq!(grant_txn.last().map(String::as_str), Some("COMMIT"));
}

#[tokio::test]
async fn second_run_on_the_same_day_skips() {
    let user = hired_today();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![user.clone()]])
        .append_query_results([vec![grant(user.id, LeaveType::Annual, LeaveGrantType::AutoMonthly)]])
        .into_connection();

    let summary = leave::auto_generate_monthly(&db).await.unwrap();
    assert_eq!(summary["processed"], 0);
    assert_eq!(summary["skipped"], 1);

    let statements = all_statements(&sql_log(db));
    assert_eq!(count_prefixed(&statements, "INSERT"), 0);
    assert_eq!(count_prefixed(&statements, "UPDATE"), 0);
}

#[tokio::test]
async fn no_hire_dates_means_nothing_to_do() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<app_users::Model>::new()])
        .into_connection();

    let summary = leave::auto_generate_monthly(&db).await.unwrap();
    assert_eq!(summary["processed"], 0);
}
