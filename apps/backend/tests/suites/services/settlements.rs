// Only draft settlements can be deleted.

use grigo_backend::entities::enums::{BuCode, Role, SettlementStatus};
use grigo_backend::errors::ErrorCode;
use grigo_backend::repos::users::User;
use grigo_backend::services::settlements;
use sea_orm::{DatabaseBackend, MockDatabase};

use super::fixtures::{
    account, all_statements, count_prefixed, head_admin, rows_affected, settlement, sql_log,
};

const DELETE: &str = r#"DELETE FROM "partner_settlements""#;

#[tokio::test]
async fn draft_settlement_is_deleted() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![settlement(SettlementStatus::Draft)]])
        .append_exec_results([rows_affected(1)])
        .into_connection();

    settlements::delete(&db, &head_admin(), 60).await.unwrap();

    let statements = all_statements(&sql_log(db));
    assert_eq!(count_prefixed(&statements, DELETE), 1);
}

#[tokio::test]
async fn confirmed_or_paid_settlement_is_kept() {
    for status in [SettlementStatus::Confirmed, SettlementStatus::Paid] {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![settlement(status)]])
            .into_connection();

        let err = settlements::delete(&db, &head_admin(), 60).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::SettlementNotDraft);

        let statements = all_statements(&sql_log(db));
        assert_eq!(count_prefixed(&statements, DELETE), 0);
    }
}

#[tokio::test]
async fn non_admin_never_reaches_the_database() {
    let leader: User = account(Role::Leader, Some(BuCode::Head)).into();
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

    let err = settlements::delete(&db, &leader, 60).await.unwrap_err();
    assert_eq!(err.status().as_u16(), 403);
    assert!(sql_log(db).is_empty());
}
