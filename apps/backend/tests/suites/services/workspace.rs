// Manuals, task templates and the realtime work status.

use grigo_backend::entities::enums::{BuCode, Role, WorkStatus};
use grigo_backend::entities::{manuals, user_work_status};
use grigo_backend::errors::ErrorCode;
use grigo_backend::repos::users::User;
use grigo_backend::services::attendance::{self, SetWorkStatus};
use grigo_backend::services::manuals::{self as manuals_svc, CreateManual};
use grigo_backend::services::task_templates::{self, GenerateTasks};
use sea_orm::{DatabaseBackend, MockDatabase};
use serde_json::json;
use time::macros::datetime;

use super::fixtures::{account, all_statements, count_prefixed, head_admin, rows_affected, sql_log};

fn manual(bu: BuCode) -> manuals::Model {
    manuals::Model {
        id: 7,
        bu_code: bu,
        title: "촬영 체크리스트".into(),
        category: "production".into(),
        content: json!([]),
        is_active: true,
        author_id: None,
        author_name: None,
        created_at: datetime!(2025-03-01 00:00 UTC),
        updated_at: datetime!(2025-03-01 00:00 UTC),
    }
}

#[tokio::test]
async fn leaders_cannot_delete_another_units_manual() {
    let leader: User = account(Role::Leader, Some(BuCode::Grigo)).into();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![manual(BuCode::Flow)]])
        .into_connection();

    let err = manuals_svc::delete(&db, &leader, 7).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::Forbidden);

    let stmts = all_statements(&sql_log(db));
    assert_eq!(count_prefixed(&stmts, r#"DELETE FROM "manuals""#), 0);
}

#[tokio::test]
async fn admins_delete_any_manual() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![manual(BuCode::Flow)]])
        .append_exec_results([rows_affected(1)])
        .into_connection();

    manuals_svc::delete(&db, &head_admin(), 7).await.unwrap();

    let stmts = all_statements(&sql_log(db));
    assert_eq!(count_prefixed(&stmts, r#"DELETE FROM "manuals""#), 1);
}

#[tokio::test]
async fn manual_creation_checks_fields_before_permissions() {
    let member: User = account(Role::Member, Some(BuCode::Grigo)).into();
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

    let err = manuals_svc::create(
        &db,
        &member,
        CreateManual {
            bu_code: Some(BuCode::Grigo),
            title: Some("  ".into()),
            category: Some("guide".into()),
            content: None,
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.code(), ErrorCode::MissingRequiredFields);

    let err = manuals_svc::create(
        &db,
        &member,
        CreateManual {
            bu_code: Some(BuCode::Grigo),
            title: Some("안내".into()),
            category: Some("guide".into()),
            content: None,
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.code(), ErrorCode::Forbidden);
    assert!(all_statements(&sql_log(db)).is_empty());
}

#[tokio::test]
async fn generating_nothing_is_rejected_without_touching_the_database() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

    let err = task_templates::generate(
        &db,
        &head_admin(),
        GenerateTasks {
            template_id: Some(1),
            project_id: Some(3),
            tasks: Vec::new(),
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.code(), ErrorCode::BadRequest);
    assert!(all_statements(&sql_log(db)).is_empty());
}

#[tokio::test]
async fn work_status_is_upserted_per_user() {
    let caller = head_admin();
    let stored = user_work_status::Model {
        user_id: caller.id,
        status: WorkStatus::Meeting,
        updated_at: datetime!(2025-03-04 02:00 UTC),
    };
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![stored]])
        .into_connection();

    let out = attendance::set_work_status(
        &db,
        &caller,
        SetWorkStatus {
            status: Some("MEETING".into()),
        },
    )
    .await
    .unwrap();
    assert_eq!(out.status, WorkStatus::Meeting);

    let stmts = all_statements(&sql_log(db));
    assert!(stmts.iter().any(|s| s.starts_with(r#"INSERT INTO "user_work_status""#)
        && s.contains("ON CONFLICT")));
}

#[tokio::test]
async fn unknown_work_status_never_reaches_the_database() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

    let err = attendance::set_work_status(
        &db,
        &head_admin(),
        SetWorkStatus {
            status: Some("NAPPING".into()),
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.code(), ErrorCode::ValidationError);
    assert!(all_statements(&sql_log(db)).is_empty());
}
