use sea_orm::Statement;
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::extension::postgres::Type as PgType;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Postgres enum types owned by this migration, in creation order.
const ENUMS: &[(&str, &[&str])] = &[
    ("bu_code", &["GRIGO", "REACT", "FLOW", "AST", "MODOO", "HEAD"]),
    (
        "user_role",
        &["admin", "leader", "manager", "member", "viewer", "artist"],
    ),
    ("task_status", &["todo", "in_progress", "done"]),
    ("task_priority", &["high", "medium", "low"]),
    ("financial_kind", &["revenue", "expense"]),
    ("financial_status", &["planned", "paid", "canceled"]),
    ("settlement_status", &["draft", "confirmed", "paid"]),
    (
        "attendance_status",
        &[
            "present",
            "late",
            "early_leave",
            "absent",
            "vacation",
            "remote",
            "external",
        ],
    ),
    (
        "work_request_type",
        &[
            "external_work",
            "remote_work",
            "overtime",
            "attendance_correction",
        ],
    ),
    ("approval_status", &["pending", "approved", "rejected"]),
    ("notification_type", &["info", "success", "warning", "error"]),
];

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
pub(crate) enum BusinessUnits {
    Table,
    Id,
    Code,
    Name,
    EnglishLabel,
    CreatedAt,
}

#[derive(Iden)]
pub(crate) enum AppUsers {
    Table,
    Id,
    Email,
    Name,
    Role,
    BuCode,
    Position,
    HireDate,
    AuthSub,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Partners {
    Table,
    Id,
    DisplayName,
    EntityType,
    LegalName,
    ContactEmail,
    Phone,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Projects {
    Table,
    Id,
    BuCode,
    Name,
    Category,
    Status,
    StartDate,
    EndDate,
    ClientId,
    ArtistId,
    PmId,
    PmName,
    Participants,
    SharePartnerId,
    ShareRate,
    VisibleToPartner,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Tasks {
    Table,
    Id,
    ProjectId,
    BuCode,
    Title,
    Description,
    AssigneeId,
    Assignee,
    DueDate,
    Status,
    Priority,
    Tag,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum FinancialEntries {
    Table,
    Id,
    ProjectId,
    BuCode,
    Kind,
    Category,
    Name,
    Amount,
    OccurredAt,
    Status,
    Memo,
    PartnerId,
    PaymentMethod,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum PartnerSettlements {
    Table,
    Id,
    PartnerId,
    PeriodStart,
    PeriodEnd,
    TotalRevenue,
    TotalExpense,
    NetProfit,
    PartnerAmount,
    CompanyAmount,
    Status,
    Memo,
    CreatedBy,
    ConfirmedAt,
    PaidAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum PartnerSettlementProjects {
    Table,
    Id,
    SettlementId,
    ProjectId,
    Revenue,
    Expense,
    NetProfit,
    ShareRate,
    PartnerAmount,
    CompanyAmount,
    CreatedAt,
}

#[derive(Iden)]
enum AttendanceLogs {
    Table,
    Id,
    UserId,
    WorkDate,
    CheckInAt,
    CheckOutAt,
    Status,
    IsOvertime,
    IsAutoCheckout,
    IsModified,
    UserConfirmed,
    ModificationReason,
    ModifiedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum WorkRequests {
    Table,
    Id,
    RequesterId,
    RequestType,
    StartDate,
    EndDate,
    StartTime,
    EndTime,
    Reason,
    Status,
    ApproverId,
    ApprovedAt,
    RejectionReason,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Notifications {
    Table,
    Id,
    UserId,
    Title,
    Message,
    Type,
    EntityType,
    EntityId,
    ActionUrl,
    Read,
    CreatedAt,
}

#[derive(Iden)]
enum ActivityLogs {
    Table,
    Id,
    UserId,
    ActionType,
    EntityType,
    EntityId,
    EntityTitle,
    Metadata,
    OccurredAt,
}

pub(crate) async fn enum_exists(manager: &SchemaManager<'_>, enum_name: &str) -> Result<bool, DbErr> {
    let result = manager
        .get_connection()
        .query_one(Statement::from_sql_and_values(
            sea_orm::DatabaseBackend::Postgres,
            "SELECT 1 FROM pg_type WHERE typname = $1",
            vec![enum_name.into()],
        ))
        .await?;
    Ok(result.is_some())
}

pub(crate) async fn create_enum(
    manager: &SchemaManager<'_>,
    name: &'static str,
    values: &[&'static str],
) -> Result<(), DbErr> {
    if enum_exists(manager, name).await? {
        return Ok(());
    }
    manager
        .create_type(
            PgType::create()
                .as_enum(Alias::new(name))
                .values(values.iter().map(|v| Alias::new(*v)))
                .to_owned(),
        )
        .await
}

pub(crate) fn big_pk<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .big_integer()
        .not_null()
        .primary_key()
        .auto_increment()
        .to_owned()
}

pub(crate) fn timestamp_now<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .timestamp_with_time_zone()
        .not_null()
        .default(Expr::current_timestamp())
        .to_owned()
}

pub(crate) fn enum_col<T: IntoIden>(col: T, enum_name: &'static str) -> ColumnDef {
    ColumnDef::new(col).custom(Alias::new(enum_name)).to_owned()
}

pub(crate) fn user_fk<T: IntoIden + 'static>(name: &str, table: T, col: impl IntoIden, on_delete: ForeignKeyAction) -> ForeignKeyCreateStatement {
    ForeignKey::create()
        .name(name)
        .from(table, col)
        .to(AppUsers::Table, AppUsers::Id)
        .on_delete(on_delete)
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        if manager.get_database_backend() != sea_orm::DatabaseBackend::Postgres {
            return Err(DbErr::Custom("Unsupported database backend".into()));
        }

        for (name, values) in ENUMS {
            create_enum(manager, name, values).await?;
        }

        // business_units
        manager
            .create_table(
                Table::create()
                    .table(BusinessUnits::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BusinessUnits::Id)
                            .integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(enum_col(BusinessUnits::Code, "bu_code").not_null().unique_key())
                    .col(ColumnDef::new(BusinessUnits::Name).text().not_null())
                    .col(ColumnDef::new(BusinessUnits::EnglishLabel).text().not_null())
                    .col(timestamp_now(BusinessUnits::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                "INSERT INTO business_units (code, name, english_label) VALUES \
                 ('GRIGO', '그리고 엔터', 'GRIGO'), \
                 ('REACT', '리액트 스튜디오', 'REACT'), \
                 ('FLOW', '플로우메이커', 'FLOW'), \
                 ('AST', '아스트 컴퍼니', 'AST'), \
                 ('MODOO', '모두굿즈', 'MODOO'), \
                 ('HEAD', '본사', 'HEAD') \
                 ON CONFLICT (code) DO NOTHING",
            )
            .await?;

        // app_users
        manager
            .create_table(
                Table::create()
                    .table(AppUsers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(AppUsers::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(AppUsers::Email).text().not_null().unique_key())
                    .col(ColumnDef::new(AppUsers::Name).text().not_null())
                    .col(
                        enum_col(AppUsers::Role, "user_role")
                            .not_null()
                            .default("member"),
                    )
                    .col(enum_col(AppUsers::BuCode, "bu_code").null())
                    .col(ColumnDef::new(AppUsers::Position).text().null())
                    .col(ColumnDef::new(AppUsers::HireDate).date().null())
                    .col(ColumnDef::new(AppUsers::AuthSub).text().null().unique_key())
                    .col(timestamp_now(AppUsers::CreatedAt))
                    .col(timestamp_now(AppUsers::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        // partners
        manager
            .create_table(
                Table::create()
                    .table(Partners::Table)
                    .if_not_exists()
                    .col(big_pk(Partners::Id))
                    .col(ColumnDef::new(Partners::DisplayName).text().not_null())
                    .col(
                        ColumnDef::new(Partners::EntityType)
                            .text()
                            .not_null()
                            .default("individual"),
                    )
                    .col(ColumnDef::new(Partners::LegalName).text().null())
                    .col(ColumnDef::new(Partners::ContactEmail).text().null())
                    .col(ColumnDef::new(Partners::Phone).text().null())
                    .col(
                        ColumnDef::new(Partners::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(timestamp_now(Partners::CreatedAt))
                    .col(timestamp_now(Partners::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        // projects
        manager
            .create_table(
                Table::create()
                    .table(Projects::Table)
                    .if_not_exists()
                    .col(big_pk(Projects::Id))
                    .col(enum_col(Projects::BuCode, "bu_code").not_null())
                    .col(ColumnDef::new(Projects::Name).text().not_null())
                    .col(ColumnDef::new(Projects::Category).text().not_null())
                    .col(
                        ColumnDef::new(Projects::Status)
                            .text()
                            .not_null()
                            .default("준비중"),
                    )
                    .col(ColumnDef::new(Projects::StartDate).date().null())
                    .col(ColumnDef::new(Projects::EndDate).date().null())
                    .col(ColumnDef::new(Projects::ClientId).big_integer().null())
                    .col(ColumnDef::new(Projects::ArtistId).big_integer().null())
                    .col(ColumnDef::new(Projects::PmId).uuid().null())
                    .col(ColumnDef::new(Projects::PmName).text().null())
                    .col(
                        ColumnDef::new(Projects::Participants)
                            .json_binary()
                            .not_null()
                            .default(Expr::cust("'[]'::jsonb")),
                    )
                    .col(ColumnDef::new(Projects::SharePartnerId).big_integer().null())
                    .col(ColumnDef::new(Projects::ShareRate).double().null())
                    .col(
                        ColumnDef::new(Projects::VisibleToPartner)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Projects::CreatedBy).uuid().null())
                    .col(timestamp_now(Projects::CreatedAt))
                    .col(timestamp_now(Projects::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_projects_client_id")
                            .from(Projects::Table, Projects::ClientId)
                            .to(Partners::Table, Partners::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_projects_artist_id")
                            .from(Projects::Table, Projects::ArtistId)
                            .to(Partners::Table, Partners::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_projects_share_partner_id")
                            .from(Projects::Table, Projects::SharePartnerId)
                            .to(Partners::Table, Partners::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(&mut user_fk(
                        "fk_projects_pm_id",
                        Projects::Table,
                        Projects::PmId,
                        ForeignKeyAction::SetNull,
                    ))
                    .foreign_key(&mut user_fk(
                        "fk_projects_created_by",
                        Projects::Table,
                        Projects::CreatedBy,
                        ForeignKeyAction::SetNull,
                    ))
                    .check(
                        Expr::col(Projects::ShareRate)
                            .is_null()
                            .or(Expr::col(Projects::ShareRate).between(0, 100)),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_projects_bu_code")
                    .table(Projects::Table)
                    .col(Projects::BuCode)
                    .to_owned(),
            )
            .await?;

        // tasks
        manager
            .create_table(
                Table::create()
                    .table(Tasks::Table)
                    .if_not_exists()
                    .col(big_pk(Tasks::Id))
                    .col(ColumnDef::new(Tasks::ProjectId).big_integer().not_null())
                    .col(enum_col(Tasks::BuCode, "bu_code").not_null())
                    .col(ColumnDef::new(Tasks::Title).text().not_null())
                    .col(ColumnDef::new(Tasks::Description).text().null())
                    .col(ColumnDef::new(Tasks::AssigneeId).uuid().null())
                    .col(ColumnDef::new(Tasks::Assignee).text().null())
                    .col(ColumnDef::new(Tasks::DueDate).date().null())
                    .col(
                        enum_col(Tasks::Status, "task_status")
                            .not_null()
                            .default("todo"),
                    )
                    .col(
                        enum_col(Tasks::Priority, "task_priority")
                            .not_null()
                            .default("medium"),
                    )
                    .col(ColumnDef::new(Tasks::Tag).text().null())
                    .col(ColumnDef::new(Tasks::CreatedBy).uuid().null())
                    .col(timestamp_now(Tasks::CreatedAt))
                    .col(timestamp_now(Tasks::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tasks_project_id")
                            .from(Tasks::Table, Tasks::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(&mut user_fk(
                        "fk_tasks_assignee_id",
                        Tasks::Table,
                        Tasks::AssigneeId,
                        ForeignKeyAction::SetNull,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_tasks_project_id")
                    .table(Tasks::Table)
                    .col(Tasks::ProjectId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_tasks_assignee_due")
                    .table(Tasks::Table)
                    .col(Tasks::AssigneeId)
                    .col(Tasks::DueDate)
                    .to_owned(),
            )
            .await?;

        // financial_entries
        manager
            .create_table(
                Table::create()
                    .table(FinancialEntries::Table)
                    .if_not_exists()
                    .col(big_pk(FinancialEntries::Id))
                    .col(
                        ColumnDef::new(FinancialEntries::ProjectId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(enum_col(FinancialEntries::BuCode, "bu_code").not_null())
                    .col(enum_col(FinancialEntries::Kind, "financial_kind").not_null())
                    .col(ColumnDef::new(FinancialEntries::Category).text().not_null())
                    .col(ColumnDef::new(FinancialEntries::Name).text().not_null())
                    .col(
                        ColumnDef::new(FinancialEntries::Amount)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(FinancialEntries::OccurredAt).date().not_null())
                    .col(
                        enum_col(FinancialEntries::Status, "financial_status")
                            .not_null()
                            .default("planned"),
                    )
                    .col(ColumnDef::new(FinancialEntries::Memo).text().null())
                    .col(ColumnDef::new(FinancialEntries::PartnerId).big_integer().null())
                    .col(ColumnDef::new(FinancialEntries::PaymentMethod).text().null())
                    .col(ColumnDef::new(FinancialEntries::CreatedBy).uuid().null())
                    .col(timestamp_now(FinancialEntries::CreatedAt))
                    .col(timestamp_now(FinancialEntries::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_financial_entries_project_id")
                            .from(FinancialEntries::Table, FinancialEntries::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_financial_entries_partner_id")
                            .from(FinancialEntries::Table, FinancialEntries::PartnerId)
                            .to(Partners::Table, Partners::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_financial_entries_project_occurred")
                    .table(FinancialEntries::Table)
                    .col(FinancialEntries::ProjectId)
                    .col(FinancialEntries::OccurredAt)
                    .to_owned(),
            )
            .await?;

        // partner_settlements
        manager
            .create_table(
                Table::create()
                    .table(PartnerSettlements::Table)
                    .if_not_exists()
                    .col(big_pk(PartnerSettlements::Id))
                    .col(
                        ColumnDef::new(PartnerSettlements::PartnerId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PartnerSettlements::PeriodStart).date().not_null())
                    .col(ColumnDef::new(PartnerSettlements::PeriodEnd).date().not_null())
                    .col(ColumnDef::new(PartnerSettlements::TotalRevenue).big_integer().not_null())
                    .col(ColumnDef::new(PartnerSettlements::TotalExpense).big_integer().not_null())
                    .col(ColumnDef::new(PartnerSettlements::NetProfit).big_integer().not_null())
                    .col(ColumnDef::new(PartnerSettlements::PartnerAmount).big_integer().not_null())
                    .col(ColumnDef::new(PartnerSettlements::CompanyAmount).big_integer().not_null())
                    .col(
                        enum_col(PartnerSettlements::Status, "settlement_status")
                            .not_null()
                            .default("draft"),
                    )
                    .col(ColumnDef::new(PartnerSettlements::Memo).text().null())
                    .col(ColumnDef::new(PartnerSettlements::CreatedBy).uuid().null())
                    .col(
                        ColumnDef::new(PartnerSettlements::ConfirmedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(PartnerSettlements::PaidAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(timestamp_now(PartnerSettlements::CreatedAt))
                    .col(timestamp_now(PartnerSettlements::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_partner_settlements_partner_id")
                            .from(PartnerSettlements::Table, PartnerSettlements::PartnerId)
                            .to(Partners::Table, Partners::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // partner_settlement_projects
        manager
            .create_table(
                Table::create()
                    .table(PartnerSettlementProjects::Table)
                    .if_not_exists()
                    .col(big_pk(PartnerSettlementProjects::Id))
                    .col(
                        ColumnDef::new(PartnerSettlementProjects::SettlementId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PartnerSettlementProjects::ProjectId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PartnerSettlementProjects::Revenue).big_integer().not_null())
                    .col(ColumnDef::new(PartnerSettlementProjects::Expense).big_integer().not_null())
                    .col(ColumnDef::new(PartnerSettlementProjects::NetProfit).big_integer().not_null())
                    .col(ColumnDef::new(PartnerSettlementProjects::ShareRate).double().not_null())
                    .col(
                        ColumnDef::new(PartnerSettlementProjects::PartnerAmount)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PartnerSettlementProjects::CompanyAmount)
                            .big_integer()
                            .not_null(),
                    )
                    .col(timestamp_now(PartnerSettlementProjects::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_settlement_projects_settlement_id")
                            .from(
                                PartnerSettlementProjects::Table,
                                PartnerSettlementProjects::SettlementId,
                            )
                            .to(PartnerSettlements::Table, PartnerSettlements::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_settlement_projects_project_id")
                            .from(
                                PartnerSettlementProjects::Table,
                                PartnerSettlementProjects::ProjectId,
                            )
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // attendance_logs
        manager
            .create_table(
                Table::create()
                    .table(AttendanceLogs::Table)
                    .if_not_exists()
                    .col(big_pk(AttendanceLogs::Id))
                    .col(ColumnDef::new(AttendanceLogs::UserId).uuid().not_null())
                    .col(ColumnDef::new(AttendanceLogs::WorkDate).date().not_null())
                    .col(
                        ColumnDef::new(AttendanceLogs::CheckInAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(AttendanceLogs::CheckOutAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        enum_col(AttendanceLogs::Status, "attendance_status")
                            .not_null()
                            .default("present"),
                    )
                    .col(ColumnDef::new(AttendanceLogs::IsOvertime).boolean().not_null().default(false))
                    .col(
                        ColumnDef::new(AttendanceLogs::IsAutoCheckout)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(AttendanceLogs::IsModified).boolean().not_null().default(false))
                    .col(
                        ColumnDef::new(AttendanceLogs::UserConfirmed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(AttendanceLogs::ModificationReason).text().null())
                    .col(ColumnDef::new(AttendanceLogs::ModifiedBy).uuid().null())
                    .col(timestamp_now(AttendanceLogs::CreatedAt))
                    .col(timestamp_now(AttendanceLogs::UpdatedAt))
                    .foreign_key(&mut user_fk(
                        "fk_attendance_logs_user_id",
                        AttendanceLogs::Table,
                        AttendanceLogs::UserId,
                        ForeignKeyAction::Cascade,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_attendance_logs_user_work_date")
                    .table(AttendanceLogs::Table)
                    .col(AttendanceLogs::UserId)
                    .col(AttendanceLogs::WorkDate)
                    .to_owned(),
            )
            .await?;

        // work_requests
        manager
            .create_table(
                Table::create()
                    .table(WorkRequests::Table)
                    .if_not_exists()
                    .col(big_pk(WorkRequests::Id))
                    .col(ColumnDef::new(WorkRequests::RequesterId).uuid().not_null())
                    .col(enum_col(WorkRequests::RequestType, "work_request_type").not_null())
                    .col(ColumnDef::new(WorkRequests::StartDate).date().not_null())
                    .col(ColumnDef::new(WorkRequests::EndDate).date().not_null())
                    .col(ColumnDef::new(WorkRequests::StartTime).text().null())
                    .col(ColumnDef::new(WorkRequests::EndTime).text().null())
                    .col(ColumnDef::new(WorkRequests::Reason).text().not_null())
                    .col(
                        enum_col(WorkRequests::Status, "approval_status")
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(WorkRequests::ApproverId).uuid().null())
                    .col(
                        ColumnDef::new(WorkRequests::ApprovedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(WorkRequests::RejectionReason).text().null())
                    .col(timestamp_now(WorkRequests::CreatedAt))
                    .col(timestamp_now(WorkRequests::UpdatedAt))
                    .foreign_key(&mut user_fk(
                        "fk_work_requests_requester_id",
                        WorkRequests::Table,
                        WorkRequests::RequesterId,
                        ForeignKeyAction::Cascade,
                    ))
                    .to_owned(),
            )
            .await?;

        // notifications
        manager
            .create_table(
                Table::create()
                    .table(Notifications::Table)
                    .if_not_exists()
                    .col(big_pk(Notifications::Id))
                    .col(ColumnDef::new(Notifications::UserId).uuid().not_null())
                    .col(ColumnDef::new(Notifications::Title).text().not_null())
                    .col(ColumnDef::new(Notifications::Message).text().not_null())
                    .col(
                        enum_col(Notifications::Type, "notification_type")
                            .not_null()
                            .default("info"),
                    )
                    .col(ColumnDef::new(Notifications::EntityType).text().null())
                    .col(ColumnDef::new(Notifications::EntityId).text().null())
                    .col(ColumnDef::new(Notifications::ActionUrl).text().null())
                    .col(
                        ColumnDef::new(Notifications::Read)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(timestamp_now(Notifications::CreatedAt))
                    .foreign_key(&mut user_fk(
                        "fk_notifications_user_id",
                        Notifications::Table,
                        Notifications::UserId,
                        ForeignKeyAction::Cascade,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_notifications_user_created")
                    .table(Notifications::Table)
                    .col(Notifications::UserId)
                    .col(Notifications::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // activity_logs
        manager
            .create_table(
                Table::create()
                    .table(ActivityLogs::Table)
                    .if_not_exists()
                    .col(big_pk(ActivityLogs::Id))
                    .col(ColumnDef::new(ActivityLogs::UserId).uuid().null())
                    .col(ColumnDef::new(ActivityLogs::ActionType).text().not_null())
                    .col(ColumnDef::new(ActivityLogs::EntityType).text().not_null())
                    .col(ColumnDef::new(ActivityLogs::EntityId).text().not_null())
                    .col(ColumnDef::new(ActivityLogs::EntityTitle).text().null())
                    .col(
                        ColumnDef::new(ActivityLogs::Metadata)
                            .json_binary()
                            .not_null()
                            .default(Expr::cust("'{}'::jsonb")),
                    )
                    .col(timestamp_now(ActivityLogs::OccurredAt))
                    .foreign_key(&mut user_fk(
                        "fk_activity_logs_user_id",
                        ActivityLogs::Table,
                        ActivityLogs::UserId,
                        ForeignKeyAction::SetNull,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_activity_logs_user_occurred")
                    .table(ActivityLogs::Table)
                    .col(ActivityLogs::UserId)
                    .col(ActivityLogs::OccurredAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // children before parents; indexes go with their tables
        for table in [
            "activity_logs",
            "notifications",
            "work_requests",
            "attendance_logs",
            "partner_settlement_projects",
            "partner_settlements",
            "financial_entries",
            "tasks",
            "projects",
            "partners",
            "app_users",
            "business_units",
        ] {
            manager
                .drop_table(Table::drop().table(Alias::new(table)).if_exists().to_owned())
                .await?;
        }

        for (name, _) in ENUMS.iter().rev() {
            manager
                .drop_type(PgType::drop().name(Alias::new(*name)).if_exists().to_owned())
                .await?;
        }

        Ok(())
    }
}
