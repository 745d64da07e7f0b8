use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::extension::postgres::Type as PgType;

use crate::m20250901_000001_init::{big_pk, create_enum, enum_col, timestamp_now, user_fk};

#[derive(DeriveMigrationName)]
pub struct Migration;

const ENUMS: &[(&str, &[&str])] = &[
    ("leave_type", &["annual", "compensatory", "special"]),
    (
        "leave_request_type",
        &["annual", "half_am", "half_pm", "compensatory", "special"],
    ),
    (
        "leave_grant_type",
        &["auto_monthly", "auto_yearly", "manual", "compensatory_approved"],
    ),
];

#[derive(Iden)]
enum LeaveBalances {
    Table,
    Id,
    UserId,
    LeaveType,
    Year,
    TotalDays,
    UsedDays,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum LeaveGrants {
    Table,
    Id,
    UserId,
    LeaveType,
    GrantType,
    Days,
    Reason,
    GrantedBy,
    GrantedAt,
    Year,
}

#[derive(Iden)]
enum LeaveRequests {
    Table,
    Id,
    RequesterId,
    LeaveType,
    StartDate,
    EndDate,
    DaysUsed,
    Reason,
    Status,
    ApproverId,
    ApprovedAt,
    RejectionReason,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum CompensatoryRequests {
    Table,
    Id,
    RequesterId,
    Days,
    Reason,
    WorkDate,
    Status,
    ApproverId,
    ApprovedAt,
    RejectionReason,
    CreatedAt,
    UpdatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, values) in ENUMS {
            create_enum(manager, name, values).await?;
        }

        manager
            .create_table(
                Table::create()
                    .table(LeaveBalances::Table)
                    .if_not_exists()
                    .col(big_pk(LeaveBalances::Id))
                    .col(ColumnDef::new(LeaveBalances::UserId).uuid().not_null())
                    .col(enum_col(LeaveBalances::LeaveType, "leave_type").not_null())
                    .col(ColumnDef::new(LeaveBalances::Year).integer().not_null())
                    .col(
                        ColumnDef::new(LeaveBalances::TotalDays)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(LeaveBalances::UsedDays)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(timestamp_now(LeaveBalances::CreatedAt))
                    .col(timestamp_now(LeaveBalances::UpdatedAt))
                    .foreign_key(&mut user_fk(
                        "fk_leave_balances_user_id",
                        LeaveBalances::Table,
                        LeaveBalances::UserId,
                        ForeignKeyAction::Cascade,
                    ))
                    .to_owned(),
            )
            .await?;

        // one balance row per user, type and year
        manager
            .create_index(
                Index::create()
                    .name("ux_leave_balances_user_type_year")
                    .table(LeaveBalances::Table)
                    .col(LeaveBalances::UserId)
                    .col(LeaveBalances::LeaveType)
                    .col(LeaveBalances::Year)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(LeaveGrants::Table)
                    .if_not_exists()
                    .col(big_pk(LeaveGrants::Id))
                    .col(ColumnDef::new(LeaveGrants::UserId).uuid().not_null())
                    .col(enum_col(LeaveGrants::LeaveType, "leave_type").not_null())
                    .col(enum_col(LeaveGrants::GrantType, "leave_grant_type").not_null())
                    .col(ColumnDef::new(LeaveGrants::Days).double().not_null())
                    .col(ColumnDef::new(LeaveGrants::Reason).text().null())
                    .col(ColumnDef::new(LeaveGrants::GrantedBy).uuid().null())
                    .col(timestamp_now(LeaveGrants::GrantedAt))
                    .col(ColumnDef::new(LeaveGrants::Year).integer().not_null())
                    .foreign_key(&mut user_fk(
                        "fk_leave_grants_user_id",
                        LeaveGrants::Table,
                        LeaveGrants::UserId,
                        ForeignKeyAction::Cascade,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_leave_grants_user_year")
                    .table(LeaveGrants::Table)
                    .col(LeaveGrants::UserId)
                    .col(LeaveGrants::Year)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(LeaveRequests::Table)
                    .if_not_exists()
                    .col(big_pk(LeaveRequests::Id))
                    .col(ColumnDef::new(LeaveRequests::RequesterId).uuid().not_null())
                    .col(enum_col(LeaveRequests::LeaveType, "leave_request_type").not_null())
                    .col(ColumnDef::new(LeaveRequests::StartDate).date().not_null())
                    .col(ColumnDef::new(LeaveRequests::EndDate).date().not_null())
                    .col(ColumnDef::new(LeaveRequests::DaysUsed).double().not_null())
                    .col(ColumnDef::new(LeaveRequests::Reason).text().not_null())
                    .col(
                        enum_col(LeaveRequests::Status, "approval_status")
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(LeaveRequests::ApproverId).uuid().null())
                    .col(
                        ColumnDef::new(LeaveRequests::ApprovedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(LeaveRequests::RejectionReason).text().null())
                    .col(timestamp_now(LeaveRequests::CreatedAt))
                    .col(timestamp_now(LeaveRequests::UpdatedAt))
                    .foreign_key(&mut user_fk(
                        "fk_leave_requests_requester_id",
                        LeaveRequests::Table,
                        LeaveRequests::RequesterId,
                        ForeignKeyAction::Cascade,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CompensatoryRequests::Table)
                    .if_not_exists()
                    .col(big_pk(CompensatoryRequests::Id))
                    .col(
                        ColumnDef::new(CompensatoryRequests::RequesterId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CompensatoryRequests::Days).double().not_null())
                    .col(ColumnDef::new(CompensatoryRequests::Reason).text().not_null())
                    .col(ColumnDef::new(CompensatoryRequests::WorkDate).date().null())
                    .col(
                        enum_col(CompensatoryRequests::Status, "approval_status")
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(CompensatoryRequests::ApproverId).uuid().null())
                    .col(
                        ColumnDef::new(CompensatoryRequests::ApprovedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(CompensatoryRequests::RejectionReason)
                            .text()
                            .null(),
                    )
                    .col(timestamp_now(CompensatoryRequests::CreatedAt))
                    .col(timestamp_now(CompensatoryRequests::UpdatedAt))
                    .foreign_key(&mut user_fk(
                        "fk_compensatory_requests_requester_id",
                        CompensatoryRequests::Table,
                        CompensatoryRequests::RequesterId,
                        ForeignKeyAction::Cascade,
                    ))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in [
            "compensatory_requests",
            "leave_requests",
            "leave_grants",
            "leave_balances",
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
