use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::extension::postgres::Type as PgType;

use crate::m20250901_000001_init::{big_pk, create_enum, enum_col, timestamp_now, user_fk};

#[derive(DeriveMigrationName)]
pub struct Migration;

const ENUMS: &[(&str, &[&str])] = &[(
    "work_status",
    &["WORKING", "MEETING", "OUTSIDE", "BREAK", "OFF_WORK"],
)];

#[derive(Iden)]
enum Manuals {
    Table,
    Id,
    BuCode,
    Title,
    Category,
    Content,
    IsActive,
    AuthorId,
    AuthorName,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum TaskTemplates {
    Table,
    Id,
    BuCode,
    Name,
    Description,
    TemplateType,
    OptionsSchema,
    Tasks,
    AuthorId,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum UserWorkStatus {
    Table,
    UserId,
    Status,
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
                    .table(Manuals::Table)
                    .if_not_exists()
                    .col(big_pk(Manuals::Id))
                    .col(enum_col(Manuals::BuCode, "bu_code").not_null())
                    .col(ColumnDef::new(Manuals::Title).text().not_null())
                    .col(ColumnDef::new(Manuals::Category).text().not_null())
                    .col(
                        ColumnDef::new(Manuals::Content)
                            .json_binary()
                            .not_null()
                            .default(Expr::cust("'[]'::jsonb")),
                    )
                    .col(
                        ColumnDef::new(Manuals::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Manuals::AuthorId).uuid().null())
                    .col(ColumnDef::new(Manuals::AuthorName).text().null())
                    .col(timestamp_now(Manuals::CreatedAt))
                    .col(timestamp_now(Manuals::UpdatedAt))
                    .foreign_key(&mut user_fk(
                        "fk_manuals_author_id",
                        Manuals::Table,
                        Manuals::AuthorId,
                        ForeignKeyAction::SetNull,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_manuals_bu_category")
                    .table(Manuals::Table)
                    .col(Manuals::BuCode)
                    .col(Manuals::Category)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TaskTemplates::Table)
                    .if_not_exists()
                    .col(big_pk(TaskTemplates::Id))
                    .col(enum_col(TaskTemplates::BuCode, "bu_code").not_null())
                    .col(ColumnDef::new(TaskTemplates::Name).text().not_null())
                    .col(ColumnDef::new(TaskTemplates::Description).text().null())
                    .col(ColumnDef::new(TaskTemplates::TemplateType).text().not_null())
                    .col(
                        ColumnDef::new(TaskTemplates::OptionsSchema)
                            .json_binary()
                            .not_null()
                            .default(Expr::cust("'{}'::jsonb")),
                    )
                    .col(
                        ColumnDef::new(TaskTemplates::Tasks)
                            .json_binary()
                            .not_null()
                            .default(Expr::cust("'[]'::jsonb")),
                    )
                    .col(ColumnDef::new(TaskTemplates::AuthorId).uuid().null())
                    .col(
                        ColumnDef::new(TaskTemplates::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(timestamp_now(TaskTemplates::CreatedAt))
                    .col(timestamp_now(TaskTemplates::UpdatedAt))
                    .foreign_key(&mut user_fk(
                        "fk_task_templates_author_id",
                        TaskTemplates::Table,
                        TaskTemplates::AuthorId,
                        ForeignKeyAction::SetNull,
                    ))
                    .to_owned(),
            )
            .await?;

        // one row per user, overwritten on every change
        manager
            .create_table(
                Table::create()
                    .table(UserWorkStatus::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserWorkStatus::UserId)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        enum_col(UserWorkStatus::Status, "work_status")
                            .not_null()
                            .default("OFF_WORK"),
                    )
                    .col(timestamp_now(UserWorkStatus::UpdatedAt))
                    .foreign_key(&mut user_fk(
                        "fk_user_work_status_user_id",
                        UserWorkStatus::Table,
                        UserWorkStatus::UserId,
                        ForeignKeyAction::Cascade,
                    ))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in ["user_work_status", "task_templates", "manuals"] {
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
