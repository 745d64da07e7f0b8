use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::enums::BuCode;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "task_templates")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub bu_code: BuCode,
    pub name: String,
    pub description: Option<String>,
    pub template_type: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub options_schema: Json,
    /// Task blueprints the client expands before calling generate.
    #[sea_orm(column_type = "JsonBinary")]
    pub tasks: Json,
    pub author_id: Option<Uuid>,
    pub is_active: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
