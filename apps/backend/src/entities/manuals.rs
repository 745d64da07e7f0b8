use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::enums::BuCode;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "manuals")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub bu_code: BuCode,
    pub title: String,
    pub category: String,
    /// Editor blocks, stored as-is.
    #[sea_orm(column_type = "JsonBinary")]
    pub content: Json,
    pub is_active: bool,
    pub author_id: Option<Uuid>,
    pub author_name: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
