use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Per-project line of a settlement.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "partner_settlement_projects")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub settlement_id: i64,
    pub project_id: i64,
    pub revenue: i64,
    pub expense: i64,
    pub net_profit: i64,
    #[sea_orm(column_type = "Double")]
    pub share_rate: f64,
    pub partner_amount: i64,
    pub company_amount: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::partner_settlements::Entity",
        from = "Column::SettlementId",
        to = "super::partner_settlements::Column::Id",
        on_delete = "Cascade"
    )]
    Settlement,
}

impl Related<super::partner_settlements::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Settlement.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
