use sea_orm::entity::prelude::*;
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use super::enums::BuCode;

/// One entry of `projects.participants`. Exactly one of `user_id` /
/// `external_worker_id` identifies the participant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    #[serde(default)]
    pub user_id: Option<Uuid>,
    #[serde(default)]
    pub external_worker_id: Option<i64>,
    #[serde(default = "default_participant_role")]
    pub role: String,
    #[serde(default)]
    pub is_pm: bool,
}

fn default_participant_role() -> String {
    "participant".to_string()
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(transparent)]
pub struct Participants(pub Vec<Participant>);

impl Participants {
    pub fn user_ids(&self) -> Vec<Uuid> {
        self.0.iter().filter_map(|p| p.user_id).collect()
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub bu_code: BuCode,
    pub name: String,
    pub category: String,
    /// 준비중 / 진행중 / 운영중 / 기획중 / 완료
    pub status: String,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub client_id: Option<i64>,
    pub artist_id: Option<i64>,
    pub pm_id: Option<Uuid>,
    pub pm_name: Option<String>,
    #[sea_orm(column_type = "JsonBinary")]
    pub participants: Participants,
    pub share_partner_id: Option<i64>,
    #[sea_orm(column_type = "Double")]
    pub share_rate: Option<f64>,
    pub visible_to_partner: bool,
    pub created_by: Option<Uuid>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::tasks::Entity")]
    Tasks,
    #[sea_orm(has_many = "super::financial_entries::Entity")]
    FinancialEntries,
}

impl Related<super::tasks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tasks.def()
    }
}

impl Related<super::financial_entries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FinancialEntries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
