//! SeaORM adapter for `partner_settlements` and their per-project lines.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::entities::enums::SettlementStatus;
use crate::entities::{partner_settlement_projects, partner_settlements};

#[derive(Debug, Clone)]
pub struct SettlementCreate {
    pub partner_id: i64,
    pub period_start: Date,
    pub period_end: Date,
    pub total_revenue: i64,
    pub total_expense: i64,
    pub net_profit: i64,
    pub partner_amount: i64,
    pub company_amount: i64,
    pub memo: Option<String>,
    pub created_by: Uuid,
}

#[derive(Debug, Clone)]
pub struct LineCreate {
    pub project_id: i64,
    pub revenue: i64,
    pub expense: i64,
    pub net_profit: i64,
    pub share_rate: f64,
    pub partner_amount: i64,
    pub company_amount: i64,
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<partner_settlements::Model>, sea_orm::DbErr> {
    partner_settlements::Entity::find_by_id(id).one(conn).await
}

pub async fn list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    partner_id: Option<i64>,
) -> Result<Vec<partner_settlements::Model>, sea_orm::DbErr> {
    let mut query = partner_settlements::Entity::find();
    if let Some(partner_id) = partner_id {
        query = query.filter(partner_settlements::Column::PartnerId.eq(partner_id));
    }
    query
        .order_by_desc(partner_settlements::Column::CreatedAt)
        .all(conn)
        .await
}

pub async fn lines_for<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    settlement_ids: &[i64],
) -> Result<Vec<partner_settlement_projects::Model>, sea_orm::DbErr> {
    if settlement_ids.is_empty() {
        return Ok(Vec::new());
    }
    partner_settlement_projects::Entity::find()
        .filter(partner_settlement_projects::Column::SettlementId.is_in(settlement_ids.iter().copied()))
        .order_by_asc(partner_settlement_projects::Column::Id)
        .all(conn)
        .await
}

pub async fn create_settlement<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: SettlementCreate,
) -> Result<partner_settlements::Model, sea_orm::DbErr> {
    let now = OffsetDateTime::now_utc();
    partner_settlements::ActiveModel {
        partner_id: Set(dto.partner_id),
        period_start: Set(dto.period_start),
        period_end: Set(dto.period_end),
        total_revenue: Set(dto.total_revenue),
        total_expense: Set(dto.total_expense),
        net_profit: Set(dto.net_profit),
        partner_amount: Set(dto.partner_amount),
        company_amount: Set(dto.company_amount),
        status: Set(SettlementStatus::Draft),
        memo: Set(dto.memo),
        created_by: Set(Some(dto.created_by)),
        confirmed_at: Set(None),
        paid_at: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(conn)
    .await
}

pub async fn insert_lines<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    settlement_id: i64,
    lines: Vec<LineCreate>,
) -> Result<(), sea_orm::DbErr> {
    if lines.is_empty() {
        return Ok(());
    }
    let now = OffsetDateTime::now_utc();
    let rows = lines.into_iter().map(|l| partner_settlement_projects::ActiveModel {
        settlement_id: Set(settlement_id),
        project_id: Set(l.project_id),
        revenue: Set(l.revenue),
        expense: Set(l.expense),
        net_profit: Set(l.net_profit),
        share_rate: Set(l.share_rate),
        partner_amount: Set(l.partner_amount),
        company_amount: Set(l.company_amount),
        created_at: Set(now),
        ..Default::default()
    });
    partner_settlement_projects::Entity::insert_many(rows)
        .exec(conn)
        .await?;
    Ok(())
}

pub async fn save_settlement<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    settlement: partner_settlements::Model,
) -> Result<partner_settlements::Model, sea_orm::DbErr> {
    let mut active: partner_settlements::ActiveModel = settlement.into();
    active = active.reset_all();
    active.updated_at = Set(OffsetDateTime::now_utc());
    active.update(conn).await
}

/// Lines are removed by the foreign key's `ON DELETE CASCADE`.
pub async fn delete_settlement<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let res = partner_settlements::Entity::delete_by_id(id).exec(conn).await?;
    Ok(res.rows_affected)
}
