use sea_orm::ConnectionTrait;

use crate::adapters::settlements_sea as settlements_adapter;
use crate::entities::{partner_settlement_projects, partner_settlements};
use crate::errors::domain::{DomainError, NotFoundKind};

pub use settlements_adapter::{LineCreate, SettlementCreate};

pub type Settlement = partner_settlements::Model;
pub type SettlementLine = partner_settlement_projects::Model;

fn not_found() -> DomainError {
    DomainError::not_found(NotFoundKind::Settlement, "Settlement not found")
}

pub async fn require_settlement<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Settlement, DomainError> {
    settlements_adapter::find_by_id(conn, id)
        .await?
        .ok_or_else(not_found)
}

pub async fn list_settlements<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    partner_id: Option<i64>,
) -> Result<Vec<Settlement>, DomainError> {
    Ok(settlements_adapter::list(conn, partner_id).await?)
}

pub async fn lines_for<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    settlement_ids: &[i64],
) -> Result<Vec<SettlementLine>, DomainError> {
    Ok(settlements_adapter::lines_for(conn, settlement_ids).await?)
}

/// Header and lines; callers run this inside one transaction.
pub async fn create_settlement<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: SettlementCreate,
    lines: Vec<LineCreate>,
) -> Result<Settlement, DomainError> {
    let settlement = settlements_adapter::create_settlement(conn, dto).await?;
    settlements_adapter::insert_lines(conn, settlement.id, lines).await?;
    Ok(settlement)
}

pub async fn save_settlement<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    settlement: Settlement,
) -> Result<Settlement, DomainError> {
    Ok(settlements_adapter::save_settlement(conn, settlement).await?)
}

pub async fn delete_settlement<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<(), DomainError> {
    match settlements_adapter::delete_settlement(conn, id).await? {
        0 => Err(not_found()),
        _ => Ok(()),
    }
}
