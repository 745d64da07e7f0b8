use sea_orm::ConnectionTrait;

use crate::adapters::partners_sea as partners_adapter;
use crate::entities::partners;
use crate::errors::domain::{DomainError, NotFoundKind};

pub use partners_adapter::PartnerCreate;

pub async fn find_partner<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<partners::Model>, DomainError> {
    Ok(partners_adapter::find_by_id(conn, id).await?)
}

pub async fn require_partner<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<partners::Model, DomainError> {
    find_partner(conn, id)
        .await?
        .ok_or_else(|| DomainError::not_found(NotFoundKind::Partner, "Partner not found"))
}

pub async fn list_partners<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    entity_type: Option<&str>,
) -> Result<Vec<partners::Model>, DomainError> {
    Ok(partners_adapter::list(conn, entity_type).await?)
}

pub async fn create_partner<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: PartnerCreate,
) -> Result<partners::Model, DomainError> {
    Ok(partners_adapter::create_partner(conn, dto).await?)
}
