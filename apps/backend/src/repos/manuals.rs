use sea_orm::ConnectionTrait;

use crate::adapters::manuals_sea as manuals_adapter;
use crate::entities::enums::BuCode;
use crate::entities::manuals;
use crate::errors::domain::{DomainError, NotFoundKind};

pub use manuals_adapter::ManualCreate;

pub type Manual = manuals::Model;

fn not_found() -> DomainError {
    DomainError::not_found(NotFoundKind::Manual, "Manual not found")
}

pub async fn require_manual<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Manual, DomainError> {
    manuals_adapter::find_by_id(conn, id)
        .await?
        .ok_or_else(not_found)
}

pub async fn list_manuals<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    bu: Option<BuCode>,
    category: Option<&str>,
) -> Result<Vec<Manual>, DomainError> {
    Ok(manuals_adapter::list(conn, bu, category).await?)
}

pub async fn create_manual<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: ManualCreate,
) -> Result<Manual, DomainError> {
    Ok(manuals_adapter::create_manual(conn, dto).await?)
}

pub async fn save_manual<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    manual: Manual,
) -> Result<Manual, DomainError> {
    Ok(manuals_adapter::save_manual(conn, manual).await?)
}

pub async fn delete_manual<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<(), DomainError> {
    match manuals_adapter::delete_manual(conn, id).await? {
        0 => Err(not_found()),
        _ => Ok(()),
    }
}
