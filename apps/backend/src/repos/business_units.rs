use sea_orm::ConnectionTrait;

use crate::adapters::business_units_sea as bu_adapter;
use crate::entities::business_units;
use crate::errors::domain::DomainError;

pub async fn list_business_units<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<business_units::Model>, DomainError> {
    Ok(bu_adapter::list_all(conn).await?)
}
