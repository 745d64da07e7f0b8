//! SeaORM adapter for `business_units`.

use sea_orm::{ConnectionTrait, EntityTrait, QueryOrder};

use crate::entities::business_units;

pub async fn list_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<business_units::Model>, sea_orm::DbErr> {
    business_units::Entity::find()
        .order_by_asc(business_units::Column::Id)
        .all(conn)
        .await
}
