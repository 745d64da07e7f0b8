//! SeaORM adapter for `partners`.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use time::OffsetDateTime;

use crate::entities::partners;

#[derive(Debug, Clone)]
pub struct PartnerCreate {
    pub display_name: String,
    pub entity_type: String,
    pub legal_name: Option<String>,
    pub contact_email: Option<String>,
    pub phone: Option<String>,
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<partners::Model>, sea_orm::DbErr> {
    partners::Entity::find_by_id(id).one(conn).await
}

pub async fn list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    entity_type: Option<&str>,
) -> Result<Vec<partners::Model>, sea_orm::DbErr> {
    let mut query = partners::Entity::find();
    if let Some(entity_type) = entity_type {
        query = query.filter(partners::Column::EntityType.eq(entity_type));
    }
    query
        .order_by_asc(partners::Column::DisplayName)
        .all(conn)
        .await
}

pub async fn create_partner<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: PartnerCreate,
) -> Result<partners::Model, sea_orm::DbErr> {
    let now = OffsetDateTime::now_utc();
    partners::ActiveModel {
        display_name: Set(dto.display_name),
        entity_type: Set(dto.entity_type),
        legal_name: Set(dto.legal_name),
        contact_email: Set(dto.contact_email),
        phone: Set(dto.phone),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(conn)
    .await
}
