//! SeaORM adapter for `activity_logs`.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::entities::activity_logs::{self, Column};

#[derive(Debug, Clone)]
pub struct ActivityCreate {
    pub user_id: Option<Uuid>,
    pub action_type: String,
    pub entity_type: String,
    pub entity_id: String,
    pub entity_title: Option<String>,
    pub metadata: serde_json::Value,
}

pub async fn create_activity<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: ActivityCreate,
) -> Result<activity_logs::Model, sea_orm::DbErr> {
    activity_logs::ActiveModel {
        user_id: Set(dto.user_id),
        action_type: Set(dto.action_type),
        entity_type: Set(dto.entity_type),
        entity_id: Set(dto.entity_id),
        entity_title: Set(dto.entity_title),
        metadata: Set(dto.metadata),
        occurred_at: Set(OffsetDateTime::now_utc()),
        ..Default::default()
    }
    .insert(conn)
    .await
}

/// `[from, to)` window, newest first.
pub async fn list_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
    from: Option<OffsetDateTime>,
    to: Option<OffsetDateTime>,
    limit: u64,
) -> Result<Vec<activity_logs::Model>, sea_orm::DbErr> {
    let mut query = activity_logs::Entity::find().filter(Column::UserId.eq(user_id));
    if let Some(from) = from {
        query = query.filter(Column::OccurredAt.gte(from));
    }
    if let Some(to) = to {
        query = query.filter(Column::OccurredAt.lt(to));
    }
    query
        .order_by_desc(Column::OccurredAt)
        .limit(limit)
        .all(conn)
        .await
}
