//! SeaORM adapter for `manuals`.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde_json::Value;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::entities::enums::BuCode;
use crate::entities::manuals::{self, Column};

#[derive(Debug, Clone)]
pub struct ManualCreate {
    pub bu_code: BuCode,
    pub title: String,
    pub category: String,
    pub content: Value,
    pub author_id: Option<Uuid>,
    pub author_name: Option<String>,
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<manuals::Model>, sea_orm::DbErr> {
    manuals::Entity::find_by_id(id).one(conn).await
}

/// Most recently edited first.
pub async fn list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    bu: Option<BuCode>,
    category: Option<&str>,
) -> Result<Vec<manuals::Model>, sea_orm::DbErr> {
    let mut query = manuals::Entity::find();
    if let Some(bu) = bu {
        query = query.filter(Column::BuCode.eq(bu));
    }
    if let Some(category) = category {
        query = query.filter(Column::Category.eq(category));
    }
    query.order_by_desc(Column::UpdatedAt).all(conn).await
}

pub async fn create_manual<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: ManualCreate,
) -> Result<manuals::Model, sea_orm::DbErr> {
    let now = OffsetDateTime::now_utc();
    manuals::ActiveModel {
        bu_code: Set(dto.bu_code),
        title: Set(dto.title),
        category: Set(dto.category),
        content: Set(dto.content),
        is_active: Set(true),
        author_id: Set(dto.author_id),
        author_name: Set(dto.author_name),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(conn)
    .await
}

pub async fn save_manual<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    manual: manuals::Model,
) -> Result<manuals::Model, sea_orm::DbErr> {
    let mut active: manuals::ActiveModel = manual.into();
    active = active.reset_all();
    active.updated_at = Set(OffsetDateTime::now_utc());
    active.update(conn).await
}

pub async fn delete_manual<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let res = manuals::Entity::delete_by_id(id).exec(conn).await?;
    Ok(res.rows_affected)
}
