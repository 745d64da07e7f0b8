//! SeaORM adapter for `task_templates`.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde_json::Value;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::entities::enums::BuCode;
use crate::entities::task_templates::{self, Column};

#[derive(Debug, Clone)]
pub struct TemplateCreate {
    pub bu_code: BuCode,
    pub name: String,
    pub description: Option<String>,
    pub template_type: String,
    pub options_schema: Value,
    pub tasks: Value,
    pub author_id: Uuid,
    pub is_active: bool,
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<task_templates::Model>, sea_orm::DbErr> {
    task_templates::Entity::find_by_id(id).one(conn).await
}

/// Active templates, newest first.
pub async fn list_active<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    bu: Option<BuCode>,
) -> Result<Vec<task_templates::Model>, sea_orm::DbErr> {
    let mut query = task_templates::Entity::find().filter(Column::IsActive.eq(true));
    if let Some(bu) = bu {
        query = query.filter(Column::BuCode.eq(bu));
    }
    query.order_by_desc(Column::CreatedAt).all(conn).await
}

pub async fn create_template<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: TemplateCreate,
) -> Result<task_templates::Model, sea_orm::DbErr> {
    let now = OffsetDateTime::now_utc();
    task_templates::ActiveModel {
        bu_code: Set(dto.bu_code),
        name: Set(dto.name),
        description: Set(dto.description),
        template_type: Set(dto.template_type),
        options_schema: Set(dto.options_schema),
        tasks: Set(dto.tasks),
        author_id: Set(Some(dto.author_id)),
        is_active: Set(dto.is_active),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(conn)
    .await
}

pub async fn save_template<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    template: task_templates::Model,
) -> Result<task_templates::Model, sea_orm::DbErr> {
    let mut active: task_templates::ActiveModel = template.into();
    active = active.reset_all();
    active.updated_at = Set(OffsetDateTime::now_utc());
    active.update(conn).await
}

pub async fn delete_template<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let res = task_templates::Entity::delete_by_id(id).exec(conn).await?;
    Ok(res.rows_affected)
}
