//! SeaORM adapter for `projects`. Participants live in a JSONB column and are
//! written back with the whole row.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::entities::enums::BuCode;
use crate::entities::projects::{self, Participants};

#[derive(Debug, Clone)]
pub struct ProjectCreate {
    pub bu_code: BuCode,
    pub name: String,
    pub category: String,
    pub status: String,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub client_id: Option<i64>,
    pub artist_id: Option<i64>,
    pub pm_id: Option<Uuid>,
    pub pm_name: Option<String>,
    pub created_by: Uuid,
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<projects::Model>, sea_orm::DbErr> {
    projects::Entity::find_by_id(id).one(conn).await
}

pub async fn find_by_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ids: &[i64],
) -> Result<Vec<projects::Model>, sea_orm::DbErr> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    projects::Entity::find()
        .filter(projects::Column::Id.is_in(ids.iter().copied()))
        .order_by_asc(projects::Column::Id)
        .all(conn)
        .await
}

pub async fn list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    bu: Option<BuCode>,
) -> Result<Vec<projects::Model>, sea_orm::DbErr> {
    let mut query = projects::Entity::find();
    if let Some(bu) = bu {
        query = query.filter(projects::Column::BuCode.eq(bu));
    }
    query
        .order_by_desc(projects::Column::CreatedAt)
        .all(conn)
        .await
}

/// Projects among `ids` whose revenue is shared with `partner_id`.
pub async fn shared_with_partner<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    partner_id: i64,
    ids: &[i64],
) -> Result<Vec<projects::Model>, sea_orm::DbErr> {
    projects::Entity::find()
        .filter(projects::Column::Id.is_in(ids.iter().copied()))
        .filter(projects::Column::SharePartnerId.eq(partner_id))
        .order_by_asc(projects::Column::Id)
        .all(conn)
        .await
}

pub async fn create_project<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: ProjectCreate,
) -> Result<projects::Model, sea_orm::DbErr> {
    let now = OffsetDateTime::now_utc();
    projects::ActiveModel {
        bu_code: Set(dto.bu_code),
        name: Set(dto.name),
        category: Set(dto.category),
        status: Set(dto.status),
        start_date: Set(dto.start_date),
        end_date: Set(dto.end_date),
        client_id: Set(dto.client_id),
        artist_id: Set(dto.artist_id),
        pm_id: Set(dto.pm_id),
        pm_name: Set(dto.pm_name),
        participants: Set(Participants::default()),
        share_partner_id: Set(None),
        share_rate: Set(None),
        visible_to_partner: Set(false),
        created_by: Set(Some(dto.created_by)),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(conn)
    .await
}

/// Persist every column of `project` and bump `updated_at`.
pub async fn save_project<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    project: projects::Model,
) -> Result<projects::Model, sea_orm::DbErr> {
    let mut active: projects::ActiveModel = project.into();
    active = active.reset_all();
    active.updated_at = Set(OffsetDateTime::now_utc());
    active.update(conn).await
}

pub async fn delete_project<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let res = projects::Entity::delete_by_id(id).exec(conn).await?;
    Ok(res.rows_affected)
}
