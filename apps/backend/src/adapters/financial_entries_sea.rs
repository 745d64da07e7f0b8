//! SeaORM adapter for `financial_entries`.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::entities::enums::{BuCode, FinancialKind, FinancialStatus};
use crate::entities::financial_entries;

#[derive(Debug, Clone)]
pub struct EntryCreate {
    pub project_id: i64,
    pub bu_code: BuCode,
    pub kind: FinancialKind,
    pub category: String,
    pub name: String,
    pub amount: i64,
    pub occurred_at: Date,
    pub status: FinancialStatus,
    pub memo: Option<String>,
    pub partner_id: Option<i64>,
    pub payment_method: Option<String>,
    pub created_by: Uuid,
}

#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    pub bu: Option<BuCode>,
    pub project_id: Option<i64>,
    pub kind: Option<FinancialKind>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<financial_entries::Model>, sea_orm::DbErr> {
    financial_entries::Entity::find_by_id(id).one(conn).await
}

pub async fn list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    filter: EntryFilter,
) -> Result<Vec<financial_entries::Model>, sea_orm::DbErr> {
    use financial_entries::Column;

    let mut query = financial_entries::Entity::find();
    if let Some(bu) = filter.bu {
        query = query.filter(Column::BuCode.eq(bu));
    }
    if let Some(project_id) = filter.project_id {
        query = query.filter(Column::ProjectId.eq(project_id));
    }
    if let Some(kind) = filter.kind {
        query = query.filter(Column::Kind.eq(kind));
    }
    if let Some(start) = filter.start_date {
        query = query.filter(Column::OccurredAt.gte(start));
    }
    if let Some(end) = filter.end_date {
        query = query.filter(Column::OccurredAt.lte(end));
    }
    query.order_by_desc(Column::OccurredAt).all(conn).await
}

pub async fn for_project<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    project_id: i64,
) -> Result<Vec<financial_entries::Model>, sea_orm::DbErr> {
    financial_entries::Entity::find()
        .filter(financial_entries::Column::ProjectId.eq(project_id))
        .all(conn)
        .await
}

pub async fn create_entry<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: EntryCreate,
) -> Result<financial_entries::Model, sea_orm::DbErr> {
    let now = OffsetDateTime::now_utc();
    financial_entries::ActiveModel {
        project_id: Set(dto.project_id),
        bu_code: Set(dto.bu_code),
        kind: Set(dto.kind),
        category: Set(dto.category),
        name: Set(dto.name),
        amount: Set(dto.amount),
        occurred_at: Set(dto.occurred_at),
        status: Set(dto.status),
        memo: Set(dto.memo),
        partner_id: Set(dto.partner_id),
        payment_method: Set(dto.payment_method),
        created_by: Set(Some(dto.created_by)),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(conn)
    .await
}

pub async fn save_entry<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    entry: financial_entries::Model,
) -> Result<financial_entries::Model, sea_orm::DbErr> {
    let mut active: financial_entries::ActiveModel = entry.into();
    active = active.reset_all();
    active.updated_at = Set(OffsetDateTime::now_utc());
    active.update(conn).await
}

pub async fn delete_entry<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let res = financial_entries::Entity::delete_by_id(id).exec(conn).await?;
    Ok(res.rows_affected)
}
