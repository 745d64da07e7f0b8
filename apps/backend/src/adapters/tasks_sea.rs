//! SeaORM adapter for `tasks`.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::entities::enums::{BuCode, TaskPriority, TaskStatus};
use crate::entities::tasks;

#[derive(Debug, Clone)]
pub struct TaskCreate {
    pub project_id: i64,
    pub bu_code: BuCode,
    pub title: String,
    pub description: Option<String>,
    pub assignee_id: Option<Uuid>,
    pub assignee: Option<String>,
    pub due_date: Option<Date>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub tag: Option<String>,
    pub created_by: Uuid,
}

#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    pub bu: Option<BuCode>,
    pub project_id: Option<i64>,
    pub assignee_id: Option<Uuid>,
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<tasks::Model>, sea_orm::DbErr> {
    tasks::Entity::find_by_id(id).one(conn).await
}

pub async fn list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    filter: TaskFilter,
) -> Result<Vec<tasks::Model>, sea_orm::DbErr> {
    let mut query = tasks::Entity::find();
    if let Some(bu) = filter.bu {
        query = query.filter(tasks::Column::BuCode.eq(bu));
    }
    if let Some(project_id) = filter.project_id {
        query = query.filter(tasks::Column::ProjectId.eq(project_id));
    }
    if let Some(assignee_id) = filter.assignee_id {
        query = query.filter(tasks::Column::AssigneeId.eq(assignee_id));
    }
    query.order_by_asc(tasks::Column::DueDate).all(conn).await
}

/// Whether `user_id` holds any task in `project_id`.
pub async fn has_assigned_task<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    project_id: i64,
    user_id: Uuid,
) -> Result<bool, sea_orm::DbErr> {
    let found = tasks::Entity::find()
        .filter(tasks::Column::ProjectId.eq(project_id))
        .filter(tasks::Column::AssigneeId.eq(user_id))
        .one(conn)
        .await?;
    Ok(found.is_some())
}

/// Project ids in which `user_id` holds at least one task.
pub async fn project_ids_assigned_to<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
) -> Result<Vec<i64>, sea_orm::DbErr> {
    let rows = tasks::Entity::find()
        .filter(tasks::Column::AssigneeId.eq(user_id))
        .all(conn)
        .await?;
    let mut ids: Vec<i64> = rows.into_iter().map(|t| t.project_id).collect();
    ids.sort_unstable();
    ids.dedup();
    Ok(ids)
}

/// Open tasks with an assignee due on `due`.
pub async fn due_on<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    due: Date,
) -> Result<Vec<tasks::Model>, sea_orm::DbErr> {
    tasks::Entity::find()
        .filter(tasks::Column::DueDate.eq(due))
        .filter(tasks::Column::Status.ne(TaskStatus::Done))
        .filter(tasks::Column::AssigneeId.is_not_null())
        .order_by_asc(tasks::Column::Id)
        .all(conn)
        .await
}

pub async fn create_task<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: TaskCreate,
) -> Result<tasks::Model, sea_orm::DbErr> {
    let now = OffsetDateTime::now_utc();
    tasks::ActiveModel {
        project_id: Set(dto.project_id),
        bu_code: Set(dto.bu_code),
        title: Set(dto.title),
        description: Set(dto.description),
        assignee_id: Set(dto.assignee_id),
        assignee: Set(dto.assignee),
        due_date: Set(dto.due_date),
        status: Set(dto.status),
        priority: Set(dto.priority),
        tag: Set(dto.tag),
        created_by: Set(Some(dto.created_by)),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(conn)
    .await
}

pub async fn save_task<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    task: tasks::Model,
) -> Result<tasks::Model, sea_orm::DbErr> {
    let mut active: tasks::ActiveModel = task.into();
    active = active.reset_all();
    active.updated_at = Set(OffsetDateTime::now_utc());
    active.update(conn).await
}

pub async fn delete_task<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let res = tasks::Entity::delete_by_id(id).exec(conn).await?;
    Ok(res.rows_affected)
}
