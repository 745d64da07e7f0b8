use sea_orm::ConnectionTrait;
use time::Date;
use uuid::Uuid;

use crate::adapters::tasks_sea as tasks_adapter;
use crate::domain::permissions::TaskScope;
use crate::entities::tasks;
use crate::errors::domain::{DomainError, NotFoundKind};

pub use tasks_adapter::{TaskCreate, TaskFilter};

pub type Task = tasks::Model;

pub fn scope(task: &Task) -> TaskScope {
    TaskScope {
        project_id: task.project_id,
        bu_code: task.bu_code,
        assignee_id: task.assignee_id,
        created_by: task.created_by,
    }
}

pub async fn require_task<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Task, DomainError> {
    tasks_adapter::find_by_id(conn, id)
        .await?
        .ok_or_else(|| DomainError::not_found(NotFoundKind::Task, "Task not found"))
}

pub async fn list_tasks<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    filter: TaskFilter,
) -> Result<Vec<Task>, DomainError> {
    Ok(tasks_adapter::list(conn, filter).await?)
}

pub async fn has_assigned_task<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    project_id: i64,
    user_id: Uuid,
) -> Result<bool, DomainError> {
    Ok(tasks_adapter::has_assigned_task(conn, project_id, user_id).await?)
}

pub async fn project_ids_assigned_to<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
) -> Result<Vec<i64>, DomainError> {
    Ok(tasks_adapter::project_ids_assigned_to(conn, user_id).await?)
}

pub async fn due_on<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    due: Date,
) -> Result<Vec<Task>, DomainError> {
    Ok(tasks_adapter::due_on(conn, due).await?)
}

pub async fn create_task<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: TaskCreate,
) -> Result<Task, DomainError> {
    Ok(tasks_adapter::create_task(conn, dto).await?)
}

pub async fn save_task<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    task: Task,
) -> Result<Task, DomainError> {
    Ok(tasks_adapter::save_task(conn, task).await?)
}

pub async fn delete_task<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<(), DomainError> {
    match tasks_adapter::delete_task(conn, id).await? {
        0 => Err(DomainError::not_found(NotFoundKind::Task, "Task not found")),
        _ => Ok(()),
    }
}
