use sea_orm::ConnectionTrait;

use crate::adapters::task_templates_sea as templates_adapter;
use crate::entities::enums::BuCode;
use crate::entities::task_templates;
use crate::errors::domain::{DomainError, NotFoundKind};

pub use templates_adapter::TemplateCreate;

pub type TaskTemplate = task_templates::Model;

fn not_found() -> DomainError {
    DomainError::not_found(NotFoundKind::TaskTemplate, "Template not found")
}

pub async fn require_template<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<TaskTemplate, DomainError> {
    templates_adapter::find_by_id(conn, id)
        .await?
        .ok_or_else(not_found)
}

pub async fn list_active<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    bu: Option<BuCode>,
) -> Result<Vec<TaskTemplate>, DomainError> {
    Ok(templates_adapter::list_active(conn, bu).await?)
}

pub async fn create_template<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: TemplateCreate,
) -> Result<TaskTemplate, DomainError> {
    Ok(templates_adapter::create_template(conn, dto).await?)
}

pub async fn save_template<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    template: TaskTemplate,
) -> Result<TaskTemplate, DomainError> {
    Ok(templates_adapter::save_template(conn, template).await?)
}

pub async fn delete_template<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<(), DomainError> {
    match templates_adapter::delete_template(conn, id).await? {
        0 => Err(not_found()),
        _ => Ok(()),
    }
}
