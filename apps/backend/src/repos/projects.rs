//! Project repository functions.

use sea_orm::ConnectionTrait;

use crate::adapters::projects_sea as projects_adapter;
use crate::domain::finance_permissions::ProjectRef;
use crate::domain::permissions::ProjectScope;
use crate::entities::enums::BuCode;
use crate::entities::projects;
use crate::errors::domain::{DomainError, NotFoundKind};

pub use projects_adapter::ProjectCreate;

pub type Project = projects::Model;

/// Permission view of a project row.
pub fn scope(project: &Project) -> ProjectScope {
    ProjectScope {
        bu_code: project.bu_code,
        pm_id: project.pm_id,
        participants: project.participants.user_ids(),
        created_by: project.created_by,
    }
}

pub fn finance_ref(project: &Project) -> ProjectRef<'_> {
    ProjectRef {
        pm_id: project.pm_id,
        participants: &project.participants.0,
    }
}

pub async fn find_project<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<Project>, DomainError> {
    Ok(projects_adapter::find_by_id(conn, id).await?)
}

pub async fn require_project<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Project, DomainError> {
    find_project(conn, id)
        .await?
        .ok_or_else(|| DomainError::not_found(NotFoundKind::Project, "Project not found"))
}

pub async fn find_projects<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ids: &[i64],
) -> Result<Vec<Project>, DomainError> {
    Ok(projects_adapter::find_by_ids(conn, ids).await?)
}

pub async fn list_projects<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    bu: Option<BuCode>,
) -> Result<Vec<Project>, DomainError> {
    Ok(projects_adapter::list(conn, bu).await?)
}

pub async fn shared_with_partner<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    partner_id: i64,
    ids: &[i64],
) -> Result<Vec<Project>, DomainError> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    Ok(projects_adapter::shared_with_partner(conn, partner_id, ids).await?)
}

pub async fn create_project<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: ProjectCreate,
) -> Result<Project, DomainError> {
    Ok(projects_adapter::create_project(conn, dto).await?)
}

pub async fn save_project<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    project: Project,
) -> Result<Project, DomainError> {
    Ok(projects_adapter::save_project(conn, project).await?)
}

pub async fn delete_project<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<(), DomainError> {
    match projects_adapter::delete_project(conn, id).await? {
        0 => Err(DomainError::not_found(NotFoundKind::Project, "Project not found")),
        _ => Ok(()),
    }
}
