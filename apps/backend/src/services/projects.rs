//! Projects, their participant list and partner share settings.

use std::collections::HashSet;

use sea_orm::{ConnectionTrait, TransactionTrait};
use serde::{Deserialize, Serialize};
use serde_json::json;
use serde_with::rust::double_option;
use time::Date;
use uuid::Uuid;

use super::activity::{self, action, entity, Activity};
use super::notifications::{notify, Notice};
use crate::domain::permissions::{
    can_create_project, can_delete_project, can_edit_project, can_view_project_basic_info,
    project_permissions, ProjectPermissions,
};
use crate::entities::enums::{BuCode, Role};
use crate::entities::partners;
use crate::entities::projects::Participant;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::repos::partners as partners_repo;
use crate::repos::projects::{self as projects_repo, scope, Project, ProjectCreate};
use crate::repos::tasks as tasks_repo;
use crate::repos::users::User;

const DEFAULT_STATUS: &str = "준비중";
const DEFAULT_PARTICIPANT_ROLE: &str = "participant";

fn denied() -> AppError {
    AppError::forbidden("Permission denied")
}

fn notify_pm(project: &Project, pm_id: Uuid) -> Notice {
    Notice::new(
        pm_id,
        "프로젝트 PM으로 배정되었습니다",
        format!("[{}] 프로젝트의 PM으로 배정되었습니다.", project.name),
    )
    .entity(entity::PROJECT, project.id)
    .action_url(format!("/projects/{}", project.id))
}

/// Projects the caller may at least see the basic info of, newest first.
pub async fn list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    caller: &User,
    bu: Option<BuCode>,
) -> Result<Vec<Project>, AppError> {
    let actor = caller.actor();
    let projects = projects_repo::list_projects(conn, bu).await?;
    if actor.is_admin() {
        return Ok(projects);
    }

    let assigned: HashSet<i64> = tasks_repo::project_ids_assigned_to(conn, actor.id)
        .await?
        .into_iter()
        .collect();
    Ok(projects
        .into_iter()
        .filter(|p| can_view_project_basic_info(&actor, &scope(p), assigned.contains(&p.id)))
        .collect())
}

#[derive(Debug, Serialize)]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: Project,
    pub permissions: ProjectPermissions,
}

pub async fn get<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    caller: &User,
    id: i64,
) -> Result<ProjectDetail, AppError> {
    let actor = caller.actor();
    let project = projects_repo::require_project(conn, id).await?;
    let project_scope = scope(&project);

    let has_tasks = tasks_repo::has_assigned_task(conn, project.id, actor.id).await?;
    if !can_view_project_basic_info(&actor, &project_scope, has_tasks) {
        return Err(denied());
    }

    let permissions = project_permissions(&actor, &project_scope);
    Ok(ProjectDetail {
        project,
        permissions,
    })
}

#[derive(Debug, Deserialize)]
pub struct CreateProject {
    pub bu_code: Option<BuCode>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub client_id: Option<i64>,
    pub artist_id: Option<i64>,
    pub pm_id: Option<Uuid>,
    pub pm_name: Option<String>,
}

pub async fn create<C>(conn: &C, caller: &User, input: CreateProject) -> Result<Project, AppError>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync,
{
    if !can_create_project(&caller.actor()) {
        return Err(denied());
    }

    let name = input.name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty());
    let category = input.category.filter(|c| !c.trim().is_empty());
    let (Some(bu_code), Some(name), Some(category)) = (input.bu_code, name, category) else {
        return Err(AppError::missing_fields(
            "bu_code, name, category are required",
        ));
    };

    let dto = ProjectCreate {
        bu_code,
        name,
        category,
        status: input
            .status
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_STATUS.to_string()),
        start_date: input.start_date,
        end_date: input.end_date,
        client_id: input.client_id,
        artist_id: input.artist_id,
        pm_id: input.pm_id,
        pm_name: input.pm_name,
        created_by: caller.id,
    };
    let project = projects_repo::create_project(conn, dto).await?;

    activity::record(
        conn,
        Activity::new(caller.id, action::PROJECT_CREATED, entity::PROJECT, project.id)
            .title(project.name.clone())
            .metadata(json!({"bu_code": project.bu_code, "status": project.status})),
    )
    .await;

    if let Some(pm_id) = project.pm_id.filter(|pm| *pm != caller.id) {
        notify(conn, notify_pm(&project, pm_id)).await;
    }

    Ok(project)
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateProject {
    pub bu_code: Option<BuCode>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    #[serde(default, with = "double_option")]
    pub start_date: Option<Option<Date>>,
    #[serde(default, with = "double_option")]
    pub end_date: Option<Option<Date>>,
    #[serde(default, with = "double_option")]
    pub client_id: Option<Option<i64>>,
    #[serde(default, with = "double_option")]
    pub artist_id: Option<Option<i64>>,
    #[serde(default, with = "double_option")]
    pub pm_id: Option<Option<Uuid>>,
    #[serde(default, with = "double_option")]
    pub pm_name: Option<Option<String>>,
}

/// Copy the present fields of `patch` onto `project`.
fn apply_update(project: &mut Project, patch: UpdateProject) {
    if let Some(bu) = patch.bu_code {
        project.bu_code = bu;
    }
    if let Some(name) = patch.name.filter(|n| !n.trim().is_empty()) {
        project.name = name.trim().to_string();
    }
    if let Some(category) = patch.category.filter(|c| !c.trim().is_empty()) {
        project.category = category;
    }
    if let Some(status) = patch.status.filter(|s| !s.trim().is_empty()) {
        project.status = status;
    }
    if let Some(v) = patch.start_date {
        project.start_date = v;
    }
    if let Some(v) = patch.end_date {
        project.end_date = v;
    }
    if let Some(v) = patch.client_id {
        project.client_id = v;
    }
    if let Some(v) = patch.artist_id {
        project.artist_id = v;
    }
    if let Some(v) = patch.pm_id {
        project.pm_id = v;
    }
    if let Some(v) = patch.pm_name {
        project.pm_name = v;
    }
}

pub async fn update<C>(
    conn: &C,
    caller: &User,
    id: i64,
    patch: UpdateProject,
) -> Result<Project, AppError>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync,
{
    let mut project = projects_repo::require_project(conn, id).await?;
    if !can_edit_project(&caller.actor(), &scope(&project)) {
        return Err(denied());
    }

    let old_status = project.status.clone();
    let old_pm = project.pm_id;
    apply_update(&mut project, patch);
    let project = projects_repo::save_project(conn, project).await?;

    let entry = if project.status != old_status {
        Activity::new(caller.id, action::PROJECT_STATUS_CHANGED, entity::PROJECT, project.id)
            .metadata(json!({"old_status": old_status, "new_status": project.status}))
    } else {
        Activity::new(caller.id, action::PROJECT_UPDATED, entity::PROJECT, project.id)
    };
    activity::record(conn, entry.title(project.name.clone())).await;

    if let Some(pm_id) = project.pm_id.filter(|pm| Some(*pm) != old_pm && *pm != caller.id) {
        notify(conn, notify_pm(&project, pm_id)).await;
    }

    Ok(project)
}

pub async fn delete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    caller: &User,
    id: i64,
) -> Result<(), AppError> {
    let project = projects_repo::require_project(conn, id).await?;
    if !can_delete_project(&caller.actor(), &scope(&project)) {
        return Err(denied());
    }
    Ok(projects_repo::delete_project(conn, id).await?)
}

// ---------------------------------------------------------------------------
// Participants
// ---------------------------------------------------------------------------

pub async fn participants<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    caller: &User,
    project_id: i64,
) -> Result<Vec<Participant>, AppError> {
    let detail = get(conn, caller, project_id).await?;
    Ok(detail.project.participants.0)
}

/// Internal user or external worker; exactly one is expected.
#[derive(Debug, Deserialize)]
pub struct ParticipantInput {
    pub user_id: Option<Uuid>,
    pub external_worker_id: Option<i64>,
    pub role: Option<String>,
    pub is_pm: Option<bool>,
}

impl ParticipantInput {
    fn matches(&self, p: &Participant) -> bool {
        match (self.user_id, self.external_worker_id) {
            (Some(user_id), _) => p.user_id == Some(user_id),
            (None, Some(worker_id)) => p.external_worker_id == Some(worker_id),
            (None, None) => false,
        }
    }

    fn require_identity(&self) -> Result<(), AppError> {
        if self.user_id.is_none() && self.external_worker_id.is_none() {
            return Err(AppError::missing_fields(
                "user_id or external_worker_id is required",
            ));
        }
        Ok(())
    }
}

async fn editable_project<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    caller: &User,
    project_id: i64,
) -> Result<Project, AppError> {
    let project = projects_repo::require_project(conn, project_id).await?;
    if !can_edit_project(&caller.actor(), &scope(&project)) {
        return Err(denied());
    }
    Ok(project)
}

pub async fn add_participant<C>(
    conn: &C,
    caller: &User,
    project_id: i64,
    input: ParticipantInput,
) -> Result<Vec<Participant>, AppError>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync,
{
    input.require_identity()?;
    let mut project = editable_project(conn, caller, project_id).await?;

    if project.participants.0.iter().any(|p| input.matches(p)) {
        return Err(AppError::invalid_with(
            ErrorCode::ParticipantExists,
            "Participant already exists",
        ));
    }

    project.participants.0.push(Participant {
        user_id: input.user_id,
        external_worker_id: if input.user_id.is_some() {
            None
        } else {
            input.external_worker_id
        },
        role: input
            .role
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PARTICIPANT_ROLE.to_string()),
        is_pm: input.is_pm.unwrap_or(false),
    });
    let project = projects_repo::save_project(conn, project).await?;

    if let Some(user_id) = input.user_id.filter(|u| *u != caller.id) {
        let notice = Notice::new(
            user_id,
            "프로젝트에 참여하게 되었습니다",
            format!("[{}] 프로젝트의 참여자로 추가되었습니다.", project.name),
        )
        .entity(entity::PROJECT, project.id)
        .action_url(format!("/projects/{}", project.id));
        notify(conn, notice).await;
    }

    Ok(project.participants.0)
}

pub async fn update_participant<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    caller: &User,
    project_id: i64,
    input: ParticipantInput,
) -> Result<Vec<Participant>, AppError> {
    input.require_identity()?;
    let mut project = editable_project(conn, caller, project_id).await?;

    let participant = project
        .participants
        .0
        .iter_mut()
        .find(|p| input.matches(p))
        .ok_or_else(|| {
            AppError::not_found(ErrorCode::ParticipantNotFound, "Participant not found")
        })?;
    if let Some(role) = input.role.as_ref().filter(|r| !r.trim().is_empty()) {
        participant.role = role.clone();
    }
    if let Some(is_pm) = input.is_pm {
        participant.is_pm = is_pm;
    }

    let project = projects_repo::save_project(conn, project).await?;
    Ok(project.participants.0)
}

pub async fn remove_participant<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    caller: &User,
    project_id: i64,
    input: ParticipantInput,
) -> Result<Vec<Participant>, AppError> {
    input.require_identity()?;
    let mut project = editable_project(conn, caller, project_id).await?;

    let before = project.participants.0.len();
    project.participants.0.retain(|p| !input.matches(p));
    if project.participants.0.len() == before {
        return Err(AppError::not_found(
            ErrorCode::ParticipantNotFound,
            "Participant not found",
        ));
    }

    let project = projects_repo::save_project(conn, project).await?;
    Ok(project.participants.0)
}

// ---------------------------------------------------------------------------
// Share settings
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct ShareSettings {
    pub id: i64,
    pub name: String,
    pub share_partner_id: Option<i64>,
    pub share_rate: Option<f64>,
    pub visible_to_partner: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share_partner: Option<partners::Model>,
}

async fn share_settings_of<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    project: Project,
) -> Result<ShareSettings, AppError> {
    let share_partner = match project.share_partner_id {
        Some(partner_id) => partners_repo::find_partner(conn, partner_id).await?,
        None => None,
    };
    Ok(ShareSettings {
        id: project.id,
        name: project.name,
        share_partner_id: project.share_partner_id,
        share_rate: project.share_rate,
        visible_to_partner: project.visible_to_partner,
        share_partner,
    })
}

pub async fn share_settings<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    caller: &User,
    project_id: i64,
) -> Result<ShareSettings, AppError> {
    let detail = get(conn, caller, project_id).await?;
    share_settings_of(conn, detail.project).await
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateShareSettings {
    #[serde(default, with = "double_option")]
    pub share_partner_id: Option<Option<i64>>,
    #[serde(default, with = "double_option")]
    pub share_rate: Option<Option<f64>>,
    pub visible_to_partner: Option<bool>,
}

pub fn validate_share_rate(rate: f64) -> Result<(), AppError> {
    if !(0.0..=100.0).contains(&rate) {
        return Err(AppError::invalid_with(
            ErrorCode::InvalidShareRate,
            "share_rate must be between 0 and 100",
        ));
    }
    Ok(())
}

pub async fn update_share_settings<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    caller: &User,
    project_id: i64,
    patch: UpdateShareSettings,
) -> Result<ShareSettings, AppError> {
    if caller.role != Role::Admin {
        return Err(denied());
    }
    if let Some(Some(rate)) = patch.share_rate {
        validate_share_rate(rate)?;
    }

    let mut project = projects_repo::require_project(conn, project_id).await?;
    if let Some(partner_id) = patch.share_partner_id {
        if let Some(id) = partner_id {
            partners_repo::require_partner(conn, id).await?;
        }
        project.share_partner_id = partner_id;
    }
    if let Some(rate) = patch.share_rate {
        project.share_rate = rate;
    }
    if let Some(visible) = patch.visible_to_partner {
        project.visible_to_partner = visible;
    }

    let project = projects_repo::save_project(conn, project).await?;
    share_settings_of(conn, project).await
}
