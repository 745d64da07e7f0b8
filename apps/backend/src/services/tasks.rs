//! Project tasks.

use std::collections::HashMap;

use sea_orm::{ConnectionTrait, TransactionTrait};
use serde::{Deserialize, Serialize};
use serde_json::json;
use serde_with::rust::double_option;
use time::Date;
use uuid::Uuid;

use super::activity::{self, action, entity, Activity};
use super::notifications::{notify, Notice};
use crate::domain::permissions::{
    can_access_task, can_create_task, can_delete_task, can_edit_task, can_only_update_task_status,
    task_permissions, TaskPermissions,
};
use crate::entities::enums::{BuCode, TaskPriority, TaskStatus};
use crate::error::AppError;
use crate::repos::projects::{self as projects_repo, Project};
use crate::repos::tasks::{self as tasks_repo, Task, TaskCreate, TaskFilter};
use crate::repos::users::{self as users_repo, User};

fn denied() -> AppError {
    AppError::forbidden("Permission denied")
}

fn assignment_notice(assigner: &User, project: &Project, task: &Task, assignee_id: Uuid) -> Notice {
    Notice::new(
        assignee_id,
        "새 할일이 배정되었습니다",
        format!(
            "{}님이 [{}] \"{}\" 할일을 배정했습니다.",
            assigner.name, project.name, task.title
        ),
    )
    .entity(entity::TASK, task.id)
    .action_url(format!("/projects/{}?task={}", project.id, task.id))
}

/// Display name snapshot stored with the task.
async fn assignee_name<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    assignee_id: Option<Uuid>,
    given: Option<String>,
) -> Result<Option<String>, AppError> {
    if given.is_some() {
        return Ok(given);
    }
    match assignee_id {
        Some(id) => Ok(users_repo::find_user_by_id(conn, id).await?.map(|u| u.name)),
        None => Ok(None),
    }
}

/// Tasks the caller can access, nearest due date first.
pub async fn list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    caller: &User,
    filter: TaskFilter,
) -> Result<Vec<Task>, AppError> {
    let actor = caller.actor();
    let tasks = tasks_repo::list_tasks(conn, filter).await?;
    if actor.is_admin() || tasks.is_empty() {
        return Ok(tasks);
    }

    let mut project_ids: Vec<i64> = tasks.iter().map(|t| t.project_id).collect();
    project_ids.sort_unstable();
    project_ids.dedup();
    let projects: HashMap<i64, Project> = projects_repo::find_projects(conn, &project_ids)
        .await?
        .into_iter()
        .map(|p| (p.id, p))
        .collect();

    Ok(tasks
        .into_iter()
        .filter(|t| {
            projects.get(&t.project_id).is_some_and(|p| {
                can_access_task(&actor, &tasks_repo::scope(t), &projects_repo::scope(p))
            })
        })
        .collect())
}

#[derive(Debug, Serialize)]
pub struct TaskDetail {
    #[serde(flatten)]
    pub task: Task,
    pub permissions: TaskPermissions,
}

pub async fn get<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    caller: &User,
    id: i64,
) -> Result<TaskDetail, AppError> {
    let actor = caller.actor();
    let task = tasks_repo::require_task(conn, id).await?;
    let project = projects_repo::require_project(conn, task.project_id).await?;
    let (task_scope, project_scope) = (tasks_repo::scope(&task), projects_repo::scope(&project));

    if !can_access_task(&actor, &task_scope, &project_scope) {
        return Err(denied());
    }
    let permissions = task_permissions(&actor, &task_scope, &project_scope);
    Ok(TaskDetail { task, permissions })
}

#[derive(Debug, Deserialize)]
pub struct CreateTask {
    pub project_id: Option<i64>,
    pub bu_code: Option<BuCode>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub assignee_id: Option<Uuid>,
    pub assignee: Option<String>,
    pub due_date: Option<Date>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub tag: Option<String>,
}

pub async fn create<C>(conn: &C, caller: &User, input: CreateTask) -> Result<Task, AppError>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync,
{
    let title = input.title.map(|t| t.trim().to_string()).filter(|t| !t.is_empty());
    let (Some(project_id), Some(title)) = (input.project_id, title) else {
        return Err(AppError::missing_fields("project_id and title are required"));
    };

    let project = projects_repo::require_project(conn, project_id).await?;
    if !can_create_task(&caller.actor(), &projects_repo::scope(&project)) {
        return Err(denied());
    }

    let assignee = assignee_name(conn, input.assignee_id, input.assignee).await?;
    let dto = TaskCreate {
        project_id,
        bu_code: input.bu_code.unwrap_or(project.bu_code),
        title,
        description: input.description,
        assignee_id: input.assignee_id,
        assignee,
        due_date: input.due_date,
        status: input.status.unwrap_or(TaskStatus::Todo),
        priority: input.priority.unwrap_or(TaskPriority::Medium),
        tag: input.tag,
        created_by: caller.id,
    };
    let task = tasks_repo::create_task(conn, dto).await?;

    activity::record(
        conn,
        Activity::new(caller.id, action::TASK_CREATED, entity::TASK, task.id)
            .title(task.title.clone())
            .metadata(json!({"project_id": project.id})),
    )
    .await;

    if let Some(assignee_id) = task.assignee_id.filter(|a| *a != caller.id) {
        activity::record(
            conn,
            Activity::new(caller.id, action::TASK_ASSIGNED, entity::TASK, task.id)
                .title(task.title.clone())
                .metadata(json!({"assignee_id": assignee_id})),
        )
        .await;
        notify(conn, assignment_notice(caller, &project, &task, assignee_id)).await;
    }

    Ok(task)
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateTask {
    pub title: Option<String>,
    #[serde(default, with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, with = "double_option")]
    pub assignee_id: Option<Option<Uuid>>,
    #[serde(default, with = "double_option")]
    pub assignee: Option<Option<String>>,
    #[serde(default, with = "double_option")]
    pub due_date: Option<Option<Date>>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    #[serde(default, with = "double_option")]
    pub tag: Option<Option<String>>,
}

impl UpdateTask {
    /// True when anything other than `status` is present.
    pub fn touches_more_than_status(&self) -> bool {
        self.title.is_some()
            || self.description.is_some()
            || self.assignee_id.is_some()
            || self.assignee.is_some()
            || self.due_date.is_some()
            || self.priority.is_some()
            || self.tag.is_some()
    }
}

pub async fn update<C>(
    conn: &C,
    caller: &User,
    id: i64,
    patch: UpdateTask,
) -> Result<Task, AppError>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync,
{
    let actor = caller.actor();
    let mut task = tasks_repo::require_task(conn, id).await?;
    let project = projects_repo::require_project(conn, task.project_id).await?;
    let (task_scope, project_scope) = (tasks_repo::scope(&task), projects_repo::scope(&project));

    if !can_edit_task(&actor, &task_scope, &project_scope) {
        return Err(denied());
    }
    if can_only_update_task_status(&actor, &task_scope, &project_scope)
        && patch.touches_more_than_status()
    {
        return Err(AppError::forbidden("You can only update task status"));
    }

    let old_status = task.status;
    let old_assignee = task.assignee_id;

    if let Some(title) = patch.title.filter(|t| !t.trim().is_empty()) {
        task.title = title.trim().to_string();
    }
    if let Some(v) = patch.description {
        task.description = v;
    }
    if let Some(v) = patch.assignee_id {
        task.assignee_id = v;
        let given = patch.assignee.clone().flatten();
        task.assignee = assignee_name(conn, v, given).await?;
    } else if let Some(v) = patch.assignee {
        task.assignee = v;
    }
    if let Some(v) = patch.due_date {
        task.due_date = v;
    }
    if let Some(v) = patch.status {
        task.status = v;
    }
    if let Some(v) = patch.priority {
        task.priority = v;
    }
    if let Some(v) = patch.tag {
        task.tag = v;
    }

    let task = tasks_repo::save_task(conn, task).await?;

    if task.status != old_status {
        let action_type = if task.status == TaskStatus::Done {
            action::TASK_COMPLETED
        } else {
            action::TASK_STATUS_CHANGED
        };
        activity::record(
            conn,
            Activity::new(caller.id, action_type, entity::TASK, task.id)
                .title(task.title.clone())
                .metadata(json!({"old_status": old_status, "new_status": task.status})),
        )
        .await;
    }

    if let Some(assignee_id) = task
        .assignee_id
        .filter(|a| Some(*a) != old_assignee && *a != caller.id)
    {
        activity::record(
            conn,
            Activity::new(caller.id, action::TASK_ASSIGNED, entity::TASK, task.id)
                .title(task.title.clone())
                .metadata(json!({"assignee_id": assignee_id})),
        )
        .await;
        notify(conn, assignment_notice(caller, &project, &task, assignee_id)).await;
    }

    Ok(task)
}

pub async fn delete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    caller: &User,
    id: i64,
) -> Result<(), AppError> {
    let task = tasks_repo::require_task(conn, id).await?;
    let project = projects_repo::require_project(conn, task.project_id).await?;
    if !can_delete_task(
        &caller.actor(),
        &tasks_repo::scope(&task),
        &projects_repo::scope(&project),
    ) {
        return Err(denied());
    }
    Ok(tasks_repo::delete_task(conn, id).await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_only_patch_is_recognised() {
        let patch: UpdateTask = serde_json::from_value(json!({"status": "done"})).unwrap();
        assert!(!patch.touches_more_than_status());
        assert_eq!(patch.status, Some(TaskStatus::Done));
    }

    #[test]
    fn clearing_a_field_counts_as_touching_it() {
        let patch: UpdateTask =
            serde_json::from_value(json!({"status": "done", "due_date": null})).unwrap();
        assert!(patch.touches_more_than_status());
        assert_eq!(patch.due_date, Some(None));
    }
}
