//! Reusable task lists and bulk task generation from them.

use sea_orm::{ConnectionTrait, TransactionTrait};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use serde_with::rust::double_option;
use time::Date;
use tracing::info;

use super::activity::{self, action, entity, Activity};
use crate::domain::permissions::{
    can_create_task, can_create_task_template, can_delete_task_template, can_edit_task_template,
    can_view_task_template,
};
use crate::entities::enums::{BuCode, TaskPriority, TaskStatus};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::repos::projects as projects_repo;
use crate::repos::task_templates::{self as templates_repo, TaskTemplate, TemplateCreate};
use crate::repos::tasks::{self as tasks_repo, Task, TaskCreate};
use crate::repos::users::User;

fn denied() -> AppError {
    AppError::forbidden("Permission denied")
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

pub async fn list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    caller: &User,
    bu: Option<BuCode>,
) -> Result<Vec<TaskTemplate>, AppError> {
    if !can_view_task_template(&caller.actor()) {
        return Err(denied());
    }
    Ok(templates_repo::list_active(conn, bu).await?)
}

pub async fn get<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    caller: &User,
    id: i64,
) -> Result<TaskTemplate, AppError> {
    if !can_view_task_template(&caller.actor()) {
        return Err(denied());
    }
    Ok(templates_repo::require_template(conn, id).await?)
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateTemplate {
    pub bu_code: Option<BuCode>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub template_type: Option<String>,
    pub options_schema: Option<Value>,
    pub tasks: Option<Value>,
    pub is_active: Option<bool>,
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    caller: &User,
    input: CreateTemplate,
) -> Result<TaskTemplate, AppError> {
    if caller.bu_code.is_none() {
        return Err(AppError::bad_request(
            ErrorCode::BadRequest,
            "User must have bu_code",
        ));
    }
    let (Some(bu_code), Some(name), Some(template_type)) = (
        input.bu_code,
        non_blank(input.name),
        non_blank(input.template_type),
    ) else {
        return Err(AppError::missing_fields(
            "bu_code, name and template_type are required",
        ));
    };
    if !can_create_task_template(&caller.actor(), bu_code) {
        return Err(denied());
    }

    let dto = TemplateCreate {
        bu_code,
        name,
        description: input.description,
        template_type,
        options_schema: input.options_schema.unwrap_or_else(|| json!({})),
        tasks: input.tasks.unwrap_or_else(|| json!([])),
        author_id: caller.id,
        is_active: input.is_active.unwrap_or(true),
    };
    Ok(templates_repo::create_template(conn, dto).await?)
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateTemplate {
    pub name: Option<String>,
    #[serde(default, with = "double_option")]
    pub description: Option<Option<String>>,
    pub template_type: Option<String>,
    pub options_schema: Option<Value>,
    pub tasks: Option<Value>,
    pub is_active: Option<bool>,
}

pub async fn update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    caller: &User,
    id: i64,
    patch: UpdateTemplate,
) -> Result<TaskTemplate, AppError> {
    let mut template = templates_repo::require_template(conn, id).await?;
    if !can_edit_task_template(&caller.actor(), template.bu_code) {
        return Err(denied());
    }

    if let Some(name) = non_blank(patch.name) {
        template.name = name;
    }
    if let Some(description) = patch.description {
        template.description = description;
    }
    if let Some(template_type) = non_blank(patch.template_type) {
        template.template_type = template_type;
    }
    if let Some(options_schema) = patch.options_schema {
        template.options_schema = options_schema;
    }
    if let Some(tasks) = patch.tasks {
        template.tasks = tasks;
    }
    if let Some(is_active) = patch.is_active {
        template.is_active = is_active;
    }
    Ok(templates_repo::save_template(conn, template).await?)
}

pub async fn delete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    caller: &User,
    id: i64,
) -> Result<(), AppError> {
    let template = templates_repo::require_template(conn, id).await?;
    if !can_delete_task_template(&caller.actor(), template.bu_code) {
        return Err(denied());
    }
    Ok(templates_repo::delete_template(conn, id).await?)
}

// ---------------------------------------------------------------------------
// Generate
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct GenerateItem {
    pub title: Option<String>,
    pub due_date: Option<Date>,
    pub priority: Option<TaskPriority>,
    pub assignee_role: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateTasks {
    pub template_id: Option<i64>,
    pub project_id: Option<i64>,
    #[serde(default)]
    pub tasks: Vec<GenerateItem>,
}

#[derive(Debug, Serialize)]
pub struct Generated {
    pub tasks: Vec<Task>,
    pub count: usize,
}

/// Create every expanded task of a template in one project. Nothing is
/// written unless every item has a title.
pub async fn generate<C>(
    conn: &C,
    caller: &User,
    input: GenerateTasks,
) -> Result<Generated, AppError>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync,
{
    let actor = caller.actor();
    if !can_view_task_template(&actor) {
        return Err(denied());
    }
    if input.tasks.is_empty() {
        return Err(AppError::bad_request(ErrorCode::BadRequest, "No tasks to create"));
    }
    let Some(project_id) = input.project_id else {
        return Err(AppError::missing_fields("project_id is required"));
    };

    let mut items = Vec::with_capacity(input.tasks.len());
    for item in input.tasks {
        let title = non_blank(item.title)
            .ok_or_else(|| AppError::missing_fields("every task needs a title"))?;
        items.push((title, item.due_date, item.priority, item.assignee_role));
    }

    let project = projects_repo::require_project(conn, project_id).await?;
    if !can_create_task(&actor, &projects_repo::scope(&project)) {
        return Err(AppError::forbidden(
            "Permission denied to create tasks in this project",
        ));
    }

    let mut tasks = Vec::with_capacity(items.len());
    for (title, due_date, priority, assignee_role) in items {
        let priority = priority.unwrap_or(TaskPriority::Medium);
        let task = tasks_repo::create_task(
            conn,
            TaskCreate {
                project_id,
                bu_code: project.bu_code,
                title,
                description: None,
                assignee_id: None,
                assignee: None,
                due_date,
                status: TaskStatus::Todo,
                priority,
                tag: None,
                created_by: caller.id,
            },
        )
        .await?;

        activity::record(
            conn,
            Activity::new(caller.id, action::TASK_CREATED, entity::TASK, task.id)
                .title(task.title.clone())
                .metadata(json!({
                    "project_id": project_id,
                    "template_id": input.template_id,
                    "priority": priority,
                    "assignee_role": assignee_role,
                })),
        )
        .await;
        tasks.push(task);
    }

    let count = tasks.len();
    info!(
        project_id,
        template_id = ?input.template_id,
        count,
        "tasks generated from template"
    );
    Ok(Generated { tasks, count })
}
