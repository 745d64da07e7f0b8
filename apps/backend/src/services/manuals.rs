//! Per-business-unit work manuals.

use sea_orm::ConnectionTrait;
use serde::Deserialize;
use serde_json::Value;

use crate::domain::permissions::{
    can_create_manual, can_delete_manual, can_edit_manual, can_view_manual,
};
use crate::entities::enums::BuCode;
use crate::error::AppError;
use crate::repos::manuals::{self as manuals_repo, Manual, ManualCreate};
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
    category: Option<&str>,
) -> Result<Vec<Manual>, AppError> {
    if !can_view_manual(&caller.actor()) {
        return Err(denied());
    }
    Ok(manuals_repo::list_manuals(conn, bu, category).await?)
}

pub async fn get<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    caller: &User,
    id: i64,
) -> Result<Manual, AppError> {
    if !can_view_manual(&caller.actor()) {
        return Err(denied());
    }
    Ok(manuals_repo::require_manual(conn, id).await?)
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateManual {
    pub bu_code: Option<BuCode>,
    pub title: Option<String>,
    pub category: Option<String>,
    pub content: Option<Value>,
}

/// The caller is recorded as author.
pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    caller: &User,
    input: CreateManual,
) -> Result<Manual, AppError> {
    let (Some(bu_code), Some(title), Some(category)) = (
        input.bu_code,
        non_blank(input.title),
        non_blank(input.category),
    ) else {
        return Err(AppError::missing_fields(
            "bu_code, title and category are required",
        ));
    };
    if !can_create_manual(&caller.actor(), bu_code) {
        return Err(denied());
    }

    let dto = ManualCreate {
        bu_code,
        title,
        category,
        content: input.content.unwrap_or_else(|| Value::Array(Vec::new())),
        author_id: Some(caller.id),
        author_name: Some(caller.name.clone()),
    };
    Ok(manuals_repo::create_manual(conn, dto).await?)
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateManual {
    pub title: Option<String>,
    pub category: Option<String>,
    pub content: Option<Value>,
    pub is_active: Option<bool>,
    pub bu_code: Option<BuCode>,
}

/// Moving a manual to another unit needs edit rights on both units.
pub async fn update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    caller: &User,
    id: i64,
    patch: UpdateManual,
) -> Result<Manual, AppError> {
    let actor = caller.actor();
    let mut manual = manuals_repo::require_manual(conn, id).await?;
    if !can_edit_manual(&actor, manual.bu_code) {
        return Err(denied());
    }
    if let Some(bu) = patch.bu_code {
        if !can_edit_manual(&actor, bu) {
            return Err(denied());
        }
        manual.bu_code = bu;
    }

    if let Some(title) = non_blank(patch.title) {
        manual.title = title;
    }
    if let Some(category) = non_blank(patch.category) {
        manual.category = category;
    }
    if let Some(content) = patch.content {
        manual.content = content;
    }
    if let Some(is_active) = patch.is_active {
        manual.is_active = is_active;
    }
    Ok(manuals_repo::save_manual(conn, manual).await?)
}

pub async fn delete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    caller: &User,
    id: i64,
) -> Result<(), AppError> {
    let manual = manuals_repo::require_manual(conn, id).await?;
    if !can_delete_manual(&caller.actor(), manual.bu_code) {
        return Err(denied());
    }
    Ok(manuals_repo::delete_manual(conn, id).await?)
}
