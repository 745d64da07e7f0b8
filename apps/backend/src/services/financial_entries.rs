//! Revenue and expense lines attached to projects.

use std::collections::HashMap;

use sea_orm::{ConnectionTrait, TransactionTrait};
use serde::Deserialize;
use serde_json::json;
use serde_with::rust::double_option;
use time::Date;

use super::activity::{self, action, entity, Activity};
use crate::domain::finance_permissions::{check_finance_permission, FinancePermission};
use crate::domain::permissions::{
    can_access_finance, can_create_finance, can_delete_finance, can_edit_finance,
};
use crate::entities::enums::{BuCode, FinancialKind, FinancialStatus};
use crate::error::AppError;
use crate::repos::financial_entries::{
    self as entries_repo, EntryCreate, EntryFilter, FinancialEntry,
};
use crate::repos::projects::{self as projects_repo, Project};
use crate::repos::users::User;

fn denied() -> AppError {
    AppError::forbidden("Permission denied")
}

/// Entries the caller can access, most recent first.
pub async fn list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    caller: &User,
    filter: EntryFilter,
) -> Result<Vec<FinancialEntry>, AppError> {
    let actor = caller.actor();
    let entries = entries_repo::list_entries(conn, filter).await?;
    if actor.is_admin() || entries.is_empty() {
        return Ok(entries);
    }

    let mut project_ids: Vec<i64> = entries.iter().map(|e| e.project_id).collect();
    project_ids.sort_unstable();
    project_ids.dedup();
    let projects: HashMap<i64, Project> = projects_repo::find_projects(conn, &project_ids)
        .await?
        .into_iter()
        .map(|p| (p.id, p))
        .collect();

    Ok(entries
        .into_iter()
        .filter(|e| {
            projects.get(&e.project_id).is_some_and(|p| {
                can_access_finance(&actor, &entries_repo::scope(e), &projects_repo::scope(p))
            })
        })
        .collect())
}

#[derive(Debug, Deserialize)]
pub struct CreateEntry {
    pub project_id: Option<i64>,
    pub bu_code: Option<BuCode>,
    pub kind: Option<FinancialKind>,
    pub category: Option<String>,
    pub name: Option<String>,
    pub amount: Option<i64>,
    pub occurred_at: Option<Date>,
    pub status: Option<FinancialStatus>,
    pub memo: Option<String>,
    pub partner_id: Option<i64>,
    pub payment_method: Option<String>,
}

pub async fn create<C>(conn: &C, caller: &User, input: CreateEntry) -> Result<FinancialEntry, AppError>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync,
{
    let category = input.category.filter(|c| !c.trim().is_empty());
    let name = input.name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty());
    let (Some(project_id), Some(kind), Some(category), Some(name), Some(amount), Some(occurred_at)) = (
        input.project_id,
        input.kind,
        category,
        name,
        input.amount,
        input.occurred_at,
    ) else {
        return Err(AppError::missing_fields(
            "project_id, kind, category, name, amount, occurred_at are required",
        ));
    };

    let project = projects_repo::require_project(conn, project_id).await?;
    if !can_create_finance(&caller.actor(), &projects_repo::scope(&project)) {
        return Err(denied());
    }

    let dto = EntryCreate {
        project_id,
        bu_code: input.bu_code.unwrap_or(project.bu_code),
        kind,
        category,
        name,
        amount,
        occurred_at,
        status: input.status.unwrap_or(FinancialStatus::Planned),
        memo: input.memo,
        partner_id: input.partner_id,
        payment_method: input.payment_method,
        created_by: caller.id,
    };
    let entry = entries_repo::create_entry(conn, dto).await?;

    activity::record(
        conn,
        Activity::new(
            caller.id,
            action::FINANCIAL_CREATED,
            entity::FINANCIAL_ENTRY,
            entry.id,
        )
        .title(entry.name.clone())
        .metadata(json!({"project_id": entry.project_id, "kind": entry.kind, "amount": entry.amount})),
    )
    .await;

    Ok(entry)
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateEntry {
    pub kind: Option<FinancialKind>,
    pub category: Option<String>,
    pub name: Option<String>,
    pub amount: Option<i64>,
    pub occurred_at: Option<Date>,
    pub status: Option<FinancialStatus>,
    #[serde(default, with = "double_option")]
    pub memo: Option<Option<String>>,
    #[serde(default, with = "double_option")]
    pub partner_id: Option<Option<i64>>,
    #[serde(default, with = "double_option")]
    pub payment_method: Option<Option<String>>,
}

fn apply_update(entry: &mut FinancialEntry, patch: UpdateEntry) {
    if let Some(v) = patch.kind {
        entry.kind = v;
    }
    if let Some(v) = patch.category.filter(|c| !c.trim().is_empty()) {
        entry.category = v;
    }
    if let Some(v) = patch.name.filter(|n| !n.trim().is_empty()) {
        entry.name = v.trim().to_string();
    }
    if let Some(v) = patch.amount {
        entry.amount = v;
    }
    if let Some(v) = patch.occurred_at {
        entry.occurred_at = v;
    }
    if let Some(v) = patch.status {
        entry.status = v;
    }
    if let Some(v) = patch.memo {
        entry.memo = v;
    }
    if let Some(v) = patch.partner_id {
        entry.partner_id = v;
    }
    if let Some(v) = patch.payment_method {
        entry.payment_method = v;
    }
}

pub async fn update<C>(
    conn: &C,
    caller: &User,
    id: i64,
    patch: UpdateEntry,
) -> Result<FinancialEntry, AppError>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync,
{
    let mut entry = entries_repo::require_entry(conn, id).await?;
    let project = projects_repo::require_project(conn, entry.project_id).await?;
    if !can_edit_finance(
        &caller.actor(),
        &entries_repo::scope(&entry),
        &projects_repo::scope(&project),
    ) {
        return Err(denied());
    }

    apply_update(&mut entry, patch);
    let entry = entries_repo::save_entry(conn, entry).await?;

    activity::record(
        conn,
        Activity::new(
            caller.id,
            action::FINANCIAL_UPDATED,
            entity::FINANCIAL_ENTRY,
            entry.id,
        )
        .title(entry.name.clone())
        .metadata(json!({"project_id": entry.project_id, "status": entry.status})),
    )
    .await;

    Ok(entry)
}

pub async fn delete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    caller: &User,
    id: i64,
) -> Result<(), AppError> {
    let entry = entries_repo::require_entry(conn, id).await?;
    if !can_delete_finance(&caller.actor(), &entries_repo::scope(&entry)) {
        return Err(denied());
    }
    Ok(entries_repo::delete_entry(conn, id).await?)
}

/// Decision for the finance UI: what the caller may do on a project, an
/// entry, or a BU.
pub async fn permissions<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    caller: &User,
    project_id: Option<i64>,
    entry_id: Option<i64>,
    bu: Option<BuCode>,
) -> Result<FinancePermission, AppError> {
    let entry = match entry_id {
        Some(id) => Some(entries_repo::require_entry(conn, id).await?),
        None => None,
    };
    let project_id = project_id.or(entry.as_ref().map(|e| e.project_id));
    let project = match project_id {
        Some(id) => projects_repo::find_project(conn, id).await?,
        None => None,
    };

    let actor = caller.actor();
    let entry_ref = entry.as_ref().map(entries_repo::entry_ref);
    let project_ref = project.as_ref().map(projects_repo::finance_ref);
    let target_bu = bu.or(project.as_ref().map(|p| p.bu_code));

    Ok(check_finance_permission(
        Some(&actor),
        entry_ref.as_ref(),
        project_ref.as_ref(),
        target_bu,
    ))
}

#[cfg(test)]
mod tests {
    use time::macros::{date, datetime};
    use uuid::Uuid;

    use super::*;

    #[test]
    fn update_clears_optional_fields_and_keeps_the_rest() {
        let mut entry = FinancialEntry {
            id: 1,
            project_id: 2,
            bu_code: BuCode::React,
            kind: FinancialKind::Expense,
            category: "대관료".into(),
            name: "공연장 대관".into(),
            amount: 1_500_000,
            occurred_at: date!(2025 - 05 - 10),
            status: FinancialStatus::Planned,
            memo: Some("계약금".into()),
            partner_id: Some(4),
            payment_method: None,
            created_by: Some(Uuid::nil()),
            created_at: datetime!(2025-05-01 00:00 UTC),
            updated_at: datetime!(2025-05-01 00:00 UTC),
        };
        let patch: UpdateEntry =
            serde_json::from_value(json!({"status": "paid", "memo": null})).unwrap();
        apply_update(&mut entry, patch);
        assert_eq!(entry.status, FinancialStatus::Paid);
        assert_eq!(entry.memo, None);
        assert_eq!(entry.partner_id, Some(4));
        assert_eq!(entry.amount, 1_500_000);
    }
}
