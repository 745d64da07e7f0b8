//! Partner revenue-share settlements. Admin only.

use std::collections::HashMap;

use sea_orm::ConnectionTrait;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use tracing::info;

use crate::domain::settlement::{settle_project, totals, SettlementLine as ComputedLine};
use crate::entities::enums::{Role, SettlementStatus};
use crate::entities::partners;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::logging::security;
use crate::repos::financial_entries as entries_repo;
use crate::repos::partners as partners_repo;
use crate::repos::projects as projects_repo;
use crate::repos::settlements::{
    self as settlements_repo, LineCreate, Settlement, SettlementCreate, SettlementLine,
};
use crate::repos::users::User;

fn require_admin(caller: &User, action: &str) -> Result<(), AppError> {
    if caller.role != Role::Admin {
        security::admin_action_denied(action, &caller.id.to_string());
        return Err(AppError::forbidden("Permission denied"));
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct SettlementDetail {
    #[serde(flatten)]
    pub settlement: Settlement,
    pub partner: Option<partners::Model>,
    pub projects: Vec<SettlementLine>,
}

async fn with_details<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    settlements: Vec<Settlement>,
) -> Result<Vec<SettlementDetail>, AppError> {
    let ids: Vec<i64> = settlements.iter().map(|s| s.id).collect();
    let mut lines_by_settlement: HashMap<i64, Vec<SettlementLine>> = HashMap::new();
    if !ids.is_empty() {
        for line in settlements_repo::lines_for(conn, &ids).await? {
            lines_by_settlement
                .entry(line.settlement_id)
                .or_default()
                .push(line);
        }
    }

    let mut partners: HashMap<i64, Option<partners::Model>> = HashMap::new();
    let mut details = Vec::with_capacity(settlements.len());
    for settlement in settlements {
        let partner = match partners.get(&settlement.partner_id) {
            Some(p) => p.clone(),
            None => {
                let p = partners_repo::find_partner(conn, settlement.partner_id).await?;
                partners.insert(settlement.partner_id, p.clone());
                p
            }
        };
        let projects = lines_by_settlement.remove(&settlement.id).unwrap_or_default();
        details.push(SettlementDetail {
            settlement,
            partner,
            projects,
        });
    }
    Ok(details)
}

pub async fn list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    caller: &User,
    partner_id: Option<i64>,
) -> Result<Vec<SettlementDetail>, AppError> {
    require_admin(caller, "list_settlements")?;
    let settlements = settlements_repo::list_settlements(conn, partner_id).await?;
    with_details(conn, settlements).await
}

pub async fn get<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    caller: &User,
    id: i64,
) -> Result<SettlementDetail, AppError> {
    require_admin(caller, "view_settlement")?;
    let settlement = settlements_repo::require_settlement(conn, id).await?;
    let mut details = with_details(conn, vec![settlement]).await?;
    details
        .pop()
        .ok_or_else(|| AppError::not_found(ErrorCode::SettlementNotFound, "Settlement not found"))
}

#[derive(Debug, Deserialize)]
pub struct CreateSettlement {
    pub partner_id: Option<i64>,
    pub period_start: Option<Date>,
    pub period_end: Option<Date>,
    #[serde(default)]
    pub project_ids: Vec<i64>,
    pub memo: Option<String>,
}

fn line_create(line: &ComputedLine) -> LineCreate {
    LineCreate {
        project_id: line.project_id,
        revenue: line.revenue,
        expense: line.expense,
        net_profit: line.net_profit,
        share_rate: line.share_rate,
        partner_amount: line.partner_amount,
        company_amount: line.company_amount,
    }
}

/// Compute a draft from the partner's shared projects and store header and
/// lines. Callers run it inside one transaction.
pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    caller: &User,
    input: CreateSettlement,
) -> Result<SettlementDetail, AppError> {
    require_admin(caller, "create_settlement")?;

    let (Some(partner_id), Some(period_start), Some(period_end)) =
        (input.partner_id, input.period_start, input.period_end)
    else {
        return Err(AppError::missing_fields("Missing required fields"));
    };
    if input.project_ids.is_empty() {
        return Err(AppError::missing_fields("Missing required fields"));
    }

    let projects =
        projects_repo::shared_with_partner(conn, partner_id, &input.project_ids).await?;
    if projects.is_empty() {
        return Err(AppError::bad_request(
            ErrorCode::NoValidProjects,
            "No valid projects found",
        ));
    }

    let mut lines = Vec::with_capacity(projects.len());
    for project in &projects {
        let amounts: Vec<_> = entries_repo::entries_for_project(conn, project.id)
            .await?
            .iter()
            .map(entries_repo::amount)
            .collect();
        lines.push(settle_project(
            project.id,
            project.share_rate.unwrap_or(0.0),
            &amounts,
        ));
    }
    let sums = totals(&lines);

    let header = SettlementCreate {
        partner_id,
        period_start,
        period_end,
        total_revenue: sums.total_revenue,
        total_expense: sums.total_expense,
        net_profit: sums.net_profit,
        partner_amount: sums.partner_amount,
        company_amount: sums.company_amount,
        memo: input.memo,
        created_by: caller.id,
    };
    let settlement = settlements_repo::create_settlement(
        conn,
        header,
        lines.iter().map(line_create).collect(),
    )
    .await?;

    info!(
        settlement_id = settlement.id,
        partner_id,
        projects = lines.len(),
        net_profit = sums.net_profit,
        "settlement drafted"
    );

    let mut details = with_details(conn, vec![settlement]).await?;
    details
        .pop()
        .ok_or_else(|| AppError::internal("settlement vanished after insert"))
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateSettlement {
    pub status: Option<SettlementStatus>,
    pub memo: Option<String>,
}

/// Stamp the matching timestamp when the status moves forward.
fn apply_update(settlement: &mut Settlement, patch: UpdateSettlement, now: OffsetDateTime) {
    if let Some(status) = patch.status {
        match status {
            SettlementStatus::Confirmed => settlement.confirmed_at = Some(now),
            SettlementStatus::Paid => settlement.paid_at = Some(now),
            SettlementStatus::Draft => {}
        }
        settlement.status = status;
    }
    if let Some(memo) = patch.memo {
        settlement.memo = Some(memo);
    }
}

pub async fn update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    caller: &User,
    id: i64,
    patch: UpdateSettlement,
) -> Result<SettlementDetail, AppError> {
    require_admin(caller, "update_settlement")?;
    let mut settlement = settlements_repo::require_settlement(conn, id).await?;
    apply_update(&mut settlement, patch, OffsetDateTime::now_utc());
    let settlement = settlements_repo::save_settlement(conn, settlement).await?;
    let mut details = with_details(conn, vec![settlement]).await?;
    details
        .pop()
        .ok_or_else(|| AppError::not_found(ErrorCode::SettlementNotFound, "Settlement not found"))
}

pub async fn delete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    caller: &User,
    id: i64,
) -> Result<(), AppError> {
    require_admin(caller, "delete_settlement")?;
    let settlement = settlements_repo::require_settlement(conn, id).await?;
    if settlement.status != SettlementStatus::Draft {
        return Err(AppError::bad_request(
            ErrorCode::SettlementNotDraft,
            "작성중 상태의 정산서만 삭제할 수 있습니다.",
        ));
    }
    Ok(settlements_repo::delete_settlement(conn, id).await?)
}

#[cfg(test)]
mod tests {
    use time::macros::{date, datetime};
    use uuid::Uuid;

    use super::*;

    fn draft() -> Settlement {
        Settlement {
            id: 1,
            partner_id: 2,
            period_start: date!(2025 - 01 - 01),
            period_end: date!(2025 - 03 - 31),
            total_revenue: 10_000,
            total_expense: 4_000,
            net_profit: 6_000,
            partner_amount: 3_000,
            company_amount: 3_000,
            status: SettlementStatus::Draft,
            memo: None,
            created_by: Some(Uuid::nil()),
            confirmed_at: None,
            paid_at: None,
            created_at: datetime!(2025-04-01 00:00 UTC),
            updated_at: datetime!(2025-04-01 00:00 UTC),
        }
    }

    #[test]
    fn confirming_and_paying_stamp_their_timestamps() {
        let now = datetime!(2025-04-02 03:00 UTC);
        let mut s = draft();
        apply_update(
            &mut s,
            UpdateSettlement {
                status: Some(SettlementStatus::Confirmed),
                memo: Some("1분기".into()),
            },
            now,
        );
        assert_eq!(s.status, SettlementStatus::Confirmed);
        assert_eq!(s.confirmed_at, Some(now));
        assert_eq!(s.paid_at, None);
        assert_eq!(s.memo.as_deref(), Some("1분기"));

        apply_update(
            &mut s,
            UpdateSettlement {
                status: Some(SettlementStatus::Paid),
                memo: None,
            },
            now,
        );
        assert_eq!(s.paid_at, Some(now));
        assert_eq!(s.memo.as_deref(), Some("1분기"));
    }
}
