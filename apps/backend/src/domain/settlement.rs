//! Partner revenue-share arithmetic. Money is whole KRW.

use serde::Serialize;

use crate::entities::enums::{FinancialKind, FinancialStatus};

/// `Math.round` semantics: halves go up (towards positive infinity).
pub fn round_half_up(x: f64) -> i64 {
    (x + 0.5).floor() as i64
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryAmount {
    pub kind: FinancialKind,
    pub status: FinancialStatus,
    pub amount: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettlementLine {
    pub project_id: i64,
    pub revenue: i64,
    pub expense: i64,
    pub net_profit: i64,
    pub share_rate: f64,
    pub partner_amount: i64,
    pub company_amount: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SettlementTotals {
    pub total_revenue: i64,
    pub total_expense: i64,
    pub net_profit: i64,
    pub partner_amount: i64,
    pub company_amount: i64,
}

/// One project's split. Canceled entries are ignored.
pub fn settle_project(project_id: i64, share_rate: f64, entries: &[EntryAmount]) -> SettlementLine {
    let (revenue, expense) = entries
        .iter()
        .filter(|e| e.status != FinancialStatus::Canceled)
        .fold((0i64, 0i64), |(rev, exp), e| match e.kind {
            FinancialKind::Revenue => (rev + e.amount, exp),
            FinancialKind::Expense => (rev, exp + e.amount),
        });

    let net_profit = revenue - expense;
    let partner_amount = round_half_up(net_profit as f64 * share_rate / 100.0);

    SettlementLine {
        project_id,
        revenue,
        expense,
        net_profit,
        share_rate,
        partner_amount,
        company_amount: net_profit - partner_amount,
    }
}

pub fn totals(lines: &[SettlementLine]) -> SettlementTotals {
    lines.iter().fold(SettlementTotals::default(), |acc, l| SettlementTotals {
        total_revenue: acc.total_revenue + l.revenue,
        total_expense: acc.total_expense + l.expense,
        net_profit: acc.net_profit + l.net_profit,
        partner_amount: acc.partner_amount + l.partner_amount,
        company_amount: acc.company_amount + l.company_amount,
    })
}
