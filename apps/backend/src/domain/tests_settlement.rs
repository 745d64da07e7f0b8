use super::settlement::*;
use crate::entities::enums::{FinancialKind, FinancialStatus};

fn revenue(amount: i64) -> EntryAmount {
    EntryAmount {
        kind: FinancialKind::Revenue,
        status: FinancialStatus::Paid,
        amount,
    }
}

fn expense(amount: i64) -> EntryAmount {
    EntryAmount {
        kind: FinancialKind::Expense,
        status: FinancialStatus::Planned,
        amount,
    }
}

#[test]
fn halves_round_towards_positive_infinity() {
    assert_eq!(round_half_up(2.5), 3);
    assert_eq!(round_half_up(2.4), 2);
    assert_eq!(round_half_up(-2.5), -2);
    assert_eq!(round_half_up(-2.6), -3);
    assert_eq!(round_half_up(0.0), 0);
}

#[test]
fn canceled_entries_do_not_count() {
    let canceled = EntryAmount {
        status: FinancialStatus::Canceled,
        ..revenue(500_000)
    };
    let line = settle_project(7, 30.0, &[revenue(1_000_000), expense(300_000), canceled]);
    assert_eq!(line.project_id, 7);
    assert_eq!(line.revenue, 1_000_000);
    assert_eq!(line.expense, 300_000);
    assert_eq!(line.net_profit, 700_000);
    assert_eq!(line.partner_amount, 210_000);
    assert_eq!(line.company_amount, 490_000);
}

#[test]
fn partner_share_rounds_and_company_takes_remainder() {
    let line = settle_project(1, 50.0, &[revenue(1_001)]);
    assert_eq!(line.partner_amount, 501);
    assert_eq!(line.company_amount, 500);

    let loss = settle_project(2, 50.0, &[expense(1_001)]);
    assert_eq!(loss.net_profit, -1_001);
    assert_eq!(loss.partner_amount, -500);
    assert_eq!(loss.company_amount, -501);
}

#[test]
fn no_entries_settle_to_zero() {
    let line = settle_project(3, 40.0, &[]);
    assert_eq!(line.net_profit, 0);
    assert_eq!(line.partner_amount, 0);
    assert_eq!(line.company_amount, 0);
}

#[test]
fn totals_sum_every_line() {
    let lines = vec![
        settle_project(1, 30.0, &[revenue(1_000_000), expense(300_000)]),
        settle_project(2, 50.0, &[revenue(1_001)]),
    ];
    let t = totals(&lines);
    assert_eq!(t.total_revenue, 1_001_001);
    assert_eq!(t.total_expense, 300_000);
    assert_eq!(t.net_profit, 701_001);
    assert_eq!(t.partner_amount, 210_501);
    assert_eq!(t.company_amount, 490_500);
    assert_eq!(totals(&[]), SettlementTotals::default());
}
