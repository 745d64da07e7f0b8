//! Property tests for the leave, attendance and settlement arithmetic.

use proptest::prelude::*;
use time::{Date, Duration};

use super::leave_calc::{
    calculate_annual_leave, calculate_annual_leave_for_year, full_months_between,
    months_worked_in_year, weekdays_in_range, working_days, GrantCadence,
};
use super::settlement::{round_half_up, settle_project, totals, EntryAmount};
use super::test_fixtures::proptest_config;
use super::work_time::{format_work_time, work_time_minutes};
use crate::entities::enums::{FinancialKind, FinancialStatus};

fn any_date() -> impl Strategy<Value = Date> {
    // 2000-01-01 .. roughly 2040
    (0i64..14_600).prop_map(|offset| {
        Date::from_calendar_date(2000, time::Month::January, 1).unwrap() + Duration::days(offset)
    })
}

fn any_entry() -> impl Strategy<Value = EntryAmount> {
    (
        prop_oneof![Just(FinancialKind::Revenue), Just(FinancialKind::Expense)],
        prop_oneof![
            Just(FinancialStatus::Planned),
            Just(FinancialStatus::Paid),
            Just(FinancialStatus::Canceled)
        ],
        0i64..100_000_000,
    )
        .prop_map(|(kind, status, amount)| EntryAmount { kind, status, amount })
}

proptest! {
    #![proptest_config(proptest_config())]

    #[test]
    fn prop_working_days_never_exceed_span(start in any_date(), len in 0i64..400) {
        let end = start + Duration::days(len);
        let days = working_days(start, end);
        prop_assert!(i64::from(days) <= len + 1);
        prop_assert_eq!(days as usize, weekdays_in_range(start, end).len());
        // Any seven consecutive days hold exactly five weekdays.
        if len == 6 {
            prop_assert_eq!(days, 5);
        }
    }

    #[test]
    fn prop_partner_and_company_split_net_exactly(
        entries in prop::collection::vec(any_entry(), 0..20),
        rate in 0u32..=100,
    ) {
        let line = settle_project(1, f64::from(rate), &entries);
        prop_assert_eq!(line.partner_amount + line.company_amount, line.net_profit);
        prop_assert_eq!(line.revenue - line.expense, line.net_profit);
        if line.net_profit >= 0 {
            prop_assert!(line.partner_amount <= line.net_profit);
            prop_assert!(line.partner_amount >= 0);
        }

        let t = totals(std::slice::from_ref(&line));
        prop_assert_eq!(t.partner_amount + t.company_amount, t.net_profit);
    }

    #[test]
    fn prop_round_half_up_is_within_half(x in -1.0e9f64..1.0e9) {
        let r = round_half_up(x) as f64;
        prop_assert!((r - x).abs() <= 0.5 + 1e-6);
        prop_assert_eq!(round_half_up(x.floor() + 0.5), x.floor() as i64 + 1);
    }

    #[test]
    fn prop_entitlement_bounds(hire in any_date(), target in any_date()) {
        let leave = calculate_annual_leave(hire, target);
        match leave.grant_type {
            GrantCadence::Monthly => prop_assert!(leave.total_days <= 11),
            GrantCadence::Yearly => prop_assert!((15..=25).contains(&leave.total_days)),
        }
        prop_assert_eq!(
            full_months_between(hire, target),
            -full_months_between(target, hire)
        );
    }

    #[test]
    fn prop_yearly_entitlement_never_shrinks(hire in any_date(), year in 2000i32..2045) {
        let (this_year, _) = calculate_annual_leave_for_year(hire, year);
        let (next_year, _) = calculate_annual_leave_for_year(hire, year + 1);
        if this_year >= 15 {
            prop_assert!(next_year >= this_year);
        }
        prop_assert!(months_worked_in_year(hire, year) <= 12);
    }

    #[test]
    fn prop_work_minutes_never_negative(start in any_date(), mins in 0i64..(24 * 60)) {
        let check_in = start.midnight().assume_utc();
        let check_out = check_in + Duration::minutes(mins);
        match work_time_minutes(Some(check_in), Some(check_out)) {
            None => prop_assert_eq!(mins, 0),
            Some(m) => {
                prop_assert!(m >= 0);
                prop_assert!(m <= mins);
                prop_assert!(!format_work_time(m).is_empty());
            }
        }
    }
}
