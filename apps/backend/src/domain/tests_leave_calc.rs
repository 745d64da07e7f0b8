use time::macros::date;

use super::leave_calc::*;
use crate::entities::enums::{LeaveRequestType, LeaveType};

#[test]
fn first_anniversary_switches_to_yearly_grant() {
    let hire = date!(2024 - 03 - 15);

    let before = calculate_annual_leave(hire, date!(2025 - 03 - 14));
    assert_eq!(before.total_days, 11);
    assert_eq!(before.grant_type, GrantCadence::Monthly);
    assert_eq!(before.years_worked, 0);

    let on = calculate_annual_leave(hire, date!(2025 - 03 - 15));
    assert_eq!(on.total_days, 15);
    assert_eq!(on.grant_type, GrantCadence::Yearly);
    assert_eq!(on.months_worked, 12);
}

#[test]
fn first_year_accrues_one_day_per_full_month() {
    let hire = date!(2025 - 01 - 31);
    assert_eq!(calculate_annual_leave(hire, date!(2025 - 02 - 27)).total_days, 0);
    assert_eq!(calculate_annual_leave(hire, date!(2025 - 02 - 28)).total_days, 1);
    assert_eq!(calculate_annual_leave(hire, date!(2025 - 03 - 30)).total_days, 1);
    assert_eq!(calculate_annual_leave(hire, date!(2025 - 03 - 31)).total_days, 2);
    assert_eq!(calculate_annual_leave(hire, date!(2024 - 12 - 01)).total_days, 0);
}

#[test]
fn seniority_bonus_every_two_years_capped() {
    let hire = date!(2020 - 01 - 01);
    assert_eq!(calculate_annual_leave(hire, date!(2023 - 01 - 01)).total_days, 16);
    assert_eq!(calculate_annual_leave(hire, date!(2025 - 01 - 01)).total_days, 17);
    assert_eq!(
        calculate_annual_leave(date!(1990 - 06 - 01), date!(2030 - 06 - 01)).total_days,
        25
    );
}

#[test]
fn month_difference_handles_order_and_day_of_month() {
    assert_eq!(full_months_between(date!(2025 - 01 - 10), date!(2025 - 03 - 15)), 2);
    assert_eq!(full_months_between(date!(2025 - 03 - 15), date!(2025 - 01 - 10)), -2);
    assert_eq!(full_months_between(date!(2025 - 01 - 31), date!(2025 - 02 - 28)), 1);
    assert_eq!(full_months_between(date!(2025 - 03 - 31), date!(2025 - 04 - 30)), 1);
    assert_eq!(full_months_between(date!(2024 - 01 - 31), date!(2024 - 02 - 28)), 0);
    assert_eq!(full_months_between(date!(2025 - 01 - 31), date!(2025 - 04 - 30)), 2);
    assert_eq!(full_months_between(date!(2025 - 02 - 10), date!(2025 - 02 - 28)), 0);
    assert_eq!(full_years_between(date!(2023 - 06 - 02), date!(2025 - 06 - 01)), 1);
}

#[test]
fn entitlement_per_calendar_year() {
    let hire = date!(2024 - 03 - 15);
    assert_eq!(calculate_annual_leave_for_year(hire, 2023), (0, GrantCadence::Monthly));
    assert_eq!(calculate_annual_leave_for_year(hire, 2024), (10, GrantCadence::Monthly));
    assert_eq!(calculate_annual_leave_for_year(hire, 2025), (15, GrantCadence::Yearly));
    assert_eq!(calculate_annual_leave_for_year(hire, 2027), (16, GrantCadence::Yearly));

    let january = date!(2024 - 01 - 01);
    assert_eq!(calculate_annual_leave_for_year(january, 2024), (11, GrantCadence::Monthly));
}

#[test]
fn months_in_year_by_hire_date() {
    let hire = date!(2025 - 09 - 20);
    assert_eq!(months_worked_in_year(hire, 2024), 0);
    assert_eq!(months_worked_in_year(hire, 2025), 4);
    assert_eq!(months_worked_in_year(hire, 2026), 12);
}

#[test]
fn weekends_are_not_working_days() {
    // 2025-03-07 is a Friday.
    assert_eq!(working_days(date!(2025 - 03 - 07), date!(2025 - 03 - 10)), 2);
    assert_eq!(working_days(date!(2025 - 03 - 08), date!(2025 - 03 - 09)), 0);
    assert_eq!(working_days(date!(2025 - 03 - 10), date!(2025 - 03 - 07)), 0);
    assert_eq!(
        weekdays_in_range(date!(2025 - 03 - 07), date!(2025 - 03 - 10)),
        vec![date!(2025 - 03 - 07), date!(2025 - 03 - 10)]
    );
}

#[test]
fn half_days_cost_half_regardless_of_range() {
    let mon = date!(2025 - 03 - 03);
    let fri = date!(2025 - 03 - 07);
    assert_eq!(days_used(LeaveRequestType::HalfAm, mon, fri), 0.5);
    assert_eq!(days_used(LeaveRequestType::HalfPm, mon, mon), 0.5);
    assert_eq!(days_used(LeaveRequestType::Annual, mon, fri), 5.0);
    assert_eq!(days_used(LeaveRequestType::Special, fri, fri), 1.0);
}

#[test]
fn requests_draw_from_the_right_bucket() {
    assert_eq!(balance_type_for(LeaveRequestType::HalfPm), LeaveType::Annual);
    assert_eq!(balance_type_for(LeaveRequestType::Compensatory), LeaveType::Compensatory);
    assert_eq!(balance_type_for(LeaveRequestType::Special), LeaveType::Special);
}

#[test]
fn day_counts_render_in_korean() {
    assert_eq!(format_leave_days(0.0), "0일");
    assert_eq!(format_leave_days(3.0), "3일");
    assert_eq!(format_leave_days(1.5), "1일 4시간");
    assert_eq!(format_leave_days(0.5), "4시간");
    assert_eq!(format_leave_days(0.25), "0.25일");
}

#[test]
fn labels() {
    assert_eq!(request_type_label(LeaveRequestType::HalfAm), "오전반차");
    assert_eq!(leave_type_label(LeaveType::Compensatory), "대체휴무");
    assert_eq!(grant_log_label(LeaveType::Annual, 0.5), "반차");
    assert_eq!(grant_log_label(LeaveType::Annual, 1.0), "연차");
    assert_eq!(grant_log_label(LeaveType::Special, 0.5), "특별휴가");
}

#[test]
fn add_months_clamps_to_month_end() {
    assert_eq!(add_months(date!(2025 - 01 - 31), 1), date!(2025 - 02 - 28));
    assert_eq!(add_months(date!(2024 - 01 - 31), 1), date!(2024 - 02 - 29));
    assert_eq!(add_months(date!(2024 - 11 - 15), 3), date!(2025 - 02 - 15));
    assert_eq!(add_months(date!(2025 - 03 - 15), 0), date!(2025 - 03 - 15));
}

#[test]
fn monthly_grants_fall_on_the_hire_day_of_month() {
    let hire = date!(2025 - 02 - 05);
    assert_eq!(monthly_grant_ordinal(hire, date!(2025 - 03 - 05)), Some(2));
    assert_eq!(monthly_grant_ordinal(hire, date!(2025 - 03 - 06)), None);
    assert_eq!(monthly_grant_ordinal(hire, date!(2025 - 12 - 05)), Some(11));
    // Eleventh full month: the monthly allowance is exhausted.
    assert_eq!(monthly_grant_ordinal(hire, date!(2026 - 01 - 05)), None);
    assert_eq!(monthly_grant_ordinal(hire, date!(2026 - 02 - 05)), None);
}

#[test]
fn month_end_hires_are_granted_on_the_shorter_month_end() {
    assert_eq!(monthly_grant_ordinal(date!(2025 - 01 - 31), date!(2025 - 02 - 28)), Some(2));
    assert_eq!(monthly_grant_ordinal(date!(2025 - 03 - 31), date!(2025 - 04 - 30)), Some(2));
    assert_eq!(monthly_grant_ordinal(date!(2025 - 01 - 31), date!(2025 - 02 - 27)), None);
}
