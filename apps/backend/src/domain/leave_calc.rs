//! Annual-leave entitlement and day counting.
//!
//! Tenure follows full-calendar-unit semantics: a year or month only counts
//! once the same day-of-month has been reached, or the month has run out.

use serde::Serialize;
use time::{Date, Duration, Month, Weekday};

use crate::entities::enums::{LeaveRequestType, LeaveType};

/// How an entitlement is paid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GrantCadence {
    Monthly,
    Yearly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnualLeave {
    pub total_days: u32,
    pub grant_type: GrantCadence,
    pub months_worked: i32,
    pub years_worked: i32,
}

/// Full months from `from` to `to`; negative when `to` is earlier.
///
/// A single calendar month that ends on the last day of `to`'s month counts
/// as full, so Jan 31 to Feb 28 is one month.
pub fn full_months_between(from: Date, to: Date) -> i32 {
    if to < from {
        return -full_months_between(to, from);
    }
    let calendar = (to.year() - from.year()) * 12 + (to.month() as i32 - from.month() as i32);
    if calendar == 0 {
        return 0;
    }
    let month_end = to.day() == to.month().length(to.year());
    let last_month_partial = to.day() < from.day() && !(calendar == 1 && month_end);
    calendar - i32::from(last_month_partial)
}

pub fn full_years_between(from: Date, to: Date) -> i32 {
    full_months_between(from, to) / 12
}

/// `date` moved by `months` calendar months, clamped to the end of a shorter
/// month (Jan 31 + 1 month is Feb 28/29).
pub fn add_months(date: Date, months: i32) -> Date {
    let index = date.year() * 12 + (date.month() as i32 - 1) + months;
    let year = index.div_euclid(12);
    let month = Month::try_from((index.rem_euclid(12) + 1) as u8).unwrap_or(Month::January);
    let day = date.day().min(month.length(year));
    Date::from_calendar_date(year, month, day).unwrap_or(date)
}

/// Ordinal of the monthly grant due on `today` for someone hired on `hire`,
/// or `None` when no grant falls on that day. Only the first year accrues
/// monthly, and at most eleven grants are made.
pub fn monthly_grant_ordinal(hire: Date, today: Date) -> Option<i32> {
    if full_years_between(hire, today) >= 1 {
        return None;
    }
    let months = full_months_between(hire, today);
    if !(0..11).contains(&months) || add_months(hire, months) != today {
        return None;
    }
    Some(months + 1)
}

/// Days accrued on `target` for an employee hired on `hire`.
///
/// Under one year: one day per full month, at most 11. From the first
/// anniversary: 15 days plus one for every two further years, at most 25.
pub fn calculate_annual_leave(hire: Date, target: Date) -> AnnualLeave {
    let years_worked = full_years_between(hire, target);
    let months_worked = full_months_between(hire, target);

    if years_worked >= 1 {
        let additional = ((years_worked - 1) / 2).min(10);
        return AnnualLeave {
            total_days: (15 + additional) as u32,
            grant_type: GrantCadence::Yearly,
            months_worked,
            years_worked,
        };
    }

    AnnualLeave {
        total_days: months_worked.clamp(0, 11) as u32,
        grant_type: GrantCadence::Monthly,
        months_worked,
        years_worked,
    }
}

/// Entitlement for calendar `year`.
pub fn calculate_annual_leave_for_year(hire: Date, year: i32) -> (u32, GrantCadence) {
    let (Ok(year_start), Ok(year_end)) = (
        Date::from_calendar_date(year, Month::January, 1),
        Date::from_calendar_date(year, Month::December, 31),
    ) else {
        return (0, GrantCadence::Monthly);
    };

    if year_end < hire {
        return (0, GrantCadence::Monthly);
    }

    let years_at_start = full_years_between(hire, year_start);
    let years_at_end = full_years_between(hire, year_end);

    if years_at_end >= 1 {
        if years_at_start < 1 {
            return (15, GrantCadence::Yearly);
        }
        let additional = (years_at_start / 2).min(10);
        return ((15 + additional) as u32, GrantCadence::Yearly);
    }

    let months = months_worked_in_year(hire, year);
    (months.min(11), GrantCadence::Monthly)
}

/// Calendar months of `year` from the hire month on (whole year when hired
/// earlier).
pub fn months_worked_in_year(hire: Date, year: i32) -> u32 {
    if hire.year() > year {
        return 0;
    }
    if hire.year() < year {
        return 12;
    }
    13 - hire.month() as u32
}

/// Weekdays in `start..=end`.
pub fn working_days(start: Date, end: Date) -> u32 {
    let mut days = 0;
    let mut current = start;
    while current <= end {
        if !matches!(current.weekday(), Weekday::Saturday | Weekday::Sunday) {
            days += 1;
        }
        current += Duration::days(1);
    }
    days
}

/// Weekdays in `start..=end`, in order.
pub fn weekdays_in_range(start: Date, end: Date) -> Vec<Date> {
    let mut out = Vec::new();
    let mut current = start;
    while current <= end {
        if !matches!(current.weekday(), Weekday::Saturday | Weekday::Sunday) {
            out.push(current);
        }
        current += Duration::days(1);
    }
    out
}

pub fn days_used(request_type: LeaveRequestType, start: Date, end: Date) -> f64 {
    match request_type {
        LeaveRequestType::HalfAm | LeaveRequestType::HalfPm => 0.5,
        _ => f64::from(working_days(start, end)),
    }
}

/// Balance bucket a request draws from.
pub fn balance_type_for(request_type: LeaveRequestType) -> LeaveType {
    match request_type {
        LeaveRequestType::Annual | LeaveRequestType::HalfAm | LeaveRequestType::HalfPm => {
            LeaveType::Annual
        }
        LeaveRequestType::Compensatory => LeaveType::Compensatory,
        LeaveRequestType::Special => LeaveType::Special,
    }
}

/// "N일", "N일 4시간" or "4시간".
pub fn format_leave_days(days: f64) -> String {
    if days == 0.0 {
        return "0일".to_string();
    }
    let whole = days.floor();
    let frac = days - whole;
    if frac == 0.0 {
        format!("{}일", whole as i64)
    } else if frac == 0.5 {
        if whole > 0.0 {
            format!("{}일 4시간", whole as i64)
        } else {
            "4시간".to_string()
        }
    } else {
        format!("{days}일")
    }
}

pub fn request_type_label(t: LeaveRequestType) -> &'static str {
    match t {
        LeaveRequestType::Annual => "연차",
        LeaveRequestType::HalfAm => "오전반차",
        LeaveRequestType::HalfPm => "오후반차",
        LeaveRequestType::Compensatory => "대체휴무",
        LeaveRequestType::Special => "특별휴가",
    }
}

pub fn leave_type_label(t: LeaveType) -> &'static str {
    match t {
        LeaveType::Annual => "연차",
        LeaveType::Compensatory => "대체휴무",
        LeaveType::Special => "특별휴가",
    }
}

/// Label used in grant history; a half day of annual leave reads "반차".
pub fn grant_log_label(t: LeaveType, days: f64) -> &'static str {
    match t {
        LeaveType::Annual if days == 0.5 => "반차",
        other => leave_type_label(other),
    }
}
