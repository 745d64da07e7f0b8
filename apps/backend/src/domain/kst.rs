//! Korea Standard Time helpers. Calendar days ("today", `work_date`) are
//! always KST days; timestamps are stored in UTC.

use time::format_description::BorrowedFormatItem;
use time::macros::{format_description, offset};
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};

pub const KST: UtcOffset = offset!(+9);

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
const HHMM_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[hour]:[minute]");

pub fn now_kst() -> OffsetDateTime {
    OffsetDateTime::now_utc().to_offset(KST)
}

pub fn today_kst() -> Date {
    now_kst().date()
}

pub fn to_kst(ts: OffsetDateTime) -> OffsetDateTime {
    ts.to_offset(KST)
}

/// Wall-clock `time` on `date` in Korea, as a UTC timestamp.
pub fn at_kst(date: Date, time: Time) -> OffsetDateTime {
    PrimitiveDateTime::new(date, time)
        .assume_offset(KST)
        .to_offset(UtcOffset::UTC)
}

/// `YYYY-MM-DD`
pub fn parse_date(s: &str) -> Option<Date> {
    Date::parse(s.trim(), DATE_FORMAT).ok()
}

pub fn format_date(d: Date) -> String {
    d.format(DATE_FORMAT).unwrap_or_default()
}

/// `HH:mm`, 24-hour.
pub fn parse_hhmm(s: &str) -> Option<Time> {
    Time::parse(s.trim(), HHMM_FORMAT).ok()
}

/// `HH:mm` of `ts` on the Korean clock.
pub fn format_hhmm_kst(ts: OffsetDateTime) -> String {
    to_kst(ts).time().format(HHMM_FORMAT).unwrap_or_default()
}
