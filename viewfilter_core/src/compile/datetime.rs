//! Date comparisons for filters
//!
//! Values are read as calendar days in the offset of `now`: `date_is` covers the
//! whole day, `date_before` ends before it starts and `date_after` begins after
//! it ends.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc, Weekday};

use crate::filter::{FilterValue, Operator};
use crate::period::{
    DateRange, RelativePeriod, end_of_day, resolve_period, resolve_period_key, start_of_day,
};
use crate::predicate::{FieldTest, Operand, Predicate};

/// Compile `date_is`, `date_is_not`, `date_before` or `date_after`
pub(super) fn compile_day(
    path: &str,
    operator: &Operator,
    value: Option<&FilterValue>,
    now: &DateTime<FixedOffset>,
) -> Option<Predicate> {
    let (start, end) = day_bounds(parse_day(value?, now)?, now)?;
    match operator {
        Operator::DateIs => Some(Predicate::field(
            path,
            FieldTest::Range {
                gte: start,
                lte: end,
            },
        )),
        Operator::DateIsNot => Some(Predicate::Or(vec![
            Predicate::field(path, FieldTest::Lt(start)),
            Predicate::field(path, FieldTest::Gt(end)),
        ])),
        Operator::DateBefore => Some(Predicate::field(path, FieldTest::Lt(start))),
        Operator::DateAfter => Some(Predicate::field(path, FieldTest::Gt(end))),
        _ => None,
    }
}

/// Compile `date_between`: from the start of the first day to the end of the last
pub(super) fn compile_days_between(
    path: &str,
    range: Option<(&FilterValue, &FilterValue)>,
    now: &DateTime<FixedOffset>,
) -> Option<Predicate> {
    let (from, to) = range?;
    let (start, _) = day_bounds(parse_day(from, now)?, now)?;
    let (_, end) = day_bounds(parse_day(to, now)?, now)?;
    Some(Predicate::field(path, FieldTest::Range { gte: start, lte: end }))
}

/// Compile a relative period into an inclusive range
pub(super) fn compile_period(
    path: &str,
    period: RelativePeriod,
    now: &DateTime<FixedOffset>,
    week_start: Weekday,
) -> Option<Predicate> {
    let range = resolve_period(period, now, week_start)?;
    Some(range_predicate(path, range))
}

/// Compile `date_is_relative` from its persisted period key
pub(super) fn compile_relative(
    path: &str,
    key: Option<&str>,
    now: &DateTime<FixedOffset>,
    week_start: Weekday,
) -> Option<Predicate> {
    let range = resolve_period_key(key?, now, week_start)?;
    Some(range_predicate(path, range))
}

fn range_predicate(path: &str, range: DateRange<FixedOffset>) -> Predicate {
    Predicate::field(
        path,
        FieldTest::Range {
            gte: Operand::Date(range.start.with_timezone(&Utc)),
            lte: Operand::Date(range.end.with_timezone(&Utc)),
        },
    )
}

/// Read a filter value as a calendar day in the offset of `now`.
///
/// Accepts epoch milliseconds, RFC 3339 instants, `YYYY-MM-DD` days and
/// `YYYY-MM-DDTHH:MM[:SS]` local date-times.
fn parse_day(value: &FilterValue, now: &DateTime<FixedOffset>) -> Option<NaiveDate> {
    let offset = now.timezone();
    if let FilterValue::Number(millis) = value {
        let instant = DateTime::from_timestamp_millis(millis.as_i64()?)?;
        return Some(instant.with_timezone(&offset).date_naive());
    }

    let text = value.as_text()?;
    let text = text.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
        return Some(instant.with_timezone(&offset).date_naive());
    }
    if let Ok(day) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(day);
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .map(|local| local.date())
}

fn day_bounds(day: NaiveDate, now: &DateTime<FixedOffset>) -> Option<(Operand, Operand)> {
    let offset = now.timezone();
    let start = start_of_day(day, &offset)?.with_timezone(&Utc);
    let end = end_of_day(day, &offset)?.with_timezone(&Utc);
    Some((Operand::Date(start), Operand::Date(end)))
}
