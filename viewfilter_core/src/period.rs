//! Relative date periods resolved against a fixed "now"
//!
//! Calendar periods resolve to `[first day 00:00:00.000, last day 23:59:59.999]`
//! in the time zone of `now`. The rolling `last_N_days` periods run from the
//! start of the day N days ago up to `now` itself.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, TimeZone, Weekday};
use log::debug;
use serde::{Deserialize, Serialize};

/// Symbolic date range anchored to the moment of compilation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelativePeriod {
    #[serde(rename = "today")]
    Today,
    #[serde(rename = "yesterday")]
    Yesterday,
    #[serde(rename = "tomorrow")]
    Tomorrow,
    #[serde(rename = "this_week")]
    ThisWeek,
    #[serde(rename = "last_week")]
    LastWeek,
    #[serde(rename = "next_week")]
    NextWeek,
    #[serde(rename = "this_month")]
    ThisMonth,
    #[serde(rename = "last_month")]
    LastMonth,
    #[serde(rename = "next_month")]
    NextMonth,
    #[serde(rename = "this_year")]
    ThisYear,
    #[serde(rename = "last_year")]
    LastYear,
    #[serde(rename = "next_year")]
    NextYear,
    #[serde(rename = "last_7_days")]
    Last7Days,
    #[serde(rename = "last_30_days")]
    Last30Days,
    #[serde(rename = "last_90_days")]
    Last90Days,
    #[serde(rename = "last_365_days")]
    Last365Days,
}

impl RelativePeriod {
    pub const ALL: [RelativePeriod; 16] = [
        RelativePeriod::Today,
        RelativePeriod::Yesterday,
        RelativePeriod::Tomorrow,
        RelativePeriod::ThisWeek,
        RelativePeriod::LastWeek,
        RelativePeriod::NextWeek,
        RelativePeriod::ThisMonth,
        RelativePeriod::LastMonth,
        RelativePeriod::NextMonth,
        RelativePeriod::ThisYear,
        RelativePeriod::LastYear,
        RelativePeriod::NextYear,
        RelativePeriod::Last7Days,
        RelativePeriod::Last30Days,
        RelativePeriod::Last90Days,
        RelativePeriod::Last365Days,
    ];

    pub fn key(self) -> &'static str {
        match self {
            RelativePeriod::Today => "today",
            RelativePeriod::Yesterday => "yesterday",
            RelativePeriod::Tomorrow => "tomorrow",
            RelativePeriod::ThisWeek => "this_week",
            RelativePeriod::LastWeek => "last_week",
            RelativePeriod::NextWeek => "next_week",
            RelativePeriod::ThisMonth => "this_month",
            RelativePeriod::LastMonth => "last_month",
            RelativePeriod::NextMonth => "next_month",
            RelativePeriod::ThisYear => "this_year",
            RelativePeriod::LastYear => "last_year",
            RelativePeriod::NextYear => "next_year",
            RelativePeriod::Last7Days => "last_7_days",
            RelativePeriod::Last30Days => "last_30_days",
            RelativePeriod::Last90Days => "last_90_days",
            RelativePeriod::Last365Days => "last_365_days",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RelativePeriod::Today => "today",
            RelativePeriod::Yesterday => "yesterday",
            RelativePeriod::Tomorrow => "tomorrow",
            RelativePeriod::ThisWeek => "this week",
            RelativePeriod::LastWeek => "last week",
            RelativePeriod::NextWeek => "next week",
            RelativePeriod::ThisMonth => "this month",
            RelativePeriod::LastMonth => "last month",
            RelativePeriod::NextMonth => "next month",
            RelativePeriod::ThisYear => "this year",
            RelativePeriod::LastYear => "last year",
            RelativePeriod::NextYear => "next year",
            RelativePeriod::Last7Days => "last 7 days",
            RelativePeriod::Last30Days => "last 30 days",
            RelativePeriod::Last90Days => "last 90 days",
            RelativePeriod::Last365Days => "last 365 days",
        }
    }

    /// Length of a rolling period in days
    fn rolling_days(self) -> Option<u64> {
        match self {
            RelativePeriod::Last7Days => Some(7),
            RelativePeriod::Last30Days => Some(30),
            RelativePeriod::Last90Days => Some(90),
            RelativePeriod::Last365Days => Some(365),
            _ => None,
        }
    }
}

/// A key outside the relative period vocabulary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPeriod(pub String);

impl fmt::Display for UnknownPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown relative period '{}'", self.0)
    }
}

impl std::error::Error for UnknownPeriod {}

impl FromStr for RelativePeriod {
    type Err = UnknownPeriod;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        let key = key.trim();
        RelativePeriod::ALL
            .into_iter()
            .find(|period| period.key() == key)
            .ok_or_else(|| UnknownPeriod(key.to_string()))
    }
}

impl fmt::Display for RelativePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Inclusive instant range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange<Tz: TimeZone> {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}

/// Resolve a period against `now`; weeks begin on `week_start`.
///
/// Returns `None` only when the calendar arithmetic leaves chrono's range.
pub fn resolve_period<Tz: TimeZone>(
    period: RelativePeriod,
    now: &DateTime<Tz>,
    week_start: Weekday,
) -> Option<DateRange<Tz>> {
    if let Some(days) = period.rolling_days() {
        let first = now.date_naive().checked_sub_days(Days::new(days))?;
        return Some(DateRange {
            start: start_of_day(first, &now.timezone())?,
            end: now.clone(),
        });
    }

    let today = now.date_naive();
    let (first, last) = match period {
        RelativePeriod::Today => (today, today),
        RelativePeriod::Yesterday => {
            let day = today.pred_opt()?;
            (day, day)
        }
        RelativePeriod::Tomorrow => {
            let day = today.succ_opt()?;
            (day, day)
        }
        RelativePeriod::ThisWeek => week_containing(today, week_start, 0)?,
        RelativePeriod::LastWeek => week_containing(today, week_start, -1)?,
        RelativePeriod::NextWeek => week_containing(today, week_start, 1)?,
        RelativePeriod::ThisMonth => month_containing(today, 0)?,
        RelativePeriod::LastMonth => month_containing(today, -1)?,
        RelativePeriod::NextMonth => month_containing(today, 1)?,
        RelativePeriod::ThisYear => whole_year(today.year())?,
        RelativePeriod::LastYear => whole_year(today.year() - 1)?,
        RelativePeriod::NextYear => whole_year(today.year() + 1)?,
        RelativePeriod::Last7Days
        | RelativePeriod::Last30Days
        | RelativePeriod::Last90Days
        | RelativePeriod::Last365Days => return None,
    };

    let tz = now.timezone();
    Some(DateRange {
        start: start_of_day(first, &tz)?,
        end: end_of_day(last, &tz)?,
    })
}

/// Resolve a persisted period key; unknown keys resolve to nothing
pub fn resolve_period_key<Tz: TimeZone>(
    key: &str,
    now: &DateTime<Tz>,
    week_start: Weekday,
) -> Option<DateRange<Tz>> {
    match key.parse::<RelativePeriod>() {
        Ok(period) => resolve_period(period, now, week_start),
        Err(error) => {
            debug!("{}", error);
            None
        }
    }
}

/// 00:00:00.000 local time on `day`
pub fn start_of_day<Tz: TimeZone>(day: NaiveDate, tz: &Tz) -> Option<DateTime<Tz>> {
    tz.from_local_datetime(&day.and_hms_milli_opt(0, 0, 0, 0)?)
        .earliest()
}

/// 23:59:59.999 local time on `day`
pub fn end_of_day<Tz: TimeZone>(day: NaiveDate, tz: &Tz) -> Option<DateTime<Tz>> {
    tz.from_local_datetime(&day.and_hms_milli_opt(23, 59, 59, 999)?)
        .latest()
}

fn week_containing(
    today: NaiveDate,
    week_start: Weekday,
    offset_weeks: i64,
) -> Option<(NaiveDate, NaiveDate)> {
    let since_start =
        (7 + today.weekday().num_days_from_sunday() - week_start.num_days_from_sunday()) % 7;
    let first = today.checked_sub_days(Days::new(u64::from(since_start)))?;
    let first = shift_days(first, offset_weeks * 7)?;
    Some((first, first.checked_add_days(Days::new(6))?))
}

fn month_containing(today: NaiveDate, offset_months: i32) -> Option<(NaiveDate, NaiveDate)> {
    let index = today.year() * 12 + today.month0() as i32 + offset_months;
    let first = NaiveDate::from_ymd_opt(index.div_euclid(12), index.rem_euclid(12) as u32 + 1, 1)?;
    let last = first.checked_add_months(Months::new(1))?.pred_opt()?;
    Some((first, last))
}

fn whole_year(year: i32) -> Option<(NaiveDate, NaiveDate)> {
    Some((
        NaiveDate::from_ymd_opt(year, 1, 1)?,
        NaiveDate::from_ymd_opt(year, 12, 31)?,
    ))
}

fn shift_days(day: NaiveDate, days: i64) -> Option<NaiveDate> {
    if days >= 0 {
        day.checked_add_days(Days::new(days.unsigned_abs()))
    } else {
        day.checked_sub_days(Days::new(days.unsigned_abs()))
    }
}
