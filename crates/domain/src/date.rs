use chrono::prelude::*;
use chrono::Duration;
use chrono_tz::Tz;

pub const MINUTE_MILLIS: i64 = 1000 * 60;
pub const HOUR_MILLIS: i64 = MINUTE_MILLIS * 60;
pub const DAY_MILLIS: i64 = HOUR_MILLIS * 24;

/// 2101-01-01T00:00:00Z, dates parsed from user input stop at year 2100
pub const MAX_TIMESTAMP: i64 = 4_133_980_800_000;

/// Whether `timestamp` lies between the epoch and `MAX_TIMESTAMP`, the range
/// every local time conversion is valid for
pub fn is_supported_timestamp(timestamp: i64) -> bool {
    (0..MAX_TIMESTAMP).contains(&timestamp)
}

/// A wall clock time in the configured timezone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalTime {
    pub hour: u32,
    pub minute: u32,
}

impl LocalTime {
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self { hour, minute })
        } else {
            None
        }
    }

    fn naive(&self) -> NaiveTime {
        NaiveTime::from_hms(self.hour, self.minute, 0)
    }
}

pub fn to_local(timestamp: i64, tz: &Tz) -> DateTime<Tz> {
    tz.timestamp_millis(timestamp)
}

/// Timestamp in millis of `time` on `date` in `tz`.
///
/// Ambiguous local times (DST fall back) resolve to the earliest instant and
/// nonexistent ones (DST spring forward) are shifted one hour later.
pub fn local_timestamp(date: NaiveDate, time: LocalTime, tz: &Tz) -> i64 {
    let naive = date.and_time(time.naive());
    match tz.from_local_datetime(&naive).earliest() {
        Some(dt) => dt.timestamp_millis(),
        None => {
            let shifted = naive + Duration::hours(1);
            tz.from_local_datetime(&shifted)
                .earliest()
                .map(|dt| dt.timestamp_millis())
                .unwrap_or_else(|| Utc.from_utc_datetime(&naive).timestamp_millis())
        }
    }
}

/// Next occurrence of `time` strictly after `now`: today if still ahead, otherwise tomorrow
pub fn next_occurrence_of(now: i64, time: LocalTime, tz: &Tz) -> i64 {
    let today = to_local(now, tz).date().naive_local();
    let candidate = local_timestamp(today, time, tz);
    if candidate > now {
        candidate
    } else {
        local_timestamp(today.succ(), time, tz)
    }
}

/// `time` on the day after the local date of `now`
pub fn tomorrow_at(now: i64, time: LocalTime, tz: &Tz) -> i64 {
    let today = to_local(now, tz).date().naive_local();
    local_timestamp(today.succ(), time, tz)
}

/// Parses `YYYY-MM-DD` (single digit months and days allowed)
pub fn parse_date(datestr: &str) -> anyhow::Result<NaiveDate> {
    let parts = datestr.split('-').collect::<Vec<_>>();
    if parts.len() != 3 {
        return Err(anyhow::Error::msg(datestr.to_string()));
    }
    let year = parts[0].parse::<i32>();
    let month = parts[1].parse::<u32>();
    let day = parts[2].parse::<u32>();

    match (year, month, day) {
        (Ok(year), Ok(month), Ok(day)) if (1970..=2100).contains(&year) => {
            NaiveDate::from_ymd_opt(year, month, day)
                .ok_or_else(|| anyhow::Error::msg(datestr.to_string()))
        }
        _ => Err(anyhow::Error::msg(datestr.to_string())),
    }
}

pub fn format_datetime(timestamp: i64, tz: &Tz) -> String {
    to_local(timestamp, tz).format("%d/%m/%Y %H:%M").to_string()
}
