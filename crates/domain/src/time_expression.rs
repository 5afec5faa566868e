//! Natural-language time expressions in French and English.
//!
//! Understands relative offsets ("dans 2h", "in 30 minutes", "dans 1h30"),
//! day words ("demain", "tomorrow", "après-demain"), weekday names, ISO dates
//! and clock times ("14h", "14h30", "14:30", "9am", "midi"). A day without a
//! clock time resolves to 09:00 local time.

use crate::date::{
    is_supported_timestamp, local_timestamp, to_local, LocalTime, DAY_MILLIS, HOUR_MILLIS,
    MINUTE_MILLIS,
};
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use chrono_tz::Tz;

const DEFAULT_TIME: LocalTime = LocalTime { hour: 9, minute: 0 };

const FILLERS: [&str; 10] = [
    "à", "a", "at", "le", "on", "prochain", "prochaine", "next", "this", "ce",
];

#[derive(Debug, Clone, Copy, PartialEq)]
enum DaySpec {
    Offset(i64),
    Weekday(Weekday),
    Date(NaiveDate),
}

/// Resolves `input` to a timestamp in millis, anchored at `now` in `tz`.
///
/// The result is not guaranteed to be in the future: "9h" said at 10:00
/// resolves to 09:00 today and it is up to the caller to reject it.
/// Expressions landing past year 2100 are rejected.
pub fn parse_time_expression(input: &str, now: i64, tz: &Tz) -> Option<i64> {
    parse_expression(input, now, tz).filter(|ts| is_supported_timestamp(*ts))
}

fn parse_expression(input: &str, now: i64, tz: &Tz) -> Option<i64> {
    let text = input.trim().to_lowercase().replace('’', "'");
    if text.is_empty() {
        return None;
    }

    if let Some(rest) = text
        .strip_prefix("dans ")
        .or_else(|| text.strip_prefix("in "))
    {
        return parse_offset(rest).and_then(|offset| now.checked_add(offset));
    }

    let tokens = text.split_whitespace().collect::<Vec<_>>();
    let mut day = None;
    let mut time = None;
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i];
        i += 1;
        if FILLERS.contains(&token) {
            continue;
        }

        // "9 am"
        if let Some(&meridiem) = tokens.get(i) {
            if meridiem == "am" || meridiem == "pm" {
                let clock = parse_clock(&format!("{}{}", token, meridiem))?;
                if time.replace(clock).is_some() {
                    return None;
                }
                i += 1;
                continue;
            }
        }

        if let Some(spec) = parse_day(token) {
            if day.replace(spec).is_some() {
                return None;
            }
        } else if let Some(clock) = parse_clock(token) {
            if time.replace(clock).is_some() {
                return None;
            }
        } else {
            return None;
        }
    }

    resolve(day, time, now, tz)
}

fn resolve(day: Option<DaySpec>, time: Option<LocalTime>, now: i64, tz: &Tz) -> Option<i64> {
    let today = to_local(now, tz).date().naive_local();
    let clock = time.unwrap_or(DEFAULT_TIME);
    match day {
        None => time.map(|t| local_timestamp(today, t, tz)),
        Some(DaySpec::Offset(days)) => {
            Some(local_timestamp(today + Duration::days(days), clock, tz))
        }
        Some(DaySpec::Date(date)) => Some(local_timestamp(date, clock, tz)),
        Some(DaySpec::Weekday(weekday)) => (0..=7)
            .map(|days| today + Duration::days(days))
            .filter(|date| date.weekday() == weekday)
            .map(|date| local_timestamp(date, clock, tz))
            .find(|ts| *ts > now),
    }
}

fn parse_day(token: &str) -> Option<DaySpec> {
    let spec = match token {
        "aujourd'hui" | "today" => DaySpec::Offset(0),
        "demain" | "tomorrow" => DaySpec::Offset(1),
        "après-demain" | "apres-demain" => DaySpec::Offset(2),
        "lundi" | "monday" => DaySpec::Weekday(Weekday::Mon),
        "mardi" | "tuesday" => DaySpec::Weekday(Weekday::Tue),
        "mercredi" | "wednesday" => DaySpec::Weekday(Weekday::Wed),
        "jeudi" | "thursday" => DaySpec::Weekday(Weekday::Thu),
        "vendredi" | "friday" => DaySpec::Weekday(Weekday::Fri),
        "samedi" | "saturday" => DaySpec::Weekday(Weekday::Sat),
        "dimanche" | "sunday" => DaySpec::Weekday(Weekday::Sun),
        other => DaySpec::Date(crate::date::parse_date(other).ok()?),
    };
    Some(spec)
}

fn parse_clock(token: &str) -> Option<LocalTime> {
    match token {
        "midi" | "noon" => return LocalTime::new(12, 0),
        "minuit" | "midnight" => return LocalTime::new(0, 0),
        _ => {}
    }

    if let Some(hour) = token.strip_suffix("am") {
        let (hour, minute) = split_clock(hour, ':')?;
        if !(1..=12).contains(&hour) {
            return None;
        }
        return LocalTime::new(hour % 12, minute);
    }
    if let Some(hour) = token.strip_suffix("pm") {
        let (hour, minute) = split_clock(hour, ':')?;
        if !(1..=12).contains(&hour) {
            return None;
        }
        return LocalTime::new(hour % 12 + 12, minute);
    }

    let (hour, minute) = if token.contains('h') {
        split_clock(token, 'h')?
    } else if token.contains(':') {
        split_clock(token, ':')?
    } else {
        return None;
    };
    LocalTime::new(hour, minute)
}

/// "14h30" -> (14, 30), "14h" -> (14, 0), "9" -> (9, 0)
fn split_clock(token: &str, separator: char) -> Option<(u32, u32)> {
    let mut parts = token.splitn(2, separator);
    let hour = parse_digits(parts.next()?)?;
    let minute = match parts.next() {
        None | Some("") => 0,
        Some(minute) => parse_digits(minute)?,
    };
    Some((hour, minute))
}

fn parse_digits(value: &str) -> Option<u32> {
    if value.is_empty() || value.len() > 2 || !value.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}

#[derive(Debug, PartialEq)]
enum OffsetToken {
    Number(i64),
    Word(String),
}

fn tokenize_offset(text: &str) -> Vec<OffsetToken> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut current_is_digit = false;

    let flush = |current: &mut String, is_digit: bool, tokens: &mut Vec<OffsetToken>| {
        if current.is_empty() {
            return;
        }
        let value = std::mem::take(current);
        if is_digit {
            // Overflowing numbers become a word so that parsing fails
            match value.parse() {
                Ok(n) => tokens.push(OffsetToken::Number(n)),
                Err(_) => tokens.push(OffsetToken::Word(value)),
            }
        } else {
            tokens.push(OffsetToken::Word(value));
        }
    };

    for c in text.chars() {
        let is_digit = c.is_ascii_digit();
        let is_word = c.is_alphabetic() || c == '\'';
        if !is_digit && !is_word {
            flush(&mut current, current_is_digit, &mut tokens);
            continue;
        }
        if !current.is_empty() && is_digit != current_is_digit {
            flush(&mut current, current_is_digit, &mut tokens);
        }
        current_is_digit = is_digit;
        current.push(c);
    }
    flush(&mut current, current_is_digit, &mut tokens);
    tokens
}

fn unit_millis(unit: &str) -> Option<i64> {
    match unit {
        "m" | "min" | "mins" | "minute" | "minutes" => Some(MINUTE_MILLIS),
        "h" | "hr" | "hrs" | "heure" | "heures" | "hour" | "hours" => Some(HOUR_MILLIS),
        "j" | "jour" | "jours" | "d" | "day" | "days" => Some(DAY_MILLIS),
        "semaine" | "semaines" | "week" | "weeks" => Some(DAY_MILLIS * 7),
        _ => None,
    }
}

/// "2h", "1h30", "3 jours et 2 heures", "an hour" -> millis
fn parse_offset(text: &str) -> Option<i64> {
    let tokens = tokenize_offset(text);
    let mut total: i64 = 0;
    let mut found = false;
    let mut last_unit = None;
    let mut i = 0;

    while i < tokens.len() {
        let amount = match &tokens[i] {
            OffsetToken::Number(n) => *n,
            OffsetToken::Word(w) if w == "et" || w == "and" => {
                i += 1;
                continue;
            }
            OffsetToken::Word(w) if ["un", "une", "a", "an"].contains(&w.as_str()) => 1,
            OffsetToken::Word(_) => return None,
        };
        i += 1;

        let unit = match tokens.get(i) {
            Some(OffsetToken::Word(w)) if unit_millis(w).is_some() => {
                i += 1;
                unit_millis(w)
            }
            // Trailing minutes in "1h30"
            _ if last_unit == Some(HOUR_MILLIS) => Some(MINUTE_MILLIS),
            _ => None,
        }?;

        total = total.checked_add(amount.checked_mul(unit)?)?;
        found = true;
        last_unit = Some(unit);
    }

    if found {
        Some(total)
    } else {
        None
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::TimeZone;

    fn tz() -> Tz {
        chrono_tz::Europe::Paris
    }

    fn paris_millis(y: i32, m: u32, d: u32, h: u32, min: u32) -> i64 {
        tz().ymd(y, m, d).and_hms(h, min, 0).timestamp_millis()
    }

    // Monday 2026-10-19 09:00 in Paris
    fn now() -> i64 {
        paris_millis(2026, 10, 19, 9, 0)
    }

    fn parse(input: &str) -> Option<i64> {
        parse_time_expression(input, now(), &tz())
    }

    #[test]
    fn parses_relative_offsets() {
        assert_eq!(parse("dans 2h"), Some(now() + 2 * HOUR_MILLIS));
        assert_eq!(parse("dans 2 heures"), Some(now() + 2 * HOUR_MILLIS));
        assert_eq!(parse("in 30 minutes"), Some(now() + 30 * MINUTE_MILLIS));
        assert_eq!(parse("dans 1h30"), Some(now() + 90 * MINUTE_MILLIS));
        assert_eq!(
            parse("dans 3 jours et 2 heures"),
            Some(now() + 3 * DAY_MILLIS + 2 * HOUR_MILLIS)
        );
        assert_eq!(parse("in an hour"), Some(now() + HOUR_MILLIS));
        assert_eq!(parse("dans une semaine"), Some(now() + 7 * DAY_MILLIS));
    }

    #[test]
    fn rejects_malformed_offsets() {
        assert_eq!(parse("dans"), None);
        assert_eq!(parse("dans 2"), None);
        assert_eq!(parse("dans deux heures"), None);
        assert_eq!(parse("in 5 fortnights"), None);
        assert_eq!(parse("dans 153722867280912 minutes"), None);
        assert_eq!(parse("in 9223372036854775807 minutes"), None);
        assert_eq!(parse("dans 40000 jours"), None);
    }

    #[test]
    fn parses_day_words() {
        assert_eq!(parse("demain 14h"), Some(paris_millis(2026, 10, 20, 14, 0)));
        assert_eq!(parse("tomorrow at 9am"), Some(paris_millis(2026, 10, 20, 9, 0)));
        assert_eq!(parse("demain"), Some(paris_millis(2026, 10, 20, 9, 0)));
        assert_eq!(
            parse("après-demain à 18h30"),
            Some(paris_millis(2026, 10, 21, 18, 30))
        );
        assert_eq!(parse("aujourd’hui 17:15"), Some(paris_millis(2026, 10, 19, 17, 15)));
    }

    #[test]
    fn parses_weekdays() {
        assert_eq!(parse("vendredi 9h"), Some(paris_millis(2026, 10, 23, 9, 0)));
        assert_eq!(parse("friday 3 pm"), Some(paris_millis(2026, 10, 23, 15, 0)));
        // Monday 09:00 has passed at 09:00 on a Monday
        assert_eq!(parse("lundi"), Some(paris_millis(2026, 10, 26, 9, 0)));
        assert_eq!(parse("lundi 18h"), Some(paris_millis(2026, 10, 19, 18, 0)));
        assert_eq!(parse("mardi prochain"), Some(paris_millis(2026, 10, 20, 9, 0)));
    }

    #[test]
    fn parses_clock_times_and_dates() {
        assert_eq!(parse("14h"), Some(paris_millis(2026, 10, 19, 14, 0)));
        assert_eq!(parse("midi"), Some(paris_millis(2026, 10, 19, 12, 0)));
        assert_eq!(parse("8h"), Some(paris_millis(2026, 10, 19, 8, 0)));
        assert_eq!(parse("2026-12-24 20:00"), Some(paris_millis(2026, 12, 24, 20, 0)));
        assert_eq!(parse("2026-12-24"), Some(paris_millis(2026, 12, 24, 9, 0)));
    }

    #[test]
    fn rejects_gibberish() {
        assert_eq!(parse(""), None);
        assert_eq!(parse("whenever"), None);
        assert_eq!(parse("demain demain"), None);
        assert_eq!(parse("25h"), None);
        assert_eq!(parse("13pm"), None);
    }
}
