//! Parsing of the `Added on …` timestamp of a metadata line.

use crate::consts;
use crate::error::{ErrorKind, Result};
use exn::{OptionExt, ResultExt};
use time::{Date, Month, PrimitiveDateTime, Time};
use tracing::instrument;

/// Parses the device's timestamp into a [`PrimitiveDateTime`].
///
/// Devices write local wall-clock time with no offset, in either the US
/// (`January 5, 2020 10:00:00 AM`) or international (`5 January 2020 10:00:00`)
/// shape, optionally preceded by the weekday. Older firmware drops the seconds
/// and puts a comma after the year.
#[instrument(level = "trace")]
pub(crate) fn parse(value: &str) -> Result<PrimitiveDateTime> {
    let invalid = |field: &'static str| ErrorKind::ParseError {
        field,
        value: value.to_string(),
    };
    let captures = consts::ADDED_ON_REGEX.captures(value.trim()).ok_or_raise(|| invalid("added_on"))?;
    let month = captures
        .name("us_month")
        .or_else(|| captures.name("month"))
        .and_then(|m| month_from_name(m.as_str()))
        .ok_or_raise(|| invalid("added_on-month"))?;
    let day: u8 =
        number(captures.name("us_day").or_else(|| captures.name("day"))).or_raise(|| invalid("added_on-day"))?;
    let year: i32 = number(captures.name("year")).or_raise(|| invalid("added_on-year"))?;
    let hour: u8 = number(captures.name("hour")).or_raise(|| invalid("added_on-hour"))?;
    let minute: u8 = number(captures.name("minute")).or_raise(|| invalid("added_on-minute"))?;
    let second: u8 = match captures.name("second") {
        second @ Some(_) => number(second).or_raise(|| invalid("added_on-second"))?,
        None => 0,
    };
    let hour = match captures.name("meridiem").map(|m| m.as_str().to_ascii_lowercase()) {
        None => hour,
        Some(_) if !(1..=12).contains(&hour) => exn::bail!(invalid("added_on-hour")),
        Some(meridiem) if meridiem == "a" => hour % 12,
        Some(_) => hour % 12 + 12,
    };
    let date = Date::from_calendar_date(year, month, day).or_raise(|| invalid("added_on-date"))?;
    let time = Time::from_hms(hour, minute, second).or_raise(|| invalid("added_on-time"))?;
    Ok(PrimitiveDateTime::new(date, time))
}

fn number<N: std::str::FromStr>(capture: Option<regex::Match<'_>>) -> std::result::Result<N, ErrorKind>
where
    N::Err: std::fmt::Display,
{
    let capture = capture.ok_or(ErrorKind::MissingField("added_on"))?;
    capture.as_str().parse::<N>().map_err(|e| ErrorKind::ParseError {
        field: "added_on",
        value: format!("{}: {e}", capture.as_str()),
    })
}

/// English month names, full or abbreviated.
fn month_from_name(name: &str) -> Option<Month> {
    Some(match name.to_ascii_lowercase().as_str() {
        "january" | "jan" => Month::January,
        "february" | "feb" => Month::February,
        "march" | "mar" => Month::March,
        "april" | "apr" => Month::April,
        "may" => Month::May,
        "june" | "jun" => Month::June,
        "july" | "jul" => Month::July,
        "august" | "aug" => Month::August,
        "september" | "sep" | "sept" => Month::September,
        "october" | "oct" => Month::October,
        "november" | "nov" => Month::November,
        "december" | "dec" => Month::December,
        _ => return None,
    })
}
