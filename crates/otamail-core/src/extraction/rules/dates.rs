//! Stay date helpers.

use chrono::NaiveDate;

/// Parse a `dd.mm.yyyy` date.
pub fn parse_dotted_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%d.%m.%Y").ok()
}

/// Number of nights between two `dd.mm.yyyy` dates.
///
/// `None` when a date is invalid or the departure is not after the arrival.
pub fn nights_between(arrival: &str, departure: &str) -> Option<u32> {
    let arrival = parse_dotted_date(arrival)?;
    let departure = parse_dotted_date(departure)?;
    let nights = (departure - arrival).num_days();
    u32::try_from(nights).ok().filter(|n| *n > 0)
}
