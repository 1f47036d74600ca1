//! Compound (day, month, year) due-date input.
//!
//! The browser runs the same rules in `assets/task-form.js`; both sides must
//! reject the same inputs with the same category, so the step order below is
//! fixed:
//!
//! 1. all three empty: no date
//! 2. some but not all empty: incomplete
//! 3. non-numeric, day outside 1..=31, month outside 1..=12, year outside
//!    [`MIN_YEAR`]..=[`MAX_YEAR`]: invalid
//! 4. no such calendar day (31 February): invalid
//! 5. not strictly after today: not in the future

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

use super::trim_form;

/// Lowest year accepted before the calendar check.
pub const MIN_YEAR: i32 = 1900;
/// Highest year accepted before the calendar check.
pub const MAX_YEAR: i32 = 9999;

/// Why a due-date triple was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DateError {
    #[error("Please enter a complete due date or leave all fields blank.")]
    Incomplete,
    #[error("Please enter a valid due date")]
    Invalid,
    #[error("Due date must be in the future")]
    NotInFuture,
}

/// Parse a due-date triple relative to `today`.
///
/// Returns `Ok(None)` when all parts are blank. Surrounding whitespace (see
/// [`trim_form`]) is ignored for the check only.
pub fn parse_due_date(
    day: &str,
    month: &str,
    year: &str,
    today: NaiveDate,
) -> Result<Option<NaiveDate>, DateError> {
    let parts = [trim_form(day), trim_form(month), trim_form(year)];
    let blank = parts.iter().filter(|p| p.is_empty()).count();
    if blank == parts.len() {
        return Ok(None);
    }
    if blank > 0 {
        return Err(DateError::Incomplete);
    }

    let (Ok(d), Ok(m), Ok(y)) = (
        parts[0].parse::<u32>(),
        parts[1].parse::<u32>(),
        parts[2].parse::<i32>(),
    ) else {
        return Err(DateError::Invalid);
    };
    if !(1..=31).contains(&d)
        || !(1..=12).contains(&m)
        || !(MIN_YEAR..=MAX_YEAR).contains(&y)
    {
        return Err(DateError::Invalid);
    }

    // from_ymd_opt refuses days the month does not have instead of rolling over
    let date = NaiveDate::from_ymd_opt(y, m, d).ok_or(DateError::Invalid)?;

    if date <= today {
        return Err(DateError::NotInFuture);
    }
    Ok(Some(date))
}

/// Local midnight at the start of `date`, as an absolute timestamp.
///
/// Where a DST jump skips midnight, the first whole hour that exists on that
/// day is used instead, so the timestamp still falls on `date` locally.
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    first_instant_of_day(date, |local| {
        Local
            .from_local_datetime(local)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
    })
}

fn first_instant_of_day<F>(date: NaiveDate, resolve: F) -> DateTime<Utc>
where
    F: Fn(&NaiveDateTime) -> Option<DateTime<Utc>>,
{
    (0..24)
        .filter_map(|hour| date.and_hms_opt(hour, 0, 0))
        .find_map(|local| resolve(&local))
        .unwrap_or_else(|| Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)))
}

/// Today's date in the server's local timezone.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 10).unwrap()
    }

    #[test]
    fn all_blank_is_absent() {
        assert_eq!(parse_due_date("", "", "", today()), Ok(None));
        assert_eq!(parse_due_date("  ", "", " ", today()), Ok(None));
    }

    #[rstest]
    #[case("15", "", "")]
    #[case("", "12", "")]
    #[case("", "", "2030")]
    #[case("15", "12", "")]
    #[case("15", "", "2030")]
    #[case("", "12", "2030")]
    fn partially_blank_is_incomplete(#[case] d: &str, #[case] m: &str, #[case] y: &str) {
        assert_eq!(parse_due_date(d, m, y, today()), Err(DateError::Incomplete));
    }

    #[rstest]
    #[case("x", "1", "2030")]
    #[case("1", "jan", "2030")]
    #[case("1", "1", "20x0")]
    #[case("0", "1", "2030")]
    #[case("32", "1", "2030")]
    #[case("1", "0", "2030")]
    #[case("1", "13", "2030")]
    #[case("1", "1", "1899")]
    #[case("1", "1", "10000")]
    #[case("1", "1", "270000")]
    #[case("-1", "1", "2030")]
    #[case("1.5", "1", "2030")]
    fn malformed_parts_are_invalid(#[case] d: &str, #[case] m: &str, #[case] y: &str) {
        assert_eq!(parse_due_date(d, m, y, today()), Err(DateError::Invalid));
    }

    #[rstest]
    #[case("30", "2", "2030")]
    #[case("31", "2", "2030")]
    #[case("31", "4", "2030")]
    #[case("29", "2", "2031")]
    #[case("30", "2", "2000")]
    #[case("31", "2", "1999")]
    #[case("31", "4", "1950")]
    fn nonexistent_days_are_invalid_regardless_of_year(
        #[case] d: &str,
        #[case] m: &str,
        #[case] y: &str,
    ) {
        assert_eq!(parse_due_date(d, m, y, today()), Err(DateError::Invalid));
    }

    #[test]
    fn leap_day_is_accepted_in_leap_year() {
        assert_eq!(
            parse_due_date("29", "2", "2028", today()),
            Ok(NaiveDate::from_ymd_opt(2028, 2, 29))
        );
    }

    #[test]
    fn today_is_rejected_and_tomorrow_accepted() {
        assert_eq!(
            parse_due_date("10", "3", "2026", today()),
            Err(DateError::NotInFuture)
        );
        assert_eq!(
            parse_due_date("11", "3", "2026", today()),
            Ok(NaiveDate::from_ymd_opt(2026, 3, 11))
        );
    }

    #[test]
    fn past_dates_are_not_in_future() {
        assert_eq!(
            parse_due_date("1", "1", "2001", today()),
            Err(DateError::NotInFuture)
        );
    }

    #[test]
    fn zero_padded_and_spaced_parts_parse() {
        assert_eq!(
            parse_due_date(" 05 ", "09", "2027 ", today()),
            Ok(NaiveDate::from_ymd_opt(2027, 9, 5))
        );
    }

    #[test]
    fn byte_order_marks_count_as_blank() {
        let bom = "\u{feff}";
        assert_eq!(parse_due_date(bom, bom, bom, today()), Ok(None));
        assert_eq!(
            parse_due_date("\u{feff}1", "1\u{a0}", "2030", today()),
            Ok(NaiveDate::from_ymd_opt(2030, 1, 1))
        );
    }

    #[test]
    fn last_supported_year_is_accepted() {
        assert_eq!(
            parse_due_date("31", "12", "9999", today()),
            Ok(NaiveDate::from_ymd_opt(9999, 12, 31))
        );
    }

    #[test]
    fn skipped_midnight_falls_forward_to_same_day() {
        // UTC-3 zone whose clocks jump from 00:00 to 01:00
        let date = NaiveDate::from_ymd_opt(2030, 11, 3).unwrap();
        let offset = chrono::FixedOffset::west_opt(3 * 3600).unwrap();
        let ts = first_instant_of_day(date, |local| {
            if local.time() < NaiveTime::from_hms_opt(1, 0, 0).unwrap() {
                None
            } else {
                offset
                    .from_local_datetime(local)
                    .single()
                    .map(|dt| dt.with_timezone(&Utc))
            }
        });
        let local = ts.with_timezone(&offset);
        assert_eq!(local.date_naive(), date);
        assert_eq!(local.time(), NaiveTime::from_hms_opt(1, 0, 0).unwrap());
    }

    #[test]
    fn start_of_day_is_local_midnight() {
        let date = NaiveDate::from_ymd_opt(2030, 6, 15).unwrap();
        let ts = start_of_day(date).with_timezone(&Local);
        assert_eq!(ts.date_naive(), date);
        assert_eq!(ts.time(), NaiveTime::MIN);
    }

    #[test]
    fn messages_match_form_copy() {
        assert_eq!(
            DateError::Incomplete.to_string(),
            "Please enter a complete due date or leave all fields blank."
        );
        assert_eq!(DateError::Invalid.to_string(), "Please enter a valid due date");
        assert_eq!(DateError::NotInFuture.to_string(), "Due date must be in the future");
    }
}
