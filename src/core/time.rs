use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use chrono_tz::Tz;

/// Clock abstracts access to the current timestamp so callers stay deterministic in tests.
pub trait Clock: Send + Sync {
    /// Returns the current UTC timestamp.
    fn now(&self) -> DateTime<Utc>;
}

/// Real-time clock backed by the system UTC time source.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Resolves "today" as a calendar date in the planner's time zone.
///
/// This is the only place the current date is derived; projections take the
/// returned date as an argument.
pub fn resolve_today(clock: &dyn Clock, tz: Tz) -> NaiveDate {
    clock.now().with_timezone(&tz).date_naive()
}

/// Number of calendar days in the month containing `date`.
pub fn days_in_month(date: NaiveDate) -> u32 {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(31)
}

const MONTHS_DE: [&str; 12] = [
    "Januar",
    "Februar",
    "März",
    "April",
    "Mai",
    "Juni",
    "Juli",
    "August",
    "September",
    "Oktober",
    "November",
    "Dezember",
];

fn weekday_de(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Montag",
        Weekday::Tue => "Dienstag",
        Weekday::Wed => "Mittwoch",
        Weekday::Thu => "Donnerstag",
        Weekday::Fri => "Freitag",
        Weekday::Sat => "Samstag",
        Weekday::Sun => "Sonntag",
    }
}

/// "Oktober 2026"
pub fn month_label(date: NaiveDate) -> String {
    format!("{} {}", MONTHS_DE[date.month0() as usize], date.year())
}

/// "Montag, 19. Oktober 2026"
pub fn long_date_label(date: NaiveDate) -> String {
    format!(
        "{}, {}. {}",
        weekday_de(date.weekday()),
        date.day(),
        month_label(date)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn resolve_today_uses_berlin_calendar_day() {
        // 23:30 UTC on 31 May is already 1 June in Berlin (UTC+2).
        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 5, 31, 23, 30, 0).unwrap());
        assert_eq!(
            resolve_today(&clock, chrono_tz::Europe::Berlin),
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
        );
        assert_eq!(
            resolve_today(&clock, chrono_tz::UTC),
            NaiveDate::from_ymd_opt(2024, 5, 31).unwrap()
        );
    }

    #[test]
    fn days_in_month_handles_leap_years_and_december() {
        let day = |y, m| NaiveDate::from_ymd_opt(y, m, 10).unwrap();
        assert_eq!(days_in_month(day(2024, 2)), 29);
        assert_eq!(days_in_month(day(2023, 2)), 28);
        assert_eq!(days_in_month(day(2024, 4)), 30);
        assert_eq!(days_in_month(day(2024, 12)), 31);
    }

    #[test]
    fn labels_are_german() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert_eq!(month_label(date), "Oktober 2026");
        assert_eq!(long_date_label(date), "Montag, 19. Oktober 2026");
    }
}
