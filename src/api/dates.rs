use chrono::{DateTime, Datelike, Days, NaiveDate, TimeZone, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Calendar range selector for the `from-date` filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeWindow {
    #[default]
    Today,
    Week,
    Month,
    Year,
}

impl TimeWindow {
    pub const ALL: [TimeWindow; 4] = [
        TimeWindow::Today,
        TimeWindow::Week,
        TimeWindow::Month,
        TimeWindow::Year,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TimeWindow::Today => "Today",
            TimeWindow::Week => "Week",
            TimeWindow::Month => "Month",
            TimeWindow::Year => "Year",
        }
    }

    pub fn next(&self) -> TimeWindow {
        match self {
            TimeWindow::Today => TimeWindow::Week,
            TimeWindow::Week => TimeWindow::Month,
            TimeWindow::Month => TimeWindow::Year,
            TimeWindow::Year => TimeWindow::Today,
        }
    }

    pub fn prev(&self) -> TimeWindow {
        match self {
            TimeWindow::Today => TimeWindow::Year,
            TimeWindow::Week => TimeWindow::Today,
            TimeWindow::Month => TimeWindow::Week,
            TimeWindow::Year => TimeWindow::Month,
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TimeWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "today" | "day" => Ok(TimeWindow::Today),
            "week" => Ok(TimeWindow::Week),
            "month" => Ok(TimeWindow::Month),
            "year" => Ok(TimeWindow::Year),
            other => Err(format!(
                "unknown time window '{}' (expected today, week, month or year)",
                other
            )),
        }
    }
}

/// Start date of `window` relative to `now`, taken in `now`'s own time zone.
///
/// Today reaches back one extra day so that a window opened before the
/// upstream source has published anything still has results.
pub fn resolve<Tz: TimeZone>(window: TimeWindow, now: &DateTime<Tz>, week_start: Weekday) -> NaiveDate {
    // Dropping to a NaiveDate zeroes the time of day before any arithmetic.
    let today = now.date_naive();
    match window {
        TimeWindow::Today => today.pred_opt().unwrap_or(today),
        TimeWindow::Week => start_of_week(today, week_start),
        TimeWindow::Month => today.with_day(1).unwrap_or(today),
        TimeWindow::Year => NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today),
    }
}

fn start_of_week(date: NaiveDate, week_start: Weekday) -> NaiveDate {
    let offset = (7 + date.weekday().num_days_from_monday() - week_start.num_days_from_monday()) % 7;
    date.checked_sub_days(Days::new(offset as u64)).unwrap_or(date)
}

/// `yyyy-MM-dd`, the form the `from-date` parameter accepts.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    fn june_15() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 6, 15, 10, 0, 0).unwrap()
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn today_reaches_back_one_day() {
        assert_eq!(resolve(TimeWindow::Today, &june_15(), Weekday::Mon), ymd(2023, 6, 14));
    }

    #[test]
    fn month_and_year_start_on_the_first() {
        assert_eq!(resolve(TimeWindow::Month, &june_15(), Weekday::Mon), ymd(2023, 6, 1));
        assert_eq!(resolve(TimeWindow::Year, &june_15(), Weekday::Mon), ymd(2023, 1, 1));
    }

    #[test]
    fn week_honours_configured_start_day() {
        // 2023-06-15 is a Thursday.
        assert_eq!(resolve(TimeWindow::Week, &june_15(), Weekday::Mon), ymd(2023, 6, 12));
        assert_eq!(resolve(TimeWindow::Week, &june_15(), Weekday::Sun), ymd(2023, 6, 11));
        assert_eq!(resolve(TimeWindow::Week, &june_15(), Weekday::Thu), ymd(2023, 6, 15));
    }

    #[test]
    fn week_crosses_month_and_year_boundaries() {
        let new_year = Utc.with_ymd_and_hms(2025, 1, 2, 8, 0, 0).unwrap();
        assert_eq!(resolve(TimeWindow::Week, &new_year, Weekday::Mon), ymd(2024, 12, 30));
    }

    #[test]
    fn today_on_first_of_year_is_last_day_of_previous_year() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(resolve(TimeWindow::Today, &now, Weekday::Mon), ymd(2023, 12, 31));
    }

    #[test]
    fn late_evening_does_not_spill_into_next_day() {
        let now = Utc.with_ymd_and_hms(2023, 6, 30, 23, 59, 59).unwrap();
        assert_eq!(resolve(TimeWindow::Today, &now, Weekday::Mon), ymd(2023, 6, 29));
        assert_eq!(resolve(TimeWindow::Month, &now, Weekday::Mon), ymd(2023, 6, 1));
    }

    #[test]
    fn date_is_taken_in_the_local_zone() {
        // Local date is the 16th while UTC is still on the 15th.
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let now = tz.with_ymd_and_hms(2023, 6, 16, 0, 30, 0).unwrap();
        assert_eq!(resolve(TimeWindow::Today, &now, Weekday::Mon), ymd(2023, 6, 15));
    }

    #[test]
    fn formats_as_iso_date() {
        assert_eq!(format_date(ymd(2023, 1, 5)), "2023-01-05");
    }

    #[test]
    fn window_cycles_round_trip() {
        for w in TimeWindow::ALL {
            assert_eq!(w.next().prev(), w);
        }
    }

    #[test]
    fn parses_window_names() {
        assert_eq!("Week".parse::<TimeWindow>(), Ok(TimeWindow::Week));
        assert_eq!(" year ".parse::<TimeWindow>(), Ok(TimeWindow::Year));
        assert!("decade".parse::<TimeWindow>().is_err());
    }
}
