use std::fmt::{self, Write};

use chrono::{DateTime, Datelike, Local, TimeZone, Timelike};
use log::warn;

use crate::formatter::Formatter;

const SECONDS_PER_DAY: i64 = 86_400;
const SECONDS_PER_HOUR: i64 = 3_600;
const SECONDS_PER_MINUTE: i64 = 60;

const FALLBACK_DATE_FORMAT: &str = "%a %b %d %Y";

impl Formatter {
    /// Shows at most the two most significant units: `3 days 4 hr`,
    /// `12 min 5 seconds`, `0 seconds`.
    pub fn format_time_interval(&self, seconds: i64) -> String {
        let strings = self.strings();
        let days = seconds / SECONDS_PER_DAY;
        let hours = (seconds % SECONDS_PER_DAY) / SECONDS_PER_HOUR;
        let minutes = (seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
        let seconds = seconds % SECONDS_PER_MINUTE;

        let d = format!("{} {}", days, strings.days);
        let h = format!("{} {}", hours, strings.hours);
        let m = format!("{} {}", minutes, strings.minutes);
        let s = format!("{} {}", seconds, strings.seconds);

        if days > 0 {
            if hours > 0 {
                return format!("{} {}", d, h);
            }
            return d;
        }
        if hours > 0 {
            if minutes > 0 {
                return format!("{} {}", h, m);
            }
            return h;
        }
        if minutes > 0 {
            if seconds > 0 {
                return format!("{} {}", m, s);
            }
            return m;
        }
        s
    }

    /// Formats a Unix timestamp relative to the local clock. `0` means the
    /// time is unknown.
    pub fn format_timestamp(&self, seconds: i64) -> String {
        self.format_timestamp_relative_to(seconds, &Local::now())
    }

    /// Like `format_timestamp`, with an explicit "now" whose time zone is
    /// also used to render the timestamp.
    pub fn format_timestamp_relative_to<Tz>(&self, seconds: i64, now: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let strings = self.strings();
        if seconds == 0 {
            return strings.not_available.clone();
        }

        let then = match DateTime::from_timestamp(seconds, 0) {
            Some(utc) => utc.with_timezone(&now.timezone()),
            None => return strings.not_available.clone(),
        };

        let same_year = now.year() == then.year();
        let same_month = now.month() == then.month();
        let date_diff = now.day() as i64 - then.day() as i64;

        let date = if same_year && same_month && date_diff.abs() <= 1 {
            match date_diff {
                0 => strings.today.clone(),
                1 => strings.yesterday.clone(),
                _ => strings.tomorrow.clone(),
            }
        } else {
            let mut date = String::new();
            if write!(date, "{}", then.format(&strings.date_format)).is_err() {
                warn!("invalid date format '{}'", strings.date_format);
                date.clear();
                // the fallback pattern is known to be valid
                let _ = write!(date, "{}", then.format(FALLBACK_DATE_FORMAT));
            }
            date
        };

        let (is_pm, hours) = then.hour12();
        let period = if is_pm { &strings.pm } else { &strings.am };

        format!(
            "{} {:02}:{:02}:{:02} {}",
            date,
            hours,
            then.minute(),
            then.second(),
            period
        )
    }
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, Utc};

    use crate::configuration::Configuration;

    use super::*;

    fn timestamp(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> i64 {
        Utc.with_ymd_and_hms(year, month, day, hour, min, sec)
            .unwrap()
            .timestamp()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_time_interval_table() {
        let f = Formatter::default();
        assert_eq!(f.format_time_interval(0), "0 seconds");
        assert_eq!(f.format_time_interval(45), "45 seconds");
        assert_eq!(f.format_time_interval(60), "1 min");
        assert_eq!(f.format_time_interval(90), "1 min 30 seconds");
        assert_eq!(f.format_time_interval(3_600), "1 hr");
        assert_eq!(f.format_time_interval(3_661), "1 hr 1 min");
        assert_eq!(f.format_time_interval(7_205), "2 hr");
        assert_eq!(f.format_time_interval(86_400), "1 days");
        assert_eq!(f.format_time_interval(86_400 + 59), "1 days");
        assert_eq!(f.format_time_interval(90_000), "1 days 1 hr");
        assert_eq!(f.format_time_interval(10 * 86_400 + 3 * 3_600 + 120), "10 days 3 hr");
    }

    #[test]
    fn test_time_interval_negative_is_not_clamped() {
        let f = Formatter::default();
        assert_eq!(f.format_time_interval(-5), "-5 seconds");
    }

    #[test]
    fn test_time_interval_localized_units() {
        let mut configuration = Configuration::new();
        configuration.strings.minutes = String::from("Min.");
        configuration.strings.seconds = String::from("Sek.");
        let f = Formatter::new(configuration);
        assert_eq!(f.format_time_interval(125), "2 Min. 5 Sek.");
    }

    #[test]
    fn test_timestamp_unknown() {
        let f = Formatter::default();
        assert_eq!(f.format_timestamp(0), "N/A");
        assert_eq!(f.format_timestamp_relative_to(0, &now()), "N/A");
        assert_eq!(f.format_timestamp_relative_to(i64::MAX, &now()), "N/A");
    }

    #[test]
    fn test_timestamp_relative_days() {
        let f = Formatter::default();
        assert_eq!(
            f.format_timestamp_relative_to(timestamp(2024, 5, 15, 9, 5, 3), &now()),
            "Today 09:05:03 AM"
        );
        assert_eq!(
            f.format_timestamp_relative_to(timestamp(2024, 5, 14, 23, 0, 0), &now()),
            "Yesterday 11:00:00 PM"
        );
        assert_eq!(
            f.format_timestamp_relative_to(timestamp(2024, 5, 16, 0, 30, 0), &now()),
            "Tomorrow 12:30:00 AM"
        );
    }

    #[test]
    fn test_timestamp_noon_is_pm() {
        let f = Formatter::default();
        assert_eq!(
            f.format_timestamp_relative_to(timestamp(2024, 5, 15, 12, 0, 0), &now()),
            "Today 12:00:00 PM"
        );
    }

    #[test]
    fn test_timestamp_full_date() {
        let f = Formatter::default();
        assert_eq!(
            f.format_timestamp_relative_to(timestamp(2024, 4, 15, 18, 7, 9), &now()),
            "Mon Apr 15 2024 06:07:09 PM"
        );
        assert_eq!(
            f.format_timestamp_relative_to(timestamp(2024, 5, 13, 8, 0, 0), &now()),
            "Mon May 13 2024 08:00:00 AM"
        );
    }

    #[test]
    fn test_timestamp_month_boundary_is_not_yesterday() {
        let f = Formatter::default();
        let first_of_june = Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap();
        assert_eq!(
            f.format_timestamp_relative_to(timestamp(2024, 5, 31, 10, 0, 0), &first_of_june),
            "Fri May 31 2024 10:00:00 AM"
        );
    }

    #[test]
    fn test_timestamp_uses_time_zone_of_now() {
        let f = Formatter::default();
        let berlin = FixedOffset::east_opt(2 * 3_600).unwrap();
        let now = berlin.with_ymd_and_hms(2024, 5, 16, 1, 0, 0).unwrap();
        // 23:30 UTC on the 15th is 01:30 on the 16th in UTC+2
        assert_eq!(
            f.format_timestamp_relative_to(timestamp(2024, 5, 15, 23, 30, 0), &now),
            "Today 01:30:00 AM"
        );
    }

    #[test]
    fn test_timestamp_custom_date_format() {
        let mut configuration = Configuration::new();
        configuration.strings.date_format = String::from("%d.%m.%Y");
        let f = Formatter::new(configuration);
        assert_eq!(
            f.format_timestamp_relative_to(timestamp(2023, 12, 24, 20, 0, 0), &now()),
            "24.12.2023 08:00:00 PM"
        );
    }
}
