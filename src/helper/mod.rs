use std::collections::VecDeque;
use std::fmt;
use std::time::{Duration, Instant};

use crate::formatter::{Formatter, RATIO_INF, RATIO_NA};

/// Upload/download ratio with the sentinel values the formatter knows:
/// `RATIO_INF` when only the denominator is zero, `RATIO_NA` when both are.
pub fn get_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator != 0.0 {
        numerator / denominator
    } else if numerator != 0.0 {
        RATIO_INF
    } else {
        RATIO_NA
    }
}

/// Cumulative or per-session transfer totals.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionStats {
    pub uploaded_bytes: i64,
    pub downloaded_bytes: i64,
    pub files_added: i64,
    pub session_count: i64,
    pub seconds_active: i64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FormattedSessionStats {
    pub uploaded: String,
    pub downloaded: String,
    pub ratio: String,
    pub duration: String,
}

impl SessionStats {
    pub fn ratio(&self) -> f64 {
        get_ratio(self.uploaded_bytes as f64, self.downloaded_bytes as f64)
    }

    pub fn summary(&self, formatter: &Formatter) -> FormattedSessionStats {
        FormattedSessionStats {
            uploaded: formatter.format_size(self.uploaded_bytes),
            downloaded: formatter.format_size(self.downloaded_bytes),
            ratio: formatter.format_ratio(self.ratio()),
            duration: formatter.format_time_interval(self.seconds_active),
        }
    }
}

/// The pieces of a torrent's progress line.
#[derive(Clone, Debug, PartialEq)]
pub struct ProgressDetails {
    pub have: String,
    pub total: Option<String>,
    pub percent: Option<String>,
    pub eta: Option<String>,
    pub finished: bool,
}

impl fmt::Display for ProgressDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.finished {
            return f.write_str(self.total.as_deref().unwrap_or(&self.have));
        }

        f.write_str(&self.have)?;
        if let (Some(total), Some(percent)) = (&self.total, &self.percent) {
            write!(f, " of {} ({}%)", total, percent)?;
        }
        match &self.eta {
            Some(eta) => write!(f, " - {} remaining", eta),
            None => f.write_str(" - remaining time unknown"),
        }
    }
}

/// Transfer progress of a single torrent, with speeds measured over a
/// sliding ten second window.
pub struct ProgressStats {
    pub total_length: Option<i64>,
    pub progressed_size: i64,
    finished: bool,
    start_time: Instant,
    time_series: VecDeque<(Instant, i64)>,
}

impl ProgressStats {
    const WINDOW: Duration = Duration::from_secs(10);

    pub fn new() -> ProgressStats {
        Self::new_at(Instant::now())
    }

    pub fn new_at(start_time: Instant) -> ProgressStats {
        ProgressStats {
            total_length: None,
            progressed_size: 0,
            finished: false,
            start_time,
            time_series: VecDeque::new(),
        }
    }

    pub fn add_progressed_size(&mut self, size: i64) {
        self.add_progressed_size_at(size, Instant::now());
    }

    pub fn add_progressed_size_at(&mut self, size: i64, now: Instant) {
        self.progressed_size += size;
        self.time_series.push_back((now, size));
        self.prune(now);
    }

    pub fn set_progressed_size_at(&mut self, size: i64, now: Instant) {
        let added_size = size - self.progressed_size;
        self.progressed_size = size;
        self.time_series.push_back((now, added_size));
        self.prune(now);
    }

    fn prune(&mut self, now: Instant) {
        while let Some(tuple) = self.time_series.front() {
            if now.saturating_duration_since(tuple.0) > Self::WINDOW {
                self.time_series.pop_front();
            } else {
                break;
            }
        }
    }

    pub fn get_runtime_at(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.start_time)
    }

    /// Average speed since the start, in bytes per second.
    pub fn get_average_speed_at(&self, now: Instant) -> f64 {
        let total_seconds = self.get_runtime_at(now).as_secs_f64();
        if total_seconds == 0.0 {
            return 0.0;
        }
        self.progressed_size as f64 / total_seconds
    }

    /// Average speed over the last `seconds`, in bytes per second.
    pub fn get_average_speed_for_last_x_seconds_at(&self, seconds: u64, now: Instant) -> i64 {
        let mut bytes_progressed = 0_i64;
        let mut first_found_progressed_time = None;
        for tuple in &self.time_series {
            if now.saturating_duration_since(tuple.0) > Duration::from_secs(seconds) {
                continue;
            }

            if first_found_progressed_time.is_none() {
                first_found_progressed_time = Some(tuple.0);
            }
            bytes_progressed += tuple.1;
        }

        let last_seconds = match first_found_progressed_time {
            Some(time) => now.saturating_duration_since(time).as_secs().max(1),
            None => seconds.max(1),
        };

        bytes_progressed / last_seconds as i64
    }

    pub fn get_progress_in_percentage(&self) -> Option<f64> {
        match self.total_length {
            Some(total_length) if total_length > 0 => {
                Some(self.progressed_size as f64 * 100.0 / total_length as f64)
            }
            _ => None,
        }
    }

    pub fn get_total_duration_at(&self, now: Instant) -> Option<Duration> {
        match self.get_progress_in_percentage() {
            Some(percentage) if percentage > 0.0 => Duration::try_from_secs_f64(
                self.get_runtime_at(now).as_secs_f64() * 100.0 / percentage,
            )
            .ok(),
            _ => None,
        }
    }

    /// Gets the "Estimated Time Enroute".
    pub fn get_ete_at(&self, now: Instant) -> Option<Duration> {
        self.get_total_duration_at(now)
            .map(|total_duration| total_duration.saturating_sub(self.get_runtime_at(now)))
    }

    pub fn is_finished(&self) -> bool {
        self.finished
            || matches!(self.total_length, Some(total) if self.progressed_size >= total)
    }

    pub fn set_finished(&mut self) {
        self.finished = true;
    }

    pub fn progress_details(&self, formatter: &Formatter) -> ProgressDetails {
        self.progress_details_at(formatter, Instant::now())
    }

    pub fn progress_details_at(&self, formatter: &Formatter, now: Instant) -> ProgressDetails {
        let finished = self.is_finished();
        let eta = if finished {
            None
        } else {
            self.get_ete_at(now)
                .map(|ete| {
                    formatter.format_time_interval(i64::try_from(ete.as_secs()).unwrap_or(i64::MAX))
                })
        };

        ProgressDetails {
            have: formatter.format_size(self.progressed_size),
            total: self.total_length.map(|total| formatter.format_size(total)),
            percent: self
                .get_progress_in_percentage()
                .map(|percentage| formatter.format_percent(percentage)),
            eta,
            finished,
        }
    }
}

impl Default for ProgressStats {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(start: Instant, seconds: u64) -> Instant {
        start + Duration::from_secs(seconds)
    }

    #[test]
    fn test_get_ratio_sentinels() {
        assert_eq!(get_ratio(0.0, 0.0), RATIO_NA);
        assert_eq!(get_ratio(5.0, 0.0), RATIO_INF);
        assert_eq!(get_ratio(0.0, 5.0), 0.0);
        assert_eq!(get_ratio(3.0, 2.0), 1.5);
    }

    #[test]
    fn test_session_summary() {
        let stats = SessionStats {
            uploaded_bytes: 3_000_000_000,
            downloaded_bytes: 1_500_000_000,
            files_added: 12,
            session_count: 4,
            seconds_active: 90_000,
        };
        let summary = stats.summary(&Formatter::default());
        assert_eq!(summary.uploaded, "3.00 GB");
        assert_eq!(summary.downloaded, "1.50 GB");
        assert_eq!(summary.ratio, "2.00");
        assert_eq!(summary.duration, "1 days 1 hr");
    }

    #[test]
    fn test_session_summary_nothing_transferred() {
        let summary = SessionStats::default().summary(&Formatter::default());
        assert_eq!(summary.ratio, "None");
        assert_eq!(summary.duration, "0 seconds");
    }

    #[test]
    fn test_window_speed() {
        let start = Instant::now();
        let mut stats = ProgressStats::new_at(start);
        stats.add_progressed_size_at(10_000, at(start, 1));
        stats.add_progressed_size_at(20_000, at(start, 3));
        stats.add_progressed_size_at(30_000, at(start, 5));

        assert_eq!(stats.get_average_speed_for_last_x_seconds_at(10, at(start, 5)), 15_000);
        assert_eq!(stats.get_average_speed_for_last_x_seconds_at(1, at(start, 5)), 30_000);
        assert_eq!(stats.get_average_speed_at(at(start, 5)), 12_000.0);
    }

    #[test]
    fn test_old_chunks_leave_the_window() {
        let start = Instant::now();
        let mut stats = ProgressStats::new_at(start);
        stats.add_progressed_size_at(10_000, at(start, 1));
        stats.add_progressed_size_at(5_000, at(start, 20));

        assert_eq!(stats.progressed_size, 15_000);
        assert_eq!(stats.get_average_speed_for_last_x_seconds_at(10, at(start, 20)), 5_000);
    }

    #[test]
    fn test_ete() {
        let start = Instant::now();
        let mut stats = ProgressStats::new_at(start);
        stats.total_length = Some(100_000);
        stats.add_progressed_size_at(25_000, at(start, 30));

        assert_eq!(stats.get_progress_in_percentage(), Some(25.0));
        assert_eq!(stats.get_ete_at(at(start, 30)), Some(Duration::from_secs(90)));
    }

    #[test]
    fn test_progress_details_downloading() {
        let start = Instant::now();
        let mut stats = ProgressStats::new_at(start);
        stats.total_length = Some(698_050_000);
        stats.set_progressed_size_at(127_210_000, at(start, 60));

        let details = stats.progress_details_at(&Formatter::default(), at(start, 60));
        assert_eq!(details.have, "127.2 MB");
        assert_eq!(details.percent.as_deref(), Some("18.2"));
        assert_eq!(details.eta.as_deref(), Some("4 min 29 seconds"));
        assert_eq!(
            details.to_string(),
            "127.2 MB of 698.0 MB (18.2%) - 4 min 29 seconds remaining"
        );
    }

    #[test]
    fn test_progress_details_eta_beyond_duration_range() {
        let start = Instant::now();
        let mut stats = ProgressStats::new_at(start);
        stats.total_length = Some(10_000_000_000_000_000);
        stats.add_progressed_size_at(1, at(start, 1));

        assert_eq!(stats.get_total_duration_at(at(start, 2_000)), None);
        let details = stats.progress_details_at(&Formatter::default(), at(start, 2_000));
        assert_eq!(details.eta, None);
        assert!(details.to_string().ends_with(" - remaining time unknown"));
    }

    #[test]
    fn test_progress_details_without_total() {
        let start = Instant::now();
        let mut stats = ProgressStats::new_at(start);
        stats.add_progressed_size_at(512, at(start, 1));

        let details = stats.progress_details_at(&Formatter::default(), at(start, 1));
        assert_eq!(details.to_string(), "512 B - remaining time unknown");
    }

    #[test]
    fn test_progress_details_finished() {
        let start = Instant::now();
        let mut stats = ProgressStats::new_at(start);
        stats.total_length = Some(2_000);
        stats.add_progressed_size_at(2_000, at(start, 2));

        let details = stats.progress_details_at(&Formatter::default(), at(start, 2));
        assert!(details.finished);
        assert_eq!(details.eta, None);
        assert_eq!(details.to_string(), "2.00 kB");
    }
}
