use serde::*;

/// Log timestamp in microseconds.
///
/// Relative timestamps count from logger boot; absolute timestamps (GPS time)
/// count from the Unix epoch. Both share the same microsecond resolution.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct LogTimestamp(u64);

impl LogTimestamp {
    /// Create a new timestamp from microseconds.
    pub fn new(micros: u64) -> Self {
        Self(micros)
    }

    /// Raw microsecond value.
    pub fn micros(&self) -> u64 {
        self.0
    }

    /// Whole seconds.
    pub fn as_secs(&self) -> u64 {
        self.0 / 1_000_000
    }

    /// Seconds as f64, keeping sub-second resolution.
    pub fn as_secs_f64(&self) -> f64 {
        self.0 as f64 / 1e6
    }

    /// Interpret an absolute timestamp as a UTC datetime.
    pub fn to_datetime(&self) -> chrono::DateTime<chrono::Utc> {
        let secs = (self.0 / 1_000_000) as i64;
        let nanos = (self.0 % 1_000_000) as u32 * 1000;
        chrono::DateTime::from_timestamp(secs, nanos).unwrap_or(chrono::DateTime::UNIX_EPOCH)
    }

    /// Elapsed time since log start, formatted as `h:mm:ss`.
    pub fn elapsed_str(&self) -> String {
        format_duration_hms(self.as_secs())
    }
}

impl From<u64> for LogTimestamp {
    fn from(micros: u64) -> Self {
        LogTimestamp::new(micros)
    }
}

impl std::fmt::Display for LogTimestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Format a duration in seconds as `h:mm:ss`.
pub fn format_duration_hms(total_secs: u64) -> String {
    let (m, s) = (total_secs / 60, total_secs % 60);
    let (h, m) = (m / 60, m % 60);
    format!("{}:{:02}:{:02}", h, m, s)
}

/// Format a duration in seconds verbosely, e.g. `2 days 3 hours 5 seconds`.
///
/// Zero-valued leading units are skipped; seconds are always printed.
pub fn format_duration_verbose(total_secs: u64) -> String {
    let (m, s) = (total_secs / 60, total_secs % 60);
    let (h, m) = (m / 60, m % 60);
    let (days, h) = (h / 24, h % 24);

    let mut out = String::new();
    if days > 0 {
        out.push_str(&format!("{} days ", days));
    }
    if h > 0 {
        out.push_str(&format!("{} hours ", h));
    }
    if m > 0 {
        out.push_str(&format!("{} minutes ", m));
    }
    out.push_str(&format!("{} seconds", s));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_micros() {
        let ts = LogTimestamp::new(1_500_000);
        assert_eq!(ts.micros(), 1_500_000);
        assert_eq!(ts.as_secs(), 1);
        assert!((ts.as_secs_f64() - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_timestamp_from_u64() {
        let ts: LogTimestamp = 42u64.into();
        assert_eq!(ts.micros(), 42);
    }

    #[test]
    fn test_timestamp_ordering() {
        assert!(LogTimestamp::new(1) < LogTimestamp::new(2));
    }

    #[test]
    fn test_timestamp_to_datetime_epoch() {
        let ts = LogTimestamp::new(0);
        assert_eq!(ts.to_datetime(), chrono::DateTime::UNIX_EPOCH);
    }

    #[test]
    fn test_timestamp_to_datetime() {
        // 2021-01-01 00:00:00 UTC
        let ts = LogTimestamp::new(1_609_459_200_000_000);
        assert_eq!(ts.to_datetime().timestamp(), 1_609_459_200);
    }

    #[test]
    fn test_format_duration_hms() {
        assert_eq!(format_duration_hms(0), "0:00:00");
        assert_eq!(format_duration_hms(59), "0:00:59");
        assert_eq!(format_duration_hms(3661), "1:01:01");
        assert_eq!(format_duration_hms(7322), "2:02:02");
    }

    #[test]
    fn test_elapsed_str() {
        let ts = LogTimestamp::new(3_661_000_000);
        assert_eq!(ts.elapsed_str(), "1:01:01");
    }

    #[test]
    fn test_format_duration_verbose_seconds_only() {
        assert_eq!(format_duration_verbose(42), "42 seconds");
    }

    #[test]
    fn test_format_duration_verbose_full() {
        let secs = 2 * 86400 + 3 * 3600 + 4 * 60 + 5;
        assert_eq!(
            format_duration_verbose(secs),
            "2 days 3 hours 4 minutes 5 seconds"
        );
    }

    #[test]
    fn test_format_duration_verbose_skips_zero_units() {
        let secs = 86400 + 5;
        assert_eq!(format_duration_verbose(secs), "1 days 5 seconds");
    }
}
