//! Time sources and timestamp formatting.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Duration, Local};
use logfox_types::{LogFoxError, Result};

/// Source of the wall-clock time stamped on each line.
pub trait Clock: Send + Sync {
    /// Current local time.
    fn now(&self) -> DateTime<Local>;
}

/// The system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<Local>);

impl FixedClock {
    /// Freeze the clock at `at`.
    pub fn new(at: DateTime<Local>) -> Self {
        Self(at)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}

/// Check that a `strftime` pattern only contains known specifiers.
///
/// chrono panics when displaying a malformed pattern, so patterns coming
/// from configuration are validated once up front.
pub fn validate_format(pattern: &str) -> Result<()> {
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(LogFoxError::Validation(format!(
            "Invalid time format '{}'",
            pattern
        )));
    }
    Ok(())
}

/// Render the clock's current time with a validated pattern.
pub fn timestamp(clock: &dyn Clock, pattern: &str) -> String {
    clock.now().format(pattern).to_string()
}

/// Format a duration in human-readable form.
pub fn pretty_duration(duration: Duration) -> String {
    let secs = duration.num_seconds();

    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        let hours = secs / 3600;
        let mins = (secs % 3600) / 60;
        format!("{}h {}m", hours, mins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_fixed_clock_timestamp() {
        let clock = FixedClock::new(Local.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap());
        assert_eq!(timestamp(&clock, "%H:%M:%S"), "10:00:00");
        assert_eq!(timestamp(&clock, "%Y-%m-%d %H:%M"), "2024-05-01 10:00");
    }

    #[test]
    fn test_validate_format() {
        assert!(validate_format("%H:%M:%S").is_ok());
        assert!(validate_format("%H:%M:%S%.3f").is_ok());
        assert!(validate_format("%Q").is_err());
    }

    #[test]
    fn test_pretty_duration() {
        assert_eq!(pretty_duration(Duration::seconds(42)), "42s");
        assert_eq!(pretty_duration(Duration::seconds(125)), "2m 5s");
        assert_eq!(pretty_duration(Duration::seconds(7260)), "2h 1m");
    }
}
