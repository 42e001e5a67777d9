use crate::constants::{LAUNCH_WINDOW_MS, MILLIS_PER_DAY, PERMISSION_WINDOW_MS};
use log::{warn, LevelFilter};

/// Runtime knobs for the bridge. Defaults match the shell's expectations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageConfig {
    /// Trailing window probed to decide whether usage access is granted
    pub permission_window_ms: i64,
    /// Trailing window launch counts are aggregated over
    pub launch_window_ms: i64,
    pub log_level: LevelFilter,
}

impl Default for UsageConfig {
    fn default() -> Self {
        Self {
            permission_window_ms: PERMISSION_WINDOW_MS,
            launch_window_ms: LAUNCH_WINDOW_MS,
            log_level: LevelFilter::Info,
        }
    }
}

impl UsageConfig {
    /// Defaults overridden by `TIMESPY_LOG` and `TIMESPY_LAUNCH_WINDOW_DAYS`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(level) = lookup("TIMESPY_LOG") {
            match level.parse::<LevelFilter>() {
                Ok(level) => config.log_level = level,
                Err(_) => warn!("Ignoring TIMESPY_LOG={level}: not a log level"),
            }
        }

        if let Some(days) = lookup("TIMESPY_LAUNCH_WINDOW_DAYS") {
            match days.trim().parse::<i64>() {
                Ok(days) if days > 0 => {
                    config.launch_window_ms = days.saturating_mul(MILLIS_PER_DAY);
                }
                _ => {
                    warn!("Ignoring TIMESPY_LAUNCH_WINDOW_DAYS={days}: must be a positive integer");
                }
            }
        }

        config
    }
}
