use crate::error::PlatformError;
use crate::models::{CategoryCode, FieldRead, IconDrawable, UsageEvent};
use std::time::{SystemTime, UNIX_EPOCH};

/// Aggregated usage summary for one package over a window.
///
/// The launch count lives in fields that are not part of the public platform
/// contract, so the record only exposes raw integer field reads.
pub trait UsageRecord: Send {
    fn package_name(&self) -> &str;
    fn read_int_field(&self, name: &str) -> FieldRead;
}

/// `UsageStatsManager`
pub trait UsageStatsService: Send + Sync {
    /// Number of daily-bucketed usage records between `start_ms` and `end_ms`
    fn count_daily_usage_stats(&self, start_ms: i64, end_ms: i64) -> Result<usize, PlatformError>;

    /// Visit every event between `start_ms` and `end_ms` in chronological order
    fn for_each_event(
        &self,
        start_ms: i64,
        end_ms: i64,
        visit: &mut dyn FnMut(UsageEvent),
    ) -> Result<(), PlatformError>;

    /// Aggregated record for `package_name`, or `None` when the window holds no usage for it
    fn aggregated_record(
        &self,
        package_name: &str,
        start_ms: i64,
        end_ms: i64,
    ) -> Result<Option<Box<dyn UsageRecord>>, PlatformError>;
}

/// `PackageManager` plus the `ApplicationInfo` statics
pub trait PackageRegistry: Send + Sync {
    fn application_category(&self, package_name: &str) -> Result<CategoryCode, PlatformError>;
    fn category_title(&self, code: CategoryCode) -> Result<Option<String>, PlatformError>;
    fn application_icon(&self, package_name: &str) -> Result<IconDrawable, PlatformError>;
}

/// Navigation requests the bridge can ask the host to perform
pub trait SettingsNavigator: Send + Sync {
    fn open_usage_access_settings(&self) -> Result<(), PlatformError>;
}

pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .ok()
            .and_then(|d| i64::try_from(d.as_millis()).ok())
            .unwrap_or(0)
    }
}
