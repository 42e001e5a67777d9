use crate::constants::{LAUNCH_COUNT_FIELDS, SDK_Q};
use crate::models::{FieldRead, LaunchCount};
use crate::platform::{PlatformContext, UsageRecord};
use log::{debug, warn};

/// Extracts a launch count from an aggregated usage record.
///
/// The count is not part of the public `UsageStats` API, so each platform
/// level gets the accessor that knows where it lives there.
pub trait LaunchCountAccessor: Send + Sync {
    fn launch_count(&self, record: &dyn UsageRecord) -> LaunchCount;
}

/// Reads the first usable value out of a list of integer fields.
/// Missing, unreadable and negative values fall through to the next field.
pub struct FieldLaunchCountAccessor {
    fields: &'static [&'static str],
}

impl FieldLaunchCountAccessor {
    pub fn new(fields: &'static [&'static str]) -> Self {
        Self { fields }
    }
}

impl LaunchCountAccessor for FieldLaunchCountAccessor {
    fn launch_count(&self, record: &dyn UsageRecord) -> LaunchCount {
        let package = record.package_name();
        for field in self.fields {
            match record.read_int_field(field) {
                FieldRead::Value(value) => match u32::try_from(value) {
                    Ok(count) => return LaunchCount::Known(count),
                    Err(_) => {
                        warn!("Field {field} holds invalid launch count {value} for {package}");
                    }
                },
                FieldRead::Missing => warn!("Field {field} not found for {package}"),
                FieldRead::Unreadable(reason) => {
                    warn!("Error reading {field} for {package}: {reason}");
                }
            }
        }
        LaunchCount::Unknown
    }
}

/// Levels that predate the launch-count fields
pub struct NoLaunchCount;

impl LaunchCountAccessor for NoLaunchCount {
    fn launch_count(&self, _record: &dyn UsageRecord) -> LaunchCount {
        LaunchCount::Unknown
    }
}

pub fn accessor_for_sdk(sdk_int: i32) -> Box<dyn LaunchCountAccessor> {
    if sdk_int >= SDK_Q {
        Box::new(FieldLaunchCountAccessor::new(&LAUNCH_COUNT_FIELDS))
    } else {
        Box::new(NoLaunchCount)
    }
}

pub struct LaunchCounter {
    platform: PlatformContext,
    accessor: Box<dyn LaunchCountAccessor>,
    window_ms: i64,
}

impl LaunchCounter {
    pub fn new(platform: PlatformContext, window_ms: i64) -> Self {
        let accessor = accessor_for_sdk(platform.sdk_int);
        Self::with_accessor(platform, accessor, window_ms)
    }

    pub fn with_accessor(
        platform: PlatformContext,
        accessor: Box<dyn LaunchCountAccessor>,
        window_ms: i64,
    ) -> Self {
        Self {
            platform,
            accessor,
            window_ms,
        }
    }

    /// Lowest API level the launch count can be read on
    pub fn minimum_sdk() -> i32 {
        SDK_Q
    }

    /// Launches of `package_name` over the trailing window; 0 when unknown
    pub fn launch_count(&self, package_name: &str) -> u32 {
        let now = self.platform.now_millis();
        let start = now - self.window_ms;

        let record = match self
            .platform
            .usage_stats
            .aggregated_record(package_name, start, now)
        {
            Ok(Some(record)) => record,
            Ok(None) => {
                debug!("No aggregated usage for {package_name}");
                return 0;
            }
            Err(e) => {
                warn!("Failed to aggregate usage stats for {package_name}: {e}");
                return 0;
            }
        };

        self.accessor.launch_count(record.as_ref()).or_zero()
    }
}
