use crate::models::{ForegroundMap, UsageEvent};
use crate::platform::PlatformContext;
use log::{debug, warn};

/// Reduces the OS event log to the last foreground entry per package
pub struct ForegroundAppTracker {
    platform: PlatformContext,
}

impl ForegroundAppTracker {
    pub fn new(platform: PlatformContext) -> Self {
        Self { platform }
    }

    /// Latest foreground timestamp per package in `[since_ms, now)`.
    ///
    /// The log is chronological, so overwriting on every foreground event
    /// leaves the latest timestamp regardless of which foreground kind it was.
    pub fn recent_foreground_apps(&self, since_ms: i64) -> ForegroundMap {
        let now = self.platform.now_millis();
        let mut last_foreground = ForegroundMap::new();

        let mut record_foreground = |event: UsageEvent| {
            if event.kind.is_foreground() {
                last_foreground.insert(event.package_name, event.timestamp_ms);
            }
        };
        let result = self
            .platform
            .usage_stats
            .for_each_event(since_ms, now, &mut record_foreground);

        if let Err(e) = result {
            warn!("Failed to read usage events since {since_ms}: {e}");
            return ForegroundMap::new();
        }

        debug!("{} packages entered the foreground since {since_ms}", last_foreground.len());
        last_foreground
    }
}
