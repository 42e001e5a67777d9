use crate::platform::PlatformContext;
use log::{error, warn};

/// Usage-access permission state.
///
/// The platform has no direct query for this permission on every supported
/// level, so a non-empty daily usage query over a short trailing window
/// stands in for "granted".
pub struct PermissionProbe {
    platform: PlatformContext,
    window_ms: i64,
}

impl PermissionProbe {
    pub fn new(platform: PlatformContext, window_ms: i64) -> Self {
        Self { platform, window_ms }
    }

    pub fn is_permission_granted(&self) -> bool {
        let now = self.platform.now_millis();
        match self
            .platform
            .usage_stats
            .count_daily_usage_stats(now - self.window_ms, now)
        {
            Ok(count) => count > 0,
            Err(e) => {
                warn!("Usage stats query failed, reporting permission as not granted: {e}");
                false
            }
        }
    }

    /// Send the user to the usage-access settings screen
    pub fn open_settings(&self) {
        if let Err(e) = self.platform.navigator.open_usage_access_settings() {
            error!("Failed to open usage access settings: {e}");
        }
    }
}
