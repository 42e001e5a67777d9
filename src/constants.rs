// src/constants.rs

/// Channel carrying usage history, category, launch count and icon requests
pub const USAGE_EVENTS_CHANNEL: &str = "time_spy/usage_events";

/// Channel carrying usage-access permission requests
pub const USAGE_PERMISSION_CHANNEL: &str = "usage_permission_channel";

/// Milliseconds in one hour (60 * 60 * 1000)
pub const MILLIS_PER_HOUR: i64 = 3_600_000;

/// Milliseconds in one day (24 * 60 * 60 * 1000)
pub const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;

/// Trailing window used to probe for usage-access permission
pub const PERMISSION_WINDOW_MS: i64 = MILLIS_PER_HOUR;

/// Trailing window, in days, that launch counts are aggregated over
pub const LAUNCH_WINDOW_DAYS: i64 = 14;

/// Trailing window, in milliseconds, that launch counts are aggregated over
pub const LAUNCH_WINDOW_MS: i64 = LAUNCH_WINDOW_DAYS * MILLIS_PER_DAY;

/// Android 8.0 (Oreo): first level with `ApplicationInfo.getCategoryTitle`
pub const SDK_O: i32 = 26;

/// Android 10 (Q): first level with the launch-count fields on `UsageStats`
pub const SDK_Q: i32 = 29;

/// Category title returned whenever no real title can be resolved
pub const CATEGORY_FALLBACK: &str = "Other";

/// Launch-count field on `android.app.usage.UsageStats`, newest layout first
pub const LAUNCH_COUNT_FIELDS: [&str; 2] = ["mAppLaunchCount", "mLaunchCount"];

/// `UsageStatsManager.INTERVAL_DAILY`
pub const INTERVAL_DAILY: i32 = 0;

/// `Settings.ACTION_USAGE_ACCESS_SETTINGS`
pub const ACTION_USAGE_ACCESS_SETTINGS: &str = "android.settings.USAGE_ACCESS_SETTINGS";

/// `Intent.FLAG_ACTIVITY_NEW_TASK`
pub const FLAG_ACTIVITY_NEW_TASK: i32 = 0x1000_0000;

/// Tag attached to every record forwarded to `android.util.Log`
pub const LOG_TAG: &str = "TimeSpy";
