pub mod types;

pub use types::{
    Clock, PackageRegistry, SettingsNavigator, SystemClock, UsageRecord, UsageStatsService,
};

#[cfg(target_os = "android")]
pub mod android;

use crate::error::PlatformError;
use std::sync::Arc;

/// OS service handles shared by every collaborator for the life of the process
#[derive(Clone)]
pub struct PlatformContext {
    /// Running API level; 0 off Android
    pub sdk_int: i32,
    pub usage_stats: Arc<dyn UsageStatsService>,
    pub packages: Arc<dyn PackageRegistry>,
    pub navigator: Arc<dyn SettingsNavigator>,
    pub clock: Arc<dyn Clock>,
}

impl PlatformContext {
    #[cfg(target_os = "android")]
    pub fn native() -> Result<Self, PlatformError> {
        let platform = Arc::new(android::AndroidPlatform::new()?);
        let sdk_int = platform.sdk_int();
        log::info!("Android platform ready (API {sdk_int})");
        let usage_stats: Arc<dyn UsageStatsService> =
            Arc::<android::AndroidPlatform>::clone(&platform);
        let packages: Arc<dyn PackageRegistry> = Arc::<android::AndroidPlatform>::clone(&platform);
        Ok(Self {
            sdk_int,
            usage_stats,
            packages,
            navigator: platform,
            clock: Arc::new(SystemClock),
        })
    }

    #[cfg(not(target_os = "android"))]
    #[allow(
        clippy::unnecessary_wraps,
        reason = "same signature as the fallible Android constructor"
    )]
    pub fn native() -> Result<Self, PlatformError> {
        log::warn!("Usage statistics are only available on Android; every request will fall back");
        let platform = Arc::new(UnsupportedPlatform);
        let usage_stats: Arc<dyn UsageStatsService> = Arc::<UnsupportedPlatform>::clone(&platform);
        let packages: Arc<dyn PackageRegistry> = Arc::<UnsupportedPlatform>::clone(&platform);
        Ok(Self {
            sdk_int: 0,
            usage_stats,
            packages,
            navigator: platform,
            clock: Arc::new(SystemClock),
        })
    }

    pub fn now_millis(&self) -> i64 {
        self.clock.now_millis()
    }
}

// Stub for development on desktop targets
#[cfg(not(target_os = "android"))]
pub struct UnsupportedPlatform;

#[cfg(not(target_os = "android"))]
impl UsageStatsService for UnsupportedPlatform {
    fn count_daily_usage_stats(
        &self,
        _start_ms: i64,
        _end_ms: i64,
    ) -> Result<usize, PlatformError> {
        Err(PlatformError::Unavailable("UsageStatsManager"))
    }

    fn for_each_event(
        &self,
        _start_ms: i64,
        _end_ms: i64,
        _visit: &mut dyn FnMut(crate::models::UsageEvent),
    ) -> Result<(), PlatformError> {
        Err(PlatformError::Unavailable("UsageStatsManager"))
    }

    fn aggregated_record(
        &self,
        _package_name: &str,
        _start_ms: i64,
        _end_ms: i64,
    ) -> Result<Option<Box<dyn UsageRecord>>, PlatformError> {
        Err(PlatformError::Unavailable("UsageStatsManager"))
    }
}

#[cfg(not(target_os = "android"))]
impl PackageRegistry for UnsupportedPlatform {
    fn application_category(
        &self,
        _package_name: &str,
    ) -> Result<crate::models::CategoryCode, PlatformError> {
        Err(PlatformError::Unavailable("PackageManager"))
    }

    fn category_title(
        &self,
        _code: crate::models::CategoryCode,
    ) -> Result<Option<String>, PlatformError> {
        Err(PlatformError::Unavailable("ApplicationInfo"))
    }

    fn application_icon(
        &self,
        _package_name: &str,
    ) -> Result<crate::models::IconDrawable, PlatformError> {
        Err(PlatformError::Unavailable("PackageManager"))
    }
}

#[cfg(not(target_os = "android"))]
impl SettingsNavigator for UnsupportedPlatform {
    fn open_usage_access_settings(&self) -> Result<(), PlatformError> {
        Err(PlatformError::Unavailable("Usage access settings"))
    }
}
