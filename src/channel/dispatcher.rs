// src/channel/dispatcher.rs

use super::{ChannelName, Method, MethodCall, MethodReply};
use crate::app_info::AppMetadataReader;
use crate::config::UsageConfig;
use crate::error::ChannelError;
use crate::launches::LaunchCounter;
use crate::permissions::PermissionProbe;
use crate::platform::PlatformContext;
use crate::tracker::ForegroundAppTracker;
use crate::validation::{optional_millis, require_string, ARG_PACKAGE_NAME, ARG_SINCE};
use log::{debug, warn};

/// Routes each method call from the shell to exactly one collaborator
pub struct RequestDispatcher {
    sdk_int: i32,
    permissions: PermissionProbe,
    tracker: ForegroundAppTracker,
    launches: LaunchCounter,
    app_info: AppMetadataReader,
}

impl RequestDispatcher {
    pub fn new(platform: PlatformContext, config: &UsageConfig) -> Self {
        Self {
            sdk_int: platform.sdk_int,
            permissions: PermissionProbe::new(platform.clone(), config.permission_window_ms),
            tracker: ForegroundAppTracker::new(platform.clone()),
            launches: LaunchCounter::new(platform.clone(), config.launch_window_ms),
            app_info: AppMetadataReader::new(platform),
        }
    }

    pub fn dispatch(&self, channel: &str, call: &MethodCall) -> Result<MethodReply, ChannelError> {
        debug!("{channel} <- {}", call.method);

        let result = self.route(channel, call);
        if let Err(e) = &result {
            warn!("{channel} {} failed with {}: {e}", call.method, e.code());
        }
        result
    }

    fn route(&self, channel: &str, call: &MethodCall) -> Result<MethodReply, ChannelError> {
        let method = ChannelName::from_name(channel)
            .and_then(|name| Method::resolve(name, &call.method))
            .ok_or_else(|| ChannelError::Unimplemented {
                channel: channel.to_string(),
                method: call.method.clone(),
            })?;

        let args = &call.arguments;
        match method {
            Method::GetRecentForegroundApps => {
                let since = optional_millis(args, ARG_SINCE);
                Ok(MethodReply::ForegroundApps(self.tracker.recent_foreground_apps(since)))
            }
            Method::GetAppCategory => {
                let package = require_string(args, ARG_PACKAGE_NAME)?;
                Ok(MethodReply::Category(self.app_info.app_category(package)))
            }
            Method::GetLaunchCount => {
                let required = LaunchCounter::minimum_sdk();
                if self.sdk_int < required {
                    return Err(ChannelError::UnsupportedPlatformVersion {
                        required,
                        running: self.sdk_int,
                    });
                }
                let package = require_string(args, ARG_PACKAGE_NAME)?;
                Ok(MethodReply::LaunchCount(self.launches.launch_count(package)))
            }
            Method::GetAppIcon => {
                let package = require_string(args, ARG_PACKAGE_NAME)?;
                self.app_info
                    .app_icon_bytes(package)
                    .map(MethodReply::Icon)
                    .ok_or_else(|| ChannelError::NoIcon {
                        package: package.to_string(),
                    })
            }
            Method::IsUsagePermissionGranted => Ok(MethodReply::PermissionGranted(
                self.permissions.is_permission_granted(),
            )),
            Method::OpenUsageSettings => {
                self.permissions.open_settings();
                Ok(MethodReply::Unit)
            }
        }
    }
}
