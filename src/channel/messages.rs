// src/channel/messages.rs

use crate::constants::{USAGE_EVENTS_CHANNEL, USAGE_PERMISSION_CHANNEL};
use crate::models::ForegroundMap;
use crate::validation::Arguments;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelName {
    UsageEvents,
    UsagePermission,
}

impl ChannelName {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            USAGE_EVENTS_CHANNEL => Some(ChannelName::UsageEvents),
            USAGE_PERMISSION_CHANNEL => Some(ChannelName::UsagePermission),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    GetRecentForegroundApps,
    GetAppCategory,
    GetLaunchCount,
    GetAppIcon,
    IsUsagePermissionGranted,
    OpenUsageSettings,
}

impl Method {
    pub const ALL: [Method; 6] = [
        Method::GetRecentForegroundApps,
        Method::GetAppCategory,
        Method::GetLaunchCount,
        Method::GetAppIcon,
        Method::IsUsagePermissionGranted,
        Method::OpenUsageSettings,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Method::GetRecentForegroundApps => "getRecentForegroundApps",
            Method::GetAppCategory => "getAppCategory",
            Method::GetLaunchCount => "getLaunchCount",
            Method::GetAppIcon => "getAppIcon",
            Method::IsUsagePermissionGranted => "isUsagePermissionGranted",
            Method::OpenUsageSettings => "openUsageSettings",
        }
    }

    /// Channel the method is served on
    pub fn channel(self) -> ChannelName {
        match self {
            Method::GetRecentForegroundApps
            | Method::GetAppCategory
            | Method::GetLaunchCount
            | Method::GetAppIcon => ChannelName::UsageEvents,
            Method::IsUsagePermissionGranted | Method::OpenUsageSettings => {
                ChannelName::UsagePermission
            }
        }
    }

    /// Method named `name` if `channel` serves it
    pub fn resolve(channel: ChannelName, name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|method| method.as_str() == name && method.channel() == channel)
    }
}

/// A named request from the shell
#[derive(Debug, Clone, Deserialize)]
pub struct MethodCall {
    pub method: String,
    #[serde(default, deserialize_with = "arguments_or_empty")]
    pub arguments: Arguments,
}

/// A JSON object becomes the argument map; any other value means no arguments
fn into_arguments(value: Value) -> Arguments {
    match value {
        Value::Object(map) => map,
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) | Value::Array(_) => {
            Arguments::new()
        }
    }
}

fn arguments_or_empty<'de, D>(deserializer: D) -> Result<Arguments, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(into_arguments)
}

impl MethodCall {
    pub fn new(method: &str) -> Self {
        Self {
            method: method.to_string(),
            arguments: Arguments::new(),
        }
    }

    pub fn with_arguments(method: &str, arguments: Value) -> Self {
        Self {
            method: method.to_string(),
            arguments: into_arguments(arguments),
        }
    }
}

/// Success payload handed back to the shell unchanged
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MethodReply {
    ForegroundApps(ForegroundMap),
    Category(String),
    LaunchCount(u32),
    Icon(Vec<u8>),
    PermissionGranted(bool),
    Unit,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_channel_names_round_trip() {
        assert_eq!(
            ChannelName::from_name("time_spy/usage_events"),
            Some(ChannelName::UsageEvents)
        );
        assert_eq!(
            ChannelName::from_name("usage_permission_channel"),
            Some(ChannelName::UsagePermission)
        );
        assert_eq!(ChannelName::from_name("other"), None);
    }

    #[test]
    fn test_resolve_respects_channel() {
        assert_eq!(
            Method::resolve(ChannelName::UsageEvents, "getAppIcon"),
            Some(Method::GetAppIcon)
        );
        assert_eq!(Method::resolve(ChannelName::UsagePermission, "getAppIcon"), None);
        assert_eq!(
            Method::resolve(ChannelName::UsagePermission, "openUsageSettings"),
            Some(Method::OpenUsageSettings)
        );
        assert_eq!(Method::resolve(ChannelName::UsageEvents, "fooBar"), None);
    }

    #[test]
    fn test_method_call_deserializes_without_arguments() {
        let call: MethodCall =
            serde_json::from_value(json!({ "method": "isUsagePermissionGranted" })).unwrap();
        assert_eq!(call.method, "isUsagePermissionGranted");
        assert!(call.arguments.is_empty());
    }

    #[test]
    fn test_method_call_deserializes_null_arguments() {
        let call: MethodCall = serde_json::from_value(json!({
            "method": "isUsagePermissionGranted",
            "arguments": null
        }))
        .unwrap();
        assert_eq!(call.method, "isUsagePermissionGranted");
        assert!(call.arguments.is_empty());
    }

    #[test]
    fn test_method_call_ignores_non_object_arguments() {
        let call: MethodCall =
            serde_json::from_value(json!({ "method": "getAppIcon", "arguments": [1, 2] }))
                .unwrap();
        assert!(call.arguments.is_empty());
    }

    #[test]
    fn test_method_call_deserializes_arguments() {
        let call: MethodCall = serde_json::from_value(json!({
            "method": "getAppCategory",
            "arguments": { "packageName": "com.example" }
        }))
        .unwrap();
        assert_eq!(call.arguments["packageName"], "com.example");
    }

    #[test]
    fn test_reply_serialization() {
        let mut apps = ForegroundMap::new();
        apps.insert("pkgA".into(), 200);

        assert_eq!(
            serde_json::to_value(MethodReply::ForegroundApps(apps)).unwrap(),
            json!({ "pkgA": 200 })
        );
        assert_eq!(
            serde_json::to_value(MethodReply::Category("Games".into())).unwrap(),
            json!("Games")
        );
        assert_eq!(serde_json::to_value(MethodReply::LaunchCount(3)).unwrap(), json!(3));
        assert_eq!(serde_json::to_value(MethodReply::Icon(vec![1, 2])).unwrap(), json!([1, 2]));
        assert_eq!(
            serde_json::to_value(MethodReply::PermissionGranted(true)).unwrap(),
            json!(true)
        );
        assert_eq!(serde_json::to_value(MethodReply::Unit).unwrap(), Value::Null);
    }
}
