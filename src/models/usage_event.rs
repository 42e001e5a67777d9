use crate::constants::SDK_Q;
use std::collections::HashMap;

/// Package name to the latest foreground-entry timestamp (epoch millis)
pub type ForegroundMap = HashMap<String, i64>;

/// Raw `UsageEvents.Event` code shared by `MOVE_TO_FOREGROUND` and `ACTIVITY_RESUMED`
const RAW_FOREGROUND: i32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageEventKind {
    MoveToForeground,
    ActivityResumed,
    Other(i32),
}

impl UsageEventKind {
    /// Decode an event code reported by the OS.
    ///
    /// API 29 renamed `MOVE_TO_FOREGROUND` to `ACTIVITY_RESUMED` without
    /// changing its value, so the running level decides which name applies.
    pub fn from_raw(code: i32, sdk_int: i32) -> Self {
        match code {
            RAW_FOREGROUND if sdk_int >= SDK_Q => UsageEventKind::ActivityResumed,
            RAW_FOREGROUND => UsageEventKind::MoveToForeground,
            other => UsageEventKind::Other(other),
        }
    }

    pub fn is_foreground(self) -> bool {
        match self {
            UsageEventKind::MoveToForeground | UsageEventKind::ActivityResumed => true,
            UsageEventKind::Other(_) => false,
        }
    }
}

/// One entry of the OS usage event log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageEvent {
    pub package_name: String,
    pub kind: UsageEventKind,
    pub timestamp_ms: i64,
}

impl UsageEvent {
    pub fn new(package_name: &str, kind: UsageEventKind, timestamp_ms: i64) -> Self {
        Self {
            package_name: package_name.to_string(),
            kind,
            timestamp_ms,
        }
    }
}
