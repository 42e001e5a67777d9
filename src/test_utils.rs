//! Shared test utilities for TimeSpy.
//!
//! In-memory stand-ins for the OS services, each counting how often it was
//! called so tests can assert which collaborator a request reached.

#![cfg(test)]

use crate::error::PlatformError;
use crate::models::{CategoryCode, FieldRead, IconDrawable, UsageEvent, UsageEventKind};
use crate::platform::{
    Clock, PackageRegistry, PlatformContext, SettingsNavigator, UsageRecord, UsageStatsService,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// "Now" reported by the fixed test clock
pub const TEST_NOW_MS: i64 = 1_000_000;

pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.0
    }
}

fn failure() -> PlatformError {
    PlatformError::JavaException("java.lang.SecurityException: fake failure".into())
}

#[derive(Default)]
pub struct FakeUsageStats {
    daily_count: Mutex<usize>,
    events: Mutex<Vec<UsageEvent>>,
    records: Mutex<HashMap<String, HashMap<String, FieldRead>>>,
    last_daily_window: Mutex<Option<(i64, i64)>>,
    last_aggregate_window: Mutex<Option<(i64, i64)>>,
    failing: AtomicBool,
    event_calls: AtomicUsize,
    aggregate_calls: AtomicUsize,
}

impl FakeUsageStats {
    pub fn set_daily_count(&self, count: usize) {
        *self.daily_count.lock().unwrap() = count;
    }

    /// Append an event; callers add them in chronological order like the OS log
    pub fn push_event(&self, package: &str, kind: UsageEventKind, timestamp_ms: i64) {
        self.events
            .lock()
            .unwrap()
            .push(UsageEvent::new(package, kind, timestamp_ms));
    }

    pub fn set_record(&self, package: &str, fields: &[(&str, FieldRead)]) {
        let fields = fields
            .iter()
            .map(|(name, read)| ((*name).to_string(), read.clone()))
            .collect();
        self.records
            .lock()
            .unwrap()
            .insert(package.to_string(), fields);
    }

    pub fn fail_all(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    pub fn last_daily_window(&self) -> Option<(i64, i64)> {
        *self.last_daily_window.lock().unwrap()
    }

    pub fn last_aggregate_window(&self) -> Option<(i64, i64)> {
        *self.last_aggregate_window.lock().unwrap()
    }

    pub fn event_calls(&self) -> usize {
        self.event_calls.load(Ordering::SeqCst)
    }

    pub fn aggregate_calls(&self) -> usize {
        self.aggregate_calls.load(Ordering::SeqCst)
    }
}

impl UsageStatsService for FakeUsageStats {
    fn count_daily_usage_stats(&self, start_ms: i64, end_ms: i64) -> Result<usize, PlatformError> {
        *self.last_daily_window.lock().unwrap() = Some((start_ms, end_ms));
        if self.failing.load(Ordering::SeqCst) {
            return Err(failure());
        }
        Ok(*self.daily_count.lock().unwrap())
    }

    fn for_each_event(
        &self,
        start_ms: i64,
        end_ms: i64,
        visit: &mut dyn FnMut(UsageEvent),
    ) -> Result<(), PlatformError> {
        self.event_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(failure());
        }
        let events = self.events.lock().unwrap().clone();
        for event in events {
            if event.timestamp_ms >= start_ms && event.timestamp_ms < end_ms {
                visit(event);
            }
        }
        Ok(())
    }

    fn aggregated_record(
        &self,
        package_name: &str,
        start_ms: i64,
        end_ms: i64,
    ) -> Result<Option<Box<dyn UsageRecord>>, PlatformError> {
        self.aggregate_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_aggregate_window.lock().unwrap() = Some((start_ms, end_ms));
        if self.failing.load(Ordering::SeqCst) {
            return Err(failure());
        }
        let record = self.records.lock().unwrap().get(package_name).cloned();
        Ok(record.map(|fields| -> Box<dyn UsageRecord> {
            Box::new(FakeRecord {
                package_name: package_name.to_string(),
                fields,
            })
        }))
    }
}

pub struct FakeRecord {
    pub package_name: String,
    pub fields: HashMap<String, FieldRead>,
}

impl UsageRecord for FakeRecord {
    fn package_name(&self) -> &str {
        &self.package_name
    }

    fn read_int_field(&self, name: &str) -> FieldRead {
        self.fields.get(name).cloned().unwrap_or(FieldRead::Missing)
    }
}

#[derive(Default)]
pub struct FakePackages {
    apps: Mutex<HashMap<String, (CategoryCode, Option<IconDrawable>)>>,
    titles: Mutex<HashMap<i32, String>>,
    failing: AtomicBool,
    category_calls: AtomicUsize,
    title_calls: AtomicUsize,
    icon_calls: AtomicUsize,
}

impl FakePackages {
    pub fn install(&self, package: &str, category: CategoryCode, icon: Option<IconDrawable>) {
        self.apps
            .lock()
            .unwrap()
            .insert(package.to_string(), (category, icon));
    }

    pub fn set_title(&self, code: CategoryCode, title: &str) {
        self.titles.lock().unwrap().insert(code.0, title.to_string());
    }

    pub fn fail_all(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    pub fn category_calls(&self) -> usize {
        self.category_calls.load(Ordering::SeqCst)
    }

    pub fn title_calls(&self) -> usize {
        self.title_calls.load(Ordering::SeqCst)
    }

    pub fn icon_calls(&self) -> usize {
        self.icon_calls.load(Ordering::SeqCst)
    }

    fn lookup(
        &self,
        package_name: &str,
    ) -> Result<(CategoryCode, Option<IconDrawable>), PlatformError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(failure());
        }
        self.apps
            .lock()
            .unwrap()
            .get(package_name)
            .cloned()
            .ok_or_else(|| {
                PlatformError::JavaException(format!(
                    "android.content.pm.PackageManager$NameNotFoundException: {package_name}"
                ))
            })
    }
}

impl PackageRegistry for FakePackages {
    fn application_category(&self, package_name: &str) -> Result<CategoryCode, PlatformError> {
        self.category_calls.fetch_add(1, Ordering::SeqCst);
        self.lookup(package_name).map(|(code, _)| code)
    }

    fn category_title(&self, code: CategoryCode) -> Result<Option<String>, PlatformError> {
        self.title_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(failure());
        }
        Ok(self.titles.lock().unwrap().get(&code.0).cloned())
    }

    fn application_icon(&self, package_name: &str) -> Result<IconDrawable, PlatformError> {
        self.icon_calls.fetch_add(1, Ordering::SeqCst);
        let (_, icon) = self.lookup(package_name)?;
        icon.ok_or(PlatformError::NullResult("getApplicationIcon"))
    }
}

#[derive(Default)]
pub struct FakeNavigator {
    failing: AtomicBool,
    calls: AtomicUsize,
}

impl FakeNavigator {
    pub fn fail_all(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SettingsNavigator for FakeNavigator {
    fn open_usage_access_settings(&self) -> Result<(), PlatformError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(failure());
        }
        Ok(())
    }
}

/// The three fake services, kept by the test so it can inspect them afterwards
#[derive(Default)]
pub struct FakeServices {
    pub usage: Arc<FakeUsageStats>,
    pub packages: Arc<FakePackages>,
    pub navigator: Arc<FakeNavigator>,
}

/// Build a platform context over `services` reporting API level `sdk_int`
pub fn fake_context(services: &FakeServices, sdk_int: i32) -> PlatformContext {
    let usage_stats: Arc<dyn UsageStatsService> = Arc::<FakeUsageStats>::clone(&services.usage);
    let packages: Arc<dyn PackageRegistry> = Arc::<FakePackages>::clone(&services.packages);
    let navigator: Arc<dyn SettingsNavigator> = Arc::<FakeNavigator>::clone(&services.navigator);
    PlatformContext {
        sdk_int,
        usage_stats,
        packages,
        navigator,
        clock: Arc::new(FixedClock(TEST_NOW_MS)),
    }
}
