// Android usage and package services over JNI
//
// reference
// https://developer.android.com/reference/android/app/usage/UsageStatsManager
// https://developer.android.com/reference/android/content/pm/PackageManager
// https://developer.android.com/reference/android/content/pm/ApplicationInfo#getCategoryTitle(android.content.Context,%20int)

#![allow(
    unsafe_code,
    reason = "the JavaVM and activity handles arrive as raw pointers from ndk-context"
)]

use super::{PackageRegistry, SettingsNavigator, UsageRecord, UsageStatsService};
use crate::constants::{ACTION_USAGE_ACCESS_SETTINGS, FLAG_ACTIVITY_NEW_TASK, INTERVAL_DAILY};
use crate::error::PlatformError;
use crate::models::{CategoryCode, FieldRead, IconDrawable, UsageEvent, UsageEventKind};
use jni::objects::{GlobalRef, JByteArray, JObject, JString, JValue};
use jni::{JNIEnv, JavaVM};
use std::sync::{Arc, OnceLock};

/// Local references a single service call may hold at once
const LOCAL_FRAME_CAPACITY: i32 = 16;

/// `Context.USAGE_STATS_SERVICE`
const USAGE_STATS_SERVICE: &str = "usagestats";

/// Quality argument for `Bitmap.compress`; PNG ignores it but the platform requires one
const PNG_QUALITY: i32 = 100;

pub struct AndroidPlatform {
    vm: Arc<JavaVM>,
    context: GlobalRef,
    sdk_int: i32,
    usage_stats_manager: OnceLock<GlobalRef>,
    package_manager: OnceLock<GlobalRef>,
}

impl AndroidPlatform {
    pub fn new() -> Result<Self, PlatformError> {
        let ctx = ndk_context::android_context();
        let vm = unsafe { JavaVM::from_raw(ctx.vm().cast()) }?;

        let (context, sdk_int) = {
            let mut env = vm.attach_current_thread()?;
            let activity = unsafe { JObject::from_raw(ctx.context().cast()) };
            if activity.is_null() {
                return Err(PlatformError::NullResult("android_context"));
            }
            let context = env.new_global_ref(&activity)?;
            let sdk_int = env
                .get_static_field("android/os/Build$VERSION", "SDK_INT", "I")?
                .i()?;
            (context, sdk_int)
        };

        Ok(Self {
            vm: Arc::new(vm),
            context,
            sdk_int,
            usage_stats_manager: OnceLock::new(),
            package_manager: OnceLock::new(),
        })
    }

    pub fn sdk_int(&self) -> i32 {
        self.sdk_int
    }

    fn with_env<T, F>(&self, f: F) -> Result<T, PlatformError>
    where
        F: FnOnce(&mut JNIEnv) -> Result<T, PlatformError>,
    {
        with_attached_env(&self.vm, f)
    }

    fn usage_stats_manager(&self, env: &mut JNIEnv) -> Result<&GlobalRef, PlatformError> {
        if let Some(manager) = self.usage_stats_manager.get() {
            return Ok(manager);
        }
        let name = env.new_string(USAGE_STATS_SERVICE)?;
        let service = env
            .call_method(
                self.context.as_obj(),
                "getSystemService",
                "(Ljava/lang/String;)Ljava/lang/Object;",
                &[JValue::Object(&name)],
            )?
            .l()?;
        if service.is_null() {
            return Err(PlatformError::NullResult("getSystemService(usagestats)"));
        }
        let service = env.new_global_ref(&service)?;
        Ok(self.usage_stats_manager.get_or_init(|| service))
    }

    fn package_manager(&self, env: &mut JNIEnv) -> Result<&GlobalRef, PlatformError> {
        if let Some(manager) = self.package_manager.get() {
            return Ok(manager);
        }
        let manager = env
            .call_method(
                self.context.as_obj(),
                "getPackageManager",
                "()Landroid/content/pm/PackageManager;",
                &[],
            )?
            .l()?;
        if manager.is_null() {
            return Err(PlatformError::NullResult("getPackageManager"));
        }
        let manager = env.new_global_ref(&manager)?;
        Ok(self.package_manager.get_or_init(|| manager))
    }
}

impl UsageStatsService for AndroidPlatform {
    fn count_daily_usage_stats(&self, start_ms: i64, end_ms: i64) -> Result<usize, PlatformError> {
        self.with_env(|env| {
            let manager = self.usage_stats_manager(env)?;
            let stats = env
                .call_method(
                    manager.as_obj(),
                    "queryUsageStats",
                    "(IJJ)Ljava/util/List;",
                    &[
                        JValue::Int(INTERVAL_DAILY),
                        JValue::Long(start_ms),
                        JValue::Long(end_ms),
                    ],
                )?
                .l()?;
            if stats.is_null() {
                return Ok(0);
            }
            let size = env.call_method(&stats, "size", "()I", &[])?.i()?;
            Ok(usize::try_from(size).unwrap_or(0))
        })
    }

    fn for_each_event(
        &self,
        start_ms: i64,
        end_ms: i64,
        visit: &mut dyn FnMut(UsageEvent),
    ) -> Result<(), PlatformError> {
        let sdk_int = self.sdk_int;
        self.with_env(|env| {
            let manager = self.usage_stats_manager(env)?;
            let events = env
                .call_method(
                    manager.as_obj(),
                    "queryEvents",
                    "(JJ)Landroid/app/usage/UsageEvents;",
                    &[JValue::Long(start_ms), JValue::Long(end_ms)],
                )?
                .l()?;
            if events.is_null() {
                return Ok(());
            }

            // A single Event instance is refilled by getNextEvent on every step
            let event = env.new_object("android/app/usage/UsageEvents$Event", "()V", &[])?;

            while env.call_method(&events, "hasNextEvent", "()Z", &[])?.z()? {
                env.with_local_frame(4, |env| -> Result<(), PlatformError> {
                    env.call_method(
                        &events,
                        "getNextEvent",
                        "(Landroid/app/usage/UsageEvents$Event;)Z",
                        &[JValue::Object(&event)],
                    )?;
                    let code = env.call_method(&event, "getEventType", "()I", &[])?.i()?;
                    let timestamp_ms = env.call_method(&event, "getTimeStamp", "()J", &[])?.j()?;
                    let package = env
                        .call_method(&event, "getPackageName", "()Ljava/lang/String;", &[])?
                        .l()?;
                    let package_name = java_string(env, package)?;

                    visit(UsageEvent::new(
                        &package_name,
                        UsageEventKind::from_raw(code, sdk_int),
                        timestamp_ms,
                    ));
                    Ok(())
                })?;
            }
            Ok(())
        })
    }

    fn aggregated_record(
        &self,
        package_name: &str,
        start_ms: i64,
        end_ms: i64,
    ) -> Result<Option<Box<dyn UsageRecord>>, PlatformError> {
        self.with_env(|env| {
            let manager = self.usage_stats_manager(env)?;
            let stats_map = env
                .call_method(
                    manager.as_obj(),
                    "queryAndAggregateUsageStats",
                    "(JJ)Ljava/util/Map;",
                    &[JValue::Long(start_ms), JValue::Long(end_ms)],
                )?
                .l()?;
            if stats_map.is_null() {
                return Ok(None);
            }

            let key = env.new_string(package_name)?;
            let stats = env
                .call_method(
                    &stats_map,
                    "get",
                    "(Ljava/lang/Object;)Ljava/lang/Object;",
                    &[JValue::Object(&key)],
                )?
                .l()?;
            if stats.is_null() {
                return Ok(None);
            }

            let record: Box<dyn UsageRecord> = Box::new(AndroidUsageRecord {
                vm: Arc::clone(&self.vm),
                stats: env.new_global_ref(&stats)?,
                package_name: package_name.to_string(),
            });
            Ok(Some(record))
        })
    }
}

impl PackageRegistry for AndroidPlatform {
    fn application_category(&self, package_name: &str) -> Result<CategoryCode, PlatformError> {
        self.with_env(|env| {
            let manager = self.package_manager(env)?;
            let name = env.new_string(package_name)?;
            let info = env
                .call_method(
                    manager.as_obj(),
                    "getApplicationInfo",
                    "(Ljava/lang/String;I)Landroid/content/pm/ApplicationInfo;",
                    &[JValue::Object(&name), JValue::Int(0)],
                )?
                .l()?;
            if info.is_null() {
                return Err(PlatformError::NullResult("getApplicationInfo"));
            }
            let code = env.get_field(&info, "category", "I")?.i()?;
            Ok(CategoryCode::from(code))
        })
    }

    fn category_title(&self, code: CategoryCode) -> Result<Option<String>, PlatformError> {
        self.with_env(|env| {
            let title = env
                .call_static_method(
                    "android/content/pm/ApplicationInfo",
                    "getCategoryTitle",
                    "(Landroid/content/Context;I)Ljava/lang/CharSequence;",
                    &[JValue::Object(self.context.as_obj()), JValue::Int(code.0)],
                )?
                .l()?;
            if title.is_null() {
                return Ok(None);
            }
            let title = env
                .call_method(&title, "toString", "()Ljava/lang/String;", &[])?
                .l()?;
            java_string(env, title).map(Some)
        })
    }

    fn application_icon(&self, package_name: &str) -> Result<IconDrawable, PlatformError> {
        self.with_env(|env| {
            let manager = self.package_manager(env)?;
            let name = env.new_string(package_name)?;
            let drawable = env
                .call_method(
                    manager.as_obj(),
                    "getApplicationIcon",
                    "(Ljava/lang/String;)Landroid/graphics/drawable/Drawable;",
                    &[JValue::Object(&name)],
                )?
                .l()?;
            if drawable.is_null() {
                return Err(PlatformError::NullResult("getApplicationIcon"));
            }

            if !env.is_instance_of(&drawable, "android/graphics/drawable/BitmapDrawable")? {
                let class = env
                    .call_method(&drawable, "getClass", "()Ljava/lang/Class;", &[])?
                    .l()?;
                let class_name = env
                    .call_method(&class, "getName", "()Ljava/lang/String;", &[])?
                    .l()?;
                return Ok(IconDrawable::NotBitmap {
                    class_name: java_string(env, class_name)?,
                });
            }

            let bitmap = env
                .call_method(&drawable, "getBitmap", "()Landroid/graphics/Bitmap;", &[])?
                .l()?;
            if bitmap.is_null() {
                return Err(PlatformError::NullResult("BitmapDrawable.getBitmap"));
            }

            let format = env
                .get_static_field(
                    "android/graphics/Bitmap$CompressFormat",
                    "PNG",
                    "Landroid/graphics/Bitmap$CompressFormat;",
                )?
                .l()?;
            let stream = env.new_object("java/io/ByteArrayOutputStream", "()V", &[])?;
            let compressed = env
                .call_method(
                    &bitmap,
                    "compress",
                    "(Landroid/graphics/Bitmap$CompressFormat;ILjava/io/OutputStream;)Z",
                    &[
                        JValue::Object(&format),
                        JValue::Int(PNG_QUALITY),
                        JValue::Object(&stream),
                    ],
                )?
                .z()?;
            if !compressed {
                return Err(PlatformError::NullResult("Bitmap.compress"));
            }

            let bytes = env.call_method(&stream, "toByteArray", "()[B", &[])?.l()?;
            let bytes = env.convert_byte_array(JByteArray::from(bytes))?;
            Ok(IconDrawable::Bitmap(bytes))
        })
    }
}

impl SettingsNavigator for AndroidPlatform {
    fn open_usage_access_settings(&self) -> Result<(), PlatformError> {
        self.with_env(|env| {
            let action = env.new_string(ACTION_USAGE_ACCESS_SETTINGS)?;
            let intent = env.new_object(
                "android/content/Intent",
                "(Ljava/lang/String;)V",
                &[JValue::Object(&action)],
            )?;
            // The bridge may be called outside an activity task
            env.call_method(
                &intent,
                "addFlags",
                "(I)Landroid/content/Intent;",
                &[JValue::Int(FLAG_ACTIVITY_NEW_TASK)],
            )?;
            env.call_method(
                self.context.as_obj(),
                "startActivity",
                "(Landroid/content/Intent;)V",
                &[JValue::Object(&intent)],
            )?;
            Ok(())
        })
    }
}

/// `android.app.usage.UsageStats` pinned for reflective field reads
struct AndroidUsageRecord {
    vm: Arc<JavaVM>,
    stats: GlobalRef,
    package_name: String,
}

impl UsageRecord for AndroidUsageRecord {
    fn package_name(&self) -> &str {
        &self.package_name
    }

    fn read_int_field(&self, name: &str) -> FieldRead {
        let result = with_attached_env(&self.vm, |env| {
            let class = env
                .call_method(self.stats.as_obj(), "getClass", "()Ljava/lang/Class;", &[])?
                .l()?;
            let field_name = env.new_string(name)?;
            let field = env
                .call_method(
                    &class,
                    "getDeclaredField",
                    "(Ljava/lang/String;)Ljava/lang/reflect/Field;",
                    &[JValue::Object(&field_name)],
                )?
                .l()?;
            env.call_method(&field, "setAccessible", "(Z)V", &[JValue::Bool(1)])?;
            let value = env
                .call_method(
                    &field,
                    "getInt",
                    "(Ljava/lang/Object;)I",
                    &[JValue::Object(self.stats.as_obj())],
                )?
                .i()?;
            Ok(i64::from(value))
        });

        match result {
            Ok(value) => FieldRead::Value(value),
            Err(PlatformError::JavaException(description))
                if description.starts_with("java.lang.NoSuchFieldException") =>
            {
                FieldRead::Missing
            }
            Err(e) => FieldRead::Unreadable(e.to_string()),
        }
    }
}

/// Run `f` on an attached thread inside its own local frame.
///
/// A pending Java exception is described, cleared and returned as
/// `PlatformError::JavaException` so later JNI calls on the thread stay valid.
fn with_attached_env<T, F>(vm: &JavaVM, f: F) -> Result<T, PlatformError>
where
    F: FnOnce(&mut JNIEnv) -> Result<T, PlatformError>,
{
    let mut env = vm.attach_current_thread()?;
    let result = env.with_local_frame(LOCAL_FRAME_CAPACITY, |env| f(env));

    match result {
        Ok(value) => Ok(value),
        Err(e) => {
            if env.exception_check().unwrap_or(false) {
                Err(PlatformError::JavaException(take_exception(&mut env)))
            } else {
                Err(e)
            }
        }
    }
}

fn take_exception(env: &mut JNIEnv) -> String {
    let described =
        env.with_local_frame(LOCAL_FRAME_CAPACITY, |env| -> jni::errors::Result<String> {
            let throwable = env.exception_occurred()?;
            env.exception_clear()?;
            if throwable.is_null() {
                return Ok("unknown exception".into());
            }
            let text = env
                .call_method(&throwable, "toString", "()Ljava/lang/String;", &[])?
                .l()?;
            Ok(env.get_string(&JString::from(text))?.into())
        });

    // Never leave an exception pending, even when describing it failed
    let _ = env.exception_clear();
    described.unwrap_or_else(|e| format!("unknown exception ({e})"))
}

fn java_string(env: &mut JNIEnv, obj: JObject) -> Result<String, PlatformError> {
    if obj.is_null() {
        return Err(PlatformError::NullResult("java.lang.String"));
    }
    let text = JString::from(obj);
    Ok(env.get_string(&text)?.into())
}
