pub mod category;
pub mod icon;
pub mod launch_count;
pub mod usage_event;

pub use category::CategoryCode;
pub use icon::IconDrawable;
pub use launch_count::{FieldRead, LaunchCount};
pub use usage_event::{ForegroundMap, UsageEvent, UsageEventKind};
