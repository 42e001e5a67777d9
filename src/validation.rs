use crate::error::ChannelError;
use log::warn;
use serde_json::{Map, Value};

/// Named arguments attached to a method call
pub type Arguments = Map<String, Value>;

pub const ARG_PACKAGE_NAME: &str = "packageName";
pub const ARG_SINCE: &str = "since";

/// Required string argument. Absent, null or non-string values count as missing.
pub fn require_string<'a>(
    args: &'a Arguments,
    name: &'static str,
) -> Result<&'a str, ChannelError> {
    match args.get(name) {
        Some(Value::String(value)) => Ok(value.as_str()),
        Some(Value::Null) | None => Err(ChannelError::MissingArgument { name }),
        Some(other) => {
            warn!("Argument '{name}' must be a string, got {other}");
            Err(ChannelError::MissingArgument { name })
        }
    }
}

/// Optional epoch-millisecond argument, 0 when absent.
/// A value that is not an integer is logged and treated as absent.
pub fn optional_millis(args: &Arguments, name: &'static str) -> i64 {
    match args.get(name) {
        Some(Value::Null) | None => 0,
        Some(value) => value.as_i64().unwrap_or_else(|| {
            warn!("Argument '{name}' must be an integer, got {value}; using 0");
            0
        }),
    }
}
