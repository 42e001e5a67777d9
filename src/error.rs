use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use thiserror::Error;

/// Error returned to the shell for a method call.
///
/// Only these four conditions ever reach the shell; every other failure is
/// absorbed by the collaborator that hit it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelError {
    #[error("Argument '{name}' is missing")]
    MissingArgument { name: &'static str },

    #[error("API {required}+ required (running {running})")]
    UnsupportedPlatformVersion { required: i32, running: i32 },

    #[error("Icon not found for {package}")]
    NoIcon { package: String },

    #[error("Method '{method}' is not implemented on channel '{channel}'")]
    Unimplemented { channel: String, method: String },
}

impl ChannelError {
    /// Stable code the shell matches on
    pub fn code(&self) -> &'static str {
        match self {
            ChannelError::MissingArgument { .. } => "MISSING_ARGUMENT",
            ChannelError::UnsupportedPlatformVersion { .. } => "UNSUPPORTED_PLATFORM_VERSION",
            ChannelError::NoIcon { .. } => "NO_ICON",
            ChannelError::Unimplemented { .. } => "UNIMPLEMENTED",
        }
    }
}

// Tauri hands command errors to the shell through Serialize
impl Serialize for ChannelError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ChannelError", 2)?;
        state.serialize_field("code", self.code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Failure talking to an OS service. Never leaves the crate's collaborators.
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("{0} is not available on this platform")]
    Unavailable(&'static str),

    #[error("JNI error: {0}")]
    Jni(String),

    #[error("Java exception: {0}")]
    JavaException(String),

    #[error("{0} returned null")]
    NullResult(&'static str),
}

#[cfg(target_os = "android")]
impl From<jni::errors::Error> for PlatformError {
    fn from(e: jni::errors::Error) -> Self {
        match e {
            jni::errors::Error::JavaException => {
                PlatformError::JavaException("pending exception".into())
            }
            other => PlatformError::Jni(other.to_string()),
        }
    }
}
