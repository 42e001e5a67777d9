pub mod app_info;
pub mod channel;
mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod launches;
pub mod logging;
pub mod models;
pub mod permissions;
pub mod platform;
#[cfg(test)]
mod test_utils;
pub mod tracker;
pub mod validation;

use crate::channel::RequestDispatcher;
use crate::config::UsageConfig;
use crate::error::PlatformError;
use crate::platform::PlatformContext;
use log::{error, info};
use std::sync::Arc;
use tauri::Manager;

/// Error type for TimeSpy initialization failures
#[derive(Debug)]
pub enum InitError {
    Platform(PlatformError),
}

impl std::fmt::Display for InitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InitError::Platform(e) => write!(f, "Failed to reach OS usage services: {e}"),
        }
    }
}

impl std::error::Error for InitError {}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    let config = UsageConfig::from_env();
    logging::init(config.log_level);

    info!("TimeSpy starting up...");

    let result = tauri::Builder::default()
        .setup(move |app| {
            // OS service handles live for the whole process
            let platform = match PlatformContext::native() {
                Ok(platform) => platform,
                Err(e) => {
                    error!("TimeSpy initialization failed: {e}");
                    return Err(InitError::Platform(e).into());
                }
            };

            let dispatcher = Arc::new(RequestDispatcher::new(platform, &config));
            app.manage(dispatcher);

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![commands::invoke_channel])
        .run(tauri::generate_context!());

    if let Err(e) = result {
        error!("Error while running TimeSpy: {e}");
    }
}
