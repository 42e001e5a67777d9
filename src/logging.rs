//! Logger setup.
//!
//! Desktop builds log through `env_logger` (`RUST_LOG` overrides the
//! configured level). On Android records go to logcat
//! through `android_logger` under the `TimeSpy` tag.

use log::LevelFilter;

/// Install the process logger. Later calls are no-ops.
pub fn init(level: LevelFilter) {
    #[cfg(target_os = "android")]
    android::init(level);

    #[cfg(not(target_os = "android"))]
    {
        // Fails only when a logger is already installed, e.g. across tests
        let _ = env_logger::Builder::new()
            .filter_level(level)
            .parse_default_env()
            .try_init();
    }
}

#[cfg(target_os = "android")]
mod android {
    use crate::constants::LOG_TAG;
    use log::LevelFilter;

    pub fn init(level: LevelFilter) {
        android_logger::init_once(
            android_logger::Config::default()
                .with_max_level(level)
                .with_tag(LOG_TAG),
        );
    }
}

#[cfg(all(test, not(target_os = "android")))]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_does_not_panic() {
        init(LevelFilter::Info);
        init(LevelFilter::Debug);
        log::info!("logger installed");
    }
}
