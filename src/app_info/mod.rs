use crate::constants::{CATEGORY_FALLBACK, SDK_O};
use crate::models::IconDrawable;
use crate::platform::PlatformContext;
use log::{debug, warn};

/// Category title and icon bytes for installed packages
pub struct AppMetadataReader {
    platform: PlatformContext,
}

impl AppMetadataReader {
    pub fn new(platform: PlatformContext) -> Self {
        Self { platform }
    }

    /// Display title of the package's category, or "Other"
    pub fn app_category(&self, package_name: &str) -> String {
        if self.platform.sdk_int < SDK_O {
            return CATEGORY_FALLBACK.to_string();
        }

        let code = match self.platform.packages.application_category(package_name) {
            Ok(code) => code,
            Err(e) => {
                debug!("No application info for {package_name}: {e}");
                return CATEGORY_FALLBACK.to_string();
            }
        };

        if !code.is_defined() {
            debug!("{package_name} declares no category");
            return CATEGORY_FALLBACK.to_string();
        }

        match self.platform.packages.category_title(code) {
            Ok(Some(title)) => title,
            Ok(None) => CATEGORY_FALLBACK.to_string(),
            Err(e) => {
                warn!("Failed to resolve title for {} of {package_name}: {e}", code.as_str());
                CATEGORY_FALLBACK.to_string()
            }
        }
    }

    /// PNG bytes of the package's icon when it is bitmap-backed
    pub fn app_icon_bytes(&self, package_name: &str) -> Option<Vec<u8>> {
        match self.platform.packages.application_icon(package_name) {
            Ok(IconDrawable::Bitmap(png)) => Some(png),
            Ok(IconDrawable::NotBitmap { class_name }) => {
                debug!("Icon of {package_name} is a {class_name}, not a bitmap");
                None
            }
            Err(e) => {
                debug!("No icon for {package_name}: {e}");
                None
            }
        }
    }
}
