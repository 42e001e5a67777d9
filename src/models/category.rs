/// `ApplicationInfo.category` as reported by the package manager
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryCode(pub i32);

impl CategoryCode {
    pub const UNDEFINED: CategoryCode = CategoryCode(-1);
    pub const GAME: CategoryCode = CategoryCode(0);
    pub const AUDIO: CategoryCode = CategoryCode(1);
    pub const VIDEO: CategoryCode = CategoryCode(2);
    pub const IMAGE: CategoryCode = CategoryCode(3);
    pub const SOCIAL: CategoryCode = CategoryCode(4);
    pub const NEWS: CategoryCode = CategoryCode(5);
    pub const MAPS: CategoryCode = CategoryCode(6);
    pub const PRODUCTIVITY: CategoryCode = CategoryCode(7);
    pub const ACCESSIBILITY: CategoryCode = CategoryCode(8);

    pub fn is_defined(self) -> bool {
        self != Self::UNDEFINED
    }

    /// Constant name used by the platform, for log messages
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GAME => "CATEGORY_GAME",
            Self::AUDIO => "CATEGORY_AUDIO",
            Self::VIDEO => "CATEGORY_VIDEO",
            Self::IMAGE => "CATEGORY_IMAGE",
            Self::SOCIAL => "CATEGORY_SOCIAL",
            Self::NEWS => "CATEGORY_NEWS",
            Self::MAPS => "CATEGORY_MAPS",
            Self::PRODUCTIVITY => "CATEGORY_PRODUCTIVITY",
            Self::ACCESSIBILITY => "CATEGORY_ACCESSIBILITY",
            Self::UNDEFINED => "CATEGORY_UNDEFINED",
            CategoryCode(_) => "CATEGORY_UNKNOWN",
        }
    }
}

impl From<i32> for CategoryCode {
    fn from(code: i32) -> Self {
        Self(code)
    }
}
