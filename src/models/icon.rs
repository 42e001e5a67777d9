/// Application icon as resolved by the package manager
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IconDrawable {
    /// Bitmap-backed icon, already encoded as lossless PNG
    Bitmap(Vec<u8>),
    /// Adaptive, vector or any other drawable that is not bitmap-backed
    NotBitmap { class_name: String },
}
