use serde::{Deserialize, Serialize};

/// File extensions (lower-case, without the dot) routed to image hosts.
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "bmp", "tiff", "tif", "webp", "heic", "pdf", "avif",
];

/// Coarse classification of a file, derived from its name.
///
/// The category selects the provider chain and is never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileCategory {
    /// A still image (or PDF) that the image hosts accept.
    Image,
    /// Anything else: video, audio, documents, archives.
    Other,
}

impl FileCategory {
    /// Classify a file by the extension of its name.
    pub fn from_file_name(file_name: &str) -> Self {
        let extension = file_extension(file_name).to_ascii_lowercase();
        if IMAGE_EXTENSIONS.contains(&extension.as_str()) {
            Self::Image
        } else {
            Self::Other
        }
    }

    /// Returns the category name as a lower-case string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for FileCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns everything after the last `.` in `file_name`, or `""` if there is
/// no dot.
pub fn file_extension(file_name: &str) -> &str {
    file_name
        .rfind('.')
        .map_or("", |dot| &file_name[dot + 1..])
}
