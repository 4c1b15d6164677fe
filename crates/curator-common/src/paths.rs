//! Path utilities for detecting file types by extension.
//!
//! The scanner decides whether a directory is a movie or a gallery purely from
//! file extensions. Matching is case-insensitive and only looks at the final
//! extension, so `scene.1080p.MKV` is a video file.

use std::path::Path;

/// Extensions that make a directory a movie candidate.
const VIDEO_EXTENSIONS: &[&str] = &[
    "mp4", "avi", "mov", "mkv", "flv", "wmv", "m4v", "mpeg", "mpg",
];

/// Extensions that make a directory subtree a gallery candidate.
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "tiff", "webp"];

fn has_extension_in(path: &Path, set: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| set.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Check if a path has a video file extension.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use curator_common::paths::is_video_file;
///
/// assert!(is_video_file(Path::new("scene1.mp4")));
/// assert!(is_video_file(Path::new("/path/to/clip.MPG")));
/// assert!(!is_video_file(Path::new("cover.jpg")));
/// ```
pub fn is_video_file(path: &Path) -> bool {
    has_extension_in(path, VIDEO_EXTENSIONS)
}

/// Check if a path has an image file extension.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use curator_common::paths::is_image_file;
///
/// assert!(is_image_file(Path::new("pic1.png")));
/// assert!(is_image_file(Path::new("/path/to/scan.TIFF")));
/// assert!(!is_image_file(Path::new("scene1.mp4")));
/// ```
pub fn is_image_file(path: &Path) -> bool {
    has_extension_in(path, IMAGE_EXTENSIONS)
}

/// Base name of a directory as a string, if it has one.
///
/// Root paths such as `/` have no base name and return `None`.
pub fn base_name(path: &Path) -> Option<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
}
