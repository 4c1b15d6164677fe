//! Cover artwork lookup.
//!
//! Movie covers and scene covers use different file name patterns: movies
//! also accept `thumb.*` and match anywhere in the name, scene covers must
//! start with `poster` or `cover`.

use super::walk;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static MOVIE_COVER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:thumb|poster|cover)\.(?:jpg|png|jpeg|webp)")
        .expect("movie cover regex should compile")
});

static SCENE_COVER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:poster|cover)\.(?:jpg|png|jpeg|webp)")
        .expect("scene cover regex should compile")
});

/// Which naming convention to look for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverPattern {
    /// `thumb|poster|cover` followed by an image extension, anywhere in the name.
    Movie,
    /// Name starting with `poster|cover` and an image extension.
    Scene,
}

impl CoverPattern {
    pub fn matches(self, file_name: &str) -> bool {
        match self {
            Self::Movie => MOVIE_COVER.is_match(file_name),
            Self::Scene => SCENE_COVER.is_match(file_name),
        }
    }
}

/// First file under `root` whose name matches `pattern`, in walk order.
pub fn find_cover(root: &Path, pattern: CoverPattern) -> Option<PathBuf> {
    walk::files(root)
        .find(|entry| pattern.matches(&entry.file_name().to_string_lossy()))
        .map(|entry| entry.into_path())
}
