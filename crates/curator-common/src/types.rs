//! Entities discovered by a scan.
//!
//! A directory's base name is the natural key for both movies and galleries.
//! Within a single run names are compared case-insensitively; the catalog is
//! authoritative for anything already persisted.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// A directory recognized as a movie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    /// Base name of the directory.
    pub name: String,
    /// First cover/poster/thumb image found in the directory subtree.
    pub cover: Option<PathBuf>,
}

impl Movie {
    /// Create a movie with no cover.
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            cover: None,
        }
    }
}

impl fmt::Display for Movie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.cover {
            Some(cover) => write!(f, "{} (cover: {})", self.name, cover.display()),
            None => write!(f, "{}", self.name),
        }
    }
}

/// A directory subtree recognized as an image gallery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gallery {
    /// Base name of the directory.
    pub name: String,
}

impl Gallery {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self { name: name.into() }
    }
}

impl fmt::Display for Gallery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Something with a case-insensitive natural key.
pub trait Named {
    fn name(&self) -> &str;
}

impl Named for Movie {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for Gallery {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Check whether an entity with this name is already in the list.
///
/// Comparison ignores case, so `MovieA` and `moviea` collide.
pub fn contains_name<T: Named>(items: &[T], name: &str) -> bool {
    let name = name.to_lowercase();
    items.iter().any(|item| item.name().to_lowercase() == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_name_ignores_case() {
        let movies = vec![Movie::new("MovieA"), Movie::new("Other")];
        assert!(contains_name(&movies, "moviea"));
        assert!(contains_name(&movies, "OTHER"));
        assert!(!contains_name(&movies, "MovieB"));

        let galleries: Vec<Gallery> = vec![];
        assert!(!contains_name(&galleries, "MovieA"));
    }

    #[test]
    fn test_display() {
        let mut movie = Movie::new("MovieA");
        assert_eq!(movie.to_string(), "MovieA");
        movie.cover = Some(PathBuf::from("/m/MovieA/cover.jpg"));
        assert_eq!(movie.to_string(), "MovieA (cover: /m/MovieA/cover.jpg)");
        assert_eq!(Gallery::new("G").to_string(), "G");
    }
}
