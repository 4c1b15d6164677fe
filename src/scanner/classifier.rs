//! Directory classification.
//!
//! A directory is a movie candidate when its own files include a video, and a
//! gallery candidate when anything in its subtree is an image. Failing either
//! check is a normal outcome, returned as [`Classification::NotApplicable`].

use super::walk;
use curator_common::paths::{base_name, is_image_file, is_video_file};
use curator_common::{Gallery, Movie};
use std::path::Path;

/// Result of classifying one directory as one kind of entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification<T> {
    Matched(T),
    NotApplicable { reason: String },
}

impl<T> Classification<T> {
    fn not_applicable(reason: impl Into<String>) -> Self {
        Self::NotApplicable {
            reason: reason.into(),
        }
    }

    pub fn is_matched(&self) -> bool {
        matches!(self, Self::Matched(_))
    }
}

/// Movie and gallery classification of one directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidates {
    pub movie: Classification<Movie>,
    /// `None` unless the directory is a movie; galleries only come with movies.
    pub gallery: Option<Classification<Gallery>>,
}

/// Classify a directory given its immediate file listing.
pub fn classify(dir: &Path, files: &[String]) -> Candidates {
    let movie = classify_movie(dir, files);
    let gallery = movie.is_matched().then(|| classify_gallery(dir));
    Candidates { movie, gallery }
}

fn has_video(files: &[String]) -> bool {
    files.iter().any(|name| is_video_file(Path::new(name)))
}

/// Stops at the first image found.
fn subtree_has_image(dir: &Path) -> bool {
    walk::files(dir).any(|entry| is_image_file(entry.path()))
}

/// Classify `dir` as a movie from the files directly inside it.
pub fn classify_movie(dir: &Path, files: &[String]) -> Classification<Movie> {
    let Some(name) = base_name(dir) else {
        return Classification::not_applicable(format!("{:?} has no base name", dir));
    };

    if !has_video(files) {
        return Classification::not_applicable(format!(
            "No video files found in the directory {}",
            dir.display()
        ));
    }

    Classification::Matched(Movie::new(name))
}

/// Classify `dir` as a gallery by searching its subtree for an image.
pub fn classify_gallery(dir: &Path) -> Classification<Gallery> {
    let Some(name) = base_name(dir) else {
        return Classification::not_applicable(format!("{:?} has no base name", dir));
    };

    if !subtree_has_image(dir) {
        return Classification::not_applicable(format!(
            "No image files found in the directory {}",
            dir.display()
        ));
    }

    Classification::Matched(Gallery::new(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn names(files: &[&str]) -> Vec<String> {
        files.iter().map(|f| f.to_string()).collect()
    }

    #[test]
    fn test_movie_requires_video() {
        let dir = Path::new("/media/MovieA");

        let result = classify_movie(dir, &names(&["scene1.MP4", "notes.txt"]));
        assert_eq!(result, Classification::Matched(Movie::new("MovieA")));

        let result = classify_movie(dir, &names(&["cover.jpg", "notes.txt"]));
        assert!(matches!(
            result,
            Classification::NotApplicable { ref reason } if reason.contains("No video files")
        ));
    }

    #[test]
    fn test_gallery_searches_subtree() {
        let dir = tempfile::tempdir().unwrap();
        let movie_dir = dir.path().join("MovieA");
        fs::create_dir_all(movie_dir.join("Gallery1/deeper")).unwrap();
        fs::write(movie_dir.join("scene1.mp4"), b"x").unwrap();

        assert!(!classify_gallery(&movie_dir).is_matched());

        fs::write(movie_dir.join("Gallery1/deeper/pic1.png"), b"x").unwrap();
        assert_eq!(
            classify_gallery(&movie_dir),
            Classification::Matched(Gallery::new("MovieA"))
        );
    }

    #[test]
    fn test_classify_both() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("Both");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("scene.mkv"), b"x").unwrap();
        fs::write(root.join("pic.webp"), b"x").unwrap();

        let files = walk::list_files(&root).unwrap();
        assert_eq!(
            classify(&root, &files),
            Candidates {
                movie: Classification::Matched(Movie::new("Both")),
                gallery: Some(Classification::Matched(Gallery::new("Both"))),
            }
        );
    }

    #[test]
    fn test_gallery_skipped_without_movie() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("Pictures");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("pic.png"), b"x").unwrap();

        let files = walk::list_files(&root).unwrap();
        let candidates = classify(&root, &files);
        assert!(!candidates.movie.is_matched());
        assert_eq!(candidates.gallery, None);
    }
}
