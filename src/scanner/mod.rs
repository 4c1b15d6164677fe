//! Media tree scanner.
//!
//! This module walks library roots and turns directories into movies and
//! galleries, or finds scene cover files. It never talks to the catalog; the
//! results are handed to [`crate::sync`].

pub mod classifier;
pub mod locator;
pub mod walk;
pub mod window;

use curator_common::paths::base_name;
use curator_common::{contains_name, Gallery, Movie};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub use classifier::{classify, classify_gallery, classify_movie, Candidates, Classification};
pub use locator::{find_cover, CoverPattern};
pub use walk::DirListing;
pub use window::ScanWindow;

/// Which files a cover scan reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    /// Every matching file.
    All,
    /// Only files modified inside the scan window.
    Recent,
}

/// Movies and galleries found in one scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Discovery {
    pub movies: Vec<Movie>,
    pub galleries: Vec<Gallery>,
}

/// Scanner over a fixed set of library roots.
pub struct TreeScanner {
    roots: Vec<PathBuf>,
}

impl TreeScanner {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }

    /// Classify every directory under the roots into movies and galleries.
    ///
    /// A name produces at most one movie and one gallery per scan, compared
    /// case-insensitively across all roots. A gallery is only considered for
    /// a directory that just produced a movie.
    pub fn discover(&self) -> Discovery {
        let mut found = Discovery::default();

        for root in &self.roots {
            if !root.exists() {
                warn!("Scan root does not exist: {:?}", root);
                continue;
            }

            info!("Scanning {:?} for movies and galleries", root);
            for listing in walk::directories(root) {
                self.visit(&listing, &mut found);
            }
        }

        info!(
            "Discovery complete: {} movies, {} galleries",
            found.movies.len(),
            found.galleries.len()
        );
        found
    }

    fn visit(&self, listing: &DirListing, found: &mut Discovery) {
        if listing.files.is_empty() {
            return;
        }
        let Some(name) = base_name(&listing.path) else {
            return;
        };
        if contains_name(&found.movies, &name) {
            return;
        }

        let Candidates { movie, gallery } = classify(&listing.path, &listing.files);
        match movie {
            Classification::Matched(mut movie) => {
                movie.cover = find_cover(&listing.path, CoverPattern::Movie);
                debug!("Found movie {}", movie);
                found.movies.push(movie);
            }
            Classification::NotApplicable { reason } => {
                warn!("{}", reason);
                return;
            }
        }

        if contains_name(&found.galleries, &name) {
            return;
        }
        match gallery {
            Some(Classification::Matched(gallery)) => {
                debug!("Found gallery {}", gallery);
                found.galleries.push(gallery);
            }
            Some(Classification::NotApplicable { reason }) => warn!("{}", reason),
            None => {}
        }
    }

    /// Walk the roots for scene cover files and call `on_match(directory, file_name)`
    /// for each qualifying one. Returns the number of matches.
    pub fn scan_covers<F>(&self, mode: ScanMode, window: &ScanWindow, mut on_match: F) -> usize
    where
        F: FnMut(&Path, &str),
    {
        let mut matched = 0;

        for root in &self.roots {
            info!("Scanning {:?} for cover files ({:?})", root, mode);

            for entry in walk::files(root) {
                let file_name = entry.file_name().to_string_lossy().into_owned();
                if !CoverPattern::Scene.matches(&file_name) {
                    continue;
                }

                if mode == ScanMode::Recent && !modified_within(entry.path(), window) {
                    continue;
                }

                let dir = entry.path().parent().unwrap_or(root.as_path());
                on_match(dir, &file_name);
                matched += 1;
            }
        }

        matched
    }
}

fn modified_within(path: &Path, window: &ScanWindow) -> bool {
    match path.metadata().and_then(|m| m.modified()) {
        Ok(modified) if window.contains(modified) => {
            info!("{:?} changed since {}, updating", path, window.start());
            true
        }
        Ok(_) => false,
        Err(e) => {
            warn!("Cannot read modification time of {:?}: {}", path, e);
            false
        }
    }
}
