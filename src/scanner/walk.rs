//! Lazy directory traversal.
//!
//! [`directories`] yields one [`DirListing`] per directory under a root,
//! top-down and sorted by file name, so every consumer sees the same order.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::{DirEntry, WalkDir};

/// A directory together with the names of the regular files directly inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirListing {
    pub path: PathBuf,
    pub files: Vec<String>,
}

fn walker(root: &Path) -> impl Iterator<Item = DirEntry> {
    let root_path = root.to_path_buf();
    WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(move |entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping unreadable entry under {:?}: {}", root_path, e);
                None
            }
        })
}

/// Every directory under `root`, including `root` itself.
pub fn directories(root: &Path) -> impl Iterator<Item = DirListing> {
    walker(root)
        .filter(|entry| entry.file_type().is_dir())
        .filter_map(|entry| match list_files(entry.path()) {
            Ok(files) => Some(DirListing {
                path: entry.into_path(),
                files,
            }),
            Err(e) => {
                warn!("Failed to list {:?}: {}", entry.path(), e);
                None
            }
        })
}

/// Every regular file under `root`, recursively.
pub fn files(root: &Path) -> impl Iterator<Item = DirEntry> {
    walker(root).filter(|entry| entry.file_type().is_file())
}

/// Names of the regular files directly inside `dir`, sorted.
pub fn list_files(dir: &Path) -> std::io::Result<Vec<String>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.path().is_file() {
            files.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    files.sort();
    Ok(files)
}
