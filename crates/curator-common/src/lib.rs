//! Curator-Common: Shared types, constants, and utilities.
//!
//! This crate provides common functionality used across curator:
//!
//! - **Entities**: the [`Movie`] and [`Gallery`] values produced by a scan
//! - **Catalog IDs**: an opaque [`CatalogId`] wrapper for remote identifiers
//! - **Path Utilities**: Functions to detect file types by extension
//! - **Encoding**: base64 data URIs for uploading cover images
//! - **Error Handling**: Common error types and result aliases
//!
//! # Examples
//!
//! ```
//! use curator_common::{CatalogId, Movie, Error, Result};
//! use curator_common::paths::is_video_file;
//! use std::path::Path;
//!
//! let movie = Movie::new("MovieA");
//! assert!(movie.cover.is_none());
//!
//! let id = CatalogId::from("42");
//! assert_eq!(id.as_str(), "42");
//!
//! assert!(is_video_file(Path::new("scene1.mpeg")));
//!
//! fn example() -> Result<()> {
//!     Err(Error::invalid_input("empty cover"))
//! }
//! ```

pub mod encoding;
pub mod error;
pub mod ids;
pub mod paths;
pub mod types;

pub use error::{Error, Result};
pub use ids::CatalogId;
pub use types::*;
