//! Catalog service boundary.
//!
//! [`CatalogClient`] is the exact set of operations the scanner and syncer
//! need from the catalog. [`StashClient`] implements it over GraphQL; tests
//! provide in-memory doubles.

mod stash;
mod types;

pub use stash::StashClient;
pub use types::*;

use curator_common::CatalogId;

/// Error text the catalog reports while its database is locked by another writer.
pub const LOCKED_SIGNATURE: &str = "database is temporarily locked";

/// Failure returned by a catalog call.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The catalog database is temporarily locked; the call may succeed later.
    #[error("catalog database is temporarily locked: {0}")]
    Locked(String),

    /// The request never produced a response.
    #[error("catalog request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success HTTP status.
    #[error("catalog returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The catalog rejected the operation.
    #[error("catalog rejected request: {0}")]
    Rejected(String),

    /// The response did not have the expected shape.
    #[error("unexpected catalog response: {0}")]
    Decode(String),
}

impl CatalogError {
    /// Build an error from catalog-reported messages, classifying the lock
    /// condition as [`CatalogError::Locked`].
    pub fn from_messages<I, S>(messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = messages
            .into_iter()
            .map(|m| m.as_ref().to_string())
            .collect::<Vec<_>>()
            .join("; ");

        if joined.contains(LOCKED_SIGNATURE) {
            Self::Locked(joined)
        } else {
            Self::Rejected(joined)
        }
    }

    /// Whether retrying the same call can succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Locked(_))
    }
}

/// Operations the syncer performs against the catalog.
#[async_trait::async_trait]
pub trait CatalogClient: Send + Sync {
    /// Library roots configured in the catalog.
    async fn stash_paths(&self) -> Result<Vec<StashPath>, CatalogError>;

    /// Movies whose name equals `name`.
    async fn find_movies_by_name(&self, name: &str) -> Result<Vec<MovieRef>, CatalogError>;

    /// Create a movie and return its id.
    async fn create_movie(&self, movie: &NewMovie) -> Result<CatalogId, CatalogError>;

    /// Scenes whose file path contains `fragment`.
    async fn find_scenes_by_path(&self, fragment: &str) -> Result<Vec<SceneRef>, CatalogError>;

    /// Replace the movie associations of a scene.
    async fn set_scene_movies(
        &self,
        scene_id: &CatalogId,
        movies: &[SceneMovie],
    ) -> Result<(), CatalogError>;

    /// Replace the cover image of a scene with a `data:` URI.
    async fn set_scene_cover(&self, scene_id: &CatalogId, cover: &str)
        -> Result<(), CatalogError>;

    /// Galleries whose title equals `title`.
    async fn find_galleries_by_title(&self, title: &str) -> Result<Vec<GalleryRef>, CatalogError>;

    /// Create a gallery and return its id.
    async fn create_gallery(&self, title: &str) -> Result<CatalogId, CatalogError>;

    /// Images whose file path contains `fragment`.
    async fn find_images_by_path(&self, fragment: &str) -> Result<Vec<ImageRef>, CatalogError>;

    /// Add images to a gallery, keeping the ones already in it.
    async fn add_gallery_images(
        &self,
        gallery_id: &CatalogId,
        image_ids: &[CatalogId],
    ) -> Result<(), CatalogError>;
}
