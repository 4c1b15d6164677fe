use curator_common::CatalogId;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// How to reach the catalog.
#[derive(Debug, Clone)]
pub struct Connection {
    /// Base URL, without the `/graphql` suffix.
    pub url: String,
    pub api_key: Option<String>,
    pub session_cookie: Option<SessionCookie>,
    pub timeout: Duration,
}

impl Connection {
    pub fn new<S: Into<String>>(url: S) -> Self {
        Self {
            url: url.into(),
            api_key: None,
            session_cookie: None,
            timeout: Duration::from_secs(30),
        }
    }

    pub fn from_config(config: &crate::config::CatalogConfig) -> Self {
        Self {
            url: config.url.clone(),
            api_key: config.api_key.clone().filter(|key| !key.is_empty()),
            session_cookie: None,
            timeout: config.timeout(),
        }
    }
}

/// Session cookie handed to plugins by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCookie {
    pub name: String,
    pub value: String,
}

/// A library root configured in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StashPath {
    pub path: PathBuf,
    #[serde(rename = "excludeVideo", default)]
    pub exclude_video: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MovieRef {
    pub id: CatalogId,
    pub name: String,
}

/// Input for creating a movie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewMovie {
    pub name: String,
    /// Front cover as a `data:` URI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub front_image: Option<String>,
}

/// Scene/movie association, optionally with the scene's position in the movie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SceneMovie {
    pub movie_id: CatalogId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scene_index: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneRef {
    pub id: CatalogId,
    pub movies: Vec<SceneMovie>,
}

impl SceneRef {
    pub fn has_movie(&self, movie_id: &CatalogId) -> bool {
        self.movies.iter().any(|m| &m.movie_id == movie_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GalleryRef {
    pub id: CatalogId,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    pub id: CatalogId,
    pub gallery_ids: Vec<CatalogId>,
}

impl ImageRef {
    pub fn in_gallery(&self, gallery_id: &CatalogId) -> bool {
        self.gallery_ids.contains(gallery_id)
    }
}
