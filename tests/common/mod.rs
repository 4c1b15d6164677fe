//! Shared test harness for integration tests.
//!
//! Provides [`FakeCatalog`], an in-memory [`CatalogClient`] that applies
//! writes to its own state and records them, plus small helpers for building
//! media trees on disk.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use curator::catalog::{
    CatalogClient, CatalogError, GalleryRef, ImageRef, MovieRef, NewMovie, SceneMovie, SceneRef,
    StashPath,
};
use curator::config::Config;
use curator::context::{RunContext, Task};
use curator::retry::RetryPolicy;
use curator_common::CatalogId;

/// A write the syncer sent to the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Write {
    CreateMovie { name: String, has_cover: bool },
    SetSceneMovies { scene: String, movies: Vec<String> },
    SetSceneCover { scene: String },
    CreateGallery { title: String },
    AddGalleryImages { gallery: String, images: Vec<String> },
}

#[derive(Debug, Clone)]
pub struct FakeScene {
    pub id: String,
    pub path: String,
    pub movies: Vec<SceneMovie>,
    pub cover: Option<String>,
}

#[derive(Debug, Clone)]
pub struct FakeImage {
    pub id: String,
    pub path: String,
    pub galleries: Vec<String>,
}

#[derive(Default)]
struct State {
    stash_paths: Vec<StashPath>,
    movies: Vec<MovieRef>,
    galleries: Vec<GalleryRef>,
    scenes: Vec<FakeScene>,
    images: Vec<FakeImage>,
    writes: Vec<Write>,
    write_attempts: usize,
    failures: VecDeque<CatalogError>,
    next_id: u32,
}

impl State {
    fn new_id(&mut self) -> CatalogId {
        self.next_id += 1;
        CatalogId::new(format!("{}", 1000 + self.next_id))
    }

    /// Every write attempt goes through here so scripted failures apply.
    fn begin_write(&mut self) -> Result<(), CatalogError> {
        self.write_attempts += 1;
        match self.failures.pop_front() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// In-memory catalog.
#[derive(Default)]
pub struct FakeCatalog {
    state: Mutex<State>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stash_path(self, path: &Path, exclude_video: bool) -> Self {
        self.state.lock().unwrap().stash_paths.push(StashPath {
            path: path.to_path_buf(),
            exclude_video,
        });
        self
    }

    pub fn with_movie(self, id: &str, name: &str) -> Self {
        self.state.lock().unwrap().movies.push(MovieRef {
            id: id.into(),
            name: name.to_string(),
        });
        self
    }

    pub fn with_gallery(self, id: &str, title: &str) -> Self {
        self.state.lock().unwrap().galleries.push(GalleryRef {
            id: id.into(),
            title: Some(title.to_string()),
        });
        self
    }

    pub fn with_scene(self, id: &str, path: &str, movie_ids: &[&str]) -> Self {
        self.state.lock().unwrap().scenes.push(FakeScene {
            id: id.to_string(),
            path: path.to_string(),
            movies: movie_ids
                .iter()
                .map(|m| SceneMovie {
                    movie_id: (*m).into(),
                    scene_index: None,
                })
                .collect(),
            cover: None,
        });
        self
    }

    pub fn with_image(self, id: &str, path: &str, gallery_ids: &[&str]) -> Self {
        self.state.lock().unwrap().images.push(FakeImage {
            id: id.to_string(),
            path: path.to_string(),
            galleries: gallery_ids.iter().map(|g| g.to_string()).collect(),
        });
        self
    }

    /// Make the next write attempts fail with these errors, in order.
    pub fn fail_next_writes(&self, errors: Vec<CatalogError>) {
        self.state.lock().unwrap().failures.extend(errors);
    }

    pub fn writes(&self) -> Vec<Write> {
        self.state.lock().unwrap().writes.clone()
    }

    pub fn clear_writes(&self) {
        self.state.lock().unwrap().writes.clear();
    }

    pub fn write_attempts(&self) -> usize {
        self.state.lock().unwrap().write_attempts
    }

    pub fn scene(&self, id: &str) -> FakeScene {
        self.state
            .lock()
            .unwrap()
            .scenes
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .expect("scene exists")
    }

    pub fn movies(&self) -> Vec<MovieRef> {
        self.state.lock().unwrap().movies.clone()
    }
}

#[async_trait::async_trait]
impl CatalogClient for FakeCatalog {
    async fn stash_paths(&self) -> Result<Vec<StashPath>, CatalogError> {
        Ok(self.state.lock().unwrap().stash_paths.clone())
    }

    async fn find_movies_by_name(&self, name: &str) -> Result<Vec<MovieRef>, CatalogError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .movies
            .iter()
            .filter(|m| m.name.to_lowercase() == name.to_lowercase())
            .cloned()
            .collect())
    }

    async fn create_movie(&self, movie: &NewMovie) -> Result<CatalogId, CatalogError> {
        let mut state = self.state.lock().unwrap();
        state.begin_write()?;
        let id = state.new_id();
        state.movies.push(MovieRef {
            id: id.clone(),
            name: movie.name.clone(),
        });
        state.writes.push(Write::CreateMovie {
            name: movie.name.clone(),
            has_cover: movie.front_image.is_some(),
        });
        Ok(id)
    }

    async fn find_scenes_by_path(&self, fragment: &str) -> Result<Vec<SceneRef>, CatalogError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .scenes
            .iter()
            .filter(|s| s.path.contains(fragment))
            .map(|s| SceneRef {
                id: s.id.as_str().into(),
                movies: s.movies.clone(),
            })
            .collect())
    }

    async fn set_scene_movies(
        &self,
        scene_id: &CatalogId,
        movies: &[SceneMovie],
    ) -> Result<(), CatalogError> {
        let mut state = self.state.lock().unwrap();
        state.begin_write()?;
        let scene = state
            .scenes
            .iter_mut()
            .find(|s| s.id == scene_id.as_str())
            .ok_or_else(|| CatalogError::Rejected(format!("scene {} not found", scene_id)))?;
        scene.movies = movies.to_vec();
        state.writes.push(Write::SetSceneMovies {
            scene: scene_id.to_string(),
            movies: movies.iter().map(|m| m.movie_id.to_string()).collect(),
        });
        Ok(())
    }

    async fn set_scene_cover(
        &self,
        scene_id: &CatalogId,
        cover: &str,
    ) -> Result<(), CatalogError> {
        let mut state = self.state.lock().unwrap();
        state.begin_write()?;
        let scene = state
            .scenes
            .iter_mut()
            .find(|s| s.id == scene_id.as_str())
            .ok_or_else(|| CatalogError::Rejected(format!("scene {} not found", scene_id)))?;
        scene.cover = Some(cover.to_string());
        state.writes.push(Write::SetSceneCover {
            scene: scene_id.to_string(),
        });
        Ok(())
    }

    async fn find_galleries_by_title(&self, title: &str) -> Result<Vec<GalleryRef>, CatalogError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .galleries
            .iter()
            .filter(|g| g.title.as_deref() == Some(title))
            .cloned()
            .collect())
    }

    async fn create_gallery(&self, title: &str) -> Result<CatalogId, CatalogError> {
        let mut state = self.state.lock().unwrap();
        state.begin_write()?;
        let id = state.new_id();
        state.galleries.push(GalleryRef {
            id: id.clone(),
            title: Some(title.to_string()),
        });
        state.writes.push(Write::CreateGallery {
            title: title.to_string(),
        });
        Ok(id)
    }

    async fn find_images_by_path(&self, fragment: &str) -> Result<Vec<ImageRef>, CatalogError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .images
            .iter()
            .filter(|i| i.path.contains(fragment))
            .map(|i| ImageRef {
                id: i.id.as_str().into(),
                gallery_ids: i.galleries.iter().map(|g| g.as_str().into()).collect(),
            })
            .collect())
    }

    async fn add_gallery_images(
        &self,
        gallery_id: &CatalogId,
        image_ids: &[CatalogId],
    ) -> Result<(), CatalogError> {
        let mut state = self.state.lock().unwrap();
        state.begin_write()?;
        for image in state.images.iter_mut() {
            if image_ids.iter().any(|id| id.as_str() == image.id)
                && !image.galleries.iter().any(|g| g == gallery_id.as_str())
            {
                image.galleries.push(gallery_id.to_string());
            }
        }
        state.writes.push(Write::AddGalleryImages {
            gallery: gallery_id.to_string(),
            images: image_ids.iter().map(|i| i.to_string()).collect(),
        });
        Ok(())
    }
}

/// The lock error the catalog reports under write contention.
pub fn locked() -> CatalogError {
    CatalogError::from_messages(["database is temporarily locked"])
}

/// Run context with a near-zero retry delay.
pub fn context(task: Task, roots: Vec<PathBuf>) -> RunContext {
    let mut ctx = RunContext::new(task, &Config::default(), roots);
    ctx.retry = RetryPolicy {
        max_attempts: 5,
        delay: Duration::from_millis(1),
    };
    ctx
}

/// Create `relative` under `root` with some bytes, making parent directories.
pub fn touch(root: &Path, relative: &str) -> PathBuf {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, b"fixture").unwrap();
    path
}
